//! # banksys
//!
//! Leptos + WASM browser client for the BankSys online banking backend.
//!
//! Session lifecycle, the route guard, and the REST client live in the
//! platform-neutral `session` crate. This crate supplies the browser seams
//! (`gloo-net` transport, `localStorage` token storage, signal-backed session
//! cell, router-backed navigator) and the pages and components built on them.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
