//! Reactive state shared across the client.
//!
//! DESIGN
//! ======
//! `session` adapts the core session store onto Leptos signals; `load` is the
//! per-view fetch state used by data pages.

pub mod load;
pub mod session;
