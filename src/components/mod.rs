//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome (navbar, alerts, spinners, tables) and the
//! route guard wrapper, reading session state from Leptos context.

pub mod alert;
pub mod navbar;
pub mod protected;
pub mod spinner;
pub mod transaction_table;
