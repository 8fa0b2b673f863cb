//! Platform-neutral session and API core for the BankSys client.
//!
//! This crate owns everything the browser client and the CLI share: the wire
//! DTOs, the bearer-token API client, the session state machine, the route
//! table and guard, and form validation. Browser and native front ends plug in
//! their own [`api::Transport`], [`storage::TokenStorage`],
//! [`session::SessionCell`] and [`session::Navigator`] implementations.

pub mod api;
pub mod error;
pub mod format;
pub mod forms;
pub mod guard;
pub mod routes;
pub mod session;
pub mod storage;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{ApiClient, ApiRequest, ApiResponse, Method, Transport};
pub use error::{ApiError, FailureKind, FormError, SessionError};
pub use guard::GuardDecision;
pub use session::{MemoryCell, Navigator, Phase, Session, SessionCell, SessionStore};
pub use storage::{MemoryStorage, TokenStorage};
pub use types::{Role, User};
