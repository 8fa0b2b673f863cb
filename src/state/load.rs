//! Fetch lifecycle for data-driven views.
//!
//! TRADE-OFFS
//! ==========
//! In-flight requests are not cancelled when a view unmounts. The result is
//! written with `try_set`, which is a no-op on a disposed signal, so a late
//! response never reaches a view that no longer exists.

#[cfg(test)]
#[path = "load_test.rs"]
mod load_test;

use std::future::Future;

use leptos::prelude::*;
use session::ApiError;

/// Data fetched once when a view mounts.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Loading,
    Ready(T),
    /// User-facing error message.
    Failed(String),
}

impl<T> LoadState<T> {
    /// Settle from an API result, using the backend's message when it has one.
    pub fn from_result(result: Result<T, ApiError>, fallback: &str) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err.user_message(fallback)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Run `fetch` in the background and settle `target` with its result.
pub fn spawn_load<T, F, Fut>(target: RwSignal<LoadState<T>>, fallback: &'static str, fetch: F)
where
    T: Send + Sync + 'static,
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let result = fetch().await;
        if let Err(err) = &result {
            log::warn!("load failed: {err}");
        }
        let _ = target.try_set(LoadState::from_result(result, fallback));
    });
    #[cfg(not(feature = "csr"))]
    {
        let _ = (target, fallback, fetch);
    }
}
