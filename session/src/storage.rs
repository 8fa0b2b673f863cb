//! Persistent token storage seam.
//!
//! The persisted token is the only durable session artifact. The browser
//! client backs this with `localStorage`, the CLI with a file, and tests with
//! [`MemoryStorage`].

use std::sync::Mutex;

/// Key under which the browser client persists the bearer token.
pub const TOKEN_KEY: &str = "authToken";

/// Durable home for the single bearer token.
///
/// Storage failures are not surfaced: a token that cannot be persisted simply
/// does not survive a reload.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// In-process token storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    token: Mutex<Option<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_owned())) }
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, token: &str) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token.to_owned());
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
    }
}
