//! `localStorage` persistence for the bearer token.
//!
//! TRADE-OFFS
//! ==========
//! Storage is best-effort: private browsing or a disabled storage API means
//! the token simply does not survive a reload. Native builds no-op.

use session::TokenStorage;
#[cfg(feature = "csr")]
use session::storage::TOKEN_KEY;

/// Token storage backed by `window.localStorage["authToken"]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStorage for BrowserStorage {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .get_item(TOKEN_KEY)
                .ok()
                .flatten()
                .filter(|token| !token.is_empty())
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn save(&self, token: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                if storage.set_item(TOKEN_KEY, token).is_err() {
                    log::warn!("could not persist session token");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(TOKEN_KEY);
            }
        }
    }
}
