//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (form state, fetches, follow-up
//! navigation) and delegates rendering details to `components`. Access
//! control is applied around pages in `app`, not inside them.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

pub mod admin;
pub mod cash;
pub mod dashboard;
pub mod history;
pub mod home;
pub mod login;
pub mod not_found;
pub mod register;
pub mod transfer;

/// Build a "return to the dashboard shortly" action for a transaction page.
///
/// Must be called while the page is being built. If the page unmounts before
/// the delay elapses, the pending navigation is dropped.
pub(crate) fn dashboard_return() -> impl Fn() + Clone + 'static {
    let navigate = use_navigate();
    let alive = Arc::new(AtomicBool::new(true));
    let alive_cleanup = alive.clone();
    on_cleanup(move || alive_cleanup.store(false, Ordering::Relaxed));

    move || {
        #[cfg(feature = "csr")]
        {
            let navigate = navigate.clone();
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(crate::config::REDIRECT_DELAY).await;
                if alive.load(Ordering::Relaxed) {
                    navigate(session::routes::DASHBOARD, leptos_router::NavigateOptions::default());
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&navigate, &alive);
        }
    }
}
