//! Signal-backed adapters for the session store's cell and navigator seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` creates one `RwSignal<Session>` and provides it as context; views
//! read it reactively while the `SessionStore` writes it through
//! [`SignalCell`]. Store-initiated navigation is queued in a signal by
//! [`RouterRedirect`] and drained inside the router, where `use_navigate` is
//! available.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;
use session::{Navigator, Session, SessionCell};

/// Session cell that publishes every write to a reactive signal.
#[derive(Clone, Copy, Debug)]
pub struct SignalCell(pub RwSignal<Session>);

impl SessionCell for SignalCell {
    fn get(&self) -> Session {
        self.0.try_get_untracked().unwrap_or_default()
    }

    fn set(&self, session: Session) {
        let _ = self.0.try_set(session);
    }
}

/// Navigator that queues the target path for the router to pick up.
#[derive(Clone, Copy, Debug)]
pub struct RouterRedirect(pub RwSignal<Option<String>>);

impl Navigator for RouterRedirect {
    fn navigate(&self, path: &str) {
        let _ = self.0.try_set(Some(path.to_owned()));
    }
}

/// Identity shown in the navbar, if signed in.
pub fn greeting(session: &Session) -> Option<String> {
    session
        .user
        .as_ref()
        .filter(|_| session.is_authenticated())
        .map(|user| format!("Welcome, {}!", user.first_name))
}
