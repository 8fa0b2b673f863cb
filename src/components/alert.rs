//! Inline status message box.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

impl AlertKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "alert alert--success",
            Self::Error => "alert alert--error",
        }
    }
}

#[component]
pub fn Alert(kind: AlertKind, #[prop(into)] message: Signal<String>) -> impl IntoView {
    view! {
        <div class=kind.class() role="alert">
            {move || message.get()}
        </div>
    }
}
