//! Login page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Submits credentials through the shared `SessionStore`, which persists the
//! token and navigates on success. A `?from=` query parameter, set by the
//! route guard, is passed along so the user returns to the page they asked
//! for when their role allows it.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;
use session::types::Credentials;
use session::{Session, SessionStore, forms, routes};

use crate::components::alert::{Alert, AlertKind};

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

fn validate_login(username: &str, password: &str) -> Result<Credentials, String> {
    forms::credentials(username, password).map_err(|e| e.to_string())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let session = expect_context::<RwSignal<Session>>();
    let query = use_query_map();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.get_untracked().is_pending() {
            return;
        }
        let credentials = match validate_login(&username.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        error.set(None);
        let return_to = query.with_untracked(|q| q.get("from"));

        #[cfg(feature = "csr")]
        {
            let store = store.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = store.login(&credentials, return_to.as_deref()).await {
                    log::info!("login rejected: {e}");
                    let _ = error.try_set(Some(e.user_message(LOGIN_FAILED)));
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&store, credentials, return_to);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card card">
                <h1>"Login to BankSys"</h1>
                <Show when=move || error.get().is_some()>
                    <Alert kind=AlertKind::Error message=Signal::derive(move || error.get().unwrap_or_default())/>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    <label class="field">
                        <span>"Username"</span>
                        <input
                            type="text"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="field">
                        <span>"Password"</span>
                        <input
                            type="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="btn btn--primary" type="submit" disabled=move || session.get().is_pending()>
                        {move || if session.get().is_pending() { "Signing in..." } else { "Login" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Don't have an account? "
                    <A href=routes::REGISTER>"Register here"</A>
                </p>
            </div>
        </div>
    }
}
