//! Account registration page.
//!
//! A successful registration signs the user in and lands on the dashboard;
//! both happen inside `SessionStore::register`.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;
use session::types::Registration;
use session::{Session, SessionStore, forms, routes};

use crate::components::alert::{Alert, AlertKind};

const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct RegisterForm {
    first_name: String,
    last_name: String,
    username: String,
    password: String,
}

fn validate_registration(form: &RegisterForm) -> Result<Registration, String> {
    forms::registration(&form.username, &form.password, &form.first_name, &form.last_name).map_err(|e| e.to_string())
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let session = expect_context::<RwSignal<Session>>();

    let form = RwSignal::new(RegisterForm::default());
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.get_untracked().is_pending() {
            return;
        }
        let registration = match form.with_untracked(validate_registration) {
            Ok(registration) => registration,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        error.set(None);

        #[cfg(feature = "csr")]
        {
            let store = store.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = store.register(&registration).await {
                    log::info!("registration rejected: {e}");
                    let _ = error.try_set(Some(e.user_message(REGISTRATION_FAILED)));
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&store, registration);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card card">
                <h1>"Create an Account"</h1>
                <Show when=move || error.get().is_some()>
                    <Alert kind=AlertKind::Error message=Signal::derive(move || error.get().unwrap_or_default())/>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    <div class="auth-form__row">
                        <label class="field">
                            <span>"First Name"</span>
                            <input
                                type="text"
                                prop:value=move || form.get().first_name
                                on:input=move |ev| form.update(|f| f.first_name = event_target_value(&ev))
                            />
                        </label>
                        <label class="field">
                            <span>"Last Name"</span>
                            <input
                                type="text"
                                prop:value=move || form.get().last_name
                                on:input=move |ev| form.update(|f| f.last_name = event_target_value(&ev))
                            />
                        </label>
                    </div>
                    <label class="field">
                        <span>"Username"</span>
                        <input
                            type="text"
                            autocomplete="username"
                            prop:value=move || form.get().username
                            on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                        />
                    </label>
                    <label class="field">
                        <span>"Password"</span>
                        <input
                            type="password"
                            autocomplete="new-password"
                            prop:value=move || form.get().password
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        />
                    </label>
                    <button class="btn btn--success" type="submit" disabled=move || session.get().is_pending()>
                        {move || if session.get().is_pending() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Already have an account? "
                    <A href=routes::LOGIN>"Login here"</A>
                </p>
            </div>
        </div>
    }
}
