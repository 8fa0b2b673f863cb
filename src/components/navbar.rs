//! Top navigation bar.
//!
//! Anonymous visitors get Login and Register links. Signed-in users get a
//! greeting, their role's landing link, History, and Logout.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::components::A;
use session::{Role, Session, SessionStore, routes};

use crate::state::session::greeting;

#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let store = expect_context::<SessionStore>();

    let on_logout = move |_: leptos::ev::MouseEvent| store.logout();

    view! {
        <nav class="navbar">
            <A href=routes::HOME attr:class="navbar__brand">"BankSys"</A>
            <div class="navbar__links">
                {move || {
                    let current = session.get();
                    match (greeting(&current), current.role()) {
                        (Some(welcome), Some(role)) => {
                            let (home, home_label) = if role == Role::Admin {
                                (routes::ADMIN, "Admin Panel")
                            } else {
                                (routes::DASHBOARD, "Dashboard")
                            };
                            view! {
                                <span class="navbar__greeting">{welcome}</span>
                                <A href=home attr:class="navbar__link">{home_label}</A>
                                <A href=routes::HISTORY attr:class="navbar__link">"History"</A>
                                <button class="btn btn--danger navbar__logout" on:click=on_logout.clone()>
                                    "Logout"
                                </button>
                            }
                                .into_any()
                        }
                        _ => {
                            view! {
                                <A href=routes::LOGIN attr:class="navbar__link">"Login"</A>
                                <A href=routes::REGISTER attr:class="btn btn--primary navbar__register">
                                    "Register"
                                </A>
                            }
                                .into_any()
                        }
                    }
                }}
            </div>
        </nav>
    }
}
