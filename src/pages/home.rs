//! Public landing page.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::components::A;
use session::{Session, routes};

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();

    view! {
        <div class="home-page card">
            <h1>"Welcome to BankSys"</h1>
            <p class="home-page__tagline">"Your reliable and secure partner in digital banking."</p>
            <div class="home-page__actions">
                {move || match session.get().role().filter(|_| session.get().is_authenticated()) {
                    Some(role) => {
                        view! {
                            <A href=routes::landing_for(role) attr:class="btn btn--primary">
                                "Go to Your Dashboard"
                            </A>
                        }
                            .into_any()
                    }
                    None => {
                        view! {
                            <A href=routes::LOGIN attr:class="btn btn--primary">"Login"</A>
                            <A href=routes::REGISTER attr:class="btn btn--success">"Register"</A>
                        }
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}
