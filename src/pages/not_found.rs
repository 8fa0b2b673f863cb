//! Fallback page for unknown routes.

use leptos::prelude::*;
use leptos_router::components::A;
use session::routes;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page card">
            <h1>"404"</h1>
            <h2>"Page Not Found"</h2>
            <p>"Sorry, the page you are looking for does not exist."</p>
            <A href=routes::HOME attr:class="btn btn--primary">"Go Home"</A>
        </div>
    }
}
