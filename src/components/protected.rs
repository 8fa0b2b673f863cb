//! Route guard wrapper for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps a page and renders it only when `session::guard::evaluate` says so.
//! While the session is still resolving it shows a spinner instead of
//! redirecting, so a reload with a valid token lands back on the same page.
//! Redirects replace the history entry so Back does not bounce the user into
//! the guard again.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use session::{GuardDecision, Role, Session, guard, routes};

use crate::components::spinner::Spinner;

#[component]
pub fn Protected(
    /// Roles allowed to view the children; empty means any signed-in user.
    #[prop(default = routes::ANY_ROLE)]
    roles: &'static [Role],
    children: ChildrenFn,
) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let location = use_location();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| {
        let requested = routes::full_location(&location.pathname.get(), &location.search.get());
        guard::evaluate(&session.get(), roles, &requested)
    });

    Effect::new(move || {
        if let Some(target) = decision.get().target() {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match decision.get() {
        GuardDecision::Render => children().into_any(),
        GuardDecision::Wait => view! { <Spinner/> }.into_any(),
        GuardDecision::RedirectToLogin { .. } | GuardDecision::Redirect(_) => {
            view! { <Spinner label="Redirecting..."/> }.into_any()
        }
    }
}
