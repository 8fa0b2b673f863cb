//! Root application component with routing and context providers.
//!
//! ARCHITECTURE
//! ============
//! `App` builds the one `SessionStore` for the page lifetime from the browser
//! seams and provides it, together with the session signal it writes, as
//! context. Startup validation is kicked off here, once. Navigation requested
//! by the store is drained by `RedirectListener`, which lives inside the
//! router so it can use `use_navigate`.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use session::{ApiClient, Session, SessionStore, routes};

use crate::components::navbar::Navbar;
use crate::components::protected::Protected;
use crate::config;
use crate::net::storage::BrowserStorage;
use crate::net::transport::GlooTransport;
use crate::pages::admin::{AdminDashboardPage, AdminTransactionsPage, AdminUsersPage};
use crate::pages::cash::{DepositPage, WithdrawPage};
use crate::pages::dashboard::DashboardPage;
use crate::pages::history::HistoryPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::register::RegisterPage;
use crate::pages::transfer::TransferPage;
use crate::state::session::{RouterRedirect, SignalCell};

/// Root application component.
///
/// Provides the session store and session signal, starts token validation,
/// and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(Session::default());
    let redirect = RwSignal::new(None::<String>);

    let api = ApiClient::new(
        Arc::new(GlooTransport::new(config::api_base_url())),
        Arc::new(BrowserStorage),
    );
    let store = SessionStore::new(api, Arc::new(SignalCell(session)), Arc::new(RouterRedirect(redirect)));

    provide_context(session);
    provide_context(store.clone());

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        if let Err(e) = store.start().await {
            log::warn!("session startup failed: {e}");
        }
    });
    #[cfg(not(feature = "csr"))]
    let _ = store;

    view! {
        <Title text="BankSys"/>

        <Router>
            <RedirectListener pending=redirect/>
            <Navbar/>
            <main class="container">
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <Protected><DashboardPage/></Protected> }
                    />
                    <Route
                        path=StaticSegment("deposit")
                        view=|| view! { <Protected><DepositPage/></Protected> }
                    />
                    <Route
                        path=StaticSegment("withdraw")
                        view=|| view! { <Protected><WithdrawPage/></Protected> }
                    />
                    <Route
                        path=StaticSegment("transfer")
                        view=|| view! { <Protected><TransferPage/></Protected> }
                    />
                    <Route
                        path=StaticSegment("history")
                        view=|| view! { <Protected><HistoryPage/></Protected> }
                    />
                    <Route
                        path=StaticSegment("admin")
                        view=|| view! { <Protected roles=routes::ADMIN_ONLY><AdminDashboardPage/></Protected> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("users"))
                        view=|| view! { <Protected roles=routes::ADMIN_ONLY><AdminUsersPage/></Protected> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("transactions"))
                        view=|| view! { <Protected roles=routes::ADMIN_ONLY><AdminTransactionsPage/></Protected> }
                    />
                </Routes>
            </main>
        </Router>
    }
}

/// Performs navigation queued by the session store.
#[component]
fn RedirectListener(pending: RwSignal<Option<String>>) -> impl IntoView {
    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(path) = pending.get() {
            pending.set(None);
            navigate(&path, NavigateOptions::default());
        }
    });
}
