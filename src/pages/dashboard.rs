//! Customer dashboard: balance, quick actions, and recent activity.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered behind the route guard, so a signed-in user is present when the
//! page mounts. Account details and history are fetched once on mount; a
//! failure of either replaces the page body with an error alert.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::components::A;
use session::types::{AccountDetails, Transaction};
use session::{Session, SessionStore, format, routes};

use crate::components::alert::{Alert, AlertKind};
use crate::components::spinner::Spinner;
use crate::components::transaction_table::TransactionTable;
use crate::state::load::{LoadState, spawn_load};

const DASHBOARD_FAILED: &str = "Failed to load dashboard data.";

#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let session = expect_context::<RwSignal<Session>>();

    let user = session.with_untracked(|s| s.user.clone());
    let first_name = user.as_ref().map(|u| u.first_name.clone()).unwrap_or_default();

    let account = RwSignal::new(LoadState::<AccountDetails>::Loading);
    let history = RwSignal::new(LoadState::<Vec<Transaction>>::Loading);

    match user {
        Some(user) => {
            let api = store.api().clone();
            spawn_load(account, DASHBOARD_FAILED, move || async move { api.account_details(user.id).await });
            let api = store.api().clone();
            spawn_load(history, DASHBOARD_FAILED, move || async move { api.transaction_history().await });
        }
        None => account.set(LoadState::Failed(DASHBOARD_FAILED.to_owned())),
    }

    move || {
        let account = account.get();
        let history = history.get();
        if let Some(message) = account.error().or(history.error()) {
            let message = message.to_owned();
            return view! { <Alert kind=AlertKind::Error message=message/> }.into_any();
        }
        let (Some(details), Some(transactions)) = (account.ready(), history.ready()) else {
            return view! { <Spinner/> }.into_any();
        };
        let recent = format::recent(transactions, format::RECENT_LIMIT).to_vec();

        view! {
            <div class="dashboard-page">
                <h1>{format!("Welcome, {first_name}!")}</h1>

                <section class="card balance-card">
                    <h2>"Your Balance"</h2>
                    <p class="balance-card__amount">{format::money(details.balance)}</p>
                    <p class="balance-card__account">
                        {format!("Account Number: {} ({})", details.account_number, details.account_type)}
                    </p>
                </section>

                <div class="dashboard-page__actions">
                    <A href=routes::DEPOSIT attr:class="btn btn--success">"Deposit"</A>
                    <A href=routes::WITHDRAW attr:class="btn btn--warning">"Withdraw"</A>
                    <A href=routes::TRANSFER attr:class="btn btn--primary">"Transfer"</A>
                </div>

                <section class="card">
                    <h2>"Recent Transactions"</h2>
                    <TransactionTable transactions=recent empty_message="No recent transactions."/>
                    <div class="card__footer">
                        <A href=routes::HISTORY>"View All Transactions →"</A>
                    </div>
                </section>
            </div>
        }
        .into_any()
    }
}
