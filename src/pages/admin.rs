//! Admin panel: landing cards, user listing, and the system-wide ledger.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page here is mounted behind an admin-only guard. The backend still
//! enforces the role; a 403 from it renders as an inline error.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::components::A;
use session::types::Transaction;
use session::{Session, SessionStore, User, routes};

use crate::components::alert::{Alert, AlertKind};
use crate::components::spinner::Spinner;
use crate::components::transaction_table::TransactionTable;
use crate::state::load::{LoadState, spawn_load};

const USERS_FAILED: &str = "Failed to load users.";
const TRANSACTIONS_FAILED: &str = "Failed to load transaction history.";

/// One rendered row of the user table.
fn user_row(user: &User) -> [String; 6] {
    [
        user.id.to_string(),
        user.username.clone(),
        user.full_name(),
        user.role.label().to_owned(),
        user.email.clone().unwrap_or_else(|| "-".to_owned()),
        user.status.clone().unwrap_or_else(|| "-".to_owned()),
    ]
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let first_name = move || session.with(|s| s.user.as_ref().map(|u| u.first_name.clone()).unwrap_or_default());

    view! {
        <div class="admin-page">
            <h1>"Admin Dashboard"</h1>
            <p class="admin-page__welcome">{move || format!("Welcome, Admin {}.", first_name())}</p>
            <div class="admin-page__cards">
                <A href=routes::ADMIN_USERS attr:class="card admin-card">
                    <h2>"User Management"</h2>
                    <p>"View registered users and their roles."</p>
                </A>
                <A href=routes::ADMIN_TRANSACTIONS attr:class="card admin-card">
                    <h2>"All Transactions"</h2>
                    <p>"View a complete log of all transactions in the system."</p>
                </A>
            </div>
        </div>
    }
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let users = RwSignal::new(LoadState::<Vec<User>>::Loading);

    let api = store.api().clone();
    spawn_load(users, USERS_FAILED, move || async move { api.admin_users().await });

    view! {
        <div class="admin-page card">
            <h1>"User Management"</h1>
            {move || match users.get() {
                LoadState::Loading => view! { <Spinner/> }.into_any(),
                LoadState::Failed(message) => view! { <Alert kind=AlertKind::Error message=message/> }.into_any(),
                LoadState::Ready(list) if list.is_empty() => view! { <p>"No users found."</p> }.into_any(),
                LoadState::Ready(list) => {
                    let rows = list
                        .iter()
                        .map(|user| {
                            let cells = user_row(user).into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view();
                            view! { <tr>{cells}</tr> }
                        })
                        .collect_view();
                    view! {
                        <table class="user-table">
                            <thead>
                                <tr>
                                    <th>"ID"</th>
                                    <th>"Username"</th>
                                    <th>"Name"</th>
                                    <th>"Role"</th>
                                    <th>"Email"</th>
                                    <th>"Status"</th>
                                </tr>
                            </thead>
                            <tbody>{rows}</tbody>
                        </table>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
pub fn AdminTransactionsPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let transactions = RwSignal::new(LoadState::<Vec<Transaction>>::Loading);

    let api = store.api().clone();
    spawn_load(transactions, TRANSACTIONS_FAILED, move || async move { api.admin_transactions().await });

    view! {
        <div class="admin-page card">
            <h1>"All System Transactions"</h1>
            {move || match transactions.get() {
                LoadState::Loading => view! { <Spinner/> }.into_any(),
                LoadState::Failed(message) => view! { <Alert kind=AlertKind::Error message=message/> }.into_any(),
                LoadState::Ready(list) => view! { <TransactionTable transactions=list detailed=true/> }.into_any(),
            }}
        </div>
    }
}
