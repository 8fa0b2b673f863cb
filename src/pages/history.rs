//! Full transaction history for the signed-in account.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use session::SessionStore;
use session::types::Transaction;

use crate::components::alert::{Alert, AlertKind};
use crate::components::spinner::Spinner;
use crate::components::transaction_table::TransactionTable;
use crate::state::load::{LoadState, spawn_load};

const HISTORY_FAILED: &str = "Failed to load transaction history.";

#[component]
pub fn HistoryPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let history = RwSignal::new(LoadState::<Vec<Transaction>>::Loading);

    let api = store.api().clone();
    spawn_load(history, HISTORY_FAILED, move || async move { api.transaction_history().await });

    view! {
        <div class="history-page card">
            <h1>"Transaction History"</h1>
            {move || match history.get() {
                LoadState::Loading => view! { <Spinner/> }.into_any(),
                LoadState::Failed(message) => view! { <Alert kind=AlertKind::Error message=message/> }.into_any(),
                LoadState::Ready(transactions) => view! { <TransactionTable transactions=transactions/> }.into_any(),
            }}
        </div>
    }
}
