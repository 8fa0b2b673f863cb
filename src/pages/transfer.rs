//! Funds transfer form.
//!
//! On success the page shows the new balance and returns to the dashboard
//! after a short delay. Submissions are not deduplicated beyond disabling the
//! button while a request is in flight.

#[cfg(test)]
#[path = "transfer_test.rs"]
mod transfer_test;

use leptos::prelude::*;
use session::types::TransferRequest;
use session::{SessionStore, format, forms};

use crate::components::alert::{Alert, AlertKind};

const TRANSFER_FAILED: &str = "Transfer failed. Check account number and funds.";

fn transfer_success_message(request: &TransferRequest, new_balance: f64) -> String {
    format!(
        "Successfully transferred {} to account {}. New balance: {}",
        format::money(request.amount),
        request.to_account_number,
        format::money(new_balance)
    )
}

fn validate_transfer(amount: &str, to_account_number: &str, description: &str) -> Result<TransferRequest, String> {
    forms::transfer(amount, to_account_number, description).map_err(|e| e.to_string())
}

#[component]
pub fn TransferPage() -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let return_to_dashboard = super::dashboard_return();

    let amount = RwSignal::new(String::new());
    let to_account = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        success.set(None);
        let request = match validate_transfer(
            &amount.get_untracked(),
            &to_account.get_untracked(),
            &description.get_untracked(),
        ) {
            Ok(request) => request,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let api = store.api().clone();
            let return_to_dashboard = return_to_dashboard.clone();
            leptos::task::spawn_local(async move {
                match api.transfer(&request).await {
                    Ok(update) => {
                        let _ = success.try_set(Some(transfer_success_message(&request, update.new_balance)));
                        let _ = amount.try_set(String::new());
                        let _ = to_account.try_set(String::new());
                        let _ = description.try_set(String::new());
                        return_to_dashboard();
                    }
                    Err(e) => {
                        log::info!("transfer rejected: {e}");
                        let _ = error.try_set(Some(e.user_message(TRANSFER_FAILED)));
                    }
                }
                let _ = busy.try_set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&store, &return_to_dashboard, request);
        }
    };

    view! {
        <div class="form-page card">
            <h1>"Transfer Funds"</h1>
            <Show when=move || error.get().is_some()>
                <Alert kind=AlertKind::Error message=Signal::derive(move || error.get().unwrap_or_default())/>
            </Show>
            <Show when=move || success.get().is_some()>
                <Alert kind=AlertKind::Success message=Signal::derive(move || success.get().unwrap_or_default())/>
            </Show>
            <form class="form" on:submit=on_submit>
                <label class="field">
                    <span>"Recipient Account Number"</span>
                    <input
                        type="text"
                        prop:value=move || to_account.get()
                        on:input=move |ev| to_account.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span>"Amount ($)"</span>
                    <input
                        type="number"
                        step="0.01"
                        min="0.01"
                        prop:value=move || amount.get()
                        on:input=move |ev| amount.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span>"Description (Optional)"</span>
                    <input
                        type="text"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    />
                </label>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Processing..." } else { "Send Money" }}
                </button>
            </form>
        </div>
    }
}
