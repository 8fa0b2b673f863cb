//! Deposit and withdrawal pages.
//!
//! Both share one form: an amount and an optional description, posted to the
//! matching endpoint. On success the new balance is shown and the page
//! returns to the dashboard after a short delay.

#[cfg(test)]
#[path = "cash_test.rs"]
mod cash_test;

use leptos::prelude::*;
use session::types::AmountRequest;
use session::{SessionStore, format, forms};

use crate::components::alert::{Alert, AlertKind};

/// Which balance-changing operation a cash form performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CashAction {
    Deposit,
    Withdraw,
}

impl CashAction {
    fn title(self) -> &'static str {
        match self {
            Self::Deposit => "Deposit Funds",
            Self::Withdraw => "Withdraw Funds",
        }
    }

    fn button(self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
        }
    }

    #[cfg_attr(not(feature = "csr"), allow(dead_code))]
    fn failure(self) -> &'static str {
        match self {
            Self::Deposit => "Deposit failed. Please try again.",
            Self::Withdraw => "Withdrawal failed. Check your available balance.",
        }
    }

    fn success_message(self, request: &AmountRequest, new_balance: f64) -> String {
        let verb = match self {
            Self::Deposit => "deposited",
            Self::Withdraw => "withdrew",
        };
        format!(
            "Successfully {verb} {}. New balance: {}",
            format::money(request.amount),
            format::money(new_balance)
        )
    }

    #[cfg(feature = "csr")]
    async fn submit(
        self,
        api: &session::ApiClient,
        request: &AmountRequest,
    ) -> Result<session::types::BalanceUpdate, session::ApiError> {
        match self {
            Self::Deposit => api.deposit(request).await,
            Self::Withdraw => api.withdraw(request).await,
        }
    }
}

fn validate_cash(amount: &str, description: &str) -> Result<AmountRequest, String> {
    forms::amount_request(amount, description).map_err(|e| e.to_string())
}

#[component]
pub fn DepositPage() -> impl IntoView {
    view! { <CashForm action=CashAction::Deposit/> }
}

#[component]
pub fn WithdrawPage() -> impl IntoView {
    view! { <CashForm action=CashAction::Withdraw/> }
}

#[component]
fn CashForm(action: CashAction) -> impl IntoView {
    let store = expect_context::<SessionStore>();
    let return_to_dashboard = super::dashboard_return();

    let amount = RwSignal::new(String::new());
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
        let request = match validate_cash(&amount.get_untracked(), &description.get_untracked()) {
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
                match action.submit(&api, &request).await {
                    Ok(update) => {
                        let _ = success.try_set(Some(action.success_message(&request, update.new_balance)));
                        let _ = amount.try_set(String::new());
                        let _ = description.try_set(String::new());
                        return_to_dashboard();
                    }
                    Err(e) => {
                        log::info!("{} rejected: {e}", action.button());
                        let _ = error.try_set(Some(e.user_message(action.failure())));
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
            <h1>{action.title()}</h1>
            <Show when=move || error.get().is_some()>
                <Alert kind=AlertKind::Error message=Signal::derive(move || error.get().unwrap_or_default())/>
            </Show>
            <Show when=move || success.get().is_some()>
                <Alert kind=AlertKind::Success message=Signal::derive(move || success.get().unwrap_or_default())/>
            </Show>
            <form class="form" on:submit=on_submit>
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
                    {move || if busy.get() { "Processing..." } else { action.button() }}
                </button>
            </form>
        </div>
    }
}
