//! Transaction list table shared by history, dashboard, and admin views.

#[cfg(test)]
#[path = "transaction_table_test.rs"]
mod transaction_table_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use session::format;
use session::types::Transaction;

/// CSS modifier for the amount cell.
fn amount_class(tx: &Transaction) -> &'static str {
    if tx.is_credit() {
        "tx-table__amount tx-table__amount--credit"
    } else {
        "tx-table__amount tx-table__amount--debit"
    }
}

fn date_cell(tx: &Transaction, detailed: bool) -> String {
    if detailed { format::date_time(&tx.date) } else { format::date(&tx.date) }
}

/// Table of transactions in backend order.
///
/// `detailed` adds the owning account column and minute-precision dates, as
/// the admin listing needs.
#[component]
pub fn TransactionTable(
    transactions: Vec<Transaction>,
    #[prop(optional)] detailed: bool,
    #[prop(optional)] empty_message: Option<&'static str>,
) -> impl IntoView {
    if transactions.is_empty() {
        let message = empty_message.unwrap_or("No transactions found.");
        return view! { <p class="tx-table__empty">{message}</p> }.into_any();
    }

    let rows = transactions
        .into_iter()
        .map(|tx| {
            let account = detailed.then(|| view! { <td>{tx.account_label()}</td> });
            view! {
                <tr>
                    <td>{date_cell(&tx, detailed)}</td>
                    {account}
                    <td>{tx.kind.clone()}</td>
                    <td>{tx.description.clone()}</td>
                    <td class=amount_class(&tx)>{format::signed_amount(&tx)}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="tx-table">
            <thead>
                <tr>
                    <th>"Date"</th>
                    {detailed.then(|| view! { <th>"Account ID"</th> })}
                    <th>"Type"</th>
                    <th>"Description"</th>
                    <th>"Amount"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
    .into_any()
}
