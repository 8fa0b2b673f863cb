//! Display formatting for server-provided records.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use crate::types::Transaction;

/// Number of transactions shown on the dashboard.
pub const RECENT_LIMIT: usize = 5;

/// Two-decimal dollar amount, e.g. `$1234.50` or `-$3.00`.
#[must_use]
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${amount:.2}")
    }
}

/// Amount with the sign implied by the transaction type.
#[must_use]
pub fn signed_amount(tx: &Transaction) -> String {
    let sign = if tx.is_credit() { '+' } else { '-' };
    format!("{sign}${:.2}", tx.amount.abs())
}

/// `YYYY-MM-DD` part of an ISO 8601 timestamp; other input is returned as-is.
#[must_use]
pub fn date(iso: &str) -> String {
    if has_date_prefix(iso) { iso[..10].to_owned() } else { iso.to_owned() }
}

/// `YYYY-MM-DD HH:MM` from an ISO 8601 timestamp; falls back to [`date`].
#[must_use]
pub fn date_time(iso: &str) -> String {
    let bytes = iso.as_bytes();
    let has_time = bytes.len() >= 16
        && matches!(bytes[10], b'T' | b' ')
        && bytes[11..13].iter().all(u8::is_ascii_digit)
        && bytes[13] == b':'
        && bytes[14..16].iter().all(u8::is_ascii_digit);
    if has_date_prefix(iso) && has_time {
        format!("{} {}", &iso[..10], &iso[11..16])
    } else {
        date(iso)
    }
}

/// First `limit` records in backend order.
#[must_use]
pub fn recent(transactions: &[Transaction], limit: usize) -> &[Transaction] {
    &transactions[..transactions.len().min(limit)]
}

fn has_date_prefix(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}
