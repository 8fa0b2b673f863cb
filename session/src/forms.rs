//! Client-side form validation.
//!
//! Each builder trims user input, rejects what the backend would reject
//! anyway, and produces the exact request payload.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use crate::error::FormError;
use crate::types::{AmountRequest, Credentials, Registration, TransferRequest};

/// Smallest amount accepted by the transaction forms.
pub const MIN_AMOUNT: f64 = 0.01;

/// Trimmed, non-empty field value.
///
/// # Errors
///
/// Returns [`FormError::Required`] naming `field` when blank.
pub fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(trimmed.to_owned())
}

/// Parse a currency amount typed by the user.
///
/// # Errors
///
/// Returns [`FormError::Required`], [`FormError::InvalidAmount`] for
/// non-numeric or non-finite input, or [`FormError::AmountTooSmall`].
pub fn parse_amount(raw: &str) -> Result<f64, FormError> {
    let raw = required(raw, "Amount")?;
    let amount = raw.parse::<f64>().map_err(|_| FormError::InvalidAmount)?;
    if !amount.is_finite() {
        return Err(FormError::InvalidAmount);
    }
    if amount < MIN_AMOUNT {
        return Err(FormError::AmountTooSmall);
    }
    Ok(amount)
}

/// # Errors
///
/// Returns [`FormError::Required`] for a blank username or password.
pub fn credentials(username: &str, password: &str) -> Result<Credentials, FormError> {
    let username = required(username, "Username")?;
    if password.is_empty() {
        return Err(FormError::Required("Password"));
    }
    Ok(Credentials { username, password: password.to_owned() })
}

/// # Errors
///
/// Returns [`FormError::Required`] for any blank field.
pub fn registration(
    username: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
) -> Result<Registration, FormError> {
    let first_name = required(first_name, "First name")?;
    let last_name = required(last_name, "Last name")?;
    let Credentials { username, password } = credentials(username, password)?;
    Ok(Registration { username, password, first_name, last_name })
}

/// # Errors
///
/// Returns the amount error, or [`FormError::Required`] for a blank recipient.
pub fn transfer(amount: &str, to_account_number: &str, description: &str) -> Result<TransferRequest, FormError> {
    let amount = parse_amount(amount)?;
    let to_account_number = required(to_account_number, "Recipient account number")?;
    Ok(TransferRequest {
        amount,
        to_account_number,
        description: description.trim().to_owned(),
    })
}

/// Deposit or withdrawal payload.
///
/// # Errors
///
/// Returns the amount error.
pub fn amount_request(amount: &str, description: &str) -> Result<AmountRequest, FormError> {
    Ok(AmountRequest {
        amount: parse_amount(amount)?,
        description: description.trim().to_owned(),
    })
}
