use super::*;
use serde_json::json;

// =============================================================================
// Amounts
// =============================================================================

#[test]
fn parse_amount_accepts_decimal_input() {
    assert_eq!(parse_amount("50.00"), Ok(50.0));
    assert_eq!(parse_amount(" 0.01 "), Ok(0.01));
}

#[test]
fn parse_amount_rejects_blank() {
    assert_eq!(parse_amount("   "), Err(FormError::Required("Amount")));
}

#[test]
fn parse_amount_rejects_garbage_and_non_finite() {
    assert_eq!(parse_amount("ten"), Err(FormError::InvalidAmount));
    assert_eq!(parse_amount("inf"), Err(FormError::InvalidAmount));
    assert_eq!(parse_amount("NaN"), Err(FormError::InvalidAmount));
}

#[test]
fn parse_amount_rejects_below_minimum() {
    assert_eq!(parse_amount("0"), Err(FormError::AmountTooSmall));
    assert_eq!(parse_amount("0.001"), Err(FormError::AmountTooSmall));
    assert_eq!(parse_amount("-5"), Err(FormError::AmountTooSmall));
}

// =============================================================================
// Credentials and registration
// =============================================================================

#[test]
fn credentials_trim_username_only() {
    let creds = credentials("  alice ", " pw ").expect("valid");
    assert_eq!(creds.username, "alice");
    assert_eq!(creds.password, " pw ");
}

#[test]
fn credentials_require_both_fields() {
    assert_eq!(credentials("", "pw"), Err(FormError::Required("Username")));
    assert_eq!(credentials("alice", ""), Err(FormError::Required("Password")));
}

#[test]
fn registration_checks_names_first() {
    assert_eq!(registration("", "", "", "Doe"), Err(FormError::Required("First name")));
    assert_eq!(registration("", "", "Jane", " "), Err(FormError::Required("Last name")));
    assert_eq!(registration("", "pw", "Jane", "Doe"), Err(FormError::Required("Username")));
}

#[test]
fn registration_payload_is_camel_case() {
    let reg = registration("jane", "pw", " Jane ", "Doe").expect("valid");
    assert_eq!(
        serde_json::to_value(&reg).expect("serialize"),
        json!({ "username": "jane", "password": "pw", "firstName": "Jane", "lastName": "Doe" })
    );
}

// =============================================================================
// Transaction payloads
// =============================================================================

#[test]
fn transfer_payload_matches_backend_shape() {
    let request = transfer("50.00", "ACCT123", "").expect("valid");
    assert_eq!(
        serde_json::to_value(&request).expect("serialize"),
        json!({ "amount": 50.0, "toAccountNumber": "ACCT123", "description": "" })
    );
}

#[test]
fn transfer_requires_recipient() {
    assert_eq!(
        transfer("10", "  ", "rent"),
        Err(FormError::Required("Recipient account number"))
    );
}

#[test]
fn transfer_reports_amount_error_before_recipient() {
    assert_eq!(transfer("", "", ""), Err(FormError::Required("Amount")));
}

#[test]
fn amount_request_trims_description() {
    let request = amount_request("25", "  paycheck ").expect("valid");
    assert_eq!(request, AmountRequest { amount: 25.0, description: "paycheck".into() });
}

#[test]
fn required_messages_name_the_field() {
    assert_eq!(FormError::Required("Username").to_string(), "Username is required.");
}
