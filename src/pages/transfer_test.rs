use super::*;

#[test]
fn success_message_reports_amount_recipient_and_balance() {
    let request = validate_transfer("50.00", "ACCT123", "").expect("valid");
    assert_eq!(
        transfer_success_message(&request, 950.0),
        "Successfully transferred $50.00 to account ACCT123. New balance: $950.00"
    );
}

#[test]
fn validate_transfer_requires_recipient() {
    assert_eq!(
        validate_transfer("10", "", "rent"),
        Err("Recipient account number is required.".to_owned())
    );
}

#[test]
fn validate_transfer_rejects_tiny_amounts() {
    assert_eq!(
        validate_transfer("0.001", "ACCT123", ""),
        Err("Amount must be at least $0.01.".to_owned())
    );
}
