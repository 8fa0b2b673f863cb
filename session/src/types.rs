//! Wire DTOs for the banking REST API.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON. Account and transaction
//! records are external data; the client keeps them as received and only
//! derives display helpers from them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Role granted to an authenticated user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Regular banking customer.
    #[serde(alias = "CUSTOMER", alias = "customer")]
    Customer,
    /// Bank administrator with access to the admin panel.
    #[serde(alias = "ADMIN", alias = "admin")]
    Admin,
}

impl Role {
    /// Display label used by navigation and admin tables.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Admin => "Admin",
        }
    }
}

/// Authenticated user profile as returned by `/user/details` and auth calls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    /// Present on admin user listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Account status (e.g. `ACTIVE`), present on admin user listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }
}

/// Login payload for `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration payload for `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Successful login/register response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Account summary for `GET /account/details`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetails {
    pub balance: f64,
    pub account_number: String,
    pub account_type: String,
}

/// A transaction record as provided by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    /// Owning account, present on admin listings.
    #[serde(default)]
    pub account_id: Option<serde_json::Value>,
    /// Backend transaction type label (e.g. `"Deposit"`, `"Withdrawal"`).
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    /// ISO 8601 timestamp.
    #[serde(default)]
    pub date: String,
}

impl Transaction {
    /// Deposits credit the account; every other type debits it.
    #[must_use]
    pub fn is_credit(&self) -> bool {
        self.kind.eq_ignore_ascii_case("deposit")
    }

    /// Account identifier rendered for display, or an empty string.
    #[must_use]
    pub fn account_label(&self) -> String {
        match &self.account_id {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }
}

/// Transfer payload for `POST /transaction/transfer`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub amount: f64,
    pub to_account_number: String,
    pub description: String,
}

/// Deposit/withdraw payload for `POST /transaction/{deposit,withdraw}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmountRequest {
    pub amount: f64,
    pub description: String,
}

/// Balance returned after a balance-changing transaction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceUpdate {
    pub new_balance: f64,
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        serde_json::Value::String(s) => s
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("expected integer id, got {s:?}"))),
        _ => Err(D::Error::custom("expected number")),
    }
}
