//! Bearer-token REST client for the banking backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every request, whoever issues it, goes through [`ApiClient::dispatch`],
//! which reads the persisted token at send time and attaches it as a bearer
//! credential. With no token (or an empty one) the request goes out
//! unauthenticated and the backend decides.
//!
//! ERROR HANDLING
//! ==============
//! No retries, no caching, no response rewriting. Non-2xx answers come back
//! as [`ApiError::Status`] with the raw body.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::storage::TokenStorage;
use crate::types::{
    AccountDetails, AmountRequest, AuthResponse, BalanceUpdate, Credentials, Registration, Transaction,
    TransferRequest, User,
};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const USER_DETAILS_PATH: &str = "/user/details";
pub const ACCOUNT_DETAILS_PATH: &str = "/account/details";
pub const HISTORY_PATH: &str = "/transaction/history";
pub const TRANSFER_PATH: &str = "/transaction/transfer";
pub const DEPOSIT_PATH: &str = "/transaction/deposit";
pub const WITHDRAW_PATH: &str = "/transaction/withdraw";
pub const ADMIN_TRANSACTIONS_PATH: &str = "/admin/transactions";
pub const ADMIN_USERS_PATH: &str = "/admin/users";

/// HTTP verbs used by the backend contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
        })
    }
}

/// A fully resolved outgoing request, handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Bearer token to send in the `Authorization` header.
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// `Authorization` header value for this request, if authenticated.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {token}"))
    }

    /// Join the base URL and path. Transports append `query` themselves.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }

    /// Query pairs as borrowed tuples, the shape HTTP builders take.
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Raw HTTP answer: status plus body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns whatever the server answered.
///
/// Implementations report only transport failures as errors; any HTTP status,
/// including 4xx/5xx, is a successful [`ApiResponse`].
#[async_trait::async_trait(?Send)]
pub trait Transport: Send + Sync {
    /// Send a request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no HTTP response was received.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Typed client for the banking REST API.
///
/// Cheap to clone; clones share transport and token storage.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    storage: Arc<dyn TokenStorage>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, storage: Arc<dyn TokenStorage>) -> Self {
        Self { transport, storage }
    }

    /// Token storage shared with the session store.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn TokenStorage> {
        &self.storage
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns the transport or HTTP failure unmodified.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.post(LOGIN_PATH, credentials).await
    }

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// Returns the transport or HTTP failure unmodified.
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.post(REGISTER_PATH, registration).await
    }

    /// `GET /user/details` with the persisted token; validates the session.
    ///
    /// # Errors
    ///
    /// Returns the transport or HTTP failure unmodified.
    pub async fn user_details(&self) -> Result<User, ApiError> {
        self.get(USER_DETAILS_PATH, Vec::new()).await
    }

    /// `GET /account/details?userId=`.
    ///
    /// # Errors
    ///
    /// Returns the transport or HTTP failure unmodified.
    pub async fn account_details(&self, user_id: i64) -> Result<AccountDetails, ApiError> {
        self.get(ACCOUNT_DETAILS_PATH, vec![("userId".to_owned(), user_id.to_string())])
            .await
    }

    /// `GET /transaction/history`, in backend order.
    ///
    /// # Errors
    ///
    /// Returns the transport or HTTP failure unmodified.
    pub async fn transaction_history(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get(HISTORY_PATH, Vec::new()).await
    }

    /// `POST /transaction/transfer`.
    ///
    /// # Errors
    ///
    /// Returns the transport or HTTP failure unmodified.
    pub async fn transfer(&self, request: &TransferRequest) -> Result<BalanceUpdate, ApiError> {
        self.post(TRANSFER_PATH, request).await
    }

    /// `POST /transaction/deposit`.
    ///
    /// # Errors
    ///
    /// Returns the transport or HTTP failure unmodified.
    pub async fn deposit(&self, request: &AmountRequest) -> Result<BalanceUpdate, ApiError> {
        self.post(DEPOSIT_PATH, request).await
    }

    /// `POST /transaction/withdraw`.
    ///
    /// # Errors
    ///
    /// Returns the transport or HTTP failure unmodified.
    pub async fn withdraw(&self, request: &AmountRequest) -> Result<BalanceUpdate, ApiError> {
        self.post(WITHDRAW_PATH, request).await
    }

    /// `GET /admin/transactions` (admin only; the backend enforces it).
    ///
    /// # Errors
    ///
    /// Returns the transport or HTTP failure unmodified.
    pub async fn admin_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get(ADMIN_TRANSACTIONS_PATH, Vec::new()).await
    }

    /// `GET /admin/users` (admin only; the backend enforces it).
    ///
    /// # Errors
    ///
    /// Returns the transport or HTTP failure unmodified.
    pub async fn admin_users(&self) -> Result<Vec<User>, ApiError> {
        self.get(ADMIN_USERS_PATH, Vec::new()).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: Vec<(String, String)>) -> Result<T, ApiError> {
        self.dispatch(Method::Get, path, query, None).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.dispatch(Method::Post, path, Vec::new(), Some(body)).await
    }

    /// Attach the persisted token, send, and decode a 2xx JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`], [`ApiError::Status`] for non-2xx
    /// answers, or [`ApiError::Decode`] when the body does not match `T`.
    pub async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let request = ApiRequest {
            method,
            path: path.to_owned(),
            query,
            bearer: self.storage.load().filter(|t| !t.is_empty()),
            body,
        };
        log::debug!("api {method} {path} (authenticated: {})", request.bearer.is_some());

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            log::debug!("api {method} {path} -> {}", response.status);
            return Err(ApiError::Status { status: response.status, body: response.body });
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
