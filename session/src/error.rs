//! Error taxonomy shared by the API client, session store, and forms.
//!
//! ERROR HANDLING
//! ==============
//! The API client never rewrites backend failures: `ApiError::Status` keeps
//! the raw status and body. Views pull a display string out of it with
//! [`ApiError::user_message`] at the rendering edge.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Coarse failure class used to pick how a view reacts to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced an HTTP response.
    Network,
    /// Bad credentials or an expired/rejected token (HTTP 401).
    Authentication,
    /// Valid session but insufficient rights (HTTP 403).
    Authorization,
    /// Malformed input, caught locally or rejected by the backend (400/422).
    Validation,
    /// Any other non-2xx response.
    Server,
    /// A 2xx response whose body did not match the expected shape.
    Decode,
}

/// Failure of a single API call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify the failure per the client's error taxonomy.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) => FailureKind::Network,
            Self::Status { status: 401, .. } => FailureKind::Authentication,
            Self::Status { status: 403, .. } => FailureKind::Authorization,
            Self::Status { status: 400 | 422, .. } => FailureKind::Validation,
            Self::Status { .. } => FailureKind::Server,
            Self::Decode(_) => FailureKind::Decode,
        }
    }

    /// HTTP status code, when the backend answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message for inline display.
    ///
    /// Prefers the backend's `message` field, then its `error` field, and
    /// falls back to `fallback` for transport errors or unreadable bodies.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        let Self::Status { body, .. } = self else {
            return fallback.to_owned();
        };
        backend_message(body).unwrap_or_else(|| fallback.to_owned())
    }
}

fn backend_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(ToOwned::to_owned)
}

/// Client-side form validation failure, raised before any request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("Enter a valid amount.")]
    InvalidAmount,
    #[error("Amount must be at least $0.01.")]
    AmountTooSmall,
}

impl FormError {
    #[must_use]
    pub fn kind(self) -> FailureKind {
        FailureKind::Validation
    }
}

/// Failure of a session store operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("cannot {operation} while session is {phase}")]
    IllegalTransition { operation: &'static str, phase: &'static str },
    /// The session changed while the request was in flight; the response was dropped.
    #[error("session changed while {0} was in flight")]
    Superseded(&'static str),
}

impl SessionError {
    /// Failure class of the underlying API call, if there was one.
    #[must_use]
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Api(err) => Some(err.kind()),
            Self::IllegalTransition { .. } | Self::Superseded(_) => None,
        }
    }

    /// Message for inline form display.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api(err) => err.user_message(fallback),
            other => other.to_string(),
        }
    }
}
