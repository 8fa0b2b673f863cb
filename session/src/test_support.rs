//! Fakes for the transport and navigation seams.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use tokio::sync::Notify;

use crate::api::{ApiClient, ApiRequest, ApiResponse, Transport};
use crate::error::ApiError;
use crate::session::{MemoryCell, Navigator, SessionStore};
use crate::storage::{MemoryStorage, TokenStorage};
use crate::types::{Role, User};

/// Scripted transport: one canned answer per path, every request recorded.
///
/// Unscripted paths answer 404. With a gate installed, each call waits for a
/// `Notify` permit before answering.
#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: Mutex<HashMap<String, Result<ApiResponse, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
    gate: Option<Arc<Notify>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, path: &str, status: u16, body: Value) -> Self {
        self.routes
            .lock()
            .expect("routes mutex should lock")
            .insert(path.to_owned(), Ok(ApiResponse { status, body: body.to_string() }));
        self
    }

    pub(crate) fn fail(self, path: &str, error: ApiError) -> Self {
        self.routes
            .lock()
            .expect("routes mutex should lock")
            .insert(path.to_owned(), Err(error));
        self
    }

    pub(crate) fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("requests mutex should lock").clone()
    }

    pub(crate) fn calls_to(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let path = request.path.clone();
        self.requests.lock().expect("requests mutex should lock").push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.routes
            .lock()
            .expect("routes mutex should lock")
            .get(&path)
            .cloned()
            .unwrap_or_else(|| Ok(ApiResponse { status: 404, body: String::new() }))
    }
}

/// Navigator that records every requested path.
#[derive(Default)]
pub(crate) struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn visited(&self) -> Vec<String> {
        self.visited.lock().expect("navigator mutex should lock").clone()
    }

    pub(crate) fn last(&self) -> Option<String> {
        self.visited().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.lock().expect("navigator mutex should lock").push(path.to_owned());
    }
}

/// Session store wired to fakes, with handles to inspect each seam.
pub(crate) struct Harness {
    pub(crate) store: SessionStore,
    pub(crate) transport: Arc<FakeTransport>,
    pub(crate) storage: Arc<MemoryStorage>,
    pub(crate) navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub(crate) fn new(transport: FakeTransport, storage: MemoryStorage) -> Self {
        let transport = Arc::new(transport);
        let storage = Arc::new(storage);
        let navigator = Arc::new(RecordingNavigator::default());
        let api = ApiClient::new(transport.clone(), storage.clone());
        let store = SessionStore::new(api, Arc::new(MemoryCell::new()), navigator.clone());
        Self { store, transport, storage, navigator }
    }

    pub(crate) fn persisted_token(&self) -> Option<String> {
        self.storage.load()
    }
}

pub(crate) fn user(id: i64, username: &str, role: Role) -> User {
    User {
        id,
        username: username.to_owned(),
        first_name: "Test".to_owned(),
        last_name: "User".to_owned(),
        role,
        email: None,
        status: None,
    }
}

pub(crate) fn user_json(id: i64, username: &str, role: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "firstName": "Test",
        "lastName": "User",
        "role": role
    })
}

pub(crate) fn auth_json(token: &str, id: i64, username: &str, role: &str) -> Value {
    json!({ "token": token, "user": user_json(id, username, role) })
}
