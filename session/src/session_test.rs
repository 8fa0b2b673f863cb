use super::*;
use crate::api::{LOGIN_PATH, REGISTER_PATH, USER_DETAILS_PATH};
use crate::error::FailureKind;
use crate::storage::MemoryStorage;
use crate::test_support::{FakeTransport, Harness, auth_json, user, user_json};
use serde_json::json;
use tokio::sync::Notify;

fn credentials(username: &str, password: &str) -> Credentials {
    Credentials { username: username.to_owned(), password: password.to_owned() }
}

async fn anonymous(transport: FakeTransport) -> Harness {
    let h = Harness::new(transport, MemoryStorage::new());
    h.store.start().await.expect("start");
    h
}

// =============================================================================
// Session transitions
// =============================================================================

#[test]
fn new_session_is_loading_and_uninitialized() {
    let session = Session::default();
    assert_eq!(session.phase, Phase::Uninitialized);
    assert!(session.is_loading());
    assert!(!session.is_authenticated());
}

#[test]
fn begin_without_token_settles_anonymous() {
    let mut session = Session::default();
    session.begin(None).expect("legal");
    assert_eq!(session.phase, Phase::Anonymous);
    assert!(!session.is_loading());
}

#[test]
fn begin_twice_is_illegal() {
    let mut session = Session::default();
    session.begin(None).expect("legal");
    let before = session.clone();
    assert!(matches!(session.begin(None), Err(SessionError::IllegalTransition { .. })));
    assert_eq!(session, before);
}

#[test]
fn authenticate_requires_anonymous() {
    let mut session = Session::default();
    session.begin(Some("t".into())).expect("legal");
    let err = session.authenticate("t2".into(), user(1, "a", Role::Customer));
    assert_eq!(
        err,
        Err(SessionError::IllegalTransition { operation: "sign in", phase: "validating" })
    );
}

#[test]
fn validated_only_from_validating() {
    let mut session = Session::default();
    session.begin(None).expect("legal");
    assert!(session.validated(user(1, "a", Role::Customer)).is_err());
    assert!(session.user.is_none());
}

#[test]
fn every_phase_change_bumps_epoch() {
    let mut session = Session::default();
    let e0 = session.epoch();
    session.begin(None).expect("legal");
    session.authenticate("t".into(), user(1, "a", Role::Customer)).expect("legal");
    session.clear();
    assert_eq!(session.epoch(), e0 + 3);
}

#[test]
fn clear_is_idempotent_on_identity() {
    let mut session = Session::default();
    session.clear();
    session.clear();
    assert_eq!(session.phase, Phase::Anonymous);
    assert!(session.token.is_none() && session.user.is_none() && !session.is_pending());
}

// =============================================================================
// Startup validation
// =============================================================================

#[tokio::test]
async fn start_without_token_is_anonymous_and_calls_nothing() {
    let h = Harness::new(FakeTransport::new(), MemoryStorage::new());
    h.store.start().await.expect("start");
    let session = h.store.snapshot();
    assert_eq!(session.phase, Phase::Anonymous);
    assert!(!session.is_loading());
    assert_eq!(h.transport.calls_to(USER_DETAILS_PATH), 0);
    assert!(h.navigator.visited().is_empty());
}

#[tokio::test]
async fn start_with_accepted_token_authenticates() {
    let h = Harness::new(
        FakeTransport::new().respond(USER_DETAILS_PATH, 200, user_json(7, "alice", "Customer")),
        MemoryStorage::with_token("tok"),
    );
    h.store.start().await.expect("start");
    let session = h.store.snapshot();
    assert_eq!(session.phase, Phase::Authenticated);
    assert_eq!(session.user.as_ref().map(|u| u.username.as_str()), Some("alice"));
    assert_eq!(session.token.as_deref(), Some("tok"));
    assert_eq!(h.persisted_token().as_deref(), Some("tok"));
    assert_eq!(h.transport.requests()[0].bearer.as_deref(), Some("tok"));
}

#[tokio::test]
async fn start_with_rejected_token_logs_out_silently() {
    let h = Harness::new(
        FakeTransport::new().respond(USER_DETAILS_PATH, 401, json!({ "message": "expired" })),
        MemoryStorage::with_token("stale"),
    );
    h.store.start().await.expect("rejection is not an error");
    let session = h.store.snapshot();
    assert_eq!(session.phase, Phase::Anonymous);
    assert!(session.token.is_none());
    assert_eq!(h.persisted_token(), None);
    assert_eq!(h.navigator.last().as_deref(), Some(routes::LOGIN));
}

#[tokio::test]
async fn start_with_network_failure_logs_out() {
    let h = Harness::new(
        FakeTransport::new().fail(USER_DETAILS_PATH, ApiError::Transport("offline".into())),
        MemoryStorage::with_token("tok"),
    );
    h.store.start().await.expect("start");
    assert_eq!(h.store.snapshot().phase, Phase::Anonymous);
    assert_eq!(h.persisted_token(), None);
}

#[tokio::test]
async fn start_treats_empty_token_as_absent() {
    let h = Harness::new(FakeTransport::new(), MemoryStorage::with_token(""));
    h.store.start().await.expect("start");
    assert_eq!(h.store.snapshot().phase, Phase::Anonymous);
    assert_eq!(h.transport.calls_to(USER_DETAILS_PATH), 0);
}

#[tokio::test]
async fn session_is_loading_while_validation_in_flight() {
    let gate = std::sync::Arc::new(Notify::new());
    let h = Harness::new(
        FakeTransport::new()
            .respond(USER_DETAILS_PATH, 200, user_json(1, "a", "Customer"))
            .gated(gate.clone()),
        MemoryStorage::with_token("tok"),
    );
    let observe = async {
        tokio::task::yield_now().await;
        let session = h.store.snapshot();
        gate.notify_one();
        session
    };
    let (started, during) = tokio::join!(h.store.start(), observe);
    started.expect("start");
    assert_eq!(during.phase, Phase::Validating);
    assert!(during.is_loading());
    assert!(!h.store.snapshot().is_loading());
}

#[tokio::test]
async fn logout_during_validation_discards_late_profile() {
    let gate = std::sync::Arc::new(Notify::new());
    let h = Harness::new(
        FakeTransport::new()
            .respond(USER_DETAILS_PATH, 200, user_json(1, "a", "Customer"))
            .gated(gate.clone()),
        MemoryStorage::with_token("tok"),
    );
    let interrupt = async {
        tokio::task::yield_now().await;
        h.store.logout();
        gate.notify_one();
    };
    let (started, ()) = tokio::join!(h.store.start(), interrupt);
    started.expect("start");
    let session = h.store.snapshot();
    assert_eq!(session.phase, Phase::Anonymous);
    assert!(session.user.is_none());
    assert_eq!(h.persisted_token(), None);
}

#[tokio::test]
async fn start_twice_is_illegal() {
    let h = anonymous(FakeTransport::new()).await;
    assert!(matches!(h.store.start().await, Err(SessionError::IllegalTransition { .. })));
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn login_customer_goes_to_dashboard() {
    let h = anonymous(FakeTransport::new().respond(LOGIN_PATH, 200, auth_json("t1", 2, "alice", "Customer"))).await;
    let user = h.store.login(&credentials("alice", "pw"), None).await.expect("login");
    assert_eq!(user.role, Role::Customer);
    assert_eq!(h.navigator.last().as_deref(), Some(routes::DASHBOARD));
    assert_eq!(h.persisted_token().as_deref(), Some("t1"));
    let session = h.store.snapshot();
    assert!(session.is_authenticated());
    assert!(!session.is_pending());
}

#[tokio::test]
async fn login_admin_goes_to_admin_panel() {
    let h = anonymous(FakeTransport::new().respond(LOGIN_PATH, 200, auth_json("t1", 1, "root", "Admin"))).await;
    h.store.login(&credentials("root", "pw"), None).await.expect("login");
    assert_eq!(h.navigator.last().as_deref(), Some(routes::ADMIN));
}

#[tokio::test]
async fn login_sends_credentials_without_bearer() {
    let h = anonymous(FakeTransport::new().respond(LOGIN_PATH, 200, auth_json("t1", 2, "alice", "Customer"))).await;
    h.store.login(&credentials("alice", "pw"), None).await.expect("login");
    let request = &h.transport.requests()[0];
    assert_eq!(request.bearer, None);
    assert_eq!(request.body, Some(json!({ "username": "alice", "password": "pw" })));
}

#[tokio::test]
async fn login_honors_permitted_return_location() {
    let h = anonymous(FakeTransport::new().respond(LOGIN_PATH, 200, auth_json("t1", 2, "alice", "Customer"))).await;
    h.store
        .login(&credentials("alice", "pw"), Some(routes::TRANSFER))
        .await
        .expect("login");
    assert_eq!(h.navigator.last().as_deref(), Some(routes::TRANSFER));
}

#[tokio::test]
async fn login_ignores_return_location_the_role_cannot_open() {
    let h = anonymous(FakeTransport::new().respond(LOGIN_PATH, 200, auth_json("t1", 2, "alice", "Customer"))).await;
    h.store
        .login(&credentials("alice", "pw"), Some(routes::ADMIN_USERS))
        .await
        .expect("login");
    assert_eq!(h.navigator.last().as_deref(), Some(routes::DASHBOARD));
}

#[tokio::test]
async fn login_with_wrong_password_leaves_session_anonymous() {
    let h = anonymous(
        FakeTransport::new().respond(LOGIN_PATH, 401, json!({ "message": "Invalid username or password." })),
    )
    .await;
    let before = h.store.snapshot();
    let err = h.store.login(&credentials("alice", "wrong"), None).await.expect_err("rejected");
    assert_eq!(err.user_message("Login failed."), "Invalid username or password.");
    assert!(matches!(&err, SessionError::Api(api) if api.kind() == FailureKind::Authentication));
    assert_eq!(h.store.snapshot(), before);
    assert_eq!(h.persisted_token(), None);
    assert!(h.navigator.visited().is_empty());
}

#[tokio::test]
async fn login_while_authenticated_is_illegal() {
    let h = anonymous(FakeTransport::new().respond(LOGIN_PATH, 200, auth_json("t1", 2, "alice", "Customer"))).await;
    h.store.login(&credentials("alice", "pw"), None).await.expect("login");
    let err = h.store.login(&credentials("alice", "pw"), None).await.expect_err("illegal");
    assert!(matches!(err, SessionError::IllegalTransition { phase: "authenticated", .. }));
    assert_eq!(h.transport.calls_to(LOGIN_PATH), 1);
}

#[tokio::test]
async fn login_before_start_is_illegal() {
    let h = Harness::new(FakeTransport::new(), MemoryStorage::new());
    let err = h.store.login(&credentials("a", "b"), None).await.expect_err("illegal");
    assert!(matches!(err, SessionError::IllegalTransition { phase: "uninitialized", .. }));
}

#[tokio::test]
async fn session_is_pending_during_login() {
    let gate = std::sync::Arc::new(Notify::new());
    let h = anonymous(
        FakeTransport::new()
            .respond(LOGIN_PATH, 200, auth_json("t1", 2, "alice", "Customer"))
            .gated(gate.clone()),
    )
    .await;
    let creds = credentials("alice", "pw");
    let observe = async {
        tokio::task::yield_now().await;
        let session = h.store.snapshot();
        gate.notify_one();
        session
    };
    let (result, during) = tokio::join!(h.store.login(&creds, None), observe);
    result.expect("login");
    assert!(during.is_pending());
    assert!(during.is_loading());
    assert_eq!(during.phase, Phase::Anonymous);
}

#[tokio::test]
async fn session_stays_loading_until_every_login_settles() {
    let gate = std::sync::Arc::new(Notify::new());
    let h = anonymous(
        FakeTransport::new()
            .respond(LOGIN_PATH, 200, auth_json("t1", 2, "alice", "Customer"))
            .gated(gate.clone()),
    )
    .await;
    let creds = credentials("alice", "pw");
    let observe = async {
        tokio::task::yield_now().await;
        let both = h.store.snapshot();
        gate.notify_one();
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        let one_left = h.store.snapshot();
        gate.notify_one();
        (both, one_left)
    };
    let (first, second, (both, one_left)) =
        tokio::join!(h.store.login(&creds, None), h.store.login(&creds, None), observe);

    assert_eq!(both.in_flight, 2);
    assert_eq!(one_left.in_flight, 1);
    assert!(one_left.is_loading());
    assert!(first.is_ok() ^ second.is_ok());
    assert!(
        matches!(first, Err(SessionError::Superseded(_))) || matches!(second, Err(SessionError::Superseded(_)))
    );
    let settled = h.store.snapshot();
    assert!(!settled.is_pending());
    assert!(settled.is_authenticated());
    assert_eq!(h.transport.calls_to(LOGIN_PATH), 2);
}

// =============================================================================
// Register
// =============================================================================

#[tokio::test]
async fn register_auto_authenticates_and_goes_to_dashboard() {
    let h = anonymous(FakeTransport::new().respond(REGISTER_PATH, 201, auth_json("t9", 9, "carol", "Customer"))).await;
    let registration = Registration {
        username: "carol".into(),
        password: "pw".into(),
        first_name: "Carol".into(),
        last_name: "D".into(),
    };
    let user = h.store.register(&registration).await.expect("register");
    assert_eq!(user.username, "carol");
    assert!(h.store.snapshot().is_authenticated());
    assert_eq!(h.persisted_token().as_deref(), Some("t9"));
    assert_eq!(h.navigator.last().as_deref(), Some(routes::DASHBOARD));
}

#[tokio::test]
async fn register_failure_propagates_and_keeps_state() {
    let h = anonymous(FakeTransport::new().respond(REGISTER_PATH, 409, json!({ "error": "Username taken" }))).await;
    let registration = Registration {
        username: "carol".into(),
        password: "pw".into(),
        first_name: "Carol".into(),
        last_name: "D".into(),
    };
    let err = h.store.register(&registration).await.expect_err("conflict");
    assert_eq!(err.user_message("Registration failed."), "Username taken");
    assert_eq!(h.store.snapshot().phase, Phase::Anonymous);
}

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn logout_clears_everything_and_redirects() {
    let h = anonymous(FakeTransport::new().respond(LOGIN_PATH, 200, auth_json("t1", 2, "alice", "Customer"))).await;
    h.store.login(&credentials("alice", "pw"), None).await.expect("login");
    h.store.logout();
    let session = h.store.snapshot();
    assert_eq!(session.phase, Phase::Anonymous);
    assert!(session.user.is_none() && session.token.is_none());
    assert_eq!(h.persisted_token(), None);
    assert_eq!(h.navigator.last().as_deref(), Some(routes::LOGIN));
}

#[tokio::test]
async fn logout_when_logged_out_is_harmless() {
    let h = anonymous(FakeTransport::new()).await;
    h.store.logout();
    h.store.logout();
    assert_eq!(h.store.snapshot().phase, Phase::Anonymous);
    assert_eq!(h.navigator.visited(), vec![routes::LOGIN.to_owned(), routes::LOGIN.to_owned()]);
}

#[tokio::test]
async fn login_after_logout_is_legal_again() {
    let h = anonymous(FakeTransport::new().respond(LOGIN_PATH, 200, auth_json("t1", 2, "alice", "Customer"))).await;
    h.store.login(&credentials("alice", "pw"), None).await.expect("first login");
    h.store.logout();
    h.store.login(&credentials("alice", "pw"), None).await.expect("second login");
    assert!(h.store.snapshot().is_authenticated());
}
