use super::*;

#[test]
fn default_is_loading() {
    let state = LoadState::<u32>::default();
    assert!(state.is_loading());
    assert_eq!(state.ready(), None);
    assert_eq!(state.error(), None);
}

#[test]
fn from_result_ok_is_ready() {
    let state = LoadState::from_result(Ok(5_u32), "unused");
    assert_eq!(state.ready(), Some(&5));
    assert!(!state.is_loading());
}

#[test]
fn from_result_prefers_backend_message() {
    let err = ApiError::Status { status: 500, body: r#"{"message":"Database down"}"#.to_owned() };
    let state = LoadState::<u32>::from_result(Err(err), "Failed to load dashboard data.");
    assert_eq!(state.error(), Some("Database down"));
}

#[test]
fn from_result_falls_back_for_network_errors() {
    let err = ApiError::Transport("offline".to_owned());
    let state = LoadState::<u32>::from_result(Err(err), "Failed to load transaction history.");
    assert_eq!(state, LoadState::Failed("Failed to load transaction history.".to_owned()));
}
