//! Integration tests for gantry-auth

use chrono::Utc;
use gantry_auth::*;
use gantry_core::HttpRequest;
use gantry_session::{MemoryHandler, Session, SessionConfig, StoreSession};
use serde_json::{Map, Value, json};
use std::sync::Arc;

fn identity(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

async fn started_session(handler: Arc<MemoryHandler>, lifetime: u64) -> StoreSession {
    let request = HttpRequest::new("GET".to_string(), "/".to_string());
    let config = SessionConfig::memory().with_cookie_lifetime(lifetime);
    let mut session = StoreSession::new(handler, config, &request);
    session.start().await.unwrap();
    session
}

#[tokio::test]
async fn test_fresh_session_is_guest_needing_login() {
    let mut session = started_session(Arc::new(MemoryHandler::new()), 1800).await;
    let auth = Auth::attach(&mut session).unwrap();

    assert!(auth.is_guest());
    assert!(auth.is_need_login());
}

#[tokio::test]
async fn test_login_authenticates_immediately() {
    let mut session = started_session(Arc::new(MemoryHandler::new()), 1800).await;
    let mut auth = Auth::attach(&mut session).unwrap();

    auth.login(identity(&[("user_id", json!(42))])).await.unwrap();

    assert!(!auth.is_guest());
    assert!(!auth.is_need_login());
    assert_eq!(auth.get("user_id"), Some(&json!(42)));
}

#[tokio::test]
async fn test_deadline_is_twenty_percent_early() {
    let mut session = started_session(Arc::new(MemoryHandler::new()), 1800).await;
    let mut auth = Auth::new(&mut session, DEFAULT_SESSION_KEY, Some(1000)).unwrap();

    let before = Utc::now().timestamp();
    auth.login(identity(&[("user_id", json!(42))])).await.unwrap();
    let after = Utc::now().timestamp();

    // 1000 * 20% = 200 early, under the 300s cap
    let deadline = auth.get(REGENERATE_AFTER).unwrap().as_i64().unwrap();
    assert!(deadline >= before + 800);
    assert!(deadline <= after + 800);
}

#[tokio::test]
async fn test_deadline_early_window_is_capped() {
    let mut session = started_session(Arc::new(MemoryHandler::new()), 1800).await;
    let mut auth = Auth::new(&mut session, DEFAULT_SESSION_KEY, Some(10000)).unwrap();

    let before = Utc::now().timestamp();
    auth.login(identity(&[("user_id", json!(42))])).await.unwrap();
    let after = Utc::now().timestamp();

    // 10000 * 20% = 2000, capped at 300 seconds early
    let deadline = auth.get(REGENERATE_AFTER).unwrap().as_i64().unwrap();
    assert!(deadline >= before + 9700);
    assert!(deadline <= after + 9700);
}

#[tokio::test]
async fn test_zero_lifetime_degrades_to_immediate_regenerate() {
    let mut session = started_session(Arc::new(MemoryHandler::new()), 1800).await;
    let mut auth = Auth::new(&mut session, DEFAULT_SESSION_KEY, Some(0)).unwrap();

    auth.login(identity(&[("user_id", json!(42))])).await.unwrap();

    assert!(!auth.is_guest());
    assert!(auth.is_need_login());
}

#[tokio::test]
async fn test_identity_survives_reconstruction_before_deadline() {
    let handler = Arc::new(MemoryHandler::new());
    let mut session = started_session(handler.clone(), 1800).await;

    {
        let mut auth = Auth::attach(&mut session).unwrap();
        assert!(auth.is_need_login());
        auth.login(identity(&[("id", json!(42))])).await.unwrap();
    }

    // a second wrapper over the same session data, before the deadline
    let auth = Auth::attach(&mut session).unwrap();
    assert!(!auth.is_guest());
    assert!(!auth.is_need_login());
    assert_eq!(auth.get("id"), Some(&json!(42)));
    assert!(auth.has(REGENERATE_AFTER));
}

#[tokio::test]
async fn test_expired_deadline_forces_relogin_and_rotation() {
    let mut session = started_session(Arc::new(MemoryHandler::new()), 1800).await;

    // plant an identity whose deadline has already passed
    let mut stored = Map::new();
    stored.insert("user_id".to_string(), json!(42));
    stored.insert(
        REGENERATE_AFTER.to_string(),
        json!(Utc::now().timestamp() - 10),
    );
    session
        .set(DEFAULT_SESSION_KEY, Value::Object(stored))
        .unwrap();
    let stale_id = session.id().unwrap();

    let mut auth = Auth::attach(&mut session).unwrap();
    assert!(!auth.is_guest());
    assert!(auth.is_need_login());

    // logging in again rotates the session identifier (fixation defense)
    auth.login(identity(&[("user_id", json!(42))])).await.unwrap();
    assert!(!auth.is_need_login());
    assert_ne!(session.id().unwrap(), stale_id);
}

#[tokio::test]
async fn test_missing_deadline_counts_as_expired() {
    let mut session = started_session(Arc::new(MemoryHandler::new()), 1800).await;

    let mut stored = Map::new();
    stored.insert("user_id".to_string(), json!(42));
    session
        .set(DEFAULT_SESSION_KEY, Value::Object(stored))
        .unwrap();

    let auth = Auth::attach(&mut session).unwrap();
    assert!(!auth.is_guest());
    assert!(auth.is_need_login());
}

#[tokio::test]
async fn test_logout_destroying_session() {
    let handler = Arc::new(MemoryHandler::new());
    let mut session = started_session(handler.clone(), 1800).await;
    let mut auth = Auth::attach(&mut session).unwrap();
    auth.login(identity(&[("user_id", json!(42))])).await.unwrap();

    auth.logout(true).await.unwrap();
    assert!(auth.is_guest());
    assert!(!session.is_started());
}

#[tokio::test]
async fn test_logout_keeping_session_preserves_other_keys() {
    let mut session = started_session(Arc::new(MemoryHandler::new()), 1800).await;
    session.set("theme", json!("dark")).unwrap();

    let mut auth = Auth::attach(&mut session).unwrap();
    auth.login(identity(&[("user_id", json!(42))])).await.unwrap();
    auth.logout(false).await.unwrap();

    assert!(auth.is_guest());
    assert_eq!(session.get("theme").unwrap(), Some(json!("dark")));
    assert_eq!(
        session.get(DEFAULT_SESSION_KEY).unwrap(),
        Some(Value::Bool(false))
    );

    // the explicit logged-out marker reads as guest, not as an identity
    let auth = Auth::attach(&mut session).unwrap();
    assert!(auth.is_guest());
}

#[tokio::test]
async fn test_set_only_touches_known_fields() {
    let mut session = started_session(Arc::new(MemoryHandler::new()), 1800).await;
    let mut auth = Auth::attach(&mut session).unwrap();
    auth.login(identity(&[("name", json!("alice"))])).await.unwrap();

    auth.set("name", json!("bob"));
    auth.set("role", json!("admin")); // unknown field: no-op

    assert_eq!(auth.get("name"), Some(&json!("bob")));
    assert!(!auth.has("role"));
}

#[tokio::test]
async fn test_unset_removes_field() {
    let mut session = started_session(Arc::new(MemoryHandler::new()), 1800).await;
    let mut auth = Auth::attach(&mut session).unwrap();
    auth.login(identity(&[("name", json!("alice"))])).await.unwrap();

    assert_eq!(auth.unset("name"), Some(json!("alice")));
    assert!(!auth.has("name"));
}

#[tokio::test]
async fn test_identity_returns_a_copy() {
    let mut session = started_session(Arc::new(MemoryHandler::new()), 1800).await;
    let mut auth = Auth::attach(&mut session).unwrap();
    auth.login(identity(&[("name", json!("alice"))])).await.unwrap();

    let mut copy = auth.identity();
    copy.insert("role".to_string(), json!("admin"));

    assert!(!auth.has("role"));
}

#[tokio::test]
async fn test_lifetime_override_beats_session_default() {
    // session configured for a long lifetime, override forces immediate expiry
    let mut session = started_session(Arc::new(MemoryHandler::new()), 86400).await;
    let mut auth = Auth::new(&mut session, DEFAULT_SESSION_KEY, Some(0)).unwrap();
    auth.login(identity(&[("user_id", json!(1))])).await.unwrap();

    assert!(auth.is_need_login());
}
