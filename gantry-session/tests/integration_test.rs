//! Integration tests for gantry-session

use gantry_core::{HttpRequest, HttpResponse};
use gantry_session::*;
use serde_json::json;

fn request() -> HttpRequest {
    HttpRequest::new("GET".to_string(), "/".to_string())
}

/// Run one request: load the session, mutate it, finalize the response,
/// and hand back the cookie the client would carry next time.
async fn round_trip(
    factory: &SessionFactory,
    request: HttpRequest,
    mutate: impl FnOnce(&mut StoreSession),
) -> (String, HttpResponse) {
    let mut session = factory.create(&request).await.unwrap();
    session.start().await.unwrap();
    mutate(&mut session);

    let mut response = HttpResponse::ok();
    session.set_cookie(&mut response).await.unwrap();
    (session.id().unwrap(), response)
}

#[tokio::test]
async fn test_session_survives_across_requests() {
    let factory = SessionFactory::new(SessionConfig::memory()).await.unwrap();

    let (id, response) = round_trip(&factory, request(), |session| {
        session.set("user", json!("alice")).unwrap();
        session.set("visits", json!(1)).unwrap();
    })
    .await;

    let cookie = response.headers.get("Set-Cookie").unwrap();
    assert!(cookie.starts_with(&format!("session_id={}", id)));

    // second request carries the cookie back
    let carried = request().with_cookie("session_id", &id);
    let mut session = factory.create(&carried).await.unwrap();
    session.start().await.unwrap();

    assert_eq!(session.get("user").unwrap(), Some(json!("alice")));
    assert_eq!(session.get("visits").unwrap(), Some(json!(1)));
}

#[tokio::test]
async fn test_file_backend_survives_across_requests() {
    let dir = tempfile::tempdir().unwrap();
    let config = SessionConfig::file(dir.path()).unwrap();
    let factory = SessionFactory::new(config).await.unwrap();

    let (id, _) = round_trip(&factory, request(), |session| {
        session.set("cart", json!(["book", "pen"])).unwrap();
    })
    .await;

    let carried = request().with_cookie("session_id", &id);
    let mut session = factory.create(&carried).await.unwrap();
    session.start().await.unwrap();

    assert_eq!(session.get("cart").unwrap(), Some(json!(["book", "pen"])));
}

#[tokio::test]
async fn test_forged_cookie_starts_a_fresh_session() {
    let factory = SessionFactory::new(SessionConfig::memory()).await.unwrap();

    let forged = request().with_cookie("session_id", "sid'; DROP TABLE--");
    let mut session = factory.create(&forged).await.unwrap();
    session.start().await.unwrap();

    assert!(!session.has("anything").unwrap());
    let minted = session.id().unwrap();
    assert!(validate_session_id(&minted));
}

#[tokio::test]
async fn test_unknown_but_valid_cookie_keeps_identifier() {
    let factory = SessionFactory::new(SessionConfig::memory()).await.unwrap();

    // valid shape, no record behind it: session starts empty but keeps the id
    let carried = request().with_cookie("session_id", "deadbeef01");
    let mut session = factory.create(&carried).await.unwrap();
    session.start().await.unwrap();

    assert!(!session.has("anything").unwrap());
    assert_eq!(session.id().unwrap(), "deadbeef01");
}

#[tokio::test]
async fn test_destroyed_session_clears_client_cookie() {
    let factory = SessionFactory::new(SessionConfig::memory()).await.unwrap();

    let (id, _) = round_trip(&factory, request(), |session| {
        session.set("user", json!("alice")).unwrap();
    })
    .await;

    let carried = request().with_cookie("session_id", &id);
    let mut session = factory.create(&carried).await.unwrap();
    session.start().await.unwrap();
    session.destroy(true).await.unwrap();

    // simulate a response that still carries the live cookie
    let mut response = HttpResponse::ok().with_header(
        "Set-Cookie".to_string(),
        format!("session_id={}; Path=/", id),
    );
    session.set_cookie(&mut response).await.unwrap();

    let header = response.headers.get("Set-Cookie").unwrap();
    assert!(header.contains("Max-Age=0"));
    assert!(factory.handler().read(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_regeneration_invalidates_old_cookie() {
    let factory = SessionFactory::new(SessionConfig::memory()).await.unwrap();

    let (old_id, _) = round_trip(&factory, request(), |session| {
        session.set("user", json!("alice")).unwrap();
    })
    .await;

    let carried = request().with_cookie("session_id", &old_id);
    let mut session = factory.create(&carried).await.unwrap();
    session.start().await.unwrap();
    session.regenerate_id(true).await.unwrap();
    session.set("user", json!("alice")).unwrap();

    let mut response = HttpResponse::ok();
    session.set_cookie(&mut response).await.unwrap();
    let new_id = session.id().unwrap();
    assert_ne!(new_id, old_id);

    // the old identifier no longer resolves to a record
    let replayed = request().with_cookie("session_id", &old_id);
    let mut replay = factory.create(&replayed).await.unwrap();
    replay.start().await.unwrap();
    assert!(!replay.has("user").unwrap());
}
