use resepi_land::auth::AuthEvent;
use resepi_land::error::Error;
use resepi_land::ResepiClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_body(access_token: &str) -> serde_json::Value {
    json!({
        "access_token": access_token,
        "refresh_token": "refresh-1",
        "token_type": "bearer",
        "expires_in": 3600,
        "user": {
            "id": "user-1",
            "email": "anna@example.com",
            "user_metadata": { "name": "Anna" }
        }
    })
}

#[tokio::test]
async fn sign_up_sends_display_name_and_stores_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(body_partial_json(json!({
            "email": "anna@example.com",
            "data": { "name": "Anna" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("token-1")))
        .mount(&server)
        .await;

    let client = ResepiClient::new(&server.uri(), "anon-key");
    let session = client.auth().sign_up("anna@example.com", "password123", "Anna").await.unwrap();

    assert_eq!(session.access_token, "token-1");
    assert_eq!(session.user.display_name(), Some("Anna"));

    let stored = client.auth().get_session().unwrap();
    assert_eq!(stored.user.id, "user-1");
    assert!(stored.expires_at.is_some());
}

#[tokio::test]
async fn sign_in_stores_session_and_notifies_subscribers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("token-1")))
        .mount(&server)
        .await;

    let client = ResepiClient::new(&server.uri(), "anon-key");
    let mut changes = client.auth().on_state_change();

    client.auth().sign_in("anna@example.com", "password123").await.unwrap();

    let change = changes.recv().await.unwrap();
    assert_eq!(change.event, AuthEvent::SignedIn);
    assert_eq!(change.session.unwrap().user.email.as_deref(), Some("anna@example.com"));
    assert_eq!(client.auth().current_user().unwrap().id, "user-1");
}

#[tokio::test]
async fn sign_in_failure_surfaces_provider_message_and_leaves_state() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let client = ResepiClient::new(&server.uri(), "anon-key");
    let result = client.auth().sign_in("anna@example.com", "wrong").await;

    match result {
        Err(Error::Auth(msg)) => assert_eq!(msg, "Invalid login credentials"),
        other => panic!("expected auth error, got {:?}", other.map(|s| s.access_token)),
    }
    assert!(client.auth().get_session().is_none());
}

#[tokio::test]
async fn sign_out_clears_session_and_notifies() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("token-1")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = ResepiClient::new(&server.uri(), "anon-key");
    client.auth().sign_in("anna@example.com", "password123").await.unwrap();

    let mut changes = client.auth().on_state_change();
    client.auth().sign_out().await.unwrap();

    let change = changes.recv().await.unwrap();
    assert_eq!(change.event, AuthEvent::SignedOut);
    assert!(change.session.is_none());
    assert!(client.auth().get_session().is_none());
}

#[tokio::test]
async fn sign_out_without_session_is_an_error() {
    let server = MockServer::start().await;
    let client = ResepiClient::new(&server.uri(), "anon-key");

    assert!(matches!(client.auth().sign_out().await, Err(Error::Auth(_))));
}

#[tokio::test]
async fn refresh_session_swaps_tokens_and_notifies() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("token-1")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(body_partial_json(json!({ "refresh_token": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("token-2")))
        .mount(&server)
        .await;

    let client = ResepiClient::new(&server.uri(), "anon-key");
    client.auth().sign_in("anna@example.com", "password123").await.unwrap();

    let mut changes = client.auth().on_state_change();
    let refreshed = client.auth().refresh_session().await.unwrap();

    assert_eq!(refreshed.access_token, "token-2");
    assert_eq!(changes.recv().await.unwrap().event, AuthEvent::TokenRefreshed);
}
