use std::sync::Arc;

use resepi_land::models::ShoppingItemDraft;
use resepi_land::session::ProfileState;
use resepi_land::ResepiClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn saved_row(id: &str, recipe_id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": "user-1",
        "recipe_id": recipe_id,
        "creator_id": "chefanna",
        "created_at": "2024-01-01T00:00:00Z"
    })
}

fn list_row(id: &str, recipe_id: &str, ingredient: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": "user-1",
        "recipe_id": recipe_id,
        "recipe_name": "Nasi Lemak",
        "creator_name": "Chef Anna",
        "ingredient": ingredient,
        "created_at": "2024-01-01T00:00:00Z",
        "recipe": { "id": recipe_id, "creator_id": "chefanna" }
    })
}

fn draft(recipe_id: &str, ingredient: &str) -> ShoppingItemDraft {
    ShoppingItemDraft {
        recipe_id: recipe_id.to_string(),
        recipe_name: "Nasi Lemak".to_string(),
        creator_name: Some("Chef Anna".to_string()),
        ingredient: ingredient.to_string(),
    }
}

async fn mount_sign_in(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-1",
            "refresh_token": "refresh-1",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": { "id": "user-1", "email": "anna@example.com" }
        })))
        .mount(server)
        .await;
}

async fn mount_user_data(server: &MockServer, saved: serde_json::Value, list: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/saved_recipes"))
        .and(query_param("user_id", "eq.user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(saved))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/shopping_list"))
        .and(query_param("user_id", "eq.user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_loads_saved_recipes_and_shopping_list() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    mount_user_data(
        &server,
        json!([saved_row("s1", "r1")]),
        json!([list_row("i1", "r1", "rice")]),
    )
    .await;

    let profile = ProfileState::new(Arc::new(ResepiClient::new(&server.uri(), "anon-key")));
    profile.login("anna@example.com", "password123").await.unwrap();

    assert_eq!(profile.user().unwrap().id, "user-1");
    assert!(profile.is_recipe_saved("r1"));
    assert!(!profile.is_recipe_saved("r2"));
    assert!(profile.is_in_shopping_list("r1", "rice"));
    assert!(!profile.is_in_shopping_list("r1", "salt"));
}

#[tokio::test]
async fn failed_login_leaves_state_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let profile = ProfileState::new(Arc::new(ResepiClient::new(&server.uri(), "anon-key")));
    assert!(profile.login("anna@example.com", "wrong").await.is_err());
    assert!(profile.user().is_none());
    assert!(profile.saved_recipes().is_empty());
}

#[tokio::test]
async fn logout_always_clears_user_scoped_state() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    mount_user_data(
        &server,
        json!([saved_row("s1", "r1")]),
        json!([list_row("i1", "r1", "rice")]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let profile = ProfileState::new(Arc::new(ResepiClient::new(&server.uri(), "anon-key")));
    profile.login("anna@example.com", "password123").await.unwrap();
    assert!(profile.is_recipe_saved("r1"));

    profile.logout().await.unwrap();

    assert!(profile.user().is_none());
    assert!(profile.saved_recipes().is_empty());
    assert!(profile.shopping_list().is_empty());
}

#[tokio::test]
async fn save_then_unsave_round_trips_locally() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    mount_user_data(&server, json!([]), json!([])).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/saved_recipes"))
        .and(body_partial_json(json!({ "user_id": "user-1", "recipe_id": "r1" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([saved_row("s1", "r1")])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/saved_recipes"))
        .and(query_param("user_id", "eq.user-1"))
        .and(query_param("recipe_id", "eq.r1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let profile = ProfileState::new(Arc::new(ResepiClient::new(&server.uri(), "anon-key")));
    profile.login("anna@example.com", "password123").await.unwrap();

    profile.save_recipe("r1", "chefanna").await.unwrap();
    assert!(profile.is_recipe_saved("r1"));

    profile.unsave_recipe("r1").await.unwrap();
    assert!(!profile.is_recipe_saved("r1"));

    // Unsaving a recipe that is not saved: the backend delete matches no
    // rows and the call is a no-op for the caller too.
    profile.unsave_recipe("r1").await.unwrap();
    assert!(profile.saved_recipes().is_empty());
}

#[tokio::test]
async fn failed_write_leaves_local_state_untouched() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    mount_user_data(&server, json!([]), json!([])).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/saved_recipes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let profile = ProfileState::new(Arc::new(ResepiClient::new(&server.uri(), "anon-key")));
    profile.login("anna@example.com", "password123").await.unwrap();

    assert!(profile.save_recipe("r1", "chefanna").await.is_err());
    assert!(!profile.is_recipe_saved("r1"));
}

#[tokio::test]
async fn toggling_adds_then_removes_an_ingredient() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    mount_user_data(&server, json!([]), json!([])).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/shopping_list"))
        .and(body_partial_json(json!({ "recipe_id": "r1", "ingredient": "rice" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([list_row("i1", "r1", "rice")])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/shopping_list"))
        .and(query_param("id", "eq.i1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let profile = ProfileState::new(Arc::new(ResepiClient::new(&server.uri(), "anon-key")));
    profile.login("anna@example.com", "password123").await.unwrap();

    profile.toggle_shopping_item(draft("r1", "rice")).await.unwrap();
    assert!(profile.is_in_shopping_list("r1", "rice"));

    profile.toggle_shopping_item(draft("r1", "rice")).await.unwrap();
    assert!(!profile.is_in_shopping_list("r1", "rice"));
}

#[tokio::test]
async fn bulk_add_resynchronizes_and_bulk_remove_clears() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/saved_recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    // The login-time load sees an empty list; after the bulk insert the
    // resynchronization learns the server-assigned ids.
    Mock::given(method("GET"))
        .and(path("/rest/v1/shopping_list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/shopping_list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            list_row("i1", "r1", "A"),
            list_row("i2", "r1", "B")
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/shopping_list"))
        .and(body_partial_json(json!([
            { "recipe_id": "r1", "ingredient": "A" },
            { "recipe_id": "r1", "ingredient": "B" }
        ])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/shopping_list"))
        .and(query_param("user_id", "eq.user-1"))
        .and(query_param("recipe_id", "eq.r1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let profile = ProfileState::new(Arc::new(ResepiClient::new(&server.uri(), "anon-key")));
    profile.login("anna@example.com", "password123").await.unwrap();
    assert!(profile.shopping_list().is_empty());

    profile
        .add_many_to_shopping_list(vec![draft("r1", "A"), draft("r1", "B")])
        .await
        .unwrap();
    assert!(profile.is_in_shopping_list("r1", "A"));
    assert!(profile.is_in_shopping_list("r1", "B"));

    profile.remove_many_from_shopping_list("r1").await.unwrap();
    assert!(!profile.is_in_shopping_list("r1", "A"));
    assert!(!profile.is_in_shopping_list("r1", "B"));
}

#[tokio::test]
async fn mutations_without_a_login_are_no_ops() {
    let server = MockServer::start().await;
    let profile = ProfileState::new(Arc::new(ResepiClient::new(&server.uri(), "anon-key")));

    profile.save_recipe("r1", "chefanna").await.unwrap();
    profile.add_to_shopping_list(draft("r1", "rice")).await.unwrap();
    profile.remove_many_from_shopping_list("r1").await.unwrap();

    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(profile.saved_recipes().is_empty());
}

#[tokio::test]
async fn auth_change_subscription_drives_the_container() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    mount_user_data(&server, json!([saved_row("s1", "r1")]), json!([])).await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = Arc::new(ResepiClient::new(&server.uri(), "anon-key"));
    let profile = ProfileState::new(client.clone());
    let mut changes = client.auth().on_state_change();

    // Drive the container purely from the provider's notifications.
    client.auth().sign_in("anna@example.com", "password123").await.unwrap();
    profile.apply_auth_change(changes.recv().await.unwrap()).await;
    assert_eq!(profile.user().unwrap().id, "user-1");
    assert!(profile.is_recipe_saved("r1"));

    client.auth().sign_out().await.unwrap();
    profile.apply_auth_change(changes.recv().await.unwrap()).await;
    assert!(profile.user().is_none());
    assert!(profile.saved_recipes().is_empty());
}

#[tokio::test]
async fn admin_gating_compares_the_session_email() {
    let server = MockServer::start().await;
    mount_sign_in(&server).await;
    mount_user_data(&server, json!([]), json!([])).await;

    let admin_client =
        ResepiClient::new(&server.uri(), "anon-key").with_admin_email("anna@example.com");
    let profile = ProfileState::new(Arc::new(admin_client));
    assert!(!profile.is_admin());
    profile.login("anna@example.com", "password123").await.unwrap();
    assert!(profile.is_admin());

    let other_client =
        ResepiClient::new(&server.uri(), "anon-key").with_admin_email("boss@example.com");
    let profile = ProfileState::new(Arc::new(other_client));
    profile.login("anna@example.com", "password123").await.unwrap();
    assert!(!profile.is_admin());
}
