//! Integration tests for logout and session management.

use axum::http::StatusCode;

use crate::helpers::TestApp;

async fn app_with_owner() -> TestApp {
    let app = TestApp::new();
    app.create_owner(1, "alice@example.com", "password123").await;
    app
}

async fn login_as(app: &TestApp, user_agent: &str) -> crate::helpers::TokenPair {
    let response = app
        .request_with_headers(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "alice@example.com",
                "password": "password123",
            })),
            None,
            &[("User-Agent", user_agent), ("X-Forwarded-For", "203.0.113.9, 10.0.0.1")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    response.token_pair()
}

#[tokio::test]
async fn test_logout_revokes_access_token() {
    let app = app_with_owner().await;
    let pair = app.login("alice@example.com", "password123").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&pair.access_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["revoked"], 1);

    app.request("GET", "/api/auth/profile", None, Some(&pair.access_token))
        .await
        .assert_not_authorized();

    // Without a body, the refresh token of the session stays usable.
    assert_eq!(app.refresh(&pair.refresh_token).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_with_refresh_token_revokes_both() {
    let app = app_with_owner().await;
    let pair = app.login("alice@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(serde_json::json!({ "refresh_token": pair.refresh_token })),
            Some(&pair.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["revoked"], 2);

    app.refresh(&pair.refresh_token).await.assert_not_authorized();
}

#[tokio::test]
async fn test_logout_ignores_foreign_refresh_token() {
    let app = app_with_owner().await;
    app.create_owner(2, "bob@example.com", "hunter22").await;
    let alice = app.login("alice@example.com", "password123").await;
    let bob = app.login("bob@example.com", "hunter22").await;

    let response = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(serde_json::json!({ "refresh_token": bob.refresh_token })),
            Some(&alice.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["revoked"], 1);

    assert_eq!(app.refresh(&bob.refresh_token).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_revoke_session_is_idempotent() {
    let app = app_with_owner().await;
    let first = app.login("alice@example.com", "password123").await;
    let second = app.login("alice@example.com", "password123").await;
    let path = format!("/api/auth/sessions/{}", second.session_id);

    let response = app
        .request("DELETE", &path, None, Some(&first.access_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["revoked"], 1);

    let again = app
        .request("DELETE", &path, None, Some(&first.access_token))
        .await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.data()["revoked"], 0);

    app.request("GET", "/api/auth/profile", None, Some(&second.access_token))
        .await
        .assert_not_authorized();
}

#[tokio::test]
async fn test_revoke_foreign_session_is_noop() {
    let app = app_with_owner().await;
    app.create_owner(2, "bob@example.com", "hunter22").await;
    let alice = app.login("alice@example.com", "password123").await;
    let bob = app.login("bob@example.com", "hunter22").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/auth/sessions/{}", alice.session_id),
            None,
            Some(&bob.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["revoked"], 0);

    let profile = app
        .request("GET", "/api/auth/profile", None, Some(&alice.access_token))
        .await;
    assert_eq!(profile.status, StatusCode::OK);
}

#[tokio::test]
async fn test_revoke_session_rejects_malformed_id() {
    let app = app_with_owner().await;
    let pair = app.login("alice@example.com", "password123").await;

    let response = app
        .request(
            "DELETE",
            "/api/auth/sessions/not-a-uuid",
            None,
            Some(&pair.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_sessions_newest_first() {
    let app = app_with_owner().await;
    let first = login_as(&app, "Laptop/1.0").await;
    let second = login_as(&app, "Phone/2.0").await;

    let response = app
        .request("GET", "/api/auth/sessions", None, Some(&first.access_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let sessions = response.data().as_array().expect("array");
    assert_eq!(sessions.len(), 2);

    assert_eq!(sessions[0]["session_id"], second.session_id.to_string());
    assert_eq!(sessions[0]["device"], "Phone/2.0");
    assert_eq!(sessions[0]["current"], false);

    assert_eq!(sessions[1]["session_id"], first.session_id.to_string());
    assert_eq!(sessions[1]["device"], "Laptop/1.0");
    assert_eq!(sessions[1]["origin_address"], "203.0.113.9");
    assert_eq!(sessions[1]["current"], true);
}

#[tokio::test]
async fn test_list_sessions_hides_revoked_sessions() {
    let app = app_with_owner().await;
    let first = app.login("alice@example.com", "password123").await;
    let second = app.login("alice@example.com", "password123").await;

    app.request("POST", "/api/auth/logout", None, Some(&second.access_token))
        .await;

    let response = app
        .request("GET", "/api/auth/sessions", None, Some(&first.access_token))
        .await;
    let sessions = response.data().as_array().expect("array");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["session_id"], first.session_id.to_string());
}

#[tokio::test]
async fn test_sessions_without_provenance_use_placeholders() {
    let app = app_with_owner().await;
    let pair = app.login("alice@example.com", "password123").await;

    let response = app
        .request("GET", "/api/auth/sessions", None, Some(&pair.access_token))
        .await;
    let sessions = response.data().as_array().expect("array");
    assert_eq!(sessions[0]["device"], "Unknown device");
    assert_eq!(sessions[0]["origin_address"], "Unknown");
}

#[tokio::test]
async fn test_rotation_carries_provenance() {
    let app = app_with_owner().await;
    let first = login_as(&app, "Laptop/1.0").await;

    let rotated = app.refresh(&first.refresh_token).await.token_pair();

    let response = app
        .request("GET", "/api/auth/sessions", None, Some(&rotated.access_token))
        .await;
    let sessions = response.data().as_array().expect("array");
    let current = sessions
        .iter()
        .find(|s| s["current"] == true)
        .expect("current session");

    assert_eq!(current["session_id"], rotated.session_id.to_string());
    assert_eq!(current["device"], "Laptop/1.0");
    assert_eq!(current["origin_address"], "203.0.113.9");
}

#[tokio::test]
async fn test_logout_all_leaves_other_owners_untouched() {
    let app = app_with_owner().await;
    app.create_owner(2, "bob@example.com", "hunter22").await;
    let alice_a = app.login("alice@example.com", "password123").await;
    let alice_b = app.login("alice@example.com", "password123").await;
    let bob = app.login("bob@example.com", "hunter22").await;

    let response = app
        .request("POST", "/api/auth/logout-all", None, Some(&alice_a.access_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["revoked"], 4);

    for token in [&alice_a.access_token, &alice_b.access_token] {
        app.request("GET", "/api/auth/profile", None, Some(token))
            .await
            .assert_not_authorized();
    }
    app.refresh(&alice_b.refresh_token).await.assert_not_authorized();

    let profile = app
        .request("GET", "/api/auth/profile", None, Some(&bob.access_token))
        .await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.data()["id"], 2);
}
