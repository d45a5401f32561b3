mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!",
            "role": "user"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());
    // Registration confirms; it never hands out a token.
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username_keeps_original() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({ "username": "nicola", "password": "original!" }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/register")
        .json(&json!({ "username": "nicola", "password": "someone_else" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());
    assert!(body["error"].as_str().unwrap().contains("already taken"));

    // The first record is untouched: its password still logs in.
    let login = app
        .post("/api/auth/login")
        .json(&json!({ "username": "nicola", "password": "original!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(login.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::spawn().await;

    for body in [
        json!({ "password": "pass_word!" }),
        json!({ "username": "nicola" }),
        json!({ "username": "", "password": "pass_word!" }),
        json!({ "username": "nicola", "password": "" }),
    ] {
        let response = app
            .post("/api/auth/register")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let parsed: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert!(parsed["message"].is_string());
        assert!(parsed["error"].is_string());
    }
}

#[tokio::test]
async fn test_register_unknown_role() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!",
            "role": "superuser"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("role"));
}

#[tokio::test]
async fn test_login_returns_token_with_user_claims() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!",
            "role": "admin"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "username": "nicola", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().expect("token missing");

    // The subject must match the id the read endpoints report.
    let users: serde_json::Value = app
        .get("/api/auth/users")
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let user_id = users[0]["id"].as_str().unwrap();

    let claims = app.tokens.verify(token).expect("token must verify");
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.role, "admin");
    assert_eq!(claims.exp - claims.iat, credentials::TOKEN_TTL_SECS);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({ "username": "nicola", "password": "Correct_Password!" }))
        .send()
        .await
        .expect("Failed to execute request");

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({ "username": "nicola", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");

    let unknown_user = app
        .post("/api/auth/login")
        .json(&json!({ "username": "nobody", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    // Byte-identical bodies: no username enumeration.
    let wrong_body: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_body: serde_json::Value = unknown_user.json().await.unwrap();
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_list_users_excludes_password_hash() {
    let app = TestApp::spawn().await;

    for (username, role) in [("nicola", "user"), ("alice", "admin")] {
        app.post("/api/auth/register")
            .json(&json!({ "username": username, "password": "pass_word!", "role": role }))
            .send()
            .await
            .expect("Failed to execute request");
    }

    let response = app
        .get("/api/auth/users")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let users = body.as_array().expect("expected a JSON array");
    assert_eq!(users.len(), 2);

    for user in users {
        let keys: Vec<&str> = user.as_object().unwrap().keys().map(String::as_str).collect();
        assert!(keys.contains(&"id"));
        assert!(keys.contains(&"username"));
        assert!(keys.contains(&"role"));
        assert!(keys.contains(&"created_at"));
        assert!(user.get("password_hash").is_none());
        assert!(user.get("password").is_none());
    }
}

#[tokio::test]
async fn test_get_user_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/auth/users/a1f5c6d0-0000-4000-8000-000000000000")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_get_user_malformed_id() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/auth/users/not-a-uuid")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().unwrap().contains("user id"));
}

#[tokio::test]
async fn test_end_to_end_flow() {
    let app = TestApp::spawn().await;

    // Register alice as admin.
    let register = app
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "password": "secret1",
            "role": "admin"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(register.status(), StatusCode::CREATED);

    // Login with the right password.
    let login = app
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "secret1" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(login.status(), StatusCode::OK);
    let login_body: serde_json::Value = login.json().await.unwrap();
    assert!(login_body["token"].is_string());

    // Login with the wrong password.
    let bad_login = app
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(bad_login.status(), StatusCode::UNAUTHORIZED);

    // Fetch alice by id.
    let claims = app
        .tokens
        .verify(login_body["token"].as_str().unwrap())
        .unwrap();
    let fetched = app
        .get(&format!("/api/auth/users/{}", claims.sub))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(fetched.status(), StatusCode::OK);

    let user: serde_json::Value = fetched.json().await.unwrap();
    assert_eq!(user["username"], "alice");
    assert_eq!(user["role"], "admin");
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn test_concurrent_duplicate_registration() {
    let app = TestApp::spawn().await;

    let body = json!({ "username": "nicola", "password": "pass_word!" });

    let first = app.post("/api/auth/register").json(&body).send();
    let second = app.post("/api/auth/register").json(&body).send();

    let (first, second) = tokio::join!(first, second);
    let mut statuses = vec![
        first.expect("Failed to execute request").status(),
        second.expect("Failed to execute request").status(),
    ];
    statuses.sort();

    // Exactly one create wins; the unique check never silently overwrites.
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::BAD_REQUEST]);
}
