mod common;

use std::sync::Arc;

use auth::Authenticator;
use auth::ManualClock;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use common::JWT_SECRET;
use reqwest::header;
use reqwest::StatusCode;
use serde_json::json;

const PERMISSION_DENIED: &str = r#"{"status_code":403,"data":{"message":"permission denied"}}"#;

async fn create_transaction(
    app: &TestApp,
    username: &str,
    category: &str,
    name: &str,
    value: i64,
) -> serde_json::Value {
    let response = app
        .post(&format!("/transaction/{}", category))
        .json(&json!({
            "username": username,
            "name": name,
            "value": value,
            "currency": "eur"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "secret1").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Missing session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("jwtToken="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Expires="));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["username"], "alice");

    let token = body["data"]["token"].as_str().unwrap();
    assert!(set_cookie.starts_with(&format!("jwtToken={};", token)));

    let claims = app.authenticator.validate_token(token).unwrap();
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.exp - claims.iat, Duration::hours(24).num_seconds());
}

#[tokio::test]
async fn test_register_invalid_username() {
    let app = TestApp::spawn().await;

    for username in ["", "has space", "a".repeat(51).as_str()] {
        let response = app.register(username, "secret1").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{username:?}");
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}

#[tokio::test]
async fn test_register_empty_password() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("password"));
}

#[tokio::test]
async fn test_register_duplicate_username_keeps_first_credential() {
    let app = TestApp::spawn().await;

    app.register("alice", "secret1").await;
    let response = app.register("alice", "secret2").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "username already exists: alice");

    let first = app
        .post("/login")
        .json(&json!({ "username": "alice", "password": "secret1" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .post("/login")
        .json(&json!({ "username": "alice", "password": "secret2" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(second.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_success_opens_session() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret1").await;

    // A fresh client holds no cookie until it logs in.
    let client = TestApp::client();

    let before = client
        .get(app.url("/transaction"))
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(before.status(), StatusCode::FORBIDDEN);

    let response = client
        .post(app.url("/login"))
        .json(&json!({ "username": "alice", "password": "secret1" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "alice");
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());

    let after = client
        .get(app.url("/transaction"))
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(after.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret1").await;

    let mut bodies = Vec::new();
    for (username, password) in [("alice", "wrong"), ("mallory", "secret1"), ("not valid!", "x")] {
        let response = TestApp::client()
            .post(app.url("/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        bodies.push(response.text().await.unwrap());
    }

    assert_eq!(
        bodies[0],
        r#"{"status_code":401,"data":{"message":"invalid credentials"}}"#
    );
    assert!(bodies.iter().all(|body| body == &bodies[0]));
}

#[tokio::test]
async fn test_protected_read_as_owner() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret1").await;

    let response = app
        .get("/transaction")
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_asserting_other_identity_is_denied() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret1").await;

    let response = app
        .get("/transaction")
        .json(&json!({ "username": "bob" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(response.text().await.unwrap(), PERMISSION_DENIED);
}

#[tokio::test]
async fn test_missing_cookie_is_denied() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret1").await;

    let response = TestApp::client()
        .get(app.url("/transaction"))
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(response.text().await.unwrap(), PERMISSION_DENIED);
}

#[tokio::test]
async fn test_expired_token_is_denied() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret1").await;

    // Signed with the server's secret, but issued two days ago.
    let two_days_ago = Arc::new(ManualClock::new(Utc::now() - Duration::hours(48)));
    let expired = Authenticator::with_clock(JWT_SECRET, Duration::hours(24), two_days_ago)
        .unwrap()
        .issue_token("alice")
        .unwrap();
    assert!(expired.claims.exp < Utc::now().timestamp());

    let response = reqwest::Client::new()
        .get(app.url("/transaction"))
        .header(header::COOKIE, format!("jwtToken={}", expired.access_token))
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(response.text().await.unwrap(), PERMISSION_DENIED);
}

#[tokio::test]
async fn test_all_denials_are_identical() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret1").await;

    let forged = Authenticator::new(b"some-other-secret-key-of-32-bytes-or-more", Duration::hours(24))
        .unwrap()
        .issue_token("alice")
        .unwrap()
        .access_token;
    let epoch = Arc::new(ManualClock::new(
        DateTime::<Utc>::from_timestamp(1_600_000_000, 0).unwrap(),
    ));
    let expired = Authenticator::with_clock(JWT_SECRET, Duration::hours(24), epoch)
        .unwrap()
        .issue_token("alice")
        .unwrap()
        .access_token;

    let bare = reqwest::Client::new();
    let requests = vec![
        app.get("/transaction").json(&json!({ "username": "bob" })),
        app.get("/transaction").json(&json!({})),
        app.get("/transaction"),
        bare.get(app.url("/transaction"))
            .json(&json!({ "username": "alice" })),
        bare.get(app.url("/transaction"))
            .header(header::COOKIE, format!("jwtToken={}", forged))
            .json(&json!({ "username": "alice" })),
        bare.get(app.url("/transaction"))
            .header(header::COOKIE, format!("jwtToken={}", expired))
            .json(&json!({ "username": "alice" })),
        bare.post(app.url("/transaction/food"))
            .header(header::COOKIE, "jwtToken=not.a.token")
            .json(&json!({ "username": "alice", "name": "x", "value": 1, "currency": "EUR" })),
    ];

    for request in requests {
        let response = request.send().await.expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(response.text().await.unwrap(), PERMISSION_DENIED);
    }
}

#[tokio::test]
async fn test_transaction_lifecycle() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret1").await;

    let coffee = create_transaction(&app, "alice", "food", "coffee", -350).await;
    assert_eq!(coffee["status_code"], 201);
    assert_eq!(coffee["data"]["username"], "alice");
    assert_eq!(coffee["data"]["category"], "food");
    assert_eq!(coffee["data"]["currency"], "EUR");
    assert_eq!(coffee["data"]["value"], -350);
    let coffee_id = coffee["data"]["id"].as_str().unwrap().to_string();

    create_transaction(&app, "alice", "rent", "october", -90000).await;

    let all: serde_json::Value = app
        .get("/transaction")
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(all["data"].as_array().unwrap().len(), 2);

    let food: serde_json::Value = app
        .get("/transaction/food")
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(food["data"].as_array().unwrap().len(), 1);
    assert_eq!(food["data"][0]["id"], coffee_id.as_str());

    let fetched = app
        .get(&format!("/transaction/food/{}", coffee_id))
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(fetched.status(), StatusCode::OK);

    let wrong_category = app
        .get(&format!("/transaction/rent/{}", coffee_id))
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(wrong_category.status(), StatusCode::NOT_FOUND);

    let deleted = app
        .delete(&format!("/transaction/food/{}", coffee_id))
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(deleted.status(), StatusCode::OK);

    let gone = app
        .get(&format!("/transaction/food/{}", coffee_id))
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_transactions_are_private_to_their_owner() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret1").await;
    let coffee = create_transaction(&app, "alice", "food", "coffee", -350).await;
    let coffee_id = coffee["data"]["id"].as_str().unwrap().to_string();

    let bob = TestApp::client();
    let registered = bob
        .post(app.url("/user"))
        .json(&json!({ "username": "bob", "password": "hunter2" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(registered.status(), StatusCode::CREATED);

    let listed: serde_json::Value = bob
        .get(app.url("/transaction"))
        .json(&json!({ "username": "bob" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();
    assert_eq!(listed["data"], json!([]));

    let as_bob = bob
        .delete(app.url(&format!("/transaction/food/{}", coffee_id)))
        .json(&json!({ "username": "bob" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(as_bob.status(), StatusCode::NOT_FOUND);

    let posing_as_alice = bob
        .delete(app.url(&format!("/transaction/food/{}", coffee_id)))
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(posing_as_alice.status(), StatusCode::FORBIDDEN);

    let still_there = app
        .get(&format!("/transaction/food/{}", coffee_id))
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(still_there.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_transaction_invalid_input() {
    let app = TestApp::spawn().await;
    app.register("alice", "secret1").await;

    let response = app
        .post("/transaction/food")
        .json(&json!({
            "username": "alice",
            "name": "coffee",
            "value": -350,
            "currency": "euro"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("currency"));

    let bad_id = app
        .get("/transaction/food/not-a-uuid")
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(bad_id.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
