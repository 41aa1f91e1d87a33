mod common;

use auth::TokenSubject;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use common::TEST_SECRET;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_me_and_truncated_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/v1/auth/register")
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "s3cret!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["expires_in"], 86_400);
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let response = app
        .get_authenticated("/api/v1/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Ada");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert!(uuid::Uuid::parse_str(body["data"]["id"].as_str().unwrap()).is_ok());

    let truncated = &token[..token.len() - 1];
    let response = app
        .get_authenticated("/api/v1/auth/me", truncated)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("Ada", "ada@example.com", "s3cret!").await;

    let response = app
        .post("/api/v1/auth/register")
        .json(&json!({
            "name": "Ada Again",
            "email": "ada@example.com",
            "password": "another-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Email already exists");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = TestApp::spawn().await;

    let cases = [
        json!({ "name": "A", "email": "ada@example.com", "password": "s3cret!" }),
        json!({ "name": "Ada", "email": "not-an-email", "password": "s3cret!" }),
        json!({ "name": "Ada", "email": "ada@example.com", "password": "short" }),
    ];

    for case in cases {
        let response = app
            .post("/api/v1/auth/register")
            .json(&case)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "case: {}", case);
    }
}

#[tokio::test]
async fn test_undecodable_bodies_are_bad_request() {
    let app = TestApp::spawn().await;

    let missing_field = app
        .post("/api/v1/auth/register")
        .json(&json!({ "name": "Ada", "email": "ada@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    let no_content_type = app
        .post("/api/v1/auth/login")
        .body(r#"{"email":"ada@example.com","password":"s3cret!"}"#)
        .send()
        .await
        .expect("Failed to execute request");

    for response in [missing_field, no_content_type] {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["status_code"], 400);
        assert_eq!(body["data"]["message"], "Invalid request body");
    }
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    let registered = app.register("Ada", "ada@example.com", "s3cret!").await;

    let response = app
        .post("/api/v1/auth/login")
        .json(&json!({
            "email": "ada@example.com",
            "password": "s3cret!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["access_token"].as_str().unwrap();

    let claims = app
        .authenticator
        .validate_token(token)
        .expect("Issued token should validate");
    assert_eq!(claims.sub, app.user_id(&registered).await);
    assert_eq!(claims.email, "ada@example.com");
}

#[tokio::test]
async fn test_login_failures_are_identical() {
    let app = TestApp::spawn().await;

    app.register("Ada", "ada@example.com", "s3cret!").await;

    let wrong_password = app
        .post("/api/v1/auth/login")
        .json(&json!({
            "email": "ada@example.com",
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let unknown_email = app
        .post("/api/v1/auth/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "s3cret!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_email: serde_json::Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["data"]["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_email_is_case_sensitive() {
    let app = TestApp::spawn().await;

    app.register("Ada", "ada@example.com", "s3cret!").await;

    let response = app
        .post("/api/v1/auth/login")
        .json(&json!({
            "email": "Ada@Example.com",
            "password": "s3cret!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gate_missing_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/auth/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 401);
    assert_eq!(body["data"]["message"], "Missing authorization header");
}

#[tokio::test]
async fn test_gate_wrong_scheme() {
    let app = TestApp::spawn().await;

    let token = app.register("Ada", "ada@example.com", "s3cret!").await;

    let response = app
        .get("/api/v1/auth/me")
        .header("Authorization", format!("Token {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid authorization header format");
}

#[tokio::test]
async fn test_gate_rejects_other_algorithm() {
    let app = TestApp::spawn().await;

    let now = Utc::now().timestamp();
    let claims = json!({
        "sub": uuid::Uuid::new_v4().to_string(),
        "name": "Mallory",
        "email": "mallory@example.com",
        "iat": now,
        "nbf": now,
        "exp": now + 3600
    });
    let forged = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .unwrap();

    let response = app
        .get_authenticated("/api/v1/auth/me", &forged)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gate_rejects_foreign_secret() {
    let app = TestApp::spawn().await;

    let now = Utc::now().timestamp();
    let claims = json!({
        "sub": uuid::Uuid::new_v4().to_string(),
        "name": "Mallory",
        "email": "mallory@example.com",
        "iat": now,
        "nbf": now,
        "exp": now + 3600
    });
    let forged = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"some-other-secret-that-is-32-bytes-long"),
    )
    .unwrap();

    let response = app
        .get_authenticated("/api/v1/auth/me", &forged)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_gate_expired_token() {
    let app = TestApp::spawn().await;

    let subject = TokenSubject::new(uuid::Uuid::new_v4(), "Ada", "ada@example.com");
    let expired = app.token_issued_at(&subject, Utc::now() - Duration::hours(25));

    let response = app
        .get_authenticated("/api/v1/auth/me", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Token has expired");
}

#[tokio::test]
async fn test_gate_rejects_non_uuid_subject() {
    let app = TestApp::spawn().await;

    let subject = TokenSubject::new("user123", "Ada", "ada@example.com");
    let token = app.token_issued_at(&subject, Utc::now());

    let response = app
        .get_authenticated("/api/v1/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_users_crud() {
    let app = TestApp::spawn().await;

    let token = app.register("Ada", "ada@example.com", "s3cret!").await;
    app.register("Grace", "grace@example.com", "s3cret!").await;
    let user_id = app.user_id(&token).await;

    // List
    let response = app
        .get_authenticated("/api/v1/users", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|user| user.get("password_hash").is_none()));

    // Create (no credential, cannot log in)
    let response = app
        .post("/api/v1/users")
        .bearer_auth(&token)
        .json(&json!({ "name": "Linus", "email": "linus@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["name"], "Linus");
    assert!(body["data"].get("password_hash").is_none());

    let response = app
        .post("/api/v1/users")
        .bearer_auth(&token)
        .json(&json!({ "name": "Imposter", "email": "linus@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "linus@example.com", "password": "anything" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Get
    let response = app
        .get_authenticated(&format!("/api/v1/users/{}", user_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Ada");
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"]["updated_at"].is_string());

    // Update
    let response = app
        .put_authenticated(&format!("/api/v1/users/{}", user_id), &token)
        .json(&json!({ "name": "Ada Lovelace" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Ada Lovelace");
    assert_eq!(body["data"]["email"], "ada@example.com");

    // Empty fields leave the record unchanged
    let response = app
        .put_authenticated(&format!("/api/v1/users/{}", user_id), &token)
        .json(&json!({ "name": "", "email": "" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Ada Lovelace");
    assert_eq!(body["data"]["email"], "ada@example.com");

    // Update to an email someone else holds
    let response = app
        .put_authenticated(&format!("/api/v1/users/{}", user_id), &token)
        .json(&json!({ "email": "grace@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Delete
    let response = app
        .delete_authenticated(&format!("/api/v1/users/{}", user_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // The token outlives the account; the record is gone.
    let response = app
        .get_authenticated(&format!("/api/v1/users/{}", user_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_users_invalid_id() {
    let app = TestApp::spawn().await;

    let token = app.register("Ada", "ada@example.com", "s3cret!").await;

    let response = app
        .get_authenticated("/api/v1/users/not-a-uuid", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid user ID");
}

#[tokio::test]
async fn test_users_require_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/v1/users")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_and_request_id() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "healthy");
    assert!(body["data"]["time"].is_string());
}
