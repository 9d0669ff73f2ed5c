use std::collections::HashMap;
use std::env;

use academy::identity::{FirebaseConfig, FirebaseIdentityClient, IdentityError, IdentityProvider};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{Value, json};

const API_KEY: &str = "test-key";

fn rejection(status: StatusCode, message: &str) -> Response {
    let body = json!({"error": {"code": status.as_u16(), "message": message, "errors": []}});
    (status, Json(body)).into_response()
}

/// Stands in for the Identity Toolkit `signInWithPassword` endpoint.
async fn sign_in_endpoint(
    Query(params): Query<HashMap<String, String>>,
    Json(req): Json<Value>,
) -> Response {
    if params.get("key").map(String::as_str) != Some(API_KEY) {
        return rejection(StatusCode::BAD_REQUEST, "API_KEY_INVALID");
    }
    if req["returnSecureToken"] != true {
        return rejection(StatusCode::BAD_REQUEST, "MISSING_RETURN_SECURE_TOKEN");
    }

    match (req["email"].as_str(), req["password"].as_str()) {
        (Some("sarah@academy.dev"), Some("automation")) => Json(json!({
            "localId": "uid-sarah",
            "email": "sarah@academy.dev",
            "displayName": "Sarah Chen",
            "idToken": "id-token",
            "registered": true
        }))
        .into_response(),
        (Some("sarah@academy.dev"), _) => rejection(StatusCode::BAD_REQUEST, "INVALID_PASSWORD"),
        (Some("locked@academy.dev"), _) => rejection(
            StatusCode::BAD_REQUEST,
            "TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily disabled",
        ),
        (Some("disabled@academy.dev"), _) => rejection(StatusCode::BAD_REQUEST, "USER_DISABLED"),
        (Some("broken@academy.dev"), _) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
        }
        _ => rejection(StatusCode::BAD_REQUEST, "EMAIL_NOT_FOUND"),
    }
}

async fn spawn_identity_endpoint() -> String {
    let app = Router::new().fallback(sign_in_endpoint);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{}", addr)
}

fn client(endpoint: String, api_key: &str) -> FirebaseIdentityClient {
    FirebaseIdentityClient::new(FirebaseConfig {
        api_key: api_key.to_string(),
        endpoint,
    })
    .expect("Failed to create identity client")
}

#[tokio::test]
async fn sign_in_returns_profile() {
    let client = client(spawn_identity_endpoint().await, API_KEY);
    let user = client
        .sign_in("sarah@academy.dev", "automation")
        .await
        .expect("sign-in should succeed");

    assert_eq!(user.uid, "uid-sarah");
    assert_eq!(user.display_name.as_deref(), Some("Sarah Chen"));
}

#[tokio::test]
async fn sign_in_maps_rejections() {
    let client = client(spawn_identity_endpoint().await, API_KEY);
    let cases = [
        ("sarah@academy.dev", IdentityError::WrongPassword),
        ("nobody@academy.dev", IdentityError::UserNotFound),
        ("locked@academy.dev", IdentityError::TooManyRequests),
        ("disabled@academy.dev", IdentityError::UserDisabled),
    ];

    for (email, expected) in cases {
        assert_eq!(client.sign_in(email, "wrong").await, Err(expected), "email: {}", email);
    }
}

#[tokio::test]
async fn sign_in_without_error_envelope_is_a_provider_error() {
    let client = client(spawn_identity_endpoint().await, API_KEY);
    match client.sign_in("broken@academy.dev", "x").await {
        Err(IdentityError::Provider(detail)) => assert!(detail.contains("upstream exploded")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn sign_in_with_bad_api_key_is_a_provider_error() {
    let client = client(spawn_identity_endpoint().await, "wrong-key");
    assert_eq!(
        client.sign_in("sarah@academy.dev", "automation").await,
        Err(IdentityError::Provider("API_KEY_INVALID".to_string()))
    );
}

#[tokio::test]
async fn unreachable_provider_is_a_provider_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(format!("http://{}", addr), API_KEY);
    assert!(matches!(
        client.sign_in("sarah@academy.dev", "automation").await,
        Err(IdentityError::Provider(_))
    ));
}

#[tokio::test]
#[ignore] // Run with: cargo test --test firebase_test -- --ignored
async fn test_sign_in_against_firebase() {
    dotenvy::dotenv().ok();

    let config = FirebaseConfig::from_env().expect("FIREBASE_API_KEY is not set");
    let email = env::var("FIREBASE_TEST_EMAIL").expect("FIREBASE_TEST_EMAIL is not set");
    let password = env::var("FIREBASE_TEST_PASSWORD").expect("FIREBASE_TEST_PASSWORD is not set");
    let client = FirebaseIdentityClient::new(config).expect("Failed to create identity client");

    let user = client.sign_in(&email, &password).await.expect("sign-in failed");
    assert_eq!(user.email.to_lowercase(), email.to_lowercase());

    let wrong = client.sign_in(&email, "definitely-not-the-password").await;
    assert_eq!(wrong, Err(IdentityError::WrongPassword));
}
