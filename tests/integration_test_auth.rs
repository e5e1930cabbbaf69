mod common;

use axum::{body::Body, http::Request};
use common::{parse_body, TestApp};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_register_login_and_token_required() {
    let app = TestApp::new().await;

    let (_store_id, token) = app.register_store("Lotus Spa", "lotus_owner").await;
    assert!(!token.is_empty());

    // Duplicate store name is rejected.
    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({
                        "store_name": "Lotus Spa",
                        "username": "someone_else",
                        "password": "password123"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 409);

    // Login with the right password works.
    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({ "username": "lotus_owner", "password": "password123" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let body = parse_body(res).await;
    assert_eq!(body["store"]["store_name"], "Lotus Spa");
    assert!(body["token"].as_str().unwrap().len() > 20);

    // Wrong password is a 401.
    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    json!({ "username": "lotus_owner", "password": "wrong" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 401);

    // Protected routes reject requests without a token.
    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/vip")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 401);

    // And requests with a garbage token.
    let res = app.get("/api/vip", "not-a-jwt").await;
    assert_eq!(res.status().as_u16(), 401);
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new().await;

    let cases = [
        json!({ "store_name": "X", "username": "owner", "password": "password123" }),
        json!({ "store_name": "Valid Name", "username": "ab", "password": "password123" }),
        json!({ "store_name": "Valid Name", "username": "bad user!", "password": "password123" }),
        json!({ "store_name": "Valid Name", "username": "owner", "password": "short" }),
    ];

    for case in cases {
        let res = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/register")
                    .header("Content-Type", "application/json")
                    .body(Body::from(case.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 400, "case should be rejected: {}", case);
    }
}
