use salon_backend::{
    api::router::create_router,
    config::Config,
    domain::ports::SmsService,
    error::AppError,
    infra::factory::{build_state, run_migrations},
    state::AppState,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

pub struct MockSmsService;

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_member_created(
        &self,
        _phone: &str,
        _name: &str,
        _balance: f64,
    ) -> Result<(), AppError> {
        Ok(())
    }

    async fn send_recharge(
        &self,
        _phone: &str,
        _amount: f64,
        _bonus: f64,
        _balance: f64,
    ) -> Result<(), AppError> {
        Ok(())
    }

    async fn send_consumption(
        &self,
        _phone: &str,
        _amount: f64,
        _balance: f64,
    ) -> Result<(), AppError> {
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        // Same journal settings as the production pool so concurrent
        // writers behave identically under test.
        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_migrations(&pool).await;

        let config = Config {
            database_url: db_url,
            port: 0,
            jwt_secret: "test-secret".to_string(),
            sms_gateway_url: "http://localhost:1/sms".to_string(),
            sms_gateway_token: String::new(),
            sms_sign_name: "Test Spa".to_string(),
        };

        let mut state = build_state(&config, pool.clone());
        state.sms_service = Arc::new(MockSmsService);
        let state = Arc::new(state);

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Registers a store and returns `(store_id, bearer_token)`.
    pub async fn register_store(&self, store_name: &str, username: &str) -> (String, String) {
        let res = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/register")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "store_name": store_name,
                            "username": username,
                            "password": "password123"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 201, "register failed");
        let body = parse_body(res).await;
        (
            body["store"]["id"].as_str().unwrap().to_string(),
            body["token"].as_str().unwrap().to_string(),
        )
    }

    pub async fn get(&self, uri: &str, token: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(uri)
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn delete(&self, uri: &str, token: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(uri)
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Creates a member with the given opening balance and discount and
    /// returns its id.
    pub async fn create_member(
        &self,
        token: &str,
        name: &str,
        balance: f64,
        discount: f64,
    ) -> String {
        let res = self
            .post(
                "/api/vip",
                token,
                serde_json::json!({
                    "name": name,
                    "phone": "13812345678",
                    "balance": balance,
                    "discount": discount
                }),
            )
            .await;
        assert_eq!(res.status().as_u16(), 201, "create member failed");
        let body = parse_body(res).await;
        body["id"].as_str().unwrap().to_string()
    }

    /// Creates a catalog project and returns its id.
    pub async fn create_project(&self, token: &str, name: &str, price: f64) -> String {
        let res = self
            .post(
                "/api/project",
                token,
                serde_json::json!({
                    "name": name,
                    "duration_min": 60,
                    "price": price
                }),
            )
            .await;
        assert_eq!(res.status().as_u16(), 201, "create project failed");
        let body = parse_body(res).await;
        body["id"].as_str().unwrap().to_string()
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        panic!("Response body is empty. Status: {}", status);
    }
    match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => panic!(
            "Failed to parse JSON: {:?}. Status: {}. Body: {:?}",
            e,
            status,
            String::from_utf8_lossy(&bytes)
        ),
    }
}
