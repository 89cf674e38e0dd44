use async_trait::async_trait;
use auth::AuthService;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use configuration::settings::AuthSettings;
use core_types::Symbol;
use engine::TradeEngine;
use price_client::{error::PriceError, PriceOracle};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;
use web_server::AppState;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

struct MockOracle {
    prices: HashMap<String, Decimal>,
}

impl MockOracle {
    fn new() -> Self {
        let mut prices = HashMap::new();
        prices.insert("BTC".to_string(), dec!(10));
        Self { prices }
    }
}

#[async_trait]
impl PriceOracle for MockOracle {
    async fn current_price(&self, symbol: &Symbol) -> Result<Decimal, PriceError> {
        self.prices
            .get(symbol.as_str())
            .copied()
            .ok_or_else(|| PriceError::Unavailable(symbol.to_string()))
    }
}

fn test_state() -> Arc<AppState> {
    let auth = AuthService::new(&AuthSettings {
        jwt_secret: "test-secret-test-secret-test-sec".to_string(),
        token_ttl_minutes: 60,
    });
    let engine = TradeEngine::new(Arc::new(MockOracle::new()));
    Arc::new(AppState { engine, auth })
}

async fn send(state: &Arc<AppState>, request: Request<Body>) -> (StatusCode, Value) {
    let response = web_server::app(state.clone())
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

fn json_post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Registers `alice` and returns a valid bearer token for her.
async fn register_and_login(state: &Arc<AppState>) -> String {
    let (status, _) = send(
        state,
        json_post(
            "/register",
            None,
            json!({"username": "alice", "password": "hunter2"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let login = Request::builder()
        .method("POST")
        .uri("/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=alice&password=hunter2"))
        .unwrap();
    let (status, body) = send(state, login).await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_endpoint_answers() {
    let state = test_state();
    let (status, body) = send(&state, get("/api/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn register_login_deposit_trade_portfolio_flow() {
    let state = test_state();
    let token = register_and_login(&state).await;

    let (status, body) = send(
        &state,
        json_post("/add-money", Some(&token), json!({"amount": 100.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available_money"], json!(100.0));
    assert_eq!(body["total_added_money"], json!(100.0));

    let (status, _) = send(
        &state,
        json_post("/buy", Some(&token), json!({"symbol": "btc", "quantity": 2.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&state, get("/portfolio", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available_money"], json!(80.0));
    assert_eq!(body["total_value"], json!(100.0));
    assert_eq!(body["assets"][0]["symbol"], json!("BTC"));
    assert_eq!(body["assets"][0]["quantity"], json!(2.0));
    assert_eq!(body["assets"][0]["current_price"], json!(10.0));

    let (status, _) = send(
        &state,
        json_post("/sell", Some(&token), json!({"symbol": "BTC", "quantity": 2.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&state, get("/portfolio", Some(&token))).await;
    assert_eq!(body["available_money"], json!(100.0));
    assert_eq!(body["assets"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn guarded_routes_reject_missing_or_bad_tokens() {
    let state = test_state();

    let (status, _) = send(&state, get("/portfolio", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&state, get("/portfolio", Some("not-a-token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &state,
        json_post("/add-money", None, json!({"amount": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_credentials_get_401() {
    let state = test_state();
    register_and_login(&state).await;

    let login = Request::builder()
        .method("POST")
        .uri("/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=alice&password=wrong"))
        .unwrap();
    let (status, body) = send(&state, login).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn duplicate_registration_gets_409() {
    let state = test_state();
    register_and_login(&state).await;

    let (status, _) = send(
        &state,
        json_post(
            "/register",
            None,
            json!({"username": "alice", "password": "again"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn insufficient_funds_and_assets_map_to_400() {
    let state = test_state();
    let token = register_and_login(&state).await;
    send(
        &state,
        json_post("/add-money", Some(&token), json!({"amount": 5.0})),
    )
    .await;

    // 1 BTC at 10 against 5 in cash.
    let (status, body) = send(
        &state,
        json_post("/buy", Some(&token), json!({"symbol": "BTC", "quantity": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("cash"));

    let (status, body) = send(
        &state,
        json_post("/sell", Some(&token), json!({"symbol": "BTC", "quantity": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("BTC"));
}

#[tokio::test]
async fn unquotable_symbol_maps_to_502() {
    let state = test_state();
    let token = register_and_login(&state).await;
    send(
        &state,
        json_post("/add-money", Some(&token), json!({"amount": 100.0})),
    )
    .await;

    let (status, _) = send(
        &state,
        json_post("/buy", Some(&token), json!({"symbol": "DOGE", "quantity": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn invalid_quantities_map_to_400() {
    let state = test_state();
    let token = register_and_login(&state).await;

    let (status, _) = send(
        &state,
        json_post("/buy", Some(&token), json!({"symbol": "BTC", "quantity": 0.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &state,
        json_post("/add-money", Some(&token), json!({"amount": -5.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
