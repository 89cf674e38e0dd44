use crate::{error::AppError, AppState};
use auth::AuthError;
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts},
    Form, Json,
};
use engine::{AssetValuation, PortfolioSnapshot};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ==============================================================================
// Authentication extractor
// ==============================================================================

/// The identity resolved from the request's bearer token.
///
/// Every guarded handler takes this extractor; a missing, malformed or
/// invalid token rejects the request with 401 before the handler runs.
pub struct AuthenticatedUser(pub String);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Auth(AuthError::Unauthenticated))?;

        let mut parts_iter = header.splitn(2, ' ');
        let (Some(scheme), Some(token)) = (parts_iter.next(), parts_iter.next()) else {
            return Err(AppError::Auth(AuthError::Unauthenticated));
        };
        if !scheme.eq_ignore_ascii_case("Bearer") {
            return Err(AppError::Auth(AuthError::Unauthenticated));
        }

        let identity = state.auth.authenticate(token.trim())?;
        Ok(AuthenticatedUser(identity))
    }
}

// ==============================================================================
// Request / response bodies
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AddMoneyRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct AddMoneyResponse {
    pub message: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_added_money: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub available_money: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct TradeRequest {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
}

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_added_money: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub available_money: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub performance_abs: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub performance_rel: Decimal,
    pub assets: Vec<AssetResponse>,
}

#[derive(Debug, Serialize)]
pub struct AssetResponse {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_purchase_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub performance_abs: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub performance_rel: Decimal,
    pub price_available: bool,
}

impl From<PortfolioSnapshot> for PortfolioResponse {
    fn from(snapshot: PortfolioSnapshot) -> Self {
        Self {
            total_added_money: snapshot.total_added_money,
            available_money: snapshot.available_money,
            total_value: snapshot.total_value,
            performance_abs: snapshot.performance_abs,
            performance_rel: snapshot.performance_rel,
            assets: snapshot.assets.into_iter().map(AssetResponse::from).collect(),
        }
    }
}

impl From<AssetValuation> for AssetResponse {
    fn from(asset: AssetValuation) -> Self {
        Self {
            symbol: asset.symbol.to_string(),
            quantity: asset.quantity,
            current_price: asset.current_price,
            total_value: asset.total_value,
            avg_purchase_price: asset.avg_purchase_price,
            performance_abs: asset.performance_abs,
            performance_rel: asset.performance_rel,
            price_available: asset.price_available,
        }
    }
}

// ==============================================================================
// Handlers
// ==============================================================================

/// # POST /token
/// Password-flow token endpoint. The frontend submits a form body and
/// stores the returned bearer token.
pub async fn token(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let access_token = state.auth.login(&form.username, &form.password).await?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// # POST /register
/// Creates the user and pre-creates their account, so the first portfolio
/// read after registration succeeds.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let username = request.username.trim();
    state.auth.register(username, &request.password).await?;
    state.engine.directory().resolve(username).await;
    Ok(Json(MessageResponse {
        message: "Successfully created new user.".to_string(),
    }))
}

/// # POST /add-money
pub async fn add_money(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Json(request): Json<AddMoneyRequest>,
) -> Result<Json<AddMoneyResponse>, AppError> {
    let outcome = state.engine.add_money(&user.0, request.amount).await?;
    Ok(Json(AddMoneyResponse {
        message: "Successfully added money".to_string(),
        total_added_money: outcome.total_added_money,
        available_money: outcome.available_money,
    }))
}

/// # POST /buy
pub async fn buy(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Json(request): Json<TradeRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .engine
        .buy(&user.0, &request.symbol, request.quantity)
        .await?;
    Ok(Json(MessageResponse {
        message: "Asset successfully bought.".to_string(),
    }))
}

/// # POST /sell
pub async fn sell(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Json(request): Json<TradeRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .engine
        .sell(&user.0, &request.symbol, request.quantity)
        .await?;
    Ok(Json(MessageResponse {
        message: "Asset successfully sold.".to_string(),
    }))
}

/// # GET /portfolio
/// Returns a freshly computed valuation of the caller's account.
pub async fn portfolio(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
) -> Result<Json<PortfolioResponse>, AppError> {
    let snapshot = state.engine.portfolio(&user.0).await?;
    Ok(Json(PortfolioResponse::from(snapshot)))
}
