use auth::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use engine::EngineError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
    #[error("Trade error: {0}")]
    Engine(#[from] EngineError),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// The distinct domain error kinds stay distinguishable to clients: each
/// maps to its own status code and carries its own message, rather than
/// collapsing everything into one generic failure.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Auth(ref auth_err) => match auth_err {
                AuthError::UserExists(_) => (StatusCode::CONFLICT, auth_err.to_string()),
                AuthError::InvalidCredentials | AuthError::Unauthenticated => {
                    (StatusCode::UNAUTHORIZED, auth_err.to_string())
                }
                AuthError::InvalidInput(_) => (StatusCode::BAD_REQUEST, auth_err.to_string()),
                AuthError::TokenCreation(_) | AuthError::Internal(_) => {
                    tracing::error!(error = ?auth_err, "Authentication failure.");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal authentication error occurred".to_string(),
                    )
                }
            },
            AppError::Engine(ref engine_err) => match engine_err {
                EngineError::InvalidQuantity(_)
                | EngineError::InvalidSymbol(_)
                | EngineError::Ledger(_) => (StatusCode::BAD_REQUEST, engine_err.to_string()),
                EngineError::UnknownAccount(_) => {
                    (StatusCode::NOT_FOUND, "Portfolio not found".to_string())
                }
                EngineError::Price(price_err) => {
                    tracing::error!(error = ?price_err, "Price oracle failure.");
                    (StatusCode::BAD_GATEWAY, engine_err.to_string())
                }
            },
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
