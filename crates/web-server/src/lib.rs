use auth::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use engine::TradeEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub engine: TradeEngine,
    pub auth: AuthService,
}

/// Builds the application router. Kept separate from `run_server` so tests
/// can drive the routes in-process without binding a socket.
pub fn app(state: Arc<AppState>) -> Router {
    // The browser frontend is served from a different origin, so CORS stays
    // wide open, matching the service this replaces.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/token", post(handlers::token))
        .route("/register", post(handlers::register))
        .route("/add-money", post(handlers::add_money))
        .route("/buy", post(handlers::buy))
        .route("/sell", post(handlers::sell))
        .route("/portfolio", get(handlers::portfolio))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = app(state);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
