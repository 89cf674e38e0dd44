use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub oracle: OracleSettings,
}

/// Contains parameters for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// The interface to bind, e.g. "127.0.0.1".
    pub host: String,
    /// The port to listen on.
    pub port: u16,
}

/// Contains parameters for token issuance and validation.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// The HS256 signing secret. Override via COINFOLIO__AUTH__JWT_SECRET
    /// rather than committing a real secret to the config file.
    pub jwt_secret: String,
    /// Access token lifetime in minutes.
    pub token_ttl_minutes: u64,
}

/// Contains parameters for the exchange price oracle.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleSettings {
    /// Base URL of the exchange REST API, e.g. "https://api.binance.com".
    pub base_url: String,
    /// The quote asset appended to every symbol (e.g. "USDT" turns
    /// "BTC" into the "BTCUSDT" trading pair).
    pub quote_asset: String,
    /// Upper bound on any single quote request. A quote that does not
    /// return within this interval is reported as unavailable.
    pub timeout_secs: u64,
}
