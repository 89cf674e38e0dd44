use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("No price available for symbol: {0}")]
    Unavailable(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to deserialize response: {0}")]
    Deserialization(String),

    #[error("Exchange error {0}: {1}")]
    Exchange(i64, String),
}
