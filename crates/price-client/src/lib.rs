use crate::error::PriceError;
use async_trait::async_trait;
use configuration::settings::OracleSettings;
use core_types::Symbol;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::{ExchangeErrorResponse, TickerPriceResponse};

/// The generic, abstract interface for a current-price source.
/// This trait is the contract that the trade engine uses, allowing the
/// underlying implementation (live exchange or mock) to be swapped out.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Fetches the current unit price for `symbol`, quoted in the
    /// configured quote asset.
    ///
    /// Every failure mode -- unknown symbol, transport error, timeout,
    /// malformed body -- is a request-scoped `PriceError`; a caller that
    /// cannot get a price must treat the quote as unavailable.
    async fn current_price(&self, symbol: &Symbol) -> Result<Decimal, PriceError>;
}

/// A concrete implementation of the `PriceOracle` for the Binance spot API.
#[derive(Clone)]
pub struct BinanceClient {
    client: reqwest::Client,
    base_url: String,
    quote_asset: String,
}

impl BinanceClient {
    /// Builds a client whose every request is bounded by the configured
    /// timeout, so a stalled exchange surfaces as an error instead of
    /// hanging the caller.
    pub fn new(config: &OracleSettings) -> Result<Self, PriceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            quote_asset: config.quote_asset.clone(),
        })
    }
}

#[async_trait]
impl PriceOracle for BinanceClient {
    async fn current_price(&self, symbol: &Symbol) -> Result<Decimal, PriceError> {
        let url = format!("{}/api/v3/ticker/price", self.base_url);
        let pair = format!("{}{}", symbol, self.quote_asset);

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", pair.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PriceError::Unavailable(symbol.to_string())
                } else {
                    PriceError::Http(e)
                }
            })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // The exchange reports unknown symbols as a structured error body.
            return match serde_json::from_str::<ExchangeErrorResponse>(&text) {
                Ok(exchange_error) => {
                    tracing::warn!(
                        symbol = %symbol,
                        code = exchange_error.code,
                        msg = %exchange_error.msg,
                        "Exchange rejected the quote request."
                    );
                    Err(PriceError::Exchange(exchange_error.code, exchange_error.msg))
                }
                Err(_) => Err(PriceError::Unavailable(symbol.to_string())),
            };
        }

        let ticker: TickerPriceResponse = serde_json::from_str(&text)
            .map_err(|e| PriceError::Deserialization(e.to_string()))?;

        let price = Decimal::from_str(&ticker.price)
            .map_err(|e| PriceError::Deserialization(e.to_string()))?;

        if price <= Decimal::ZERO {
            return Err(PriceError::Unavailable(symbol.to_string()));
        }

        Ok(price)
    }
}
