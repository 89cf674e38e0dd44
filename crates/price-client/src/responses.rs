use serde::Deserialize;

/// The successful body of `GET /api/v3/ticker/price`.
///
/// Binance serializes prices as strings, so the raw value is kept as a
/// `String` here and parsed into a `Decimal` by the client.
#[derive(Debug, Deserialize)]
pub struct TickerPriceResponse {
    pub symbol: String,
    pub price: String,
}

/// The error body returned by the exchange on a failed request,
/// e.g. `{"code": -1121, "msg": "Invalid symbol."}`.
#[derive(Debug, Deserialize)]
pub struct ExchangeErrorResponse {
    pub code: i64,
    pub msg: String,
}
