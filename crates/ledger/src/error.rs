use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Amount must be strictly positive. Got: {0}")]
    InvalidAmount(Decimal),

    #[error("Not enough cash available. Required: {required}, Available: {available}")]
    InsufficientFunds { required: String, available: String },

    #[error("Not enough {symbol} held. Requested: {requested}, Available: {available}")]
    InsufficientAssets {
        symbol: String,
        requested: String,
        available: String,
    },
}
