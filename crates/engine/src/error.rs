use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Quantity must be strictly positive. Got: {0}")]
    InvalidQuantity(Decimal),

    #[error(transparent)]
    InvalidSymbol(#[from] core_types::CoreError),

    #[error("No account exists for identity: {0}")]
    UnknownAccount(String),

    #[error(transparent)]
    Ledger(#[from] ledger::LedgerError),

    #[error("Price unavailable: {0}")]
    Price(#[from] price_client::error::PriceError),
}
