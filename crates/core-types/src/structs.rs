use crate::enums::TradeSide;
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A case-normalized asset identifier (e.g., "BTC").
///
/// Symbols are always stored upper-case so that "btc", "Btc" and "BTC" all
/// address the same holding. Construction goes through [`Symbol::parse`],
/// which rejects empty and non-alphanumeric input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Validates and normalizes a raw symbol string.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidSymbol(
                raw.to_string(),
                "symbol must not be empty".to_string(),
            ));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidSymbol(
                raw.to_string(),
                "symbol must be alphanumeric".to_string(),
            ));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A quantity of one asset symbol owned by an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: Symbol,
    pub quantity: Decimal,
}

/// An append-only audit record of one committed ledger operation.
///
/// Records are created after the mutation commits and are never modified.
/// `symbol` is `None` for deposits, which have no asset leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub record_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub side: TradeSide,
    pub symbol: Option<Symbol>,
    pub quantity: Decimal,
    /// Unit price at execution. Deposits carry a price of zero.
    pub price: Decimal,
    /// Cash balance immediately after the operation committed.
    pub cash_after: Decimal,
}

impl TradeRecord {
    /// Builds the record for a committed deposit.
    pub fn deposit(amount: Decimal, cash_after: Decimal) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            side: TradeSide::Deposit,
            symbol: None,
            quantity: amount,
            price: Decimal::ZERO,
            cash_after,
        }
    }

    /// Builds the record for a committed buy or sell.
    pub fn trade(
        side: TradeSide,
        symbol: Symbol,
        quantity: Decimal,
        price: Decimal,
        cash_after: Decimal,
    ) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            side,
            symbol: Some(symbol),
            quantity,
            price,
            cash_after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_to_upper_case() {
        assert_eq!(Symbol::parse("btc").unwrap().as_str(), "BTC");
        assert_eq!(Symbol::parse("  eth ").unwrap().as_str(), "ETH");
        assert_eq!(Symbol::parse("SOL").unwrap().as_str(), "SOL");
    }

    #[test]
    fn parse_rejects_empty_and_garbage() {
        assert!(Symbol::parse("").is_err());
        assert!(Symbol::parse("   ").is_err());
        assert!(Symbol::parse("BTC/USDT").is_err());
    }
}
