use serde::{Deserialize, Serialize};

/// The direction of a committed ledger operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Deposit,
    Buy,
    Sell,
}

impl TradeSide {
    /// Returns true for the two sides that involve an asset symbol.
    pub fn is_trade(&self) -> bool {
        matches!(self, TradeSide::Buy | TradeSide::Sell)
    }
}
