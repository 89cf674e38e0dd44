use crate::error::LedgerError;
use core_types::{Holding, Symbol, TradeRecord};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Manages the state of one account: cash balance, asset holdings, and the
/// append-only trade record log.
///
/// Invariants upheld by every mutating method:
/// - the cash balance is never negative,
/// - every holding quantity is strictly positive (a position that reaches
///   exactly zero is removed from the map, never retained as zero).
#[derive(Debug, Clone, Default)]
pub struct AccountLedger {
    cash: Decimal,
    holdings: HashMap<Symbol, Decimal>,
    total_deposited: Decimal,
    records: Vec<TradeRecord>,
}

impl AccountLedger {
    /// Creates an empty, zero-balance ledger.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Mutating operations ---

    /// Credits a deposit to the cash balance and the lifetime deposit total.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        self.cash += amount;
        self.total_deposited += amount;
        Ok(())
    }

    /// Removes `amount` from the cash balance. Fails instead of ever letting
    /// the balance go negative.
    pub fn debit_cash(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if amount > self.cash {
            return Err(LedgerError::InsufficientFunds {
                required: amount.to_string(),
                available: self.cash.to_string(),
            });
        }
        self.cash -= amount;
        Ok(())
    }

    /// Adds sale proceeds to the cash balance.
    pub fn credit_cash(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        self.cash += amount;
        Ok(())
    }

    /// Creates or increments the holding for `symbol`.
    pub fn add_holding(&mut self, symbol: &Symbol, quantity: Decimal) -> Result<(), LedgerError> {
        if quantity <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(quantity));
        }
        *self.holdings.entry(symbol.clone()).or_insert(Decimal::ZERO) += quantity;
        Ok(())
    }

    /// Decrements the holding for `symbol`, deleting the entry if it reaches
    /// exactly zero.
    pub fn remove_holding(
        &mut self,
        symbol: &Symbol,
        quantity: Decimal,
    ) -> Result<(), LedgerError> {
        if quantity <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(quantity));
        }
        let held = self.holdings.get_mut(symbol).ok_or_else(|| {
            LedgerError::InsufficientAssets {
                symbol: symbol.to_string(),
                requested: quantity.to_string(),
                available: Decimal::ZERO.to_string(),
            }
        })?;
        if quantity > *held {
            return Err(LedgerError::InsufficientAssets {
                symbol: symbol.to_string(),
                requested: quantity.to_string(),
                available: held.to_string(),
            });
        }
        *held -= quantity;
        if held.is_zero() {
            self.holdings.remove(symbol);
        }
        Ok(())
    }

    /// Appends an audit record for an operation that has already committed.
    pub fn record(&mut self, record: TradeRecord) {
        tracing::debug!(side = ?record.side, cash_after = %record.cash_after, "Ledger operation committed.");
        self.records.push(record);
    }

    // --- Read accessors ---

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    pub fn total_deposited(&self) -> Decimal {
        self.total_deposited
    }

    /// Quantity held for `symbol`, if any.
    pub fn holding(&self, symbol: &Symbol) -> Option<Decimal> {
        self.holdings.get(symbol).copied()
    }

    /// A snapshot of all open holdings.
    pub fn holdings(&self) -> Vec<Holding> {
        self.holdings
            .iter()
            .map(|(symbol, quantity)| Holding {
                symbol: symbol.clone(),
                quantity: *quantity,
            })
            .collect()
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }
}
