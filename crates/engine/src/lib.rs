//! # Coinfolio Engine Crate
//!
//! The trade engine composes price oracle lookups with ledger mutations into
//! all-or-nothing operations per trade, and owns the concurrency model:
//! operations on one account serialize against each other, operations on
//! different accounts never block each other.
//!
//! ## Architectural Principles
//!
//! - **Quote Outside, Commit Inside:** the oracle round trip happens before
//!   the account lock is taken, so a slow exchange never stalls other
//!   requests for the same account. The commit step re-validates funds and
//!   assets against the now-current balance inside the critical section.
//! - **Scarce Resource First:** a buy debits cash before crediting the
//!   holding; a sell debits the holding before crediting cash. Whichever
//!   guard fails, the ledger is left exactly as it was.
//!
//! ## Public API
//!
//! - `TradeEngine`: deposit, buy, sell, and portfolio valuation.
//! - `AccountDirectory`: identity-to-ledger resolution.
//! - `PortfolioSnapshot` / `AssetValuation`: the read-only valuation views.
//! - `EngineError`: the specific error types that can be returned from this crate.

use core_types::{Holding, Symbol, TradeRecord, TradeSide};
use price_client::PriceOracle;
use rust_decimal::Decimal;
use std::sync::Arc;

pub mod directory;
pub mod error;
pub mod valuation;

// Re-export the key components to provide a clean, public-facing API.
pub use directory::AccountDirectory;
pub use error::EngineError;
pub use valuation::{AssetValuation, PortfolioSnapshot};

/// The outcome of a committed deposit.
#[derive(Debug, Clone)]
pub struct DepositOutcome {
    pub available_money: Decimal,
    pub total_added_money: Decimal,
}

/// The outcome of a committed buy or sell: the resulting cash balance and
/// the holding after the trade (`None` once a position is fully closed).
#[derive(Debug, Clone)]
pub struct TradeOutcome {
    pub available_money: Decimal,
    pub holding: Option<Holding>,
    /// The unit price the trade executed at.
    pub price: Decimal,
}

/// Executes deposits and trades against per-account ledgers using prices
/// from the configured oracle.
pub struct TradeEngine {
    directory: AccountDirectory,
    oracle: Arc<dyn PriceOracle>,
}

impl TradeEngine {
    pub fn new(oracle: Arc<dyn PriceOracle>) -> Self {
        Self {
            directory: AccountDirectory::new(),
            oracle,
        }
    }

    /// The identity-to-account map. Exposed so the API layer can pre-create
    /// an account at registration time.
    pub fn directory(&self) -> &AccountDirectory {
        &self.directory
    }

    /// Credits a deposit to the account, creating it on first use.
    pub async fn add_money(
        &self,
        identity: &str,
        amount: Decimal,
    ) -> Result<DepositOutcome, EngineError> {
        let account = self.directory.resolve(identity).await;
        let mut account = account.lock().await;

        account.deposit(amount)?;
        let cash = account.cash();
        account.record(TradeRecord::deposit(amount, cash));

        tracing::info!(identity, amount = %amount, balance = %account.cash(), "Deposit committed.");
        Ok(DepositOutcome {
            available_money: account.cash(),
            total_added_money: account.total_deposited(),
        })
    }

    /// Buys `quantity` of `symbol` at the oracle's current price.
    ///
    /// Cash is the hard-capped resource, so it is debited first; only then
    /// is the holding credited. An `InsufficientFunds` rejection leaves the
    /// account untouched.
    pub async fn buy(
        &self,
        identity: &str,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<TradeOutcome, EngineError> {
        let symbol = Symbol::parse(symbol)?;
        if quantity <= Decimal::ZERO {
            return Err(EngineError::InvalidQuantity(quantity));
        }

        // Fetched once, outside the account lock, and used for both the
        // guard computation and the committed amount.
        let price = self.oracle.current_price(&symbol).await?;
        let cost = price * quantity;

        let account = self.directory.resolve(identity).await;
        let mut account = account.lock().await;

        account.debit_cash(cost)?;
        account.add_holding(&symbol, quantity)?;
        let cash = account.cash();
        account.record(TradeRecord::trade(
            TradeSide::Buy,
            symbol.clone(),
            quantity,
            price,
            cash,
        ));

        tracing::info!(
            identity,
            symbol = %symbol,
            quantity = %quantity,
            price = %price,
            balance = %account.cash(),
            "Buy committed."
        );
        Ok(TradeOutcome {
            available_money: account.cash(),
            holding: account.holding(&symbol).map(|held| Holding {
                symbol: symbol.clone(),
                quantity: held,
            }),
            price,
        })
    }

    /// Sells `quantity` of `symbol` at the oracle's current price.
    ///
    /// The asset is the scarce resource here: the holding is debited first,
    /// and only then is cash credited. An `InsufficientAssets` rejection has
    /// no cash effect.
    pub async fn sell(
        &self,
        identity: &str,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<TradeOutcome, EngineError> {
        let symbol = Symbol::parse(symbol)?;
        if quantity <= Decimal::ZERO {
            return Err(EngineError::InvalidQuantity(quantity));
        }

        let price = self.oracle.current_price(&symbol).await?;
        let proceeds = price * quantity;

        let account = self.directory.resolve(identity).await;
        let mut account = account.lock().await;

        account.remove_holding(&symbol, quantity)?;
        account.credit_cash(proceeds)?;
        let cash = account.cash();
        account.record(TradeRecord::trade(
            TradeSide::Sell,
            symbol.clone(),
            quantity,
            price,
            cash,
        ));

        tracing::info!(
            identity,
            symbol = %symbol,
            quantity = %quantity,
            price = %price,
            balance = %account.cash(),
            "Sell committed."
        );
        Ok(TradeOutcome {
            available_money: account.cash(),
            holding: account.holding(&symbol).map(|held| Holding {
                symbol: symbol.clone(),
                quantity: held,
            }),
            price,
        })
    }

    /// Derives a fresh valuation of the account. Holdings whose symbol the
    /// oracle cannot quote are reported with zero value and flagged instead
    /// of failing the whole snapshot.
    pub async fn portfolio(&self, identity: &str) -> Result<PortfolioSnapshot, EngineError> {
        let account = self
            .directory
            .lookup(identity)
            .await
            .ok_or_else(|| EngineError::UnknownAccount(identity.to_string()))?;

        // Copy the state out so the lock is not held across oracle calls.
        let (cash, total_deposited, holdings, records) = {
            let account = account.lock().await;
            (
                account.cash(),
                account.total_deposited(),
                account.holdings(),
                account.records().to_vec(),
            )
        };

        let mut assets = Vec::with_capacity(holdings.len());
        for holding in &holdings {
            let price = match self.oracle.current_price(&holding.symbol).await {
                Ok(price) => Some(price),
                Err(e) => {
                    tracing::warn!(
                        identity,
                        symbol = %holding.symbol,
                        error = %e,
                        "Price unavailable; valuing asset at zero."
                    );
                    None
                }
            };
            assets.push(valuation::value_holding(holding, price, &records));
        }

        Ok(valuation::build_snapshot(cash, total_deposited, assets))
    }
}
