use core_types::{Holding, Symbol, TradeRecord, TradeSide};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// The priced view of one holding inside a portfolio snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct AssetValuation {
    pub symbol: Symbol,
    pub quantity: Decimal,
    pub current_price: Decimal,
    pub total_value: Decimal,
    pub avg_purchase_price: Decimal,
    pub performance_abs: Decimal,
    pub performance_rel: Decimal,
    /// False when the oracle could not quote the symbol; the asset is then
    /// reported with zero value instead of failing the whole snapshot.
    pub price_available: bool,
}

/// A read-only valuation of an account at a point in time. Derived on every
/// request, never stored or cached.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSnapshot {
    pub total_added_money: Decimal,
    pub available_money: Decimal,
    pub total_value: Decimal,
    pub performance_abs: Decimal,
    pub performance_rel: Decimal,
    pub assets: Vec<AssetValuation>,
}

/// Volume-weighted average price across all buy records for `symbol`.
/// Zero when nothing was ever bought (e.g. the history was all deposits).
pub fn average_purchase_price(records: &[TradeRecord], symbol: &Symbol) -> Decimal {
    let mut total_cost = Decimal::ZERO;
    let mut total_bought = Decimal::ZERO;

    for record in records {
        if record.side == TradeSide::Buy && record.symbol.as_ref() == Some(symbol) {
            total_cost += record.quantity * record.price;
            total_bought += record.quantity;
        }
    }

    if total_bought > Decimal::ZERO {
        total_cost / total_bought
    } else {
        Decimal::ZERO
    }
}

/// Values one holding at the given price. `price` is `None` when the oracle
/// could not quote the symbol, in which case the asset contributes zero
/// value and is flagged; performance figures are suppressed to zero rather
/// than reported against a price we do not have.
pub fn value_holding(
    holding: &Holding,
    price: Option<Decimal>,
    records: &[TradeRecord],
) -> AssetValuation {
    let avg_purchase_price = average_purchase_price(records, &holding.symbol);

    match price {
        Some(current_price) => {
            let total_value = current_price * holding.quantity;
            let invested = avg_purchase_price * holding.quantity;
            let performance_abs = total_value - invested;
            AssetValuation {
                symbol: holding.symbol.clone(),
                quantity: holding.quantity,
                current_price,
                total_value,
                avg_purchase_price,
                performance_abs,
                performance_rel: percent_change(performance_abs, invested),
                price_available: true,
            }
        }
        None => AssetValuation {
            symbol: holding.symbol.clone(),
            quantity: holding.quantity,
            current_price: Decimal::ZERO,
            total_value: Decimal::ZERO,
            avg_purchase_price,
            performance_abs: Decimal::ZERO,
            performance_rel: Decimal::ZERO,
            price_available: false,
        },
    }
}

/// Assembles the account-level snapshot from the already-valued assets.
/// Total value = cash + the sum of every asset's value.
pub fn build_snapshot(
    available_money: Decimal,
    total_added_money: Decimal,
    assets: Vec<AssetValuation>,
) -> PortfolioSnapshot {
    let total_value = available_money
        + assets
            .iter()
            .map(|asset| asset.total_value)
            .sum::<Decimal>();
    let performance_abs = total_value - total_added_money;

    PortfolioSnapshot {
        total_added_money,
        available_money,
        total_value,
        performance_abs,
        performance_rel: percent_change(performance_abs, total_added_money),
        assets,
    }
}

fn percent_change(delta: Decimal, base: Decimal) -> Decimal {
    if base.is_zero() {
        Decimal::ZERO
    } else {
        delta / base * dec!(100)
    }
}
