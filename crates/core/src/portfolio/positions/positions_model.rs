//! Rows of the "Your Portfolio" table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::investments::{CreatedAt, Investment, InvestmentStatus};

/// One investment as displayed in the positions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRow {
    pub id: String,
    pub pair: String,
    pub amount: Decimal,
    pub entry_price: Decimal,
    pub current_price: Decimal,
    /// Percentage move from entry to current price; `None` without an entry price
    pub price_change_pct: Option<Decimal>,
    pub profit: Decimal,
    pub is_profitable: bool,
    pub status: InvestmentStatus,
    /// Only active positions offer a close action
    pub closable: bool,
    pub created_at: Option<CreatedAt>,
}

/// Percentage move from entry to current price. `None` when the entry price
/// is zero or the ratio does not fit in a `Decimal`.
fn price_change_pct(entry: Decimal, current: Decimal) -> Option<Decimal> {
    if entry.is_zero() {
        return None;
    }
    current
        .checked_sub(entry)?
        .checked_div(entry)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|pct| pct.round_dp(DISPLAY_DECIMAL_PRECISION))
}

impl From<&Investment> for PositionRow {
    fn from(investment: &Investment) -> Self {
        let price_change_pct = price_change_pct(investment.entry_price, investment.current_price);
        Self {
            id: investment.id.clone(),
            pair: investment.pair.clone(),
            amount: investment.amount,
            entry_price: investment.entry_price,
            current_price: investment.current_price,
            price_change_pct,
            profit: investment.profit,
            is_profitable: investment.profit >= Decimal::ZERO,
            status: investment.status.clone(),
            closable: investment.is_active(),
            created_at: investment.created_at,
        }
    }
}

/// Table rows in input order.
pub fn build_position_rows(investments: &[Investment]) -> Vec<PositionRow> {
    investments.iter().map(PositionRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn investment(entry: Decimal, current: Decimal, profit: Decimal) -> Investment {
        Investment {
            id: "p1".to_string(),
            pair: "EUR/USD".to_string(),
            amount: dec!(1000),
            entry_price: entry,
            current_price: current,
            daily_roi: dec!(0.02),
            profit,
            status: InvestmentStatus::Active,
            created_at: None,
        }
    }

    #[test]
    fn test_price_change_and_profit_flags() {
        let row = PositionRow::from(&investment(dec!(1.0), dec!(1.0123), dec!(12)));
        assert_eq!(row.price_change_pct, Some(dec!(1.23)));
        assert!(row.is_profitable);
        assert!(row.closable);

        let row = PositionRow::from(&investment(dec!(2), dec!(1.5), dec!(-4)));
        assert_eq!(row.price_change_pct, Some(dec!(-25)));
        assert!(!row.is_profitable);
    }

    #[test]
    fn test_zero_entry_price_has_no_change() {
        let row = PositionRow::from(&investment(Decimal::ZERO, dec!(1), Decimal::ZERO));
        assert_eq!(row.price_change_pct, None);
        assert!(row.is_profitable);
    }

    #[test]
    fn test_out_of_range_change_has_no_value() {
        // quotient alone exceeds the Decimal range
        let tiny_entry = investment(dec!(0.0000000000000000000001), dec!(100000000000), dec!(1));
        let rows = build_position_rows(std::slice::from_ref(&tiny_entry));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price_change_pct, None);

        // quotient fits, the percentage does not
        let row = PositionRow::from(&investment(
            dec!(0.000000000000000001),
            dec!(1000000000),
            dec!(1),
        ));
        assert_eq!(row.price_change_pct, None);
    }

    #[test]
    fn test_closed_positions_are_not_closable() {
        let mut closed = investment(dec!(1), dec!(1), dec!(3));
        closed.status = InvestmentStatus::Closed;
        let rows = build_position_rows(&[closed, investment(dec!(1), dec!(1), dec!(0))]);
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].closable);
        assert!(rows[1].closable);
    }
}
