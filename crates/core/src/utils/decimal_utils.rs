//! Overflow-safe arithmetic for aggregated amounts.
//!
//! Any value that fits in a `Decimal` is accepted at the parsing boundary,
//! so sums of several of them can exceed the representable range. These
//! helpers clamp instead of panicking.

use log::warn;
use rust_decimal::Decimal;

/// Adds two amounts, clamping to `Decimal::MAX` / `Decimal::MIN` on overflow.
pub fn saturating_add(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_add(rhs).unwrap_or_else(|| {
        warn!("Decimal overflow adding {} and {}, clamping", lhs, rhs);
        if rhs.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// Sum that clamps instead of overflowing.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, saturating_add)
}
