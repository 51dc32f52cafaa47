//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Pricing rules make integer cents awkward too:                          │
//! │    R$ 100.00 / 3      = R$ 33.333...  (rule operator "/")               │
//! │    R$ 10.00 + 12.5%   = R$ 11.25                                        │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 decimals (rust_decimal)                          │
//! │    Every intermediate value is exact; rounding happens only when a     │
//! │    value is shown to a person.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use locadora_core::money::Money;
//!
//! let daily = Money::from_cents(5000);      // R$ 50.00
//! let five_days = daily.multiply_days(5);   // R$ 250.00
//! assert_eq!(five_days, Money::from_major(250));
//! ```

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use tracing::warn;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in reais, backed by an exact decimal.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.daily_value ──► LeaseItem.valor_unitario_diario                │
/// │                                │                                        │
/// │                          (pricing rule)                                 │
/// │                                ▼                                        │
/// │                 LeaseItem.valor_negociado_diario ──► line total         │
/// │                                                          │              │
/// │  Lease.valor_frete / valor_multa / valor_desconto ──► Invoice.total    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] Decimal);

impl Money {
    /// Largest representable amount. Sums and products saturate here.
    pub const MAX: Money = Money(Decimal::MAX);

    /// Smallest representable amount.
    pub const MIN: Money = Money(Decimal::MIN);

    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use locadora_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "R$ 10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Creates a Money value from whole reais.
    #[inline]
    pub fn from_major(major: i64) -> Self {
        Money(Decimal::from(major))
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is strictly less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Clamps negative values to zero.
    #[inline]
    pub fn clamp_non_negative(self) -> Self {
        if self.is_negative() {
            Money::zero()
        } else {
            self
        }
    }

    /// Whether the value sits at one of the representable bounds, which
    /// only happens after an overflowing sum or product.
    #[inline]
    pub fn is_saturated(&self) -> bool {
        *self == Money::MAX || *self == Money::MIN
    }

    /// Multiplies a rate by a day count, saturating on overflow.
    ///
    /// ```rust
    /// use locadora_core::money::Money;
    ///
    /// let rate = Money::from_major(60);
    /// assert_eq!(rate.multiply_days(5), Money::from_major(300));
    /// ```
    #[inline]
    pub fn multiply_days(&self, days: u32) -> Self {
        match self.0.checked_mul(Decimal::from(days)) {
            Some(amount) => Money(amount),
            None => {
                warn!(rate = %self, days, "rate times days overflowed, saturating");
                Money(self.0.saturating_mul(Decimal::from(days)))
            }
        }
    }

    /// Rounds to `dp` decimal places, half away from zero.
    ///
    /// Only for presentation. Totals are summed at full precision.
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Parses amounts the way the dashboard forms emit them.
    ///
    /// Accepts `"50"`, `"50.5"`, `"50,50"` and `"1.234,56"`. Returns
    /// `None` for empty or non-numeric text.
    ///
    /// ```rust
    /// use locadora_core::money::Money;
    ///
    /// assert_eq!(Money::parse_lenient("1.234,56"), Some(Money::from_cents(123456)));
    /// assert_eq!(Money::parse_lenient(" 50,00 "), Some(Money::from_major(50)));
    /// assert_eq!(Money::parse_lenient("abc"), None);
    /// ```
    pub fn parse_lenient(text: &str) -> Option<Self> {
        let text = text.trim().trim_start_matches("R$").trim();
        if text.is_empty() {
            return None;
        }

        let normalized = if text.contains(',') {
            // Brazilian format: '.' groups thousands, ',' marks decimals
            text.replace('.', "").replace(',', ".")
        } else {
            text.to_string()
        };

        Decimal::from_str(&normalized)
            .or_else(|_| Decimal::from_scientific(&normalized))
            .ok()
            .map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering with two decimals. The CLI formats amounts
/// through its own configuration.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_dp(2).0;
        if rounded.is_sign_negative() && !rounded.is_zero() {
            write!(f, "-R$ {:.2}", rounded.abs())
        } else {
            write!(f, "R$ {:.2}", rounded.abs())
        }
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

// Addition and subtraction saturate at `Money::MAX` / `Money::MIN`
// instead of panicking; callers check `is_saturated` where it matters.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

/// Multiplication by a dimensionless factor (rule operand).
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Money(self.0.saturating_mul(factor))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), Decimal::new(1099, 2));
        assert_eq!(Money::from_cents(5000), Money::from_major(50));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "R$ 10.99");
        assert_eq!(Money::from_major(5).to_string(), "R$ 5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-R$ 5.50");
        assert_eq!(Money::zero().to_string(), "R$ 0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(10);
        let b = Money::from_major(5);

        assert_eq!(a + b, Money::from_major(15));
        assert_eq!(a - b, Money::from_major(5));
        assert_eq!(a * Decimal::from(3), Money::from_major(30));

        let mut c = a;
        c += b;
        c -= Money::from_major(1);
        assert_eq!(c, Money::from_major(14));
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_panicking() {
        assert_eq!(Money::MAX + Money::from_major(1), Money::MAX);
        assert_eq!(Money::MIN - Money::from_major(1), Money::MIN);
        assert_eq!(Money::MAX.multiply_days(2), Money::MAX);
        assert_eq!(Money::MIN.multiply_days(3), Money::MIN);
        assert_eq!(Money::MAX * Decimal::from(10), Money::MAX);

        let mut total = Money::MAX;
        total += Money::MAX;
        assert!(total.is_saturated());
        assert!(!Money::from_major(300).is_saturated());

        let total: Money = [Money::MAX, Money::MAX, Money::from_major(5)].iter().sum();
        assert_eq!(total, Money::MAX);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!((Money::from_major(3) - Money::from_major(5)).clamp_non_negative(), Money::zero());
        assert_eq!(Money::from_major(3).clamp_non_negative(), Money::from_major(3));
    }

    #[test]
    fn test_sum() {
        let values = [Money::from_major(300), Money::from_major(450)];
        let total: Money = values.iter().sum();
        assert_eq!(total, Money::from_major(750));

        let empty: Vec<Money> = Vec::new();
        assert_eq!(empty.into_iter().sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_round_dp_is_presentation_only() {
        let third = Money::from_major(100) * (Decimal::ONE / Decimal::from(3));
        assert_eq!(third.round_dp(2), Money::from_cents(3333));
        assert_ne!(third, third.round_dp(2));
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Money::parse_lenient("50"), Some(Money::from_major(50)));
        assert_eq!(Money::parse_lenient("50.5"), Some(Money::from_cents(5050)));
        assert_eq!(Money::parse_lenient("R$ 1.234,56"), Some(Money::from_cents(123456)));
        assert_eq!(Money::parse_lenient("1e2"), Some(Money::from_major(100)));
        assert_eq!(Money::parse_lenient(""), None);
        assert_eq!(Money::parse_lenient("   "), None);
        assert_eq!(Money::parse_lenient("n/a"), None);
    }

    #[test]
    fn test_serializes_as_json_number() {
        let json = serde_json::to_string(&Money::from_cents(6000)).unwrap();
        assert_eq!(json, "60.0");
    }
}
