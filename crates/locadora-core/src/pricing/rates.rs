//! Rate Resolver and Rate Adjuster.
//!
//! ## Operators
//! ```text
//! ┌──────────┬──────────────────────────────┬─────────────────────────────┐
//! │ operador │ negotiated rate              │ note                        │
//! ├──────────┼──────────────────────────────┼─────────────────────────────┤
//! │    +     │ base + valor                 │                             │
//! │    -     │ max(0, base - valor)         │ never negative              │
//! │    *     │ base × valor                 │                             │
//! │    /     │ base ÷ valor                 │ valor = 0 keeps base        │
//! │    %     │ base × (1 + valor / 100)     │ percentage increase         │
//! │  other   │ base                         │                             │
//! └──────────┴──────────────────────────────┴─────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::money::Money;
use crate::types::{BillingPeriod, PricingRule, Product, RuleOperator};

/// The product's base rate for `period`; absent rates are zero.
///
/// ```rust
/// use locadora_core::pricing::resolve_rate;
/// use locadora_core::{BillingPeriod, Money, Product};
///
/// let product = Product { daily_value: Some(Money::from_major(50)), ..Default::default() };
/// assert_eq!(resolve_rate(&product, BillingPeriod::Diario), Money::from_major(50));
/// assert_eq!(resolve_rate(&product, BillingPeriod::Quinzenal), Money::zero());
/// ```
pub fn resolve_rate(product: &Product, period: BillingPeriod) -> Money {
    product.base_rates().rate(period)
}

/// Applies `operator` with `operand` to `base`.
///
/// Total: a zero divisor or an unknown operator returns `base`, and a
/// result too large for a decimal falls back to `base` as well.
pub fn adjust_rate(base: Money, operator: &RuleOperator, operand: Decimal) -> Money {
    let amount = base.amount();
    let adjusted = match operator {
        RuleOperator::Add => amount.checked_add(operand),
        RuleOperator::Subtract => amount
            .checked_sub(operand)
            .map(|value| value.max(Decimal::ZERO)),
        RuleOperator::Multiply => amount.checked_mul(operand),
        RuleOperator::Divide if operand.is_zero() => Some(amount),
        RuleOperator::Divide => amount.checked_div(operand),
        RuleOperator::Percent => {
            amount.checked_mul(Decimal::ONE + operand / Decimal::ONE_HUNDRED)
        }
        RuleOperator::Unknown(_) => Some(amount),
    };

    match adjusted {
        Some(value) => Money::new(value),
        None => {
            warn!(%base, operador = %operator, %operand, "rate adjustment overflowed, keeping base rate");
            base
        }
    }
}

/// Applies a matched rule to a base rate, or passes it through.
pub fn apply_rule(base: Money, rule: Option<&PricingRule>) -> Money {
    match rule {
        Some(rule) => adjust_rate(base, &rule.operador, rule.valor),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(symbol: &str) -> RuleOperator {
        RuleOperator::from(symbol)
    }

    #[test]
    fn test_resolve_rate_each_period() {
        let product = Product {
            daily_value: Some(Money::from_major(50)),
            weekly_value: Some(Money::from_major(280)),
            fortnightly_value: Some(Money::from_major(500)),
            monthly_value: Some(Money::from_major(900)),
            annual_value: None,
            ..Default::default()
        };
        assert_eq!(resolve_rate(&product, BillingPeriod::Diario), Money::from_major(50));
        assert_eq!(resolve_rate(&product, BillingPeriod::Semanal), Money::from_major(280));
        assert_eq!(resolve_rate(&product, BillingPeriod::Quinzenal), Money::from_major(500));
        assert_eq!(resolve_rate(&product, BillingPeriod::Mensal), Money::from_major(900));
        assert_eq!(resolve_rate(&product, BillingPeriod::Anual), Money::zero());
    }

    #[test]
    fn test_add_and_multiply() {
        let base = Money::from_major(50);
        assert_eq!(adjust_rate(base, &op("+"), Decimal::from(10)), Money::from_major(60));
        assert_eq!(adjust_rate(base, &op("*"), Decimal::new(15, 1)), Money::from_major(75));
    }

    #[test]
    fn test_subtract_never_negative() {
        let base = Money::from_major(50);
        assert_eq!(adjust_rate(base, &op("-"), Decimal::from(20)), Money::from_major(30));
        assert_eq!(adjust_rate(base, &op("-"), Decimal::from(80)), Money::zero());
        for rate in [0, 1, 49, 50, 51, 1_000] {
            for operand in [-10, 0, 10, 50, 2_000] {
                let adjusted = adjust_rate(Money::from_major(rate), &op("-"), Decimal::from(operand));
                assert!(!adjusted.is_negative(), "{rate} - {operand}");
            }
        }
    }

    #[test]
    fn test_divide_guards_zero() {
        let base = Money::from_major(90);
        assert_eq!(adjust_rate(base, &op("/"), Decimal::ZERO), base);
        assert_eq!(adjust_rate(base, &op("/"), Decimal::from(3)), Money::from_major(30));
    }

    #[test]
    fn test_percent_is_increase() {
        for (rate, pct) in [(50, 10), (200, -25), (0, 30), (80, 0)] {
            let base = Money::from_major(rate);
            let operand = Decimal::from(pct);
            let expected = base.amount() * (Decimal::ONE + operand / Decimal::ONE_HUNDRED);
            assert_eq!(adjust_rate(base, &op("%"), operand), Money::new(expected));
        }
        assert_eq!(
            adjust_rate(Money::from_major(50), &op("%"), Decimal::from(10)),
            Money::from_major(55)
        );
    }

    #[test]
    fn test_unknown_operator_keeps_base() {
        let base = Money::from_major(50);
        assert_eq!(adjust_rate(base, &op("^"), Decimal::from(2)), base);
    }

    #[test]
    fn test_overflow_keeps_base() {
        let base = Money::new(Decimal::MAX);
        assert_eq!(adjust_rate(base, &op("*"), Decimal::from(10)), base);
    }

    #[test]
    fn test_apply_rule_without_rule() {
        let base = Money::from_major(900);
        assert_eq!(apply_rule(base, None), base);
    }
}
