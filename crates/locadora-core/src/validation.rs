//! # Validation Module
//!
//! Input validation for the admin and lease forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard forms                                              │
//! │  └── Required fields, immediate feedback                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Rule brackets and operators                                       │
//! │  ├── Day counts, non-negative amounts                                  │
//! │  └── Overlapping active rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend service                                              │
//! │  └── Persistence constraints (not enforced here)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation runs when records are edited. The pricing functions still
//! accept invalid records and degrade them to defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{PricingRule, RuleOperator};
use crate::{MAX_LEASE_ITEMS, MAX_RENTAL_DAYS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ```rust
/// use locadora_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Betoneira 400L").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a rental day count: `1..=MAX_RENTAL_DAYS`.
pub fn validate_days(days: u32) -> ValidationResult<()> {
    if days == 0 || days > MAX_RENTAL_DAYS {
        return Err(ValidationError::OutOfRange {
            field: "quantidade_dias".to_string(),
            min: 1,
            max: i64::from(MAX_RENTAL_DAYS),
        });
    }
    Ok(())
}

/// Validates that an amount (rate, freight, fine, discount) is not negative.
/// Zero is allowed.
pub fn validate_money_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates the number of items already in a lease before adding one.
pub fn validate_lease_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_LEASE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "leaseItems".to_string(),
            min: 0,
            max: MAX_LEASE_ITEMS as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Pricing Rule Validators
// =============================================================================

/// Validates a pricing rule from the rules admin form.
///
/// ## Rules
/// - `dayIni >= 1` and `dayIni <= dayFin`
/// - Operator is one of `+ - * / %`
/// - `valor >= 0`
/// - A `/` rule cannot have `valor = 0`
///
/// The rate adjuster tolerates every one of these at calculation time;
/// the form rejects them so they never reach the backend.
pub fn validate_rule(rule: &PricingRule) -> ValidationResult<()> {
    if rule.day_ini == 0 {
        return Err(ValidationError::OutOfRange {
            field: "dayIni".to_string(),
            min: 1,
            max: i64::from(MAX_RENTAL_DAYS),
        });
    }

    if rule.day_ini > rule.day_fin {
        return Err(ValidationError::InvertedRange {
            start: rule.day_ini,
            end: rule.day_fin,
        });
    }

    if !rule.operador.is_known() {
        return Err(ValidationError::NotAllowed {
            field: "operador".to_string(),
            allowed: ["+", "-", "*", "/", "%"].iter().map(|s| s.to_string()).collect(),
        });
    }

    if rule.valor < Decimal::ZERO {
        return Err(ValidationError::MustNotBeNegative {
            field: "valor".to_string(),
        });
    }

    if rule.operador == RuleOperator::Divide && rule.valor.is_zero() {
        return Err(ValidationError::DivisionByZero);
    }

    Ok(())
}

/// Two active rules whose day ranges intersect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RuleOverlap {
    pub first: String,
    pub second: String,
}

/// Every pair of active rules with intersecting ranges, in list order.
///
/// The matcher resolves overlaps by list order, which the backend does
/// not guarantee. The rules screen shows these pairs so they get fixed.
pub fn find_overlaps(rules: &[PricingRule]) -> Vec<RuleOverlap> {
    let active: Vec<&PricingRule> = rules.iter().filter(|rule| rule.active).collect();

    let mut overlaps = Vec::new();
    for (i, first) in active.iter().enumerate() {
        for second in &active[i + 1..] {
            if first.overlaps(second) {
                overlaps.push(RuleOverlap {
                    first: first.id.clone(),
                    second: second.id.clone(),
                });
            }
        }
    }
    overlaps
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BillingPeriod;

    fn rule(id: &str, day_ini: u32, day_fin: u32, operador: &str, valor: i64) -> PricingRule {
        PricingRule {
            id: id.to_string(),
            day_ini,
            day_fin,
            campo: BillingPeriod::Diario,
            operador: RuleOperator::from(operador),
            valor: Decimal::from(valor),
            active: true,
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Andaime tubular").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_days() {
        assert!(validate_days(1).is_ok());
        assert!(validate_days(MAX_RENTAL_DAYS).is_ok());
        assert!(validate_days(0).is_err());
        assert!(validate_days(MAX_RENTAL_DAYS + 1).is_err());
    }

    #[test]
    fn test_validate_money_non_negative() {
        assert!(validate_money_non_negative("valor_frete", Money::zero()).is_ok());
        assert!(validate_money_non_negative("valor_frete", Money::from_major(60)).is_ok());
        assert_eq!(
            validate_money_non_negative("valor_frete", Money::from_major(-1)),
            Err(ValidationError::MustNotBeNegative {
                field: "valor_frete".to_string()
            })
        );
    }

    #[test]
    fn test_validate_lease_size() {
        assert!(validate_lease_size(0).is_ok());
        assert!(validate_lease_size(MAX_LEASE_ITEMS - 1).is_ok());
        assert!(validate_lease_size(MAX_LEASE_ITEMS).is_err());
    }

    #[test]
    fn test_validate_rule() {
        assert!(validate_rule(&rule("ok", 1, 7, "+", 10)).is_ok());
        assert!(validate_rule(&rule("same-day", 3, 3, "%", 5)).is_ok());

        assert!(validate_rule(&rule("zero-start", 0, 7, "+", 10)).is_err());
        assert_eq!(
            validate_rule(&rule("inverted", 8, 3, "+", 10)),
            Err(ValidationError::InvertedRange { start: 8, end: 3 })
        );
        assert!(validate_rule(&rule("bad-op", 1, 7, "^", 10)).is_err());
        assert!(validate_rule(&rule("negative", 1, 7, "+", -5)).is_err());
        assert_eq!(
            validate_rule(&rule("div0", 1, 7, "/", 0)),
            Err(ValidationError::DivisionByZero)
        );
    }

    #[test]
    fn test_find_overlaps() {
        let mut inactive = rule("d", 1, 30, "+", 1);
        inactive.active = false;
        let rules = vec![
            rule("a", 1, 7, "+", 10),
            rule("b", 8, 15, "+", 5),
            rule("c", 15, 30, "-", 5),
            inactive,
        ];

        assert_eq!(
            find_overlaps(&rules),
            vec![RuleOverlap {
                first: "b".to_string(),
                second: "c".to_string()
            }]
        );
    }

    #[test]
    fn test_no_overlaps_for_adjacent_ranges() {
        let rules = vec![rule("a", 1, 7, "+", 10), rule("b", 8, 15, "+", 5)];
        assert!(find_overlaps(&rules).is_empty());
    }
}
