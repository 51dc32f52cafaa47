//! Rule Matcher: picks the pricing rule for a rental duration.

use tracing::{debug, warn};

use crate::types::PricingRule;

/// Every active rule whose day range contains `days`, in list order.
pub fn matching_rules(days: u32, rules: &[PricingRule]) -> impl Iterator<Item = &PricingRule> {
    rules.iter().filter(move |rule| rule.covers(days))
}

/// The first active rule in list order whose inclusive range contains
/// `days`.
///
/// No match is not an error; callers keep the base rate. When several
/// active rules overlap, the first one still wins and the overlap is
/// logged so it can be fixed in the rules admin.
///
/// ```rust
/// use locadora_core::pricing::match_rule;
///
/// assert!(match_rule(5, &[]).is_none());
/// ```
pub fn match_rule(days: u32, rules: &[PricingRule]) -> Option<&PricingRule> {
    let mut candidates = matching_rules(days, rules);
    let first = candidates.next()?;

    let shadowed: Vec<&str> = candidates.map(|rule| rule.id.as_str()).collect();
    if !shadowed.is_empty() {
        warn!(
            days,
            applied = %first.id,
            shadowed = ?shadowed,
            "multiple active pricing rules match rental duration"
        );
    }

    debug!(days, rule = %first.id, campo = %first.campo, "pricing rule matched");
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BillingPeriod, RuleOperator};
    use rust_decimal::Decimal;

    fn rule(id: &str, day_ini: u32, day_fin: u32, active: bool) -> PricingRule {
        PricingRule {
            id: id.to_string(),
            day_ini,
            day_fin,
            campo: BillingPeriod::Diario,
            operador: RuleOperator::Add,
            valor: Decimal::from(10),
            active,
        }
    }

    #[test]
    fn test_match_inside_range() {
        let rules = vec![rule("short", 1, 7, true), rule("long", 8, 30, true)];
        assert_eq!(match_rule(5, &rules).map(|r| r.id.as_str()), Some("short"));
        assert_eq!(match_rule(8, &rules).map(|r| r.id.as_str()), Some("long"));
        assert_eq!(match_rule(30, &rules).map(|r| r.id.as_str()), Some("long"));
    }

    #[test]
    fn test_no_match_outside_ranges() {
        let rules = vec![rule("short", 1, 7, true)];
        assert!(match_rule(31, &rules).is_none());
    }

    #[test]
    fn test_inactive_rules_are_skipped() {
        let rules = vec![rule("off", 1, 10, false), rule("on", 1, 10, true)];
        assert_eq!(match_rule(3, &rules).map(|r| r.id.as_str()), Some("on"));
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let rules = vec![rule("a", 1, 10, true), rule("b", 5, 15, true)];
        assert_eq!(match_rule(7, &rules).map(|r| r.id.as_str()), Some("a"));
        assert_eq!(matching_rules(7, &rules).count(), 2);
    }
}
