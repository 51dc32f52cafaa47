//! Line-Item Total Calculator, plus pricing of newly added lease items.

use crate::money::Money;
use crate::pricing::rates::apply_rule;
use crate::pricing::rules::match_rule;
use crate::types::{BillingPeriod, LeaseItem, PricingRule, Product, RateTable};

/// Billed amount of one lease item.
///
/// ## Algorithm
/// ```text
/// valor_total > 0 ? ──yes──► valor_total (manual override wins)
///        │
///        no
///        ▼
/// valor_negociado_<periodo_cobranca> × quantidade_dias
///   (rate 0 when period unset, days 1 when unset or zero)
/// ```
///
/// The same `rate × days` formula is used for every billing period,
/// including weekly, monthly and annual rates. Historical invoices were
/// computed this way.
///
/// ```rust
/// use locadora_core::pricing::line_total;
/// use locadora_core::{BillingPeriod, LeaseItem, Money};
///
/// let item = LeaseItem {
///     billing_period: Some(BillingPeriod::Diario),
///     days: Some(3),
///     negotiated_diario: Some(Money::from_major(100)),
///     total_override: Some(Money::from_major(500)),
///     ..Default::default()
/// };
/// assert_eq!(line_total(&item), Money::from_major(500));
/// ```
pub fn line_total(item: &LeaseItem) -> Money {
    if let Some(manual) = item.manual_total() {
        return manual;
    }
    item.negotiated_rate().multiply_days(item.billed_days())
}

/// Negotiated rates for a rental of `days` days.
///
/// Starts from `base` and replaces the rate of the matched rule's `campo`
/// period with the adjusted value. Other periods keep their base rate.
pub fn negotiate(base: RateTable, days: u32, rules: &[PricingRule]) -> RateTable {
    let mut negotiated = base;
    if let Some(rule) = match_rule(days, rules) {
        let adjusted = apply_rule(base.rate(rule.campo), Some(rule));
        negotiated.set(rule.campo, Some(adjusted));
    }
    negotiated
}

/// Builds the lease item created when a product and one of its stock
/// units are added to a lease draft.
pub fn price_item(
    product: &Product,
    stock_id: &str,
    period: BillingPeriod,
    days: u32,
    rules: &[PricingRule],
) -> LeaseItem {
    let base = product.base_rates();
    let mut item = LeaseItem {
        stock_id: Some(stock_id.to_string()),
        product: Some(product.snapshot()),
        billing_period: Some(period),
        days: Some(days),
        ..Default::default()
    };
    item.set_unit_rates(base);
    item.set_negotiated_rates(negotiate(base, item.billed_days(), rules));
    item
}

/// Recomputes unit and negotiated rates after the day count changed.
/// A manual total, if any, is left untouched.
pub fn reprice_item(item: &mut LeaseItem, product: &Product, rules: &[PricingRule]) {
    let base = product.base_rates();
    item.set_unit_rates(base);
    item.set_negotiated_rates(negotiate(base, item.billed_days(), rules));
}
