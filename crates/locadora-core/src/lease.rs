//! # Lease Lifecycle
//!
//! Draft bookkeeping before submission and the status machine after it.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Lease form action          LeaseDraft call             Effect          │
//! │  ─────────────────          ───────────────             ──────          │
//! │                                                                         │
//! │  Pick product + stock ────► add_item() ──────────────► priced item      │
//! │  Change days ─────────────► set_days() ──────────────► rule re-applied  │
//! │  Change period ───────────► set_period() ────────────► new rate column  │
//! │  Edit line total ─────────► set_override() ──────────► manual total     │
//! │  Remove row ──────────────► remove_item()                               │
//! │  Freight/fine/discount ───► set_charges()                               │
//! │  Save ────────────────────► submit() ────────────────► Lease (Ativo)    │
//! │                                                                         │
//! │  After submit the items are history: a Lease has no item mutators.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::invoice::{aggregate, Invoice, InvoiceCharges};
use crate::pricing::line_item::{price_item, reprice_item};
use crate::types::{BillingPeriod, Lease, LeaseItem, LeaseStatus, PricingRule, Product, StockItem};
use crate::validation::{validate_days, validate_lease_size, validate_money_non_negative};

/// Whole days between two dates, never less than one.
///
/// ```rust
/// use chrono::NaiveDate;
/// use locadora_core::lease::rental_days;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
/// assert_eq!(rental_days(start, end), 5);
/// assert_eq!(rental_days(start, start), 1);
/// ```
pub fn rental_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - start).num_days();
    u32::try_from(days).unwrap_or(0).max(1)
}

// =============================================================================
// Lease Status Machine
// =============================================================================

impl Lease {
    /// Days billed for the lease, from the actual return date when the
    /// equipment is back, otherwise the expected one.
    pub fn billed_days(&self) -> Option<u32> {
        let start = self.start_date?;
        let end = self.actual_return_date.or(self.expected_return_date)?;
        Some(rental_days(start, end))
    }

    /// Moves the lease to `to`.
    ///
    /// Only `Ativo → Finalizado` and `Ativo → Cancelado` are allowed.
    pub fn transition(&mut self, to: LeaseStatus) -> CoreResult<()> {
        if self.status.is_terminal() || to == LeaseStatus::Ativo {
            return Err(CoreError::InvalidLeaseStatus {
                lease_id: self.id.clone().unwrap_or_default(),
                from: self.status,
                to,
            });
        }
        info!(lease_id = ?self.id, from = ?self.status, to = ?to, "lease status changed");
        self.status = to;
        Ok(())
    }

    /// Marks the lease as returned and finalized.
    pub fn finalize(&mut self, returned_on: NaiveDate) -> CoreResult<()> {
        self.transition(LeaseStatus::Finalizado)?;
        self.actual_return_date = Some(returned_on);
        Ok(())
    }

    pub fn cancel(&mut self) -> CoreResult<()> {
        self.transition(LeaseStatus::Cancelado)
    }
}

// =============================================================================
// Lease Draft
// =============================================================================

/// A lease being assembled in the form, before it is sent to the backend.
///
/// ## Invariants
/// - Items are unique by stock unit
/// - At most `MAX_LEASE_ITEMS` items
/// - Only available stock units can be added
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaseDraft {
    pub client_id: Option<String>,
    pub delivery_address: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub expected_return_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    items: Vec<LeaseItem>,
    charges: InvoiceCharges,
}

impl LeaseDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Day count suggested for new items: the span between the start and
    /// expected return dates, or one day when either is missing.
    pub fn default_days(&self) -> u32 {
        match (self.start_date, self.expected_return_date) {
            (Some(start), Some(end)) => rental_days(start, end),
            _ => 1,
        }
    }

    pub fn items(&self) -> &[LeaseItem] {
        &self.items
    }

    pub fn charges(&self) -> InvoiceCharges {
        self.charges
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds a stock unit of `product`, priced for `days` days.
    pub fn add_item(
        &mut self,
        product: &Product,
        stock: &StockItem,
        period: BillingPeriod,
        days: u32,
        rules: &[PricingRule],
    ) -> CoreResult<()> {
        validate_days(days)?;

        if !stock.product_id.is_empty() && stock.product_id != product.id {
            return Err(CoreError::StockProductMismatch {
                stock_id: stock.id.clone(),
                product_id: product.id.clone(),
            });
        }

        if !stock.is_rentable() {
            return Err(CoreError::StockUnavailable {
                stock_id: stock.id.clone(),
                status: stock.status.to_string(),
            });
        }

        if self.position(&stock.id).is_some() {
            return Err(CoreError::DuplicateStock(stock.id.clone()));
        }

        validate_lease_size(self.items.len()).map_err(|_| CoreError::LeaseTooLarge {
            max: crate::MAX_LEASE_ITEMS,
        })?;

        let item = price_item(product, &stock.id, period, days, rules);
        debug!(stock_id = %stock.id, product = %product.name, %period, days, "lease item added");
        self.items.push(item);
        Ok(())
    }

    pub fn remove_item(&mut self, stock_id: &str) -> CoreResult<LeaseItem> {
        let position = self.require(stock_id)?;
        Ok(self.items.remove(position))
    }

    /// Changes the day count and re-applies the pricing rules.
    pub fn set_days(
        &mut self,
        stock_id: &str,
        days: u32,
        product: &Product,
        rules: &[PricingRule],
    ) -> CoreResult<()> {
        validate_days(days)?;
        let position = self.require(stock_id)?;
        let item = &mut self.items[position];
        item.days = Some(days);
        reprice_item(item, product, rules);
        Ok(())
    }

    pub fn set_period(&mut self, stock_id: &str, period: BillingPeriod) -> CoreResult<()> {
        let position = self.require(stock_id)?;
        self.items[position].billing_period = Some(period);
        Ok(())
    }

    /// Sets or clears the manual line total.
    pub fn set_override(&mut self, stock_id: &str, total: Option<Money>) -> CoreResult<()> {
        if let Some(amount) = total {
            if amount.is_negative() {
                warn!(stock_id, %amount, "negative manual total rejected");
            }
            validate_money_non_negative("valor_total", amount)?;
        }
        let position = self.require(stock_id)?;
        self.items[position].total_override = total;
        Ok(())
    }

    pub fn set_charges(&mut self, charges: InvoiceCharges) -> CoreResult<()> {
        validate_money_non_negative("valor_frete", charges.freight)?;
        validate_money_non_negative("valor_multa", charges.fine)?;
        validate_money_non_negative("valor_desconto", charges.discount)?;
        self.charges = charges;
        Ok(())
    }

    /// Current totals as shown under the items table.
    pub fn invoice(&self) -> Invoice {
        aggregate(&self.items, self.charges)
    }

    /// Freezes the draft into an active lease.
    pub fn submit(self) -> Lease {
        let charges = self.charges;
        info!(items = self.items.len(), client_id = ?self.client_id, "lease submitted");
        Lease {
            id: None,
            client_id: self.client_id,
            delivery_address: self.delivery_address,
            start_date: self.start_date,
            expected_return_date: self.expected_return_date,
            actual_return_date: None,
            payment_date: self.payment_date,
            items: self.items,
            freight: Some(charges.freight),
            fine: Some(charges.fine),
            discount: Some(charges.discount),
            status: LeaseStatus::Ativo,
        }
    }

    fn position(&self, stock_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.stock_id.as_deref() == Some(stock_id))
    }

    fn require(&self, stock_id: &str) -> CoreResult<usize> {
        self.position(stock_id)
            .ok_or_else(|| CoreError::ItemNotFound(stock_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::build_invoice;
    use crate::types::{RuleOperator, StockStatus};
    use rust_decimal::Decimal;

    fn product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Betoneira 400L".to_string(),
            marca: "Menegotti".to_string(),
            daily_value: Some(Money::from_major(50)),
            ..Default::default()
        }
    }

    fn stock(id: &str, status: StockStatus) -> StockItem {
        StockItem {
            id: id.to_string(),
            product_id: "p1".to_string(),
            status,
        }
    }

    fn rules() -> Vec<PricingRule> {
        vec![PricingRule {
            id: "r1".to_string(),
            day_ini: 1,
            day_fin: 7,
            campo: BillingPeriod::Diario,
            operador: RuleOperator::Add,
            valor: Decimal::from(10),
            active: true,
        }]
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rental_days_minimum_one() {
        assert_eq!(rental_days(date(2024, 3, 10), date(2024, 3, 1)), 1);
        assert_eq!(rental_days(date(2024, 2, 1), date(2024, 3, 1)), 29);
    }

    #[test]
    fn test_draft_add_and_invoice() {
        let mut draft = LeaseDraft::new();
        draft
            .add_item(&product(), &stock("PAT-1", StockStatus::Disponivel), BillingPeriod::Diario, 5, &rules())
            .unwrap();
        draft
            .add_item(&product(), &stock("PAT-2", StockStatus::Disponivel), BillingPeriod::Diario, 5, &rules())
            .unwrap();

        let invoice = draft.invoice();
        assert_eq!(invoice.rows.len(), 1);
        assert_eq!(invoice.rows[0].quantity, 2);
        assert_eq!(invoice.subtotal, Money::from_major(600));
    }

    #[test]
    fn test_draft_rejects_unavailable_and_duplicate_stock() {
        let mut draft = LeaseDraft::new();
        let rented = stock("PAT-9", StockStatus::Alugado);
        let err = draft
            .add_item(&product(), &rented, BillingPeriod::Diario, 5, &rules())
            .unwrap_err();
        assert!(matches!(err, CoreError::StockUnavailable { .. }));

        let free = stock("PAT-1", StockStatus::Disponivel);
        draft.add_item(&product(), &free, BillingPeriod::Diario, 5, &rules()).unwrap();
        let err = draft
            .add_item(&product(), &free, BillingPeriod::Diario, 5, &rules())
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateStock(_)));
    }

    #[test]
    fn test_draft_rejects_stock_of_other_product() {
        let mut draft = LeaseDraft::new();
        let other = StockItem {
            id: "PAT-3".to_string(),
            product_id: "p2".to_string(),
            status: StockStatus::Disponivel,
        };
        let err = draft
            .add_item(&product(), &other, BillingPeriod::Diario, 5, &rules())
            .unwrap_err();
        assert!(matches!(err, CoreError::StockProductMismatch { .. }));
    }

    #[test]
    fn test_draft_rejects_zero_days() {
        let mut draft = LeaseDraft::new();
        let err = draft
            .add_item(&product(), &stock("PAT-1", StockStatus::Disponivel), BillingPeriod::Diario, 0, &rules())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_draft_set_days_reapplies_rule() {
        let mut draft = LeaseDraft::new();
        draft
            .add_item(&product(), &stock("PAT-1", StockStatus::Disponivel), BillingPeriod::Diario, 5, &rules())
            .unwrap();

        draft.set_days("PAT-1", 10, &product(), &rules()).unwrap();
        assert_eq!(draft.items()[0].negotiated_diario, Some(Money::from_major(50)));
        assert_eq!(draft.invoice().subtotal, Money::from_major(500));

        assert!(matches!(
            draft.set_days("PAT-404", 3, &product(), &rules()),
            Err(CoreError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_draft_override_period_and_remove() {
        let mut draft = LeaseDraft::new();
        draft
            .add_item(&product(), &stock("PAT-1", StockStatus::Disponivel), BillingPeriod::Diario, 5, &rules())
            .unwrap();

        draft.set_override("PAT-1", Some(Money::from_major(250))).unwrap();
        assert_eq!(draft.invoice().subtotal, Money::from_major(250));
        assert!(draft.set_override("PAT-1", Some(Money::from_major(-1))).is_err());

        draft.set_override("PAT-1", None).unwrap();
        draft.set_period("PAT-1", BillingPeriod::Semanal).unwrap();
        assert_eq!(draft.invoice().subtotal, Money::zero());

        let removed = draft.remove_item("PAT-1").unwrap();
        assert_eq!(removed.stock_id.as_deref(), Some("PAT-1"));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_submit_produces_active_lease() {
        let mut draft = LeaseDraft::new();
        draft.client_id = Some("c1".to_string());
        draft.start_date = Some(date(2024, 3, 1));
        draft.expected_return_date = Some(date(2024, 3, 6));
        let days = draft.default_days();
        assert_eq!(days, 5);

        draft
            .add_item(&product(), &stock("PAT-1", StockStatus::Disponivel), BillingPeriod::Diario, days, &rules())
            .unwrap();
        draft
            .set_charges(InvoiceCharges {
                freight: Money::from_major(60),
                ..Default::default()
            })
            .unwrap();
        let expected = draft.invoice();

        let lease = draft.submit();
        assert_eq!(lease.status, LeaseStatus::Ativo);
        assert_eq!(lease.billed_days(), Some(5));
        assert_eq!(build_invoice(&lease), expected);
        assert_eq!(expected.total, Money::from_major(360));
    }

    #[test]
    fn test_status_transitions() {
        let mut lease = Lease::default();
        lease.finalize(date(2024, 3, 8)).unwrap();
        assert_eq!(lease.status, LeaseStatus::Finalizado);
        assert_eq!(lease.actual_return_date, Some(date(2024, 3, 8)));

        assert!(lease.transition(LeaseStatus::Ativo).is_err());
        assert!(lease.cancel().is_err());

        let mut other = Lease::default();
        other.cancel().unwrap();
        assert!(matches!(
            other.transition(LeaseStatus::Finalizado),
            Err(CoreError::InvalidLeaseStatus { .. })
        ));
    }

    #[test]
    fn test_active_to_active_is_rejected() {
        let mut lease = Lease::default();
        assert!(lease.transition(LeaseStatus::Ativo).is_err());
        assert_eq!(lease.status, LeaseStatus::Ativo);
    }
}
