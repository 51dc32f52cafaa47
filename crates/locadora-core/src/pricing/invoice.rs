//! Invoice Aggregator.
//!
//! ## Grouping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  leaseItems (in order)              invoice rows (first-seen order)     │
//! │  ─────────────────────              ───────────────────────────────     │
//! │  Betoneira / Menegotti  300   ──┐                                       │
//! │  Andaime   / Rohr       450   ──┼─► Betoneira/Menegotti  qtd 2   600    │
//! │  Betoneira / Menegotti  300   ──┘   Andaime/Rohr         qtd 1   450    │
//! │                                                                         │
//! │  subtotal = Σ row totals                                    1050        │
//! │  total    = subtotal + frete + multa - desconto                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::line_item::line_total;
use crate::types::{Lease, LeaseItem};

/// Extra charges applied on top of the item subtotal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceCharges {
    #[serde(rename = "frete")]
    pub freight: Money,
    #[serde(rename = "multa")]
    pub fine: Money,
    #[serde(rename = "desconto")]
    pub discount: Money,
}

impl InvoiceCharges {
    /// Charges of a lease, absent values as zero.
    pub fn from_lease(lease: &Lease) -> Self {
        InvoiceCharges {
            freight: lease.freight.unwrap_or_default(),
            fine: lease.fine.unwrap_or_default(),
            discount: lease.discount.unwrap_or_default(),
        }
    }
}

/// One invoice line: all items of the same product name and brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceRow {
    #[serde(rename = "nome")]
    pub name: String,
    pub marca: String,
    /// Days of the first item in the group.
    #[serde(rename = "dias")]
    pub days: u32,
    /// Number of items merged into this row.
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    /// Negotiated rate of the first item in the group.
    #[serde(rename = "valorUnitario")]
    pub unit_price: Money,
    /// Sum of the line totals of the group.
    #[serde(rename = "valorTotal")]
    pub total: Money,
}

/// Computed invoice for one lease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    #[serde(rename = "itens")]
    pub rows: Vec<InvoiceRow>,
    #[serde(flatten)]
    pub charges: InvoiceCharges,
    pub subtotal: Money,
    pub total: Money,
}

impl Invoice {
    /// Total number of lease items across all rows.
    pub fn item_count(&self) -> u32 {
        self.rows.iter().map(|row| row.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Groups `items` into invoice rows and applies `charges`.
///
/// Rows follow first-seen order. An empty item list is valid and yields a
/// zero subtotal, so freight-only invoices still total correctly. Amounts
/// too large to represent saturate rather than abort the invoice.
pub fn aggregate(items: &[LeaseItem], charges: InvoiceCharges) -> Invoice {
    let mut rows: Vec<InvoiceRow> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for item in items {
        let key = item.group_key();
        let amount = line_total(item);

        match index.get(&key) {
            Some(&position) => {
                let row = &mut rows[position];
                row.quantity += 1;
                row.total += amount;
            }
            None => {
                index.insert(key, rows.len());
                rows.push(InvoiceRow {
                    name: key.0.to_string(),
                    marca: key.1.to_string(),
                    days: item.billed_days(),
                    quantity: 1,
                    unit_price: item.negotiated_rate(),
                    total: amount,
                });
            }
        }
    }

    let subtotal: Money = rows.iter().map(|row| row.total).sum();
    let total = subtotal + charges.freight + charges.fine - charges.discount;
    if subtotal.is_saturated() || total.is_saturated() {
        warn!(%subtotal, %total, "invoice amount overflowed, saturating");
    }

    Invoice {
        rows,
        charges,
        subtotal,
        total,
    }
}

/// Invoice of a lease record as returned by the backend.
pub fn build_invoice(lease: &Lease) -> Invoice {
    aggregate(&lease.items, InvoiceCharges::from_lease(lease))
}
