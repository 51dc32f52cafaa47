//! # Pricing Engine
//!
//! Pure functions that turn backend records into billed amounts.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  days ──► rules::match_rule ──► Option<&PricingRule>                    │
//! │                                        │                                │
//! │  product + period ──► rates::resolve_rate ──► base rate                 │
//! │                                        │                                │
//! │                         rates::adjust_rate ──► negotiated rate          │
//! │                                        │                                │
//! │              line_item::line_total ──► rate × days (or manual total)    │
//! │                                        │                                │
//! │     invoice::aggregate ──► rows by (name, brand) ──► subtotal, total    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is total: missing rates read as zero, unmatched
//! rules fall back to the base rate, a zero divisor leaves the rate
//! unchanged and overflowing amounts saturate. Nothing in this module
//! returns an error or panics on malformed input.

pub mod invoice;
pub mod line_item;
pub mod rates;
pub mod rules;

pub use invoice::{aggregate, build_invoice, Invoice, InvoiceCharges, InvoiceRow};
pub use line_item::{line_total, price_item, reprice_item};
pub use rates::{adjust_rate, apply_rule, resolve_rate};
pub use rules::{match_rule, matching_rules};
