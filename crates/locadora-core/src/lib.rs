//! # locadora-core: Rental Pricing Logic
//!
//! Pure functions behind the rental dashboard's lease totals: which pricing
//! rule applies, what each item costs, and what the invoice adds up to.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rental Dashboard                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Presentation (lease form, lease list, PDF invoice)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ computed rows and totals               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ locadora-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐           │   │
//! │  │   │  types   │ │ pricing  │ │  lease   │ │validation│           │   │
//! │  │   │ Product  │ │ rules    │ │  Draft   │ │  rules   │           │   │
//! │  │   │ Lease    │ │ invoice  │ │  status  │ │  days    │           │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────▲───────────────────────────────────┘   │
//! │                                │ records (JSON)                         │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │  Backend service (clients, products, stock, leases, rules)      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Backend records (Product, PricingRule, Lease, ...)
//! - [`money`] - Exact decimal money
//! - [`coerce`] - Lenient deserialization of partially-populated records
//! - [`pricing`] - Rule matching, rate adjustment, line and invoice totals
//! - [`lease`] - Lease draft and status lifecycle
//! - [`validation`] - Form validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use locadora_core::pricing::{build_invoice, price_item};
//! use locadora_core::{BillingPeriod, Lease, Money, PricingRule, Product, RuleOperator};
//! use rust_decimal::Decimal;
//!
//! let rule = PricingRule {
//!     id: "1".into(),
//!     day_ini: 1,
//!     day_fin: 7,
//!     campo: BillingPeriod::Diario,
//!     operador: RuleOperator::Add,
//!     valor: Decimal::from(10),
//!     active: true,
//! };
//! let product = Product {
//!     name: "Betoneira".into(),
//!     daily_value: Some(Money::from_major(50)),
//!     ..Default::default()
//! };
//!
//! let item = price_item(&product, "PAT-1", BillingPeriod::Diario, 5, &[rule]);
//! let lease = Lease { items: vec![item], ..Default::default() };
//!
//! assert_eq!(build_invoice(&lease).total, Money::from_major(300));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coerce;
pub mod error;
pub mod lease;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use lease::LeaseDraft;
pub use money::Money;
pub use pricing::{Invoice, InvoiceCharges, InvoiceRow};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum items allowed in a single lease.
pub const MAX_LEASE_ITEMS: usize = 100;

/// Longest rental the forms accept (ten years).
pub const MAX_RENTAL_DAYS: u32 = 3650;
