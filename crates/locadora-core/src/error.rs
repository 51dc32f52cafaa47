//! # Error Types
//!
//! Domain-specific error types for locadora-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  locadora-core errors (this file)                                      │
//! │  ├── CoreError        - Lease draft / lifecycle violations             │
//! │  └── ValidationError  - Form input validation failures                 │
//! │                                                                         │
//! │  apps/quote errors (separate crate)                                    │
//! │  └── QuoteError       - File, JSON and configuration failures          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → QuoteError → stderr               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing functions in [`crate::pricing`] never return these: missing
//! or malformed numbers degrade to zero instead of failing an invoice.

use thiserror::Error;

use crate::types::LeaseStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations while assembling or managing a lease.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Stock unit cannot be rented in its current state.
    ///
    /// ## When This Occurs
    /// - Unit is already rented, reserved or under maintenance
    #[error("Stock item {stock_id} is not available (status: {status})")]
    StockUnavailable { stock_id: String, status: String },

    /// Stock unit is already part of this draft.
    #[error("Stock item {0} is already in the lease")]
    DuplicateStock(String),

    /// Stock unit belongs to a different product than the one selected.
    #[error("Stock item {stock_id} does not belong to product {product_id}")]
    StockProductMismatch { stock_id: String, product_id: String },

    /// No item in the draft references this stock unit.
    #[error("Lease item not found for stock {0}")]
    ItemNotFound(String),

    /// Lease has reached the maximum number of items.
    #[error("Lease cannot have more than {max} items")]
    LeaseTooLarge { max: usize },

    /// Requested status change is not allowed.
    ///
    /// ## Lifecycle
    /// ```text
    ///          ┌──────────► Finalizado
    /// Ativo ───┤
    ///          └──────────► Cancelado
    /// ```
    /// Terminal states never change again.
    #[error("Lease {lease_id} cannot move from {from:?} to {to:?}")]
    InvalidLeaseStatus {
        lease_id: String,
        from: LeaseStatus,
        to: LeaseStatus,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised by the admin and lease forms.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Range start is after its end.
    #[error("dayIni ({start}) must not be greater than dayFin ({end})")]
    InvertedRange { start: u32, end: u32 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Division rule with a zero operand.
    #[error("valor cannot be zero for a division rule")]
    DivisionByZero,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
