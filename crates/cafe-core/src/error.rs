//! # Error Types
//!
//! Domain-specific error types for cafe-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cafe-core errors (this file)                                          │
//! │  ├── CoreError        - Catalog and billing rule violations            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  counter app errors (separate crate)                                   │
//! │  └── AppError         - What the terminal prints                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → Operator               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Never Fails
//! Order mutations (`add_item`, `remove_one`, `clear`, `calculate_total`,
//! `generate_bill`, `update_status`) are infallible. Every error below is a
//! caller-correctable input problem; none of them is fatal.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Messages are shown to the operator verbatim.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Menu category is not one of food, drink or combo.
    #[error("Unknown menu category: {0}")]
    InvalidCategory(String),

    /// Menu item attributes are missing or malformed.
    ///
    /// ## When This Occurs
    /// - `name` or `price` missing
    /// - `price` not a non-negative decimal
    /// - combo component not defined earlier in the catalog
    #[error("Invalid menu item attributes: {reason}")]
    InvalidAttributes { reason: String },

    /// Attempted to bill an order without line items.
    #[error("Order cannot be empty.")]
    EmptyOrder,

    /// A discount drove the final amount below zero.
    ///
    /// ## User Workflow
    /// ```text
    /// Bill: $15.00, discount $20.00
    ///      │
    ///      ▼
    /// final = -$5.00
    ///      │
    ///      ▼
    /// NegativeFinalAmount → bill is not stored, status unchanged
    /// ```
    #[error("Discount is too large. Final amount cannot be negative ({final_amount}).")]
    NegativeFinalAmount { final_amount: Money },

    /// No order is open for the customer.
    #[error("No active order. Start a new order first.")]
    NoActiveOrder,

    /// Payment was confirmed before a bill was generated.
    #[error("Please generate the bill first.")]
    BillRequired,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} cannot be empty.")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must be a non-negative number.")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g. contact digits, email, decimal amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
