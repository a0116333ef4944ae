//! # App Error Type
//!
//! Unified error type for counter commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  operator types `bill 5 x`                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Command parse ──── bad argument ──────────────────────┐                │
//! │         │                                              │                │
//! │         ▼                                              ▼                │
//! │  cafe-core ──────── CoreError::EmptyOrder ─────────► AppError           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Success ──────────────────────────────────────────► printed text       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every core message reaches the operator verbatim; only the code is added.

use serde::Serialize;
use thiserror::Error;

use cafe_core::{CoreError, ValidationError};

/// Error returned from counter commands and startup.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("[{code}] {message}")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Message shown to the operator
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Menu item or command not found
    NotFound,

    /// Workflow rule refused the action (empty order, bill required, ...)
    BusinessLogic,

    /// No customer has been registered yet
    NoCustomer,

    /// Menu definition or configuration is unusable
    MenuError,

    /// Reading input or files failed
    Io,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCode::NoCustomer => "NO_CUSTOMER",
            ErrorCode::MenuError => "MENU_ERROR",
            ErrorCode::Io => "IO",
        };
        f.write_str(code)
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn no_customer() -> Self {
        AppError::new(
            ErrorCode::NoCustomer,
            "Please create/update customer details first.",
        )
    }

    pub fn io(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Io, message)
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::InvalidCategory(_) | CoreError::InvalidAttributes { .. } => {
                ErrorCode::MenuError
            }
            CoreError::EmptyOrder
            | CoreError::NegativeFinalAmount { .. }
            | CoreError::NoActiveOrder
            | CoreError::BillRequired => ErrorCode::BusinessLogic,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe_core::Money;

    #[test]
    fn test_core_messages_pass_through() {
        let err = AppError::from(CoreError::EmptyOrder);
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert_eq!(err.message, "Order cannot be empty.");
        assert_eq!(err.to_string(), "[BUSINESS_LOGIC] Order cannot be empty.");

        let err = AppError::from(CoreError::NegativeFinalAmount {
            final_amount: Money::from_cents(-500),
        });
        assert!(err.message.contains("Final amount cannot be negative"));
    }

    #[test]
    fn test_error_codes_by_kind() {
        assert_eq!(
            AppError::from(CoreError::InvalidCategory("snack".to_string())).code,
            ErrorCode::MenuError
        );
        let validation = || ValidationError::MustBeNonNegative {
            field: "Discount/Tip".to_string(),
        };
        assert_eq!(
            AppError::from(CoreError::Validation(validation())).code,
            ErrorCode::ValidationError
        );
        assert_eq!(AppError::from(validation()).code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_serializes_with_screaming_code() {
        let json = serde_json::to_value(AppError::no_customer()).unwrap();
        assert_eq!(json["code"], "NO_CUSTOMER");
        assert_eq!(json["message"], "Please create/update customer details first.");
    }
}
