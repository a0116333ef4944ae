//! # Validation Module
//!
//! Input validation for the fields the counter collects.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Counter app                                                  │
//! │  ├── Command parsing (numbers, argument count)                         │
//! │  └── Immediate operator feedback                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Customer fields (name, contact, email)                            │
//! │  ├── Quantity bounds, discount/tip amounts                             │
//! │  └── Non-empty order before billing                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order / Bill (trust their inputs, never fail)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::order::Order;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Number of digits in a contact number.
pub const CONTACT_DIGITS: usize = 11;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern compiles")
});

// =============================================================================
// String Validators
// =============================================================================

/// Rejects blank values.
pub fn validate_required(value: &str, field: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Strips everything but digits and checks the digit count.
///
/// ## Returns
/// The digits-only contact number.
///
/// ```rust
/// use cafe_core::validation::normalize_contact;
///
/// assert_eq!(normalize_contact("0300 123-4567").unwrap(), "03001234567");
/// assert!(normalize_contact("12345").is_err());
/// ```
pub fn normalize_contact(raw: &str) -> ValidationResult<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != CONTACT_DIGITS {
        return Err(ValidationError::InvalidFormat {
            field: "Contact number".to_string(),
            reason: format!("must be {} digits", CONTACT_DIGITS),
        });
    }
    Ok(digits)
}

/// Checks an email against a standard `local@domain.tld` pattern.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(ValidationError::InvalidFormat {
            field: "Email".to_string(),
            reason: "example: name@example.com".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates how many units of one item to add in a single action.
///
/// ## Rules
/// - 1 ≤ quantity ≤ [`MAX_ITEM_QUANTITY`] (50)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "Quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Parses discount or tip text into a non-negative amount.
///
/// Blank text means zero, matching an untouched input box.
pub fn parse_adjustment(text: &str) -> ValidationResult<Money> {
    if text.trim().is_empty() {
        return Ok(Money::zero());
    }

    let non_negative = || ValidationError::MustBeNonNegative {
        field: "Discount/Tip".to_string(),
    };
    let amount = Money::parse(text).map_err(|_| non_negative())?;
    if amount.is_negative() {
        return Err(non_negative());
    }
    Ok(amount)
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "Tax rate".to_string(),
            min: 0,
            max: 10000,
        });
    }
    Ok(())
}

// =============================================================================
// Order Validators
// =============================================================================

/// Refuses to bill an order with no line items.
pub fn validate_order_not_empty(order: &Order) -> CoreResult<()> {
    if order.is_empty() {
        return Err(CoreError::EmptyOrder);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CustomerRef;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("Ada", "Name").is_ok());
        assert!(validate_required("", "Name").is_err());
        assert!(validate_required("  \t", "Name").is_err());
    }

    #[test]
    fn test_normalize_contact() {
        assert_eq!(normalize_contact("03001234567").unwrap(), "03001234567");
        assert_eq!(normalize_contact("0300-123-4567").unwrap(), "03001234567");
        assert!(normalize_contact("0300123456").is_err());
        assert!(normalize_contact("030012345678").is_err());
        assert!(normalize_contact("phone").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("name@example.com").is_ok());
        assert!(validate_email("first.last+tag@mail.example.co").is_ok());
        assert!(validate_email("name@example").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("name example@x.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(50).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(51).is_err());
    }

    #[test]
    fn test_parse_adjustment() {
        assert_eq!(parse_adjustment("").unwrap(), Money::zero());
        assert_eq!(parse_adjustment("  ").unwrap(), Money::zero());
        assert_eq!(parse_adjustment("2.5").unwrap().cents(), 250);

        let err = parse_adjustment("-1").unwrap_err();
        assert_eq!(err.to_string(), "Discount/Tip must be a non-negative number.");
        assert!(parse_adjustment("lots").is_err());
        assert!(parse_adjustment("92233720368547758.07").is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(2000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }

    #[test]
    fn test_validate_order_not_empty() {
        let order = Order::new(CustomerRef {
            id: "c".to_string(),
            name: "Ada".to_string(),
        });
        assert!(matches!(
            validate_order_not_empty(&order),
            Err(CoreError::EmptyOrder)
        ));
    }
}
