//! # Domain Types
//!
//! Small value types shared by the menu, order and billing modules.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │   OrderStatus   │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  New            │   │  Food           │       │
//! │  │  2000 = 20%     │   │  BuildingOrder  │   │  Drink          │       │
//! │  └─────────────────┘   │  PendingPayment │   │  Combo          │       │
//! │                        │  Paid           │   └─────────────────┘       │
//! │  ┌─────────────────┐   └─────────────────┘                             │
//! │  │  CustomerRef    │                                                    │
//! │  │  id, name       │  ◄── snapshot held by an Order (no ownership)     │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so the cafe's default 20% is 2000 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (configuration input only).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        crate::DEFAULT_TAX_RATE
    }
}

/// `2000` renders as `20%`, `825` as `8.25%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Menu Category
// =============================================================================

/// The three kinds of things the cafe sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Drink,
    Combo,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Food => "Food",
            Category::Drink => "Drink",
            Category::Combo => "Combo",
        };
        f.write_str(label)
    }
}

/// Case-insensitive, whitespace-tolerant: `" Food "` parses as `Food`.
impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Category::Food),
            "drink" => Ok(Category::Drink),
            "combo" => Ok(Category::Combo),
            _ => Err(CoreError::InvalidCategory(s.to_string())),
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Where an order sits in its lifecycle.
///
/// ## State Machine
/// ```text
///   ┌─────┐ add  ┌───────────────┐ bill ┌────────────────┐ pay ┌──────┐
///   │ New │─────►│ BuildingOrder │─────►│ PendingPayment │────►│ Paid │
///   └─────┘      └───────────────┘      └────────────────┘     └──────┘
///      ▲                 │                      │
///      └──── clear ──────┴──────────────────────┘
/// ```
///
/// The order itself accepts any transition through `update_status`; the
/// arrows are driven by the checkout workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// No items yet, or the cart was cleared.
    #[default]
    New,
    /// Items are being added.
    BuildingOrder,
    /// A bill was accepted and awaits payment.
    PendingPayment,
    /// Payment confirmed.
    Paid,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::New => "New",
            OrderStatus::BuildingOrder => "Building Order",
            OrderStatus::PendingPayment => "Pending Payment",
            OrderStatus::Paid => "Paid",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Customer Reference
// =============================================================================

/// Snapshot of the customer an order belongs to.
///
/// An order never owns its customer; it only needs the id for history
/// lookups and the name for the bill's payer line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_conversions() {
        let rate = TaxRate::from_percentage(20.0);
        assert_eq!(rate.bps(), 2000);
        assert!((TaxRate::from_bps(825).percentage() - 8.25).abs() < 0.001);
        assert_eq!(TaxRate::default(), TaxRate::from_bps(2000));
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::from_bps(2000).to_string(), "20%");
        assert_eq!(TaxRate::from_bps(825).to_string(), "8.25%");
        assert_eq!(TaxRate::zero().to_string(), "0%");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(" Food ".parse::<Category>().unwrap(), Category::Food);
        assert_eq!("DRINK".parse::<Category>().unwrap(), Category::Drink);
        assert_eq!("combo".parse::<Category>().unwrap(), Category::Combo);
        assert!(matches!(
            "dessert".parse::<Category>(),
            Err(CoreError::InvalidCategory(c)) if c == "dessert"
        ));
    }

    #[test]
    fn test_order_status_labels() {
        assert_eq!(OrderStatus::default(), OrderStatus::New);
        assert_eq!(OrderStatus::BuildingOrder.to_string(), "Building Order");
        assert_eq!(OrderStatus::PendingPayment.to_string(), "Pending Payment");
    }
}
