//! # cafe-core: Ordering and Billing Logic for the Cafe Counter
//!
//! This crate holds everything the counter knows about menus, orders and
//! bills. It performs no terminal or file I/O; callers hand it text and get
//! typed values back.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cafe Counter Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 cafe-counter (terminal app)                     │   │
//! │  │     customer ──► menu ──► add ──► bill ──► pay ──► history      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cafe-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   menu    │  │   order   │  │   bill    │  │ customer  │  │   │
//! │  │   │ MenuItem  │  │   Order   │  │   Bill    │  │ Customer  │  │   │
//! │  │   │ Catalog   │  │  events   │  │  Money    │  │  history  │  │   │
//! │  │   └───────────┘  └─────┬─────┘  └───────────┘  └───────────┘  │   │
//! │  │                        │ notify                                 │   │
//! │  │                  ┌─────▼─────┐                                  │   │
//! │  │                  │    hub    │──► AuditLog, status line, ...    │   │
//! │  │                  └───────────┘                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`menu`] - Menu items (food, drink, combo) and the catalog
//! - [`order`] - The order ledger and its state
//! - [`bill`] - Subtotal, tax, discount, tip and final amount
//! - [`hub`] / [`event`] - Change notifications for order subscribers
//! - [`customer`] - Customer accounts and order history
//! - [`checkout`] - The counter workflow on top of an order
//! - [`audit`] - A subscriber that records every event
//! - [`money`] - Integer-cent money
//! - [`error`] / [`validation`] - Typed errors and input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use cafe_core::menu::MenuCatalog;
//! use cafe_core::customer::Customer;
//! use cafe_core::DEFAULT_TAX_RATE;
//!
//! let catalog = MenuCatalog::sample();
//! let customer = Customer::new("c-1", "Ada", "03001234567", "ada@example.com");
//!
//! let mut order = customer.open_order();
//! order.add_item(catalog.find("Pizza").unwrap().clone());
//! order.add_item(catalog.find("Coke").unwrap().clone());
//!
//! // $14.50 subtotal + 20% tax
//! let bill = order.generate_bill(DEFAULT_TAX_RATE);
//! assert_eq!(bill.final_amount().cents(), 1740);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod audit;
pub mod bill;
pub mod checkout;
pub mod customer;
pub mod error;
pub mod event;
pub mod hub;
pub mod menu;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use audit::AuditLog;
pub use bill::Bill;
pub use checkout::Checkout;
pub use customer::Customer;
pub use error::{CoreError, CoreResult, ValidationError};
pub use event::OrderEvent;
pub use hub::{NotificationHub, OrderObserver};
pub use menu::{MenuCatalog, MenuItem};
pub use money::Money;
pub use order::Order;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax rate applied when none is configured (20%).
pub const DEFAULT_TAX_RATE: TaxRate = TaxRate::from_bps(2000);

/// Maximum units of one item added in a single action
///
/// ## Business Reason
/// Catches a mistyped quantity (500 instead of 5) before it reaches the bill.
pub const MAX_ITEM_QUANTITY: i64 = 50;
