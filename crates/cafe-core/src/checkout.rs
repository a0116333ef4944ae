//! # Checkout Module
//!
//! The thin workflow layer between an operator and an [`Order`].
//!
//! ## Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Workflow                                │
//! │                                                                         │
//! │  start_order ──► add_to_cart ──► generate_bill ──► confirm_payment      │
//! │      │          (status:          (status:          (status: Paid,      │
//! │      │          BuildingOrder)    PendingPayment)   order → history)    │
//! │      │               │                 │                                │
//! │      │          remove_one        EmptyOrder? ───────► rejected         │
//! │      │          clear_cart        final < 0?  ───────► rejected         │
//! │      │          (status: New)     (no bill stored, status unchanged)    │
//! │      │                                                                  │
//! │  Any cart change discards the current bill.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The order underneath stays permissive; every rule here is enforced by
//! this layer only.
//!
//! ## Usage
//! ```rust
//! use cafe_core::checkout::Checkout;
//! use cafe_core::customer::Customer;
//! use cafe_core::menu::MenuCatalog;
//! use cafe_core::money::Money;
//! use cafe_core::DEFAULT_TAX_RATE;
//!
//! let catalog = MenuCatalog::sample();
//! let customer = Customer::new("c-1", "Ada", "03001234567", "ada@example.com");
//! let mut checkout = Checkout::new(customer);
//!
//! checkout.start_order();
//! checkout.add_to_cart(catalog.find("Pizza").unwrap().clone(), 1).unwrap();
//! let bill = checkout.generate_bill(DEFAULT_TAX_RATE, Money::zero(), Money::zero()).unwrap();
//! assert_eq!(bill.final_amount().cents(), 1500);
//!
//! checkout.confirm_payment().unwrap();
//! assert_eq!(checkout.customer().orders().len(), 1);
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::bill::Bill;
use crate::customer::Customer;
use crate::error::{CoreError, CoreResult};
use crate::hub::OrderObserver;
use crate::menu::MenuItem;
use crate::money::Money;
use crate::order::Order;
use crate::types::{OrderStatus, TaxRate};
use crate::validation::{validate_order_not_empty, validate_quantity};

/// One customer's ordering session at the counter.
pub struct Checkout {
    customer: Customer,
    order: Option<Order>,
    bill: Option<Bill>,
    observers: Vec<Arc<dyn OrderObserver>>,
}

impl Checkout {
    /// Starts a session with no open order.
    pub fn new(customer: Customer) -> Self {
        Checkout {
            customer,
            order: None,
            bill: None,
            observers: Vec::new(),
        }
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    /// Direct access to the open order. Discards the current bill, since
    /// the caller may change the cart through it.
    pub fn order_mut(&mut self) -> Option<&mut Order> {
        self.bill = None;
        self.order.as_mut()
    }

    /// The accepted bill, if one is current.
    pub fn bill(&self) -> Option<&Bill> {
        self.bill.as_ref()
    }

    /// Registers a subscriber for every order this session opens, including
    /// the one already open.
    pub fn subscribe(&mut self, observer: Arc<dyn OrderObserver>) {
        if let Some(order) = self.order.as_mut() {
            order.subscribe(observer.clone());
        }
        if !self
            .observers
            .iter()
            .any(|existing| std::ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(&observer)))
        {
            self.observers.push(observer);
        }
    }

    /// Opens a fresh order, replacing any unpaid one.
    pub fn start_order(&mut self) -> &mut Order {
        let mut order = self.customer.open_order();
        for observer in &self.observers {
            order.subscribe(observer.clone());
        }
        info!(customer_id = %self.customer.id(), order_id = %order.id(), "Order started");

        self.bill = None;
        self.order.insert(order)
    }

    fn active_order(&mut self) -> CoreResult<&mut Order> {
        self.order.as_mut().ok_or(CoreError::NoActiveOrder)
    }

    /// Adds `quantity` units of `item` and marks the order as being built.
    pub fn add_to_cart(&mut self, item: Arc<MenuItem>, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;
        let order = self.active_order()?;
        for _ in 0..quantity {
            order.add_item(item.clone());
        }
        order.update_status(OrderStatus::BuildingOrder);
        self.bill = None;
        Ok(())
    }

    /// Removes one unit of `item`. `Ok(false)` means it was not in the cart.
    pub fn remove_one(&mut self, item: &MenuItem) -> CoreResult<bool> {
        let removed = self.active_order()?.remove_one(item);
        self.bill = None;
        Ok(removed)
    }

    /// Empties the cart and puts the order back to `New`.
    pub fn clear_cart(&mut self) -> CoreResult<()> {
        let order = self.active_order()?;
        order.clear();
        order.update_status(OrderStatus::New);
        self.bill = None;
        Ok(())
    }

    /// Bills the open order with the given adjustments.
    ///
    /// ## Errors
    /// - `EmptyOrder` when the cart has no items; no bill is built
    /// - `NegativeFinalAmount` when the discount exceeds subtotal + tax + tip
    ///
    /// On error the previous bill and status are left as they were.
    pub fn generate_bill(
        &mut self,
        tax_rate: TaxRate,
        discount: Money,
        tip: Money,
    ) -> CoreResult<&Bill> {
        let order = self.active_order()?;
        validate_order_not_empty(order)?;

        let mut bill = order.generate_bill(tax_rate);
        bill.apply_discount(discount);
        bill.apply_tip(tip);

        if !bill.is_payable() {
            warn!(
                order_id = %bill.order_id(),
                final_amount = %bill.final_amount(),
                "Bill rejected: final amount is negative"
            );
            return Err(CoreError::NegativeFinalAmount {
                final_amount: bill.final_amount(),
            });
        }

        order.update_status(OrderStatus::PendingPayment);
        debug!(order_id = %bill.order_id(), final_amount = %bill.final_amount(), "Bill accepted");
        Ok(self.bill.insert(bill))
    }

    /// Marks the order paid and files it in the customer's history.
    ///
    /// ## Returns
    /// The id of the placed order. The session has no open order afterwards.
    pub fn confirm_payment(&mut self) -> CoreResult<String> {
        if self.order.is_none() {
            return Err(CoreError::NoActiveOrder);
        }
        let Some(bill) = self.bill.take() else {
            return Err(CoreError::BillRequired);
        };
        let Some(mut order) = self.order.take() else {
            return Err(CoreError::NoActiveOrder);
        };

        order.update_status(OrderStatus::Paid);
        let order_id = order.id().to_string();
        info!(
            order_id = %order_id,
            amount = %bill.final_amount(),
            "Payment confirmed"
        );
        self.customer.place_order(order);
        Ok(order_id)
    }
}
