//! # Order Module
//!
//! The order ledger: a cart of line items, a status, and the hub that hears
//! about every change.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation            Effect                       Event                │
//! │  ─────────            ──────                       ─────                │
//! │  add_item(item)       push one unit                ITEM_ADDED           │
//! │  remove_one(item)     drop first equal unit        ITEM_REMOVED (if hit)│
//! │  clear()              drop all units               ORDER_CLEARED        │
//! │  calculate_total()    cache Σ unit prices          TOTAL_CALCULATED     │
//! │  generate_bill(rate)  total → Bill                 BILL_GENERATED       │
//! │  update_status(s)     overwrite status             STATUS_CHANGED       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these fail. Status is not consulted by any of them: the workflow
//! that decides when an order is building, billed or paid lives in
//! [`crate::checkout`].
//!
//! ## Line Items
//! One entry per unit. Adding three Cokes pushes three `Arc`s pointing at the
//! same catalog item; there is no quantity field at this layer.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::bill::Bill;
use crate::event::OrderEvent;
use crate::hub::{NotificationHub, OrderObserver};
use crate::menu::MenuItem;
use crate::money::Money;
use crate::types::{CustomerRef, OrderStatus, TaxRate};

/// An in-progress (or archived) customer order.
#[derive(Debug)]
pub struct Order {
    id: String,
    customer: CustomerRef,
    items: Vec<Arc<MenuItem>>,
    status: OrderStatus,
    total: Money,
    created_at: DateTime<Utc>,
    hub: NotificationHub,
}

/// Units of one menu item grouped for cart display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSummary {
    pub item: Arc<MenuItem>,
    pub quantity: usize,
    pub line_total: Money,
}

impl Order {
    /// Opens an empty order for `customer` with status `New`.
    pub fn new(customer: CustomerRef) -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            customer,
            items: Vec::new(),
            status: OrderStatus::New,
            total: Money::zero(),
            created_at: Utc::now(),
            hub: NotificationHub::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer(&self) -> &CustomerRef {
        &self.customer
    }

    pub fn items(&self) -> &[Arc<MenuItem>] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Subtotal as of the last `calculate_total` call.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn hub(&self) -> &NotificationHub {
        &self.hub
    }

    /// See [`NotificationHub::subscribe`].
    pub fn subscribe(&mut self, observer: Arc<dyn OrderObserver>) -> bool {
        self.hub.subscribe(observer)
    }

    /// See [`NotificationHub::unsubscribe`].
    pub fn unsubscribe<O>(&mut self, observer: &Arc<O>) -> bool
    where
        O: OrderObserver + ?Sized,
    {
        self.hub.unsubscribe(observer)
    }

    pub(crate) fn emit(&self, event: OrderEvent) {
        self.hub.notify(&event, self);
    }

    /// Appends one unit of `item`.
    pub fn add_item(&mut self, item: Arc<MenuItem>) {
        debug!(order_id = %self.id, item = item.name(), "Item added");
        let event = OrderEvent::ItemAdded {
            item: item.name().to_string(),
            price: item.price(),
        };
        self.items.push(item);
        self.emit(event);
    }

    /// Removes the first unit structurally equal to `item`.
    ///
    /// Returns `false`, without emitting anything, when no unit matches.
    pub fn remove_one(&mut self, item: &MenuItem) -> bool {
        let Some(position) = self.items.iter().position(|unit| **unit == *item) else {
            debug!(order_id = %self.id, item = item.name(), "Item not in order");
            return false;
        };

        let removed = self.items.remove(position);
        debug!(order_id = %self.id, item = removed.name(), "Item removed");
        self.emit(OrderEvent::ItemRemoved {
            item: removed.name().to_string(),
        });
        true
    }

    /// Drops every line item.
    pub fn clear(&mut self) {
        debug!(order_id = %self.id, dropped = self.items.len(), "Order cleared");
        self.items.clear();
        self.emit(OrderEvent::OrderCleared);
    }

    /// Recomputes and caches the subtotal: the sum of every unit's price.
    pub fn calculate_total(&mut self) -> Money {
        self.total = self.items.iter().map(|item| item.price()).sum();
        self.emit(OrderEvent::TotalCalculated { total: self.total });
        self.total
    }

    /// Builds a bill for the current contents at `tax_rate`.
    ///
    /// An empty order yields a zero bill; rejecting that is the caller's job.
    pub fn generate_bill(&mut self, tax_rate: TaxRate) -> Bill {
        let total = self.calculate_total();
        let bill = Bill::compute(&self.id, &self.customer.name, total, tax_rate);
        self.emit(OrderEvent::BillGenerated {
            total,
            tax: bill.tax(),
        });
        bill
    }

    /// Overwrites the status unconditionally.
    pub fn update_status(&mut self, status: OrderStatus) {
        let from = self.status;
        self.status = status;
        info!(order_id = %self.id, %from, to = %status, "Order status changed");
        self.emit(OrderEvent::StatusChanged { from, to: status });
    }

    /// Groups units by item, in the order each item was first added.
    pub fn line_summary(&self) -> Vec<LineSummary> {
        let mut lines: Vec<LineSummary> = Vec::new();
        for unit in &self.items {
            match lines.iter_mut().find(|line| *line.item == **unit) {
                Some(line) => {
                    line.quantity += 1;
                    line.line_total += unit.price();
                }
                None => lines.push(LineSummary {
                    item: unit.clone(),
                    quantity: 1,
                    line_total: unit.price(),
                }),
            }
        }
        lines
    }
}
