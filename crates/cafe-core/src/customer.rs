//! # Customer Module
//!
//! Customer identity plus the orders they have placed.
//!
//! ## Ownership
//! ```text
//! Customer ──owns──► Vec<Order> (history, append-only)
//!    ▲
//!    └── CustomerRef (id + name snapshot) held by each Order
//! ```
//! An order only references its customer by snapshot, so handing a finished
//! order to `place_order` moves it into the history without any cycle.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::event::OrderEvent;
use crate::order::Order;
use crate::types::CustomerRef;
use crate::validation::{normalize_contact, validate_email, validate_required};

/// A customer account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    id: String,
    name: String,
    contact: String,
    email: String,
    #[serde(skip)]
    history: Vec<Order>,
}

impl Customer {
    /// Creates a customer from fields the caller has already validated.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        contact: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Customer {
            id: id.into(),
            name: name.into(),
            contact: contact.into(),
            email: email.into(),
            history: Vec::new(),
        }
    }

    /// Validates raw form input and creates a customer with a fresh id.
    ///
    /// ## Rules
    /// - name must not be blank (it is trimmed)
    /// - contact must contain exactly 11 digits once separators are removed;
    ///   the stored contact is the digits only
    /// - email must look like `name@example.com`
    ///
    /// ```rust
    /// use cafe_core::customer::Customer;
    ///
    /// let ada = Customer::register(" Ada ", "0300-123 4567", "ada@example.com").unwrap();
    /// assert_eq!(ada.name(), "Ada");
    /// assert_eq!(ada.contact(), "03001234567");
    /// assert!(Customer::register("Ada", "12345", "ada@example.com").is_err());
    /// ```
    pub fn register(name: &str, contact: &str, email: &str) -> CoreResult<Self> {
        let name = name.trim();
        validate_required(name, "Name")?;
        let contact = normalize_contact(contact)?;
        let email = email.trim();
        validate_email(email)?;

        Ok(Customer::new(Uuid::new_v4().to_string(), name, contact, email))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// The reference an order keeps to this customer.
    pub fn to_ref(&self) -> CustomerRef {
        CustomerRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    /// Opens a new order for this customer.
    pub fn open_order(&self) -> Order {
        Order::new(self.to_ref())
    }

    /// Appends `order` to the history, whatever its status, and announces it
    /// with `ORDER_PLACED` through the order's own hub.
    pub fn place_order(&mut self, order: Order) {
        info!(
            customer_id = %self.id,
            order_id = %order.id(),
            status = %order.status(),
            "Order placed"
        );
        self.history.push(order);
        if let Some(placed) = self.history.last() {
            placed.emit(OrderEvent::OrderPlaced {
                customer: self.name.clone(),
            });
        }
    }

    /// Ids of placed orders, oldest first.
    ///
    /// The iterator is lazy and `Clone`; call again (or clone it) to walk the
    /// history a second time.
    pub fn view_order_history(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.history.iter().map(Order::id)
    }

    /// Alias of [`view_order_history`](Self::view_order_history).
    pub fn order_history(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.view_order_history()
    }

    pub fn orders(&self) -> &[Order] {
        &self.history
    }
}
