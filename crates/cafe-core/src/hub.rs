//! # Notification Hub
//!
//! The subscriber registry each order carries.
//!
//! ## Delivery Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  order.add_item(pizza)                                                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  hub.notify(ITEM_ADDED, &order)                                         │
//! │        │                                                                │
//! │        ├──► subscriber #1 .on_event()   (runs to completion)            │
//! │        ├──► subscriber #2 .on_event()                                   │
//! │        └──► ...                         in subscription order           │
//! │                                                                         │
//! │  add_item returns only after every subscriber has returned.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Subscribers are compared by `Arc` address, never by value. Subscribing the
//! same `Arc` twice is a no-op; two distinct `Arc`s of equal content are two
//! subscribers.
//!
//! Observers receive `&Order`, so a callback cannot reach the hub mutably
//! while a notification is in flight.

use std::fmt;
use std::ptr;
use std::sync::Arc;

use crate::event::OrderEvent;
use crate::order::Order;

/// Something that wants to hear about order changes.
///
/// Implementations must return quickly. A subscriber that feeds a UI should
/// hand the event to the UI's own queue instead of doing work inline.
pub trait OrderObserver: Send + Sync {
    fn on_event(&self, event: &OrderEvent, order: &Order);
}

/// Ordered set of subscribers with identity-based de-duplication.
#[derive(Clone, Default)]
pub struct NotificationHub {
    subscribers: Vec<Arc<dyn OrderObserver>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `observer` unless that same `Arc` is already subscribed.
    ///
    /// Returns `true` if it was added.
    pub fn subscribe(&mut self, observer: Arc<dyn OrderObserver>) -> bool {
        if self.contains(&observer) {
            return false;
        }
        self.subscribers.push(observer);
        true
    }

    /// Removes `observer` if subscribed. Returns `true` if it was removed.
    pub fn unsubscribe<O>(&mut self, observer: &Arc<O>) -> bool
    where
        O: OrderObserver + ?Sized,
    {
        let before = self.subscribers.len();
        self.subscribers
            .retain(|existing| !ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(observer)));
        self.subscribers.len() != before
    }

    pub fn contains<O>(&self, observer: &Arc<O>) -> bool
    where
        O: OrderObserver + ?Sized,
    {
        self.subscribers
            .iter()
            .any(|existing| ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(observer)))
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Delivers `event` to every subscriber, synchronously and in order.
    pub fn notify(&self, event: &OrderEvent, order: &Order) {
        for subscriber in &self.subscribers {
            subscriber.on_event(event, order);
        }
    }
}

impl fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationHub")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
