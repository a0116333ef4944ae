//! # Status Line
//!
//! Order subscriber that turns each event into a one-line status message and
//! hands it to the display task.
//!
//! ```text
//! Order::emit ──► NotificationHub ──► StatusForwarder::on_event
//!                                          │ format_status
//!                                          ▼
//!                              mpsc::UnboundedSender<String>
//!                                          │
//!                                          ▼
//!                              display task (prints "» ...")
//! ```
//!
//! Sending on an unbounded channel never waits, so order mutations are not
//! held up by the terminal.

use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;

use cafe_core::{Order, OrderEvent, OrderObserver};

/// Formats the status line for `event` on `order`.
///
/// ```text
/// ITEM_ADDED | Status=Building Order | Item=Pizza
/// BILL_GENERATED | Status=Building Order | Total=$12.50
/// ```
pub fn format_status(event: &OrderEvent, order: &Order) -> String {
    let mut line = format!("{} | Status={}", event.name(), order.status());
    if let Some(item) = event.item() {
        line.push_str(&format!(" | Item={}", item));
    }
    if let Some(total) = event.total() {
        line.push_str(&format!(" | Total={}", total));
    }
    line
}

/// Forwards formatted status lines to the display task.
#[derive(Debug, Clone)]
pub struct StatusForwarder {
    tx: UnboundedSender<String>,
}

impl StatusForwarder {
    pub fn new(tx: UnboundedSender<String>) -> Self {
        StatusForwarder { tx }
    }
}

impl OrderObserver for StatusForwarder {
    fn on_event(&self, event: &OrderEvent, order: &Order) {
        let line = format_status(event, order);
        // Display task gone means we are shutting down.
        if self.tx.send(line).is_err() {
            trace!(event = event.name(), "Status display closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use cafe_core::menu::MenuCatalog;
    use cafe_core::{CustomerRef, OrderStatus, DEFAULT_TAX_RATE};
    use tokio::sync::mpsc;

    fn order() -> Order {
        Order::new(CustomerRef {
            id: "c-1".to_string(),
            name: "Ada".to_string(),
        })
    }

    #[test]
    fn test_lines_follow_order_events() {
        let catalog = MenuCatalog::sample();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut order = order();
        order.subscribe(Arc::new(StatusForwarder::new(tx)));

        order.add_item(catalog.find("Pizza").unwrap().clone());
        order.update_status(OrderStatus::BuildingOrder);
        order.generate_bill(DEFAULT_TAX_RATE);

        let mut lines = Vec::new();
        while let Ok(line) = rx.try_recv() {
            lines.push(line);
        }
        assert_eq!(
            lines,
            vec![
                "ITEM_ADDED | Status=New | Item=Pizza",
                "STATUS_CHANGED | Status=Building Order",
                "TOTAL_CALCULATED | Status=Building Order | Total=$12.50",
                "BILL_GENERATED | Status=Building Order | Total=$12.50",
            ]
        );
    }

    #[test]
    fn test_closed_display_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut order = order();
        order.subscribe(Arc::new(StatusForwarder::new(tx)));
        order.clear();
        assert!(order.is_empty());
    }
}
