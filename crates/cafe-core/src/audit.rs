//! # Audit Log
//!
//! A subscriber that keeps every order event it sees and writes it to the
//! `tracing` log.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::event::OrderEvent;
use crate::hub::OrderObserver;
use crate::order::Order;
use crate::types::OrderStatus;

/// One audited event, with the order state at the moment it fired.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub recorded_at: DateTime<Utc>,
    pub order_id: String,
    pub status: OrderStatus,
    #[serde(flatten)]
    pub event: OrderEvent,
}

/// In-memory audit sink.
#[derive(Debug, Default)]
pub struct AuditLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the records.
    fn with_records<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[AuditRecord]) -> R,
    {
        let records = self.records.lock().expect("Audit mutex poisoned");
        f(&records)
    }

    /// Snapshot of everything recorded so far, oldest first.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.with_records(<[AuditRecord]>::to_vec)
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.with_records(|records| records.iter().map(|record| record.event.name()).collect())
    }

    pub fn len(&self) -> usize {
        self.with_records(<[AuditRecord]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OrderObserver for AuditLog {
    fn on_event(&self, event: &OrderEvent, order: &Order) {
        let record = AuditRecord {
            recorded_at: Utc::now(),
            order_id: order.id().to_string(),
            status: order.status(),
            event: event.clone(),
        };

        let payload = serde_json::to_string(&record.event).unwrap_or_default();
        info!(
            order_id = %record.order_id,
            status = %record.status,
            event = event.name(),
            %payload,
            "Order event"
        );

        self.records
            .lock()
            .expect("Audit mutex poisoned")
            .push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::menu::MenuCatalog;
    use crate::types::{CustomerRef, TaxRate};

    #[test]
    fn test_records_events_with_status() {
        let catalog = MenuCatalog::sample();
        let audit = Arc::new(AuditLog::new());
        let mut order = Order::new(CustomerRef {
            id: "c-9".to_string(),
            name: "Grace".to_string(),
        });
        order.subscribe(audit.clone());

        order.add_item(catalog.find("Latte").unwrap().clone());
        order.update_status(OrderStatus::BuildingOrder);
        order.generate_bill(TaxRate::default());

        assert_eq!(
            audit.event_names(),
            vec!["ITEM_ADDED", "STATUS_CHANGED", "TOTAL_CALCULATED", "BILL_GENERATED"]
        );

        let records = audit.records();
        assert_eq!(records[0].status, OrderStatus::New);
        // status is read after the change is applied
        assert_eq!(records[1].status, OrderStatus::BuildingOrder);
        assert!(records.iter().all(|r| r.order_id == order.id()));
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = AuditRecord {
            recorded_at: Utc::now(),
            order_id: "o-1".to_string(),
            status: OrderStatus::New,
            event: OrderEvent::OrderCleared,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["orderId"], "o-1");
        assert_eq!(json["event"], "ORDER_CLEARED");
    }
}
