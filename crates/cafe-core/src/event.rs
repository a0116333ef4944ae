//! # Order Events
//!
//! What an order tells its subscribers.
//!
//! ## Wire Shape
//! Events serialize adjacently tagged so a UI can switch on the name:
//! ```json
//! { "event": "ITEM_ADDED", "data": { "item": "Pizza", "price": 1250 } }
//! { "event": "ORDER_CLEARED" }
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::OrderStatus;

/// A change an order reports to its hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "event", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEvent {
    ItemAdded { item: String, price: Money },
    ItemRemoved { item: String },
    OrderCleared,
    TotalCalculated { total: Money },
    BillGenerated { total: Money, tax: Money },
    StatusChanged { from: OrderStatus, to: OrderStatus },
    OrderPlaced { customer: String },
}

impl OrderEvent {
    /// The event's wire name, e.g. `ITEM_ADDED`.
    pub fn name(&self) -> &'static str {
        match self {
            OrderEvent::ItemAdded { .. } => "ITEM_ADDED",
            OrderEvent::ItemRemoved { .. } => "ITEM_REMOVED",
            OrderEvent::OrderCleared => "ORDER_CLEARED",
            OrderEvent::TotalCalculated { .. } => "TOTAL_CALCULATED",
            OrderEvent::BillGenerated { .. } => "BILL_GENERATED",
            OrderEvent::StatusChanged { .. } => "STATUS_CHANGED",
            OrderEvent::OrderPlaced { .. } => "ORDER_PLACED",
        }
    }

    /// Item name carried by the event, if any.
    pub fn item(&self) -> Option<&str> {
        match self {
            OrderEvent::ItemAdded { item, .. } | OrderEvent::ItemRemoved { item } => Some(item),
            _ => None,
        }
    }

    /// Total carried by the event, if any.
    pub fn total(&self) -> Option<Money> {
        match self {
            OrderEvent::TotalCalculated { total } | OrderEvent::BillGenerated { total, .. } => {
                Some(*total)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let event = OrderEvent::ItemAdded {
            item: "Pizza".to_string(),
            price: Money::from_cents(1250),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "ITEM_ADDED");
        assert_eq!(json["data"]["item"], "Pizza");
        assert_eq!(json["data"]["price"], 1250);

        let json = serde_json::to_value(OrderEvent::OrderCleared).unwrap();
        assert_eq!(json["event"], "ORDER_CLEARED");

        let json = serde_json::to_value(OrderEvent::StatusChanged {
            from: OrderStatus::New,
            to: OrderStatus::BuildingOrder,
        })
        .unwrap();
        assert_eq!(json["data"]["to"], "building_order");
    }

    #[test]
    fn test_names_match_serialized_tag() {
        let events = [
            OrderEvent::ItemRemoved { item: "Coke".to_string() },
            OrderEvent::TotalCalculated { total: Money::zero() },
            OrderEvent::BillGenerated { total: Money::zero(), tax: Money::zero() },
            OrderEvent::OrderPlaced { customer: "Ada".to_string() },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["event"], event.name());
        }
    }

    #[test]
    fn test_accessors() {
        let event = OrderEvent::BillGenerated {
            total: Money::from_cents(1650),
            tax: Money::from_cents(330),
        };
        assert_eq!(event.total(), Some(Money::from_cents(1650)));
        assert_eq!(event.item(), None);
    }
}
