//! Full counter cycle through the public API: register, order, bill, pay.

use std::sync::Arc;

use cafe_core::menu::MenuCatalog;
use cafe_core::{AuditLog, Checkout, CoreError, Customer, Money, OrderStatus, DEFAULT_TAX_RATE};

const MENU: &str = r#"{
    "items": [
        { "category": "food", "name": "Bagel", "price": "3.40", "description": "Toasted", "allergens": ["gluten"], "vegetarian": true },
        { "category": "drink", "name": "Tea", "price": 1.5, "description": "Black tea", "hot": true, "size": "Regular" },
        { "category": "combo", "name": "Breakfast", "price": "4.50", "description": "Bagel and tea", "components": ["Bagel", "Tea"] }
    ]
}"#;

#[test]
fn test_two_orders_end_up_in_history() {
    let catalog = MenuCatalog::from_json(MENU).unwrap();
    let customer = Customer::register("Grace", "0311-555-0101", "grace@example.com").unwrap();
    let audit = Arc::new(AuditLog::new());

    let mut checkout = Checkout::new(customer);
    checkout.subscribe(audit.clone());

    checkout.start_order();
    checkout
        .add_to_cart(catalog.find("breakfast").unwrap().clone(), 2)
        .unwrap();
    let bill = checkout
        .generate_bill(DEFAULT_TAX_RATE, Money::from_cents(100), Money::from_cents(50))
        .unwrap();
    // 9.00 + 1.80 tax - 1.00 + 0.50
    assert_eq!(bill.final_amount().cents(), 1030);
    assert!(bill.render().contains("Final Amount: $10.30"));
    let first = checkout.confirm_payment().unwrap();

    checkout.start_order();
    checkout.add_to_cart(catalog.find("Tea").unwrap().clone(), 1).unwrap();
    assert!(matches!(checkout.confirm_payment(), Err(CoreError::BillRequired)));
    checkout
        .generate_bill(DEFAULT_TAX_RATE, Money::zero(), Money::zero())
        .unwrap();
    let second = checkout.confirm_payment().unwrap();

    let customer = checkout.customer();
    let history: Vec<&str> = customer.view_order_history().collect();
    assert_eq!(history, vec![first.as_str(), second.as_str()]);
    assert!(customer
        .orders()
        .iter()
        .all(|order| order.status() == OrderStatus::Paid));

    let names = audit.event_names();
    assert_eq!(names.iter().filter(|name| **name == "ORDER_PLACED").count(), 2);
    assert_eq!(names.first(), Some(&"ITEM_ADDED"));
}

#[test]
fn test_discount_larger_than_bill_blocks_payment() {
    let catalog = MenuCatalog::from_json(MENU).unwrap();
    let customer = Customer::register("Grace", "03115550101", "grace@example.com").unwrap();
    let mut checkout = Checkout::new(customer);

    checkout.start_order();
    checkout.add_to_cart(catalog.find("Bagel").unwrap().clone(), 1).unwrap();
    let err = checkout
        .generate_bill(DEFAULT_TAX_RATE, Money::from_cents(1000), Money::zero())
        .unwrap_err();
    assert!(err.to_string().starts_with("Discount is too large."));
    assert!(checkout.confirm_payment().is_err());
    assert_eq!(checkout.customer().orders().len(), 0);
}
