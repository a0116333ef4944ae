//! # Bill Module
//!
//! Pure bill arithmetic: tax on a subtotal, then discount and tip.
//!
//! ## Bill Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal ──► × tax rate ──► tax                                        │
//! │                                                                         │
//! │  final = subtotal + tax − discount + tip                                │
//! │                                                                         │
//! │  • discount and tip are clamped to ≥ 0 on the way in                    │
//! │  • final is NOT clamped; a discount larger than subtotal + tax makes    │
//! │    it negative and the checkout layer must refuse that bill             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cafe_core::bill::Bill;
//! use cafe_core::money::Money;
//! use cafe_core::types::TaxRate;
//!
//! let mut bill = Bill::compute("order-1", "Ada", Money::from_cents(1250), TaxRate::from_bps(2000));
//! assert_eq!(bill.final_amount().cents(), 1500);
//!
//! bill.apply_tip(Money::from_cents(100));
//! assert_eq!(bill.final_amount().cents(), 1600);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::TaxRate;

/// A computed bill for one order snapshot.
///
/// A bill is never updated when its order changes; callers discard it and
/// generate a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    order_id: String,
    payer_name: String,
    subtotal: Money,
    tax: Money,
    discount: Money,
    tip: Money,
    final_amount: Money,
}

impl Bill {
    /// Computes tax on `subtotal` and a final amount with no adjustments.
    pub fn compute(
        order_id: impl Into<String>,
        payer_name: impl Into<String>,
        subtotal: Money,
        tax_rate: TaxRate,
    ) -> Self {
        let tax = subtotal.calculate_tax(tax_rate);
        Bill {
            order_id: order_id.into(),
            payer_name: payer_name.into(),
            subtotal,
            tax,
            discount: Money::zero(),
            tip: Money::zero(),
            final_amount: subtotal + tax,
        }
    }

    /// Sets the discount (negative input counts as zero).
    ///
    /// The result is not capped: a discount above `subtotal + tax` leaves a
    /// negative final amount for the caller to reject.
    pub fn apply_discount(&mut self, amount: Money) {
        self.discount = amount.non_negative();
        self.recompute();
    }

    /// Sets the tip (negative input counts as zero).
    pub fn apply_tip(&mut self, amount: Money) {
        self.tip = amount.non_negative();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.final_amount = self.subtotal + self.tax - self.discount + self.tip;
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn payer_name(&self) -> &str {
        &self.payer_name
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn tax(&self) -> Money {
        self.tax
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    pub fn tip(&self) -> Money {
        self.tip
    }

    pub fn final_amount(&self) -> Money {
        self.final_amount
    }

    /// Whether the amount due is non-negative.
    pub fn is_payable(&self) -> bool {
        !self.final_amount.is_negative()
    }

    /// Multi-line breakdown suitable for direct display.
    ///
    /// ```text
    /// --- Bill for Order 5f0c... ---
    /// Customer: Ada
    /// Total Amount: $12.50
    /// Tax: $2.50
    /// Discount: $0.00
    /// Tip: $0.00
    /// Final Amount: $15.00
    /// ```
    pub fn render(&self) -> String {
        format!(
            "--- Bill for Order {} ---\n\
             Customer: {}\n\
             Total Amount: {}\n\
             Tax: {}\n\
             Discount: {}\n\
             Tip: {}\n\
             Final Amount: {}\n",
            self.order_id,
            self.payer_name,
            self.subtotal,
            self.tax,
            self.discount,
            self.tip,
            self.final_amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pizza_bill() -> Bill {
        Bill::compute("order-1", "Ada", Money::from_cents(1250), TaxRate::from_bps(2000))
    }

    #[test]
    fn test_compute() {
        let bill = pizza_bill();
        assert_eq!(bill.subtotal().cents(), 1250);
        assert_eq!(bill.tax().cents(), 250);
        assert_eq!(bill.final_amount().cents(), 1500);
        assert!(bill.discount().is_zero());
        assert!(bill.tip().is_zero());
    }

    #[test]
    fn test_discount_is_not_capped() {
        let mut bill = pizza_bill();
        bill.apply_discount(Money::from_cents(2000));
        assert_eq!(bill.final_amount().cents(), -500);
        assert!(!bill.is_payable());
    }

    #[test]
    fn test_negative_adjustments_clamp_to_zero() {
        let mut bill = pizza_bill();
        bill.apply_discount(Money::from_cents(-300));
        bill.apply_tip(Money::from_cents(-100));
        assert!(bill.discount().is_zero());
        assert!(bill.tip().is_zero());
        assert_eq!(bill.final_amount().cents(), 1500);
    }

    #[test]
    fn test_discount_and_tip_commute() {
        let discount = Money::from_cents(375);
        let tip = Money::from_cents(120);

        let mut discount_first = pizza_bill();
        discount_first.apply_discount(discount);
        discount_first.apply_tip(tip);

        let mut tip_first = pizza_bill();
        tip_first.apply_tip(tip);
        tip_first.apply_discount(discount);

        assert_eq!(discount_first.final_amount(), tip_first.final_amount());
        assert_eq!(discount_first.final_amount().cents(), 1500 - 375 + 120);
    }

    #[test]
    fn test_reapplying_replaces_previous_value() {
        let mut bill = pizza_bill();
        bill.apply_discount(Money::from_cents(500));
        bill.apply_discount(Money::from_cents(100));
        assert_eq!(bill.discount().cents(), 100);
        assert_eq!(bill.final_amount().cents(), 1400);
    }

    #[test]
    fn test_render() {
        let mut bill = pizza_bill();
        bill.apply_discount(Money::from_cents(50));
        bill.apply_tip(Money::from_cents(200));

        let expected = "--- Bill for Order order-1 ---\n\
                        Customer: Ada\n\
                        Total Amount: $12.50\n\
                        Tax: $2.50\n\
                        Discount: $0.50\n\
                        Tip: $2.00\n\
                        Final Amount: $16.50\n";
        assert_eq!(bill.render(), expected);
    }
}
