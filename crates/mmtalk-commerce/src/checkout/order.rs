//! Order hand-off from the option sheet.

use crate::cart::SelectionList;
use crate::catalog::ProductSummary;
use crate::error::CommerceError;
use crate::ids::{OptionNo, ProductNo};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One purchasable line of a confirmed selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub option_no: OptionNo,
    pub quantity: i64,
    pub unit_price: Money,
    /// Label the line was shown with in the sheet.
    pub display_name: String,
}

impl OrderLine {
    pub fn total(&self) -> Money {
        self.unit_price.saturating_multiply(self.quantity)
    }
}

/// A finalized selection ready for the cart or order flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCandidate {
    pub product_no: ProductNo,
    pub lines: Vec<OrderLine>,
    pub total: Money,
}

impl OrderCandidate {
    /// Snapshot a selection list.
    ///
    /// The total is summed with checked arithmetic so an overflowing
    /// selection is refused rather than handed off with a wrong amount.
    pub fn from_selection(
        product_no: ProductNo,
        selection: &SelectionList,
    ) -> Result<Self, CommerceError> {
        let lines: Vec<OrderLine> = selection
            .lines()
            .map(|line| OrderLine {
                option_no: line.option_no,
                quantity: line.quantity,
                unit_price: line.unit_price,
                display_name: line.display_name.clone(),
            })
            .collect();

        let currency = selection.currency();
        let line_totals = lines
            .iter()
            .map(|line| line.unit_price.try_multiply(line.quantity))
            .collect::<Result<Vec<_>, _>>()?;
        let total = Money::try_sum(line_totals.iter(), currency)?;

        Ok(Self {
            product_no,
            lines,
            total,
        })
    }

    /// Total number of units.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Receiver of confirmed selections, e.g. a cart store or an order API.
pub trait OrderSink {
    /// Accept a confirmed selection for `product`.
    fn accept(&mut self, order: &OrderCandidate, product: &ProductSummary)
        -> Result<(), CommerceError>;
}

/// Sink that keeps every accepted order in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub orders: Vec<OrderCandidate>,
}

impl OrderSink for RecordingSink {
    fn accept(
        &mut self,
        order: &OrderCandidate,
        _product: &ProductSummary,
    ) -> Result<(), CommerceError> {
        self.orders.push(order.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{OptionLeaf, OptionStock};
    use crate::money::Currency;

    fn leaf(option_no: i64, buy_price: i64) -> OptionLeaf {
        OptionLeaf {
            option_no: OptionNo::new(option_no),
            label: String::new(),
            value: String::new(),
            add_price: Money::won(0),
            buy_price: Money::won(buy_price),
            is_required_option: false,
            stock: OptionStock::default(),
        }
    }

    #[test]
    fn test_candidate_from_selection() {
        let mut selection = SelectionList::new(Currency::KRW);
        selection.add_or_merge(&leaf(1, 30000), "S", Some("Red"));
        selection.add_or_merge(&leaf(2, 31000), "S", Some("Blue"));
        selection.add_or_merge(&leaf(2, 31000), "S", Some("Blue"));

        let order = OrderCandidate::from_selection(ProductNo::new(7), &selection).unwrap();
        assert_eq!(order.product_no, ProductNo::new(7));
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[1].quantity, 2);
        assert_eq!(order.lines[1].display_name, "S / Blue");
        assert_eq!(order.total, Money::won(92000));
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_overflowing_selection_is_refused() {
        let mut selection = SelectionList::new(Currency::KRW);
        selection.add_or_merge(&leaf(1, i64::MAX / 2), "A", None);
        selection.change_quantity(OptionNo::new(1), 5);

        let err = OrderCandidate::from_selection(ProductNo::new(1), &selection).unwrap_err();
        assert_eq!(err, CommerceError::Overflow);
    }
}
