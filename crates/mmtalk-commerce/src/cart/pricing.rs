//! Selection pricing breakdown.

use crate::ids::OptionNo;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Pricing for everything currently in the option sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionPricing {
    /// Per-line breakdown, in insertion order.
    pub lines: Vec<LinePricing>,
    /// Sum of line totals.
    pub total: Money,
    /// Total units across lines.
    pub item_count: i64,
}

impl SelectionPricing {
    /// Footer text, e.g. `총 3개 93,000원`.
    pub fn footer(&self) -> String {
        format!("총 {}개 {}", self.item_count, self.total.display())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Pricing for a single selection line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    pub option_no: OptionNo,
    pub display_name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// `unit_price * quantity`.
    pub total: Money,
}
