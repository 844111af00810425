//! Selection lines accumulated in the option sheet.

use std::collections::HashMap;

use crate::cart::{LinePricing, SelectionPricing};
use crate::catalog::OptionLeaf;
use crate::config::MAX_QUANTITY_PER_LINE;
use crate::ids::OptionNo;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One row of the shopper's in-progress selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionLine {
    /// Leaf this line buys.
    pub option_no: OptionNo,
    /// Composite label, e.g. "S / Blue (+1,000원)".
    pub display_name: String,
    /// Leaf's absolute price.
    pub unit_price: Money,
    /// Leaf's delta from the base price.
    pub add_price: Money,
    /// Always at least 1.
    pub quantity: i64,
}

impl SelectionLine {
    /// `unit_price * quantity`.
    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_multiply(self.quantity)
    }
}

/// Selection lines keyed by option number, in insertion order.
///
/// At most one line exists per option: picking the same leaf again bumps
/// its quantity.
#[derive(Debug, Clone)]
pub struct SelectionList {
    lines: HashMap<OptionNo, SelectionLine>,
    order: Vec<OptionNo>,
    currency: Currency,
    max_quantity: i64,
}

impl Default for SelectionList {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl SelectionList {
    pub fn new(currency: Currency) -> Self {
        Self {
            lines: HashMap::new(),
            order: Vec::new(),
            currency,
            max_quantity: MAX_QUANTITY_PER_LINE,
        }
    }

    /// Set the per-line quantity ceiling.
    pub fn with_max_quantity(mut self, max_quantity: i64) -> Self {
        self.max_quantity = max_quantity.max(1);
        self
    }

    /// Add a line for `leaf`, or bump its quantity if already present.
    ///
    /// Returns the resulting quantity.
    pub fn add_or_merge(&mut self, leaf: &OptionLeaf, first: &str, second: Option<&str>) -> i64 {
        if let Some(line) = self.lines.get_mut(&leaf.option_no) {
            line.quantity = (line.quantity.saturating_add(1)).min(self.max_quantity);
            return line.quantity;
        }

        let line = SelectionLine {
            option_no: leaf.option_no,
            display_name: format_display_name(first, second, leaf.add_price),
            unit_price: leaf.buy_price,
            add_price: leaf.add_price,
            quantity: 1,
        };
        self.insert(line);
        1
    }

    /// Add the single implicit line of a `DEFAULT` schema.
    ///
    /// The line is named after the product. Does nothing when the line
    /// already exists.
    pub fn add_fixed(&mut self, leaf: &OptionLeaf, product_name: &str) {
        if self.lines.contains_key(&leaf.option_no) {
            return;
        }
        self.insert(SelectionLine {
            option_no: leaf.option_no,
            display_name: product_name.to_string(),
            unit_price: leaf.buy_price,
            add_price: leaf.add_price,
            quantity: 1,
        });
    }

    fn insert(&mut self, line: SelectionLine) {
        self.order.push(line.option_no);
        self.lines.insert(line.option_no, line);
    }

    /// Adjust a line's quantity by `delta`, clamped to `1..=max`.
    ///
    /// Returns the new quantity, or `None` if the line does not exist.
    pub fn change_quantity(&mut self, option_no: OptionNo, delta: i64) -> Option<i64> {
        let max_quantity = self.max_quantity;
        let line = self.lines.get_mut(&option_no)?;
        let wanted = line.quantity.saturating_add(delta);
        let clamped = wanted.clamp(1, max_quantity);
        if clamped != wanted {
            debug!(option_no = %option_no, wanted, clamped, "quantity clamped");
        }
        line.quantity = clamped;
        Some(clamped)
    }

    /// Remove a line. Returns whether a line was removed.
    pub fn remove(&mut self, option_no: OptionNo) -> bool {
        if self.lines.remove(&option_no).is_none() {
            return false;
        }
        self.order.retain(|no| *no != option_no);
        true
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.order.clear();
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> impl Iterator<Item = &SelectionLine> + '_ {
        self.order.iter().filter_map(move |no| self.lines.get(no))
    }

    pub fn get(&self, option_no: OptionNo) -> Option<&SelectionLine> {
        self.lines.get(&option_no)
    }

    /// Whether any line buys one of `option_nos`.
    pub fn contains_any<'a>(&self, mut option_nos: impl Iterator<Item = &'a OptionNo>) -> bool {
        option_nos.any(|no| self.lines.contains_key(no))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Sum of `unit_price * quantity` over all lines, computed on demand.
    pub fn total(&self) -> Money {
        self.lines()
            .fold(Money::zero(self.currency), |acc, line| acc + line.line_total())
    }

    /// Total number of units across lines.
    pub fn item_count(&self) -> i64 {
        self.lines().map(|line| line.quantity).sum()
    }

    /// Per-line and total pricing, computed on demand.
    pub fn pricing(&self) -> SelectionPricing {
        SelectionPricing {
            lines: self
                .lines()
                .map(|line| LinePricing {
                    option_no: line.option_no,
                    display_name: line.display_name.clone(),
                    unit_price: line.unit_price,
                    quantity: line.quantity,
                    total: line.line_total(),
                })
                .collect(),
            total: self.total(),
            item_count: self.item_count(),
        }
    }
}

/// Build a line label from the picked values and the leaf's price delta.
///
/// `"S"`, `"S / Blue"`, `"S / Blue (+1,000원)"`, `"Basic (-500원)"`.
pub fn format_display_name(first: &str, second: Option<&str>, add_price: Money) -> String {
    let mut name = match second {
        Some(second) => format!("{} / {}", first, second),
        None => first.to_string(),
    };
    if !add_price.is_zero() {
        name.push_str(&format!(" ({})", add_price.display_delta()));
    }
    name
}
