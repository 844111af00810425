//! Option leaves and first-level option nodes.

use crate::catalog::raw::{RawOptionLeaf, RawOptionNode};
use crate::ids::OptionNo;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Availability figures reported by the catalog for one option.
///
/// Read-only: the engine reports them to the view but never reserves stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionStock {
    /// Units in stock.
    pub stock_cnt: i64,
    /// Units sold so far.
    pub sale_cnt: i64,
    /// Units held for reservations.
    pub reservation_stock_cnt: i64,
    /// Operator-forced sold-out flag.
    pub forced_sold_out: bool,
    /// Catalog sale type code (e.g. "AVAILABLE").
    pub sale_type: Option<String>,
}

impl OptionStock {
    /// Check if the option should be presented as sold out.
    pub fn is_sold_out(&self) -> bool {
        self.forced_sold_out || self.sale_type.as_deref() == Some("SOLD_OUT")
    }
}

/// A single purchasable, priced option unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionLeaf {
    /// Unique within one product's option schema.
    pub option_no: OptionNo,
    /// Label of the dimension this leaf belongs to (e.g. "색상").
    pub label: String,
    /// Value shown in the selector (e.g. "Blue").
    pub value: String,
    /// Signed delta from the product's base price.
    pub add_price: Money,
    /// Absolute price of this leaf, delta included.
    pub buy_price: Money,
    /// Whether the leaf belongs to a required group.
    pub is_required_option: bool,
    /// Availability as reported by the catalog.
    pub stock: OptionStock,
}

impl OptionLeaf {
    /// Build a leaf from its catalog form.
    pub fn from_raw(raw: RawOptionLeaf, currency: Currency) -> Self {
        Self {
            option_no: OptionNo::new(raw.option_no),
            label: raw.label,
            value: raw.value,
            add_price: Money::new(raw.add_price, currency),
            buy_price: Money::new(raw.buy_price, currency),
            is_required_option: raw.is_required_option,
            stock: OptionStock {
                stock_cnt: raw.stock_cnt,
                sale_cnt: raw.sale_cnt,
                reservation_stock_cnt: raw.reservation_stock_cnt,
                forced_sold_out: raw.forced_sold_out,
                sale_type: raw.sale_type,
            },
        }
    }

    pub fn is_sold_out(&self) -> bool {
        self.stock.is_sold_out()
    }
}

/// A first-level option node owning its second-level leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionNode {
    pub label: String,
    pub value: String,
    pub is_required_option: bool,
    pub children: Vec<OptionLeaf>,
}

impl OptionNode {
    /// Build a node from its catalog form.
    pub fn from_raw(raw: RawOptionNode, currency: Currency) -> Self {
        Self {
            label: raw.label,
            value: raw.value,
            is_required_option: raw.is_required_option,
            children: raw
                .children
                .into_iter()
                .map(|leaf| OptionLeaf::from_raw(leaf, currency))
                .collect(),
        }
    }

    /// Find a child leaf by value.
    pub fn child(&self, value: &str) -> Option<&OptionLeaf> {
        self.children.iter().find(|c| c.value == value)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
