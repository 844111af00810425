//! In-memory cart that outlives a single detail view.

use crate::catalog::ProductSummary;
use crate::checkout::{OrderCandidate, OrderSink};
use crate::config::{SheetConfig, MAX_QUANTITY_PER_LINE};
use crate::error::CommerceError;
use crate::ids::{OptionNo, ProductNo};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A cart entry, one per option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub option_no: OptionNo,
    pub product_no: ProductNo,
    pub product_name: String,
    pub option_name: String,
    /// Unit price.
    pub price: Money,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CartItem {
    pub fn line_total(&self) -> Money {
        self.price.saturating_multiply(self.quantity)
    }
}

/// Cart contents across product views.
///
/// Serializes to a plain snapshot so a front end can persist it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartStore {
    items: Vec<CartItem>,
    #[serde(default)]
    currency: Currency,
    #[serde(default = "default_max_quantity")]
    max_quantity: i64,
}

fn default_max_quantity() -> i64 {
    MAX_QUANTITY_PER_LINE
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

impl CartStore {
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
            max_quantity: MAX_QUANTITY_PER_LINE,
        }
    }

    /// Set the per-entry quantity ceiling.
    pub fn with_max_quantity(mut self, max_quantity: i64) -> Self {
        self.max_quantity = max_quantity.max(1);
        self
    }

    /// A cart that accepts whatever a session built from `config` confirms.
    pub fn for_sheet(config: &SheetConfig) -> Self {
        Self::new(config.currency).with_max_quantity(config.max_quantity_per_line)
    }

    pub fn max_quantity(&self) -> i64 {
        self.max_quantity
    }

    /// Add an item, merging into an existing entry for the same option.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The merged quantity would exceed the cart's ceiling
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CommerceError> {
        if item.quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(item.quantity));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.option_no == item.option_no) {
            let new_quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?;
            if new_quantity > self.max_quantity {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    self.max_quantity,
                ));
            }
            existing.quantity = new_quantity;
            return Ok(());
        }

        if item.quantity > self.max_quantity {
            return Err(CommerceError::QuantityExceedsLimit(
                item.quantity,
                self.max_quantity,
            ));
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove an entry. Returns whether one was removed.
    pub fn remove_item(&mut self, option_no: OptionNo) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.option_no != option_no);
        self.items.len() != before
    }

    /// Set an entry's quantity. Values below 1 are ignored.
    pub fn update_quantity(&mut self, option_no: OptionNo, quantity: i64) -> bool {
        if quantity < 1 {
            return false;
        }
        match self.items.iter_mut().find(|i| i.option_no == option_no) {
            Some(item) => {
                item.quantity = quantity.min(self.max_quantity);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, option_no: OptionNo) -> Option<&CartItem> {
        self.items.iter().find(|i| i.option_no == option_no)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units.
    pub fn total_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Total price, failing on overflow.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        let totals = self
            .items
            .iter()
            .map(|i| i.price.try_multiply(i.quantity))
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(totals.iter(), self.currency)
    }
}

impl OrderSink for CartStore {
    fn accept(
        &mut self,
        order: &OrderCandidate,
        product: &ProductSummary,
    ) -> Result<(), CommerceError> {
        // Validate the whole order before touching the cart.
        let mut staged = self.clone();
        for line in &order.lines {
            staged.add_item(CartItem {
                option_no: line.option_no,
                product_no: order.product_no,
                product_name: product.name.clone(),
                option_name: line.display_name.clone(),
                price: line.unit_price,
                quantity: line.quantity,
                image_url: product.primary_image_url(),
            })?;
        }
        *self = staged;

        info!(
            product_no = %order.product_no,
            lines = order.lines.len(),
            cart_items = self.items.len(),
            "order added to cart"
        );
        Ok(())
    }
}
