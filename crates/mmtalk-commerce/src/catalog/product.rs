//! Product summary and header pricing.

use crate::ids::ProductNo;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Product-level pricing, independent of option pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPricing {
    /// List price before the immediate discount.
    pub sale_price: Money,
    /// Discount applied at display time.
    pub immediate_discount_amt: Money,
}

impl ProductPricing {
    pub fn new(sale_price: Money, immediate_discount_amt: Money) -> Self {
        Self {
            sale_price,
            immediate_discount_amt,
        }
    }

    /// Check if the product shows a discount.
    pub fn is_discounted(&self) -> bool {
        self.discount_percent().is_some()
    }

    /// Rounded discount percentage for the header badge.
    ///
    /// `None` when there is no positive discount or no positive sale price.
    pub fn discount_percent(&self) -> Option<u32> {
        if !self.immediate_discount_amt.is_positive() || !self.sale_price.is_positive() {
            return None;
        }
        let ratio =
            self.immediate_discount_amt.amount as f64 / self.sale_price.amount as f64 * 100.0;
        Some(ratio.round() as u32)
    }

    /// Price after the immediate discount.
    pub fn final_price(&self) -> Money {
        self.sale_price - self.immediate_discount_amt
    }

    /// Header text, e.g. `20% 27,200원 (34,000원)`.
    pub fn headline(&self) -> String {
        match self.discount_percent() {
            Some(percent) => format!(
                "{}% {} ({})",
                percent,
                self.final_price().display(),
                self.sale_price.display()
            ),
            None => self.final_price().display(),
        }
    }
}

/// What the detail view needs to know about a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_no: ProductNo,
    pub name: String,
    pub brand: String,
    pub pricing: ProductPricing,
    pub image_urls: Vec<String>,
    pub review_rating: f64,
    pub review_count: i64,
    pub is_sold_out: bool,
}

impl ProductSummary {
    /// Create a summary with only the fields the option sheet relies on.
    pub fn new(product_no: ProductNo, name: impl Into<String>, pricing: ProductPricing) -> Self {
        Self {
            product_no,
            name: name.into(),
            brand: String::new(),
            pricing,
            image_urls: Vec::new(),
            review_rating: 0.0,
            review_count: 0,
            is_sold_out: false,
        }
    }

    /// First image, with protocol-relative URLs upgraded to https.
    pub fn primary_image_url(&self) -> Option<String> {
        self.image_urls.first().map(|url| absolute_url(url))
    }
}

fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}
