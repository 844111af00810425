//! Paged product feed for the listing page.

use std::collections::HashSet;

use crate::catalog::product::ProductSummary;
use crate::ids::ProductNo;
use serde::{Deserialize, Serialize};

/// Page metadata reported with each listing page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of products.
    pub total_count: i64,
    /// Page number (1-indexed).
    pub page: i64,
    /// Products per page.
    pub limit: i64,
    /// Total number of pages.
    pub total_page: i64,
}

/// Products accumulated across listing pages.
///
/// Pages may overlap when the catalog shifts between requests; a product
/// already in the feed is never appended twice.
#[derive(Debug, Clone, Default)]
pub struct ProductFeed {
    items: Vec<ProductSummary>,
    seen: HashSet<ProductNo>,
    current_page: i64,
    total_page: i64,
}

impl ProductFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page of products. Returns how many were new.
    ///
    /// A page at or below the current page is a late duplicate and is
    /// ignored.
    pub fn append_page(&mut self, meta: PageMeta, products: Vec<ProductSummary>) -> usize {
        if meta.page <= self.current_page {
            return 0;
        }

        let before = self.items.len();
        for product in products {
            if self.seen.insert(product.product_no) {
                self.items.push(product);
            }
        }
        self.current_page = meta.page;
        self.total_page = meta.total_page;
        self.items.len() - before
    }

    /// Whether another page can be requested.
    pub fn has_more(&self) -> bool {
        self.current_page == 0 || self.current_page < self.total_page
    }

    /// The page to request next, if any.
    pub fn next_page(&self) -> Option<i64> {
        self.has_more().then_some(self.current_page + 1)
    }

    pub fn items(&self) -> &[ProductSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product::ProductPricing;
    use crate::money::Money;

    fn product(no: i64) -> ProductSummary {
        ProductSummary::new(
            ProductNo::new(no),
            format!("Product {no}"),
            ProductPricing::new(Money::won(10000), Money::won(0)),
        )
    }

    fn meta(page: i64, total_page: i64) -> PageMeta {
        PageMeta {
            total_count: total_page * 2,
            page,
            limit: 2,
            total_page,
        }
    }

    #[test]
    fn test_empty_feed_wants_first_page() {
        let feed = ProductFeed::new();
        assert!(feed.has_more());
        assert_eq!(feed.next_page(), Some(1));
    }

    #[test]
    fn test_append_dedupes_by_product() {
        let mut feed = ProductFeed::new();
        assert_eq!(feed.append_page(meta(1, 3), vec![product(1), product(2)]), 2);
        assert_eq!(feed.append_page(meta(2, 3), vec![product(2), product(3)]), 1);

        let nos: Vec<i64> = feed.items().iter().map(|p| p.product_no.get()).collect();
        assert_eq!(nos, vec![1, 2, 3]);
        assert_eq!(feed.next_page(), Some(3));
    }

    #[test]
    fn test_stale_page_is_ignored() {
        let mut feed = ProductFeed::new();
        feed.append_page(meta(1, 2), vec![product(1)]);
        feed.append_page(meta(2, 2), vec![product(2)]);
        assert_eq!(feed.append_page(meta(1, 2), vec![product(9)]), 0);
        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn test_last_page_stops_feed() {
        let mut feed = ProductFeed::new();
        feed.append_page(meta(1, 1), vec![product(1)]);
        assert!(!feed.has_more());
        assert_eq!(feed.next_page(), None);
    }
}
