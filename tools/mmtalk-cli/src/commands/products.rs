//! Walk the product listing feed.

use anyhow::{Context as _, Result};
use mmtalk_commerce::catalog::{ProductFeed, ProductSummary};
use serde::Serialize;

use super::ProductsArgs;
use crate::context::Context;

#[derive(Serialize)]
struct ProductRow<'a> {
    product_no: i64,
    name: &'a str,
    brand: &'a str,
    price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount_percent: Option<u32>,
    sold_out: bool,
}

impl<'a> ProductRow<'a> {
    fn new(product: &'a ProductSummary) -> Self {
        Self {
            product_no: product.product_no.get(),
            name: &product.name,
            brand: &product.brand,
            price: product.pricing.final_price().display(),
            discount_percent: product.pricing.discount_percent(),
            sold_out: product.is_sold_out,
        }
    }
}

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let (client, _) = ctx.catalog(&args.source)?;
    let mut feed = ProductFeed::new();

    for _ in 0..args.pages {
        if !feed.has_more() {
            break;
        }
        let added = client
            .load_next_page(&mut feed, args.limit)
            .await
            .with_context(|| format!("Failed to load page {}", feed.current_page() + 1))?;
        ctx.output.debug(&format!(
            "Page {}: {} new products",
            feed.current_page(),
            added
        ));
    }

    let rows: Vec<ProductRow> = feed.items().iter().map(ProductRow::new).collect();

    if ctx.output.is_json() {
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} products (page {}{})",
        rows.len(),
        feed.current_page(),
        if feed.has_more() { ", more available" } else { "" }
    ));
    for row in &rows {
        let badge = match row.discount_percent {
            Some(percent) => crate::output::discount_badge(percent),
            None => String::new(),
        };
        let name = if row.sold_out {
            crate::output::sold_out(row.name)
        } else {
            row.name.to_string()
        };
        ctx.output.table_row(
            &[&row.product_no.to_string(), &name, &row.price, &badge],
            &[8, 36, 12, 5],
        );
    }

    Ok(())
}
