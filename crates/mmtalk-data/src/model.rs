//! Catalog wire payloads and their conversion into domain types.

use mmtalk_commerce::catalog::raw::null_as_default;
use mmtalk_commerce::catalog::{
    OptionSchema, PageMeta, ProductPricing, ProductSummary, RawOptionSchema,
};
use mmtalk_commerce::{CommerceError, Currency, Money, ProductNo};
use serde::{Deserialize, Serialize};

/// A product as returned by `product` and `products`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub product_no: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sale_price: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub immediate_discount_amt: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub list_image_urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_review_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_sold_out: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub like_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sale_cnt: i64,
    #[serde(default)]
    pub sale_status_type: Option<String>,
}

impl ProductPayload {
    pub fn pricing(&self, currency: Currency) -> ProductPricing {
        ProductPricing::new(
            Money::new(self.sale_price, currency),
            Money::new(self.immediate_discount_amt, currency),
        )
    }

    /// Convert into the summary the detail view works with.
    ///
    /// Detail images are preferred; list thumbnails fill in when absent.
    pub fn into_summary(self, currency: Currency) -> ProductSummary {
        let pricing = self.pricing(currency);
        let image_urls = if self.image_urls.is_empty() {
            self.list_image_urls
        } else {
            self.image_urls
        };
        ProductSummary {
            product_no: ProductNo::new(self.product_no),
            name: self.product_name,
            brand: self.brand_name,
            pricing,
            image_urls,
            review_rating: self.review_rating,
            review_count: self.total_review_count,
            is_sold_out: self.is_sold_out,
        }
    }
}

/// Free-text input a product asks for at purchase time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionInputPayload {
    pub input_no: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub input_label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub input_matching_type: String,
    #[serde(default)]
    pub required: bool,
}

/// The `productOption` payload: the raw schema plus product-level pricing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionPayload {
    pub product_no: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_sale_price: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub immediate_discount_amt: i64,
    #[serde(default)]
    pub select_type: Option<String>,
    #[serde(flatten)]
    pub schema: RawOptionSchema,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inputs: Vec<OptionInputPayload>,
}

impl ProductOptionPayload {
    /// Normalize the schema into its tagged form.
    pub fn into_schema(self, currency: Currency) -> Result<OptionSchema, CommerceError> {
        OptionSchema::from_raw(self.schema, currency)
    }
}

/// The `products` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<ProductPayload>,
    pub meta: PageMeta,
}

impl ProductListPayload {
    pub fn into_page(self, currency: Currency) -> (PageMeta, Vec<ProductSummary>) {
        let products = self
            .products
            .into_iter()
            .map(|product| product.into_summary(currency))
            .collect();
        (self.meta, products)
    }
}

/// `data` of the `GetProduct` operation.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductData {
    pub product: Option<ProductPayload>,
}

/// `data` of the `GetProductOption` operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionData {
    pub product_option: Option<ProductOptionPayload>,
}

/// `data` of the `GetProducts` operation.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsData {
    pub products: ProductListPayload,
}
