//! GraphQL documents and the request/response envelope.

use crate::FetchError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A named GraphQL operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphQlDocument {
    pub operation_name: &'static str,
    pub query: &'static str,
}

/// Single product detail.
pub const GET_PRODUCT: GraphQlDocument = GraphQlDocument {
    operation_name: "GetProduct",
    query: r#"query GetProduct($productNo: Int!) {
  product(productNo: $productNo) {
    productNo
    productName
    brandName
    salePrice
    immediateDiscountAmt
    imageUrls
    listImageUrls
    reviewRating
    totalReviewCount
    isSoldOut
    likeCount
    saleCnt
    saleStatusType
  }
}"#,
};

/// One page of the product listing.
pub const GET_PRODUCTS: GraphQlDocument = GraphQlDocument {
    operation_name: "GetProducts",
    query: r#"query GetProducts($limit: Int = 20, $page: Int = 1) {
  products(limit: $limit, page: $page) {
    products {
      productNo
      productName
      brandName
      salePrice
      immediateDiscountAmt
      listImageUrls
      imageUrls
      reviewRating
      totalReviewCount
      isSoldOut
      likeCount
      saleCnt
      saleStatusType
    }
    meta {
      totalCount
      page
      limit
      totalPage
    }
  }
}"#,
};

/// Option schema of one product.
pub const GET_PRODUCT_OPTION: GraphQlDocument = GraphQlDocument {
    operation_name: "GetProductOption",
    query: r#"query GetProductOption($productNo: Float!) {
  productOption(productNo: $productNo) {
    productNo
    productSalePrice
    immediateDiscountAmt
    selectType
    type
    labels
    flatOptions {
      optionNo
      label
      value
      addPrice
      buyPrice
      stockCnt
      saleCnt
      reservationStockCnt
      optionManagementCd
      isRequiredOption
      main
      saleType
      forcedSoldOut
    }
    multiLevelOptions {
      label
      value
      isRequiredOption
      children {
        optionNo
        label
        value
        addPrice
        buyPrice
        stockCnt
        saleCnt
        reservationStockCnt
        optionManagementCd
        isRequiredOption
        main
        saleType
        forcedSoldOut
      }
    }
    inputs {
      inputNo
      inputLabel
      inputMatchingType
      required
    }
  }
}"#,
};

/// Request body for a GraphQL POST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub operation_name: String,
    pub query: String,
    #[serde(default)]
    pub variables: serde_json::Value,
}

impl GraphQlRequest {
    pub fn new(document: &GraphQlDocument, variables: serde_json::Value) -> Self {
        Self {
            operation_name: document.operation_name.to_string(),
            query: document.query.to_string(),
            variables,
        }
    }
}

/// An entry of a response's `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

impl GraphQlError {
    /// Message with the response path appended, e.g. `Not found (path: product)`.
    pub fn describe(&self) -> String {
        if self.path.is_empty() {
            return self.message.clone();
        }
        let path = self
            .path
            .iter()
            .map(|p| match p {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".");
        format!("{} (path: {})", self.message, path)
    }
}

/// Response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

impl<T> GraphQlResponse<T> {
    /// Take the data, treating any reported error as a failure.
    pub fn into_data(self, operation: &str) -> Result<T, FetchError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            warn!(operation, errors = errors.len(), "GraphQL errors in response");
            return Err(FetchError::GraphQl(
                errors.iter().map(GraphQlError::describe).collect(),
            ));
        }
        self.data
            .ok_or_else(|| FetchError::MissingData(operation.to_string()))
    }
}
