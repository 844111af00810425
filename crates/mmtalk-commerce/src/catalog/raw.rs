//! Option schema as delivered by the catalog.
//!
//! These mirror the catalog payload field-for-field. Nothing here is
//! validated; [`OptionSchema::from_raw`](crate::catalog::OptionSchema::from_raw)
//! turns them into the tagged form the rest of the engine works with.

use serde::{Deserialize, Deserializer, Serialize};

/// Raw option schema for one product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOptionSchema {
    /// Declared schema type: `DEFAULT`, `REQUIRED` or `COMBINATION`.
    #[serde(rename = "type")]
    pub option_type: String,
    /// Selector labels (first, second).
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flat_options: Vec<RawOptionLeaf>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub multi_level_options: Vec<RawOptionNode>,
}

/// Raw purchasable option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOptionLeaf {
    pub option_no: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(default)]
    pub add_price: i64,
    #[serde(default)]
    pub buy_price: i64,
    #[serde(default)]
    pub stock_cnt: i64,
    #[serde(default)]
    pub sale_cnt: i64,
    #[serde(default)]
    pub reservation_stock_cnt: i64,
    #[serde(default)]
    pub option_management_cd: Option<String>,
    #[serde(default)]
    pub is_required_option: bool,
    #[serde(default)]
    pub main: bool,
    #[serde(default)]
    pub sale_type: Option<String>,
    #[serde(default)]
    pub forced_sold_out: bool,
}

/// Raw first-level option node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOptionNode {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(default)]
    pub is_required_option: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<RawOptionLeaf>,
}

/// The catalog sends `null` for empty lists and blank strings.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_shape() {
        let json = r#"{
            "type": "COMBINATION",
            "labels": ["사이즈", "색상"],
            "flatOptions": [],
            "multiLevelOptions": [{
                "label": "사이즈",
                "value": "S",
                "isRequiredOption": false,
                "children": [{
                    "optionNo": 1, "label": "색상", "value": "Red",
                    "addPrice": 0, "buyPrice": 30000, "stockCnt": 5,
                    "forcedSoldOut": false
                }]
            }]
        }"#;

        let raw: RawOptionSchema = serde_json::from_str(json).unwrap();
        assert_eq!(raw.option_type, "COMBINATION");
        assert_eq!(raw.labels.len(), 2);
        assert_eq!(raw.multi_level_options[0].children[0].buy_price, 30000);
    }

    #[test]
    fn test_missing_arrays_default_to_empty() {
        let raw: RawOptionSchema = serde_json::from_str(r#"{"type": "DEFAULT"}"#).unwrap();
        assert!(raw.flat_options.is_empty());
        assert!(raw.multi_level_options.is_empty());
        assert!(raw.labels.is_empty());
    }

    #[test]
    fn test_null_children_are_empty() {
        let node: RawOptionNode =
            serde_json::from_str(r#"{"value": "S", "children": null, "label": null}"#).unwrap();
        assert!(node.children.is_empty());
        assert_eq!(node.label, "");
    }
}
