//! Option schema variants and the selector choices they expose.
//!
//! A product's options arrive in one of three shapes. The shape is decided
//! once, in [`OptionSchema::from_raw`], and every other operation matches on
//! the resulting variant instead of sniffing optional fields again.
//!
//! | Variant | First selector | Second selector |
//! |---|---|---|
//! | `Default` | none | none |
//! | `RequiredOptional` | required group | optional group |
//! | `Combination` flat | every leaf | none |
//! | `Combination` nested | top-level nodes | children of the picked node |

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::option::{OptionLeaf, OptionNode};
use crate::catalog::raw::RawOptionSchema;
use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// Declared schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    Default,
    Required,
    Combination,
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Default => "DEFAULT",
            OptionKind::Required => "REQUIRED",
            OptionKind::Combination => "COMBINATION",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        match s.trim().to_uppercase().as_str() {
            "DEFAULT" => Ok(OptionKind::Default),
            "REQUIRED" => Ok(OptionKind::Required),
            "COMBINATION" => Ok(OptionKind::Combination),
            _ => Err(CommerceError::UnknownOptionType(s.to_string())),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaves of a `COMBINATION` schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombinationOptions {
    /// One selector; every leaf is directly pickable.
    Flat(Vec<OptionLeaf>),
    /// Two selectors; each top-level node owns its priced children.
    Nested(Vec<OptionNode>),
}

/// Option schema for one product, in tagged form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionSchema {
    /// A single implicit option with no selection step.
    Default { leaf: OptionLeaf },
    /// Independent required and optional groups.
    RequiredOptional {
        labels: Vec<String>,
        required: Vec<OptionLeaf>,
        optional: Vec<OptionLeaf>,
    },
    /// Every valid pick maps to exactly one priced leaf.
    Combination {
        labels: Vec<String>,
        options: CombinationOptions,
    },
}

/// One entry of a selector menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceItem {
    /// Value the shopper picks.
    pub value: String,
    /// Price hint shown next to the value.
    pub add_price: Money,
    /// Whether the choice should render as sold out.
    pub sold_out: bool,
}

impl ChoiceItem {
    fn from_leaf(leaf: &OptionLeaf) -> Self {
        Self {
            value: leaf.value.clone(),
            add_price: leaf.add_price,
            sold_out: leaf.is_sold_out(),
        }
    }

    /// Menu text, e.g. `Blue (+1,000원)`; zero deltas show the value alone.
    pub fn display(&self) -> String {
        if self.add_price.is_zero() {
            self.value.clone()
        } else {
            format!("{} ({})", self.value, self.add_price.display_delta())
        }
    }
}

impl OptionSchema {
    /// Decide the schema variant from the declared type and the presence of
    /// nested children.
    pub fn from_raw(raw: RawOptionSchema, currency: Currency) -> Result<Self, CommerceError> {
        let kind = OptionKind::parse(&raw.option_type)?;
        let labels = raw.labels;

        let schema = match kind {
            OptionKind::Default => {
                let leaf = raw
                    .flat_options
                    .into_iter()
                    .next()
                    .ok_or(CommerceError::MissingDefaultOption)?;
                OptionSchema::Default {
                    leaf: OptionLeaf::from_raw(leaf, currency),
                }
            }
            OptionKind::Required => {
                let mut required = None;
                let mut optional = None;
                for node in raw.multi_level_options {
                    let slot = if node.is_required_option {
                        &mut required
                    } else {
                        &mut optional
                    };
                    if slot.is_none() {
                        *slot = Some(OptionNode::from_raw(node, currency).children);
                    }
                }
                if required.is_none() {
                    warn!("required option group missing; nothing can be purchased");
                }
                OptionSchema::RequiredOptional {
                    labels,
                    required: required.unwrap_or_default(),
                    optional: optional.unwrap_or_default(),
                }
            }
            OptionKind::Combination => {
                let nested = raw
                    .multi_level_options
                    .iter()
                    .any(|node| !node.children.is_empty());
                let options = if nested {
                    CombinationOptions::Nested(
                        raw.multi_level_options
                            .into_iter()
                            .map(|node| OptionNode::from_raw(node, currency))
                            .collect(),
                    )
                } else {
                    CombinationOptions::Flat(
                        raw.flat_options
                            .into_iter()
                            .map(|leaf| OptionLeaf::from_raw(leaf, currency))
                            .collect(),
                    )
                };
                OptionSchema::Combination { labels, options }
            }
        };

        Ok(schema)
    }

    /// The declared type this schema was built from.
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionSchema::Default { .. } => OptionKind::Default,
            OptionSchema::RequiredOptional { .. } => OptionKind::Required,
            OptionSchema::Combination { .. } => OptionKind::Combination,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, OptionSchema::Default { .. })
    }

    /// Whether picks need both selectors to resolve a leaf.
    pub fn is_nested(&self) -> bool {
        matches!(
            self,
            OptionSchema::Combination {
                options: CombinationOptions::Nested(_),
                ..
            }
        )
    }

    fn labels(&self) -> &[String] {
        match self {
            OptionSchema::Default { .. } => &[],
            OptionSchema::RequiredOptional { labels, .. }
            | OptionSchema::Combination { labels, .. } => labels,
        }
    }

    /// Placeholder for the first selector.
    pub fn first_label(&self) -> Option<&str> {
        self.labels().first().map(String::as_str)
    }

    /// Placeholder for the second selector.
    pub fn second_label(&self) -> Option<&str> {
        self.labels().get(1).map(String::as_str)
    }

    /// Choices for the first selector, in catalog order.
    pub fn first_level_choices(&self) -> Vec<ChoiceItem> {
        match self {
            OptionSchema::Default { .. } => Vec::new(),
            OptionSchema::RequiredOptional { required, .. } => {
                required.iter().map(ChoiceItem::from_leaf).collect()
            }
            OptionSchema::Combination {
                options: CombinationOptions::Flat(leaves),
                ..
            } => leaves.iter().map(ChoiceItem::from_leaf).collect(),
            OptionSchema::Combination {
                options: CombinationOptions::Nested(nodes),
                ..
            } => nodes
                .iter()
                .filter(|node| !node.value.is_empty())
                .map(|node| ChoiceItem {
                    value: node.value.clone(),
                    add_price: Money::zero(node_currency(node)),
                    sold_out: node.has_children() && node.children.iter().all(|c| c.is_sold_out()),
                })
                .collect(),
        }
    }

    /// Choices for the second selector given the pending first pick.
    ///
    /// For a nested combination with nothing picked yet, this is the union
    /// of every node's children, de-duplicated by value with the first
    /// occurrence winning.
    pub fn second_level_choices(&self, pending_first: Option<&str>) -> Vec<ChoiceItem> {
        match self {
            OptionSchema::Default { .. } => Vec::new(),
            OptionSchema::RequiredOptional { optional, .. } => {
                optional.iter().map(ChoiceItem::from_leaf).collect()
            }
            OptionSchema::Combination {
                options: CombinationOptions::Flat(_),
                ..
            } => Vec::new(),
            OptionSchema::Combination {
                options: CombinationOptions::Nested(nodes),
                ..
            } => match pending_first {
                Some(first) => nodes
                    .iter()
                    .find(|node| node.value == first)
                    .map(|node| node.children.iter().map(ChoiceItem::from_leaf).collect())
                    .unwrap_or_default(),
                None => {
                    let mut seen = HashSet::new();
                    nodes
                        .iter()
                        .flat_map(|node| node.children.iter())
                        .filter(|leaf| seen.insert(leaf.value.as_str()))
                        .map(ChoiceItem::from_leaf)
                        .collect()
                }
            },
        }
    }

    /// Whether there is nothing for the shopper to pick yet.
    pub fn has_no_choices(&self) -> bool {
        match self {
            OptionSchema::Default { .. } => false,
            _ => self.first_level_choices().is_empty() && self.second_level_choices(None).is_empty(),
        }
    }
}

fn node_currency(node: &OptionNode) -> Currency {
    node.children
        .first()
        .map(|leaf| leaf.add_price.currency)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::raw::{RawOptionLeaf, RawOptionNode};
    use crate::ids::OptionNo;

    fn leaf(option_no: i64, value: &str, add_price: i64) -> RawOptionLeaf {
        RawOptionLeaf {
            option_no,
            value: value.to_string(),
            add_price,
            buy_price: 30000 + add_price,
            ..Default::default()
        }
    }

    fn node(value: &str, required: bool, children: Vec<RawOptionLeaf>) -> RawOptionNode {
        RawOptionNode {
            value: value.to_string(),
            is_required_option: required,
            children,
            ..Default::default()
        }
    }

    fn nested_raw() -> RawOptionSchema {
        RawOptionSchema {
            option_type: "COMBINATION".to_string(),
            labels: vec!["사이즈".to_string(), "색상".to_string()],
            flat_options: vec![],
            multi_level_options: vec![
                node("S", false, vec![leaf(1, "Red", 0), leaf(2, "Blue", 1000)]),
                node("M", false, vec![leaf(3, "Blue", 2000), leaf(4, "Black", 0)]),
                node("L", false, vec![]),
            ],
        }
    }

    fn values(items: &[ChoiceItem]) -> Vec<&str> {
        items.iter().map(|c| c.value.as_str()).collect()
    }

    #[test]
    fn test_required_without_required_group() {
        let raw = RawOptionSchema {
            option_type: "REQUIRED".to_string(),
            labels: vec!["필수".to_string(), "선택".to_string()],
            flat_options: vec![],
            multi_level_options: vec![node("추가", false, vec![leaf(21, "Case", 3000)])],
        };
        let schema = OptionSchema::from_raw(raw, Currency::KRW).unwrap();

        assert!(schema.first_level_choices().is_empty());
        assert_eq!(schema.second_level_choices(None).len(), 1);
        assert!(schema.required_option_nos().is_empty());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(OptionKind::parse("combination").unwrap(), OptionKind::Combination);
        assert!(matches!(
            OptionKind::parse("MAPPING"),
            Err(CommerceError::UnknownOptionType(_))
        ));
    }

    #[test]
    fn test_default_schema_needs_a_leaf() {
        let raw = RawOptionSchema {
            option_type: "DEFAULT".to_string(),
            ..Default::default()
        };
        assert_eq!(
            OptionSchema::from_raw(raw, Currency::KRW),
            Err(CommerceError::MissingDefaultOption)
        );
    }

    #[test]
    fn test_default_schema_exposes_no_choices() {
        let raw = RawOptionSchema {
            option_type: "DEFAULT".to_string(),
            flat_options: vec![leaf(10, "", 0)],
            ..Default::default()
        };
        let schema = OptionSchema::from_raw(raw, Currency::KRW).unwrap();
        assert!(schema.is_default());
        assert!(schema.first_level_choices().is_empty());
        assert!(schema.second_level_choices(None).is_empty());
    }

    #[test]
    fn test_combination_without_children_is_flat() {
        let raw = RawOptionSchema {
            option_type: "COMBINATION".to_string(),
            flat_options: vec![leaf(1, "Red", 0), leaf(2, "Blue", -500)],
            multi_level_options: vec![node("Red", false, vec![]), node("Blue", false, vec![])],
            ..Default::default()
        };
        let schema = OptionSchema::from_raw(raw, Currency::KRW).unwrap();

        assert!(!schema.is_nested());
        let first = schema.first_level_choices();
        assert_eq!(values(&first), vec!["Red", "Blue"]);
        assert_eq!(first[1].add_price, Money::won(-500));
        assert!(schema.second_level_choices(Some("Red")).is_empty());
    }

    #[test]
    fn test_nested_first_level_has_zero_hints() {
        let schema = OptionSchema::from_raw(nested_raw(), Currency::KRW).unwrap();
        let first = schema.first_level_choices();
        assert_eq!(values(&first), vec!["S", "M", "L"]);
        assert!(first.iter().all(|c| c.add_price.is_zero()));
    }

    #[test]
    fn test_nested_second_level_union_keeps_first_seen() {
        let schema = OptionSchema::from_raw(nested_raw(), Currency::KRW).unwrap();
        let second = schema.second_level_choices(None);
        assert_eq!(values(&second), vec!["Red", "Blue", "Black"]);
        // "Blue" hint comes from the S node, which was seen first.
        assert_eq!(second[1].add_price, Money::won(1000));
    }

    #[test]
    fn test_nested_second_level_follows_pick() {
        let schema = OptionSchema::from_raw(nested_raw(), Currency::KRW).unwrap();
        assert_eq!(values(&schema.second_level_choices(Some("M"))), vec!["Blue", "Black"]);
        assert!(schema.second_level_choices(Some("L")).is_empty());
        assert!(schema.second_level_choices(Some("XL")).is_empty());
    }

    #[test]
    fn test_required_optional_groups() {
        let raw = RawOptionSchema {
            option_type: "REQUIRED".to_string(),
            labels: vec!["필수".to_string(), "선택".to_string()],
            multi_level_options: vec![
                node("본품", true, vec![leaf(11, "Basic", 0), leaf(12, "Pro", 5000)]),
                node("추가", false, vec![leaf(21, "Case", 3000)]),
            ],
            ..Default::default()
        };
        let schema = OptionSchema::from_raw(raw, Currency::KRW).unwrap();

        assert_eq!(schema.kind(), OptionKind::Required);
        assert_eq!(values(&schema.first_level_choices()), vec!["Basic", "Pro"]);
        assert_eq!(values(&schema.second_level_choices(None)), vec!["Case"]);
        assert_eq!(values(&schema.second_level_choices(Some("Basic"))), vec!["Case"]);
        assert_eq!(schema.first_label(), Some("필수"));
        assert_eq!(schema.second_label(), Some("선택"));
    }

    #[test]
    fn test_choice_display() {
        let item = ChoiceItem {
            value: "Blue".to_string(),
            add_price: Money::won(1000),
            sold_out: false,
        };
        assert_eq!(item.display(), "Blue (+1,000원)");

        let item = ChoiceItem {
            value: "Red".to_string(),
            add_price: Money::won(0),
            sold_out: false,
        };
        assert_eq!(item.display(), "Red");
    }

    #[test]
    fn test_leaf_ids_survive_normalization() {
        let schema = OptionSchema::from_raw(nested_raw(), Currency::KRW).unwrap();
        match schema {
            OptionSchema::Combination {
                options: CombinationOptions::Nested(nodes),
                ..
            } => assert_eq!(nodes[0].children[1].option_no, OptionNo::new(2)),
            other => panic!("expected nested combination, got {:?}", other.kind()),
        }
    }
}
