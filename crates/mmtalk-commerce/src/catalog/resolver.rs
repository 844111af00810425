//! Mapping selector picks back to priced option leaves.
//!
//! Resolution is a pure function of the schema and the pick; calling it
//! twice with the same arguments yields the same leaf.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::option::OptionLeaf;
use crate::catalog::schema::{CombinationOptions, OptionSchema};
use crate::error::CommerceError;
use crate::ids::OptionNo;

/// Which of the two selectors a pick came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectorSlot {
    First,
    Second,
}

impl OptionSchema {
    /// Resolve a `(first, second)` pick to its leaf.
    ///
    /// - `Default` ignores both arguments.
    /// - `RequiredOptional` looks `first` up in the required group, then in
    ///   the optional group; `second` is not consulted.
    /// - Flat `Combination` matches `first` alone.
    /// - Nested `Combination` needs both; a missing `second` is a miss.
    pub fn resolve(&self, first: &str, second: Option<&str>) -> Result<&OptionLeaf, CommerceError> {
        let found = match self {
            OptionSchema::Default { leaf } => Some(leaf),
            OptionSchema::RequiredOptional {
                required, optional, ..
            } => find_by_value(required, first).or_else(|| find_by_value(optional, first)),
            OptionSchema::Combination {
                options: CombinationOptions::Flat(leaves),
                ..
            } => find_by_value(leaves, first),
            OptionSchema::Combination {
                options: CombinationOptions::Nested(nodes),
                ..
            } => second.and_then(|second| {
                nodes
                    .iter()
                    .find(|node| node.value == first)
                    .and_then(|node| node.child(second))
            }),
        };

        found.ok_or_else(|| not_found(first, second))
    }

    /// Resolve a single-selector pick, restricted to the slot's own group.
    ///
    /// Only `RequiredOptional` keeps separate groups per slot; there the
    /// optional selector never resolves into the required group even when
    /// values collide. Other variants fall back to [`resolve`](Self::resolve)
    /// for the first slot and have nothing to resolve from the second alone.
    pub fn resolve_in(&self, slot: SelectorSlot, value: &str) -> Result<&OptionLeaf, CommerceError> {
        match (self, slot) {
            (OptionSchema::RequiredOptional { required, .. }, SelectorSlot::First) => {
                find_by_value(required, value).ok_or_else(|| not_found(value, None))
            }
            (OptionSchema::RequiredOptional { optional, .. }, SelectorSlot::Second) => {
                find_by_value(optional, value).ok_or_else(|| not_found(value, None))
            }
            (OptionSchema::Default { leaf }, _) => Ok(leaf),
            (_, SelectorSlot::First) if !self.is_nested() => self.resolve(value, None),
            _ => Err(not_found(value, None)),
        }
    }

    /// Option numbers of the required group (empty for other variants).
    pub fn required_option_nos(&self) -> HashSet<OptionNo> {
        match self {
            OptionSchema::RequiredOptional { required, .. } => {
                required.iter().map(|leaf| leaf.option_no).collect()
            }
            _ => HashSet::new(),
        }
    }

    /// Every leaf in the schema, in catalog order.
    pub fn leaves(&self) -> Vec<&OptionLeaf> {
        match self {
            OptionSchema::Default { leaf } => vec![leaf],
            OptionSchema::RequiredOptional {
                required, optional, ..
            } => required.iter().chain(optional.iter()).collect(),
            OptionSchema::Combination {
                options: CombinationOptions::Flat(leaves),
                ..
            } => leaves.iter().collect(),
            OptionSchema::Combination {
                options: CombinationOptions::Nested(nodes),
                ..
            } => nodes.iter().flat_map(|node| node.children.iter()).collect(),
        }
    }

    /// Find a leaf by its option number.
    pub fn leaf(&self, option_no: OptionNo) -> Option<&OptionLeaf> {
        self.leaves().into_iter().find(|leaf| leaf.option_no == option_no)
    }
}

fn find_by_value<'a>(leaves: &'a [OptionLeaf], value: &str) -> Option<&'a OptionLeaf> {
    leaves.iter().find(|leaf| leaf.value == value)
}

fn not_found(first: &str, second: Option<&str>) -> CommerceError {
    CommerceError::OptionNotFound {
        first: first.to_string(),
        second: second.map(str::to_string),
    }
}
