//! Product catalog module.
//!
//! Contains the option schema (raw and normalized), leaf resolution, product
//! pricing, and the listing feed.

mod listing;
mod option;
mod product;
pub mod raw;
mod resolver;
mod schema;

pub use listing::{PageMeta, ProductFeed};
pub use option::{OptionLeaf, OptionNode, OptionStock};
pub use product::{ProductPricing, ProductSummary};
pub use raw::{RawOptionLeaf, RawOptionNode, RawOptionSchema};
pub use resolver::SelectorSlot;
pub use schema::{ChoiceItem, CombinationOptions, OptionKind, OptionSchema};
