//! Selection and cart module.
//!
//! Contains the option sheet's selection lines, their pricing, and the
//! cart store confirmed selections land in.

mod pricing;
mod selection;
mod store;

pub use pricing::{LinePricing, SelectionPricing};
pub use selection::{format_display_name, SelectionLine, SelectionList};
pub use store::{CartItem, CartStore};
