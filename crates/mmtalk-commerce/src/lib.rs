//! Product option resolution for the mmtalk shopping front end.
//!
//! This crate holds the logic behind a product detail page's option sheet:
//!
//! - **Catalog**: option schemas (default, required/optional, combination),
//!   leaf resolution, product pricing, the listing feed
//! - **Cart**: selection lines with merge and quantity rules, pricing, and
//!   an in-memory cart store
//! - **Checkout**: the order candidate handed off on confirm
//! - **Sheet**: the bottom sheet state machine and the intent-driven
//!   detail session
//!
//! # Example
//!
//! ```rust,ignore
//! use mmtalk_commerce::prelude::*;
//!
//! let mut session = DetailSession::with_schema(product, schema, SheetConfig::default());
//! let mut cart = CartStore::default();
//!
//! session.dispatch(Intent::OpenSheet, &mut cart)?;
//! session.dispatch(Intent::PickFirst { value: "S".into() }, &mut cart)?;
//! session.dispatch(Intent::PickSecond { value: "Blue".into() }, &mut cart)?;
//! println!("Total: {}", session.total().display());
//!
//! session.dispatch(Intent::Confirm, &mut cart)?;
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod sheet;

pub use config::SheetConfig;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::SheetConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        ChoiceItem, CombinationOptions, OptionKind, OptionLeaf, OptionNode, OptionSchema,
        PageMeta, ProductFeed, ProductPricing, ProductSummary, RawOptionSchema, SelectorSlot,
    };

    // Cart
    pub use crate::cart::{
        CartItem, CartStore, LinePricing, SelectionLine, SelectionList, SelectionPricing,
    };

    // Checkout
    pub use crate::checkout::{OrderCandidate, OrderLine, OrderSink};

    // Sheet
    pub use crate::sheet::{
        DetailSession, DismissThresholds, DragRelease, Intent, SchemaState, SelectorGate,
        SelectorState, SheetState,
    };
}
