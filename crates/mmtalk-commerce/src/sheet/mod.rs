//! Option sheet module.
//!
//! Contains the sheet lifecycle state machine and the detail session that
//! turns shopper intents into selection changes.

mod session;
mod state;

pub use session::{DetailSession, Intent, SchemaState, SelectorGate};
pub use state::{DismissThresholds, DragRelease, SelectorState, SheetState};
