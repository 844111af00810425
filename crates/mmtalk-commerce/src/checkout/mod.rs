//! Checkout module.
//!
//! Contains the order candidate produced on confirm and the sink it is
//! handed to.

mod order;

pub use order::{OrderCandidate, OrderLine, OrderSink, RecordingSink};
