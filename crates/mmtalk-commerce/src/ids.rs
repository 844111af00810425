//! Newtype IDs for type-safe identifiers.
//!
//! The catalog hands out plain integers for both products and options;
//! wrapping them keeps an option number from being passed where a
//! product number is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate numeric newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A catalog-assigned numeric identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from its numeric value.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the numeric value.
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductNo);
define_id!(OptionNo);
