//! Strongly-typed ID wrappers for all entity types
//!
//! IDs are opaque strings owned by the data engine. Newtype wrappers prevent
//! accidentally mixing up IDs from different entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Get the ID as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }
    };
}

define_id!(AccountId);
define_id!(TransactionId);
define_id!(CategoryId);
define_id!(CategoryGroupId);
define_id!(PayeeId);

/// Placeholder id for transactions the storage layer has not assigned yet
pub const TEMP_TRANSACTION_ID: &str = "temp";

impl TransactionId {
    /// The "not yet assigned by storage" sentinel
    pub fn temp() -> Self {
        Self(TEMP_TRANSACTION_ID.to_string())
    }

    /// Check whether this is the unassigned sentinel
    pub fn is_temp(&self) -> bool {
        self.0 == TEMP_TRANSACTION_ID
    }
}
