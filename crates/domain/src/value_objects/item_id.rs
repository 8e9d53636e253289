//! Inventory item identifier
//!
//! Item identifiers are opaque strings chosen by whoever stocks the item.
//! They must contain at least one non-whitespace character and be at most
//! 255 characters long.
//!
//! # Examples
//!
//! ```
//! use domain::ItemId;
//!
//! let id = ItemId::new("widget-42").unwrap();
//! assert_eq!(id.as_str(), "widget-42");
//!
//! assert!(ItemId::new("   ").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::is_acceptable_identifier};

/// A validated inventory item identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Create an item ID, rejecting blank or overlong values
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if is_acceptable_identifier(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidItemId)
        }
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ItemId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
