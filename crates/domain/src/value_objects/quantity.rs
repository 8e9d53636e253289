//! Order quantity value object
//!
//! A single order may request between 1 and 10 000 units.
//!
//! # Examples
//!
//! ```
//! use domain::Quantity;
//!
//! let q = Quantity::new(5).unwrap();
//! assert_eq!(q.value(), 5);
//!
//! assert!(Quantity::new(0).is_err());
//! assert!(Quantity::new(10_001).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Number of units requested by an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest accepted quantity
    pub const MIN: u32 = 1;
    /// Largest accepted quantity
    pub const MAX: u32 = 10_000;

    /// Create a validated quantity
    pub fn new(value: i64) -> Result<Self, DomainError> {
        u32::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(DomainError::InvalidQuantity {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
    }

    /// Get the raw value
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(Quantity::new(1).unwrap().value(), 1);
        assert_eq!(Quantity::new(10_000).unwrap().value(), 10_000);
    }

    #[test]
    fn rejects_out_of_range() {
        for bad in [0, -1, 10_001, i64::MAX, i64::MIN] {
            assert!(matches!(
                Quantity::new(bad),
                Err(DomainError::InvalidQuantity { value, .. }) if value == bad
            ));
        }
    }

    #[test]
    fn serde_is_numeric() {
        let q: Quantity = serde_json::from_str("7").unwrap();
        assert_eq!(serde_json::to_string(&q).unwrap(), "7");
        assert!(serde_json::from_str::<Quantity>("0").is_err());
    }
}
