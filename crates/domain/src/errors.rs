//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Item identifier is blank or too long
    #[error("Invalid item ID")]
    InvalidItemId,

    /// Order identifier is blank or too long
    #[error("Invalid order ID")]
    InvalidOrderId,

    /// Order quantity outside the accepted range
    #[error("Quantity must be between {min} and {max}")]
    InvalidQuantity { value: i64, min: u32, max: u32 },

    /// A required request field was absent
    #[error("{0} are required")]
    MissingFields(String),

    /// Chaos parameters out of range or inconsistent
    #[error("{0}")]
    InvalidChaosConfig(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Create a chaos configuration error
    pub fn chaos(message: impl Into<String>) -> Self {
        Self::InvalidChaosConfig(message.into())
    }
}
