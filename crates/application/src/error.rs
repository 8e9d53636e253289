//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// Malformed or out-of-range input
    #[error("{0}")]
    InvalidRequest(String),

    /// Chaos parameters out of range or inconsistent
    #[error("{0}")]
    InvalidConfig(String),

    /// Deliberately simulated fault
    #[error("Chaos error injected")]
    ChaosInjected,

    /// The inventory check preceding order creation failed
    #[error("Inventory check failed: {0}")]
    InventoryUnavailable(String),

    /// A downstream service call failed
    #[error("Downstream service error: {0}")]
    Downstream(String),

    /// Shutdown interrupted an injected delay
    #[error("Service interrupted")]
    Interrupted,

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Short machine-readable category, used in logs and span events
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::InvalidConfig(_) => "invalid_config",
            Self::ChaosInjected => "chaos_injected",
            Self::InventoryUnavailable(_) => "inventory_unavailable",
            Self::Downstream(_) => "downstream_error",
            Self::Interrupted => "interrupted",
            Self::NotFound(_) => "not_found",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether the caller can fix the request and try again
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_)
                | Self::InvalidConfig(_)
                | Self::InventoryUnavailable(_)
                | Self::NotFound(_)
        )
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidChaosConfig(message) => Self::InvalidConfig(message),
            DomainError::NotFound { .. } => Self::NotFound(err.to_string()),
            other => Self::InvalidRequest(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chaos_domain_errors_become_invalid_config() {
        let err: ApplicationError = DomainError::chaos("Min latency cannot be greater than max latency").into();
        assert_eq!(
            err,
            ApplicationError::InvalidConfig(
                "Min latency cannot be greater than max latency".to_string()
            )
        );
    }

    #[test]
    fn validation_domain_errors_become_invalid_request() {
        let err: ApplicationError = DomainError::InvalidItemId.into();
        assert_eq!(err, ApplicationError::InvalidRequest("Invalid item ID".to_string()));
    }

    #[test]
    fn not_found_keeps_category() {
        let err: ApplicationError = DomainError::not_found("Order", "abc").into();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[test]
    fn client_error_classification() {
        assert!(ApplicationError::InventoryUnavailable("x".into()).is_client_error());
        assert!(ApplicationError::InvalidConfig("x".into()).is_client_error());
        assert!(!ApplicationError::ChaosInjected.is_client_error());
        assert!(!ApplicationError::Interrupted.is_client_error());
        assert!(!ApplicationError::Downstream("x".into()).is_client_error());
    }

    #[test]
    fn chaos_and_interrupt_messages() {
        assert_eq!(ApplicationError::ChaosInjected.to_string(), "Chaos error injected");
        assert_eq!(ApplicationError::Interrupted.to_string(), "Service interrupted");
        assert_eq!(ApplicationError::ChaosInjected.kind(), "chaos_injected");
    }
}
