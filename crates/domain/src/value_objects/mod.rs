//! Value Objects - Immutable, identity-less domain primitives

mod item_id;
mod order_id;
mod order_status;
mod quantity;

pub use item_id::ItemId;
pub use order_id::OrderId;
pub use order_status::OrderStatus;
pub use quantity::Quantity;

/// Maximum length accepted for identifiers taken from request paths
pub const MAX_IDENTIFIER_LEN: usize = 255;

/// Check that a raw path identifier is non-blank and within length bounds
pub fn is_acceptable_identifier(raw: &str) -> bool {
    !raw.trim().is_empty() && raw.chars().count() <= MAX_IDENTIFIER_LEN
}
