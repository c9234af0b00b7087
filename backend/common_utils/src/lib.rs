//! Common utilities for the checkout payment gateway

pub mod consts;
pub mod crypto;
pub mod custom_serde;
pub mod errors;
pub mod ext_traits;
pub mod request;
pub mod types;

pub use errors::{CustomResult, ParsingError, ValidationError};
pub use request::{Method, Request, RequestBuilder, RequestContent};
pub use types::MinorUnit;

/// Generate a time-ordered (time-sortable) unique identifier using the current time
#[inline]
pub fn generate_time_ordered_id(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::now_v7().as_simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_ordered_ids_are_prefixed_and_distinct() {
        let first = generate_time_ordered_id("txn");
        let second = generate_time_ordered_id("txn");

        assert!(first.starts_with("txn_"));
        assert_ne!(first, second);
    }
}
