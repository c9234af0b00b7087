//! Header constants for PhonePe connector

pub const CONTENT_TYPE: &str = "Content-Type";
pub const ACCEPT: &str = "accept";
pub const X_VERIFY: &str = "X-VERIFY";
pub const X_MERCHANT_ID: &str = "X-MERCHANT-ID";
