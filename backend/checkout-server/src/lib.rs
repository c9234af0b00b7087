pub mod app;
pub mod configs;
pub mod error;
pub mod http;
pub mod logger;
pub mod utils;

/// Name of the running binary, used as the logging service name.
#[macro_export]
macro_rules! service_name {
    () => {
        env!("CARGO_CRATE_NAME")
    };
}
