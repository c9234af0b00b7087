pub mod connectors;
pub mod types;

pub use types::{BoxedPaymentGateway, PaymentGateway};
