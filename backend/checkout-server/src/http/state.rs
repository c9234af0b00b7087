use connector_integration::BoxedPaymentGateway;

#[derive(Clone)]
pub struct AppState {
    pub gateway: BoxedPaymentGateway,
}

impl AppState {
    pub fn new(gateway: BoxedPaymentGateway) -> Self {
        Self { gateway }
    }
}
