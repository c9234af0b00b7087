use hyperswitch_masking::Secret;
use serde::Deserialize;

/// How the payer settles the payment on the processor side.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum PaymentInstrument {
    /// UPI collect request pushed to the payer's VPA
    CollectRequest { vpa: Secret<String> },
    /// UPI intent handed to an app on the payer's device
    IntentRequest {
        #[serde(default)]
        target_app: Option<String>,
    },
    /// UPI QR rendered by the checkout page
    QrRequest,
    Card(CardDetails),
    NetBanking { bank_id: String },
    /// Processor-hosted payment page, the payer picks the method there
    #[default]
    HostedPage,
}

/// Card data arrives already encrypted with the processor's public key.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub encrypted_card_number: Secret<String>,
    pub encryption_key_id: i64,
    pub card_holder_name: Option<Secret<String>>,
    pub expiry_month: Secret<String>,
    pub expiry_year: Secret<String>,
    pub encrypted_cvv: Secret<String>,
    #[serde(default)]
    pub save_card: bool,
}
