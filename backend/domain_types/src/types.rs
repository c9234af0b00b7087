use hyperswitch_masking::{PeekInterface, Secret};
use serde::Deserialize;

use common_utils::errors::{CustomResult, ValidationError};

#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
pub struct Connectors {
    pub phonepe: PhonepeConfig,
}

/// Credentials and host of the PhonePe standard checkout API.
#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
pub struct PhonepeConfig {
    /// base url
    pub base_url: String,
    pub merchant_id: Secret<String>,
    pub salt_key: Secret<String>,
    #[serde(default = "default_salt_index")]
    pub salt_index: String,
}

fn default_salt_index() -> String {
    "1".to_string()
}

impl PhonepeConfig {
    pub fn validate(&self) -> CustomResult<(), ValidationError> {
        let required = [
            ("base_url", self.base_url.as_str()),
            ("merchant_id", self.merchant_id.peek().as_str()),
            ("salt_key", self.salt_key.peek().as_str()),
            ("salt_index", self.salt_index.as_str()),
        ];

        if let Some((field_name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ValidationError::MissingRequiredField {
                field_name: format!("connectors.phonepe.{field_name}"),
            }
            .into());
        }

        url::Url::parse(&self.base_url).map_err(|_| {
            error_stack::report!(ValidationError::IncorrectValueProvided {
                field_name: "connectors.phonepe.base_url",
            })
        })?;

        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    pub bypass_proxy_urls: Vec<String>,
}

impl Proxy {
    pub fn is_proxy_configured(&self) -> bool {
        self.http_url.is_some() || self.https_url.is_some()
    }

    pub fn should_bypass(&self, url: &str) -> bool {
        self.bypass_proxy_urls
            .iter()
            .any(|bypass| url.starts_with(bypass.as_str()))
    }
}
