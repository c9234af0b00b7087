use serde::{Deserialize, Serialize};

/// Prefix for environment variables that override configuration values
pub const ENV_PREFIX: &str = "CHECKOUT";

/// Env variable that sets Development/Sandbox/Production env
pub const RUN_ENV: &str = "RUN_ENV";

/// Prefix used for merchant transaction ids generated on behalf of the caller
pub const MERCHANT_TRANSACTION_ID_PREFIX: &str = "MT";

/// Header name for request id
pub const X_REQUEST_ID: &str = "x-request-id";

/// Base64 engine used for processor payloads
pub const BASE64_ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Current environment.
#[derive(
    Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString,
)]
pub enum Env {
    /// Development environment.
    #[default]
    Development,
    /// Sandbox environment.
    Sandbox,
    /// Production environment.
    Production,
}

impl Env {
    /// Name of current environment. Either "Development", "Sandbox" or "Production".
    pub fn current_env() -> Self {
        #[cfg(debug_assertions)]
        let default_env = Self::Development;
        #[cfg(not(debug_assertions))]
        let default_env = Self::Production;

        std::env::var(RUN_ENV).map_or_else(|_| default_env, |v| v.parse().unwrap_or(default_env))
    }

    /// Name of the config file read for this environment
    pub const fn config_path(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Sandbox => "sandbox.toml",
            Self::Production => "production.toml",
        }
    }
}
