use std::path::PathBuf;

use common_utils::consts;
use domain_types::types::{Connectors, Proxy};

use crate::logger::config::Log;

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Config {
    pub common: Common,
    pub server: Server,
    pub log: Log,
    #[serde(default)]
    pub proxy: Proxy,
    pub connectors: Connectors,
}

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Common {
    pub environment: consts::Env,
}

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Function to build the configuration by picking it from default locations
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::new_with_config_path(None)
    }

    /// Function to build the configuration by picking it from default locations
    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, config::ConfigError> {
        let env = consts::Env::current_env();
        let config_path = Self::config_path(&env, explicit_config_path);

        let config = Self::builder(&env)?
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(consts::ENV_PREFIX)
                    .try_parsing(true)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("proxy.bypass_proxy_urls"),
            )
            .build()?;

        Self::from_source(config)
    }

    /// Deserialize and validate an already layered configuration.
    pub fn from_source(source: config::Config) -> Result<Self, config::ConfigError> {
        #[allow(clippy::print_stderr)]
        let config: Self = serde_path_to_error::deserialize(source).map_err(|error| {
            eprintln!("Unable to deserialize application configuration: {error}");
            error.into_inner()
        })?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.connectors
            .phonepe
            .validate()
            .map_err(|report| config::ConfigError::Message(format!("{report:?}")))
    }

    pub fn builder(
        environment: &consts::Env,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            // Here, it should be `set_override()` not `set_default()`.
            // "env" can't be altered by config field.
            // Should be single source of truth.
            .set_override("env", environment.to_string())
    }

    /// Config path.
    pub fn config_path(
        environment: &consts::Env,
        explicit_config_path: Option<PathBuf>,
    ) -> PathBuf {
        let mut config_path = PathBuf::new();
        if let Some(explicit_config_path_val) = explicit_config_path {
            config_path.push(explicit_config_path_val);
        } else {
            let config_directory: String = "config".into();
            let config_file_name = environment.config_path();

            config_path.push(workspace_path());
            config_path.push(config_directory);
            config_path.push(config_file_name);
        }
        config_path
    }
}

pub fn workspace_path() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let mut path = PathBuf::from(manifest_dir);
        path.pop();
        path.pop();
        path
    } else {
        PathBuf::from(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVELOPMENT_TOML: &str = r#"
        [common]
        environment = "Development"

        [server]
        host = "127.0.0.1"
        port = 8000

        [log.console]
        enabled = true
        level = "DEBUG"
        log_format = "default"

        [connectors.phonepe]
        base_url = "https://api-preprod.phonepe.com/apis/pg-sandbox"
        merchant_id = "PGTESTPAYUAT"
        salt_key = "099eb0cd-02cf-4e2a-8aca-3e6c6aff0399"
        salt_index = "1"
    "#;

    fn layered(toml: &str) -> config::ConfigBuilder<config::builder::DefaultState> {
        config::Config::builder().add_source(config::File::from_str(toml, config::FileFormat::Toml))
    }

    #[test]
    fn test_config_loads_from_toml() {
        let source = layered(DEVELOPMENT_TOML).build().unwrap();
        let config = Config::from_source(source).unwrap();

        assert_eq!(config.common.environment, consts::Env::Development);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.connectors.phonepe.salt_index, "1");
        assert!(!config.proxy.is_proxy_configured());
    }

    #[test]
    fn test_override_replaces_file_value() {
        let source = layered(DEVELOPMENT_TOML)
            .set_override("connectors.phonepe.salt_index", "2")
            .unwrap()
            .build()
            .unwrap();
        let config = Config::from_source(source).unwrap();

        assert_eq!(config.connectors.phonepe.salt_index, "2");
    }

    #[test]
    fn test_empty_salt_key_is_rejected() {
        let source = layered(DEVELOPMENT_TOML)
            .set_override("connectors.phonepe.salt_key", "")
            .unwrap()
            .build()
            .unwrap();

        assert!(Config::from_source(source).is_err());
    }

    #[test]
    fn test_missing_connector_section_is_rejected() {
        let source = layered(
            r#"
            [common]
            environment = "Sandbox"
            [server]
            host = "0.0.0.0"
            port = 8080
            [log.console]
            enabled = false
            level = "INFO"
            log_format = "json"
        "#,
        )
        .build()
        .unwrap();

        assert!(Config::from_source(source).is_err());
    }

    #[test]
    fn test_shipped_config_files_parse() {
        for file_name in ["development.toml", "sandbox.toml"] {
            let mut path = workspace_path();
            path.push("config");
            path.push(file_name);
            let source = config::Config::builder()
                .add_source(config::File::from(path))
                .build()
                .unwrap();
            Config::from_source(source)
                .unwrap_or_else(|error| panic!("{file_name} does not parse: {error}"));
        }
    }
}
