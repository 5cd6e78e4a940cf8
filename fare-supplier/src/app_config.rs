use serde::Deserialize;
use std::env;

use crate::secret::Masked;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub supplier: SupplierConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SupplierMode {
    #[default]
    None,
    Dummy,
    Amadeus,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SupplierConfig {
    #[serde(default)]
    pub mode: SupplierMode,
    pub amadeus: Option<AmadeusConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AmadeusConfig {
    #[serde(default = "default_amadeus_url")]
    pub base_url: String,
    pub client_id: String,
    pub client_secret: Masked<String>,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_amadeus_url() -> String { "https://test.api.amadeus.com".to_string() }
fn default_timeout() -> u64 { 10 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in; holds local credentials
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `FARE__SUPPLIER__MODE=dummy` sets supplier.mode
            .add_source(config::Environment::with_prefix("FARE").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.supplier.mode == SupplierMode::Amadeus && self.supplier.amadeus.is_none() {
            return Err(config::ConfigError::Message(
                "supplier.mode is \"amadeus\" but supplier.amadeus is missing".to_string(),
            ));
        }
        Ok(())
    }
}
