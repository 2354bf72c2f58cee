use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

use crate::analysis::retention::MissingPricePolicy;

pub const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub missing_price: MissingPricePolicy,
}

fn default_database_path() -> String {
    "catalog.db".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            page_size: DEFAULT_PAGE_SIZE,
            missing_price: MissingPricePolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Message(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Load `Config.{toml,json,yaml,...}` if present, then `CATALOG_DUPER_*` environment overrides.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(Environment::with_prefix("CATALOG_DUPER"))
        .build()?;
    builder.try_deserialize::<AppConfig>()?.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(text: &str) -> Result<AppConfig, ConfigError> {
        Config::builder()
            .add_source(ConfigFile::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize::<AppConfig>()?
            .validate()
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = from_toml("").unwrap();
        assert_eq!(config.database_path, "catalog.db");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.missing_price, MissingPricePolicy::Last);
    }

    #[test]
    fn test_overrides() {
        let config = from_toml(
            "database_path = \"shop.db\"\npage_size = 20\nmissing_price = \"zero\"\n",
        )
        .unwrap();
        assert_eq!(config.database_path, "shop.db");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.missing_price, MissingPricePolicy::Zero);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(from_toml("page_size = 0").is_err());
    }
}
