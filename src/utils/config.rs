use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use rust_decimal::Decimal;

use crate::services::pricing::{ShippingPolicy, FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
    pub free_shipping_threshold: Decimal,
    pub shipping_flat_fee: Decimal,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
            shipping_flat_fee: FLAT_SHIPPING_FEE,
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let config = Config {
            catalog_path: lookup("CATALOG_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            free_shipping_threshold: parse_decimal(&lookup, "FREE_SHIPPING_THRESHOLD")?
                .unwrap_or(defaults.free_shipping_threshold),
            shipping_flat_fee: parse_decimal(&lookup, "SHIPPING_FLAT_FEE")?
                .unwrap_or(defaults.shipping_flat_fee),
            log_level: lookup("LOG_LEVEL")
                .unwrap_or(defaults.log_level)
                .to_lowercase(),
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.free_shipping_threshold < Decimal::ZERO {
            return Err(anyhow::anyhow!("FREE_SHIPPING_THRESHOLD must not be negative"));
        }

        if self.shipping_flat_fee < Decimal::ZERO {
            return Err(anyhow::anyhow!("SHIPPING_FLAT_FEE must not be negative"));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(anyhow::anyhow!(
                "LOG_LEVEL must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy::new(self.free_shipping_threshold, self.shipping_flat_fee)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_decimal<F>(lookup: &F, key: &str) -> anyhow::Result<Option<Decimal>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let value = Decimal::from_str(raw.trim())
                .with_context(|| format!("{} must be a decimal amount, got '{}'", key, raw))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}
