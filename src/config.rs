//! Catalogue configuration.
//!
//! Everything has a built-in default, so a config file is optional. Files are
//! accepted as TOML or JSON:
//!
//! ```toml
//! order_costs = 200
//! redemption = "single_use"
//!
//! [discounts]
//! default_percentage = 10
//! code_percentage = 15
//!
//! [discounts.rates]
//! BE = 20
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PatternError, Result};

/// Environment variable the demo binaries read the config path from.
pub const CONFIG_ENV: &str = "CATALOGUE_CONFIG";

pub const DEFAULT_ORDER_COSTS: u64 = 200;
pub const DEFAULT_COUNTRY_PERCENTAGE: u32 = 10;
pub const DEFAULT_CODE_PERCENTAGE: u32 = 15;
pub const MAX_PERCENTAGE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    pub order_costs: u64,
    pub redemption: RedemptionPolicy,
    // Tables last so the TOML rendering keeps plain keys at the top.
    pub discounts: DiscountTable,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            order_costs: DEFAULT_ORDER_COSTS,
            discounts: DiscountTable::default(),
            redemption: RedemptionPolicy::default(),
        }
    }
}

/// Region → percentage lookup used by the country discount factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountTable {
    /// Keys are stored trimmed and upper-cased.
    #[serde(deserialize_with = "normalized_rates")]
    rates: HashMap<String, u32>,
    /// Applied to any region not in `rates`.
    pub default_percentage: u32,
    /// Fixed percentage of every one-time code.
    pub code_percentage: u32,
}

impl Default for DiscountTable {
    fn default() -> Self {
        Self {
            rates: HashMap::from([("BE".to_string(), 20)]),
            default_percentage: DEFAULT_COUNTRY_PERCENTAGE,
            code_percentage: DEFAULT_CODE_PERCENTAGE,
        }
    }
}

impl DiscountTable {
    /// Region codes compare case-insensitively, ignoring surrounding whitespace.
    /// Unknown regions fall back to `default_percentage`.
    pub fn percentage_for(&self, region: &str) -> u32 {
        self.rates
            .get(&normalize_region(region))
            .copied()
            .unwrap_or(self.default_percentage)
    }

    pub fn with_rate(mut self, region: &str, percentage: u32) -> Self {
        self.rates.insert(normalize_region(region), percentage);
        self
    }

    pub fn rates(&self) -> &HashMap<String, u32> {
        &self.rates
    }

    fn validate(&self) -> Result<()> {
        check_percentage("discounts.default_percentage", self.default_percentage)?;
        check_percentage("discounts.code_percentage", self.code_percentage)?;
        for (region, pct) in &self.rates {
            check_percentage(&format!("discounts.rates.{region}"), *pct)?;
        }
        Ok(())
    }
}

fn normalize_region(region: &str) -> String {
    region.trim().to_ascii_uppercase()
}

fn check_percentage(field: &str, value: u32) -> Result<()> {
    if value > MAX_PERCENTAGE {
        return Err(PatternError::InvalidConfig {
            field: field.to_string(),
            value: u64::from(value),
        });
    }
    Ok(())
}

/// Upper-cases region keys; two keys that differ only by case are rejected.
fn normalized_rates<'de, D>(deserializer: D) -> std::result::Result<HashMap<String, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, u32>::deserialize(deserializer)?;
    let mut rates = HashMap::with_capacity(raw.len());
    for (region, pct) in raw {
        let key = normalize_region(&region);
        if rates.insert(key.clone(), pct).is_some() {
            return Err(serde::de::Error::custom(format!(
                "region '{key}' is listed more than once"
            )));
        }
    }
    Ok(rates)
}

/// Whether one-time discount codes may be redeemed more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedemptionPolicy {
    #[default]
    SingleUse,
    Unenforced,
}

impl CatalogueConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Every percentage must lie in `0..=100`.
    pub fn validate(&self) -> Result<()> {
        self.discounts.validate()
    }

    /// The effective config, rendered as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(PatternError::from)
    }

    /// Loads a config file, picking the format from the extension and
    /// sniffing the content when there is none.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| PatternError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let config = match format.as_deref() {
            Some("json") => Self::from_json_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            _ => {
                let trimmed = content.trim_start();
                if trimmed.starts_with('{') {
                    Self::from_json_str(&content)?
                } else {
                    Self::from_toml_str(&content)?
                }
            }
        };

        tracing::debug!(path = %path.display(), "loaded catalogue config");
        Ok(config)
    }

    /// Reads the file named by `CATALOGUE_CONFIG`, or returns the defaults.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
