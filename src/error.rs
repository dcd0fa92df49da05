use std::io;

use thiserror::Error;
use uuid::Uuid;

use crate::builder::BuildStage;

pub type Result<T> = std::result::Result<T, PatternError>;

/// Every failure the catalogue can surface to a caller.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("unsupported family selector '{selector}' (expected one of: BE, FR)")]
    UnsupportedFamily { selector: String },

    #[error("unsupported builder selector '{selector}' (expected one of: Mini, BMW)")]
    UnsupportedBuilder { selector: String },

    #[error("build step '{attempted}' is out of order: assembly is at stage {stage:?}, expected '{expected}'")]
    BuildSequence {
        stage: BuildStage,
        expected: &'static str,
        attempted: &'static str,
    },

    #[error("discount code {code} has already been redeemed")]
    CodeAlreadyUsed { code: Uuid },

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("config value {value} for '{field}' is out of range (0..=100)")]
    InvalidConfig { field: String, value: u64 },

    #[error("invalid TOML config: {0}")]
    ConfigToml(#[from] toml::de::Error),

    #[error("failed to render config as TOML: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    #[error("invalid JSON config: {0}")]
    ConfigJson(#[from] serde_json::Error),
}

impl PatternError {
    pub fn unsupported_family(selector: impl Into<String>) -> Self {
        Self::UnsupportedFamily {
            selector: selector.into(),
        }
    }

    pub fn unsupported_builder(selector: impl Into<String>) -> Self {
        Self::UnsupportedBuilder {
            selector: selector.into(),
        }
    }
}
