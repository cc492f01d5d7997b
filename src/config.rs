//! Process configuration from the environment.
//!
//! `.env` is loaded by the binary before this is read.

use std::path::PathBuf;

use tracing::info;

use crate::error::Result;
use crate::pricing::PricingConfig;

/// Environment variable naming a JSON pricing rules file
pub const RULES_PATH_VAR: &str = "ESTIMATE_RULES_PATH";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON rules file; the built-in rules are used when unset.
    pub rules_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let rules_path = lookup(RULES_PATH_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Self { rules_path }
    }

    /// Pricing rules selected by this configuration.
    pub fn pricing_rules(&self) -> Result<PricingConfig> {
        match &self.rules_path {
            Some(path) => PricingConfig::from_path(path),
            None => {
                let rules = PricingConfig::weekend_2019();
                info!("Using built-in pricing rules '{}'", rules.version);
                Ok(rules)
            }
        }
    }
}
