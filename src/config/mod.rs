mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

/// Loads `$CONFIG_PATH` (default `config.yaml`) and layers environment overrides on top.
///
/// A missing file is not an error: every field has a default, and deployments that
/// configure purely through the environment never ship a YAML file.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let mut config = if Path::new(&config_path).exists() {
        from_file(&config_path).await?
    } else {
        debug!("No configuration file at {}, using defaults", config_path);
        Config::default()
    };

    config.apply_overrides(|key| env::var(key).ok())?;
    config.validate()?;

    Ok(config)
}

pub async fn from_file(path: impl AsRef<Path>) -> Result<Config> {
    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;
    Ok(config)
}

impl Config {
    /// Applies `CODE`, `PORT`, `MODEL_ID`, `LLM_API_KEY`/`HF_TOKEN` and
    /// `FOURSQUARE_API_KEY` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(code) = lookup("CODE") {
            self.auth.code = code;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Error::config(format!("Invalid PORT: '{}'", port)))?;
        }
        if let Some(model) = lookup("MODEL_ID") {
            self.llm.model = model;
        }
        if let Some(key) = lookup("LLM_API_KEY").or_else(|| lookup("HF_TOKEN")) {
            self.llm.api_key = key;
        }
        if let Some(key) = lookup("FOURSQUARE_API_KEY") {
            self.search.api_key = key;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.auth.code.is_empty() {
            return Err(Error::config(
                "Authorization code is required (set auth.code or CODE)",
            ));
        }
        if self.llm.model.is_empty() {
            return Err(Error::config("LLM model is required"));
        }
        if self.llm.timeout_secs == 0 || self.search.timeout_secs == 0 {
            return Err(Error::config("Timeouts must be greater than zero"));
        }
        Ok(())
    }
}
