use std::path::Path;

use anyhow::{Result, bail};
use serde::Deserialize;

use crate::parsers::browser::Browser;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub default_limit: usize,
    pub auto_order: Vec<Browser>,
    pub firefox_profile_glob: String,
    pub snapshot_suffix: String,
}

const DEFAULT_CONFIG: &[u8] = include_bytes!("../config/default.yml");

impl Default for Config {
    fn default() -> Self {
        Self {
            default_limit: 200,
            auto_order: Browser::ALL.to_vec(),
            firefox_profile_glob: crate::platform::DEFAULT_FIREFOX_PROFILE_GLOB.to_string(),
            snapshot_suffix: crate::parsers::DEFAULT_SNAPSHOT_SUFFIX.to_string(),
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let bytes: Vec<u8> = if let Some(p) = path {
        std::fs::read(p)?
    } else {
        DEFAULT_CONFIG.to_vec()
    };

    let config: Config = serde_yaml::from_slice(&bytes)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.default_limit == 0 {
        bail!("default_limit must be at least 1");
    }
    if config.auto_order.is_empty() {
        bail!("auto_order must name at least one browser");
    }
    if let Err(err) = globset::Glob::new(&config.firefox_profile_glob) {
        bail!(
            "invalid firefox_profile_glob {:?}: {err}",
            config.firefox_profile_glob
        );
    }
    if config.snapshot_suffix.contains(['/', '\\']) {
        bail!("snapshot_suffix must not contain path separators");
    }
    Ok(())
}
