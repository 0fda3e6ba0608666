use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::classifier::DEFAULT_REMOTE_TIMEOUT;
use crate::fetch::DEFAULT_FETCH_TIMEOUT;

pub const DEFAULT_BATCH_WIDTH: usize = 12;
pub const DEFAULT_CLASSIFIER_TEMPLATE: &str = "fake_news_detector";

/// Runtime knobs for one detector instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorSettings {
    pub fetch_timeout: Duration,
    pub remote_timeout: Duration,
    pub batch_width: usize,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
            batch_width: DEFAULT_BATCH_WIDTH,
        }
    }
}

impl DetectorSettings {
    pub fn new(fetch_timeout_secs: u64, remote_timeout_secs: u64, batch_width: usize) -> Self {
        Self {
            fetch_timeout: Duration::from_secs(fetch_timeout_secs.max(1)),
            remote_timeout: Duration::from_secs(remote_timeout_secs.max(1)),
            batch_width: batch_width.max(1),
        }
    }
}

/// awful_aj locations: base dir, config file, template dir.
pub struct AjPaths {
    pub base_dir: PathBuf,
    pub config: PathBuf,
    pub templates: PathBuf,
}

pub fn resolve_paths() -> Result<AjPaths> {
    // 1) Base config dir - prefer env override, else awful_aj::config_dir()
    let base_dir = if let Ok(dir) = std::env::var("AJ_CONFIG_DIR") {
        PathBuf::from(dir)
    } else {
        awful_aj::config_dir().map_err(|e| anyhow!(e.to_string()))?
    };

    // 2) Config file - prefer AJ_CONFIG, else <base>/config.yaml
    let config = match std::env::var("AJ_CONFIG") {
        Ok(p) => PathBuf::from(p),
        Err(_) => base_dir.join("config.yaml"),
    };

    // 3) Template dir - prefer AJ_TEMPLATE_DIR, else <base>/templates
    let templates = match std::env::var("AJ_TEMPLATE_DIR") {
        Ok(p) => PathBuf::from(p),
        Err(_) => {
            let d = base_dir.join("templates");
            // make it visible to awful_aj::template loader
            std::env::set_var("AJ_TEMPLATE_DIR", &d);
            d
        }
    };

    Ok(AjPaths {
        base_dir,
        config,
        templates,
    })
}

pub fn classifier_template_name() -> String {
    std::env::var("AJ_TEMPLATE_CLASSIFIER").unwrap_or_else(|_| DEFAULT_CLASSIFIER_TEMPLATE.to_string())
}
