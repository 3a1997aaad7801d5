//! Project-level configuration support
//!
//! Loads `swiftuice.toml` from an explicit path, the Swift source root, or
//! the current directory, in that order.
//!
//! # Configuration Format
//!
//! ```toml
//! # swiftuice.toml
//!
//! [thresholds]
//! excessive_rerender_count = 10
//! cascade_depth_limit = 4
//! frequent_trigger_count = 15
//! high_confidence = 0.7
//!
//! [correlation]
//! exclude_dirs = ["Generated"]
//!
//! [export]
//! format = "auto"
//! timeout_minutes = 30
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::detectors::Thresholds;
use crate::xctrace::ExportFormat;

/// File name searched for in the source root and the working directory
pub const CONFIG_FILE_NAME: &str = "swiftuice.toml";

/// Project-level configuration loaded from swiftuice.toml
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ProjectConfig {
    /// Detector sensitivity
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Source correlation settings
    #[serde(default)]
    pub correlation: CorrelationConfig,

    /// Trace export settings
    #[serde(default)]
    pub export: ExportConfig,
}

/// Extra directories skipped when indexing Swift sources
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct CorrelationConfig {
    #[serde(default)]
    pub exclude_dirs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExportConfig {
    /// auto, xml, json or csv
    #[serde(default = "default_export_format")]
    pub format: String,
    #[serde(default = "default_timeout_minutes")]
    pub timeout_minutes: u64,
}

fn default_export_format() -> String {
    "auto".to_string()
}

fn default_timeout_minutes() -> u64 {
    30
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_export_format(),
            timeout_minutes: default_timeout_minutes(),
        }
    }
}

impl ExportConfig {
    /// Configured format; an unknown name falls back to auto
    pub fn export_format(&self) -> ExportFormat {
        match self.format.parse() {
            Ok(format) => format,
            Err(e) => {
                warn!("{} in {}, using auto", e, CONFIG_FILE_NAME);
                ExportFormat::Auto
            }
        }
    }

    /// Export timeout; zero minutes is treated as the default
    pub fn timeout(&self) -> Duration {
        let minutes = if self.timeout_minutes == 0 {
            default_timeout_minutes()
        } else {
            self.timeout_minutes
        };
        Duration::from_secs(minutes.saturating_mul(60))
    }
}

/// Candidate config files, most specific first
fn candidates(explicit: Option<&Path>, source_root: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
    }
    if let Some(root) = source_root {
        paths.push(root.join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

/// Load project configuration.
///
/// Searches in this order:
/// 1. `explicit` (the `--config` flag)
/// 2. `<source_root>/swiftuice.toml`
/// 3. `./swiftuice.toml`
///
/// The first file that exists is used. A file that fails to load is
/// reported and replaced by defaults rather than aborting the run.
pub fn load_project_config(explicit: Option<&Path>, source_root: Option<&Path>) -> ProjectConfig {
    if let Some(path) = explicit.filter(|p| !p.exists()) {
        warn!("Config file {} not found", path.display());
    }

    for path in candidates(explicit, source_root) {
        if !path.is_file() {
            continue;
        }
        return match load_toml_config(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}, using defaults", path.display(), e);
                ProjectConfig::default()
            }
        };
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests;
