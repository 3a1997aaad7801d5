//! Configuration module for swiftuice
//!
//! This module handles:
//! - Project-level configuration (swiftuice.toml)
//! - Detector threshold overrides
//! - Correlation and export defaults

mod project_config;

pub use project_config::{
    load_project_config, CorrelationConfig, ExportConfig, ProjectConfig, CONFIG_FILE_NAME,
};
