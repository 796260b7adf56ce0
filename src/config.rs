//! Configuration Module
//! Dashboard settings read from a JSON file, every field optional.

use crate::data::NormalizeOptions;
use crate::stats::TopN;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "ADMISSION_DASHBOARD_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub missing_label: String,
    pub blank_as_missing: bool,
    pub default_top_n: usize,
    pub sample_size: usize,
    pub sample_seed: Option<u64>,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let normalize = NormalizeOptions::default();
        Self {
            missing_label: normalize.missing_label,
            blank_as_missing: normalize.blank_as_missing,
            default_top_n: TopN::DEFAULT,
            sample_size: 500,
            sample_seed: None,
            chart_width: 1400,
            chart_height: 700,
        }
    }
}

impl DashboardConfig {
    /// Load from `$ADMISSION_DASHBOARD_CONFIG` or `./dashboard.json`.
    /// A missing file means defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            missing_label: self.missing_label.clone(),
            blank_as_missing: self.blank_as_missing,
        }
    }

    pub fn top_n(&self) -> TopN {
        TopN::clamped(self.default_top_n)
    }
}
