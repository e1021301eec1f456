//! Dashboard configuration: an optional TOML file overlaid with `FLOCK_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use flock_core::listing::DEFAULT_PAGE_SIZE;
use serde::Deserialize;

/// Shape of `flock.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
  /// Sites per page.
  pub page_size:  usize,
  /// When set, generate mock sites from this seed instead of the demo set.
  pub seed:       Option<u64>,
  /// Number of sites to generate when `seed` is set.
  pub site_count: usize,
  /// Where to write logs while the terminal UI is running.
  pub log_file:   Option<PathBuf>,
}

impl Default for DashboardConfig {
  fn default() -> Self {
    Self {
      page_size:  DEFAULT_PAGE_SIZE,
      seed:       None,
      site_count: 30,
      log_file:   None,
    }
  }
}

impl DashboardConfig {
  /// Load `path` (if it exists), then apply `FLOCK_*` overrides.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("FLOCK").try_parsing(true))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?
      .try_deserialize()
      .context("failed to deserialise DashboardConfig")
  }
}
