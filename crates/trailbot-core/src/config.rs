//! Host configuration, stored as JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use trailbot_logic::trail::TrailKind;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Milliseconds between logical pulses
    pub pulse_interval_ms: u64,
    /// Milliseconds the poll loop sleeps between system ticks
    pub poll_sleep_ms: u64,
    /// Trail new games are played on
    pub trail: TrailKind,
    /// Fixed random seed, offset per session. Random when unset.
    pub seed: Option<u64>,
    /// Where image hints are looked up
    pub asset_dir: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            pulse_interval_ms: 1000,
            poll_sleep_ms: 1,
            trail: TrailKind::Oregon,
            seed: None,
            asset_dir: None,
        }
    }
}

impl SimulationConfig {
    /// Load from `path`, writing the defaults there first if it is missing.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            log::info!("wrote default config to {}", path.display());
            return Ok(config);
        }
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn pulse_interval(&self) -> Duration {
        Duration::from_millis(self.pulse_interval_ms)
    }

    pub fn poll_sleep(&self) -> Duration {
        Duration::from_millis(self.poll_sleep_ms)
    }

    /// Full path of an image hint, when an asset directory is configured.
    pub fn asset_path(&self, image: &str) -> Option<PathBuf> {
        self.asset_dir.as_ref().map(|dir| dir.join(image))
    }
}
