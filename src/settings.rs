//! Runner settings
//!
//! Persisted as JSON next to the binary; anything missing or malformed falls
//! back to defaults with a logged warning.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TICK_MS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; omit for a time-derived seed
    pub seed: Option<u64>,
    /// Tick period in milliseconds
    pub tick_ms: u64,
    /// Stop after this many ticks (run forever when omitted)
    pub max_ticks: Option<u64>,
    /// Let the built-in pilot move the paddles and restart rounds
    pub autoplay: bool,
    /// Emit a JSON snapshot line per tick at trace level
    pub trace_snapshots: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            tick_ms: TICK_MS,
            max_ticks: None,
            autoplay: true,
            trace_snapshots: false,
        }
    }
}

impl Settings {
    /// Settings path: `FAN_PONG_SETTINGS` override or `fan-pong.json`
    pub fn path() -> PathBuf {
        std::env::var_os("FAN_PONG_SETTINGS")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("fan-pong.json"))
    }

    /// Load from the default path, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed settings {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        match serde_json::to_string_pretty(self) {
            Ok(json) => fs::write(path, json),
            Err(err) => Err(std::io::Error::other(err)),
        }
    }
}
