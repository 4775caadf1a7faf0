//! Editor configuration persisted as JSON in the user config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trackview_core::{FrameRate, Result, TrackViewError};

/// Settings that outlive a single editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Frame rate used to show times in frames.
    pub frame_rate: FrameRate,
    /// Maximum number of undo steps kept.
    pub undo_depth: usize,
    /// Default tracing filter; `RUST_LOG` overrides it.
    pub log_level: String,
    /// Sequence file opened last.
    pub last_file: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            frame_rate: FrameRate::FPS_30,
            undo_depth: 200,
            log_level: "info".into(),
            last_file: None,
        }
    }
}

impl EditorConfig {
    /// `<config dir>/trackview/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trackview").join("config.json"))
    }

    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read(path)?;
        let config: Self = serde_json::from_slice(&data).map_err(|e| {
            TrackViewError::Serialization(format!("Invalid config {}: {}", path.display(), e))
        })?;
        if !config.frame_rate.is_valid() {
            return Err(TrackViewError::InvalidParameter(format!(
                "frame rate {}/{} in {}",
                config.frame_rate.numerator,
                config.frame_rate.denominator,
                path.display()
            )));
        }
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()
            .ok_or_else(|| TrackViewError::NotFound("user config directory".into()))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(self)
            .map_err(|e| TrackViewError::Serialization(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, data)?;
        Ok(())
    }
}
