//! Sequence file persistence.
//!
//! Files are pretty JSON objects carrying a `version` field. Files written
//! before versioning were a bare array of sequences and are still accepted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use trackview_core::{Result, TrackViewError};

use crate::sequence::Sequence;

/// Schema version written by this build.
pub const CURRENT_VERSION: u32 = 1;

/// `app_version` recorded for files upgraded from the bare-array layout.
const LEGACY_APP_VERSION: &str = "unversioned";

/// Every sequence of a level, as stored on disk.
#[derive(Debug, Serialize, Deserialize)]
pub struct SequenceFile {
    pub version: u32,
    pub sequences: Vec<Sequence>,
    /// Version of the editor that wrote the file.
    pub app_version: String,
}

impl SequenceFile {
    pub fn new(sequences: Vec<Sequence>) -> Self {
        Self {
            version: CURRENT_VERSION,
            sequences,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| {
            TrackViewError::Serialization(format!("cannot encode sequence file: {e}"))
        })
    }

    /// Parse either layout. Objects must carry a `version` this build knows.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(data).map_err(malformed)?;

        if value.is_array() {
            let sequences: Vec<Sequence> = serde_json::from_value(value).map_err(malformed)?;
            debug!(count = sequences.len(), "upgrading unversioned sequence file");
            return Ok(Self {
                version: CURRENT_VERSION,
                sequences,
                app_version: LEGACY_APP_VERSION.to_owned(),
            });
        }
        if !value.is_object() {
            return Err(TrackViewError::Serialization(
                "sequence file must be an object or an array of sequences".into(),
            ));
        }

        match value.get("version").and_then(Value::as_u64) {
            Some(version) if version == u64::from(CURRENT_VERSION) => {
                serde_json::from_value(value).map_err(malformed)
            }
            Some(version) => Err(TrackViewError::Serialization(format!(
                "sequence file version {version} is not supported (this build reads {CURRENT_VERSION})"
            ))),
            None => Err(TrackViewError::Serialization(
                "sequence file object has no version".into(),
            )),
        }
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), count = self.sequences.len(), "sequences saved");
        Ok(())
    }

    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let file = Self::from_json(&std::fs::read(path)?)?;
        info!(path = %path.display(), count = file.sequences.len(), "sequences loaded");
        Ok(file)
    }
}

fn malformed(e: serde_json::Error) -> TrackViewError {
    TrackViewError::Serialization(format!("malformed sequence file: {e}"))
}
