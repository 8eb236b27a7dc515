//! Loop-fill run settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{LoopFillError, Result};

/// Target duration used when neither the config file nor the caller sets one
pub const DEFAULT_TARGET_DURATION_SECS: f64 = 60.0;

/// File name given to the rendered WAV
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "edited_audio.wav";

/// Loop-fill configuration
///
/// Stored as YAML; every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopFillConfig {
    /// Length of the rendered output in seconds
    /// Default: 60.0
    pub target_duration_secs: f64,

    /// File name of the rendered WAV
    /// Default: "edited_audio.wav"
    pub output_file_name: String,

    /// Directory the WAV is written to
    /// Default: None (next to the input file)
    pub output_dir: Option<PathBuf>,
}

impl Default for LoopFillConfig {
    fn default() -> Self {
        Self {
            target_duration_secs: DEFAULT_TARGET_DURATION_SECS,
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            output_dir: None,
        }
    }
}

impl LoopFillConfig {
    /// Check the values are usable for a run
    pub fn validate(&self) -> Result<()> {
        if !(self.target_duration_secs.is_finite() && self.target_duration_secs > 0.0) {
            return Err(LoopFillError::InvalidArgument(format!(
                "target_duration_secs must be a positive number, got {}",
                self.target_duration_secs
            )));
        }
        if self.output_file_name.trim().is_empty() {
            return Err(LoopFillError::InvalidArgument(
                "output_file_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Where the output for `input` goes
    ///
    /// `output_dir` if set, otherwise the input's own directory.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };
        dir.join(&self.output_file_name)
    }
}
