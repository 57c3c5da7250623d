use crate::aggregate::{DEFAULT_OTHER_LABEL, DEFAULT_TOP_N};
use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Report settings, read from an optional JSON file.
///
/// Missing keys fall back to the defaults, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Named slices in the revenue share chart before the overflow slice.
    pub top_n: usize,
    pub other_label: String,
    pub delimiter: char,
    pub preview_rows: usize,
    pub export_dir: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            other_label: DEFAULT_OTHER_LABEL.to_string(),
            delimiter: ',',
            preview_rows: 10,
            export_dir: None,
        }
    }
}

impl ReportConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)?;
        let config: ReportConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(ReportError::Config("top_n must be at least 1".into()));
        }
        if self.other_label.is_empty() {
            return Err(ReportError::Config("other_label must not be empty".into()));
        }
        self.delimiter_byte()?;
        Ok(())
    }

    /// The delimiter as the byte the CSV reader expects. Only ASCII
    /// characters fit in one byte of UTF-8 text.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ReportError::Config(format!(
                "delimiter {:?} is not a single-byte character",
                self.delimiter
            )))
        }
    }
}
