//! Report configuration
//!
//! Loaded from an optional YAML file; every key is optional and falls back to
//! the defaults below. Command-line flags override file values.
//!
//! ```yaml
//! best_rows: 5
//! reference_count: 6
//! delimiter: ";"
//! cell_format: seconds   # or: clock
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::table::DEFAULT_REFERENCE_COUNT;
use crate::{Result, Time, TimingError};

/// How valid time cells are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellFormat {
    /// Integer second count
    #[default]
    Seconds,
    /// `HH:MM:SS`
    Clock,
}

impl CellFormat {
    /// Render a cell; [`Time::INVALID`] is always empty.
    pub fn render(self, time: Time) -> String {
        match time.valid() {
            None => String::new(),
            Some(t) => match self {
                CellFormat::Seconds => t.seconds().to_string(),
                CellFormat::Clock => t.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct ReportConfig {
    /// BEST-k rows above the participants in split and delta reports, at most one per run
    pub best_rows: usize,
    /// Fastest leg times averaged into the delta reference
    pub reference_count: usize,
    pub delimiter: char,
    pub cell_format: CellFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            best_rows: 5,
            reference_count: DEFAULT_REFERENCE_COUNT,
            delimiter: ';',
            cell_format: CellFormat::Seconds,
        }
    }
}

impl ReportConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ReportConfig = serde_yaml_ng::from_str(yaml)
            .map_err(|e| TimingError::config_error("report configuration", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| TimingError::file_error(path.to_path_buf(), e))?;
        let config = Self::from_yaml_str(&yaml)?;
        debug!(path = %path.display(), ?config, "Loaded report configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.reference_count == 0 {
            return Err(TimingError::config_error(
                "reference_count",
                "must average at least one leg time",
            ));
        }
        if matches!(self.delimiter, '\n' | '\r') {
            return Err(TimingError::config_error("delimiter", "cannot be a line break"));
        }
        Ok(())
    }
}
