//! Error types for competition parsing and reporting.
//!
//! The timing table itself never fails: missing data surfaces as
//! [`Time::INVALID`](crate::Time::INVALID) cells. Errors only arise at the
//! edges, where text is turned into runs or configuration.
//!
//! ## Error Categories
//!
//! - **Format Errors**: a time field is not a round-trippable `HH:MM:SS`
//! - **Record Errors**: a record line is structurally invalid
//! - **Line / Records**: positional wrappers used while parsing a whole file
//! - **File Errors**: the competition or configuration file cannot be read
//! - **Config Errors**: configuration values are out of range
//!
//! ```rust
//! use splitwall::TimingError;
//!
//! let error = TimingError::at_line(3, TimingError::format_error("7:00"));
//! assert_eq!(error.to_string(), "3: invalid time '7:00': expected HH:MM:SS");
//! assert!(error.is_input_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for splitwall operations.
pub type Result<T, E = TimingError> = std::result::Result<T, E>;

/// Main error type for parsing and reporting.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TimingError {
    #[error("invalid time '{input}': expected HH:MM:SS")]
    Format { input: String },

    #[error("invalid record: {reason}")]
    Record { reason: String },

    #[error("{line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<TimingError>,
    },

    #[error("{}", join_lines(errors))]
    Records { errors: Vec<TimingError> },

    #[error("cannot read {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error in {context}: {details}")]
    Config { context: String, details: String },
}

fn join_lines(errors: &[TimingError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

impl TimingError {
    /// Whether the error was caused by the content of an input file rather
    /// than by the environment.
    pub fn is_input_error(&self) -> bool {
        match self {
            TimingError::Format { .. } | TimingError::Record { .. } => true,
            TimingError::Line { source, .. } => source.is_input_error(),
            TimingError::Records { errors } => errors.iter().all(TimingError::is_input_error),
            TimingError::File { .. } | TimingError::Config { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            TimingError::Format { .. } => vec![
                "Write times as zero-padded HH:MM:SS",
                "Check minutes and seconds are below 60",
            ],
            TimingError::Record { .. } => vec![
                "Check the record has at least 11 ';'-separated fields",
                "Check every control is a complete ID;status;time triplet",
                "Use C, DQ or DNF for the run status and ?, - or + for controls",
            ],
            TimingError::Line { source, .. } => source.recovery_suggestions(),
            TimingError::Records { .. } => vec![
                "Fix or remove the listed lines",
                "Run without --strict to report the valid runs anyway",
            ],
            TimingError::File { .. } => {
                vec!["Check the file exists and is readable", "Check the path spelling"]
            }
            TimingError::Config { .. } => vec![
                "Check the configuration keys and value types",
                "Use a reference count of at least 1",
            ],
        }
    }

    /// Helper constructor for malformed time fields.
    pub fn format_error(input: impl Into<String>) -> Self {
        TimingError::Format { input: input.into() }
    }

    /// Helper constructor for structurally invalid records.
    pub fn record_error(reason: impl Into<String>) -> Self {
        TimingError::Record { reason: reason.into() }
    }

    /// Attach a 1-based line number to an error.
    pub fn at_line(line: usize, source: TimingError) -> Self {
        TimingError::Line { line, source: Box::new(source) }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        TimingError::File { path, source }
    }

    /// Helper constructor for configuration errors.
    pub fn config_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        TimingError::Config { context: context.into(), details: details.into() }
    }
}

impl From<std::io::Error> for TimingError {
    fn from(err: std::io::Error) -> Self {
        TimingError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}
