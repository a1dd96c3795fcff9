//! Split, race-clock and delta statistics for checkpoint-based races.
//!
//! Splitwall reads orienteering-style punch records, aggregates every run into
//! per-checkpoint statistics and reports, for each participant and checkpoint:
//!
//! - **Splits**: time since the participant's own start
//! - **Race**: time since the earliest start of the whole field
//! - **Delta**: leg time against the average of the fastest legs
//! - **Best of field**: leaderboard rows built from the whole field
//!
//! Missing data never fails a query; it surfaces as [`Time::INVALID`] cells.
//!
//! ## Example
//!
//! ```rust
//! use splitwall::{Report, ReportConfig, ReportKind, parse_competition};
//!
//! let data = "\
//! 1;1001;Anna;Berg;OK Linne;Long;00:20:00;C;0;10:00:00;31;+;10:05:00;10:20:00;
//! 2;1002;Bo;Dahl;IFK Lidingo;Long;00:22:00;C;0;10:02:00;31;+;10:06:20;10:24:00;
//! ";
//! let competition = parse_competition(data).into_result()?;
//!
//! let config = ReportConfig { best_rows: 1, ..ReportConfig::default() };
//! let report = Report::generate(ReportKind::Split, competition, &config);
//! assert_eq!(
//!     report.render(&config),
//!     "Name;Course;START;31;FINISH;\n\
//!      BEST-1;;0;260;1200;\n\
//!      Anna Berg;Long;0;300;1200;\n\
//!      Bo Dahl;Long;0;260;1320;\n"
//! );
//! # Ok::<(), splitwall::TimingError>(())
//! ```

pub mod config;
mod error;
pub mod record;
pub mod report;
pub mod table;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

pub use config::{CellFormat, ReportConfig};
pub use error::*;
pub use record::{ParsedCompetition, parse_competition, parse_run};
pub use report::{Report, ReportKind, ReportRow};
pub use table::{ControlStats, TimingTable, TimingTableBuilder};
pub use types::*;
