//! Split, race and delta report tables
//!
//! A report has a header row (`Name`, `Course`, then one column per
//! checkpoint) followed by one row per run. Split and delta reports also
//! carry `BEST-1..BEST-k` rows above the participants, built from the whole
//! field rather than from any one run.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use tracing::debug;

use crate::{Competition, ReportConfig, Time, TimingError, TimingTable, TimingTableBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Time since each runner's own start
    Split,
    /// Time since the earliest start of the field
    Race,
    /// Leg time against the average of the fastest legs
    Delta,
}

impl ReportKind {
    pub fn name(self) -> &'static str {
        match self {
            ReportKind::Split => "split",
            ReportKind::Race => "race",
            ReportKind::Delta => "delta",
        }
    }

    /// Race reports have no field-wide leaderboard rows.
    pub fn has_best_rows(self) -> bool {
        !matches!(self, ReportKind::Race)
    }
}

impl FromStr for ReportKind {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "split" => Ok(ReportKind::Split),
            "race" => Ok(ReportKind::Race),
            "delta" => Ok(ReportKind::Delta),
            other => Err(TimingError::config_error("report kind", format!("unknown mode {}", other))),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub name: String,
    pub course: String,
    /// One cell per report column
    pub cells: Vec<Time>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub kind: ReportKind,
    pub columns: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Sort the competition by result, aggregate it and build the report.
    pub fn generate(kind: ReportKind, mut competition: Competition, config: &ReportConfig) -> Self {
        competition.sort_by_result();

        let mut builder = TimingTableBuilder::new().with_reference_count(config.reference_count);
        builder.ingest_competition(&competition);
        let table = builder.finalize();

        Self::build(kind, &competition, &table, config)
    }

    /// Build rows for every run of `competition`, in its current order.
    ///
    /// Columns are derived from the first correct run, see
    /// [`Competition::course_columns`].
    pub fn build(
        kind: ReportKind,
        competition: &Competition,
        table: &TimingTable,
        config: &ReportConfig,
    ) -> Self {
        let columns = competition.course_columns();

        // ranks past the field size would only produce empty rows
        let best_rows =
            if kind.has_best_rows() { config.best_rows.min(competition.len()) } else { 0 };
        let mut rows = Vec::with_capacity(best_rows + competition.len());
        for rank in 0..best_rows {
            let cells = match kind {
                ReportKind::Delta => table.best_deltas(rank, &columns),
                _ => table.best_splits(rank, &columns),
            };
            rows.push(ReportRow { name: format!("BEST-{}", rank + 1), course: String::new(), cells });
        }

        for run in competition {
            let cells = match kind {
                ReportKind::Split => table.splits(run, &columns),
                ReportKind::Race => table.race(run, &columns),
                ReportKind::Delta => table.delta(run, &columns),
            };
            rows.push(ReportRow { name: run.full_name(), course: run.course.clone(), cells });
        }

        debug!(kind = %kind, columns = columns.len(), rows = rows.len(), "Built report");
        Self { kind, columns, rows }
    }

    /// Write the delimited table; every cell, including the last, is
    /// followed by the delimiter.
    pub fn write_to<W: Write>(&self, out: &mut W, config: &ReportConfig) -> io::Result<()> {
        let d = config.delimiter;

        write!(out, "Name{d}Course{d}")?;
        for column in &self.columns {
            write!(out, "{column}{d}")?;
        }
        writeln!(out)?;

        for row in &self.rows {
            write!(out, "{}{d}{}{d}", row.name, row.course)?;
            for cell in &row.cells {
                write!(out, "{}{d}", config.cell_format.render(*cell))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn render(&self, config: &ReportConfig) -> String {
        let mut out = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.write_to(&mut out, config);
        String::from_utf8_lossy(&out).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellFormat;
    use crate::test_utils::sample_competition;

    fn report(kind: ReportKind, config: &ReportConfig) -> Report {
        Report::generate(kind, sample_competition(), config)
    }

    #[test]
    fn split_report_lists_best_rows_then_runs_by_result() {
        let config = ReportConfig { best_rows: 2, ..ReportConfig::default() };
        let text = report(ReportKind::Split, &config).render(&config);
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(
            lines,
            [
                "Name;Course;START;31;32;FINISH;",
                "BEST-1;;0;250;660;1140;",
                "BEST-2;;0;260;720;1200;",
                "Dan Falk;Long;0;360;;2040;",
                "Cia Ek;Long;0;250;660;1140;",
                "Anna Berg;Long;0;300;720;1200;",
                "Bo Dahl;Long;0;260;750;1320;",
            ]
        );
    }

    #[test]
    fn race_report_has_no_best_rows() {
        let config = ReportConfig::default();
        let built = report(ReportKind::Race, &config);
        assert_eq!(built.rows.len(), 4);

        let text = built.render(&config);
        // Cia starts 4 minutes after the earliest start
        assert!(text.lines().any(|l| l == "Cia Ek;Long;240;490;900;1380;"));
    }

    #[test]
    fn delta_report_starts_every_row_empty() {
        let config = ReportConfig::default();
        let built = report(ReportKind::Delta, &config);
        // five BEST rows requested, clamped to the four runs
        assert_eq!(built.rows.len(), 4 + 4);
        assert!(built.rows.iter().all(|row| row.cells[0].is_invalid()));

        let text = built.render(&config);
        assert!(text.lines().any(|l| l == "Anna Berg;Long;;-8;20;30;"));
        assert!(text.lines().any(|l| l == "BEST-4;;;-68;;;"));
    }

    #[test]
    fn clock_cells_and_custom_delimiter() {
        let config = ReportConfig { best_rows: 0, delimiter: ',', cell_format: CellFormat::Clock, ..ReportConfig::default() };
        let text = report(ReportKind::Split, &config).render(&config);
        assert!(text.starts_with("Name,Course,START,31,32,FINISH,\n"));
        assert!(text.lines().any(|l| l == "Anna Berg,Long,00:00:00,00:05:00,00:12:00,00:20:00,"));
    }

    #[test]
    fn empty_competition_renders_header_only() {
        let config = ReportConfig { best_rows: 1, ..ReportConfig::default() };
        let built = Report::generate(ReportKind::Split, Competition::new(), &config);
        assert_eq!(built.render(&config), "Name;Course;START;FINISH;\n");
    }

    #[test]
    fn best_rows_are_clamped_to_the_field() {
        let config = ReportConfig { best_rows: usize::MAX, ..ReportConfig::default() };
        assert!(config.validate().is_ok());

        for kind in [ReportKind::Split, ReportKind::Delta] {
            let built = report(kind, &config);
            let best = built.rows.iter().filter(|row| row.name.starts_with("BEST-")).count();
            assert_eq!(best, 4);
            assert_eq!(built.rows.len(), 8);
        }
    }

    #[test]
    fn kinds_parse_from_mode_names() {
        for kind in [ReportKind::Split, ReportKind::Race, ReportKind::Delta] {
            assert_eq!(kind.name().parse::<ReportKind>().unwrap(), kind);
        }
        assert!("splits".parse::<ReportKind>().is_err());
        assert!(!ReportKind::Race.has_best_rows());
    }

    #[test]
    fn kinds_serialize_as_mode_names() {
        let yaml = serde_yaml_ng::to_string(&ReportKind::Delta).unwrap();
        assert_eq!(yaml.trim(), "delta");
        assert_eq!(serde_yaml_ng::from_str::<ReportKind>("race").unwrap(), ReportKind::Race);
        assert!(serde_yaml_ng::from_str::<ReportKind>("Race").is_err());
    }
}
