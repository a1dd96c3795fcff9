//! Timing table: aggregation of every run into per-checkpoint statistics.
//!
//! The table is built in two phases. A [`TimingTableBuilder`] ingests runs in
//! any order; [`TimingTableBuilder::finalize`] sorts every leg's pool of
//! split times and yields an immutable [`TimingTable`]. Queries that need the
//! sorted pools (delta and best-of-field rows) only exist on the finalized
//! table.
//!
//! Every query takes a list of checkpoint columns and returns one [`Time`]
//! per column. Missing data is [`Time::INVALID`], never an error.
//!
//! ```rust
//! use splitwall::{TimingTableBuilder, parse_competition};
//!
//! let competition = parse_competition(
//!     "1;1001;Anna;Berg;;Long;00:20:00;C;0;10:00:00;31;+;10:05:00;10:20:00;\n\
//!      2;1002;Bo;Dahl;;Long;00:22:00;C;0;10:02:00;31;+;10:05:20;10:24:00;\n",
//! )
//! .into_result()?;
//!
//! let mut builder = TimingTableBuilder::new();
//! builder.ingest_competition(&competition);
//! let table = builder.finalize();
//!
//! let columns = ["START", "31", "FINISH"];
//! let anna = &competition.runs[0];
//! let splits = table.splits(anna, &columns);
//! assert_eq!(splits.iter().map(|t| t.seconds()).collect::<Vec<_>>(), [0, 300, 1200]);
//!
//! // the leg START -> 31 averages (200 + 300) / 2 = 250
//! assert_eq!(table.delta(anna, &columns)[1].seconds(), -50);
//! # Ok::<(), splitwall::TimingError>(())
//! ```

mod stats;


pub use stats::ControlStats;

use std::collections::HashMap;
use tracing::{debug, trace};

use crate::{Competition, Run, Time};

/// Number of fastest leg times averaged into the delta reference.
pub const DEFAULT_REFERENCE_COUNT: usize = 6;

/// State shared by both phases.
#[derive(Debug, Clone, Default)]
struct Aggregates {
    global_start: Option<Time>,
    controls: HashMap<String, ControlStats>,
    run_count: usize,
}

impl Aggregates {
    fn ingest(&mut self, run: &Run) {
        if let Some(start) = run.start.valid() {
            self.global_start = Some(self.global_start.map_or(start, |g| g.min(start)));
        }

        let mut previous: Option<(&str, Time)> = None;
        for (checkpoint, time) in run.checkpoints() {
            let stats = self.controls.entry(checkpoint.to_string()).or_default();

            if let Some((from, from_time)) = previous {
                match time.checked_sub(from_time) {
                    Some(leg) => stats.record_leg(from, &run.si_card, leg),
                    None => trace!(card = %run.si_card, from, to = checkpoint, "Skipping leg without valid times"),
                }
            }
            if let Some(elapsed) = time.checked_sub(run.start) {
                stats.record_relative(&run.si_card, elapsed);
            }

            previous = Some((checkpoint, time));
        }

        self.run_count += 1;
        trace!(card = %run.si_card, punches = run.controls.len(), "Ingested run");
    }

    fn latest_relative(&self, checkpoint: &str, card: &str) -> Option<Time> {
        self.controls.get(checkpoint)?.latest_relative(card)
    }

    fn splits<S: AsRef<str>>(&self, run: &Run, columns: &[S]) -> Vec<Time> {
        columns
            .iter()
            .map(|column| Time::from_option(self.latest_relative(column.as_ref(), &run.si_card)))
            .collect()
    }

    fn race<S: AsRef<str>>(&self, run: &Run, columns: &[S]) -> Vec<Time> {
        columns
            .iter()
            .map(|column| {
                let clock = self
                    .latest_relative(column.as_ref(), &run.si_card)
                    .and_then(|elapsed| run.start.checked_add(elapsed))
                    .and_then(|at| at.checked_sub(self.global_start?));
                Time::from_option(clock)
            })
            .collect()
    }

    fn global_start(&self) -> Time {
        self.global_start.unwrap_or(Time::INF)
    }
}

/// Walk the columns pairwise; the first column has no predecessor.
fn per_leg<S, F>(columns: &[S], mut cell: F) -> Vec<Time>
where
    S: AsRef<str>,
    F: FnMut(&str, &str) -> Option<Time>,
{
    let mut cells = Vec::with_capacity(columns.len());
    let mut previous: Option<&str> = None;
    for column in columns {
        let column = column.as_ref();
        cells.push(Time::from_option(previous.and_then(|from| cell(from, column))));
        previous = Some(column);
    }
    cells
}

/// Mutable ingestion phase of a timing table.
#[derive(Debug, Clone)]
pub struct TimingTableBuilder {
    aggregates: Aggregates,
    reference_count: usize,
}

impl Default for TimingTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingTableBuilder {
    pub fn new() -> Self {
        Self { aggregates: Aggregates::default(), reference_count: DEFAULT_REFERENCE_COUNT }
    }

    /// How many of the fastest leg times the delta reference averages.
    pub fn with_reference_count(mut self, count: usize) -> Self {
        self.reference_count = count;
        self
    }

    /// Add one run. Ingesting the same run twice records every value twice.
    pub fn ingest(&mut self, run: &Run) {
        self.aggregates.ingest(run);
    }

    pub fn ingest_competition(&mut self, competition: &Competition) {
        for run in competition {
            self.ingest(run);
        }
        debug!(
            runs = competition.len(),
            checkpoints = self.aggregates.controls.len(),
            "Ingested competition"
        );
    }

    /// Earliest start seen so far, [`Time::INF`] before any run.
    pub fn global_start(&self) -> Time {
        self.aggregates.global_start()
    }

    pub fn checkpoint_count(&self) -> usize {
        self.aggregates.controls.len()
    }

    pub fn stats(&self, checkpoint: &str) -> Option<&ControlStats> {
        self.aggregates.controls.get(checkpoint)
    }

    /// Time since the run's own start at each column.
    pub fn splits<S: AsRef<str>>(&self, run: &Run, columns: &[S]) -> Vec<Time> {
        self.aggregates.splits(run, columns)
    }

    /// Time since the field's earliest start at each column.
    pub fn race<S: AsRef<str>>(&self, run: &Run, columns: &[S]) -> Vec<Time> {
        self.aggregates.race(run, columns)
    }

    /// Sort every split pool and freeze the table.
    pub fn finalize(mut self) -> TimingTable {
        let mut ranked_relative = HashMap::with_capacity(self.aggregates.controls.len());
        let mut legs = 0;
        for (checkpoint, stats) in &mut self.aggregates.controls {
            stats.sort_pools();
            legs += stats.leg_count();
            ranked_relative.insert(checkpoint.clone(), stats.ranked_relative());
        }

        debug!(
            runs = self.aggregates.run_count,
            checkpoints = self.aggregates.controls.len(),
            legs,
            "Finalized timing table"
        );

        TimingTable {
            aggregates: self.aggregates,
            reference_count: self.reference_count,
            ranked_relative,
        }
    }
}

/// Finalized, read-only timing table.
#[derive(Debug, Clone)]
pub struct TimingTable {
    aggregates: Aggregates,
    reference_count: usize,
    /// checkpoint -> latest relative time of every participant, fastest first
    ranked_relative: HashMap<String, Vec<Time>>,
}

impl TimingTable {
    /// Ingest a whole competition and finalize with the default reference count.
    pub fn from_competition(competition: &Competition) -> Self {
        let mut builder = TimingTableBuilder::new();
        builder.ingest_competition(competition);
        builder.finalize()
    }

    /// Earliest start across the field, [`Time::INF`] for an empty table.
    pub fn global_start(&self) -> Time {
        self.aggregates.global_start()
    }

    pub fn checkpoint_count(&self) -> usize {
        self.aggregates.controls.len()
    }

    pub fn run_count(&self) -> usize {
        self.aggregates.run_count
    }

    pub fn reference_count(&self) -> usize {
        self.reference_count
    }

    pub fn stats(&self, checkpoint: &str) -> Option<&ControlStats> {
        self.aggregates.controls.get(checkpoint)
    }

    /// Time since the run's own start at each column.
    pub fn splits<S: AsRef<str>>(&self, run: &Run, columns: &[S]) -> Vec<Time> {
        self.aggregates.splits(run, columns)
    }

    /// Time since the field's earliest start at each column.
    pub fn race<S: AsRef<str>>(&self, run: &Run, columns: &[S]) -> Vec<Time> {
        self.aggregates.race(run, columns)
    }

    /// Reference time minus the run's own time for each leg.
    ///
    /// The leg into column `i` starts at column `i - 1` of `columns`, not at
    /// the run's own previous punch, so the columns must follow the course.
    /// Negative values mean slower than the average of the
    /// [`reference_count`](Self::reference_count) fastest times on that leg.
    pub fn delta<S: AsRef<str>>(&self, run: &Run, columns: &[S]) -> Vec<Time> {
        per_leg(columns, |from, to| {
            let stats = self.stats(to)?;
            let actual = stats.split(from, &run.si_card)?;
            self.leg_reference(stats, from)?.checked_sub(actual)
        })
    }

    /// The `rank`-th (0-based) smallest participant time at each column.
    pub fn best_splits<S: AsRef<str>>(&self, rank: usize, columns: &[S]) -> Vec<Time> {
        columns
            .iter()
            .map(|column| {
                let ranked = self.ranked_relative.get(column.as_ref());
                Time::from_option(ranked.and_then(|xs| xs.get(rank)).copied())
            })
            .collect()
    }

    /// Delta of the `rank`-th (0-based) fastest recorded time on each leg.
    pub fn best_deltas<S: AsRef<str>>(&self, rank: usize, columns: &[S]) -> Vec<Time> {
        per_leg(columns, |from, to| {
            let stats = self.stats(to)?;
            let leg = *stats.split_pool(from).get(rank)?;
            self.leg_reference(stats, from)?.checked_sub(leg)
        })
    }

    fn leg_reference(&self, stats: &ControlStats, from: &str) -> Option<Time> {
        Time::average_of_first(stats.split_pool(from), self.reference_count).valid()
    }
}
