//! Ordered collection of runs

use serde::{Deserialize, Serialize};

use super::{FINISH, Run, START};

/// Every run of a competition, in input order unless re-sorted.
///
/// Re-sorting does not affect a timing table already built from it: the
/// table keys everything by timing card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub runs: Vec<Run>,
}

impl Competition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, run: Run) {
        self.runs.push(run);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Run> {
        self.runs.iter()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Stable ascending sort by total result.
    pub fn sort_by_result(&mut self) {
        self.runs.sort_by_key(|run| run.result);
    }

    /// Report columns: `START`, the punches of the first correct run in
    /// current order, then `FINISH`.
    ///
    /// The punch order of that run stands in for the course order; delta
    /// queries rely on these columns being adjacent on the course.
    pub fn course_columns(&self) -> Vec<String> {
        let mut columns = vec![START.to_string()];
        if let Some(reference) = self.runs.iter().find(|run| run.is_correct()) {
            columns.extend(reference.controls.iter().map(|c| c.id.clone()));
        }
        columns.push(FINISH.to_string());
        columns
    }
}

impl FromIterator<Run> for Competition {
    fn from_iter<I: IntoIterator<Item = Run>>(iter: I) -> Self {
        Self { runs: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Competition {
    type Item = &'a Run;
    type IntoIter = std::slice::Iter<'a, Run>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}

impl IntoIterator for Competition {
    type Item = Run;
    type IntoIter = std::vec::IntoIter<Run>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.into_iter()
    }
}
