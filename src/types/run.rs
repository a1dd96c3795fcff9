//! Run records and control punches

use serde::{Deserialize, Serialize};

use super::{ControlStatus, Status, Time};

/// Synthetic checkpoint injected before a run's first punch.
pub const START: &str = "START";
/// Synthetic checkpoint injected after a run's last punch.
pub const FINISH: &str = "FINISH";

/// A single checkpoint punch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    /// Checkpoint identifier
    pub id: String,
    pub status: ControlStatus,
    /// Absolute punch time
    pub time: Time,
}

/// One participant's timed run.
///
/// `controls` are in the order the participant visited them, which is not
/// necessarily the course order. `start <= control.time <= finish` is
/// expected but not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub number: String,
    /// Timing-card id; keys all of this participant's data in the timing table.
    pub si_card: String,
    pub first_name: String,
    pub last_name: String,
    /// Club, organisation or school
    pub info: String,
    pub course: String,
    /// Total time spent
    pub result: Time,
    pub status: Status,
    pub point: String,
    /// Absolute start time
    pub start: Time,
    pub controls: Vec<Control>,
    /// Absolute finish time
    pub finish: Time,
}

impl Run {
    /// `"First Last"` as shown in report rows.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_correct(&self) -> bool {
        self.status == Status::Correct
    }

    /// Walk `START`, every punch in visitation order, then `FINISH`.
    pub fn checkpoints(&self) -> impl Iterator<Item = (&str, Time)> + '_ {
        std::iter::once((START, self.start))
            .chain(self.controls.iter().map(|c| (c.id.as_str(), c.time)))
            .chain(std::iter::once((FINISH, self.finish)))
    }
}
