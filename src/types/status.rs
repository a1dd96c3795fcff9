//! Run and control punch status codes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TimingError;

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "C")]
    Correct,
    #[serde(rename = "DQ")]
    Disqualified,
    #[serde(rename = "DNF")]
    DidNotFinish,
}

impl Status {
    /// Code used in record files.
    pub fn code(self) -> &'static str {
        match self {
            Status::Correct => "C",
            Status::Disqualified => "DQ",
            Status::DidNotFinish => "DNF",
        }
    }
}

impl FromStr for Status {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(Status::Correct),
            "DQ" => Ok(Status::Disqualified),
            "DNF" => Ok(Status::DidNotFinish),
            other => Err(TimingError::record_error(format!("unknown run status '{}'", other))),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Verdict on a single punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlStatus {
    #[serde(rename = "?")]
    Undefined,
    #[serde(rename = "-")]
    Wrong,
    #[serde(rename = "+")]
    Correct,
}

impl ControlStatus {
    pub fn code(self) -> &'static str {
        match self {
            ControlStatus::Undefined => "?",
            ControlStatus::Wrong => "-",
            ControlStatus::Correct => "+",
        }
    }
}

impl FromStr for ControlStatus {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "?" => Ok(ControlStatus::Undefined),
            "-" => Ok(ControlStatus::Wrong),
            "+" => Ok(ControlStatus::Correct),
            other => Err(TimingError::record_error(format!("unknown control status '{}'", other))),
        }
    }
}

impl fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
