//! Test utilities for building runs and competitions
//!
//! Shared by unit tests, integration tests and benchmarks so fixtures are
//! written once, in record-file terms (`HH:MM:SS` strings, card ids).

#![cfg(any(test, feature = "benchmark"))]

use crate::{Competition, Control, ControlStatus, Run, Status, Time};

/// Small field on one course: three finishers and one DNF with a missing punch.
pub const SAMPLE_RECORDS: &str = "\
1;1001;Anna;Berg;OK Linne;Long;00:20:00;C;0;10:00:00;31;+;10:05:00;32;+;10:12:00;10:20:00;
2;1002;Bo;Dahl;IFK Lidingo;Long;00:22:00;C;0;10:02:00;31;+;10:06:20;32;+;10:14:30;10:24:00;
3;1003;Cia;Ek;OK Linne;Long;00:19:00;C;0;10:04:00;31;+;10:08:10;32;+;10:15:00;10:23:00;
4;1004;Dan;Falk;Tullinge SK;Long;00:00:00;DNF;0;10:06:00;31;+;10:12:00;10:40:00;
";

/// Parse a clock string that is known to be valid.
pub fn time(text: &str) -> Time {
    Time::parse(text).unwrap_or_else(|e| panic!("bad fixture time {text:?}: {e}"))
}

/// Builder for [`Run`] fixtures.
#[derive(Debug, Clone)]
pub struct RunBuilder {
    run: Run,
    explicit_result: bool,
}

impl RunBuilder {
    pub fn new(si_card: &str) -> Self {
        Self {
            run: Run {
                number: si_card.to_string(),
                si_card: si_card.to_string(),
                first_name: "Runner".to_string(),
                last_name: si_card.to_string(),
                info: String::new(),
                course: "Long".to_string(),
                result: Time::ZERO,
                status: Status::Correct,
                point: "0".to_string(),
                start: Time::ZERO,
                controls: Vec::new(),
                finish: Time::ZERO,
            },
            explicit_result: false,
        }
    }

    pub fn name(mut self, first: &str, last: &str) -> Self {
        self.run.first_name = first.to_string();
        self.run.last_name = last.to_string();
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.run.status = status;
        self
    }

    pub fn start(mut self, at: &str) -> Self {
        self.run.start = time(at);
        self
    }

    pub fn punch(self, id: &str, at: &str) -> Self {
        self.punch_with(id, ControlStatus::Correct, at)
    }

    pub fn punch_with(mut self, id: &str, status: ControlStatus, at: &str) -> Self {
        self.run.controls.push(Control { id: id.to_string(), status, time: time(at) });
        self
    }

    pub fn finish(mut self, at: &str) -> Self {
        self.run.finish = time(at);
        self
    }

    /// Override the result; by default it is `finish - start`.
    pub fn result(mut self, duration: &str) -> Self {
        self.run.result = time(duration);
        self.explicit_result = true;
        self
    }

    pub fn build(mut self) -> Run {
        if !self.explicit_result {
            self.run.result = self.run.finish.checked_sub(self.run.start).unwrap_or(Time::ZERO);
        }
        self.run
    }
}

/// Render a run back into a record line (with the trailing empty field).
pub fn record_line(run: &Run) -> String {
    let mut fields = vec![
        run.number.clone(),
        run.si_card.clone(),
        run.first_name.clone(),
        run.last_name.clone(),
        run.info.clone(),
        run.course.clone(),
        run.result.to_string(),
        run.status.to_string(),
        run.point.clone(),
        run.start.to_string(),
    ];
    for control in &run.controls {
        fields.push(control.id.clone());
        fields.push(control.status.to_string());
        fields.push(control.time.to_string());
    }
    fields.push(run.finish.to_string());
    format!("{};", fields.join(";"))
}

/// [`SAMPLE_RECORDS`] parsed into a competition.
pub fn sample_competition() -> Competition {
    crate::parse_competition(SAMPLE_RECORDS)
        .into_result()
        .unwrap_or_else(|e| panic!("sample records must parse: {e}"))
}

/// A synthetic field of `runners` runs over `controls` checkpoints, for benchmarks.
pub fn synthetic_competition(runners: usize, controls: usize) -> Competition {
    (0..runners)
        .map(|i| {
            let start = 36_000 + (i as i64 % 120) * 60;
            let mut at = start;
            let punches = (0..controls)
                .map(|c| {
                    at += 120 + ((i * 7 + c * 13) % 90) as i64;
                    Control {
                        id: format!("{}", 31 + c),
                        status: ControlStatus::Correct,
                        time: Time::from_seconds(at),
                    }
                })
                .collect::<Vec<_>>();
            let finish = at + 60 + (i % 30) as i64;
            Run {
                number: i.to_string(),
                si_card: format!("{}", 100_000 + i),
                first_name: "Runner".to_string(),
                last_name: i.to_string(),
                info: String::new(),
                course: "Long".to_string(),
                result: Time::from_seconds(finish - start),
                status: Status::Correct,
                point: "0".to_string(),
                start: Time::from_seconds(start),
                controls: punches,
                finish: Time::from_seconds(finish),
            }
        })
        .collect()
}
