//! Record-file parsing
//!
//! One line per run, fields separated by `;`:
//!
//! ```text
//! Number;SICard;FirstName;LastName;Info;Course;Result;Status;Point;Start;[ControlID;ControlStatus;ControlTime]*;Finish
//! ```
//!
//! A trailing empty field is tolerated. Parsing a whole file is best effort:
//! every rejected line is collected and the valid runs are still returned.

use tracing::{info, warn};

use crate::{Competition, Control, Result, Run, Time, TimingError};

const DELIMITER: char = ';';
/// Ten leading fields plus the finish time.
const MIN_FIELDS: usize = 11;
const LEADING_FIELDS: usize = 10;

/// Parse one record line into a [`Run`].
pub fn parse_run(line: &str) -> Result<Run> {
    let mut fields = line.split(DELIMITER).collect::<Vec<_>>();
    if fields.len() < MIN_FIELDS {
        return Err(TimingError::record_error(format!(
            "too few fields: expected at least {}, found {}",
            MIN_FIELDS,
            fields.len()
        )));
    }
    if fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    let Some((finish, body)) = fields.split_last() else {
        return Err(TimingError::record_error("empty record"));
    };
    if body.len() < LEADING_FIELDS {
        return Err(TimingError::record_error(format!(
            "too few fields: expected at least {}, found {}",
            MIN_FIELDS,
            fields.len()
        )));
    }

    let (leading, control_fields) = body.split_at(LEADING_FIELDS);
    if control_fields.len() % 3 != 0 {
        return Err(TimingError::record_error(format!(
            "invalid number of control data-points: {} fields is not a multiple of 3",
            control_fields.len()
        )));
    }

    let controls = control_fields
        .chunks_exact(3)
        .map(|triplet| -> Result<Control> {
            Ok(Control {
                id: triplet[0].to_string(),
                status: triplet[1].parse()?,
                time: triplet[2].parse()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Run {
        number: leading[0].to_string(),
        si_card: leading[1].to_string(),
        first_name: leading[2].to_string(),
        last_name: leading[3].to_string(),
        info: leading[4].to_string(),
        course: leading[5].to_string(),
        result: leading[6].parse()?,
        status: leading[7].parse()?,
        point: leading[8].to_string(),
        start: leading[9].parse()?,
        controls,
        finish: Time::parse(finish)?,
    })
}

/// Outcome of parsing a whole record file.
#[derive(Debug)]
pub struct ParsedCompetition {
    /// Every run that parsed, in input order
    pub competition: Competition,
    /// One [`TimingError::Line`] per rejected line
    pub errors: Vec<TimingError>,
}

impl ParsedCompetition {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// The competition, or an aggregate [`TimingError::Records`] if any line
    /// was rejected.
    pub fn into_result(self) -> Result<Competition> {
        if self.errors.is_empty() {
            Ok(self.competition)
        } else {
            Err(TimingError::Records { errors: self.errors })
        }
    }

    /// The partial competition together with the aggregate error, if any.
    pub fn into_parts(self) -> (Competition, Option<TimingError>) {
        let error = (!self.errors.is_empty()).then(|| TimingError::Records { errors: self.errors });
        (self.competition, error)
    }
}

/// Parse every non-blank line of a record file.
pub fn parse_competition(data: &str) -> ParsedCompetition {
    let mut competition = Competition::new();
    let mut errors = Vec::new();

    for (index, line) in data.lines().enumerate() {
        let line_number = index + 1;
        if line.is_empty() {
            continue;
        }
        match parse_run(line) {
            Ok(run) => competition.push(run),
            Err(e) => {
                warn!(line = line_number, error = %e, "Rejected record");
                errors.push(TimingError::at_line(line_number, e));
            }
        }
    }

    info!(runs = competition.len(), rejected = errors.len(), "Parsed competition");
    ParsedCompetition { competition, errors }
}
