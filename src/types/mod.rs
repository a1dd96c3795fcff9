//! Core data model for timed runs.
//!
//! - [`Time`] is a second count with two sentinels ([`Time::INVALID`],
//!   [`Time::INF`]) and sentinel-refusing arithmetic
//! - [`Run`] is one participant's punches plus start, finish and result
//! - [`Competition`] is the ordered collection the parser produces
//!
//! ```rust
//! use splitwall::types::Time;
//!
//! let t: Time = "01:02:03".parse().unwrap();
//! assert_eq!(t.seconds(), 3723);
//! assert_eq!(t.to_string(), "01:02:03");
//! assert!(Time::max_of(&[]).is_invalid());
//! ```

mod competition;
mod run;
mod status;
mod time;

pub use competition::Competition;
pub use run::{Control, FINISH, Run, START};
pub use status::{ControlStatus, Status};
pub use time::Time;
