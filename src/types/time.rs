//! Second-resolution time values with sentinel encoding

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Result, TimingError};

/// A signed count of seconds: an absolute instant of the day or a duration.
///
/// Two values are reserved. [`Time::INVALID`] marks "no data" and
/// [`Time::INF`] is worse than any real value. Engine arithmetic goes through
/// [`Time::checked_add`] and [`Time::checked_sub`], which refuse sentinel
/// operands, so a sentinel only ever appears where a missing-data path puts it.
///
/// Ordering is plain numeric; `Ord::min` and `Ord::max` treat the sentinels
/// as ordinary extreme integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(i64);

impl Time {
    /// No data.
    pub const INVALID: Time = Time(i64::MIN);
    /// Unbounded; starting value for minimum aggregation.
    pub const INF: Time = Time(i64::MAX);
    pub const ZERO: Time = Time(0);

    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    pub const fn from_hms(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self(hours * 3600 + minutes * 60 + seconds)
    }

    /// Raw second count, sentinels included.
    pub const fn seconds(self) -> i64 {
        self.0
    }

    pub const fn is_invalid(self) -> bool {
        self.0 == i64::MIN
    }

    pub const fn is_inf(self) -> bool {
        self.0 == i64::MAX
    }

    pub const fn is_sentinel(self) -> bool {
        self.is_invalid() || self.is_inf()
    }

    /// `None` for either sentinel.
    pub fn valid(self) -> Option<Time> {
        (!self.is_sentinel()).then_some(self)
    }

    /// Encode an optional value, mapping absence to [`Time::INVALID`].
    pub fn from_option(value: Option<Time>) -> Time {
        value.unwrap_or(Time::INVALID)
    }

    /// Sum of two valid times; `None` if either is a sentinel or on overflow.
    pub fn checked_add(self, rhs: Time) -> Option<Time> {
        let sum = self.valid()?.0.checked_add(rhs.valid()?.0)?;
        Time(sum).valid()
    }

    /// Difference of two valid times; `None` if either is a sentinel or on overflow.
    pub fn checked_sub(self, rhs: Time) -> Option<Time> {
        let diff = self.valid()?.0.checked_sub(rhs.valid()?.0)?;
        Time(diff).valid()
    }

    /// Largest value of `xs`, or [`Time::INVALID`] when `xs` is empty.
    ///
    /// Sentinels take part as ordinary integers. Duplicate punches are
    /// assumed non-decreasing, so the maximum is the latest observation.
    pub fn max_of(xs: &[Time]) -> Time {
        xs.iter().copied().max().unwrap_or(Time::INVALID)
    }

    /// Truncating mean of the first `min(n, xs.len())` values.
    ///
    /// `xs` must already be sorted ascending for this to be the mean of the
    /// `n` fastest values. Empty input (or `n == 0`) yields [`Time::INVALID`].
    pub fn average_of_first(xs: &[Time], n: usize) -> Time {
        let head = &xs[..n.min(xs.len())];
        if head.is_empty() {
            return Time::INVALID;
        }
        let sum: i128 = head.iter().map(|t| i128::from(t.0)).sum();
        // mean of i64 values always fits in i64
        Time((sum / head.len() as i128) as i64)
    }

    /// Parse a strict `HH:MM:SS` value.
    ///
    /// Every field is two or more ASCII digits and the value must format
    /// back to exactly `s`, so `00:60:00` or `7:00:00` are rejected.
    pub fn parse(s: &str) -> Result<Time> {
        let invalid = || TimingError::format_error(s);

        let fields = s.split(':').collect::<Vec<_>>();
        let [hh, mm, ss] = fields.as_slice() else {
            return Err(invalid());
        };

        let mut total: i64 = 0;
        for (field, scale) in [(hh, 3600), (mm, 60), (ss, 1)] {
            if field.len() < 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let value: i64 = field.parse().map_err(|_| invalid())?;
            total = value
                .checked_mul(scale)
                .and_then(|v| total.checked_add(v))
                .ok_or_else(invalid)?;
        }

        let time = Time(total);
        if time.to_string() != s {
            return Err(invalid());
        }
        Ok(time)
    }
}

impl FromStr for Time {
    type Err = TimingError;

    fn from_str(s: &str) -> Result<Self> {
        Time::parse(s)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{:02}:{:02}:{:02}", sign, total / 3600, total / 60 % 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_clock_text_round_trips(hh in 0i64..1000, mm in 0i64..60, ss in 0i64..60) {
            let text = format!("{:02}:{:02}:{:02}", hh, mm, ss);
            let time = Time::parse(&text).unwrap();
            prop_assert_eq!(time.seconds(), hh * 3600 + mm * 60 + ss);
            prop_assert_eq!(time.to_string(), text);
        }

        #[test]
        fn prop_max_of_single_value_is_identity(seconds in any::<i64>()) {
            let t = Time::from_seconds(seconds);
            prop_assert_eq!(Time::max_of(&[t]), t);
        }

        #[test]
        fn prop_average_of_all_is_truncating_mean(
            mut values in prop::collection::vec(-100_000i64..100_000, 1..30),
            extra in 0usize..10
        ) {
            values.sort();
            let xs = values.iter().copied().map(Time::from_seconds).collect::<Vec<_>>();
            let expected = values.iter().sum::<i64>() / values.len() as i64;
            prop_assert_eq!(Time::average_of_first(&xs, values.len() + extra).seconds(), expected);
        }

        #[test]
        fn prop_checked_sub_never_yields_sentinel(a in any::<i64>(), b in any::<i64>()) {
            if let Some(diff) = Time::from_seconds(a).checked_sub(Time::from_seconds(b)) {
                prop_assert!(!diff.is_sentinel());
            }
        }
    }

    #[test]
    fn max_of_empty_is_invalid() {
        assert!(Time::max_of(&[]).is_invalid());
    }

    #[test]
    fn max_of_keeps_sentinels() {
        let xs = [Time::from_seconds(5), Time::INF];
        assert!(Time::max_of(&xs).is_inf());
    }

    #[test]
    fn average_of_first_limits_to_n() {
        let xs = [100, 200, 300, 1000].map(Time::from_seconds);
        assert_eq!(Time::average_of_first(&xs, 3), Time::from_seconds(200));
        assert_eq!(Time::average_of_first(&xs, 1), Time::from_seconds(100));
        assert!(Time::average_of_first(&xs, 0).is_invalid());
        assert!(Time::average_of_first(&[], 6).is_invalid());
    }

    #[test]
    fn average_of_first_truncates_toward_zero() {
        let xs = [-3, -2].map(Time::from_seconds);
        assert_eq!(Time::average_of_first(&xs, 6), Time::from_seconds(-2));
        let xs = [1, 2].map(Time::from_seconds);
        assert_eq!(Time::average_of_first(&xs, 6), Time::from_seconds(1));
    }

    #[test]
    fn average_of_first_does_not_overflow() {
        let big = Time::from_seconds(i64::MAX - 1);
        assert_eq!(Time::average_of_first(&[big, big], 2), big);
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for text in
            ["", "12:00", "7:00:00", "00:60:00", "00:00:60", "aa:bb:cc", "01:02:03:04", " 01:02:03", "+1:02:03"]
        {
            assert!(
                matches!(Time::parse(text), Err(TimingError::Format { .. })),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_accepts_long_hour_field() {
        assert_eq!("123:04:05".parse::<Time>().unwrap(), Time::from_hms(123, 4, 5));
    }

    #[test]
    fn checked_arithmetic_rejects_sentinels() {
        let t = Time::from_seconds(10);
        assert_eq!(t.checked_sub(Time::INVALID), None);
        assert_eq!(Time::INVALID.checked_sub(Time::INVALID), None);
        assert_eq!(Time::INF.checked_add(t), None);
        assert_eq!(t.checked_sub(Time::from_seconds(4)), Some(Time::from_seconds(6)));
    }

    #[test]
    fn min_and_max_are_numeric() {
        let a = Time::from_seconds(3);
        assert_eq!(a.min(Time::INF), a);
        assert_eq!(a.max(Time::INVALID), a);
        assert_eq!(Time::INF.min(Time::from_seconds(-5)), Time::from_seconds(-5));
    }

    #[test]
    fn negative_durations_carry_a_sign() {
        assert_eq!(Time::from_seconds(-65).to_string(), "-00:01:05");
    }
}
