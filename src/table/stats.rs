//! Per-checkpoint aggregates

use std::collections::HashMap;

use crate::Time;

/// Everything observed at one checkpoint.
#[derive(Debug, Clone, Default)]
pub struct ControlStats {
    /// card -> time since that participant's start, one entry per observation
    relative: HashMap<String, Vec<Time>>,
    /// from -> card -> last leg duration
    split: HashMap<String, HashMap<String, Time>>,
    /// from -> every leg duration into this checkpoint; sorted once finalized
    split_pool: HashMap<String, Vec<Time>>,
}

impl ControlStats {
    /// All relative times recorded for `card`, in ingestion order.
    pub fn relative(&self, card: &str) -> &[Time] {
        self.relative.get(card).map(Vec::as_slice).unwrap_or_default()
    }

    /// Latest relative time for `card`, if any was recorded.
    pub fn latest_relative(&self, card: &str) -> Option<Time> {
        Time::max_of(self.relative(card)).valid()
    }

    /// Most recent duration `card` recorded for the leg `from -> here`.
    pub fn split(&self, from: &str, card: &str) -> Option<Time> {
        self.split.get(from)?.get(card).copied()
    }

    /// Every duration recorded for the leg `from -> here`.
    pub fn split_pool(&self, from: &str) -> &[Time] {
        self.split_pool.get(from).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct legs ending here.
    pub fn leg_count(&self) -> usize {
        self.split_pool.len()
    }

    /// Number of participants seen here.
    pub fn participant_count(&self) -> usize {
        self.relative.len()
    }

    pub(super) fn record_leg(&mut self, from: &str, card: &str, duration: Time) {
        self.split_pool.entry(from.to_string()).or_default().push(duration);
        self.split.entry(from.to_string()).or_default().insert(card.to_string(), duration);
    }

    pub(super) fn record_relative(&mut self, card: &str, elapsed: Time) {
        self.relative.entry(card.to_string()).or_default().push(elapsed);
    }

    pub(super) fn sort_pools(&mut self) {
        for pool in self.split_pool.values_mut() {
            pool.sort_unstable();
        }
    }

    /// Latest relative time of every participant, fastest first.
    pub(super) fn ranked_relative(&self) -> Vec<Time> {
        let mut ranked = self.relative.values().filter_map(|xs| Time::max_of(xs).valid()).collect::<Vec<_>>();
        ranked.sort_unstable();
        ranked
    }
}
