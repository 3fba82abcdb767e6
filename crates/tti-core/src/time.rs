//! Simulated-day bookkeeping.
//!
//! # Design
//!
//! The external model advances in continuous (or irregular) time steps.  The
//! intervention loop only acts once per simulated day, where a day is the
//! integer part of the model's time:
//!
//!   day = trunc(model_time)
//!
//! `DayTracker` remembers the last day it reported and signals each time the
//! model crosses into a new one.  Several model iterations may fall inside
//! one day; a single large step may also skip days entirely, in which case
//! only the day actually landed on is processed.

use std::fmt;

// ── SimDay ────────────────────────────────────────────────────────────────────

/// An integer simulated day.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimDay(pub u64);

impl SimDay {
    pub const ZERO: SimDay = SimDay(0);

    /// The day containing model time `t`.  Negative times clamp to day 0.
    #[inline]
    pub fn from_time(t: f64) -> SimDay {
        SimDay(t.max(0.0).trunc() as u64)
    }

    /// Return the day `n` days after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> SimDay {
        SimDay(self.0 + n)
    }
}

impl fmt::Display for SimDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

// ── DayTracker ────────────────────────────────────────────────────────────────

/// Detects day boundaries in a stream of model times.
#[derive(Clone, Debug, Default)]
pub struct DayTracker {
    last: Option<SimDay>,
}

impl DayTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record model time `t`.  Returns `Some(day)` the first time `t` falls
    /// in a day different from the previously recorded one.
    pub fn enter(&mut self, t: f64) -> Option<SimDay> {
        let day = SimDay::from_time(t);
        if self.last == Some(day) {
            return None;
        }
        self.last = Some(day);
        Some(day)
    }

    /// The most recently entered day, if any.
    pub fn current(&self) -> Option<SimDay> {
        self.last
    }
}
