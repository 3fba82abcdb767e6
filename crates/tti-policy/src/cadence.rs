//! Testing cadences: which days of a repeating cycle carry scheduled tests.
//!
//! Days are numbered within a cycle starting on a Monday
//! (0 = Mon, 1 = Tue, …, 6 = Sun, 7 = Mon, …).  Symptomatic self-testing
//! ignores the cadence; traced and random testing only happen on the days in
//! the selected cadence's set.

use rustc_hash::{FxHashMap, FxHashSet};
use tti_core::{TtiError, TtiResult};

/// Default cycle length in days.
pub const DEFAULT_CYCLE_LENGTH: u32 = 310;

/// Last cycle day the weekday-pattern cadences schedule tests on.  Days
/// after it (up to the end of the cycle) carry no scheduled tests for them;
/// `everyday` covers the whole cycle.
pub const STANDARD_HORIZON_DAY: u32 = 300;

/// Named cadences, each mapping to a set of cycle days.
///
/// Immutable once built; resolve a name with [`schedule`][Self::schedule]
/// when the simulation is constructed so unknown names fail at setup.
#[derive(Clone, Debug)]
pub struct CadenceTable {
    cycle_length: u32,
    days:         FxHashMap<String, FxHashSet<u32>>,
}

impl CadenceTable {
    /// The standard cadences for a cycle of `cycle_length` days.
    ///
    /// | Name          | Days                                   |
    /// |---------------|----------------------------------------|
    /// | `everyday`    | every day of the cycle                 |
    /// | `workday`     | Monday–Friday                          |
    /// | `semiweekly`  | Monday and Thursday                    |
    /// | `weekly`      | Mondays                                |
    /// | `biweekly`    | every other Monday                     |
    /// | `monthly`     | every fourth Monday                    |
    /// | `cycle_start` | day 0 only                             |
    /// | `none`        | `cycle_length`, outside the cycle      |
    pub fn standard(cycle_length: u32) -> Self {
        let last = STANDARD_HORIZON_DAY.min(cycle_length.saturating_sub(1));
        let scheduled = |keep: fn(u32) -> bool| -> FxHashSet<u32> {
            (0..=last).filter(|&d| keep(d)).collect()
        };

        let mut days = FxHashMap::default();
        days.insert("everyday".to_owned(),   (0..cycle_length).collect());
        days.insert("workday".to_owned(),    scheduled(|d| d % 7 < 5));
        days.insert("semiweekly".to_owned(), scheduled(|d| d % 7 == 0 || d % 7 == 3));
        days.insert("weekly".to_owned(),     scheduled(|d| d % 7 == 0));
        days.insert("biweekly".to_owned(),   scheduled(|d| d % 14 == 0));
        days.insert("monthly".to_owned(),    scheduled(|d| d % 28 == 0));
        days.insert("none".to_owned(),        FxHashSet::from_iter([cycle_length]));
        days.insert("cycle_start".to_owned(), FxHashSet::from_iter([0]));

        Self { cycle_length, days }
    }

    /// Replace the whole table with caller-supplied cadences.
    pub fn from_days<I, S, D>(cycle_length: u32, cadences: I) -> TtiResult<Self>
    where
        I: IntoIterator<Item = (S, D)>,
        S: Into<String>,
        D: IntoIterator<Item = u32>,
    {
        if cycle_length == 0 {
            return Err(TtiError::invalid("cadence_cycle_length", "must be at least 1"));
        }
        let days = cadences
            .into_iter()
            .map(|(name, days)| (name.into(), days.into_iter().collect()))
            .collect();
        Ok(Self { cycle_length, days })
    }

    pub fn cycle_length(&self) -> u32 {
        self.cycle_length
    }

    /// The cycle days of cadence `name`.
    pub fn days_for(&self, name: &str) -> TtiResult<&FxHashSet<u32>> {
        self.days
            .get(name)
            .ok_or_else(|| TtiError::UnknownCadence(name.to_owned()))
    }

    /// Resolve cadence `name` into a standalone schedule.
    pub fn schedule(&self, name: &str) -> TtiResult<TestingSchedule> {
        Ok(TestingSchedule {
            cycle_length: self.cycle_length,
            days:         self.days_for(name)?.clone(),
        })
    }
}

impl Default for CadenceTable {
    fn default() -> Self {
        Self::standard(DEFAULT_CYCLE_LENGTH)
    }
}

/// A resolved cadence: answers "is today a scheduled testing day?".
#[derive(Clone, Debug)]
pub struct TestingSchedule {
    cycle_length: u32,
    days:         FxHashSet<u32>,
}

impl TestingSchedule {
    /// Day number within the cycle for model time `t`.
    #[inline]
    pub fn cycle_day(&self, t: f64) -> u32 {
        (t.max(0.0) % self.cycle_length as f64) as u32
    }

    #[inline]
    pub fn is_testing_day(&self, t: f64) -> bool {
        self.days.contains(&self.cycle_day(t))
    }
}
