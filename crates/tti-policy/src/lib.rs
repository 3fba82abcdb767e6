//! `tti-policy`: the decision components of the intervention loop.
//!
//! Each component is independent of the simulation driver and operates on an
//! [`EpidemicModel`][tti_core::EpidemicModel] through its capability trait:
//!
//! | Module          | Component                                            |
//! |-----------------|------------------------------------------------------|
//! | [`cadence`]     | `CadenceTable`, `TestingSchedule`                    |
//! | [`falseneg`]    | `FalseNegativeModel`, `FalseNegativeTable`           |
//! | [`delay_queue`] | `DelayQueue<T>`, `TracingPool`                       |
//! | [`compliance`]  | `Compliance`, `ComplianceSet`                        |
//! | [`groups`]      | `IsolationGroups`                                    |
//! | [`exposure`]    | `ExposureInjector`                                   |
//! | [`gate`]        | `InterventionGate`                                   |
//! | [`isolation`]   | `IsolationPropagator`, `IsolationCause`, `Expansion` |
//! | [`selection`]   | `TestSelectionPolicy`, `TestCapacity`, `TestSelection` |
//! | [`testing`]     | `TestExecutionEngine`, `ContactTracing`, tallies     |
//!
//! Configuration problems are reported as [`tti_core::TtiError`] when a
//! component is constructed; the per-day operations never fail.

pub mod cadence;
pub mod compliance;
pub mod delay_queue;
pub mod exposure;
pub mod falseneg;
pub mod gate;
pub mod groups;
pub mod isolation;
pub mod selection;
pub mod testing;

#[cfg(test)]
mod tests;

pub use cadence::{CadenceTable, TestingSchedule, DEFAULT_CYCLE_LENGTH};
pub use compliance::{Compliance, ComplianceSet};
pub use delay_queue::{DelayQueue, TracingPool};
pub use exposure::ExposureInjector;
pub use falseneg::{FalseNegativeModel, FalseNegativeTable};
pub use gate::{should_activate, InterventionGate};
pub use groups::IsolationGroups;
pub use isolation::{Expansion, IsolationCause, IsolationPropagator};
pub use selection::{TestCapacity, TestRoute, TestSelection, TestSelectionPolicy};
pub use testing::{
    ContactTracing, RouteTally, TestExecution, TestExecutionEngine, TestResult, TestingReport,
};
