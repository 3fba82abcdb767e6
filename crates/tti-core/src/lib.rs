//! `tti-core`: foundational types for the testing/tracing/isolation loop.
//!
//! This crate is a dependency of every other `tti-*` crate.  It has no
//! `tti-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                |
//! |-----------|---------------------------------------------------------|
//! | [`ids`]   | `NodeId`, `GroupId`                                     |
//! | [`state`] | `HealthState` enum and its test/screening classes       |
//! | [`time`]  | `SimDay`, `DayTracker`                                  |
//! | [`rng`]   | `SimRng` (the single per-run random source)             |
//! | [`model`] | `EpidemicModel`, the capability interface to the model |
//! | [`error`] | `TtiError`, `TtiResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod ids;
pub mod model;
pub mod rng;
pub mod state;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TtiError, TtiResult};
pub use ids::{GroupId, NodeId};
pub use model::EpidemicModel;
pub use rng::SimRng;
pub use state::HealthState;
pub use time::{DayTracker, SimDay};
