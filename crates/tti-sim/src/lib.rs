//! `tti-sim`: day loop orchestrator for the testing/tracing/isolation policy.
//!
//! # Day loop
//!
//! ```text
//! set model horizon
//! loop:
//!   more = model.run_iteration()
//!   if trunc(model.time) is a new day:
//!     ① Exposures   : Poisson(λ) exogenous introductions
//!     ② Gate        : latch on once infected fraction ≥ threshold
//!     (only when the gate is open:)
//!     ③ Isolate     : symptomatic nodes and due contacts, no test
//!     ④ Select      : symptomatic / traced / random under capacity
//!     ⑤ Test        : false negatives; positives → isolation + tracing
//!     ⑥ Apply       : release due isolation slots; enqueue new traces
//!   if !more: break
//! return [activation_time, model.time]
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tti_sim::{NoopObserver, TtiConfig, TtiSimBuilder};
//!
//! let mut sim = TtiSimBuilder::new(TtiConfig::default(), model)
//!     .compliance(compliance)
//!     .build()?;
//! let interval = sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;


pub use builder::TtiSimBuilder;
pub use config::{Lags, TtiConfig};
pub use error::{SimError, SimResult};
pub use observer::{CollectingObserver, NoopObserver, TtiObserver};
pub use report::{DayReport, InterventionInterval, IsolationTally};
pub use sim::{Phase, TtiSim};
