//! The `EpidemicModel` trait: the narrow interface to the external simulator.

use crate::{HealthState, NodeId};

/// Capability interface the intervention loop drives and queries.
///
/// The model owns every per-node array (health state, timers, flags, contact
/// graph) and the disease transition engine.  The loop never reaches into
/// model internals; it reads through the query methods and writes only the
/// `tested`, `positive` and `isolated` flags plus exogenous exposures.
///
/// # Required behaviour
///
/// - [`run_iteration`][Self::run_iteration] advances the model by one event
///   or step and returns `false` once no further steps remain (horizon
///   reached, state space exhausted, …).
/// - [`set_tested`][Self::set_tested] must also mark the node as tested in
///   its current state; the model clears that mark on its own state changes.
/// - [`set_isolation`][Self::set_isolation] must be idempotent: isolating an
///   already isolated node is a no-op.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = TtiSimBuilder::new(config, my_model).build()?;
/// let interval = sim.run(&mut NoopObserver);
/// ```
pub trait EpidemicModel {
    // ── Clock ─────────────────────────────────────────────────────────────

    /// Current simulated time.
    fn time(&self) -> f64;

    /// Set the horizon the model runs to before `run_iteration` returns
    /// `false`.
    fn set_horizon(&mut self, tmax: f64);

    /// Advance one iteration.  Returns `true` while more steps remain.
    fn run_iteration(&mut self) -> bool;

    // ── Population queries ────────────────────────────────────────────────

    fn node_count(&self) -> usize;

    fn state(&self, node: NodeId) -> HealthState;

    fn is_tested(&self, node: NodeId) -> bool;

    fn tested_in_current_state(&self, node: NodeId) -> bool;

    fn is_positive(&self, node: NodeId) -> bool;

    /// Time the node has spent in its current state.
    fn time_in_state(&self, node: NodeId) -> f64;

    /// Contact count (or weighted degree) of the node.
    fn degree(&self, node: NodeId) -> f64;

    /// Neighbours of the node in the contact graph.
    fn contacts(&self, node: NodeId) -> Vec<NodeId>;

    /// Cumulative number of infected nodes at the current time index.
    fn total_infected(&self) -> usize;

    // ── Mutations ─────────────────────────────────────────────────────────

    fn set_tested(&mut self, node: NodeId, tested: bool);

    fn set_positive(&mut self, node: NodeId, positive: bool);

    fn set_isolation(&mut self, node: NodeId, isolate: bool);

    /// Expose `count` randomly chosen susceptible nodes from outside the
    /// population.  `count == 0` must be accepted silently.
    fn introduce_exposures(&mut self, count: u64);
}
