//! toy-seir: testing, tracing and isolation over a small SEIR epidemic.
//!
//! Builds a household + community contact network, runs a stochastic SEIR
//! model under the intervention loop and writes per-day CSV output.
//!
//! ```text
//! toy-seir [config.json]
//! RUST_LOG=debug toy-seir
//! ```
//!
//! Without an argument the built-in defaults are used.  Any field of the
//! JSON file may be omitted.

mod model;
mod network;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tti_core::{NodeId, SimRng, TtiResult};
use tti_output::{CsvWriter, ReportObserver};
use tti_policy::{Compliance, ComplianceSet};
use tti_sim::{TtiConfig, TtiSimBuilder};

use model::{DiseaseParams, ToySeir};
use network::build_population;

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoConfig {
    nodes:            usize,
    household_size:   usize,
    community_degree: f64,
    disease:          DiseaseParams,
    compliance:       ComplianceRates,
    tti:              TtiConfig,
    output_dir:       PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            nodes:            2_000,
            household_size:   4,
            community_degree: 6.0,
            disease:          DiseaseParams::default(),
            compliance:       ComplianceRates::default(),
            tti:              TtiConfig {
                horizon:                         150.0,
                seed:                            42,
                intervention_start_pct_infected: 0.01,
                average_introductions_per_day:   0.5,
                testing_cadence:                 "semiweekly".to_owned(),
                pct_tested_per_day:              0.02,
                max_pct_tests_for_symptomatics:  0.5,
                max_pct_tests_for_traces:        0.3,
                ..TtiConfig::default()
            },
            output_dir:       PathBuf::from("output/toy-seir"),
        }
    }
}

/// Fraction of nodes complying with each category.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct ComplianceRates {
    testing_symptomatic:   f64,
    testing_traced:        f64,
    testing_random:        f64,
    tracing:               f64,
    isolation_individual:  f64,
    isolation_groupmate:   f64,
}

impl Default for ComplianceRates {
    fn default() -> Self {
        Self {
            testing_symptomatic:  0.7,
            testing_traced:       0.8,
            testing_random:       0.6,
            tracing:              0.5,
            isolation_individual: 0.8,
            isolation_groupmate:  0.5,
        }
    }
}

impl ComplianceRates {
    fn draw(&self, n: usize, rng: &mut SimRng) -> TtiResult<ComplianceSet> {
        let mut flags = |what: &'static str, p: f64| {
            let drawn = (0..n).map(|_| rng.gen_bool(p.clamp(0.0, 1.0))).collect();
            Compliance::from_flags(what, drawn, n)
        };
        Ok(ComplianceSet {
            testing_symptomatic:              flags("testing_symptomatic", self.testing_symptomatic)?,
            testing_traced:                   flags("testing_traced", self.testing_traced)?,
            testing_random:                   flags("testing_random", self.testing_random)?,
            tracing:                          flags("tracing", self.tracing)?,
            isolation_symptomatic_individual: flags("isolation_symptomatic_individual", self.isolation_individual)?,
            isolation_symptomatic_groupmate:  flags("isolation_symptomatic_groupmate", self.isolation_groupmate)?,
            isolation_positive_individual:    flags("isolation_positive_individual", self.isolation_individual)?,
            isolation_positive_groupmate:     flags("isolation_positive_groupmate", self.isolation_groupmate)?,
            isolation_contact_individual:     flags("isolation_contact_individual", self.isolation_individual)?,
            isolation_contact_groupmate:      flags("isolation_contact_groupmate", self.isolation_groupmate)?,
        })
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let arg = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(arg.as_deref())?;
    info!(
        "toy-seir: {} nodes, households of {}, cadence {}, seed {}",
        config.nodes, config.household_size, config.tti.testing_cadence, config.tti.seed,
    );

    // 1. Population and compliance, from their own RNG streams.
    let mut root = SimRng::new(config.tti.seed);
    let mut net_rng = root.child(1);
    let mut compliance_rng = root.child(2);
    let model_rng = root.child(3);

    let population = build_population(
        config.nodes,
        config.household_size,
        config.community_degree,
        &mut net_rng,
    );
    let compliance = config.compliance.draw(config.nodes, &mut compliance_rng)?;
    let households: Vec<Vec<NodeId>> = population.households;

    // 2. Model and intervention loop.
    let model = ToySeir::new(config.disease.clone(), population.contacts, model_rng);
    let mut sim = TtiSimBuilder::new(config.tti.clone(), model)
        .compliance(compliance)
        .isolation_groups(households)
        .build()?;

    // 3. Output.
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;
    let mut obs = ReportObserver::new(CsvWriter::new(&config.output_dir)?);

    // 4. Run.
    let t0 = Instant::now();
    let interval = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    match interval.start {
        Some(start) => info!(
            "interventions active from t = {start:.2} to t = {:.2} ({:.1} days)",
            interval.end,
            interval.duration(),
        ),
        None => info!("interventions never started (run ended at t = {:.2})", interval.end),
    }
    for (state, count) in sim.model.census() {
        if count > 0 {
            info!("  {state:<6} {count}");
        }
    }
    info!(
        "done in {:.3} s, output in {}",
        elapsed.as_secs_f64(),
        config.output_dir.display(),
    );

    Ok(())
}
