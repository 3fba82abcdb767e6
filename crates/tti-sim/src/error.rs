//! Error types for tti-sim.

use thiserror::Error;
use tti_core::TtiError;

/// Errors raised while building a [`TtiSim`][crate::TtiSim].
#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Policy(#[from] TtiError),
}

pub type SimResult<T> = Result<T, SimError>;
