//! Exogenous exposures introduced from outside the population.

use rand::distributions::Distribution;
use rand_distr::Poisson;
use tti_core::error::check_non_negative;
use tti_core::{EpidemicModel, SimRng, TtiError, TtiResult};

/// Draws a Poisson number of new exposures per day.
#[derive(Clone, Debug)]
pub struct ExposureInjector {
    rate:         f64,
    distribution: Option<Poisson<f64>>,
}

impl ExposureInjector {
    /// `rate` is the mean number of introductions per day.  A zero rate
    /// never draws from the RNG.
    pub fn new(rate: f64) -> TtiResult<Self> {
        let rate = check_non_negative("average_introductions_per_day", rate)?;
        let distribution = if rate > 0.0 {
            Some(
                Poisson::new(rate)
                    .map_err(|e| TtiError::invalid("average_introductions_per_day", e.to_string()))?,
            )
        } else {
            None
        };
        Ok(Self { rate, distribution })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Number of exposures to introduce today.
    pub fn draw(&self, rng: &mut SimRng) -> u64 {
        match &self.distribution {
            Some(poisson) => poisson.sample(rng.inner()) as u64,
            None => 0,
        }
    }

    /// Draw today's count and hand it to the model.  Returns the count.
    pub fn inject<M: EpidemicModel + ?Sized>(&self, model: &mut M, rng: &mut SimRng) -> u64 {
        let count = self.draw(rng);
        model.introduce_exposures(count);
        count
    }
}
