//! One-shot intervention activation.

/// `true` once the infected fraction has reached the threshold.
#[inline]
pub fn should_activate(infected_fraction: f64, threshold: f64) -> bool {
    infected_fraction >= threshold
}

/// Latches on the first day the infected fraction reaches `threshold` and
/// stays on for the rest of the run.
#[derive(Clone, Debug)]
pub struct InterventionGate {
    threshold:    f64,
    activated_at: Option<f64>,
}

impl InterventionGate {
    pub fn new(threshold: f64) -> Self {
        Self { threshold, activated_at: None }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Feed today's observation.  Returns whether the intervention is active
    /// (including when it was activated on an earlier day).
    pub fn observe(&mut self, time: f64, infected_fraction: f64) -> bool {
        if self.activated_at.is_none() && should_activate(infected_fraction, self.threshold) {
            self.activated_at = Some(time);
        }
        self.is_active()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.activated_at.is_some()
    }

    /// Model time of first activation.
    pub fn activation_time(&self) -> Option<f64> {
        self.activated_at
    }
}
