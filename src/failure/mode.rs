//! One (component, mode) failure channel.

use crate::error::Result;
use crate::stochastic::Well512;

use super::{DistributionFamily, FailureDistribution, OperatingMode};

/// Failure channel of a component
#[derive(Debug, Clone)]
pub struct FailureMode {
    component: String,
    id: String,
    mode: OperatingMode,
    distribution: FailureDistribution,
    /// Life remaining (h) for wear-out channels, probability for start checks
    life_or_prob: f64,
}

impl FailureMode {
    /// Create a channel. The slot starts at the distribution mean until
    /// `regenerate` seeds it.
    pub fn new(
        component: impl Into<String>,
        id: impl Into<String>,
        mode: OperatingMode,
        family: DistributionFamily,
        alpha: f64,
        beta: f64,
    ) -> Result<Self> {
        let distribution = FailureDistribution::from_family(family, alpha, beta)?;
        Ok(Self::with_distribution(component, id, mode, distribution))
    }

    pub fn with_distribution(
        component: impl Into<String>,
        id: impl Into<String>,
        mode: OperatingMode,
        distribution: FailureDistribution,
    ) -> Self {
        let life_or_prob = distribution.mean();
        Self {
            component: component.into(),
            id: id.into(),
            mode,
            distribution,
            life_or_prob,
        }
    }

    /// Deplete life remaining. Not clamped: a negative value means a
    /// failure was missed upstream.
    pub fn reduce_life_remaining(&mut self, delta_hours: f64) {
        self.life_or_prob -= delta_hours;
    }

    /// Draw a fresh life or probability
    pub fn regenerate(&mut self, rng: &mut Well512) {
        self.life_or_prob = self.distribution.sample(rng);
    }

    /// Overwrite without sampling (replay / checkpoint restore)
    pub fn set_life_or_prob(&mut self, value: f64) {
        self.life_or_prob = value;
    }

    /// Remaining life in hazard-weighted hours (running modes)
    pub fn life_remaining(&self) -> f64 {
        self.life_or_prob
    }

    /// Per-start failure probability (start modes)
    pub fn failure_probability(&self) -> f64 {
        self.life_or_prob
    }

    /// Raw channel value, whatever the mode
    pub fn life_or_prob(&self) -> f64 {
        self.life_or_prob
    }

    /// Operating mode this channel applies to
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Channel identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Owning component name
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Distribution the channel is regenerated from
    pub fn distribution(&self) -> &FailureDistribution {
        &self.distribution
    }

    /// True when this channel depletes with operating time
    pub fn is_wear_out(&self) -> bool {
        self.distribution.is_wear_out()
    }
}
