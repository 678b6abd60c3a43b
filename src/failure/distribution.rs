//! Sampling distributions bound to failure channels and repairs.

use std::fmt;
use std::str::FromStr;

use rand_distr::{Beta, Distribution, Exp, Gamma};
use serde::{Deserialize, Serialize};

use crate::error::{ReliabilityError, Result};
use crate::stochastic::Well512;

/// Distribution family named in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionFamily {
    Exponential,
    Gamma,
    Beta,
}

impl DistributionFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exponential => "exponential",
            Self::Gamma => "gamma",
            Self::Beta => "beta",
        }
    }
}

impl fmt::Display for DistributionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistributionFamily {
    type Err = ReliabilityError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exponential" => Ok(Self::Exponential),
            "gamma" => Ok(Self::Gamma),
            "beta" => Ok(Self::Beta),
            _ => Err(ReliabilityError::UnknownLabel {
                kind: "distribution family",
                label: s.to_string(),
            }),
        }
    }
}

/// Failure / repair distribution
///
/// Parameters are validated once at construction; `sample` cannot fail.
#[derive(Debug, Clone)]
pub enum FailureDistribution {
    /// Repair time: `Exp(rate) + floor` hours
    Exponential { rate: f64, floor: f64, sampler: Exp<f64> },
    /// Wear-out hours to failure, shape `alpha`, scale `beta`
    Gamma { alpha: f64, beta: f64, sampler: Gamma<f64> },
    /// Start failure probability
    Beta { alpha: f64, beta: f64, sampler: Beta<f64> },
}

fn invalid(family: DistributionFamily, reason: impl fmt::Display) -> ReliabilityError {
    ReliabilityError::InvalidDistribution {
        family: family.to_string(),
        reason: reason.to_string(),
    }
}

impl FailureDistribution {
    /// Exponential with `rate` events/h plus a fixed `floor` (h)
    pub fn exponential(rate: f64, floor: f64) -> Result<Self> {
        let family = DistributionFamily::Exponential;
        if !(rate > 0.0 && rate.is_finite()) {
            return Err(invalid(family, format!("rate must be positive, got {rate}")));
        }
        if !(floor >= 0.0 && floor.is_finite()) {
            return Err(invalid(family, format!("floor must be non-negative, got {floor}")));
        }
        let sampler = Exp::new(rate).map_err(|e| invalid(family, e))?;
        Ok(Self::Exponential { rate, floor, sampler })
    }

    /// Gamma with shape `alpha` and scale `beta` (mean `alpha · beta` h)
    pub fn gamma(alpha: f64, beta: f64) -> Result<Self> {
        let family = DistributionFamily::Gamma;
        if !(alpha.is_finite() && beta.is_finite()) {
            return Err(invalid(family, format!("non-finite parameters ({alpha}, {beta})")));
        }
        let sampler = Gamma::new(alpha, beta).map_err(|e| invalid(family, e))?;
        Ok(Self::Gamma { alpha, beta, sampler })
    }

    /// Beta with shapes `alpha`, `beta`
    pub fn beta(alpha: f64, beta: f64) -> Result<Self> {
        let family = DistributionFamily::Beta;
        if !(alpha.is_finite() && beta.is_finite()) {
            return Err(invalid(family, format!("non-finite parameters ({alpha}, {beta})")));
        }
        let sampler = Beta::new(alpha, beta).map_err(|e| invalid(family, e))?;
        Ok(Self::Beta { alpha, beta, sampler })
    }

    /// Build from a configuration tuple. For the exponential family
    /// `alpha` is the rate and `beta` the floor.
    pub fn from_family(family: DistributionFamily, alpha: f64, beta: f64) -> Result<Self> {
        match family {
            DistributionFamily::Exponential => Self::exponential(alpha, beta),
            DistributionFamily::Gamma => Self::gamma(alpha, beta),
            DistributionFamily::Beta => Self::beta(alpha, beta),
        }
    }

    pub fn family(&self) -> DistributionFamily {
        match self {
            Self::Exponential { .. } => DistributionFamily::Exponential,
            Self::Gamma { .. } => DistributionFamily::Gamma,
            Self::Beta { .. } => DistributionFamily::Beta,
        }
    }

    /// Draw one value
    pub fn sample(&self, rng: &mut Well512) -> f64 {
        match self {
            Self::Exponential { floor, sampler, .. } => sampler.sample(rng) + floor,
            Self::Gamma { sampler, .. } => sampler.sample(rng),
            Self::Beta { sampler, .. } => sampler.sample(rng),
        }
    }

    /// Expected value
    pub fn mean(&self) -> f64 {
        match self {
            Self::Exponential { rate, floor, .. } => 1.0 / rate + floor,
            Self::Gamma { alpha, beta, .. } => alpha * beta,
            Self::Beta { alpha, beta, .. } => alpha / (alpha + beta),
        }
    }

    /// Continuous degradation (life remaining is depleted)
    pub fn is_wear_out(&self) -> bool {
        !self.is_start_check()
    }

    /// Bernoulli start check (value is a probability)
    pub fn is_start_check(&self) -> bool {
        matches!(self, Self::Beta { .. })
    }
}
