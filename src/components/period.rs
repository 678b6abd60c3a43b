//! Per-period dispatch instructions and outcomes.

use serde::{Deserialize, Serialize};

use crate::error::{ReliabilityError, Result};
use crate::failure::OperatingMode;

use super::StartType;

/// What the dispatcher asks of a component for one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodPlan {
    /// Operating hours in the period
    pub hours: f64,
    /// Degradation multiplier for ramping / partial load (0 = no wear)
    pub ramp_mult: f64,
    pub start: StartType,
    pub mode: OperatingMode,
}

impl PeriodPlan {
    pub fn new(hours: f64, mode: OperatingMode) -> Self {
        Self {
            hours,
            ramp_mult: 1.0,
            start: StartType::None,
            mode,
        }
    }

    /// Running online
    pub fn online(hours: f64) -> Self {
        Self::new(hours, OperatingMode::OnlineFailure)
    }

    /// Running in standby
    pub fn standby(hours: f64) -> Self {
        Self::new(hours, OperatingMode::StandbyFailure)
    }

    /// Builder: start into the plan's mode
    pub fn with_start(mut self, start: StartType) -> Self {
        self.start = start;
        self.mode = match self.mode {
            OperatingMode::OnlineFailure => OperatingMode::OnlineStart,
            OperatingMode::StandbyFailure => OperatingMode::StandbyStart,
            other => other,
        };
        self
    }

    /// Builder: set ramp multiplier
    pub fn with_ramp(mut self, ramp_mult: f64) -> Self {
        self.ramp_mult = ramp_mult;
        self
    }

    /// Hours and ramp multiplier must be finite and non-negative
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("hours", self.hours), ("ramp_mult", self.ramp_mult)] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ReliabilityError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Result of running one period
#[derive(Debug, Clone, PartialEq)]
pub enum PeriodOutcome {
    /// Operating time committed
    Operated,
    /// One or more modes failed; nothing was committed
    Failed {
        modes: Vec<usize>,
        downtime: f64,
    },
    /// Down for repair; downtime advanced
    Repairing { downtime_remaining: f64 },
}

impl PeriodOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_start_switches_mode() {
        let plan = PeriodPlan::online(1.0).with_start(StartType::ColdStart);
        assert_eq!(plan.mode, OperatingMode::OnlineStart);
        assert_eq!(plan.start, StartType::ColdStart);

        let plan = PeriodPlan::standby(1.0).with_start(StartType::HotStart).with_ramp(0.5);
        assert_eq!(plan.mode, OperatingMode::StandbyStart);
        assert_eq!(plan.ramp_mult, 0.5);
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        assert!(PeriodPlan::online(0.0).with_ramp(0.0).validate().is_ok());
        assert!(PeriodPlan::online(12.0).validate().is_ok());

        for plan in [
            PeriodPlan::online(-30.0),
            PeriodPlan::online(f64::NAN),
            PeriodPlan::standby(f64::INFINITY),
            PeriodPlan::online(1.0).with_ramp(-0.5),
            PeriodPlan::online(1.0).with_ramp(f64::NAN),
        ] {
            let err = plan.validate().unwrap_err();
            assert!(matches!(err, ReliabilityError::InvalidParameter { .. }));
        }
    }
}
