//! Mutable status and its value-type snapshot.

use serde::{Deserialize, Serialize};

use crate::constants::{BASELINE_HAZARD_RATE, OPERATIONAL_EPSILON};

/// Live status of a component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationalStatus {
    pub hazard_rate: f64,
    pub downtime_remaining: f64,
    pub operational: bool,
}

impl Default for OperationalStatus {
    fn default() -> Self {
        Self {
            hazard_rate: BASELINE_HAZARD_RATE,
            downtime_remaining: 0.0,
            operational: true,
        }
    }
}

impl OperationalStatus {
    /// Store a downtime and derive the operational flag from it.
    /// Residues below epsilon are cleared.
    pub(crate) fn set_downtime(&mut self, downtime: f64) {
        self.downtime_remaining = if downtime < OPERATIONAL_EPSILON { 0.0 } else { downtime };
        self.operational = self.downtime_remaining < OPERATIONAL_EPSILON;
    }
}

/// Snapshot of a component's probabilistic state
///
/// `lifetimes` is ordered like the component's failure modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentStatus {
    pub lifetimes: Vec<f64>,
    pub hazard_rate: f64,
    pub downtime_remaining: f64,
}

impl ComponentStatus {
    pub fn new(lifetimes: Vec<f64>, hazard_rate: f64, downtime_remaining: f64) -> Self {
        Self {
            lifetimes,
            hazard_rate,
            downtime_remaining,
        }
    }
}
