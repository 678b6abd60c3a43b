//! # CYCLESIM-RS
//!
//! Stochastic failure/repair model for power-cycle equipment
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                          CYCLESIM-RS                                        │
//! │              Equipment Reliability for Plant Simulation                     │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │  LEVEL 1: STOCHASTIC   WELL512a uniform variates, one stream per scenario   │
//! │  LEVEL 2: FAILURE      Exponential / Gamma / Beta channels per component    │
//! │  LEVEL 3: COMPONENTS   probe → commit / fail → repair state machine         │
//! │  LEVEL 4: EVENTS       append-only failure log owned by the driver          │
//! │  LEVEL 5: REPLICATION  independent scenarios in parallel (rayon)            │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Per-period protocol
//!
//! | Step | Call                                  | Effect                                  |
//! |------|---------------------------------------|-----------------------------------------|
//! | 1    | `Component::test_for_failure`         | start check + wear-out probe, records failures |
//! | 2    | `Component::operate`                  | commits start penalty and life depletion |
//! | 3    | `Component::advance_downtime`         | repairs progress while down              |
//! | -    | `Component::get_state` / `read_status`| checkpoint and restore                   |
//! | -    | `Component::read_failure`             | replay a recorded failure, no draws      |
//!
//! Same scenario id + same dispatch order ⇒ bit-identical failure history.

pub mod constants;
pub mod error;
pub mod stochastic;
pub mod failure;
pub mod components;
pub mod events;
pub mod config;
pub mod replication;

// Re-exports
pub use components::{Component, ComponentStatus, PeriodOutcome, PeriodPlan, StartPenalties, StartType};
pub use config::{ComponentSpec, FailureModeSpec, PlantSpec};
pub use error::{ReliabilityError, Result};
pub use events::{FailureEvent, FailureEventLog, FailureKey, FailureSink, LogSummary};
pub use failure::{DistributionFamily, FailureDistribution, FailureMode, OperatingMode};
pub use replication::{Replication, ReplicationReport, ReplicationRunner, ReplicationSummary};
pub use stochastic::{Well512, WellParams};

/// CYCLESIM version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Information about the library
pub fn info() -> String {
    format!(
        "CYCLESIM-RS v{}\n\
         Stochastic failure/repair model for power-cycle equipment\n\
         WELL512a variates, Gamma wear-out, Beta start checks",
        VERSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info() {
        let info = info();
        assert!(info.contains("CYCLESIM"));
        assert!(info.contains(VERSION));
    }
}
