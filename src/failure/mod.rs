//! # Failure Model
//!
//! Per-channel failure description of a component:
//! - **Distributions**: Exponential (repair), Gamma (wear-out), Beta (start check)
//! - **Operating modes**: online/standby, running or starting
//! - **Failure modes**: one depleting life or static probability per channel
//!
//! ## Life-or-probability slot
//!
//! A wear-out channel holds *life remaining* in adjusted operating hours and
//! is depleted by `time · hazard · ramp`. A start channel holds a static
//! *failure probability* compared against `U · hazard` on every start.
//! Which reading applies follows from the bound distribution.

pub mod distribution;
pub mod mode;

pub use distribution::*;
pub use mode::*;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReliabilityError;

/// Operating mode of a component during one period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatingMode {
    /// Running online (OF)
    #[serde(rename = "OF")]
    OnlineFailure,
    /// Running in standby (SF)
    #[serde(rename = "SF")]
    StandbyFailure,
    /// Starting into online operation (OS)
    #[serde(rename = "OS")]
    OnlineStart,
    /// Starting into standby (SS)
    #[serde(rename = "SS")]
    StandbyStart,
}

impl OperatingMode {
    /// Short label used in configuration and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnlineFailure => "OF",
            Self::StandbyFailure => "SF",
            Self::OnlineStart => "OS",
            Self::StandbyStart => "SS",
        }
    }

    /// True for the two start modes
    pub fn is_start(&self) -> bool {
        matches!(self, Self::OnlineStart | Self::StandbyStart)
    }

    /// Mode in effect for the rest of a period: a start runs as its
    /// continuous counterpart once the start check has passed
    pub fn continuous(&self) -> Self {
        match self {
            Self::OnlineStart => Self::OnlineFailure,
            Self::StandbyStart => Self::StandbyFailure,
            other => *other,
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatingMode {
    type Err = ReliabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OF" => Ok(Self::OnlineFailure),
            "SF" => Ok(Self::StandbyFailure),
            "OS" => Ok(Self::OnlineStart),
            "SS" => Ok(Self::StandbyStart),
            _ => Err(ReliabilityError::UnknownLabel {
                kind: "operating mode",
                label: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_modes_map_to_continuous() {
        assert_eq!(OperatingMode::OnlineStart.continuous(), OperatingMode::OnlineFailure);
        assert_eq!(OperatingMode::StandbyStart.continuous(), OperatingMode::StandbyFailure);
        assert_eq!(OperatingMode::OnlineFailure.continuous(), OperatingMode::OnlineFailure);
        assert!(OperatingMode::StandbyStart.is_start());
        assert!(!OperatingMode::StandbyFailure.is_start());
    }

    #[test]
    fn test_mode_labels() {
        for mode in [
            OperatingMode::OnlineFailure,
            OperatingMode::StandbyFailure,
            OperatingMode::OnlineStart,
            OperatingMode::StandbyStart,
        ] {
            assert_eq!(mode.as_str().parse::<OperatingMode>().unwrap(), mode);
        }
        assert_eq!("os".parse::<OperatingMode>().unwrap(), OperatingMode::OnlineStart);
        assert!("XX".parse::<OperatingMode>().is_err());
    }

    #[test]
    fn test_mode_serde_label() {
        let json = serde_json::to_string(&OperatingMode::StandbyStart).unwrap();
        assert_eq!(json, "\"SS\"");
    }
}
