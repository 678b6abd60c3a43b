//! # Component Reliability Model
//!
//! Failure/repair state machine for one equipment unit:
//! - Start penalties raising the hazard rate
//! - Per-period probe / commit / fail / repair protocol
//! - Status snapshots for checkpoint and replay
//!
//! ## States
//!
//! ```text
//!              generate_failure / shutdown
//!   Operational ───────────────────────────▶ Down
//!        ▲                                    │
//!        └──── advance_downtime / restore ────┘
//! ```

pub mod component;
pub mod period;
pub mod status;

pub use component::*;
pub use period::*;
pub use status::*;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ReliabilityError, Result};

/// How a component was brought into operation this period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StartType {
    /// Already running, no start
    #[default]
    None,
    HotStart,
    WarmStart,
    ColdStart,
}

impl StartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::HotStart => "HotStart",
            Self::WarmStart => "WarmStart",
            Self::ColdStart => "ColdStart",
        }
    }
}

impl fmt::Display for StartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StartType {
    type Err = ReliabilityError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "" | "None" => Ok(Self::None),
            "HotStart" => Ok(Self::HotStart),
            "WarmStart" => Ok(Self::WarmStart),
            "ColdStart" => Ok(Self::ColdStart),
            _ => Err(ReliabilityError::UnknownLabel {
                kind: "start type",
                label: s.to_string(),
            }),
        }
    }
}

/// Additive hazard-rate increments per start type
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StartPenalties {
    pub hot: f64,
    pub warm: f64,
    pub cold: f64,
}

impl StartPenalties {
    pub fn new(hot: f64, warm: f64, cold: f64) -> Self {
        Self { hot, warm, cold }
    }

    /// Penalty for a start type (0 for `None`)
    pub fn penalty(&self, start: StartType) -> f64 {
        match start {
            StartType::None => 0.0,
            StartType::HotStart => self.hot,
            StartType::WarmStart => self.warm,
            StartType::ColdStart => self.cold,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("hot_start_penalty", self.hot),
            ("warm_start_penalty", self.warm),
            ("cold_start_penalty", self.cold),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ReliabilityError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}
