//! # Plant Configuration
//!
//! Serializable descriptions of components and their failure modes, plus a
//! reference plant used by the demo and tests. Reading files is left to the
//! driver; this module only parses and validates.

use serde::{Deserialize, Serialize};

use crate::components::{Component, StartPenalties};
use crate::error::Result;
use crate::failure::{DistributionFamily, OperatingMode};

/// One failure channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureModeSpec {
    pub id: String,
    pub mode: OperatingMode,
    pub family: DistributionFamily,
    pub alpha: f64,
    pub beta: f64,
}

impl FailureModeSpec {
    pub fn new(id: &str, mode: OperatingMode, family: DistributionFamily, alpha: f64, beta: f64) -> Self {
        Self {
            id: id.to_string(),
            mode,
            family,
            alpha,
            beta,
        }
    }

    /// Gamma wear-out channel
    pub fn wear_out(id: &str, mode: OperatingMode, shape: f64, scale_hours: f64) -> Self {
        Self::new(id, mode, DistributionFamily::Gamma, shape, scale_hours)
    }

    /// Beta start-check channel
    pub fn start_check(id: &str, mode: OperatingMode, alpha: f64, beta: f64) -> Self {
        Self::new(id, mode, DistributionFamily::Beta, alpha, beta)
    }
}

/// One component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    pub component_type: String,
    /// Repair completion rate (events/h)
    pub repair_rate: f64,
    /// Mandatory downtime added to each repair (h)
    #[serde(default)]
    pub cooldown_time: f64,
    #[serde(default)]
    pub start_penalties: StartPenalties,
    /// Capacity fraction lost while down
    #[serde(default)]
    pub availability_reduction: f64,
    /// Cost per repair ($)
    #[serde(default)]
    pub repair_cost: f64,
    #[serde(default)]
    pub failure_modes: Vec<FailureModeSpec>,
}

impl ComponentSpec {
    pub fn new(name: &str, component_type: &str, repair_rate: f64) -> Self {
        Self {
            name: name.to_string(),
            component_type: component_type.to_string(),
            repair_rate,
            cooldown_time: 0.0,
            start_penalties: StartPenalties::default(),
            availability_reduction: 0.0,
            repair_cost: 0.0,
            failure_modes: Vec::new(),
        }
    }

    /// Builder: set cooldown time
    pub fn with_cooldown(mut self, hours: f64) -> Self {
        self.cooldown_time = hours;
        self
    }

    /// Builder: set start penalties
    pub fn with_penalties(mut self, hot: f64, warm: f64, cold: f64) -> Self {
        self.start_penalties = StartPenalties::new(hot, warm, cold);
        self
    }

    /// Builder: set availability reduction and repair cost
    pub fn with_costs(mut self, availability_reduction: f64, repair_cost: f64) -> Self {
        self.availability_reduction = availability_reduction;
        self.repair_cost = repair_cost;
        self
    }

    /// Builder: add a failure channel
    pub fn with_failure_mode(mut self, mode: FailureModeSpec) -> Self {
        self.failure_modes.push(mode);
        self
    }

    pub fn build(&self) -> Result<Component> {
        Component::from_spec(self)
    }
}

/// Set of components simulated together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantSpec {
    pub components: Vec<ComponentSpec>,
}

impl PlantSpec {
    pub fn new(components: Vec<ComponentSpec>) -> Self {
        Self { components }
    }

    /// Parse a JSON plant description
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build every component, in declaration order
    pub fn build(&self) -> Result<Vec<Component>> {
        self.components.iter().map(ComponentSpec::build).collect()
    }

    /// Reference power block: turbine, feedwater pumps, condenser fans
    pub fn reference_plant() -> Self {
        use OperatingMode::*;

        let turbine = ComponentSpec::new("turbine", "steam turbine", 1.0 / 72.0)
            .with_cooldown(24.0)
            .with_penalties(0.001, 0.005, 0.02)
            .with_costs(1.0, 150_000.0)
            .with_failure_mode(FailureModeSpec::wear_out("blade_fatigue", OnlineFailure, 2.0, 9_000.0))
            .with_failure_mode(FailureModeSpec::wear_out("bearing", OnlineFailure, 1.0, 30_000.0))
            .with_failure_mode(FailureModeSpec::start_check("trip_on_start", OnlineStart, 1.0, 199.0));

        let pump = |name: &str| {
            ComponentSpec::new(name, "feedwater pump", 1.0 / 12.0)
                .with_cooldown(2.0)
                .with_penalties(0.0005, 0.001, 0.002)
                .with_costs(0.5, 8_000.0)
                .with_failure_mode(FailureModeSpec::wear_out("seal", OnlineFailure, 3.0, 2_500.0))
                .with_failure_mode(FailureModeSpec::wear_out("seal_standby", StandbyFailure, 1.0, 50_000.0))
                .with_failure_mode(FailureModeSpec::start_check("fail_to_start", OnlineStart, 1.0, 499.0))
                .with_failure_mode(FailureModeSpec::start_check("fail_to_standby", StandbyStart, 1.0, 999.0))
        };

        let fans = ComponentSpec::new("condenser_fans", "air-cooled condenser", 1.0 / 8.0)
            .with_costs(0.1, 2_000.0)
            .with_failure_mode(FailureModeSpec::wear_out("gearbox", OnlineFailure, 1.5, 6_000.0));

        Self::new(vec![turbine, pump("feedwater_pump_a"), pump("feedwater_pump_b"), fans])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReliabilityError;

    #[test]
    fn test_reference_plant_builds() {
        let plant = PlantSpec::reference_plant();
        let components = plant.build().unwrap();
        assert_eq!(components.len(), 4);
        assert_eq!(components[0].name(), "turbine");
        assert_eq!(components[0].failure_modes().len(), 3);
        assert_eq!(components[1].failure_modes()[2].mode(), OperatingMode::OnlineStart);
        assert_eq!(components[0].cooldown_time(), 24.0);
    }

    #[test]
    fn test_json_round_trip() {
        let plant = PlantSpec::reference_plant();
        let json = plant.to_json().unwrap();
        assert!(json.contains("\"OF\""));
        assert!(json.contains("\"gamma\""));
        assert_eq!(PlantSpec::from_json(&json).unwrap(), plant);
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "components": [{
                "name": "heater",
                "component_type": "electric heater",
                "repair_rate": 0.25,
                "failure_modes": [
                    {"id": "element", "mode": "OF", "family": "gamma", "alpha": 1.0, "beta": 4000.0}
                ]
            }]
        }"#;
        let plant = PlantSpec::from_json(json).unwrap();
        let heater = &plant.build().unwrap()[0];
        assert_eq!(heater.cooldown_time(), 0.0);
        assert_eq!(heater.start_penalties(), StartPenalties::default());
        assert_eq!(heater.failure_modes()[0].id(), "element");
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(PlantSpec::from_json("{ not json"), Err(ReliabilityError::Config(_))));

        let reserved = ComponentSpec::new("MAINTENANCE", "x", 1.0);
        assert!(matches!(reserved.build(), Err(ReliabilityError::ReservedName { .. })));

        let negative = ComponentSpec::new("pump", "x", 1.0).with_costs(-0.5, 0.0);
        assert!(matches!(negative.build(), Err(ReliabilityError::InvalidParameter { .. })));

        let bad_mode = ComponentSpec::new("pump", "x", 1.0)
            .with_failure_mode(FailureModeSpec::wear_out("seal", OperatingMode::OnlineFailure, -1.0, 10.0));
        assert!(matches!(bad_mode.build(), Err(ReliabilityError::InvalidDistribution { .. })));
    }
}
