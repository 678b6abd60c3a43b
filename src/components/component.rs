//! Single equipment unit with its failure channels and repair model.

use tracing::{debug, trace};

use crate::config::ComponentSpec;
use crate::constants::{BASELINE_HAZARD_RATE, RESERVED_MAINTENANCE_NAME};
use crate::error::{ReliabilityError, Result};
use crate::events::{FailureEvent, FailureSink};
use crate::failure::{DistributionFamily, FailureDistribution, FailureMode, OperatingMode};
use crate::stochastic::Well512;

use super::{ComponentStatus, OperationalStatus, PeriodOutcome, PeriodPlan, StartPenalties};

/// Equipment unit
///
/// Failure mode order is significant: the index of a mode is the
/// `fail_idx` recorded in failure events.
#[derive(Debug, Clone)]
pub struct Component {
    name: String,
    component_type: String,
    penalties: StartPenalties,
    /// Repair cost ($), informational
    repair_cost: f64,
    /// Capacity lost while down (fraction), informational
    availability_reduction: f64,
    /// Mandatory downtime added to every repair (h)
    cooldown_time: f64,
    repair_dist: FailureDistribution,
    failure_modes: Vec<FailureMode>,
    status: OperationalStatus,
}

impl Component {
    /// Create a component
    ///
    /// ## Arguments
    /// * `repair_rate` - Repair completion rate (events/h)
    /// * `cooldown_time` - Extra downtime per repair (h)
    /// * `penalties` - Hazard increments for hot/warm/cold starts
    pub fn new(
        name: impl Into<String>,
        component_type: impl Into<String>,
        repair_rate: f64,
        cooldown_time: f64,
        penalties: StartPenalties,
    ) -> Result<Self> {
        let name = name.into();
        if name == RESERVED_MAINTENANCE_NAME {
            return Err(ReliabilityError::ReservedName { name });
        }
        penalties.validate()?;
        let repair_dist = FailureDistribution::exponential(repair_rate, cooldown_time)?;

        Ok(Self {
            name,
            component_type: component_type.into(),
            penalties,
            repair_cost: 0.0,
            availability_reduction: 0.0,
            cooldown_time,
            repair_dist,
            failure_modes: Vec::new(),
            status: OperationalStatus::default(),
        })
    }

    /// Build a component and its failure modes from configuration
    pub fn from_spec(spec: &ComponentSpec) -> Result<Self> {
        if spec.name == RESERVED_MAINTENANCE_NAME {
            return Err(ReliabilityError::ReservedName { name: spec.name.clone() });
        }
        for (name, value) in [
            ("availability_reduction", spec.availability_reduction),
            ("repair_cost", spec.repair_cost),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ReliabilityError::InvalidParameter { name, value });
            }
        }

        let mut component = Self::new(
            spec.name.clone(),
            spec.component_type.clone(),
            spec.repair_rate,
            spec.cooldown_time,
            spec.start_penalties,
        )?
        .with_availability_reduction(spec.availability_reduction)
        .with_repair_cost(spec.repair_cost);

        for mode in &spec.failure_modes {
            component.add_failure_mode(mode.id.clone(), mode.mode, mode.family, mode.alpha, mode.beta)?;
        }
        Ok(component)
    }

    /// Builder: set availability reduction
    pub fn with_availability_reduction(mut self, reduction: f64) -> Self {
        self.availability_reduction = reduction;
        self
    }

    /// Builder: set repair cost
    pub fn with_repair_cost(mut self, cost: f64) -> Self {
        self.repair_cost = cost;
        self
    }

    /// Append a failure channel; returns its index
    ///
    /// Start modes (OS, SS) need a Beta distribution, running modes
    /// (OF, SF) a wear-out distribution.
    pub fn add_failure_mode(
        &mut self,
        id: impl Into<String>,
        mode: OperatingMode,
        family: DistributionFamily,
        alpha: f64,
        beta: f64,
    ) -> Result<usize> {
        let failure_mode = FailureMode::new(self.name.clone(), id, mode, family, alpha, beta)?;
        if mode.is_start() != failure_mode.distribution().is_start_check() {
            return Err(ReliabilityError::InvalidDistribution {
                family: family.to_string(),
                reason: format!("not usable for mode {mode} of '{}'", self.name),
            });
        }
        self.failure_modes.push(failure_mode);
        Ok(self.failure_modes.len() - 1)
    }

    /// Seed every channel as if the unit were new
    pub fn generate_initial_lifes_and_probs(&mut self, rng: &mut Well512) {
        for failure_mode in &mut self.failure_modes {
            failure_mode.regenerate(rng);
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Unit name, also the event-log component key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form equipment class
    pub fn component_type(&self) -> &str {
        &self.component_type
    }

    /// Failure channels in index order
    pub fn failure_modes(&self) -> &[FailureMode] {
        &self.failure_modes
    }

    /// Exponential repair time with the cooldown floor
    pub fn repair_distribution(&self) -> &FailureDistribution {
        &self.repair_dist
    }

    /// Current hazard-rate multiplier (1.0 after a repair)
    pub fn hazard_rate(&self) -> f64 {
        self.status.hazard_rate
    }

    pub fn repair_cost(&self) -> f64 {
        self.repair_cost
    }

    pub fn availability_reduction(&self) -> f64 {
        self.availability_reduction
    }

    pub fn cooldown_time(&self) -> f64 {
        self.cooldown_time
    }

    /// True when no downtime is left
    pub fn is_operational(&self) -> bool {
        self.status.operational
    }

    /// Hours until repaired
    pub fn downtime_remaining(&self) -> f64 {
        self.status.downtime_remaining
    }

    pub fn start_penalties(&self) -> StartPenalties {
        self.penalties
    }

    pub fn hot_start_penalty(&self) -> f64 {
        self.penalties.hot
    }

    pub fn warm_start_penalty(&self) -> f64 {
        self.penalties.warm
    }

    pub fn cold_start_penalty(&self) -> f64 {
        self.penalties.cold
    }

    /// Life-or-probability value of every channel, in mode order
    pub fn lifetimes_and_probs(&self) -> Vec<f64> {
        self.failure_modes.iter().map(FailureMode::life_or_prob).collect()
    }

    // ------------------------------------------------------------------
    // Maintenance and direct status control
    // ------------------------------------------------------------------

    /// Take the unit out of service for `duration` hours (maintenance)
    pub fn shutdown(&mut self, duration: f64) -> Result<()> {
        check_duration("shutdown duration", duration)?;
        self.status.set_downtime(duration);
        debug!(component = %self.name, duration, "shutdown");
        Ok(())
    }

    /// Return the unit to service immediately
    pub fn restore(&mut self) {
        self.status.set_downtime(0.0);
    }

    /// Back to the baseline hazard rate
    pub fn reset_hazard_rate(&mut self) {
        self.status.hazard_rate = BASELINE_HAZARD_RATE;
    }

    /// Overwrite the remaining downtime; the operational flag follows
    pub fn set_downtime_remaining(&mut self, time: f64) -> Result<()> {
        check_duration("downtime_remaining", time)?;
        self.status.set_downtime(time);
        Ok(())
    }

    /// Move time forward while down; overshoot past the repair is dropped
    pub fn advance_downtime(&mut self, time: f64) -> Result<()> {
        check_duration("elapsed time", time)?;
        let remaining = self.status.downtime_remaining - time;
        self.status.set_downtime(remaining);
        trace!(component = %self.name, remaining = self.status.downtime_remaining, "downtime advanced");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Failure model
    // ------------------------------------------------------------------

    /// Operating hours in `mode` until the first wear-out channel is
    /// exhausted at the current hazard rate
    ///
    /// Returns `INFINITY` for `ramp_mult == 0` or when no channel matches.
    pub fn hours_to_failure(&self, ramp_mult: f64, mode: OperatingMode) -> f64 {
        if ramp_mult == 0.0 {
            return f64::INFINITY;
        }
        self.failure_modes
            .iter()
            .filter(|fm| fm.mode() == mode)
            .map(|fm| fm.life_remaining() / (self.status.hazard_rate * ramp_mult))
            .fold(f64::INFINITY, f64::min)
    }

    /// First wear-out channel the plan would exhaust, with the start
    /// penalty applied transiently. Draws nothing and mutates nothing.
    pub fn would_wear_out(&self, plan: &PeriodPlan) -> Result<Option<usize>> {
        plan.validate()?;
        if plan.ramp_mult == 0.0 {
            return Ok(None);
        }
        let hazard = self.status.hazard_rate + self.penalties.penalty(plan.start);
        let consumption = plan.hours * hazard * plan.ramp_mult;
        let opmode = plan.mode.continuous();
        Ok(self
            .failure_modes
            .iter()
            .position(|fm| fm.mode() == opmode && consumption > fm.life_remaining()))
    }

    /// Bernoulli start check for every channel of a start mode
    ///
    /// Each matching channel draws one variate `v` and fails when
    /// `v · hazard_rate <= failure_probability`. Returns the failed indices.
    pub fn test_for_binary_failure(
        &mut self,
        mode: OperatingMode,
        t: u64,
        rng: &mut Well512,
        log: &mut dyn FailureSink,
    ) -> Result<Vec<usize>> {
        self.ensure_operational()?;
        let mut failed = Vec::new();
        if !mode.is_start() {
            return Ok(failed);
        }
        for j in 0..self.failure_modes.len() {
            if self.failure_modes[j].mode() != mode {
                continue;
            }
            let v = rng.next_variate();
            if v * self.status.hazard_rate <= self.failure_modes[j].failure_probability() {
                self.generate_failure(rng, t, j, log)?;
                failed.push(j);
            }
        }
        Ok(failed)
    }

    /// Probe a plan before committing it
    ///
    /// Runs the start check for start modes, then compares projected
    /// consumption `hours · (hazard + start penalty) · ramp` against each
    /// matching wear-out channel. The start penalty is not committed and no
    /// operating time is consumed. Every channel that trips is recorded
    /// through [`Component::generate_failure`]; the failed indices are
    /// returned.
    pub fn test_for_failure(
        &mut self,
        plan: &PeriodPlan,
        t: u64,
        rng: &mut Well512,
        log: &mut dyn FailureSink,
    ) -> Result<Vec<usize>> {
        plan.validate()?;
        let penalty = self.penalties.penalty(plan.start);
        let mut failed = self.test_for_binary_failure(plan.mode, t, rng, log)?;
        if plan.ramp_mult == 0.0 {
            return Ok(failed);
        }

        let opmode = plan.mode.continuous();
        for j in 0..self.failure_modes.len() {
            if self.failure_modes[j].mode() != opmode {
                continue;
            }
            let consumption = plan.hours * (self.status.hazard_rate + penalty) * plan.ramp_mult;
            if consumption > self.failure_modes[j].life_remaining() {
                self.generate_failure(rng, t, j, log)?;
                failed.push(j);
            }
        }
        Ok(failed)
    }

    /// Commit a period of operation
    ///
    /// Adds the start penalty to the stored hazard rate, then depletes every
    /// matching wear-out channel by `hours · hazard · ramp`. Unless
    /// `read_only`, exhausting a channel here is an ordering error: the
    /// failure should have been raised by the probe. Nothing is mutated when
    /// an error is returned.
    pub fn operate(&mut self, plan: &PeriodPlan, read_only: bool) -> Result<()> {
        plan.validate()?;
        self.ensure_operational()?;
        let hazard = self.status.hazard_rate + self.penalties.penalty(plan.start);
        let opmode = plan.mode.continuous();
        let consumption = plan.hours * hazard * plan.ramp_mult;

        if plan.ramp_mult != 0.0 && !read_only {
            if let Some((index, fm)) = self
                .failure_modes
                .iter()
                .enumerate()
                .find(|(_, fm)| fm.mode() == opmode && consumption > fm.life_remaining())
            {
                return Err(ReliabilityError::LifeExhausted {
                    component: self.name.clone(),
                    index,
                    consumption,
                    life_remaining: fm.life_remaining(),
                });
            }
        }

        self.status.hazard_rate = hazard;
        if plan.ramp_mult != 0.0 {
            for fm in self.failure_modes.iter_mut().filter(|fm| fm.mode() == opmode) {
                fm.reduce_life_remaining(consumption);
            }
        }
        trace!(component = %self.name, mode = %opmode, consumption, hazard, "operated");
        Ok(())
    }

    /// Fail the unit through channel `fail_idx`
    ///
    /// Samples the repair time, regenerates the failing channel, resets the
    /// hazard rate and appends the event to `log`.
    pub fn generate_failure(
        &mut self,
        rng: &mut Well512,
        t: u64,
        fail_idx: usize,
        log: &mut dyn FailureSink,
    ) -> Result<()> {
        self.check_index(fail_idx)?;

        let downtime = self.repair_dist.sample(rng);
        self.status.set_downtime(downtime);
        self.failure_modes[fail_idx].regenerate(rng);
        self.reset_hazard_rate();

        let new_life = self.failure_modes[fail_idx].life_or_prob();
        debug!(
            component = %self.name,
            period = t,
            index = fail_idx,
            downtime,
            new_life,
            "failure generated"
        );
        log.record(FailureEvent {
            period: t,
            component: self.name.clone(),
            fail_idx,
            duration: self.status.downtime_remaining,
            new_life,
        });
        Ok(())
    }

    /// Apply a previously recorded failure without drawing randomness
    pub fn read_failure(
        &mut self,
        downtime: f64,
        life_remaining: f64,
        fail_idx: usize,
        reset_hazard: bool,
    ) -> Result<()> {
        self.check_index(fail_idx)?;
        check_duration("downtime", downtime)?;

        self.status.set_downtime(downtime);
        self.failure_modes[fail_idx].set_life_or_prob(life_remaining);
        if reset_hazard {
            self.reset_hazard_rate();
        }
        debug!(component = %self.name, index = fail_idx, downtime, "failure replayed");
        Ok(())
    }

    /// Replay a logged event on this component
    pub fn replay_event(&mut self, event: &FailureEvent) -> Result<()> {
        if event.component != self.name {
            return Err(ReliabilityError::ComponentMismatch {
                expected: self.name.clone(),
                actual: event.component.clone(),
            });
        }
        self.read_failure(event.duration, event.new_life, event.fail_idx, true)
    }

    /// Run one period through the probe → commit pipeline
    ///
    /// A down unit only advances its repair. An operational unit is probed;
    /// if any channel fails the period is not committed.
    pub fn run_period(
        &mut self,
        plan: &PeriodPlan,
        t: u64,
        rng: &mut Well512,
        log: &mut dyn FailureSink,
    ) -> Result<PeriodOutcome> {
        if !self.is_operational() {
            self.advance_downtime(plan.hours)?;
            return Ok(PeriodOutcome::Repairing {
                downtime_remaining: self.status.downtime_remaining,
            });
        }

        let failed = self.test_for_failure(plan, t, rng, log)?;
        if !failed.is_empty() {
            return Ok(PeriodOutcome::Failed {
                modes: failed,
                downtime: self.status.downtime_remaining,
            });
        }

        self.operate(plan, false)?;
        Ok(PeriodOutcome::Operated)
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    /// Snapshot lives, hazard rate and downtime
    pub fn get_state(&self) -> ComponentStatus {
        ComponentStatus::new(
            self.lifetimes_and_probs(),
            self.status.hazard_rate,
            self.status.downtime_remaining,
        )
    }

    /// Restore a snapshot; `operational` is recomputed from the downtime
    pub fn read_status(&mut self, status: &ComponentStatus) -> Result<()> {
        if status.lifetimes.len() != self.failure_modes.len() {
            return Err(ReliabilityError::StatusMismatch {
                component: self.name.clone(),
                expected: self.failure_modes.len(),
                actual: status.lifetimes.len(),
            });
        }
        if !(status.hazard_rate >= BASELINE_HAZARD_RATE && status.hazard_rate.is_finite()) {
            return Err(ReliabilityError::InvalidParameter {
                name: "hazard_rate",
                value: status.hazard_rate,
            });
        }
        check_duration("downtime_remaining", status.downtime_remaining)?;

        self.status.hazard_rate = status.hazard_rate;
        self.status.set_downtime(status.downtime_remaining);
        for (fm, &value) in self.failure_modes.iter_mut().zip(&status.lifetimes) {
            fm.set_life_or_prob(value);
        }
        Ok(())
    }

    fn ensure_operational(&self) -> Result<()> {
        if self.status.operational {
            Ok(())
        } else {
            Err(ReliabilityError::NotOperational {
                component: self.name.clone(),
                downtime_remaining: self.status.downtime_remaining,
            })
        }
    }

    fn check_index(&self, fail_idx: usize) -> Result<()> {
        if fail_idx < self.failure_modes.len() {
            Ok(())
        } else {
            Err(ReliabilityError::UnknownFailureMode {
                component: self.name.clone(),
                index: fail_idx,
            })
        }
    }
}

fn check_duration(name: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ReliabilityError::InvalidParameter { name, value })
    }
}
