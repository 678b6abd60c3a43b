//! # Replications
//!
//! Independent simulation runs, one per scenario id.
//!
//! Each replication owns its generator, its failure log and its
//! components, so replications share no mutable state and run in parallel.
//! Within a replication components are driven in declaration order; that
//! order is part of the reproducibility contract.

use rayon::prelude::*;
use tracing::info;

use crate::components::{Component, ComponentStatus, PeriodOutcome, PeriodPlan};
use crate::config::PlantSpec;
use crate::error::Result;
use crate::events::FailureEventLog;
use crate::stochastic::Well512;

/// Run context of one replication
#[derive(Debug, Clone)]
pub struct Replication {
    pub scenario: u32,
    pub rng: Well512,
    pub log: FailureEventLog,
    pub components: Vec<Component>,
}

/// Period counts accumulated by [`Replication::simulate`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplicationStats {
    pub operated: usize,
    pub failed: usize,
    pub repairing: usize,
    pub idle: usize,
}

impl Replication {
    /// Build the plant and seed every failure channel as new
    pub fn new(scenario: u32, plant: &PlantSpec) -> Result<Self> {
        let mut rng = Well512::new(scenario);
        let mut components = plant.build()?;
        for component in &mut components {
            component.generate_initial_lifes_and_probs(&mut rng);
        }
        Ok(Self {
            scenario,
            rng,
            log: FailureEventLog::new(),
            components,
        })
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name() == name)
    }

    /// Drive every component for `periods` periods of `period_hours`
    ///
    /// `plan_for(t, component)` returns the dispatch for the period, or
    /// `None` to leave the component idle (repairs still progress).
    pub fn simulate<F>(&mut self, periods: u64, period_hours: f64, mut plan_for: F) -> Result<ReplicationStats>
    where
        F: FnMut(u64, &Component) -> Option<PeriodPlan>,
    {
        let mut stats = ReplicationStats::default();
        for t in 0..periods {
            for component in &mut self.components {
                match plan_for(t, component) {
                    Some(plan) => match component.run_period(&plan, t, &mut self.rng, &mut self.log)? {
                        PeriodOutcome::Operated => stats.operated += 1,
                        PeriodOutcome::Failed { .. } => stats.failed += 1,
                        PeriodOutcome::Repairing { .. } => stats.repairing += 1,
                    },
                    None if !component.is_operational() => {
                        component.advance_downtime(period_hours)?;
                        stats.repairing += 1;
                    }
                    None => stats.idle += 1,
                }
            }
        }
        Ok(stats)
    }

    /// Snapshot of every component, in plant order
    pub fn states(&self) -> Vec<(String, ComponentStatus)> {
        self.components
            .iter()
            .map(|c| (c.name().to_string(), c.get_state()))
            .collect()
    }
}

/// Output of one finished replication
#[derive(Debug, Clone)]
pub struct ReplicationReport<T> {
    pub scenario: u32,
    pub log: FailureEventLog,
    pub final_states: Vec<(String, ComponentStatus)>,
    pub output: T,
}

/// Runs replications of one plant in parallel
#[derive(Debug, Clone)]
pub struct ReplicationRunner {
    plant: PlantSpec,
}

impl ReplicationRunner {
    pub fn new(plant: PlantSpec) -> Self {
        Self { plant }
    }

    pub fn plant(&self) -> &PlantSpec {
        &self.plant
    }

    /// Run `f` once per scenario id
    ///
    /// Reports come back in the order of `scenarios` regardless of thread
    /// scheduling.
    pub fn run<T, F>(&self, scenarios: &[u32], f: F) -> Vec<Result<ReplicationReport<T>>>
    where
        T: Send,
        F: Fn(&mut Replication) -> Result<T> + Sync,
    {
        scenarios
            .par_iter()
            .map(|&scenario| -> Result<ReplicationReport<T>> {
                info!(scenario, "replication started");
                let mut replication = Replication::new(scenario, &self.plant)?;
                let output = f(&mut replication)?;
                info!(scenario, failures = replication.log.len(), "replication finished");
                Ok(ReplicationReport {
                    scenario,
                    final_states: replication.states(),
                    log: replication.log,
                    output,
                })
            })
            .collect()
    }
}

/// Failure statistics across replications
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicationSummary {
    pub replications: usize,
    /// Mean failures per replication
    pub mean_failures: f64,
    /// Standard error of `mean_failures`
    pub std_error: f64,
    /// 95% confidence interval of `mean_failures`
    pub confidence_95: (f64, f64),
    /// Mean repair downtime per replication (h)
    pub mean_downtime: f64,
}

impl ReplicationSummary {
    pub fn from_reports<T>(reports: &[ReplicationReport<T>]) -> Self {
        let n = reports.len();
        if n == 0 {
            return Self {
                replications: 0,
                mean_failures: 0.0,
                std_error: 0.0,
                confidence_95: (0.0, 0.0),
                mean_downtime: 0.0,
            };
        }

        let counts: Vec<f64> = reports.iter().map(|r| r.log.len() as f64).collect();
        let mean = counts.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_error = (variance / n as f64).sqrt();
        let mean_downtime =
            reports.iter().map(|r| r.log.summary().total_downtime).sum::<f64>() / n as f64;

        Self {
            replications: n,
            mean_failures: mean,
            std_error,
            confidence_95: (mean - 1.96 * std_error, mean + 1.96 * std_error),
            mean_downtime,
        }
    }

    pub fn report(&self) -> String {
        format!(
            "Replications: {}\n\
             Failures per replication: {:.2} ± {:.2} (95% CI {:.2} – {:.2})\n\
             Repair downtime per replication: {:.1} h",
            self.replications,
            self.mean_failures,
            self.std_error,
            self.confidence_95.0,
            self.confidence_95.1,
            self.mean_downtime,
        )
    }
}
