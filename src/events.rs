//! # Failure Events
//!
//! Immutable failure records and the append-only collector they go to.
//!
//! The log is owned by the simulation driver; components only see it
//! through [`FailureSink`] and can only append.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Identity of a failure: (period, component, failure mode index)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FailureKey {
    pub period: u64,
    pub component: String,
    pub fail_idx: usize,
}

/// Recorded failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureEvent {
    /// Period index the failure occurred in
    pub period: u64,
    /// Component name
    pub component: String,
    /// Index of the failing mode within the component
    pub fail_idx: usize,
    /// Sampled downtime (h)
    pub duration: f64,
    /// Regenerated life remaining or probability of the failing mode
    pub new_life: f64,
}

impl FailureEvent {
    pub fn key(&self) -> FailureKey {
        FailureKey {
            period: self.period,
            component: self.component.clone(),
            fail_idx: self.fail_idx,
        }
    }
}

/// Append-only destination for failure events
pub trait FailureSink {
    /// Store one failure event
    fn record(&mut self, event: FailureEvent);
}

impl FailureSink for Vec<FailureEvent> {
    fn record(&mut self, event: FailureEvent) {
        self.push(event);
    }
}

/// Failure event log keyed by [`FailureKey`]
///
/// A second event with the same key replaces the first (last write wins);
/// replacements are counted and logged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailureEventLog {
    events: BTreeMap<FailureKey, FailureEvent>,
    overwrites: usize,
}

impl FailureSink for FailureEventLog {
    fn record(&mut self, event: FailureEvent) {
        let key = event.key();
        if let Some(previous) = self.events.insert(key, event) {
            self.overwrites += 1;
            warn!(
                period = previous.period,
                component = %previous.component,
                index = previous.fail_idx,
                "failure event overwritten"
            );
        }
    }
}

impl FailureEventLog {
    /// Empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Event stored under `key`
    pub fn get(&self, key: &FailureKey) -> Option<&FailureEvent> {
        self.events.get(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True before the first failure
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events ordered by (period, component, index)
    pub fn iter(&self) -> impl Iterator<Item = &FailureEvent> {
        self.events.values()
    }

    /// Events for one component, in period order
    pub fn events_for<'a>(&'a self, component: &'a str) -> impl Iterator<Item = &'a FailureEvent> + 'a {
        self.events.values().filter(move |e| e.component == component)
    }

    /// Events recorded in one period
    pub fn events_at(&self, period: u64) -> impl Iterator<Item = &FailureEvent> {
        self.events.values().filter(move |e| e.period == period)
    }

    /// Owned copy of all events, in key order
    pub fn to_events(&self) -> Vec<FailureEvent> {
        self.events.values().cloned().collect()
    }

    /// Number of records that replaced an existing key
    pub fn overwrites(&self) -> usize {
        self.overwrites
    }

    /// Aggregate counts and downtime
    pub fn summary(&self) -> LogSummary {
        let mut per_component: HashMap<String, ComponentTally> = HashMap::new();
        let mut total_downtime = 0.0;
        for event in self.events.values() {
            total_downtime += event.duration;
            let tally = per_component.entry(event.component.clone()).or_default();
            tally.failures += 1;
            tally.downtime += event.duration;
        }
        LogSummary {
            events: self.events.len(),
            total_downtime,
            overwrites: self.overwrites,
            per_component,
        }
    }
}

/// Per-component totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentTally {
    pub failures: usize,
    pub downtime: f64,
}

/// Log totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogSummary {
    pub events: usize,
    pub total_downtime: f64,
    pub overwrites: usize,
    pub per_component: HashMap<String, ComponentTally>,
}

impl LogSummary {
    /// Human-readable summary
    pub fn report(&self) -> String {
        let mut names: Vec<&String> = self.per_component.keys().collect();
        names.sort();

        let mut out = format!(
            "Failures: {}  Downtime: {:.1} h  Overwritten: {}\n",
            self.events, self.total_downtime, self.overwrites
        );
        for name in names {
            let tally = &self.per_component[name];
            out.push_str(&format!(
                "  {:<24} {:>5} failures {:>10.1} h\n",
                name, tally.failures, tally.downtime
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn event(period: u64, component: &str, fail_idx: usize, duration: f64) -> FailureEvent {
        FailureEvent {
            period,
            component: component.to_string(),
            fail_idx,
            duration,
            new_life: 500.0,
        }
    }

    #[test]
    fn test_keys_are_structured() {
        // "1" + "2a" + "0" and "12" + "a" + "0" collide as strings
        let mut log = FailureEventLog::new();
        log.record(event(1, "2a", 0, 1.0));
        log.record(event(12, "a", 0, 1.0));
        assert_eq!(log.len(), 2);
        assert_eq!(log.overwrites(), 0);
    }

    #[test]
    #[traced_test]
    fn test_last_write_wins() {
        let mut log = FailureEventLog::new();
        log.record(event(3, "pump", 1, 10.0));
        log.record(event(3, "pump", 1, 20.0));

        assert_eq!(log.len(), 1);
        assert_eq!(log.overwrites(), 1);
        let key = FailureKey { period: 3, component: "pump".to_string(), fail_idx: 1 };
        assert_eq!(log.get(&key).unwrap().duration, 20.0);
        assert!(logs_contain("failure event overwritten"));
    }

    #[test]
    fn test_ordering_and_filters() {
        let mut log = FailureEventLog::new();
        log.record(event(5, "turbine", 0, 4.0));
        log.record(event(2, "pump", 0, 1.0));
        log.record(event(2, "fan", 1, 2.0));

        let periods: Vec<u64> = log.iter().map(|e| e.period).collect();
        assert_eq!(periods, vec![2, 2, 5]);
        assert_eq!(log.events_for("pump").count(), 1);
        assert_eq!(log.events_at(2).count(), 2);
    }

    #[test]
    fn test_summary() {
        let mut log = FailureEventLog::new();
        log.record(event(1, "pump", 0, 10.0));
        log.record(event(7, "pump", 0, 5.0));
        log.record(event(7, "fan", 0, 2.5));

        let summary = log.summary();
        assert_eq!(summary.events, 3);
        assert_eq!(summary.total_downtime, 17.5);
        assert_eq!(summary.per_component["pump"].failures, 2);
        assert_eq!(summary.per_component["pump"].downtime, 15.0);
        assert!(summary.report().contains("fan"));
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<FailureEvent> = Vec::new();
        FailureSink::record(&mut sink, event(0, "a", 0, 1.0));
        FailureSink::record(&mut sink, event(0, "a", 0, 1.0));
        assert_eq!(sink.len(), 2);
    }
}
