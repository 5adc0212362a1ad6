//! Statistics collection and reporting
//!
//! This module summarises a generated event list for the run report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Duration;

use crate::events::LoginAttempt;
use crate::types::{ActorId, LoginStatus};

/// Summary of one run's output
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventStatistics {
    /// Total number of events generated
    pub total_events: usize,
    /// Number of successful logins
    pub success_events: usize,
    /// Number of failed logins
    pub failure_events: usize,
    /// Number of distinct actor identities seen
    pub distinct_actors: usize,
    /// Highest number of failures attributed to a single identity
    pub max_failures_per_actor: usize,
    /// Identity with the most failures, if any failed
    pub noisiest_actor: Option<ActorId>,
    /// Earliest event time
    pub first_event: Option<DateTime<Utc>>,
    /// Latest event time
    pub last_event: Option<DateTime<Utc>>,
    /// Wall-clock time spent generating
    pub generation_duration: Duration,
}

impl EventStatistics {
    /// Compute statistics over a list of events
    pub fn from_events(events: &[LoginAttempt]) -> Self {
        let mut stats = Self::default();
        let mut actors = BTreeSet::new();
        let mut failures_by_actor: BTreeMap<ActorId, usize> = BTreeMap::new();

        for event in events {
            stats.total_events += 1;
            actors.insert(event.actor_id);
            match event.status {
                LoginStatus::Success => stats.success_events += 1,
                LoginStatus::Failure => {
                    stats.failure_events += 1;
                    *failures_by_actor.entry(event.actor_id).or_default() += 1;
                }
            }

            stats.first_event = Some(stats.first_event.map_or(event.time, |t| t.min(event.time)));
            stats.last_event = Some(stats.last_event.map_or(event.time, |t| t.max(event.time)));
        }

        stats.distinct_actors = actors.len();
        // Ties go to the lowest identity
        if let Some((actor, count)) = failures_by_actor
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        {
            stats.noisiest_actor = Some(*actor);
            stats.max_failures_per_actor = *count;
        }

        stats
    }

    /// Record how long generation took
    pub fn set_generation_duration(&mut self, duration: Duration) {
        self.generation_duration = duration;
    }

    /// Get the percentage of successful events
    pub fn success_percentage(&self) -> f64 {
        if self.total_events == 0 {
            0.0
        } else {
            (self.success_events as f64 / self.total_events as f64) * 100.0
        }
    }

    /// Get the percentage of failed events
    pub fn failure_percentage(&self) -> f64 {
        if self.total_events == 0 {
            0.0
        } else {
            (self.failure_events as f64 / self.total_events as f64) * 100.0
        }
    }

    /// Time between the first and last event
    pub fn span(&self) -> chrono::Duration {
        match (self.first_event, self.last_event) {
            (Some(first), Some(last)) => last - first,
            _ => chrono::Duration::zero(),
        }
    }

    /// Generate the report printed after a run
    pub fn generate_report(&self) -> String {
        let mut output = String::new();

        output.push_str("Login Event Simulation Complete\n");
        output.push_str("===============================\n\n");

        output.push_str("Event Statistics:\n");
        output.push_str(&format!("   Total Events Generated: {}\n", self.total_events));
        output.push_str(&format!(
            "   Success Rate: {:.1}% ({} successful, {} failed)\n",
            self.success_percentage(),
            self.success_events,
            self.failure_events
        ));
        output.push_str(&format!("   Distinct Actors: {}\n", self.distinct_actors));
        if let Some(actor) = self.noisiest_actor {
            output.push_str(&format!(
                "   Most Failures: {} from {}\n",
                self.max_failures_per_actor, actor
            ));
        }
        if let (Some(first), Some(last)) = (self.first_event, self.last_event) {
            output.push_str(&format!(
                "   Time Span: {} to {} ({}s)\n",
                first.to_rfc3339(),
                last.to_rfc3339(),
                self.span().num_seconds()
            ));
        }

        if self.generation_duration.as_secs_f64() > 0.0 {
            let events_per_second = self.total_events as f64 / self.generation_duration.as_secs_f64();
            output.push_str(&format!("\nPerformance:\n   Generated {:.0} events/second\n", events_per_second));
        }

        output.push_str("\nSummary: ");
        output.push_str(&self.compact_summary());
        output.push('\n');

        output
    }

    /// One-line summary suitable for logging
    pub fn compact_summary(&self) -> String {
        format!(
            "{} events ({} success, {} failures) from {} actors",
            self.total_events, self.success_events, self.failure_events, self.distinct_actors
        )
    }
}

impl fmt::Display for EventStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.compact_summary())
    }
}
