//! Named attack patterns built from actor groups

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

use crate::actor::{Action, Actor, ActorGroup};
use crate::events::LoginAttempt;
use crate::simulation::options::Options;
use crate::simulation::producer::EventSource;
use crate::types::{ActorId, IdAllocator};

/// One machine hammering a login endpoint
///
/// `fail_count` single-attempt failures plus `success_count` single-attempt
/// successes, all under one identity and each with a zero-length actor
/// window, so every attempt lands exactly on its own sampled start.
#[derive(Debug, Clone)]
pub struct SingleMachineAttack {
    machine_id: ActorId,
    fail_count: usize,
    success_count: usize,
    group: ActorGroup,
}

impl SingleMachineAttack {
    /// Build the pattern with a freshly allocated machine identity
    pub fn new(fail_count: usize, success_count: usize, ids: &mut IdAllocator) -> Self {
        let machine_id = ids.next_id();
        Self::for_machine(machine_id, fail_count, success_count, ids)
    }

    /// Build the pattern for a known machine identity
    pub fn for_machine(
        machine_id: ActorId,
        fail_count: usize,
        success_count: usize,
        ids: &mut IdAllocator,
    ) -> Self {
        let failures = ActorGroup::new(Actor::with_id(machine_id) + Action::LoginFail, fail_count, ids);
        let successes = ActorGroup::new(Actor::with_id(machine_id) + Action::Login, success_count, ids);

        Self { machine_id, fail_count, success_count, group: failures + successes }
    }

    /// Set the window attempts are spread over
    pub fn with_window(mut self, window: Duration) -> Self {
        self.group = self.group.with_window(window);
        self
    }

    /// Add a label stamped on every attempt
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.group = self.group.with_label(key, value);
        self
    }

    /// Identity shared by every attempt
    pub fn machine_id(&self) -> ActorId {
        self.machine_id
    }

    /// Number of failed attempts per invocation
    pub fn fail_count(&self) -> usize {
        self.fail_count
    }

    /// Number of successful attempts per invocation
    pub fn success_count(&self) -> usize {
        self.success_count
    }

    /// The combined group the pattern delegates to
    pub fn group(&self) -> &ActorGroup {
        &self.group
    }

    /// Invoke the pattern over an explicit window
    pub fn generate_within(
        &self,
        start: DateTime<Utc>,
        duration: Duration,
        rng: &mut dyn RngCore,
    ) -> Vec<LoginAttempt> {
        self.group.generate_within(start, duration, rng)
    }
}

impl EventSource for SingleMachineAttack {
    fn generate(&self, start: DateTime<Utc>, options: &Options, rng: &mut dyn RngCore) -> Vec<LoginAttempt> {
        self.group.generate(start, options, rng)
    }
}
