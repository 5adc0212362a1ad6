//! Homogeneous groups of actors built from one template
//!
//! A group materialises its members once, at construction. Invoking it draws
//! one start per member inside the group window; each member then scatters
//! its own actions inside its own window, so members may run past the end of
//! the group window.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use std::collections::BTreeSet;
use std::ops::Add;
use tracing::{debug, instrument};

use crate::actor::Actor;
use crate::events::LoginAttempt;
use crate::simulation::options::Options;
use crate::simulation::producer::{Component, EventSource};
use crate::simulation::time_sampler::generate_times;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{ActorId, IdAllocator};

/// A collection of actor copies sharing one template
#[derive(Debug, Clone, Default)]
pub struct ActorGroup {
    members: Vec<Actor>,
    options: Options,
}

impl ActorGroup {
    /// Materialise `count` copies of `template`
    ///
    /// Copies share the template's actions and options by value. Each copy
    /// gets a fresh identity from `ids` unless the template carries an
    /// explicit identity, in which case every copy shares it.
    pub fn new(template: Actor, count: usize, ids: &mut IdAllocator) -> Self {
        let members = (0..count).map(|_| template.respawn(ids)).collect();
        Self { members, options: Options::new() }
    }

    /// Group holding exactly the given actors
    pub fn from_members(members: Vec<Actor>) -> Self {
        Self { members, options: Options::new() }
    }

    /// Set the window member start times are drawn from
    pub fn with_window(mut self, window: Duration) -> Self {
        self.options.window = Some(window);
        self
    }

    /// Add a label stamped on every member's events
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.labels.insert(key.into(), value.into());
        self
    }

    /// Replace the group's own options
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Members in construction order
    pub fn members(&self) -> &[Actor] {
        &self.members
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Distinct identities across members
    pub fn identities(&self) -> BTreeSet<ActorId> {
        self.members.iter().map(Actor::id).collect()
    }

    /// The group's own options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Union of two groups as a new group
    ///
    /// Members are concatenated without deduplication and keep their
    /// identities. The left operand's options win over the right's.
    pub fn union(&self, other: &ActorGroup) -> ActorGroup {
        let mut members = Vec::with_capacity(self.members.len() + other.members.len());
        members.extend(self.members.iter().cloned());
        members.extend(other.members.iter().cloned());
        ActorGroup { members, options: self.options.merged_over(&other.options) }
    }

    /// Combine with any composable value, accepting only groups
    pub fn compose(&self, component: impl Into<Component>) -> SimulationResult<ActorGroup> {
        match component.into() {
            Component::Group(other) => Ok(self.union(&other)),
            Component::Attack(attack) => Ok(self.union(attack.group())),
            other => Err(SimulationError::invalid_composition("ActorGroup", other.kind())),
        }
    }

    /// Invoke the group over an explicit window
    pub fn generate_within(
        &self,
        start: DateTime<Utc>,
        duration: Duration,
        rng: &mut dyn RngCore,
    ) -> Vec<LoginAttempt> {
        self.generate(start, &Options::with_window(duration), rng)
    }
}

impl EventSource for ActorGroup {
    #[instrument(skip_all, fields(members = self.members.len(), start = %start))]
    fn generate(&self, start: DateTime<Utc>, options: &Options, rng: &mut dyn RngCore) -> Vec<LoginAttempt> {
        let merged = self.options.merged_over(options);
        let window = merged.window.unwrap_or_else(Duration::zero);
        let member_options = merged.without_window();

        let starts = generate_times(start, window, self.members.len(), rng);
        let mut events = Vec::new();
        for (member, member_start) in self.members.iter().zip(starts) {
            events.extend(member.generate(member_start, &member_options, rng));
        }

        debug!(
            "Group of {} members produced {} events over a {}s window",
            self.members.len(),
            events.len(),
            window.num_seconds()
        );
        events
    }
}

impl Add for ActorGroup {
    type Output = ActorGroup;

    fn add(self, other: ActorGroup) -> ActorGroup {
        let mut members = self.members;
        members.extend(other.members);
        ActorGroup { members, options: self.options.merged_over(&other.options) }
    }
}

impl Add<&ActorGroup> for &ActorGroup {
    type Output = ActorGroup;

    fn add(self, other: &ActorGroup) -> ActorGroup {
        self.union(other)
    }
}
