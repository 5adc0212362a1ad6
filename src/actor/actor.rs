//! Actors: one identity replaying an ordered action sequence
//!
//! An actor is the mutable, builder-style leaf of the composition tree.
//! Appending an action with `+` or `+=` grows the actor in place; once the
//! template is complete it is frozen into an [`ActorGroup`] or added to a
//! [`Simulation`], which copy it by value.
//!
//! [`ActorGroup`]: crate::actor::ActorGroup
//! [`Simulation`]: crate::simulation::Simulation

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use std::ops::{Add, AddAssign};
use tracing::trace;

use crate::actor::Action;
use crate::events::LoginAttempt;
use crate::simulation::options::Options;
use crate::simulation::producer::{Component, EventSource};
use crate::simulation::time_sampler::generate_times;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::{ActionTiming, ActorId, IdAllocator};

/// How an actor obtained its identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Fresh identity handed out by an [`IdAllocator`]
    Allocated(ActorId),
    /// Identity supplied by the caller; copies of the actor share it
    Explicit(ActorId),
}

impl Identity {
    /// The identity value
    pub fn id(&self) -> ActorId {
        match self {
            Identity::Allocated(id) | Identity::Explicit(id) => *id,
        }
    }
}

/// A simulated identity with an ordered action sequence
#[derive(Debug, Clone)]
pub struct Actor {
    actions: Vec<Action>,
    identity: Identity,
    timing: ActionTiming,
    options: Options,
}

impl Actor {
    /// Create an empty actor with a fresh identity
    pub fn new(ids: &mut IdAllocator) -> Self {
        Self::with_identity(Identity::Allocated(ids.next_id()))
    }

    /// Create an empty actor with an explicit, shareable identity
    pub fn with_id(id: ActorId) -> Self {
        Self::with_identity(Identity::Explicit(id))
    }

    fn with_identity(identity: Identity) -> Self {
        Self { actions: Vec::new(), identity, timing: ActionTiming::default(), options: Options::new() }
    }

    /// Set the window the actor's actions are scattered over
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.options.window = Some(duration);
        self
    }

    /// Set the window in whole seconds
    pub fn with_duration_seconds(self, seconds: i64) -> Self {
        self.with_duration(Duration::seconds(seconds))
    }

    /// Select how actions are placed in time
    pub fn with_timing(mut self, timing: ActionTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Add a label stamped on every event this actor produces
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.labels.insert(key.into(), value.into());
        self
    }

    /// Replace the actor's own options
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Append an action in place
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Append any composable value, rejecting everything but actions
    pub fn try_push(&mut self, component: impl Into<Component>) -> SimulationResult<()> {
        match component.into() {
            Component::Action(action) => {
                self.actions.push(action);
                Ok(())
            }
            other => Err(SimulationError::invalid_composition("Actor", other.kind())),
        }
    }

    /// Fluent form of [`Actor::try_push`]
    pub fn compose(mut self, component: impl Into<Component>) -> SimulationResult<Self> {
        self.try_push(component)?;
        Ok(self)
    }

    /// Copy of this actor for a group member
    ///
    /// Explicit identities are shared by every copy; allocated ones are not,
    /// so each copy receives a fresh identity from `ids`.
    pub fn respawn(&self, ids: &mut IdAllocator) -> Self {
        let identity = match self.identity {
            Identity::Explicit(id) => Identity::Explicit(id),
            Identity::Allocated(_) => Identity::Allocated(ids.next_id()),
        };
        Self { identity, ..self.clone() }
    }

    /// Identity of this actor
    pub fn id(&self) -> ActorId {
        self.identity.id()
    }

    /// How the identity was obtained
    pub fn identity(&self) -> Identity {
        self.identity
    }

    /// Whether the identity was supplied by the caller
    pub fn has_explicit_id(&self) -> bool {
        matches!(self.identity, Identity::Explicit(_))
    }

    /// Ordered action sequence
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Window over which actions are scattered (zero by default)
    pub fn duration(&self) -> Duration {
        self.options.window.unwrap_or_else(Duration::zero)
    }

    /// Timing variant
    pub fn timing(&self) -> ActionTiming {
        self.timing
    }

    /// The actor's own options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Number of actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the action sequence is empty
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn generate_scattered(
        &self,
        start: DateTime<Utc>,
        options: &Options,
        rng: &mut dyn RngCore,
    ) -> Vec<LoginAttempt> {
        let mut instants = generate_times(start, self.duration(), self.actions.len(), rng);
        instants.sort();

        let mut events = Vec::new();
        for (action, at) in self.actions.iter().zip(instants) {
            events.extend(action.perform(at, self.id(), options, rng).events);
        }
        events
    }

    fn generate_sequential(
        &self,
        start: DateTime<Utc>,
        options: &Options,
        rng: &mut dyn RngCore,
    ) -> Vec<LoginAttempt> {
        let mut clock = start;
        let mut events = Vec::new();
        for action in &self.actions {
            let outcome = action.perform(clock, self.id(), options, rng);
            clock = outcome.next_instant;
            events.extend(outcome.events);
        }
        events
    }
}

impl EventSource for Actor {
    /// Replay the action sequence starting at `start`
    ///
    /// The caller's window is ignored: an actor always uses its own duration.
    fn generate(&self, start: DateTime<Utc>, options: &Options, rng: &mut dyn RngCore) -> Vec<LoginAttempt> {
        let merged = self.options.merged_over(&options.without_window());

        let events = match self.timing {
            ActionTiming::Scatter => self.generate_scattered(start, &merged, rng),
            ActionTiming::Sequential => self.generate_sequential(start, &merged, rng),
        };

        trace!(actor = %self.id(), event_count = events.len(), "actor replayed");
        events
    }
}

impl Add<Action> for Actor {
    type Output = Actor;

    fn add(mut self, action: Action) -> Actor {
        self.actions.push(action);
        self
    }
}

impl AddAssign<Action> for Actor {
    fn add_assign(&mut self, action: Action) {
        self.actions.push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorGroup;
    use crate::simulation::time_sampler::seeded_rng;
    use crate::types::LoginStatus;
    use chrono::TimeZone;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 12, 20, 5, 10, 0).unwrap()
    }

    #[test]
    fn test_zero_duration_fires_at_start() {
        let mut ids = IdAllocator::new();
        let mut rng = seeded_rng(Some(1));
        let actor = Actor::new(&mut ids) + Action::LoginFail + Action::Login;

        let events = actor.generate(base_time(), &Options::new(), &mut rng);
        let statuses: Vec<u16> = events.iter().map(|e| e.status.code()).collect();
        assert_eq!(statuses, vec![401, 200]);
        assert!(events.iter().all(|e| e.time == base_time()));
        assert_eq!(events[0].actor_id, events[1].actor_id);
    }

    #[test]
    fn test_scatter_keeps_action_order_and_window() {
        let mut ids = IdAllocator::new();
        let mut rng = seeded_rng(Some(5));
        let actor = Actor::new(&mut ids).with_duration_seconds(30)
            + Action::LoginFail
            + Action::LoginFail
            + Action::Login;

        for _ in 0..50 {
            let events = actor.generate(base_time(), &Options::new(), &mut rng);
            assert_eq!(events.len(), 3);
            assert_eq!(events[2].status, LoginStatus::Success);
            assert!(events.windows(2).all(|pair| pair[0].time <= pair[1].time));
            assert!(events
                .iter()
                .all(|e| e.time >= base_time() && e.time <= base_time() + Duration::seconds(30)));
        }
    }

    #[test]
    fn test_sequential_pause_chains_clock() {
        let mut ids = IdAllocator::new();
        let mut rng = seeded_rng(Some(1));
        let actor = (Actor::new(&mut ids) + Action::LoginFail + Action::pause_seconds(5) + Action::Login)
            .with_timing(ActionTiming::Sequential);

        let events = actor.generate(base_time(), &Options::new(), &mut rng);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].time, base_time());
        assert_eq!(events[1].time, base_time() + Duration::seconds(5));
    }

    #[test]
    fn test_scatter_pause_produces_nothing() {
        let mut ids = IdAllocator::new();
        let mut rng = seeded_rng(Some(1));
        let actor = Actor::new(&mut ids) + Action::LoginFail + Action::pause_seconds(5) + Action::Login;

        let events = actor.generate(base_time(), &Options::new(), &mut rng);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.time == base_time()));
    }

    #[test]
    fn test_empty_actor_yields_nothing() {
        let mut ids = IdAllocator::new();
        let mut rng = seeded_rng(Some(1));
        let actor = Actor::new(&mut ids).with_duration_seconds(60);
        assert!(actor.is_empty());
        assert!(actor.generate(base_time(), &Options::new(), &mut rng).is_empty());
    }

    #[test]
    fn test_add_assign_grows_in_place() {
        let mut ids = IdAllocator::new();
        let mut actor = Actor::new(&mut ids);
        actor += Action::Login;
        actor += Action::Login;
        assert_eq!(actor.len(), 2);
    }

    #[test]
    fn test_compose_rejects_non_action() {
        let mut ids = IdAllocator::new();
        let other = Actor::new(&mut ids) + Action::Login;
        let group = ActorGroup::new(other.clone(), 2, &mut ids);

        let err = Actor::new(&mut ids).compose(other).unwrap_err();
        assert!(err.is_invalid_composition());

        let err = Actor::new(&mut ids).compose(group).unwrap_err();
        assert!(err.is_invalid_composition());

        let ok = Actor::new(&mut ids).compose(Action::LoginFail).unwrap();
        assert_eq!(ok.actions(), &[Action::LoginFail]);
    }

    #[test]
    fn test_actor_labels_win_over_caller() {
        let mut ids = IdAllocator::new();
        let mut rng = seeded_rng(Some(1));
        let actor = Actor::new(&mut ids).with_label("role", "attacker") + Action::LoginFail;
        let caller = Options::new().label("role", "user").label("env", "lab");

        let events = actor.generate(base_time(), &caller, &mut rng);
        assert_eq!(events[0].labels["role"], "attacker");
        assert_eq!(events[0].labels["env"], "lab");
    }

    #[test]
    fn test_caller_window_is_ignored() {
        let mut ids = IdAllocator::new();
        let mut rng = seeded_rng(Some(2));
        let actor = Actor::new(&mut ids) + Action::Login;

        let events = actor.generate(base_time(), &Options::with_window(Duration::hours(1)), &mut rng);
        assert_eq!(events[0].time, base_time());
    }

    #[test]
    fn test_respawn_identity_rules() {
        let mut ids = IdAllocator::new();
        let allocated = Actor::new(&mut ids) + Action::Login;
        let explicit = Actor::with_id(ActorId(77)) + Action::Login;

        assert_ne!(allocated.respawn(&mut ids).id(), allocated.id());
        assert_eq!(explicit.respawn(&mut ids).id(), ActorId(77));
        assert!(explicit.respawn(&mut ids).has_explicit_id());
    }
}
