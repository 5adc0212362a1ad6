//! The invocation contract shared by every producer
//!
//! Anything that can sit in a simulation implements [`EventSource`]. The
//! [`Producer`] enum is the closed set of such values a simulation owns, and
//! [`Component`] widens it with bare actions so dynamically built trees can
//! reject misplaced operands with [`SimulationError::InvalidComposition`].

use chrono::{DateTime, Utc};
use rand::RngCore;

use crate::actor::{Action, Actor, ActorGroup, SingleMachineAttack};
use crate::events::LoginAttempt;
use crate::simulation::options::Options;
use crate::simulation::{Simulation, SimulationError};

/// Produces login events when invoked at a start instant
///
/// Invocation never mutates the producer; all randomness comes from `rng`,
/// so one seeded source reproduces a whole nested invocation.
pub trait EventSource {
    /// Generate events for a window starting at `start`
    fn generate(&self, start: DateTime<Utc>, options: &Options, rng: &mut dyn RngCore) -> Vec<LoginAttempt>;
}

/// A child a simulation can own
#[derive(Debug, Clone)]
pub enum Producer {
    /// A single actor
    Actor(Actor),
    /// A group of actors
    Group(ActorGroup),
    /// A single-machine attack pattern
    Attack(SingleMachineAttack),
    /// A nested simulation
    Simulation(Simulation),
}

impl Producer {
    /// Human readable kind, used in errors and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Producer::Actor(_) => "Actor",
            Producer::Group(_) => "ActorGroup",
            Producer::Attack(_) => "SingleMachineAttack",
            Producer::Simulation(_) => "Simulation",
        }
    }
}

impl EventSource for Producer {
    fn generate(&self, start: DateTime<Utc>, options: &Options, rng: &mut dyn RngCore) -> Vec<LoginAttempt> {
        match self {
            Producer::Actor(actor) => actor.generate(start, options, rng),
            Producer::Group(group) => group.generate(start, options, rng),
            Producer::Attack(attack) => attack.generate(start, options, rng),
            Producer::Simulation(simulation) => simulation.generate(start, options, rng),
        }
    }
}

impl From<Actor> for Producer {
    fn from(actor: Actor) -> Self {
        Producer::Actor(actor)
    }
}

impl From<ActorGroup> for Producer {
    fn from(group: ActorGroup) -> Self {
        Producer::Group(group)
    }
}

impl From<SingleMachineAttack> for Producer {
    fn from(attack: SingleMachineAttack) -> Self {
        Producer::Attack(attack)
    }
}

impl From<Simulation> for Producer {
    fn from(simulation: Simulation) -> Self {
        Producer::Simulation(simulation)
    }
}

/// Any value that can appear on either side of a composition
#[derive(Debug, Clone)]
pub enum Component {
    /// An action, valid only inside an actor
    Action(Action),
    /// An actor
    Actor(Actor),
    /// A group of actors
    Group(ActorGroup),
    /// A single-machine attack pattern
    Attack(SingleMachineAttack),
    /// A simulation
    Simulation(Simulation),
}

impl Component {
    /// Human readable kind, used in errors and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Component::Action(_) => "Action",
            Component::Actor(_) => "Actor",
            Component::Group(_) => "ActorGroup",
            Component::Attack(_) => "SingleMachineAttack",
            Component::Simulation(_) => "Simulation",
        }
    }
}

impl From<Action> for Component {
    fn from(action: Action) -> Self {
        Component::Action(action)
    }
}

impl From<Actor> for Component {
    fn from(actor: Actor) -> Self {
        Component::Actor(actor)
    }
}

impl From<ActorGroup> for Component {
    fn from(group: ActorGroup) -> Self {
        Component::Group(group)
    }
}

impl From<SingleMachineAttack> for Component {
    fn from(attack: SingleMachineAttack) -> Self {
        Component::Attack(attack)
    }
}

impl From<Simulation> for Component {
    fn from(simulation: Simulation) -> Self {
        Component::Simulation(simulation)
    }
}

impl From<Producer> for Component {
    fn from(producer: Producer) -> Self {
        match producer {
            Producer::Actor(actor) => Component::Actor(actor),
            Producer::Group(group) => Component::Group(group),
            Producer::Attack(attack) => Component::Attack(attack),
            Producer::Simulation(simulation) => Component::Simulation(simulation),
        }
    }
}

impl TryFrom<Component> for Producer {
    type Error = SimulationError;

    fn try_from(component: Component) -> Result<Self, Self::Error> {
        match component {
            Component::Action(_) => Err(SimulationError::invalid_composition("Simulation", "Action")),
            Component::Actor(actor) => Ok(Producer::Actor(actor)),
            Component::Group(group) => Ok(Producer::Group(group)),
            Component::Attack(attack) => Ok(Producer::Attack(attack)),
            Component::Simulation(simulation) => Ok(Producer::Simulation(simulation)),
        }
    }
}
