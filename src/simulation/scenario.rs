//! Declarative scenario trees
//!
//! A scenario file describes a composition tree in JSON. Building it goes
//! through the same dynamic composition checks as hand-built trees, so an
//! action placed directly under a simulation, or a group placed inside an
//! actor, fails with an invalid composition error.
//!
//! ```json
//! {
//!   "children": [
//!     { "type": "group", "count": 50,
//!       "template": { "type": "actor", "duration_seconds": 30,
//!                     "actions": [ { "type": "login" } ] } },
//!     { "type": "single_machine_attack", "fail_count": 20, "success_count": 1 }
//!   ]
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::actor::{Action, Actor, ActorGroup, SingleMachineAttack};
use crate::simulation::options::{Labels, Options};
use crate::simulation::producer::Component;
use crate::simulation::time_sampler::checked_seconds;
use crate::simulation::{Simulation, SimulationError, SimulationResult};
use crate::types::{ActionTiming, ActorId, IdAllocator};

/// One node of a scenario tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentSpec {
    /// Successful login
    Login,
    /// Failed login
    LoginFail,
    /// Fixed pause
    Pause {
        /// Pause length in seconds
        seconds: i64,
    },
    /// Random pause
    PauseBetween {
        /// Shortest pause in seconds
        lower_seconds: i64,
        /// Longest pause in seconds
        upper_seconds: i64,
    },
    /// An actor and its action sequence
    Actor {
        /// Explicit identity shared by every copy of this actor
        #[serde(default)]
        id: Option<u64>,
        /// Window the actions are spread over
        #[serde(default)]
        duration_seconds: Option<i64>,
        /// How actions are placed in time
        #[serde(default)]
        timing: ActionTiming,
        /// Labels stamped on this actor's events
        #[serde(default)]
        labels: Labels,
        /// Ordered action sequence
        #[serde(default)]
        actions: Vec<ComponentSpec>,
    },
    /// Copies of a template actor
    Group {
        /// Template, which must be an actor
        template: Box<ComponentSpec>,
        /// Number of copies
        count: usize,
        /// Window member starts are drawn from
        #[serde(default)]
        window_seconds: Option<i64>,
        /// Labels stamped on every member's events
        #[serde(default)]
        labels: Labels,
    },
    /// Failures then successes from one machine
    SingleMachineAttack {
        /// Failed attempts
        fail_count: usize,
        /// Successful attempts
        success_count: usize,
        /// Explicit machine identity
        #[serde(default)]
        machine_id: Option<u64>,
        /// Window the attempts are spread over
        #[serde(default)]
        window_seconds: Option<i64>,
        /// Labels stamped on every attempt
        #[serde(default)]
        labels: Labels,
    },
    /// A nested simulation
    Simulation {
        /// Window child starts are drawn from
        duration_seconds: i64,
        /// Labels handed to every child
        #[serde(default)]
        labels: Labels,
        /// Children in order
        #[serde(default)]
        children: Vec<ComponentSpec>,
    },
}

impl ComponentSpec {
    /// Materialise this node, allocating identities from `ids`
    ///
    /// `anchor` is the stored start of nested simulations; they are
    /// re-anchored by their parent when invoked.
    pub fn build(&self, anchor: DateTime<Utc>, ids: &mut IdAllocator) -> SimulationResult<Component> {
        let component = match self {
            ComponentSpec::Login => Component::Action(Action::Login),
            ComponentSpec::LoginFail => Component::Action(Action::LoginFail),
            ComponentSpec::Pause { seconds } => {
                Component::Action(Action::Pause(checked_seconds("seconds", *seconds)?))
            }
            ComponentSpec::PauseBetween { lower_seconds, upper_seconds } => Component::Action(Action::PauseBetween {
                lower: checked_seconds("lower_seconds", *lower_seconds)?,
                upper: checked_seconds("upper_seconds", *upper_seconds)?,
            }),
            ComponentSpec::Actor { id, duration_seconds, timing, labels, actions } => {
                let actor = match id {
                    Some(id) => Actor::with_id(ActorId(*id)),
                    None => Actor::new(ids),
                };
                let mut actor = actor
                    .with_timing(*timing)
                    .with_options(Options::new().labels(labels.clone()))
                    .with_duration(checked_seconds("duration_seconds", duration_seconds.unwrap_or(0))?);
                for action in actions {
                    actor.try_push(action.build(anchor, ids)?)?;
                }
                Component::Actor(actor)
            }
            ComponentSpec::Group { template, count, window_seconds, labels } => {
                let template = match template.build(anchor, ids)? {
                    Component::Actor(actor) => actor,
                    other => return Err(SimulationError::invalid_composition("ActorGroup", other.kind())),
                };
                let mut group = ActorGroup::new(template, *count, ids)
                    .with_options(Options::new().labels(labels.clone()));
                if let Some(seconds) = window_seconds {
                    group = group.with_window(checked_seconds("window_seconds", *seconds)?);
                }
                Component::Group(group)
            }
            ComponentSpec::SingleMachineAttack {
                fail_count,
                success_count,
                machine_id,
                window_seconds,
                labels,
            } => {
                let mut attack = match machine_id {
                    Some(id) => SingleMachineAttack::for_machine(ActorId(*id), *fail_count, *success_count, ids),
                    None => SingleMachineAttack::new(*fail_count, *success_count, ids),
                };
                if let Some(seconds) = window_seconds {
                    attack = attack.with_window(checked_seconds("window_seconds", *seconds)?);
                }
                for (key, value) in labels {
                    attack = attack.with_label(key.clone(), value.clone());
                }
                Component::Attack(attack)
            }
            ComponentSpec::Simulation { duration_seconds, labels, children } => {
                let mut simulation = Simulation::new(anchor, checked_seconds("duration_seconds", *duration_seconds)?)
                    .with_options(Options::new().labels(labels.clone()));
                for child in children {
                    simulation.push(child.build(anchor, ids)?)?;
                }
                Component::Simulation(simulation)
            }
        };

        debug!("Built {} from scenario", component.kind());
        Ok(component)
    }
}

/// A scenario file: the children of the root simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Children of the root simulation, in order
    #[serde(default)]
    pub children: Vec<ComponentSpec>,
}

impl ScenarioSpec {
    /// Load a scenario from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> SimulationResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse a scenario from JSON text
    pub fn from_json(content: &str) -> SimulationResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Append every child onto `root`
    #[instrument(skip_all, fields(children = self.children.len()))]
    pub fn populate(&self, root: &mut Simulation, ids: &mut IdAllocator) -> SimulationResult<()> {
        for child in &self.children {
            root.push(child.build(root.start(), ids)?)?;
        }
        info!("Scenario populated root simulation with {} children", root.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::producer::Producer;
    use chrono::{Duration, TimeZone};

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 12, 20, 5, 10, 0).unwrap()
    }

    #[test]
    fn test_parse_and_build_tree() {
        let json = r#"{
            "children": [
                { "type": "group", "count": 3, "window_seconds": 30,
                  "template": { "type": "actor", "duration_seconds": 5,
                                "actions": [ { "type": "login_fail" }, { "type": "login" } ] } },
                { "type": "single_machine_attack", "fail_count": 4, "success_count": 1 },
                { "type": "simulation", "duration_seconds": 10,
                  "children": [ { "type": "actor", "actions": [ { "type": "login" } ] } ] }
            ]
        }"#;

        let scenario = ScenarioSpec::from_json(json).unwrap();
        let mut ids = IdAllocator::new();
        let mut root = Simulation::from_seconds(anchor(), 60);
        scenario.populate(&mut root, &mut ids).unwrap();

        assert_eq!(root.len(), 3);
        match &root.children()[0] {
            Producer::Group(group) => {
                assert_eq!(group.len(), 3);
                assert_eq!(group.members()[0].actions(), &[Action::LoginFail, Action::Login]);
                assert_eq!(group.options().window, Some(Duration::seconds(30)));
            }
            other => panic!("expected group, got {}", other.kind()),
        }
        assert_eq!(root.children()[1].kind(), "SingleMachineAttack");
        assert_eq!(root.children()[2].kind(), "Simulation");
    }

    #[test]
    fn test_action_under_simulation_is_rejected() {
        let scenario = ScenarioSpec::from_json(r#"{ "children": [ { "type": "login" } ] }"#).unwrap();
        let mut ids = IdAllocator::new();
        let mut root = Simulation::from_seconds(anchor(), 60);

        let err = scenario.populate(&mut root, &mut ids).unwrap_err();
        assert!(err.is_invalid_composition());
    }

    #[test]
    fn test_group_inside_actor_is_rejected() {
        let json = r#"{ "type": "actor", "actions": [
            { "type": "group", "count": 2, "template": { "type": "actor" } } ] }"#;
        let scenario: ComponentSpec = serde_json::from_str(json).unwrap();
        let mut ids = IdAllocator::new();

        let err = scenario.build(anchor(), &mut ids).unwrap_err();
        assert!(err.is_invalid_composition());
    }

    #[test]
    fn test_group_template_must_be_actor() {
        let json = r#"{ "type": "group", "count": 2, "template": { "type": "login" } }"#;
        let scenario: ComponentSpec = serde_json::from_str(json).unwrap();
        let mut ids = IdAllocator::new();

        let err = scenario.build(anchor(), &mut ids).unwrap_err();
        assert_eq!(err.to_string(), "Invalid composition: cannot add Action to ActorGroup");
    }

    #[test]
    fn test_explicit_ids_are_kept() {
        let json = r#"{ "type": "group", "count": 3,
            "template": { "type": "actor", "id": 4242, "actions": [ { "type": "login_fail" } ] } }"#;
        let scenario: ComponentSpec = serde_json::from_str(json).unwrap();
        let mut ids = IdAllocator::new();

        match scenario.build(anchor(), &mut ids).unwrap() {
            Component::Group(group) => {
                assert_eq!(group.identities().into_iter().collect::<Vec<_>>(), vec![ActorId(4242)]);
            }
            other => panic!("expected group, got {}", other.kind()),
        }
    }

    #[test]
    fn test_oversized_seconds_are_configuration_errors() {
        let nodes = [
            r#"{ "type": "pause", "seconds": 9223372036854775807 }"#,
            r#"{ "type": "pause_between", "lower_seconds": 0, "upper_seconds": 9223372036854775807 }"#,
            r#"{ "type": "actor", "duration_seconds": 9223372036854775807 }"#,
            r#"{ "type": "group", "count": 1, "window_seconds": 9223372036854775807, "template": { "type": "actor" } }"#,
            r#"{ "type": "single_machine_attack", "fail_count": 1, "success_count": 0, "window_seconds": 9223372036854775807 }"#,
            r#"{ "type": "simulation", "duration_seconds": 9223372036854775807 }"#,
        ];

        for json in nodes {
            let node: ComponentSpec = serde_json::from_str(json).unwrap();
            let mut ids = IdAllocator::new();
            let err = node.build(anchor(), &mut ids).unwrap_err();
            assert_eq!(err.category(), "Configuration", "{}", json);
        }
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = ScenarioSpec::from_json("{ not json").unwrap_err();
        assert_eq!(err.category(), "Serialization");
    }
}
