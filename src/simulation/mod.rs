//! Simulation composition and control
//!
//! This module contains the root container of the composition tree, the
//! invocation contract every producer implements, option propagation, time
//! sampling, declarative scenarios, run statistics, and error handling.
//!
//! # Overview
//!
//! - **Simulation**: Owns producers and invokes each at a start drawn from its window
//! - **EventSource**: The `generate(start, options, rng)` contract shared by producers
//! - **Options**: Window and labels handed from parent to child
//! - **ScenarioSpec**: JSON description of a composition tree
//! - **EventStatistics**: Summary of a run's output
//! - **SimulationError**: Error handling for composition, configuration and output
//!
//! # Usage Example
//!
//! ```rust
//! use auth_event_simulator::actor::{Action, Actor, ActorGroup};
//! use auth_event_simulator::simulation::*;
//! use auth_event_simulator::types::IdAllocator;
//! use chrono::{TimeZone, Utc};
//!
//! let mut ids = IdAllocator::new();
//! let mut rng = seeded_rng(Some(7));
//! let start = Utc.with_ymd_and_hms(2023, 12, 20, 5, 10, 0).unwrap();
//!
//! let users = ActorGroup::new(Actor::new(&mut ids) + Action::Login, 20, &mut ids);
//! let simulation = Simulation::from_seconds(start, 600) + users;
//!
//! let events = simulation.run(&mut rng);
//! assert_eq!(events.len(), 20);
//! ```

pub mod error;
pub mod logging;
pub mod options;
pub mod producer;
pub mod scenario;
#[allow(clippy::module_inception)]
pub mod simulation;
pub mod statistics;
pub mod time_sampler;

// Re-export all public types for convenience
pub use error::*;
pub use logging::*;
pub use options::*;
pub use producer::*;
pub use scenario::*;
pub use simulation::*;
pub use statistics::*;
pub use time_sampler::*;
