//! Login Event Simulator
//!
//! A synthetic authentication event generator built from a small composition
//! algebra. Actors replay login actions, groups of actors and attack patterns
//! draw member starts from their window, and simulations nest them all while
//! propagating identity, windows and labels down the tree.
//!
//! # Overview
//!
//! The generated events are meant for exercising detection logic: background
//! traffic, users who mistype their password, and machines hammering one
//! account can be mixed in a single reproducible run.
//!
//! ## Key Features
//!
//! - **Composition Algebra**: `Actor + Action`, `ActorGroup + ActorGroup`, `Simulation + producer`
//! - **Explicit Randomness**: every invocation draws from one caller-supplied RNG
//! - **Explicit Identity**: actor ids come from an [`IdAllocator`], never from globals
//! - **Option Propagation**: windows and labels flow from containers to children
//! - **Declarative Scenarios**: composition trees loaded from JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use auth_event_simulator::*;
//! use chrono::{TimeZone, Utc};
//!
//! let mut ids = IdAllocator::new();
//! let mut rng = seeded_rng(Some(42));
//! let start = Utc.with_ymd_and_hms(2023, 12, 20, 5, 10, 0).unwrap();
//!
//! let typo = Actor::new(&mut ids).with_duration_seconds(30) + Action::LoginFail + Action::Login;
//! let simulation = Simulation::from_seconds(start, 3600)
//!     + ActorGroup::new(typo, 10, &mut ids)
//!     + SingleMachineAttack::new(20, 1, &mut ids);
//!
//! let events = simulation.run(&mut rng);
//! assert_eq!(events.len(), 10 * 2 + 21);
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums, and configuration
//! - [`events`]: Login event records and output writers
//! - [`actor`]: Actions, actors, actor groups, and attack patterns
//! - [`simulation`]: Simulations, option propagation, scenarios, and statistics
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │   Events    │    │    Actor    │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ LoginAttempt│◄───┤ Action      │
//! │ Enums       │    │ Writer      │    │ Actor       │
//! │ Config      │    │             │    │ Group       │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                                      ▲
//!        │                                      │
//!        │           ┌─────────────┐            │
//!        └───────────┤ Simulation  ├────────────┘
//!                    │             │
//!                    │ Producers   │
//!                    │ Scenarios   │
//!                    │ Statistics  │
//!                    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod actor;
pub mod events;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    ActionTiming,
    // Identifiers
    ActorId,
    // Configuration
    CliArgs,
    ConfigError,
    ConfigValidationError,
    IdAllocator,
    // Enums
    LoginStatus,
    OutputFormat,
    SimulationConfig,
};

// Event records and output
pub use events::{EventWriter, LoginAttempt};

// Composition building blocks
pub use actor::{Action, ActionOutcome, Actor, ActorGroup, Identity, SingleMachineAttack};

// Simulation types and functionality
pub use simulation::{
    generate_times, seeded_rng, Component, ComponentSpec, EventSource, EventStatistics, Labels,
    LoggingConfig, Options, Producer, ScenarioSpec, Simulation, SimulationError, SimulationResult,
};
