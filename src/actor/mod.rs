//! Actors, actions and actor groups
//!
//! This module contains the leaf producers of the composition tree.
//!
//! # Overview
//!
//! - **Action**: stateless step producing zero or more login events
//! - **Actor**: one identity replaying an ordered action sequence
//! - **ActorGroup**: many copies of a template actor with distinct identities
//! - **SingleMachineAttack**: failures then successes from one machine identity
//!
//! # Usage Example
//!
//! ```rust
//! use auth_event_simulator::actor::*;
//! use auth_event_simulator::simulation::{seeded_rng, EventSource};
//! use auth_event_simulator::types::IdAllocator;
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let mut ids = IdAllocator::new();
//! let mut rng = seeded_rng(Some(7));
//! let start = Utc.with_ymd_and_hms(2023, 12, 20, 5, 10, 0).unwrap();
//!
//! // A user who mistypes their password once
//! let template = Actor::new(&mut ids).with_duration_seconds(10) + Action::LoginFail + Action::Login;
//! let users = ActorGroup::new(template, 5, &mut ids);
//!
//! let events = users.generate_within(start, Duration::seconds(60), &mut rng);
//! assert_eq!(events.len(), 10);
//! ```

pub mod action;
pub mod actor;
pub mod group;
pub mod pattern;

// Re-export all public types for convenience
pub use action::*;
pub use actor::*;
pub use group::*;
pub use pattern::*;
