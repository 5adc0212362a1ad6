//! Core types and identifiers for the event simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: integer actor identities and their explicit allocator
//! - **Enums**: login outcomes, action timing variants, output formats
//! - **Configuration**: CLI arguments, configuration files and validation
//!
//! # Usage Example
//!
//! ```rust
//! use auth_event_simulator::types::*;
//!
//! let mut ids = IdAllocator::new();
//! let first = ids.next_id();
//! assert_ne!(first, ids.next_id());
//!
//! assert_eq!(LoginStatus::Failure.code(), 401);
//!
//! let config = SimulationConfig {
//!     background_users: 25,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
