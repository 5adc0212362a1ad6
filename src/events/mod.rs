//! Login events and their serialized output
//!
//! # Overview
//!
//! - **LoginAttempt**: One login record with identity, status, time and labels
//! - **EventWriter**: Writes event lists as JSON lines or CSV
//!
//! # Usage Example
//!
//! ```rust
//! use auth_event_simulator::events::*;
//! use auth_event_simulator::types::{ActorId, OutputFormat};
//! use chrono::{TimeZone, Utc};
//!
//! let time = Utc.with_ymd_and_hms(2023, 12, 20, 5, 10, 0).unwrap();
//! let event = LoginAttempt::failure(ActorId(3), time);
//!
//! let mut out = Vec::new();
//! EventWriter::new(OutputFormat::Json).write_all(&[event], &mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap().trim_end(),
//!     r#"{"actor_id":3,"status":401,"time":"2023-12-20T05:10:00Z"}"#
//! );
//! ```

pub mod login_attempt;
pub mod writer;

// Re-export all public types for convenience
pub use login_attempt::*;
pub use writer::*;
