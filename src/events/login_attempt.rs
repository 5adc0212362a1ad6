//! Login attempt event records
//!
//! This module contains the immutable event record produced by actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::simulation::options::Labels;
use crate::types::{ActorId, LoginStatus};

/// A single authentication event
///
/// Records are created by actions and never mutated afterwards. Equality and
/// ordering consider `(time, actor_id, status)` only; `labels` are annotations
/// propagated from the enclosing containers' options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginAttempt {
    /// Identity that attempted the login
    pub actor_id: ActorId,
    /// Outcome of the attempt
    pub status: LoginStatus,
    /// When the attempt happened
    pub time: DateTime<Utc>,
    /// Domain labels inherited from the enclosing containers
    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,
}

impl LoginAttempt {
    /// Create an unlabelled event record
    pub fn new(actor_id: ActorId, status: LoginStatus, time: DateTime<Utc>) -> Self {
        Self { actor_id, status, time, labels: Labels::new() }
    }

    /// Create a successful login record
    pub fn success(actor_id: ActorId, time: DateTime<Utc>) -> Self {
        Self::new(actor_id, LoginStatus::Success, time)
    }

    /// Create a failed login record
    pub fn failure(actor_id: ActorId, time: DateTime<Utc>) -> Self {
        Self::new(actor_id, LoginStatus::Failure, time)
    }

    /// Attach labels to the record at construction
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Whether this attempt succeeded
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    fn sort_key(&self) -> (DateTime<Utc>, ActorId, LoginStatus) {
        (self.time, self.actor_id, self.status)
    }
}

impl PartialEq for LoginAttempt {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for LoginAttempt {}

impl PartialOrd for LoginAttempt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LoginAttempt {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for LoginAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LoginAttempt({}, {}, {})",
            self.actor_id.value(),
            self.status.code(),
            self.time.format("%H:%M:%S")
        )
    }
}
