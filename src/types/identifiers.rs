//! Actor identifiers for the event simulator
//!
//! This module contains the integer-based actor identity and the explicit
//! allocator that hands out fresh identities during construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a simulated actor (a user or a machine)
///
/// Serialized as a bare integer so event records stay `{actor_id, status, time}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u64);

impl ActorId {
    /// Wrap a raw identity value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw identity value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ACTOR_{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Monotonic allocator for actor identities
///
/// Identities handed out by one allocator are never reused. Callers that want
/// several actors to share one identity pass an explicit [`ActorId`] instead.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Create an allocator starting at identity 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator whose first identity is `first`
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Allocate the next fresh identity
    pub fn next_id(&mut self) -> ActorId {
        let id = ActorId(self.next);
        self.next += 1;
        id
    }

    /// Identity the next call to [`IdAllocator::next_id`] will return
    pub fn peek(&self) -> ActorId {
        ActorId(self.next)
    }
}
