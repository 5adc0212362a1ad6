//! Atomic actions performed by actors
//!
//! An action receives an instant, an identity and the merged options, and
//! returns the events it produced together with the instant the next action
//! may start at.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use std::fmt;

use crate::events::LoginAttempt;
use crate::simulation::options::Options;
use crate::simulation::time_sampler::sample_duration_between;
use crate::types::ActorId;

/// Events produced by one action plus the instant after it
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    /// Events produced, in order
    pub events: Vec<LoginAttempt>,
    /// Instant at which a chained follow-up action would fire
    pub next_instant: DateTime<Utc>,
}

/// A single stateless step in an actor's sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// One successful login at the given instant
    Login,
    /// One failed login at the given instant
    LoginFail,
    /// Advance the clock by a fixed amount without producing events
    Pause(Duration),
    /// Advance the clock by an amount drawn once per invocation from
    /// `[lower, upper]` without producing events
    PauseBetween {
        /// Shortest pause
        lower: Duration,
        /// Longest pause
        upper: Duration,
    },
}

impl Action {
    /// Fixed pause of `seconds`
    pub fn pause_seconds(seconds: i64) -> Self {
        Action::Pause(Duration::seconds(seconds))
    }

    /// Random pause between `lower` and `upper` seconds
    pub fn pause_between_seconds(lower: i64, upper: i64) -> Self {
        Action::PauseBetween { lower: Duration::seconds(lower), upper: Duration::seconds(upper) }
    }

    /// Perform the action for `actor_id` at instant `at`
    pub fn perform(
        &self,
        at: DateTime<Utc>,
        actor_id: ActorId,
        options: &Options,
        rng: &mut dyn RngCore,
    ) -> ActionOutcome {
        match self {
            Action::Login => ActionOutcome {
                events: vec![LoginAttempt::success(actor_id, at).with_labels(options.labels.clone())],
                next_instant: at,
            },
            Action::LoginFail => ActionOutcome {
                events: vec![LoginAttempt::failure(actor_id, at).with_labels(options.labels.clone())],
                next_instant: at,
            },
            Action::Pause(duration) => {
                ActionOutcome { events: Vec::new(), next_instant: at + (*duration).max(Duration::zero()) }
            }
            Action::PauseBetween { lower, upper } => ActionOutcome {
                events: Vec::new(),
                next_instant: at + sample_duration_between(*lower, *upper, rng),
            },
        }
    }

    /// Whether this action can produce events
    pub fn produces_events(&self) -> bool {
        matches!(self, Action::Login | Action::LoginFail)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Login => write!(f, "Login"),
            Action::LoginFail => write!(f, "LoginFail"),
            Action::Pause(d) => write!(f, "Pause({}s)", d.num_seconds()),
            Action::PauseBetween { lower, upper } => {
                write!(f, "PauseBetween({}s, {}s)", lower.num_seconds(), upper.num_seconds())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::time_sampler::seeded_rng;
    use crate::types::LoginStatus;
    use chrono::TimeZone;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 12, 20, 5, 10, 0).unwrap()
    }

    #[test]
    fn test_login_does_not_advance_clock() {
        let mut rng = seeded_rng(Some(1));
        let outcome = Action::Login.perform(base_time(), ActorId(5), &Options::new(), &mut rng);

        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].status, LoginStatus::Success);
        assert_eq!(outcome.events[0].actor_id, ActorId(5));
        assert_eq!(outcome.events[0].time, base_time());
        assert_eq!(outcome.next_instant, base_time());
    }

    #[test]
    fn test_login_fail_stamps_labels() {
        let mut rng = seeded_rng(Some(1));
        let options = Options::new().label("technique", "password_spray");
        let outcome = Action::LoginFail.perform(base_time(), ActorId(1), &options, &mut rng);

        assert_eq!(outcome.events[0].status.code(), 401);
        assert_eq!(outcome.events[0].labels["technique"], "password_spray");
    }

    #[test]
    fn test_pause_advances_clock_only() {
        let mut rng = seeded_rng(Some(1));
        let outcome = Action::pause_seconds(5).perform(base_time(), ActorId(1), &Options::new(), &mut rng);
        assert!(outcome.events.is_empty());
        assert_eq!(outcome.next_instant, base_time() + Duration::seconds(5));
    }

    #[test]
    fn test_pause_between_stays_in_range() {
        let mut rng = seeded_rng(Some(9));
        let action = Action::pause_between_seconds(0, 5);
        for _ in 0..50 {
            let outcome = action.perform(base_time(), ActorId(1), &Options::new(), &mut rng);
            assert!(outcome.events.is_empty());
            assert!(outcome.next_instant >= base_time());
            assert!(outcome.next_instant <= base_time() + Duration::seconds(5));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::Login.to_string(), "Login");
        assert_eq!(Action::pause_between_seconds(1, 3).to_string(), "PauseBetween(1s, 3s)");
        assert!(!Action::pause_seconds(2).produces_events());
    }
}
