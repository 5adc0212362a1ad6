//! Uniform time sampling within a window
//!
//! Every component draws its instants through these functions, always from
//! the single random source handed down by the caller.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::simulation::{SimulationError, SimulationResult};

/// Longest window or pause accepted from configuration: 100 years
pub const MAX_WINDOW_SECONDS: i64 = 100 * 365 * 24 * 60 * 60;

/// Convert a configured number of seconds, rejecting magnitudes above
/// [`MAX_WINDOW_SECONDS`]
pub fn checked_seconds(field: &str, seconds: i64) -> SimulationResult<Duration> {
    if seconds.unsigned_abs() > MAX_WINDOW_SECONDS as u64 {
        return Err(SimulationError::configuration_error(format!(
            "{} must be at most {} seconds, got {}",
            field, MAX_WINDOW_SECONDS, seconds
        )));
    }
    Ok(Duration::seconds(seconds))
}

/// Round a window to whole seconds, clamping negative windows to zero
pub fn whole_seconds(duration: Duration) -> i64 {
    let seconds = (duration.num_milliseconds() as f64 / 1000.0).round() as i64;
    seconds.max(0)
}

/// Sample `count` instants uniformly in `[start, start + duration]`
///
/// Each instant is `start` plus an independently drawn integer number of
/// seconds in `[0, round(duration)]`. No ordering is guaranteed. A zero (or
/// negative) window yields `count` copies of `start` without touching `rng`.
pub fn generate_times(
    start: DateTime<Utc>,
    duration: Duration,
    count: usize,
    rng: &mut dyn RngCore,
) -> Vec<DateTime<Utc>> {
    let upper = whole_seconds(duration);
    if upper == 0 {
        return vec![start; count];
    }

    (0..count)
        .map(|_| start + Duration::seconds(rng.gen_range(0..=upper)))
        .collect()
}

/// Sample one instant uniformly in `[start, start + duration]`
pub fn sample_time(start: DateTime<Utc>, duration: Duration, rng: &mut dyn RngCore) -> DateTime<Utc> {
    let upper = whole_seconds(duration);
    if upper == 0 {
        return start;
    }
    start + Duration::seconds(rng.gen_range(0..=upper))
}

/// Sample a whole-second duration uniformly in `[lower, upper]`
///
/// An inverted range collapses to `lower`.
pub fn sample_duration_between(lower: Duration, upper: Duration, rng: &mut dyn RngCore) -> Duration {
    let low = whole_seconds(lower);
    let high = whole_seconds(upper);
    if high <= low {
        return Duration::seconds(low);
    }
    Duration::seconds(rng.gen_range(low..=high))
}

/// Build the random source for one run
///
/// A seed makes every invocation driven by the returned source reproducible.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
