//! The root container of the composition tree
//!
//! A simulation owns an ordered list of children, each invoked at a start
//! drawn uniformly from the simulation window. Combining with `+` returns a
//! new simulation with an independent copy of the child list; `+=` and
//! [`Simulation::add_child`] accumulate onto the same value.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use std::ops::{Add, AddAssign};
use tracing::instrument;

use crate::events::LoginAttempt;
use crate::simulation::options::Options;
use crate::simulation::producer::{Component, EventSource, Producer};
use crate::simulation::time_sampler::generate_times;
use crate::simulation::SimulationResult;

/// Top-level (or nested) container of producers over a shared window
#[derive(Debug, Clone)]
pub struct Simulation {
    start: DateTime<Utc>,
    duration: Duration,
    options: Options,
    children: Vec<Producer>,
}

impl Simulation {
    /// Create an empty simulation over `[start, start + duration]`
    pub fn new(start: DateTime<Utc>, duration: Duration) -> Self {
        Self { start, duration, options: Options::new(), children: Vec::new() }
    }

    /// Create an empty simulation with a window in whole seconds
    pub fn from_seconds(start: DateTime<Utc>, seconds: i64) -> Self {
        Self::new(start, Duration::seconds(seconds))
    }

    /// Replace the simulation's own options
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Add a label handed down to every child
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.labels.insert(key.into(), value.into());
        self
    }

    /// Window handed to children that do not declare their own
    ///
    /// Defaults to the simulation's own duration.
    pub fn with_child_window(mut self, window: Duration) -> Self {
        self.options.window = Some(window);
        self
    }

    /// Append a child in place
    pub fn add_child(&mut self, child: impl Into<Producer>) {
        self.children.push(child.into());
    }

    /// Append any composable value in place, rejecting bare actions
    pub fn push(&mut self, component: impl Into<Component>) -> SimulationResult<()> {
        let producer = Producer::try_from(component.into())?;
        self.children.push(producer);
        Ok(())
    }

    /// New simulation with `component` appended; `self` is left untouched
    pub fn compose(&self, component: impl Into<Component>) -> SimulationResult<Simulation> {
        let mut combined = self.clone();
        combined.push(component)?;
        Ok(combined)
    }

    /// New simulation holding `self`'s children followed by `other`'s
    ///
    /// Unlike `+`, which nests `other` as a single child, this concatenates
    /// the two child lists. The window and options of `self` are kept.
    pub fn merge(&self, other: &Simulation) -> Simulation {
        let mut combined = self.clone();
        combined.children.extend(other.children.iter().cloned());
        combined
    }

    /// Anchor of a top-level run
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Window over which child starts are drawn
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The simulation's own options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Children in insertion order
    pub fn children(&self) -> &[Producer] {
        &self.children
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether there are no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Run as the root of a tree, anchored at the stored start
    pub fn run(&self, rng: &mut dyn RngCore) -> Vec<LoginAttempt> {
        self.generate(self.start, &Options::new(), rng)
    }

    /// Run as the root with caller options that win over the simulation's own
    pub fn run_with(&self, options: &Options, rng: &mut dyn RngCore) -> Vec<LoginAttempt> {
        self.generate(self.start, options, rng)
    }
}

impl EventSource for Simulation {
    /// Invoke every child at a start drawn from `[start, start + duration]`
    ///
    /// A nested simulation is re-anchored at the `start` its parent drew. Its
    /// window is always its own duration; any incoming window is ignored.
    #[instrument(skip_all, fields(children = self.children.len(), start = %start))]
    fn generate(&self, start: DateTime<Utc>, options: &Options, rng: &mut dyn RngCore) -> Vec<LoginAttempt> {
        let merged = options.merged_over(&self.options);
        let child_options = Options {
            window: Some(self.options.window.unwrap_or(self.duration)),
            labels: merged.labels,
        };

        let starts = generate_times(start, self.duration, self.children.len(), rng);
        let mut events = Vec::new();
        for (child, child_start) in self.children.iter().zip(starts) {
            events.extend(child.generate(child_start, &child_options, rng));
        }

        crate::sim_event!(
            debug,
            "simulation invoked",
            children = self.children.len(),
            window_seconds = self.duration.num_seconds(),
            event_count = events.len(),
        );
        events
    }
}

/// Appends `child` to a copy of the simulation
///
/// A simulation on the right is nested as a single child, so the result has
/// one more child than `self`. Use [`Simulation::merge`] to concatenate the
/// two child lists instead.
impl<P: Into<Producer>> Add<P> for &Simulation {
    type Output = Simulation;

    fn add(self, child: P) -> Simulation {
        let mut combined = self.clone();
        combined.children.push(child.into());
        combined
    }
}

/// Appends `child`, consuming the simulation
///
/// As with `&Simulation + child`, a simulation on the right becomes one
/// nested child; see [`Simulation::merge`] for concatenation.
impl<P: Into<Producer>> Add<P> for Simulation {
    type Output = Simulation;

    fn add(mut self, child: P) -> Simulation {
        self.children.push(child.into());
        self
    }
}

impl<P: Into<Producer>> AddAssign<P> for Simulation {
    fn add_assign(&mut self, child: P) {
        self.children.push(child.into());
    }
}
