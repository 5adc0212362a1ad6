//! Configuration structures for the login event simulator
//!
//! This module contains the command line interface, the partial configuration
//! file format, the resolved simulation configuration and its validation, and
//! the translation of a configuration into a runnable [`Simulation`].

use super::{ActionTiming, IdAllocator, OutputFormat};
use crate::actor::{Action, Actor, ActorGroup, SingleMachineAttack};
use crate::simulation::{
    Labels, Options, ScenarioSpec, Simulation, SimulationError, SimulationResult, MAX_WINDOW_SECONDS,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Default anchor of a run: 2023-12-20T05:10:00Z
const DEFAULT_START_TIMESTAMP: i64 = 1_703_049_000;

/// Label key marking which population an event came from
pub const POPULATION_LABEL: &str = "population";

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "auth-event-simulator",
    version,
    about = "Login Event Simulator - Generates synthetic authentication events",
    long_about = "Generates timestamped login success and failure events from a composition of actors, actor groups, attack patterns and nested simulations. Output is written to stdout as JSON lines or CSV; diagnostics go to stderr.

EXAMPLES:
    # Run the default scenario
    auth-event-simulator

    # Reproducible run over two hours with three attacking machines
    auth-event-simulator --seed 42 --duration-seconds 7200 --attacks 3

    # Use a configuration file and tag every event
    auth-event-simulator --config config.json --label env=staging

    # Run an explicit composition tree
    auth-event-simulator --scenario scenario.json --output-format csv

    # Generate configuration template
    auth-event-simulator --print-config > my-config.json

    # Validate configuration without running
    auth-event-simulator --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Start of the simulation window
    #[arg(
        long,
        help = "Start of the simulation window (RFC 3339)",
        long_help = "Anchor instant of the top-level simulation, e.g. 2023-12-20T05:10:00Z. Default: 2023-12-20T05:10:00Z"
    )]
    pub start: Option<DateTime<Utc>>,

    /// Length of the simulation window in seconds
    #[arg(
        long,
        help = "Simulation window in seconds",
        long_help = "Window over which every top-level producer's start is drawn. Must not be negative. Default: 3600"
    )]
    pub duration_seconds: Option<i64>,

    /// Number of background users performing one successful login
    #[arg(long, help = "Number of background users")]
    pub background_users: Option<usize>,

    /// Window each user spreads its own actions over
    #[arg(long, help = "Per-user action window in seconds")]
    pub user_window_seconds: Option<i64>,

    /// Number of users who mistype once before logging in
    #[arg(long, help = "Number of users who fail once then succeed")]
    pub typo_users: Option<usize>,

    /// Number of single-machine attacks
    #[arg(long, help = "Number of single-machine attacks")]
    pub attacks: Option<usize>,

    /// Failed attempts per attacking machine
    #[arg(long, help = "Failed attempts per attacking machine")]
    pub attack_fail_count: Option<usize>,

    /// Successful attempts per attacking machine
    #[arg(long, help = "Successful attempts per attacking machine")]
    pub attack_success_count: Option<usize>,

    /// Chain user actions sequentially instead of scattering them
    #[arg(
        long,
        help = "Chain user actions in order instead of scattering them",
        long_help = "Fire each user's first action at its start and every later action after the previous one. By default actions are scattered over the user's window."
    )]
    pub sequential: bool,

    /// Output format for generated events
    #[arg(
        long,
        help = "Output format (json or csv)",
        long_help = "Output format for generated events. Supported formats: json, csv. Default: json"
    )]
    pub output_format: Option<String>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Labels stamped on every event
    #[arg(
        long = "label",
        value_name = "KEY=VALUE",
        value_parser = parse_label,
        help = "Label stamped on every event (repeatable)"
    )]
    pub labels: Vec<(String, String)>,

    /// Scenario file describing an explicit composition tree
    #[arg(
        long,
        help = "Scenario file (JSON) describing the composition tree",
        long_help = "Path to a JSON scenario file. When given, the scenario replaces the generated background, typo and attack populations."
    )]
    pub scenario: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Parse a `key=value` label argument
pub fn parse_label(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) => Ok((key.trim().to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Start of the simulation window
    pub start: Option<DateTime<Utc>>,

    /// Length of the simulation window in seconds
    pub duration_seconds: Option<i64>,

    /// Number of background users
    pub background_users: Option<usize>,

    /// Per-user action window in seconds
    pub user_window_seconds: Option<i64>,

    /// Number of users who fail once then succeed
    pub typo_users: Option<usize>,

    /// Number of single-machine attacks
    pub attacks: Option<usize>,

    /// Failed attempts per attacking machine
    pub attack_fail_count: Option<usize>,

    /// Successful attempts per attacking machine
    pub attack_success_count: Option<usize>,

    /// How user actions are placed in time
    pub action_timing: Option<ActionTiming>,

    /// Output format for generated events
    pub output_format: Option<String>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Labels stamped on every event
    pub labels: Option<Labels>,

    /// Scenario file describing an explicit composition tree
    pub scenario: Option<String>,
}

/// Configuration for a login event simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Start of the simulation window
    pub start: DateTime<Utc>,

    /// Length of the simulation window in seconds
    pub duration_seconds: i64,

    /// Number of background users performing one successful login
    pub background_users: usize,

    /// Window each user spreads its own actions over, in seconds
    pub user_window_seconds: i64,

    /// Number of users who fail once then succeed
    pub typo_users: usize,

    /// Number of single-machine attacks
    pub attacks: usize,

    /// Failed attempts per attacking machine
    pub attack_fail_count: usize,

    /// Successful attempts per attacking machine
    pub attack_success_count: usize,

    /// How user actions are placed in time
    pub action_timing: ActionTiming,

    /// Output format for generated events
    pub output_format: String,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Labels stamped on every event
    pub labels: Labels,

    /// Scenario file describing an explicit composition tree
    pub scenario: Option<String>,
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// A window length is negative
    #[error("{field} must not be negative, got {value}")]
    NegativeWindow {
        /// Name of the offending field
        field: String,
        /// The negative value
        value: i64,
    },

    /// A window length exceeds the supported maximum
    #[error("{field} must be at most {max} seconds, got {value}")]
    WindowTooLarge {
        /// Name of the offending field
        field: String,
        /// The oversized value
        value: i64,
        /// Largest accepted value
        max: i64,
    },

    /// Output format is not recognised
    #[error("Unknown output format: {0} (supported: json, csv)")]
    InvalidOutputFormat(String),

    /// A label has an empty key
    #[error("Label keys must not be empty (value: '{0}')")]
    EmptyLabelKey(String),

    /// Attacks were requested with no attempts per machine
    #[error("{attacks} attacks requested but each machine makes no attempts")]
    EmptyAttack {
        /// Number of attacks requested
        attacks: usize,
    },

    /// Scenario file does not exist
    #[error("Scenario file not found: {0}")]
    ScenarioNotFound(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            duration_seconds: 3600,
            background_users: 100,
            user_window_seconds: 60,
            typo_users: 10,
            attacks: 1,
            attack_fail_count: 20,
            attack_success_count: 1,
            action_timing: ActionTiming::default(),
            output_format: "json".to_string(),
            seed: None,
            labels: Labels::new(),
            scenario: None,
        }
    }
}

fn default_start() -> DateTime<Utc> {
    Utc.timestamp_opt(DEFAULT_START_TIMESTAMP, 0).single().unwrap_or_default()
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        // Start with default configuration
        let mut config = Self::default();

        // Load from config file if specified
        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // Override with command line arguments (CLI takes precedence)
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                debug!("Loaded configuration file {}", path.display());
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            start: config_file.start.unwrap_or(defaults.start),
            duration_seconds: config_file.duration_seconds.unwrap_or(defaults.duration_seconds),
            background_users: config_file.background_users.unwrap_or(defaults.background_users),
            user_window_seconds: config_file
                .user_window_seconds
                .unwrap_or(defaults.user_window_seconds),
            typo_users: config_file.typo_users.unwrap_or(defaults.typo_users),
            attacks: config_file.attacks.unwrap_or(defaults.attacks),
            attack_fail_count: config_file.attack_fail_count.unwrap_or(defaults.attack_fail_count),
            attack_success_count: config_file
                .attack_success_count
                .unwrap_or(defaults.attack_success_count),
            action_timing: config_file.action_timing.unwrap_or(defaults.action_timing),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            seed: config_file.seed.or(defaults.seed),
            labels: config_file.labels.unwrap_or(defaults.labels),
            scenario: config_file.scenario.or(defaults.scenario),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.start {
            config.start = value;
        }
        if let Some(value) = args.duration_seconds {
            config.duration_seconds = value;
        }
        if let Some(value) = args.background_users {
            config.background_users = value;
        }
        if let Some(value) = args.user_window_seconds {
            config.user_window_seconds = value;
        }
        if let Some(value) = args.typo_users {
            config.typo_users = value;
        }
        if let Some(value) = args.attacks {
            config.attacks = value;
        }
        if let Some(value) = args.attack_fail_count {
            config.attack_fail_count = value;
        }
        if let Some(value) = args.attack_success_count {
            config.attack_success_count = value;
        }
        if args.sequential {
            config.action_timing = ActionTiming::Sequential;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.scenario {
            config.scenario = Some(value);
        }

        // CLI labels are added on top of file labels, replacing equal keys
        config.labels.extend(args.labels);
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("duration_seconds", self.duration_seconds),
            ("user_window_seconds", self.user_window_seconds),
        ] {
            if value < 0 {
                return Err(ConfigValidationError::NegativeWindow { field: field.to_string(), value });
            }
            if value > MAX_WINDOW_SECONDS {
                return Err(ConfigValidationError::WindowTooLarge {
                    field: field.to_string(),
                    value,
                    max: MAX_WINDOW_SECONDS,
                });
            }
        }

        self.get_output_format()
            .map_err(|_| ConfigValidationError::InvalidOutputFormat(self.output_format.clone()))?;

        if let Some((_, value)) = self.labels.iter().find(|(key, _)| key.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyLabelKey(value.clone()));
        }

        if self.attacks > 0 && self.attack_fail_count + self.attack_success_count == 0 {
            return Err(ConfigValidationError::EmptyAttack { attacks: self.attacks });
        }

        if let Some(path) = &self.scenario {
            if !Path::new(path).exists() {
                return Err(ConfigValidationError::ScenarioNotFound(path.clone()));
            }
        }

        Ok(())
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }

    /// Window of the top-level simulation, clamped to the accepted range
    pub fn duration(&self) -> Duration {
        Duration::seconds(self.duration_seconds.clamp(0, MAX_WINDOW_SECONDS))
    }

    /// Build the top-level simulation this configuration describes
    ///
    /// With a scenario file the file's tree is used as-is. Otherwise the
    /// generated populations are background users, typo users and
    /// single-machine attacks, each tagged with a `population` label.
    pub fn build_simulation(&self, ids: &mut IdAllocator) -> SimulationResult<Simulation> {
        self.validate()
            .map_err(|e| SimulationError::configuration_error(e.to_string()))?;

        let mut simulation = Simulation::new(self.start, self.duration())
            .with_options(Options::new().labels(self.labels.clone()));

        if let Some(path) = &self.scenario {
            let scenario = ScenarioSpec::from_file(path)?;
            scenario.populate(&mut simulation, ids)?;
            info!("Built simulation from scenario {}", path);
            return Ok(simulation);
        }

        if self.background_users > 0 {
            let template = self.user_template(ids) + Action::Login;
            simulation += ActorGroup::new(template, self.background_users, ids)
                .with_label(POPULATION_LABEL, "background");
        }

        if self.typo_users > 0 {
            let template = self.user_template(ids) + Action::LoginFail + Action::Login;
            simulation +=
                ActorGroup::new(template, self.typo_users, ids).with_label(POPULATION_LABEL, "typo");
        }

        for _ in 0..self.attacks {
            simulation += SingleMachineAttack::new(self.attack_fail_count, self.attack_success_count, ids)
                .with_label(POPULATION_LABEL, "attack");
        }

        info!(
            "Built default simulation: {} background users, {} typo users, {} attacks",
            self.background_users, self.typo_users, self.attacks
        );
        Ok(simulation)
    }

    fn user_template(&self, ids: &mut IdAllocator) -> Actor {
        Actor::new(ids)
            .with_duration_seconds(self.user_window_seconds)
            .with_timing(self.action_timing)
    }
}
