// Login Event Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/auth-event-simulator --seed 42 > events.jsonl
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/auth-event-simulator --background-users 500 --attacks 3 --verbose
// ```

use anyhow::{Context, Result};
use auth_event_simulator::events::EventWriter;
use auth_event_simulator::simulation::{seeded_rng, EventStatistics, LoggingConfig};
use auth_event_simulator::types::config::CliArgs;
use auth_event_simulator::types::{IdAllocator, SimulationConfig};
use clap::Parser;
use std::io;
use std::process;
use std::time::Instant;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        // Default: minimal logging for normal users
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    let _logging_guard = match logging_result {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Login Event Simulator");

    let dry_run = args.dry_run;
    let config = match load_config(args) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    info!("Configuration loaded and validated successfully");

    // Handle dry run mode
    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    if let Err(e) = run_simulation(&config) {
        error!("Simulation failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Login Event Simulator completed successfully");
}

/// Resolve and validate the configuration from CLI arguments and optional file
fn load_config(args: CliArgs) -> Result<SimulationConfig> {
    let config = SimulationConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

/// Build the composition tree, run it and write the sorted events to stdout
fn run_simulation(config: &SimulationConfig) -> Result<()> {
    let format = config
        .get_output_format()
        .map_err(anyhow::Error::msg)
        .context("Invalid output format")?;

    let mut ids = IdAllocator::new();
    let simulation = config
        .build_simulation(&mut ids)
        .context("Failed to build simulation")?;

    let mut rng = seeded_rng(config.seed);
    let started = Instant::now();

    let mut events = {
        let span = auth_event_simulator::perf_span!(
            "simulation_run",
            children = simulation.len(),
            window_seconds = config.duration_seconds,
        );
        let _enter = span.enter();
        simulation.run(&mut rng)
    };
    events.sort();

    let mut statistics = EventStatistics::from_events(&events);
    statistics.set_generation_duration(started.elapsed());
    info!("Generated {}", statistics.compact_summary());

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    EventWriter::new(format)
        .write_all(&events, &mut handle)
        .context("Failed to write events")?;

    eprintln!("{}", statistics.generate_report());
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Login Event Simulator");
    eprintln!("=====================");
    eprintln!("Synthetic authentication events for detection testing");
    eprintln!();
    print_configuration_summary(config);
}

/// Print the resolved configuration to stderr
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Start: {}", config.start.to_rfc3339());
    eprintln!("  Window: {}s", config.duration_seconds);
    match &config.scenario {
        Some(path) => eprintln!("  Scenario: {}", path),
        None => {
            eprintln!("  Background Users: {}", config.background_users);
            eprintln!("  Typo Users: {}", config.typo_users);
            eprintln!("  User Window: {}s", config.user_window_seconds);
            eprintln!("  Action Timing: {}", config.action_timing);
            eprintln!(
                "  Attacks: {} ({} failures + {} successes each)",
                config.attacks, config.attack_fail_count, config.attack_success_count
            );
        }
    }
    eprintln!("  Output Format: {}", config.output_format);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    for (key, value) in &config.labels {
        eprintln!("  Label: {}={}", key, value);
    }
    eprintln!();
}
