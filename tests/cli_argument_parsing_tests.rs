//! Tests for CLI argument parsing functionality
//!
//! These tests verify that command line arguments are properly parsed and
//! take precedence over configuration files and defaults.

use auth_event_simulator::types::config::{CliArgs, SimulationConfig};
use auth_event_simulator::types::ActionTiming;
use clap::Parser;

/// Test parsing with no arguments
#[test]
fn test_defaults_when_no_arguments() {
    let cli_args = CliArgs::try_parse_from(["test"]).unwrap();
    assert!(cli_args.config.is_none());
    assert!(cli_args.start.is_none());
    assert!(cli_args.labels.is_empty());
    assert!(!cli_args.sequential);
    assert!(!cli_args.dry_run);

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.duration_seconds, SimulationConfig::default().duration_seconds);
}

/// Test parsing of population and window arguments
#[test]
fn test_population_arguments() {
    let cli_args = CliArgs::try_parse_from([
        "test",
        "--start",
        "2024-02-29T23:59:00Z",
        "--duration-seconds",
        "120",
        "--background-users",
        "3",
        "--user-window-seconds",
        "0",
        "--typo-users",
        "2",
        "--attacks",
        "4",
        "--attack-fail-count",
        "9",
        "--attack-success-count",
        "0",
    ])
    .unwrap();

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.start.to_rfc3339(), "2024-02-29T23:59:00+00:00");
    assert_eq!(config.duration_seconds, 120);
    assert_eq!(config.background_users, 3);
    assert_eq!(config.user_window_seconds, 0);
    assert_eq!(config.typo_users, 2);
    assert_eq!(config.attacks, 4);
    assert_eq!(config.attack_fail_count, 9);
    assert_eq!(config.attack_success_count, 0);
    config.validate().unwrap();
}

/// Test repeatable label arguments
#[test]
fn test_label_arguments() {
    let cli_args =
        CliArgs::try_parse_from(["test", "--label", "env=prod", "--label", "region=eu-west-1"]).unwrap();
    assert_eq!(
        cli_args.labels,
        vec![
            ("env".to_string(), "prod".to_string()),
            ("region".to_string(), "eu-west-1".to_string())
        ]
    );

    assert!(CliArgs::try_parse_from(["test", "--label", "missing-separator"]).is_err());
}

/// Test invalid values are rejected by the parser
#[test]
fn test_invalid_values_rejected() {
    assert!(CliArgs::try_parse_from(["test", "--start", "yesterday"]).is_err());
    assert!(CliArgs::try_parse_from(["test", "--attacks", "-1"]).is_err());
    assert!(CliArgs::try_parse_from(["test", "--seed", "abc"]).is_err());
}

/// Test flag arguments
#[test]
fn test_flag_arguments() {
    let cli_args =
        CliArgs::try_parse_from(["test", "--sequential", "--verbose", "--dry-run", "--print-config"]).unwrap();
    assert!(cli_args.verbose);
    assert!(cli_args.dry_run);
    assert!(cli_args.print_config);

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.action_timing, ActionTiming::Sequential);
}

/// Test that an unknown output format parses but fails validation
#[test]
fn test_output_format_validation() {
    let cli_args = CliArgs::try_parse_from(["test", "--output-format", "parquet"]).unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert!(config.validate().is_err());

    let cli_args = CliArgs::try_parse_from(["test", "--output-format", "csv"]).unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert!(config.validate().is_ok());
}
