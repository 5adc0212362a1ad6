// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use auth_event_simulator::*;
use chrono::{TimeZone, Utc};

mod group_tests;

// Configuration and scenarios
mod cli_argument_parsing_tests;

#[test]
fn test_core_id_types() {
    let mut ids = IdAllocator::new();
    let first = ids.next_id();
    let second = ids.next_id();

    // Allocated identities are unique and increasing
    assert_ne!(first, second);
    assert!(first < second);

    // Test string formatting
    assert!(first.to_string().starts_with("ACTOR_"));
    assert_eq!(ActorId::new(17).value(), 17);
}

#[test]
fn test_enum_types() {
    assert_eq!(LoginStatus::Success.code(), 200);
    assert_eq!(LoginStatus::Failure.code(), 401);
    assert_eq!(ActionTiming::default(), ActionTiming::Scatter);
    assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
}

#[test]
fn test_quick_start_pipeline() {
    let mut ids = IdAllocator::new();
    let mut rng = seeded_rng(Some(2024));
    let start = Utc.with_ymd_and_hms(2023, 12, 20, 5, 10, 0).unwrap();

    let simulation = Simulation::from_seconds(start, 300)
        + ActorGroup::new(Actor::new(&mut ids) + Action::Login, 8, &mut ids)
        + SingleMachineAttack::new(6, 1, &mut ids);

    let mut events = simulation.run(&mut rng);
    events.sort();
    assert_eq!(events.len(), 15);
    assert!(events.windows(2).all(|pair| pair[0] <= pair[1]));

    let stats = EventStatistics::from_events(&events);
    assert_eq!(stats.failure_events, 6);
    assert_eq!(stats.max_failures_per_actor, 6);
    assert_eq!(stats.distinct_actors, 9);
}
