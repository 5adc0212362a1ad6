//! Tests for actor groups and single-machine attacks
//!
//! These tests verify identity allocation, start-window bounds, and the
//! union of groups.

use auth_event_simulator::actor::{Action, Actor, ActorGroup, SingleMachineAttack};
use auth_event_simulator::events::LoginAttempt;
use auth_event_simulator::simulation::{seeded_rng, EventSource, Options};
use auth_event_simulator::types::{ActionTiming, ActorId, IdAllocator, LoginStatus};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::BTreeSet;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 12, 20, 5, 10, 0).unwrap()
}

fn distinct_ids(events: &[LoginAttempt]) -> BTreeSet<ActorId> {
    events.iter().map(|e| e.actor_id).collect()
}

/// The group window bounds member starts; member actions may run past it
#[test]
fn test_group_window_bounds_starts() {
    let mut ids = IdAllocator::new();
    let mut rng = seeded_rng(Some(17));
    let template = Actor::new(&mut ids).with_timing(ActionTiming::Sequential)
        + Action::LoginFail
        + Action::pause_between_seconds(0, 2)
        + Action::Login;
    let group = ActorGroup::new(template, 5, &mut ids);

    let events = group.generate_within(base_time(), Duration::seconds(20), &mut rng);
    assert_eq!(events.len(), 10);
    assert!(events
        .iter()
        .all(|e| e.time >= base_time() && e.time <= base_time() + Duration::seconds(22)));

    let actors = distinct_ids(&events);
    assert_eq!(actors.len(), 5);
    for actor in actors {
        let codes: Vec<u16> =
            events.iter().filter(|e| e.actor_id == actor).map(|e| e.status.code()).collect();
        assert_eq!(codes, vec![401, 200]);
    }
}

/// A template with an explicit identity yields a single shared identity
#[test]
fn test_explicit_template_shares_identity() {
    let mut ids = IdAllocator::new();
    let mut rng = seeded_rng(Some(4));
    let group = ActorGroup::new(Actor::with_id(ActorId(77)) + Action::LoginFail, 12, &mut ids);

    let events = group.generate_within(base_time(), Duration::seconds(60), &mut rng);
    assert_eq!(events.len(), 12);
    assert_eq!(distinct_ids(&events), BTreeSet::from([ActorId(77)]));
}

/// Without any window every member fires at the group start
#[test]
fn test_group_without_window() {
    let mut ids = IdAllocator::new();
    let mut rng = seeded_rng(Some(4));
    let group = ActorGroup::new(Actor::new(&mut ids) + Action::Login, 6, &mut ids);

    let events = group.generate(base_time(), &Options::new(), &mut rng);
    assert!(events.iter().all(|e| e.time == base_time()));
}

/// The group's own window wins over the caller's
#[test]
fn test_group_own_window_wins() {
    let mut ids = IdAllocator::new();
    let mut rng = seeded_rng(Some(12));
    let group = ActorGroup::new(Actor::new(&mut ids) + Action::Login, 40, &mut ids)
        .with_window(Duration::seconds(3));

    let events = group.generate(base_time(), &Options::with_window(Duration::hours(2)), &mut rng);
    assert!(events.iter().all(|e| e.time <= base_time() + Duration::seconds(3)));
}

/// Group union sums members and preserves identities
#[test]
fn test_group_union() {
    let mut ids = IdAllocator::new();
    let left = ActorGroup::new(Actor::new(&mut ids) + Action::Login, 3, &mut ids);
    let right = ActorGroup::new(Actor::new(&mut ids) + Action::LoginFail, 4, &mut ids);

    let combined = &left + &right;
    assert_eq!(combined.len(), 7);
    let expected: BTreeSet<ActorId> = left.identities().union(&right.identities()).copied().collect();
    assert_eq!(combined.identities(), expected);

    // Operands are untouched by the borrowed form
    assert_eq!(left.len(), 3);
    assert_eq!(right.len(), 4);
}

/// Dynamic composition only accepts groups and attack patterns
#[test]
fn test_group_compose() {
    let mut ids = IdAllocator::new();
    let group = ActorGroup::new(Actor::new(&mut ids) + Action::Login, 2, &mut ids);

    let attack = SingleMachineAttack::new(3, 1, &mut ids);
    assert_eq!(group.compose(attack).unwrap().len(), 6);

    let err = group.compose(Action::Login).unwrap_err();
    assert_eq!(err.to_string(), "Invalid composition: cannot add Action to ActorGroup");
}

/// An attack emits exactly f failures and s successes from one identity
#[test]
fn test_single_machine_attack() {
    let mut ids = IdAllocator::new();
    let mut rng = seeded_rng(Some(30));
    let attack = SingleMachineAttack::new(10, 2, &mut ids);

    let events = attack.generate_within(base_time(), Duration::seconds(20), &mut rng);
    assert!(events
        .iter()
        .all(|e| e.time >= base_time() && e.time <= base_time() + Duration::seconds(20)));
    assert_eq!(events.iter().filter(|e| e.status == LoginStatus::Failure).count(), 10);
    assert_eq!(events.iter().filter(|e| e.status == LoginStatus::Success).count(), 2);
    assert_eq!(distinct_ids(&events), BTreeSet::from([attack.machine_id()]));
}

/// Zero counts produce no events rather than errors
#[test]
fn test_empty_attack() {
    let mut ids = IdAllocator::new();
    let mut rng = seeded_rng(Some(30));
    let attack = SingleMachineAttack::new(0, 0, &mut ids);
    assert!(attack.generate_within(base_time(), Duration::seconds(20), &mut rng).is_empty());
}
