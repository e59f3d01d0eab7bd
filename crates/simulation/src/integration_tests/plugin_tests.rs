//! ECS wiring: the action queue, pausing and the PostSim reporters.

use crate::buildings::BuildingType;
use crate::game_actions::{ActionError, ActionResult, ActionResultLog, ActionQueue, GameAction};
use crate::grid::ZoneType;
use crate::simulation_invariants::InvariantViolations;
use crate::state_hash::{compute_state_hash, StateHash};
use crate::test_harness::TestCity;
use crate::NewGameConfig;

#[test]
fn paused_city_does_not_advance() {
    let mut city = TestCity::new(16);
    city.queue_action(GameAction::SetPaused { paused: true });
    city.tick(5);
    assert_eq!(city.state().tick, 0);

    // Edits still apply while paused.
    city.queue_action(GameAction::Zone {
        pos: (3, 3),
        zone: ZoneType::Commercial,
    });
    city.tick(1);
    city.assert_zone(3, 3, ZoneType::Commercial);
    assert_eq!(city.state().tick, 0);

    city.queue_action(GameAction::SetPaused { paused: false });
    city.tick(2);
    assert_eq!(city.state().tick, 2);
}

#[test]
fn queued_actions_apply_in_order_and_are_logged() {
    let mut city = TestCity::new(16);
    city.queue_action(GameAction::PlaceBuilding {
        pos: (4, 4),
        building_type: BuildingType::Road,
    });
    city.queue_action(GameAction::Bulldoze { pos: (4, 4) });
    city.queue_action(GameAction::Bulldoze { pos: (4, 4) });
    city.tick(1);

    assert!(city.resource::<ActionQueue>().is_empty());
    city.assert_building(4, 4, BuildingType::Grass);

    let log = city.resource::<ActionResultLog>();
    let results: Vec<_> = log.last_n(3).map(|(_, result)| result.clone()).collect();
    assert_eq!(
        results,
        vec![
            ActionResult::Success,
            ActionResult::Success,
            ActionResult::Error(ActionError::NothingToBulldoze),
        ]
    );
}

#[test]
fn rejected_action_leaves_city_untouched() {
    let mut city = TestCity::new(16).with_money(10.0);
    let before = city.state().clone();
    city.queue_action(GameAction::PlaceBuilding {
        pos: (2, 2),
        building_type: BuildingType::Hospital,
    });
    city.queue_action(GameAction::SetPaused { paused: true });
    city.tick(1);

    assert_eq!(city.state(), &before);
    let log = city.resource::<ActionResultLog>();
    assert_eq!(
        log.last_n(2).next().map(|(_, r)| r.error().cloned()),
        Some(Some(ActionError::InsufficientFunds))
    );
}

#[test]
fn state_hash_tracks_the_city() {
    let mut city = TestCity::new(16).with_road(0, 8, 15, 8);
    city.tick(3);
    let hash = city.resource::<StateHash>();
    assert_eq!(hash.tick, 3);
    assert_eq!(hash.hash, compute_state_hash(city.state()));
}

#[test]
fn invariant_counter_stays_zero_on_a_healthy_city() {
    let mut city = TestCity::new(24)
        .with_road(0, 10, 23, 10)
        .with_zone_rect(0, 4, 23, 9, ZoneType::Residential)
        .with_zone_rect(0, 11, 23, 16, ZoneType::Commercial)
        .with_utilities(10, 18);
    city.tick(200);
    let violations = city.resource::<InvariantViolations>();
    assert_eq!(violations.last_tick, 200);
    assert_eq!(violations.count, 0);
}

#[test]
fn plugin_generates_a_city_from_config() {
    let config = NewGameConfig {
        size: 32,
        city_name: "Riverside".to_string(),
        seed: 7,
        ..NewGameConfig::default()
    };
    let mut city = TestCity::generated(config.clone());
    let state = city.state();
    assert_eq!(state.grid_size, 32);
    assert_eq!(state.city_name, "Riverside");
    assert!(!state.water_bodies.is_empty());
    assert_eq!(city.resource::<NewGameConfig>(), &config);

    city.tick(10);
    assert_eq!(city.state().tick, 10);
    city.assert_invariants();
}
