//! Whole-journey sweeps: drive generated games to their ending and check the
//! resource economy's hard invariants along the way.
use roadtrip_game::{Direction, Ending, GameConfig, GameState};

const MOVE_CAP: u32 = 200;

/// Charted neighbor minimizing the Manhattan distance to the destination.
fn greedy_direction(state: &GameState) -> Option<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|d| state.try_get_location(state.player.step(*d)).is_some())
        .min_by_key(|d| state.player.step(*d).manhattan(state.destination))
}

#[test]
fn every_default_journey_terminates_within_its_day_budget() {
    let cfg = GameConfig::default();
    for seed in 0..60u64 {
        let mut state = GameState::new(cfg.clone(), seed);
        let mut coins_seen = 0;
        let mut moves = 0u32;

        while !state.is_over() && moves < MOVE_CAP {
            // Active journeys always hold strictly positive resources.
            assert!(state.supplies.fuel > 0.0, "seed {seed}: fuel leaked to zero");
            assert!(state.supplies.food > 0.0, "seed {seed}: food leaked to zero");
            assert!(
                state.supplies.remaining_days > 0,
                "seed {seed}: days leaked to zero"
            );

            let dir = greedy_direction(&state).expect("a charted neighbor always exists");
            state.try_move(dir).expect("greedy move onto charted cell");
            moves += 1;

            // Coins only ever accumulate.
            assert!(state.supplies.coins >= coins_seen, "seed {seed}: coins shrank");
            coins_seen = state.supplies.coins;
        }

        let ending = state.ending.unwrap_or_else(|| {
            panic!("seed {seed}: journey still active after {MOVE_CAP} moves")
        });
        match ending {
            Ending::Victory => {
                assert_eq!(state.player, state.destination, "seed {seed}");
            }
            Ending::Defeat(_) => {
                assert!(
                    state.supplies.remaining_days <= 0
                        || state.supplies.fuel <= 0.0
                        || state.supplies.food <= 0.0,
                    "seed {seed}: defeat without an exhausted resource"
                );
            }
        }
        // Days tick once per move plus trap penalties, so the move count can
        // never exceed the (possibly trap-shortened) day budget.
        assert!(moves <= state.day_budget as u32, "seed {seed}: overran budget");
    }
}

#[test]
fn generous_budgets_let_the_greedy_driver_win() {
    // Remove the time pressure entirely; greedy pathing must then reach the
    // destination on ample fuel and food.
    let cfg = GameConfig {
        extra_days: 500,
        initial_fuel: 500.0,
        initial_food: 500.0,
        ..GameConfig::default()
    };
    let mut victories = 0u32;
    for seed in 0..20u64 {
        let mut state = GameState::new(cfg.clone(), seed);
        let mut moves = 0u32;
        while !state.is_over() && moves < 2_000 {
            let dir = greedy_direction(&state).expect("a charted neighbor always exists");
            state.try_move(dir).expect("greedy move onto charted cell");
            moves += 1;
        }
        if state.ending == Some(Ending::Victory) {
            victories += 1;
        }
    }
    assert!(victories >= 15, "only {victories}/20 generous journeys won");
}

#[test]
fn restart_mid_journey_returns_to_a_fresh_identical_world() {
    let cfg = GameConfig::default();
    let mut state = GameState::new(cfg.clone(), 77);
    let reference = GameState::new(cfg, 77);

    for _ in 0..5 {
        if state.is_over() {
            break;
        }
        let Some(dir) = greedy_direction(&state) else {
            break;
        };
        let _ = state.try_move(dir);
    }
    state.restart();

    assert_eq!(state.player, reference.player);
    assert_eq!(state.destination, reference.destination);
    assert_eq!(state.supplies, reference.supplies);
    assert_eq!(state.world.len(), reference.world.len());
    assert_eq!(state.logs, reference.logs);
}
