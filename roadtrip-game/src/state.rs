//! The game-state manager: the single synchronous mutator of the simulation.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GameConfig;
use crate::constants::{
    LOG_CONFIG_APPLIED, LOG_ENDING_OUT_OF_DAYS, LOG_ENDING_OUT_OF_FOOD, LOG_ENDING_OUT_OF_FUEL,
    LOG_ENDING_VICTORY, LOG_JOURNEY_DISTANCE_PREFIX, RECONFIG_MIN_REMAINING_DAYS,
    RESOURCE_CLAMP_FACTOR,
};
use crate::events::trigger_location_event;
use crate::generator::{expand_frontier, place_destination};
use crate::grid::{Direction, GridLocation, GridPos, LocationKind, Terrain, WorldGrid};
use crate::rng::RngBundle;

/// Consumable party resources. Fuel and food may read exactly zero before the
/// defeat check runs; remaining days can dip below zero transiently after a
/// trap penalty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Supplies {
    pub fuel: f32,
    pub food: f32,
    pub remaining_days: i32,
    pub coins: i32,
}

/// Why a journey was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefeatCause {
    OutOfDays,
    OutOfFuel,
    OutOfFood,
}

/// Terminal state of a journey. Arriving on the destination wins even when a
/// resource hits zero on the same move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    Victory,
    Defeat(DefeatCause),
}

/// Rejected move. A blocked move changes no state; the caller may re-prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveBlocked {
    #[error("the journey is already over")]
    JourneyOver,
    #[error("no charted location in that direction")]
    Uncharted,
    #[error("not enough fuel for the move")]
    NotEnoughFuel,
    #[error("not enough food for the move")]
    NotEnoughFood,
}

/// Outcome of a successful move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveReport {
    /// Cell the player now occupies.
    pub position: GridPos,
    /// Whether this move newly occupied the cell and expanded the frontier.
    pub first_visit: bool,
    /// Log key of the location event that fired, if any.
    pub event: Option<&'static str>,
    /// Terminal state reached by this move, if any.
    pub ending: Option<Ending>,
}

/// Complete state of one journey. Created by [`GameState::new`] and rebuilt
/// wholesale on restart; all mutation funnels through [`GameState::try_move`]
/// and [`GameState::apply_config`].
#[derive(Debug, Clone)]
pub struct GameState {
    pub cfg: GameConfig,
    pub seed: u64,
    pub player: GridPos,
    pub destination: GridPos,
    /// Manhattan distance at generation time; day budgets are recomputed
    /// from it when the configuration changes mid-journey.
    pub initial_distance: i32,
    pub day_budget: i32,
    /// Days consumed so far, trap penalties included.
    pub days_elapsed: i32,
    pub supplies: Supplies,
    pub world: WorldGrid,
    pub ending: Option<Ending>,
    pub moves_made: u32,
    /// Append-only status log keys for presentation layers.
    pub logs: Vec<String>,
    rng: RngBundle,
}

impl GameState {
    /// Initialize a new journey: place the destination, grant the day budget
    /// and starting supplies, and expand the frontier around the origin.
    #[must_use]
    pub fn new(cfg: GameConfig, seed: u64) -> Self {
        let rng = RngBundle::from_user_seed(seed);
        let (destination, initial_distance) = place_destination(&cfg, &mut *rng.placement());
        Self::build(cfg, seed, rng, destination, initial_distance)
    }

    /// Initialize a journey with a scripted destination. Used by scenario
    /// tooling and tests; everything else matches [`GameState::new`].
    #[must_use]
    pub fn with_destination(cfg: GameConfig, seed: u64, destination: GridPos) -> Self {
        let rng = RngBundle::from_user_seed(seed);
        let initial_distance = destination.manhattan(GridPos::ORIGIN);
        Self::build(cfg, seed, rng, destination, initial_distance)
    }

    fn build(
        cfg: GameConfig,
        seed: u64,
        rng: RngBundle,
        destination: GridPos,
        initial_distance: i32,
    ) -> Self {
        let day_budget = cfg.day_budget(initial_distance);
        let mut world = WorldGrid::default();
        world.insert_if_absent(GridLocation::new(
            GridPos::ORIGIN,
            LocationKind::Empty,
            Terrain::Plains,
        ));
        world.insert_if_absent(GridLocation::new(
            destination,
            LocationKind::Destination,
            Terrain::Plains,
        ));
        expand_frontier(
            &mut world,
            GridPos::ORIGIN,
            destination,
            true,
            &mut *rng.frontier(),
            &mut *rng.category(),
        );

        let supplies = Supplies {
            fuel: cfg.initial_fuel,
            food: cfg.initial_food,
            remaining_days: day_budget,
            coins: 0,
        };
        Self {
            cfg,
            seed,
            player: GridPos::ORIGIN,
            destination,
            initial_distance,
            day_budget,
            days_elapsed: 0,
            supplies,
            world,
            ending: None,
            moves_made: 0,
            logs: vec![format!("{LOG_JOURNEY_DISTANCE_PREFIX}{initial_distance}")],
            rng,
        }
    }

    /// Whether the journey reached a terminal state.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.ending.is_some()
    }

    /// Read-only lookup for presentation layers.
    #[must_use]
    pub fn try_get_location(&self, position: GridPos) -> Option<&GridLocation> {
        self.world.get(position)
    }

    /// Attempt to move one step. On success the whole simulation turn runs
    /// atomically: supplies are deducted, the world clock ticks every
    /// cooldown, first occupancy expands the frontier, the location event
    /// fires, and terminal conditions are evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`MoveBlocked`] when the journey is over, the target cell was
    /// never generated, or supplies cannot cover the terrain cost. A blocked
    /// move leaves the state untouched.
    pub fn try_move(&mut self, direction: Direction) -> Result<MoveReport, MoveBlocked> {
        if self.is_over() {
            return Err(MoveBlocked::JourneyOver);
        }
        let target = self.player.step(direction);
        let Some(location) = self.world.get(target) else {
            return Err(MoveBlocked::Uncharted);
        };
        let fuel_cost = self.cfg.fuel_cost(location.terrain);
        let food_cost = self.cfg.food_cost(location.terrain);
        if self.supplies.fuel < fuel_cost {
            return Err(MoveBlocked::NotEnoughFuel);
        }
        if self.supplies.food < food_cost {
            return Err(MoveBlocked::NotEnoughFood);
        }

        self.player = target;
        self.supplies.fuel -= fuel_cost;
        self.supplies.food -= food_cost;
        self.supplies.remaining_days -= 1;
        self.days_elapsed += 1;
        self.moves_made += 1;

        // Global move clock: every generated cell cools by one.
        self.world.tick_cooldowns();

        if let Some(location) = self.world.get_mut(target) {
            location.discovered = true;
        }

        let first_visit = self.world.mark_visited(target);
        if first_visit {
            expand_frontier(
                &mut self.world,
                target,
                self.destination,
                true,
                &mut *self.rng.frontier(),
                &mut *self.rng.category(),
            );
        }

        let days_before_event = self.supplies.remaining_days;
        let mut event = None;
        if let Some(location) = self.world.get_mut(target) {
            event = trigger_location_event(location, &mut self.supplies, &self.cfg);
        }
        // Trap penalties count as spent days for later budget recomputes.
        self.days_elapsed += days_before_event - self.supplies.remaining_days;
        if let Some(key) = event {
            self.logs.push(key.to_string());
        }

        self.evaluate_ending();

        Ok(MoveReport {
            position: target,
            first_visit,
            event,
            ending: self.ending,
        })
    }

    /// Apply a new configuration mid-journey: carried fuel and food are
    /// clamped to at most 1.5x the new starting values, and the day budget is
    /// recomputed from the initial distance while preserving days already
    /// spent (trap penalties included).
    pub fn apply_config(&mut self, cfg: GameConfig) {
        self.supplies.fuel = self
            .supplies
            .fuel
            .min(cfg.initial_fuel * RESOURCE_CLAMP_FACTOR);
        self.supplies.food = self
            .supplies
            .food
            .min(cfg.initial_food * RESOURCE_CLAMP_FACTOR);
        let new_budget = cfg.day_budget(self.initial_distance);
        self.day_budget = new_budget;
        self.supplies.remaining_days =
            (new_budget - self.days_elapsed).max(RECONFIG_MIN_REMAINING_DAYS);
        self.cfg = cfg;
        self.logs.push(LOG_CONFIG_APPLIED.to_string());
    }

    /// Discard everything and rebuild the journey from the stored seed.
    pub fn restart(&mut self) {
        *self = Self::new(self.cfg.clone(), self.seed);
    }

    /// Discard everything and rebuild the journey from a new seed.
    pub fn restart_with_seed(&mut self, seed: u64) {
        *self = Self::new(self.cfg.clone(), seed);
    }

    /// Credit coins from an external collaborator.
    pub fn add_coins(&mut self, amount: i32) {
        self.supplies.coins += amount;
    }

    /// Coin ledger total.
    #[must_use]
    pub const fn total_coins(&self) -> i32 {
        self.supplies.coins
    }

    /// Victory is checked before resource exhaustion, so arriving on the
    /// destination wins even if fuel, food, or days hit zero on the same
    /// move.
    fn evaluate_ending(&mut self) {
        if self.ending.is_some() {
            return;
        }
        if self.player == self.destination {
            self.ending = Some(Ending::Victory);
            self.logs.push(LOG_ENDING_VICTORY.to_string());
            return;
        }
        let cause = if self.supplies.remaining_days <= 0 {
            Some((DefeatCause::OutOfDays, LOG_ENDING_OUT_OF_DAYS))
        } else if self.supplies.fuel <= 0.0 {
            Some((DefeatCause::OutOfFuel, LOG_ENDING_OUT_OF_FUEL))
        } else if self.supplies.food <= 0.0 {
            Some((DefeatCause::OutOfFood, LOG_ENDING_OUT_OF_FOOD))
        } else {
            None
        };
        if let Some((cause, log_key)) = cause {
            self.ending = Some(Ending::Defeat(cause));
            self.logs.push(log_key.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Config with a short, fixed journey and generous supplies so individual
    /// mechanics can be exercised without interference.
    fn test_config() -> GameConfig {
        GameConfig {
            min_distance: 2,
            max_distance: 4,
            ..GameConfig::default()
        }
    }

    /// State with a scripted far-away destination and a hand-placed cell east
    /// of the origin.
    fn scripted_state(kind: LocationKind) -> GameState {
        let mut state = GameState::with_destination(test_config(), 11, GridPos::new(0, 4));
        state.world.insert_if_absent(GridLocation::new(
            GridPos::new(1, 0),
            kind,
            Terrain::Plains,
        ));
        // The cell may already exist from origin expansion; force the kind.
        if let Some(loc) = state.world.get_mut(GridPos::new(1, 0)) {
            loc.kind = kind;
            loc.cooldown_remaining = 0;
        }
        state
    }

    #[test]
    fn initialization_grants_budget_and_logs_distance() {
        let state = GameState::with_destination(GameConfig::default(), 1, GridPos::new(6, 4));
        assert_eq!(state.initial_distance, 10);
        // ceil(10 * 1.5) + 5
        assert_eq!(state.day_budget, 20);
        assert_eq!(state.supplies.remaining_days, 20);
        assert!((state.supplies.fuel - 30.0).abs() < f32::EPSILON);
        assert!((state.supplies.food - 25.0).abs() < f32::EPSILON);
        assert_eq!(state.logs.first().map(String::as_str), Some("log.journey.distance.10"));
        assert!(state.try_get_location(GridPos::new(6, 4)).is_some());
        assert!(!state.is_over());
    }

    #[test]
    fn moving_into_uncharted_space_fails_without_state_change() {
        let mut state = scripted_state(LocationKind::Empty);
        // Find a direction with no generated cell.
        let uncharted = Direction::ALL
            .into_iter()
            .find(|d| state.world.get(state.player.step(*d)).is_none());
        let Some(direction) = uncharted else {
            return; // all four generated for this seed; nothing to assert
        };
        let before_supplies = state.supplies;
        let before_len = state.world.len();
        assert_eq!(state.try_move(direction), Err(MoveBlocked::Uncharted));
        assert_eq!(state.supplies, before_supplies);
        assert_eq!(state.world.len(), before_len);
        assert_eq!(state.player, GridPos::ORIGIN);
    }

    #[test]
    fn insufficient_fuel_blocks_the_move() {
        let mut state = scripted_state(LocationKind::Empty);
        state.supplies.fuel = 0.5;
        let before = state.supplies;
        assert_eq!(
            state.try_move(Direction::East),
            Err(MoveBlocked::NotEnoughFuel)
        );
        assert_eq!(state.supplies, before);
        assert_eq!(state.player, GridPos::ORIGIN);
    }

    #[test]
    fn insufficient_food_blocks_the_move() {
        let mut state = scripted_state(LocationKind::Empty);
        state.supplies.food = 0.25;
        assert_eq!(
            state.try_move(Direction::East),
            Err(MoveBlocked::NotEnoughFood)
        );
        assert_eq!(state.player, GridPos::ORIGIN);
    }

    #[test]
    fn successful_move_costs_supplies_and_a_day() {
        let mut state = scripted_state(LocationKind::Empty);
        let report = state.try_move(Direction::East).unwrap();
        assert_eq!(report.position, GridPos::new(1, 0));
        assert!(report.first_visit);
        assert_eq!(state.player, GridPos::new(1, 0));
        assert!((state.supplies.fuel - 29.0).abs() < f32::EPSILON);
        assert!((state.supplies.food - 24.0).abs() < f32::EPSILON);
        assert_eq!(state.days_elapsed, 1);
        assert_eq!(state.supplies.remaining_days, state.day_budget - 1);
        assert!(
            state
                .try_get_location(GridPos::new(1, 0))
                .is_some_and(|loc| loc.discovered)
        );
    }

    #[test]
    fn settlement_visit_feeds_then_cooldown_suppresses_the_return() {
        let mut state = scripted_state(LocationKind::Settlement);
        state.try_move(Direction::East).unwrap();
        // 25 starting food, minus 1 move cost, plus 20 settlement gain.
        assert!((state.supplies.food - 44.0).abs() < f32::EPSILON);
        let cooldown = state
            .try_get_location(GridPos::new(1, 0))
            .map(|loc| loc.cooldown_remaining);
        assert_eq!(cooldown, Some(state.cfg.event_cooldown));

        // Step off and straight back: two moves, cooldown 3 -> still armed.
        state.try_move(Direction::West).unwrap();
        let food_before = state.supplies.food;
        state.try_move(Direction::East).unwrap();
        assert!((state.supplies.food - (food_before - 1.0)).abs() < f32::EPSILON);
        let cooldown = state
            .try_get_location(GridPos::new(1, 0))
            .map(|loc| loc.cooldown_remaining);
        // Armed at 3, ticked once per subsequent move.
        assert_eq!(cooldown, Some(1));
    }

    #[test]
    fn settlement_retriggers_after_cooldown_expires() {
        let mut state = scripted_state(LocationKind::Settlement);
        state.try_move(Direction::East).unwrap();
        // Shuttle until the cooldown has fully elapsed on the global clock.
        state.try_move(Direction::West).unwrap();
        state.try_move(Direction::East).unwrap();
        state.try_move(Direction::West).unwrap();
        let food_before = state.supplies.food;
        state.try_move(Direction::East).unwrap();
        let gained = state.supplies.food - food_before;
        assert!((gained - 19.0).abs() < f32::EPSILON, "gained {gained}");
    }

    #[test]
    fn every_cooldown_ticks_once_per_successful_move() {
        let mut state = scripted_state(LocationKind::Settlement);
        let far = GridPos::new(0, 3);
        state.world.insert_if_absent(GridLocation::new(
            far,
            LocationKind::GasStation,
            Terrain::Plains,
        ));
        if let Some(loc) = state.world.get_mut(far) {
            loc.start_cooldown(5);
        }
        state.try_move(Direction::East).unwrap();
        // The far-away station cooled down too; the clock is global.
        assert_eq!(state.world.get(far).map(|l| l.cooldown_remaining), Some(4));
    }

    #[test]
    fn first_visit_expands_frontier_exactly_once() {
        let mut state = scripted_state(LocationKind::Empty);
        state.try_move(Direction::East).unwrap();
        assert!(state.world.is_visited(GridPos::new(1, 0)));
        let len_after_first = state.world.len();
        state.try_move(Direction::West).unwrap();
        state.try_move(Direction::East).unwrap();
        // Revisit generated nothing; only the origin's own first occupancy
        // could have added cells in between.
        assert!(state.world.len() >= len_after_first);
        let report = state.try_move(Direction::West).unwrap();
        assert!(!report.first_visit);
    }

    #[test]
    fn reaching_the_destination_wins_even_with_zeroed_supplies() {
        let cfg = test_config();
        let mut state = GameState::with_destination(cfg, 5, GridPos::new(1, 0));
        if let Some(loc) = state.world.get_mut(GridPos::new(1, 0)) {
            loc.kind = LocationKind::Destination;
        }
        state.supplies.fuel = 1.0; // hits exactly zero on arrival
        let report = state.try_move(Direction::East).unwrap();
        assert_eq!(report.ending, Some(Ending::Victory));
        assert!(state.supplies.fuel.abs() < f32::EPSILON);
        assert!(state.is_over());
        assert!(state.logs.iter().any(|l| l == "log.ending.victory"));
    }

    #[test]
    fn running_out_of_fuel_loses_the_journey() {
        let mut state = scripted_state(LocationKind::Empty);
        state.supplies.fuel = 1.0;
        let report = state.try_move(Direction::East).unwrap();
        assert_eq!(report.ending, Some(Ending::Defeat(DefeatCause::OutOfFuel)));
        assert!(state.is_over());
    }

    #[test]
    fn running_out_of_days_loses_the_journey() {
        let mut state = scripted_state(LocationKind::Empty);
        state.supplies.remaining_days = 1;
        let report = state.try_move(Direction::East).unwrap();
        assert_eq!(report.ending, Some(Ending::Defeat(DefeatCause::OutOfDays)));
    }

    #[test]
    fn trap_can_push_days_negative_and_end_the_journey() {
        let mut state = scripted_state(LocationKind::Trap);
        state.cfg.trap_time_penalty = 3;
        state.supplies.remaining_days = 2;
        let report = state.try_move(Direction::East).unwrap();
        assert_eq!(report.event, Some("log.trap.sprung"));
        // One move day plus the penalty: 2 - 1 - 3.
        assert_eq!(state.supplies.remaining_days, -2);
        assert_eq!(report.ending, Some(Ending::Defeat(DefeatCause::OutOfDays)));
    }

    #[test]
    fn no_moves_are_accepted_after_the_ending() {
        let mut state = scripted_state(LocationKind::Empty);
        state.supplies.fuel = 1.0;
        state.try_move(Direction::East).unwrap();
        assert!(state.is_over());
        assert_eq!(state.try_move(Direction::West), Err(MoveBlocked::JourneyOver));
    }

    #[test]
    fn apply_config_clamps_supplies_and_preserves_spent_days() {
        let mut state = scripted_state(LocationKind::Empty);
        state.try_move(Direction::East).unwrap();
        state.try_move(Direction::West).unwrap();
        assert_eq!(state.days_elapsed, 2);
        state.supplies.fuel = 40.0;

        let new_cfg = GameConfig {
            initial_fuel: 10.0,
            initial_food: 10.0,
            distance_multiplier: 2.0,
            extra_days: 1,
            ..test_config()
        };
        let distance = state.initial_distance;
        state.apply_config(new_cfg);
        // Clamped to 1.5x the new starting values.
        assert!((state.supplies.fuel - 15.0).abs() < f32::EPSILON);
        assert!(state.supplies.food <= 15.0);
        // New budget minus the two days already spent.
        assert_eq!(
            state.supplies.remaining_days,
            state.cfg.day_budget(distance) - 2
        );
        assert!(state.logs.iter().any(|l| l == "log.config.applied"));
    }

    #[test]
    fn apply_config_never_leaves_less_than_one_day() {
        let mut state = scripted_state(LocationKind::Empty);
        state.days_elapsed = 500;
        state.apply_config(test_config());
        assert_eq!(state.supplies.remaining_days, 1);
    }

    #[test]
    fn restart_rebuilds_the_same_world_for_the_same_seed() {
        let cfg = GameConfig::default();
        let mut state = GameState::new(cfg.clone(), 1234);
        let fresh = GameState::new(cfg, 1234);
        assert_eq!(state.destination, fresh.destination);

        state.try_move(Direction::East).ok();
        state.add_coins(7);
        state.restart();
        assert_eq!(state.player, GridPos::ORIGIN);
        assert_eq!(state.total_coins(), 0);
        assert_eq!(state.destination, fresh.destination);
        assert_eq!(state.world.len(), fresh.world.len());
        assert!(!state.is_over());
    }

    #[test]
    fn coin_ledger_accessors_roundtrip() {
        let mut state = scripted_state(LocationKind::Empty);
        assert_eq!(state.total_coins(), 0);
        state.add_coins(25);
        state.add_coins(5);
        assert_eq!(state.total_coins(), 30);
    }
}
