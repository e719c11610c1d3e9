//! Centralized log keys and structural tuning constants for the simulation.
//!
//! Numbers that belong to game balance live in [`crate::config::GameConfig`]
//! and can be reloaded at runtime; the values here shape the generator and
//! reconfiguration math themselves and only change through code review.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_JOURNEY_DISTANCE_PREFIX: &str = "log.journey.distance.";
pub(crate) const LOG_SETTLEMENT_FOOD: &str = "log.settlement.food";
pub(crate) const LOG_GAS_STATION_FUEL: &str = "log.gas-station.fuel";
pub(crate) const LOG_COIN_SPOT_PICKUP: &str = "log.coin-spot.pickup";
pub(crate) const LOG_GOLD_MINE_STRIKE: &str = "log.gold-mine.strike";
pub(crate) const LOG_TRAP_SPRUNG: &str = "log.trap.sprung";
pub(crate) const LOG_ENDING_VICTORY: &str = "log.ending.victory";
pub(crate) const LOG_ENDING_OUT_OF_DAYS: &str = "log.ending.out-of-days";
pub(crate) const LOG_ENDING_OUT_OF_FUEL: &str = "log.ending.out-of-fuel";
pub(crate) const LOG_ENDING_OUT_OF_FOOD: &str = "log.ending.out-of-food";
pub(crate) const LOG_CONFIG_APPLIED: &str = "log.config.applied";

// Frontier generation ------------------------------------------------------
// Spawn chance for an absent neighbor, biased toward the destination.
pub(crate) const FRONTIER_TOWARD_CHANCE: f32 = 0.8;
pub(crate) const FRONTIER_AWAY_CHANCE: f32 = 0.4;

// Category roll: half of all cells stay empty; the second draw splits the
// rest into settlement / gas station / coin spot / gold mine / trap.
pub(crate) const EMPTY_KIND_CHANCE: f32 = 0.5;
pub(crate) const SETTLEMENT_SPLIT: f32 = 0.25;
pub(crate) const GAS_STATION_SPLIT: f32 = 0.5;
pub(crate) const COIN_SPOT_SPLIT: f32 = 0.7;
pub(crate) const GOLD_MINE_SPLIT: f32 = 0.85;

// Reconfiguration ----------------------------------------------------------
// Carried fuel/food survive a config reload up to this multiple of the new
// starting values.
pub(crate) const RESOURCE_CLAMP_FACTOR: f32 = 1.5;
// A reload never leaves the player with less than one day on the clock.
pub(crate) const RECONFIG_MIN_REMAINING_DAYS: i32 = 1;
