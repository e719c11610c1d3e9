//! Tunable balance parameters, reloadable at runtime.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::Terrain;

/// Validation failures for a [`GameConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("config JSON parse error: {0}")]
    Parse(String),
    #[error("min_distance must be at least 1 (got {0})")]
    MinDistanceTooSmall(i32),
    #[error("max_distance {max} must not be below min_distance {min}")]
    DistanceBoundsInverted { min: i32, max: i32 },
    #[error("distance_multiplier must be positive (got {0})")]
    NonPositiveDistanceMultiplier(f32),
    #[error("extra_days must not be negative (got {0})")]
    NegativeExtraDays(i32),
    #[error("initial fuel and food must be positive (got {fuel} / {food})")]
    NonPositiveSupplies { fuel: f32, food: f32 },
    #[error("terrain costs must be positive (got {fuel} / {food})")]
    NonPositiveTerrainCost { fuel: f32, food: f32 },
    #[error("trap penalties must not be negative")]
    NegativeTrapPenalty,
    #[error("reward values must not be negative")]
    NegativeReward,
}

/// Numeric parameters of the journey: day budget math, starting supplies,
/// event yields and penalties, destination distance bounds, and the
/// terrain-indexed movement cost table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GameConfig {
    /// Day budget is `ceil(initial_distance * distance_multiplier) + extra_days`.
    pub distance_multiplier: f32,
    pub extra_days: i32,
    pub initial_fuel: f32,
    pub initial_food: f32,
    /// Moves a location's effect stays suppressed after firing.
    pub event_cooldown: u32,
    pub settlement_food_gain: f32,
    pub gas_station_fuel_gain: f32,
    /// Rounded to whole coins when a gold mine is struck.
    pub gold_mine_gain: f32,
    pub coin_pickup_value: i32,
    pub trap_food_loss: f32,
    pub trap_time_penalty: i32,
    /// Manhattan distance bounds for destination placement, inclusive.
    pub min_distance: i32,
    pub max_distance: i32,
    pub plains_fuel_cost: f32,
    pub plains_food_cost: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            distance_multiplier: 1.5,
            extra_days: 5,
            initial_fuel: 30.0,
            initial_food: 25.0,
            event_cooldown: 3,
            settlement_food_gain: 20.0,
            gas_station_fuel_gain: 25.0,
            gold_mine_gain: 10.0,
            coin_pickup_value: 10,
            trap_food_loss: 8.0,
            trap_time_penalty: 1,
            min_distance: 8,
            max_distance: 12,
            plains_fuel_cost: 1.0,
            plains_food_cost: 1.0,
        }
    }
}

impl GameConfig {
    /// Parse and validate a configuration from JSON. Missing fields fall back
    /// to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or a parameter is out of
    /// range.
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_distance < 1 {
            return Err(ConfigError::MinDistanceTooSmall(self.min_distance));
        }
        if self.max_distance < self.min_distance {
            return Err(ConfigError::DistanceBoundsInverted {
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        if self.distance_multiplier <= 0.0 {
            return Err(ConfigError::NonPositiveDistanceMultiplier(
                self.distance_multiplier,
            ));
        }
        if self.extra_days < 0 {
            return Err(ConfigError::NegativeExtraDays(self.extra_days));
        }
        if self.initial_fuel <= 0.0 || self.initial_food <= 0.0 {
            return Err(ConfigError::NonPositiveSupplies {
                fuel: self.initial_fuel,
                food: self.initial_food,
            });
        }
        if self.plains_fuel_cost <= 0.0 || self.plains_food_cost <= 0.0 {
            return Err(ConfigError::NonPositiveTerrainCost {
                fuel: self.plains_fuel_cost,
                food: self.plains_food_cost,
            });
        }
        if self.trap_food_loss < 0.0 || self.trap_time_penalty < 0 {
            return Err(ConfigError::NegativeTrapPenalty);
        }
        if self.settlement_food_gain < 0.0
            || self.gas_station_fuel_gain < 0.0
            || self.gold_mine_gain < 0.0
            || self.coin_pickup_value < 0
        {
            return Err(ConfigError::NegativeReward);
        }
        Ok(())
    }

    /// Fuel cost of entering a cell with the given terrain.
    #[must_use]
    pub const fn fuel_cost(&self, terrain: Terrain) -> f32 {
        match terrain {
            Terrain::Plains => self.plains_fuel_cost,
        }
    }

    /// Food cost of entering a cell with the given terrain.
    #[must_use]
    pub const fn food_cost(&self, terrain: Terrain) -> f32 {
        match terrain {
            Terrain::Plains => self.plains_food_cost,
        }
    }

    /// Total days granted for a journey of the given initial distance.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn day_budget(&self, initial_distance: i32) -> i32 {
        (initial_distance as f32 * self.distance_multiplier).ceil() as i32 + self.extra_days
    }
}
