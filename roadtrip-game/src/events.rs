//! Location events and their cooldown gate.
use crate::config::GameConfig;
use crate::constants::{
    LOG_COIN_SPOT_PICKUP, LOG_GAS_STATION_FUEL, LOG_GOLD_MINE_STRIKE, LOG_SETTLEMENT_FOOD,
    LOG_TRAP_SPRUNG,
};
use crate::grid::{GridLocation, LocationKind};
use crate::state::Supplies;

/// Apply the entered location's effect to the party supplies.
///
/// Nothing fires while the location is cooling down. Coin spots and gold
/// mines are consumed by their first visit and decay to empty cells, so they
/// never re-trigger; every other special kind re-arms its cooldown after
/// dispatch. Returns the log key of the fired event, if any.
pub fn trigger_location_event(
    location: &mut GridLocation,
    supplies: &mut Supplies,
    cfg: &GameConfig,
) -> Option<&'static str> {
    if location.in_cooldown() {
        return None;
    }

    #[allow(clippy::cast_possible_truncation)]
    let log_key = match location.kind {
        LocationKind::Settlement => {
            supplies.food += cfg.settlement_food_gain;
            Some(LOG_SETTLEMENT_FOOD)
        }
        LocationKind::GasStation => {
            supplies.fuel += cfg.gas_station_fuel_gain;
            Some(LOG_GAS_STATION_FUEL)
        }
        LocationKind::GoldMine => {
            supplies.coins += cfg.gold_mine_gain.round() as i32;
            location.kind = LocationKind::Empty;
            Some(LOG_GOLD_MINE_STRIKE)
        }
        LocationKind::CoinSpot => {
            supplies.coins += cfg.coin_pickup_value;
            location.kind = LocationKind::Empty;
            Some(LOG_COIN_SPOT_PICKUP)
        }
        LocationKind::Trap => {
            supplies.food -= cfg.trap_food_loss;
            supplies.remaining_days -= cfg.trap_time_penalty;
            Some(LOG_TRAP_SPRUNG)
        }
        LocationKind::Empty | LocationKind::Destination => None,
    };

    // The kind may have just decayed to Empty, which never cools down.
    if location.kind.holds_cooldown() {
        location.start_cooldown(cfg.event_cooldown);
    }
    log_key
}
