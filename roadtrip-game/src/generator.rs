//! Procedural world generation: destination placement and frontier expansion.
use rand::Rng;
use smallvec::SmallVec;

use crate::config::GameConfig;
use crate::constants::{
    COIN_SPOT_SPLIT, EMPTY_KIND_CHANCE, FRONTIER_AWAY_CHANCE, FRONTIER_TOWARD_CHANCE,
    GAS_STATION_SPLIT, GOLD_MINE_SPLIT, SETTLEMENT_SPLIT,
};
use crate::grid::{Direction, GridLocation, GridPos, LocationKind, Terrain, WorldGrid};

/// Sample a destination: both coordinates are drawn independently from
/// `[-max_distance, max_distance]` until the Manhattan distance from the
/// origin lands inside `[min_distance, max_distance]`. Returns the
/// destination and that distance.
pub fn place_destination<R: Rng + ?Sized>(cfg: &GameConfig, rng: &mut R) -> (GridPos, i32) {
    let span = cfg.max_distance;
    loop {
        let x = rng.gen_range(-span..=span);
        let y = rng.gen_range(-span..=span);
        let candidate = GridPos::new(x, y);
        let distance = candidate.manhattan(GridPos::ORIGIN);
        if distance >= cfg.min_distance && distance <= cfg.max_distance {
            return (candidate, distance);
        }
    }
}

/// Generate the yet-unseen neighbors of `position`.
///
/// Each absent neighbor spawns with probability 0.8 when it lies toward the
/// destination and 0.4 otherwise. With `guarantee_one` the expansion first
/// forces one neighbor into existence, preferring a direction that reduces
/// the distance to the destination, so a freshly occupied cell always leaves
/// the player somewhere to go.
pub fn expand_frontier<R: Rng + ?Sized>(
    world: &mut WorldGrid,
    position: GridPos,
    destination: GridPos,
    guarantee_one: bool,
    frontier_rng: &mut R,
    category_rng: &mut R,
) {
    let toward = (destination.x - position.x, destination.y - position.y);

    if guarantee_one {
        let preferred: SmallVec<[Direction; 4]> = Direction::ALL
            .into_iter()
            .filter(|dir| dot(dir.offset(), toward) > 0)
            .collect();
        let forced = if preferred.is_empty() {
            Direction::ALL[frontier_rng.gen_range(0..Direction::ALL.len())]
        } else {
            preferred[frontier_rng.gen_range(0..preferred.len())]
        };
        spawn_if_absent(world, position.step(forced), category_rng);
    }

    for dir in Direction::ALL {
        let neighbor = position.step(dir);
        if world.contains(neighbor) {
            continue;
        }
        let chance = if dot(dir.offset(), toward) > 0 {
            FRONTIER_TOWARD_CHANCE
        } else {
            FRONTIER_AWAY_CHANCE
        };
        if frontier_rng.r#gen::<f32>() < chance {
            spawn_if_absent(world, neighbor, category_rng);
        }
    }
}

/// Roll the category of a freshly generated cell: half stay empty, the rest
/// split 25/25/20/15/15 between settlement, gas station, coin spot, gold
/// mine, and trap.
pub fn pick_location_kind<R: Rng + ?Sized>(rng: &mut R) -> LocationKind {
    if rng.r#gen::<f32>() < EMPTY_KIND_CHANCE {
        return LocationKind::Empty;
    }
    let roll = rng.r#gen::<f32>();
    if roll < SETTLEMENT_SPLIT {
        LocationKind::Settlement
    } else if roll < GAS_STATION_SPLIT {
        LocationKind::GasStation
    } else if roll < COIN_SPOT_SPLIT {
        LocationKind::CoinSpot
    } else if roll < GOLD_MINE_SPLIT {
        LocationKind::GoldMine
    } else {
        LocationKind::Trap
    }
}

fn spawn_if_absent<R: Rng + ?Sized>(world: &mut WorldGrid, position: GridPos, category_rng: &mut R) {
    if world.contains(position) {
        return;
    }
    let kind = pick_location_kind(category_rng);
    world.insert_if_absent(GridLocation::new(position, kind, Terrain::Plains));
}

const fn dot(a: (i32, i32), b: (i32, i32)) -> i32 {
    a.0 * b.0 + a.1 * b.1
}
