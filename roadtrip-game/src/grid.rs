//! Grid primitives: positions, directions, and the world map of generated cells.
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Integer coordinate on the unbounded world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// Starting cell of every journey.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another cell.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Neighboring cell one step in the given direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four axis-aligned movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit offset of this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Self::North),
            "east" => Ok(Self::East),
            "south" => Ok(Self::South),
            "west" => Ok(Self::West),
            _ => Err(()),
        }
    }
}

/// Terrain of a cell. Only plains are active; the cost contract stays
/// terrain-indexed so further kinds slot in without touching call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    #[default]
    Plains,
}

/// What occupies a generated cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    #[default]
    Empty,
    Settlement,
    GasStation,
    Trap,
    Destination,
    CoinSpot,
    GoldMine,
}

impl LocationKind {
    /// Kinds consumed by their first visit.
    #[must_use]
    pub const fn is_single_use(self) -> bool {
        matches!(self, Self::CoinSpot | Self::GoldMine)
    }

    /// Whether this kind arms a cooldown after its event fires.
    /// Empty cells and the destination never enter cooldown.
    #[must_use]
    pub const fn holds_cooldown(self) -> bool {
        !matches!(self, Self::Empty | Self::Destination)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Settlement => "settlement",
            Self::GasStation => "gas_station",
            Self::Trap => "trap",
            Self::Destination => "destination",
            Self::CoinSpot => "coin_spot",
            Self::GoldMine => "gold_mine",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single generated cell of the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLocation {
    pub position: GridPos,
    pub kind: LocationKind,
    pub terrain: Terrain,
    pub discovered: bool,
    pub cooldown_remaining: u32,
}

impl GridLocation {
    #[must_use]
    pub const fn new(position: GridPos, kind: LocationKind, terrain: Terrain) -> Self {
        Self {
            position,
            kind,
            terrain,
            discovered: false,
            cooldown_remaining: 0,
        }
    }

    /// Effects are suppressed while the cooldown runs.
    #[must_use]
    pub const fn in_cooldown(&self) -> bool {
        self.cooldown_remaining > 0
    }

    pub const fn start_cooldown(&mut self, turns: u32) {
        self.cooldown_remaining = turns;
    }

    /// One tick of the global move clock, floored at zero.
    pub const fn tick_cooldown(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }
}

/// Sole owner of every generated cell, keyed by position, plus the set of
/// positions whose first occupancy already triggered frontier expansion.
/// `visited` is distinct from per-cell `discovered`: a cell is discovered the
/// moment the player occupies it, visited once its neighbors were generated.
#[derive(Debug, Clone, Default)]
pub struct WorldGrid {
    locations: HashMap<GridPos, GridLocation>,
    visited: HashSet<GridPos>,
}

impl WorldGrid {
    #[must_use]
    pub fn get(&self, position: GridPos) -> Option<&GridLocation> {
        self.locations.get(&position)
    }

    pub fn get_mut(&mut self, position: GridPos) -> Option<&mut GridLocation> {
        self.locations.get_mut(&position)
    }

    #[must_use]
    pub fn contains(&self, position: GridPos) -> bool {
        self.locations.contains_key(&position)
    }

    /// Insert a cell unless its position is already taken. Returns whether the
    /// cell was inserted; at most one location ever exists per position.
    pub fn insert_if_absent(&mut self, location: GridLocation) -> bool {
        if self.locations.contains_key(&location.position) {
            return false;
        }
        self.locations.insert(location.position, location);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridLocation> {
        self.locations.values()
    }

    /// Advance the world clock: every cell's cooldown drops by one.
    pub fn tick_cooldowns(&mut self) {
        for location in self.locations.values_mut() {
            location.tick_cooldown();
        }
    }

    #[must_use]
    pub fn is_visited(&self, position: GridPos) -> bool {
        self.visited.contains(&position)
    }

    /// Record first occupancy. Returns true when the position was not yet
    /// visited, i.e. exactly once per position.
    pub fn mark_visited(&mut self, position: GridPos) -> bool {
        self.visited.insert(position)
    }
}
