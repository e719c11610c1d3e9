//! Navigation policies driving the player through the public move API.
use clap::ValueEnum;
use rand::Rng;

use roadtrip_game::{Direction, GameState};

/// How the simulated player picks its next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NavigationPolicy {
    /// Step onto the charted neighbor closest to the destination.
    Greedy,
    /// Step onto a uniformly random charted neighbor.
    Wander,
}

impl NavigationPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::Wander => "wander",
        }
    }

    /// Pick the next move, or `None` when no charted neighbor exists.
    /// Ties between equally good directions are broken with the injected RNG
    /// so runs stay reproducible under a fixed seed.
    pub fn choose<R: Rng + ?Sized>(self, state: &GameState, rng: &mut R) -> Option<Direction> {
        let charted: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|d| state.try_get_location(state.player.step(*d)).is_some())
            .collect();
        if charted.is_empty() {
            return None;
        }
        match self {
            Self::Wander => Some(charted[rng.gen_range(0..charted.len())]),
            Self::Greedy => {
                let best = charted
                    .iter()
                    .map(|d| state.player.step(*d).manhattan(state.destination))
                    .min()?;
                let candidates: Vec<Direction> = charted
                    .into_iter()
                    .filter(|d| state.player.step(*d).manhattan(state.destination) == best)
                    .collect();
                Some(candidates[rng.gen_range(0..candidates.len())])
            }
        }
    }
}
