//! Deterministic headless simulation harness.
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use roadtrip_game::{GameConfig, GameState, MoveBlocked};

use crate::logic::policy::NavigationPolicy;
use crate::logic::reports::{JourneyOutcome, JourneyRecord};

/// Configuration for one simulated journey.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub seed: u64,
    pub policy: NavigationPolicy,
    pub max_moves: u32,
}

impl SimulationConfig {
    #[must_use]
    pub const fn new(seed: u64, policy: NavigationPolicy) -> Self {
        Self {
            seed,
            policy,
            max_moves: 500,
        }
    }

    #[must_use]
    pub const fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }
}

/// Drives one journey through the public move API until it ends, the policy
/// has nowhere to go, or the move cap trips.
pub struct SimulationSession {
    state: GameState,
    sim: SimulationConfig,
    policy_rng: ChaCha20Rng,
}

impl SimulationSession {
    #[must_use]
    pub fn new(game_cfg: GameConfig, sim: SimulationConfig) -> Self {
        Self {
            state: GameState::new(game_cfg, sim.seed),
            policy_rng: ChaCha20Rng::seed_from_u64(sim.seed),
            sim,
        }
    }

    /// Run the journey to completion and summarize it.
    pub fn run(mut self) -> JourneyRecord {
        let mut outcome = JourneyOutcome::Stalled;
        while self.state.moves_made < self.sim.max_moves {
            if let Some(ending) = self.state.ending {
                outcome = JourneyOutcome::from(ending);
                break;
            }
            let Some(direction) = self.sim.policy.choose(&self.state, &mut self.policy_rng)
            else {
                log::warn!("seed {}: no charted neighbor to step onto", self.sim.seed);
                break;
            };
            match self.state.try_move(direction) {
                Ok(report) => {
                    log::debug!(
                        "seed {} move {}: {} -> {}{}",
                        self.sim.seed,
                        self.state.moves_made,
                        direction,
                        report.position,
                        report.event.map(|e| format!(" [{e}]")).unwrap_or_default()
                    );
                }
                Err(MoveBlocked::NotEnoughFuel | MoveBlocked::NotEnoughFood) => {
                    // Supplies too thin to move but not yet exhausted; the
                    // journey is unwinnable from here.
                    break;
                }
                Err(blocked) => {
                    log::warn!("seed {}: unexpected block: {blocked}", self.sim.seed);
                    break;
                }
            }
        }
        if let Some(ending) = self.state.ending {
            outcome = JourneyOutcome::from(ending);
        }

        JourneyRecord {
            seed: self.sim.seed,
            policy: self.sim.policy.as_str(),
            outcome,
            initial_distance: self.state.initial_distance,
            day_budget: self.state.day_budget,
            moves: self.state.moves_made,
            days_elapsed: self.state.days_elapsed,
            coins: self.state.total_coins(),
            fuel_left: self.state.supplies.fuel,
            food_left: self.state.supplies.food,
            cells_generated: self.state.world.len(),
        }
    }
}
