//! Random controller for testing and rollouts
//!
//! Picks uniformly among the offered actions.

use crate::core::PlayerId;
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::Action;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A controller that makes random choices
///
/// The RNG is a concrete, seedable type so a controller can move into a
/// rollout worker thread.
pub struct RandomController {
    player_id: PlayerId,
    rng: ChaCha8Rng,
}

impl RandomController {
    /// Create a random controller seeded from system entropy
    pub fn new(player_id: PlayerId) -> Self {
        RandomController {
            player_id,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Create a random controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self {
        RandomController {
            player_id,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl PlayerController for RandomController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_action(&mut self, _view: &GameStateView, available_actions: &[Action]) -> Action {
        if available_actions.is_empty() {
            return Action::DoNothing;
        }
        let index = self.rng.gen_range(0..available_actions.len());
        available_actions[index].clone()
    }
}
