//! Fixed script controller for deterministic testing
//!
//! Follows a predetermined sequence of menu indices, making it ideal for
//! steering a sequence down one specific branch. Once the script is
//! exhausted it defaults to the first option (index 0).

use crate::core::PlayerId;
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::Action;
use serde::{Deserialize, Serialize};

/// A controller that follows a fixed script of choice indices
///
/// Out-of-range indices are clamped to the last option. The controller is
/// serializable so scenario files can carry it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedScriptController {
    player_id: PlayerId,
    /// The predetermined sequence of choice indices
    script: Vec<usize>,
    /// Current position in the script
    pub current_index: usize,
}

impl FixedScriptController {
    /// Create a new scripted controller with a predetermined sequence of choices
    ///
    /// # Example
    /// ```
    /// use dominion_forge_rs::game::FixedScriptController;
    /// use dominion_forge_rs::core::PlayerId;
    ///
    /// let controller = FixedScriptController::new(
    ///     PlayerId::new(0),
    ///     vec![0, 1, 2, 0]  // Will choose options 0, 1, 2, 0, then default to 0
    /// );
    /// assert!(!controller.is_exhausted());
    /// ```
    pub fn new(player_id: PlayerId, script: Vec<usize>) -> Self {
        FixedScriptController {
            player_id,
            script,
            current_index: 0,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_index >= self.script.len()
    }

    /// Next index from the script, or 0 once it is exhausted
    fn next_choice(&mut self) -> usize {
        if self.current_index < self.script.len() {
            let choice = self.script[self.current_index];
            self.current_index += 1;
            choice
        } else {
            // Script exhausted, default to 0
            0
        }
    }
}

impl PlayerController for FixedScriptController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_action(&mut self, view: &GameStateView, available_actions: &[Action]) -> Action {
        if available_actions.is_empty() {
            return Action::DoNothing;
        }
        if available_actions.len() == 1 {
            // No choice to make; don't consume the script
            return available_actions[0].clone();
        }

        let choice_index = self.next_choice();
        let clamped_index = choice_index.min(available_actions.len() - 1);
        if choice_index != clamped_index {
            view.logger().controller_choice(
                "SCRIPT",
                &format!(
                    "chose {} (clamped from {}) out of choices 0-{}",
                    clamped_index,
                    choice_index,
                    available_actions.len() - 1
                ),
            );
        } else {
            view.logger().controller_choice(
                "SCRIPT",
                &format!(
                    "chose {} out of choices 0-{}",
                    choice_index,
                    available_actions.len() - 1
                ),
            );
        }
        available_actions[clamped_index].clone()
    }
}
