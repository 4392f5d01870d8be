//! Zero controller for testing and automation
//!
//! Always chooses the first available action. Menus list candidates in
//! zone and supply order, so this gives a deterministic line of play.

use crate::core::PlayerId;
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::Action;

/// A controller that always chooses the first available action (index 0)
pub struct ZeroController {
    player_id: PlayerId,
}

impl ZeroController {
    pub fn new(player_id: PlayerId) -> Self {
        ZeroController { player_id }
    }
}

impl PlayerController for ZeroController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_action(&mut self, _view: &GameStateView, available_actions: &[Action]) -> Action {
        available_actions
            .first()
            .cloned()
            .unwrap_or(Action::DoNothing)
    }
}
