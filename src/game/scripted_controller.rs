//! Scripted player controller for testing
//!
//! Replays a predetermined list of actions verbatim, whether or not they are
//! on the menu, which makes it the tool for exercising illegal choices.

use crate::core::PlayerId;
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::Action;

/// A controller that follows a predetermined sequence of actions
pub struct ScriptedController {
    player_id: PlayerId,
    actions: Vec<Action>,
    current_step: usize,
}

impl ScriptedController {
    pub fn new(player_id: PlayerId, actions: Vec<Action>) -> Self {
        ScriptedController {
            player_id,
            actions,
            current_step: 0,
        }
    }

    /// Number of scripted actions not yet used
    pub fn remaining(&self) -> usize {
        self.actions.len() - self.current_step
    }
}

impl PlayerController for ScriptedController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn choose_action(&mut self, _view: &GameStateView, _available_actions: &[Action]) -> Action {
        match self.actions.get(self.current_step) {
            Some(action) => {
                self.current_step += 1;
                action.clone()
            }
            // Script exhausted
            None => Action::DoNothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardType;
    use crate::game::GameState;

    #[test]
    fn test_scripted_controller() {
        let game = GameState::new_two_player("Alice", "Bob");
        let p0 = PlayerId::new(0);
        let view = GameStateView::new(&game, p0);

        let trash = Action::TrashCard {
            player: p0,
            card: CardType::Silver,
        };
        let mut controller = ScriptedController::new(p0, vec![trash.clone()]);
        assert_eq!(controller.remaining(), 1);

        assert_eq!(controller.choose_action(&view, &[Action::DoNothing]), trash);
        assert_eq!(controller.remaining(), 0);
        assert_eq!(controller.choose_action(&view, &[]), Action::DoNothing);
    }
}
