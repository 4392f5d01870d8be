//! Player controller trait and game state view
//!
//! The engine calls a controller whenever its player must pick from a menu,
//! handing it a read-only view of the game and the legal options.

use crate::core::{CardType, PlayerId};
use crate::game::compound::CompoundAction;
use crate::game::{Action, GameLogger, GameState};
use crate::zones::DeckType;

/// Read-only view of game state for controllers
pub struct GameStateView<'a> {
    game: &'a GameState,
    player_id: PlayerId,
}

impl<'a> GameStateView<'a> {
    /// Create a new view of the game state from a player's perspective
    pub fn new(game: &'a GameState, player_id: PlayerId) -> Self {
        GameStateView { game, player_id }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Cards in this player's hand
    pub fn hand(&self) -> &[CardType] {
        self.hand_of(self.player_id)
    }

    /// Cards in any player's hand
    pub fn hand_of(&self, player: PlayerId) -> &[CardType] {
        self.game.zone_contents(DeckType::Hand, player)
    }

    /// Cards left in the supply pile for `card`
    pub fn supply_count(&self, card: CardType) -> u32 {
        self.game.supply.count(card)
    }

    /// Coins this player has generated this turn
    pub fn coins(&self) -> u32 {
        self.game
            .get_player(self.player_id)
            .map(|p| p.coins)
            .unwrap_or(0)
    }

    /// The compound action the current menu belongs to, if any
    pub fn active_sequence(&self) -> Option<&CompoundAction> {
        self.game.active_sequence()
    }

    pub fn turn_player(&self) -> PlayerId {
        self.game.turn_player
    }

    pub fn player_name(&self, player: PlayerId) -> String {
        self.game.player_name(player)
    }

    /// The game's logger, for controllers that report their choices
    pub fn logger(&self) -> &GameLogger {
        &self.game.logger
    }
}

/// Player controller trait
///
/// Implement this trait to create AI players or scripted test players.
pub trait PlayerController {
    /// Get the player ID this controller is responsible for
    fn player_id(&self) -> PlayerId;

    /// Choose one of `available_actions`, which is never empty
    ///
    /// The engine rejects a returned action that is not in the list.
    fn choose_action(&mut self, view: &GameStateView, available_actions: &[Action]) -> Action;

    /// Called after any player's chosen action has been applied
    fn on_action_applied(&mut self, _view: &GameStateView, _action: &Action) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_reads_state() {
        let mut game = GameState::new_two_player("Alice", "Bob");
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        game.add_card(DeckType::Hand, p0, CardType::Mine).unwrap();
        game.add_card(DeckType::Hand, p1, CardType::Estate).unwrap();
        game.supply.add_pile(CardType::Gold, 4);

        let view = GameStateView::new(&game, p0);
        assert_eq!(view.player_id(), p0);
        assert_eq!(view.hand(), &[CardType::Mine]);
        assert_eq!(view.hand_of(p1), &[CardType::Estate]);
        assert_eq!(view.supply_count(CardType::Gold), 4);
        assert_eq!(view.supply_count(CardType::Silver), 0);
        assert_eq!(view.coins(), 0);
        assert!(view.active_sequence().is_none());
        assert_eq!(view.player_name(p1), "Bob");
    }
}
