//! Artisan: gain a card costing up to 5 to hand, then put a card from hand
//! onto the draw pile

use crate::core::{CardType, PlayerId};
use crate::game::sequence::{menu_from, ExtendedSequence, Step};
use crate::game::{Action, GameState};
use crate::zones::DeckType;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Most expensive card Artisan can gain
pub const ARTISAN_GAIN_LIMIT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artisan {
    player: PlayerId,
    gained: Step,
    topdecked: Step,
}

impl Artisan {
    pub fn new(player: PlayerId) -> Self {
        Artisan {
            player,
            gained: Step::Pending,
            topdecked: Step::Pending,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn has_gained(&self) -> bool {
        self.gained.is_done()
    }

    pub fn has_topdecked(&self) -> bool {
        self.topdecked.is_done()
    }

    fn gainable(state: &GameState) -> Vec<CardType> {
        state.candidate_gains(|card| card.cost() <= ARTISAN_GAIN_LIMIT)
    }
}

impl ExtendedSequence for Artisan {
    fn execute(&mut self, state: &mut GameState) -> Result<bool> {
        let hand_empty = state.zone_contents(DeckType::Hand, self.player).is_empty();
        if hand_empty && Self::gainable(state).is_empty() {
            self.gained.resolve(());
            self.topdecked.resolve(());
            return Ok(false);
        }
        Ok(true)
    }

    fn follow_on_actions(&self, state: &GameState) -> Vec<Action> {
        let player = self.player;
        if self.gained.is_pending() {
            menu_from(Self::gainable(state).into_iter().map(|card| Action::GainCard {
                player,
                card,
                destination: DeckType::Hand,
            }))
        } else if self.topdecked.is_pending() {
            menu_from(
                state
                    .zone_contents(DeckType::Hand, player)
                    .iter()
                    .map(|&card| Action::TopdeckCard { player, card }),
            )
        } else {
            panic!("follow-on actions requested for a completed Artisan (player {player})");
        }
    }

    fn current_player(&self, _state: &GameState) -> PlayerId {
        self.player
    }

    fn register_action_taken(&mut self, _state: &GameState, action: &Action) {
        assert!(
            !self.execution_complete(),
            "Artisan (player {}) notified of {action} after completion",
            self.player
        );
        match (action, self.gained.is_done()) {
            (
                Action::GainCard {
                    player,
                    destination: DeckType::Hand,
                    ..
                },
                false,
            ) if *player == self.player => {
                self.gained.resolve(());
            }
            (Action::TopdeckCard { player, .. }, true) if *player == self.player => {
                self.topdecked.resolve(());
            }
            (Action::DoNothing, false) => {
                self.gained.resolve(());
            }
            (Action::DoNothing, true) => {
                self.topdecked.resolve(());
            }
            _ => {}
        }
    }

    fn progress(&self) -> (usize, usize) {
        let resolved = usize::from(self.gained.is_done()) + usize::from(self.topdecked.is_done());
        (resolved, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artisan_gain_then_topdeck() {
        let p0 = PlayerId::new(0);
        let mut game = GameState::new_two_player("Alice", "Bob");
        game.add_card(DeckType::Hand, p0, CardType::Estate).unwrap();
        game.supply.add_pile(CardType::Duchy, 8);
        game.supply.add_pile(CardType::Gold, 30);

        let mut artisan = Artisan::new(p0);
        assert!(artisan.execute(&mut game).unwrap());

        let gain_duchy = Action::GainCard {
            player: p0,
            card: CardType::Duchy,
            destination: DeckType::Hand,
        };
        assert_eq!(artisan.follow_on_actions(&game), vec![gain_duchy.clone()]);

        gain_duchy.execute(&mut game).unwrap();
        artisan.register_action_taken(&game, &gain_duchy);
        assert!(artisan.has_gained());

        let topdeck = |card| Action::TopdeckCard { player: p0, card };
        assert_eq!(
            artisan.follow_on_actions(&game),
            vec![topdeck(CardType::Estate), topdeck(CardType::Duchy)]
        );
        artisan.register_action_taken(&game, &topdeck(CardType::Estate));
        assert!(artisan.execution_complete());
    }

    #[test]
    fn test_artisan_nothing_to_do() {
        let mut game = GameState::new_two_player("Alice", "Bob");
        game.supply.add_pile(CardType::Province, 8);

        let mut artisan = Artisan::new(PlayerId::new(0));
        assert!(!artisan.execute(&mut game).unwrap());
        assert!(artisan.execution_complete());
    }

    #[test]
    fn test_artisan_pass_on_gain_still_topdecks() {
        let p0 = PlayerId::new(0);
        let mut game = GameState::new_two_player("Alice", "Bob");
        game.add_card(DeckType::Hand, p0, CardType::Copper).unwrap();

        let mut artisan = Artisan::new(p0);
        assert!(artisan.execute(&mut game).unwrap());
        assert_eq!(artisan.follow_on_actions(&game), vec![Action::DoNothing]);

        artisan.register_action_taken(&game, &Action::DoNothing);
        assert!(artisan.has_gained());
        assert!(!artisan.has_topdecked());
        assert_eq!(
            artisan.follow_on_actions(&game),
            vec![Action::TopdeckCard {
                player: p0,
                card: CardType::Copper
            }]
        );
    }
}
