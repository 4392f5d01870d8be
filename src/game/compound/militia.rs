//! Militia: +2 coins, then each opponent discards down to 3 cards
//!
//! The choices here belong to the opponents, one at a time in turn order
//! starting to the acting player's left.

use crate::core::PlayerId;
use crate::game::sequence::{menu_from, ExtendedSequence, Step};
use crate::game::{Action, GameState};
use crate::zones::DeckType;
use crate::Result;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub const MILITIA_COINS: u32 = 2;
pub const MILITIA_HAND_LIMIT: usize = 3;

/// An opponent under attack and the discards they still owe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Victim {
    pub player: PlayerId,
    pub discards_left: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Militia {
    player: PlayerId,
    /// Resolved when the attack is declared; victims are fixed from then on
    attacked: Step,
    victims: SmallVec<[Victim; 4]>,
}

impl Militia {
    pub fn new(player: PlayerId) -> Self {
        Militia {
            player,
            attacked: Step::Pending,
            victims: SmallVec::new(),
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn victims(&self) -> &[Victim] {
        &self.victims
    }

    /// The opponent who is currently discarding
    pub fn current_victim(&self) -> Option<&Victim> {
        self.victims.iter().find(|v| v.discards_left > 0)
    }

    fn current_victim_mut(&mut self) -> Option<&mut Victim> {
        self.victims.iter_mut().find(|v| v.discards_left > 0)
    }
}

impl ExtendedSequence for Militia {
    fn execute(&mut self, state: &mut GameState) -> Result<bool> {
        state.get_player_mut(self.player)?.add_coins(MILITIA_COINS);

        self.victims = state
            .opponents_in_turn_order(self.player)
            .into_iter()
            .map(|opponent| Victim {
                player: opponent,
                discards_left: state
                    .zone_contents(DeckType::Hand, opponent)
                    .len()
                    .saturating_sub(MILITIA_HAND_LIMIT) as u32,
            })
            .collect();
        self.attacked.resolve(());

        Ok(self.current_victim().is_some())
    }

    fn follow_on_actions(&self, state: &GameState) -> Vec<Action> {
        let victim = match self.current_victim() {
            Some(victim) => victim.player,
            None => panic!(
                "follow-on actions requested for a completed Militia (player {})",
                self.player
            ),
        };
        menu_from(
            state
                .zone_contents(DeckType::Hand, victim)
                .iter()
                .map(|&card| Action::DiscardCard {
                    player: victim,
                    card,
                }),
        )
    }

    fn current_player(&self, _state: &GameState) -> PlayerId {
        self.current_victim()
            .map(|victim| victim.player)
            .unwrap_or(self.player)
    }

    fn register_action_taken(&mut self, _state: &GameState, action: &Action) {
        assert!(
            !self.execution_complete(),
            "Militia (player {}) notified of {action} after completion",
            self.player
        );
        let Some(victim) = self.current_victim_mut() else {
            return;
        };
        match action {
            Action::DiscardCard { player, .. } if *player == victim.player => {
                victim.discards_left -= 1;
            }
            // Nothing left to discard: this victim is done
            Action::DoNothing => victim.discards_left = 0,
            _ => {}
        }
    }

    fn progress(&self) -> (usize, usize) {
        let victims_done = self
            .victims
            .iter()
            .filter(|v| v.discards_left == 0)
            .count();
        (
            usize::from(self.attacked.is_done()) + victims_done,
            1 + self.victims.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardType;
    use crate::game::sequence::SequenceState;

    fn three_player_game(hands: [&[CardType]; 3]) -> GameState {
        let mut game = GameState::new(&["Alice", "Bob", "Carol"]);
        for (idx, hand) in hands.iter().enumerate() {
            for &card in hand.iter() {
                game.add_card(DeckType::Hand, PlayerId::from(idx), card).unwrap();
            }
        }
        game
    }

    #[test]
    fn test_militia_delegates_to_opponents_in_order() {
        use CardType::*;
        let mut game = three_player_game([
            &[],
            &[Copper, Copper, Estate, Silver, Gold],
            &[Copper, Copper, Copper, Estate],
        ]);
        let (p0, p1, p2) = (PlayerId::new(0), PlayerId::new(1), PlayerId::new(2));

        let mut militia = super::Militia::new(PlayerId::new(0));
        assert_eq!(militia.sequence_state(), SequenceState::NotStarted);
        assert!(militia.execute(&mut game).unwrap());
        assert_eq!(game.get_player(p0).unwrap().coins, 2);
        assert_eq!(militia.sequence_state(), SequenceState::InProgress);

        assert_eq!(
            militia.victims(),
            &[
                Victim {
                    player: p1,
                    discards_left: 2
                },
                Victim {
                    player: p2,
                    discards_left: 1
                },
            ]
        );
        assert_eq!(militia.current_player(&game), p1);
        assert_eq!(militia.follow_on_actions(&game).len(), 4);

        let discard = |player, card| Action::DiscardCard { player, card };
        militia.register_action_taken(&game, &discard(p1, Copper));
        assert_eq!(militia.current_player(&game), p1);
        // A discard by someone who is not up yet does not count
        militia.register_action_taken(&game, &discard(p2, Copper));
        militia.register_action_taken(&game, &discard(p1, Estate));
        assert_eq!(militia.current_player(&game), p2);

        militia.register_action_taken(&game, &discard(p2, Estate));
        assert!(militia.execution_complete());
        assert_eq!(militia.current_player(&game), p0);
    }

    #[test]
    fn test_militia_small_hands_resolve_immediately() {
        use CardType::*;
        let mut game = three_player_game([&[], &[Copper, Copper, Copper], &[Estate]]);

        let mut militia = super::Militia::new(PlayerId::new(1));
        assert!(!militia.execute(&mut game).unwrap());
        assert!(militia.execution_complete());
        assert_eq!(game.get_player(PlayerId::new(1)).unwrap().coins, 2);

        // Victims are listed starting to the left of the attacker
        let order: Vec<_> = militia.victims().iter().map(|v| v.player).collect();
        assert_eq!(order, vec![PlayerId::new(2), PlayerId::new(0)]);
    }
}
