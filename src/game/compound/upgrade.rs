//! Trash-then-gain effects (Mine, Remodel)
//!
//! Both cards share the same two ordered steps: trash one qualifying card from
//! hand, then gain one qualifying card costing at most the trashed card's cost
//! plus a bonus. They differ only in their rule row.

use crate::core::{CardType, PlayerId};
use crate::game::sequence::{menu_from, ExtendedSequence, Step};
use crate::game::{Action, GameState};
use crate::zones::DeckType;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Which cards a step may act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFilter {
    Any,
    Treasure,
}

impl CardFilter {
    pub fn matches(self, card: CardType) -> bool {
        match self {
            CardFilter::Any => true,
            CardFilter::Treasure => card.is_treasure(),
        }
    }
}

/// Rule-table row for a trash-then-gain card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeRule {
    pub trash: CardFilter,
    pub gain: CardFilter,
    /// Added to the trashed card's cost to get the gain ceiling
    pub bonus: u32,
    pub destination: DeckType,
}

/// Trash a treasure, gain a treasure costing up to 3 more, to hand
pub const MINE_RULE: UpgradeRule = UpgradeRule {
    trash: CardFilter::Treasure,
    gain: CardFilter::Treasure,
    bonus: 3,
    destination: DeckType::Hand,
};

/// Trash a card, gain a card costing up to 2 more
pub const REMODEL_RULE: UpgradeRule = UpgradeRule {
    trash: CardFilter::Any,
    gain: CardFilter::Any,
    bonus: 2,
    destination: DeckType::Discard,
};

/// Progress of a Mine or Remodel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpgradeTrade {
    kind: CardType,
    player: PlayerId,
    /// Cost of the trashed card
    trashed: Step<u32>,
    gained: Step,
}

impl UpgradeTrade {
    /// Returns None unless `kind` is a trash-then-gain card
    pub fn new(kind: CardType, player: PlayerId) -> Option<Self> {
        match kind {
            CardType::Mine | CardType::Remodel => Some(UpgradeTrade {
                kind,
                player,
                trashed: Step::Pending,
                gained: Step::Pending,
            }),
            _ => None,
        }
    }

    pub fn mine(player: PlayerId) -> Self {
        UpgradeTrade {
            kind: CardType::Mine,
            player,
            trashed: Step::Pending,
            gained: Step::Pending,
        }
    }

    pub fn remodel(player: PlayerId) -> Self {
        UpgradeTrade {
            kind: CardType::Remodel,
            player,
            trashed: Step::Pending,
            gained: Step::Pending,
        }
    }

    pub fn kind(&self) -> CardType {
        self.kind
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn rule(&self) -> &'static UpgradeRule {
        match self.kind {
            CardType::Remodel => &REMODEL_RULE,
            _ => &MINE_RULE,
        }
    }

    pub fn has_trashed(&self) -> bool {
        self.trashed.is_done()
    }

    pub fn has_gained(&self) -> bool {
        self.gained.is_done()
    }

    /// Cost of the trashed card, once the trash step has resolved
    pub fn trashed_value(&self) -> Option<u32> {
        self.trashed.value()
    }

    /// Highest cost that may be gained, once the trash step has resolved
    pub fn gain_ceiling(&self) -> Option<u32> {
        self.trashed.value().map(|value| value + self.rule().bonus)
    }
}

impl ExtendedSequence for UpgradeTrade {
    fn execute(&mut self, state: &mut GameState) -> Result<bool> {
        let rule = self.rule();
        let has_target = state
            .zone_contents(DeckType::Hand, self.player)
            .iter()
            .any(|&card| rule.trash.matches(card));
        if has_target {
            return Ok(true);
        }
        // Nothing to trash: the whole effect is a no-op
        self.trashed.resolve(0);
        self.gained.resolve(());
        Ok(false)
    }

    fn follow_on_actions(&self, state: &GameState) -> Vec<Action> {
        let rule = self.rule();
        let player = self.player;
        if self.trashed.is_pending() {
            menu_from(
                state
                    .zone_contents(DeckType::Hand, player)
                    .iter()
                    .copied()
                    .filter(|&card| rule.trash.matches(card))
                    .map(|card| Action::TrashCard { player, card }),
            )
        } else if let (Step::Pending, Some(ceiling)) = (self.gained, self.gain_ceiling()) {
            menu_from(
                state
                    .candidate_gains(|card| rule.gain.matches(card) && card.cost() <= ceiling)
                    .into_iter()
                    .map(|card| Action::GainCard {
                        player,
                        card,
                        destination: rule.destination,
                    }),
            )
        } else {
            panic!(
                "follow-on actions requested for a completed {} (player {})",
                self.kind, self.player
            );
        }
    }

    fn current_player(&self, _state: &GameState) -> PlayerId {
        self.player
    }

    fn register_action_taken(&mut self, _state: &GameState, action: &Action) {
        assert!(
            !self.execution_complete(),
            "{} (player {}) notified of {action} after completion",
            self.kind,
            self.player
        );
        match (action, self.trashed.is_done()) {
            (Action::TrashCard { player, card }, false) if *player == self.player => {
                self.trashed.resolve(card.cost());
            }
            (Action::GainCard { player, .. }, true) if *player == self.player => {
                self.gained.resolve(());
            }
            // Passing on the trash step forfeits the gain as well
            (Action::DoNothing, false) => {
                self.trashed.resolve(0);
                self.gained.resolve(());
            }
            (Action::DoNothing, true) => {
                self.gained.resolve(());
            }
            _ => {}
        }
    }

    fn progress(&self) -> (usize, usize) {
        let resolved = [self.trashed.is_done(), self.gained.is_done()]
            .iter()
            .filter(|&&done| done)
            .count();
        (resolved, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::sequence::SequenceState;

    fn p0() -> PlayerId {
        PlayerId::new(0)
    }

    fn game(hand: &[CardType], supply: &[(CardType, u32)]) -> GameState {
        let mut game = GameState::new_two_player("Alice", "Bob");
        for &card in hand {
            game.add_card(DeckType::Hand, p0(), card).unwrap();
        }
        for &(card, count) in supply {
            game.supply.add_pile(card, count);
        }
        game
    }

    #[test]
    fn test_mine_without_treasure_is_noop() {
        let mut game = game(&[CardType::Estate, CardType::Remodel], &[(CardType::Gold, 5)]);
        let before = game.clone();
        let mut mine = UpgradeTrade::mine(p0());

        assert!(!mine.execute(&mut game).unwrap());
        assert!(mine.has_trashed());
        assert!(mine.has_gained());
        assert!(mine.execution_complete());
        assert_eq!(game.player_zones, before.player_zones);
        assert_eq!(game.supply, before.supply);
    }

    #[test]
    fn test_mine_trash_menu_is_deduplicated() {
        let mut game = game(
            &[CardType::Copper, CardType::Estate, CardType::Copper, CardType::Silver],
            &[],
        );
        let mut mine = UpgradeTrade::mine(p0());
        assert!(mine.execute(&mut game).unwrap());

        let menu = mine.follow_on_actions(&game);
        assert_eq!(
            menu,
            vec![
                Action::TrashCard {
                    player: p0(),
                    card: CardType::Copper
                },
                Action::TrashCard {
                    player: p0(),
                    card: CardType::Silver
                },
            ]
        );
    }

    #[test]
    fn test_mine_gain_ceiling() {
        let mut game = game(
            &[CardType::Silver],
            &[
                (CardType::Copper, 10),
                (CardType::Estate, 8),
                (CardType::Gold, 10),
                (CardType::Platinum, 10),
            ],
        );
        let mut mine = UpgradeTrade::mine(p0());
        mine.execute(&mut game).unwrap();
        mine.register_action_taken(
            &game,
            &Action::TrashCard {
                player: p0(),
                card: CardType::Silver,
            },
        );

        assert_eq!(mine.trashed_value(), Some(3));
        assert_eq!(mine.gain_ceiling(), Some(6));
        assert_eq!(mine.sequence_state(), SequenceState::InProgress);

        // Estate is cheap enough but not a treasure; Platinum is too expensive
        let gain = |card| Action::GainCard {
            player: p0(),
            card,
            destination: DeckType::Hand,
        };
        assert_eq!(
            mine.follow_on_actions(&game),
            vec![gain(CardType::Copper), gain(CardType::Gold)]
        );
    }

    #[test]
    fn test_first_trash_value_wins() {
        let game = game(&[], &[]);
        let mut mine = UpgradeTrade::mine(p0());

        mine.register_action_taken(
            &game,
            &Action::TrashCard {
                player: p0(),
                card: CardType::Copper,
            },
        );
        mine.register_action_taken(
            &game,
            &Action::TrashCard {
                player: p0(),
                card: CardType::Gold,
            },
        );

        assert_eq!(mine.trashed_value(), Some(0));
        assert!(!mine.has_gained());
    }

    #[test]
    fn test_ignores_other_players_and_out_of_order_steps() {
        let game = game(&[], &[]);
        let mut mine = UpgradeTrade::mine(p0());

        mine.register_action_taken(
            &game,
            &Action::TrashCard {
                player: PlayerId::new(1),
                card: CardType::Gold,
            },
        );
        mine.register_action_taken(
            &game,
            &Action::GainCard {
                player: p0(),
                card: CardType::Gold,
                destination: DeckType::Hand,
            },
        );

        assert_eq!(mine.sequence_state(), SequenceState::NotStarted);
    }

    #[test]
    fn test_remodel_gains_any_card_to_discard() {
        let mut game = game(
            &[CardType::Estate],
            &[(CardType::Silver, 10), (CardType::Duchy, 8), (CardType::Gold, 10)],
        );
        let mut remodel = UpgradeTrade::remodel(p0());
        assert!(remodel.execute(&mut game).unwrap());
        remodel.register_action_taken(
            &game,
            &Action::TrashCard {
                player: p0(),
                card: CardType::Estate,
            },
        );

        assert_eq!(remodel.gain_ceiling(), Some(4));
        assert_eq!(
            remodel.follow_on_actions(&game),
            vec![Action::GainCard {
                player: p0(),
                card: CardType::Silver,
                destination: DeckType::Discard,
            }]
        );
    }

    #[test]
    fn test_remodel_with_empty_hand_is_noop() {
        let mut game = game(&[], &[(CardType::Silver, 10)]);
        let mut remodel = UpgradeTrade::remodel(p0());
        assert!(!remodel.execute(&mut game).unwrap());
        assert_eq!(remodel.sequence_state(), SequenceState::Complete);
    }

    #[test]
    fn test_pass_on_trash_skips_gain() {
        let game = game(&[], &[(CardType::Silver, 10)]);
        let mut mine = UpgradeTrade::mine(p0());

        mine.register_action_taken(&game, &Action::DoNothing);

        assert!(mine.has_trashed());
        assert!(mine.has_gained());
        assert_eq!(mine.sequence_state(), SequenceState::Complete);
    }

    #[test]
    #[should_panic(expected = "after completion")]
    fn test_notify_after_completion_panics() {
        let mut game = game(&[], &[]);
        let mut mine = UpgradeTrade::mine(p0());
        mine.execute(&mut game).unwrap();
        mine.register_action_taken(&game, &Action::DoNothing);
    }

    #[test]
    #[should_panic(expected = "completed")]
    fn test_menu_after_completion_panics() {
        let mut game = game(&[], &[]);
        let mut mine = UpgradeTrade::mine(p0());
        mine.execute(&mut game).unwrap();
        mine.follow_on_actions(&game);
    }
}
