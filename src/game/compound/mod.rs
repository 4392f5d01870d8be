//! Cards whose effect is an extended action sequence
//!
//! The set is closed: each kind is one variant, and dispatch is a `match`
//! rather than a type check on the incoming action.

pub mod artisan;
pub mod militia;
pub mod upgrade;

pub use artisan::Artisan;
pub use militia::{Militia, Victim};
pub use upgrade::{CardFilter, UpgradeRule, UpgradeTrade};

use crate::core::{CardType, PlayerId};
use crate::game::sequence::{ExtendedSequence, SequenceState};
use crate::game::{Action, GameState};
use crate::Result;
use serde::{Deserialize, Serialize};

/// A compound action together with its progress record
///
/// Equality and hashing cover the kind, the acting player and every progress
/// field, so two pending sequences compare equal exactly when they would
/// behave identically from here on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundAction {
    UpgradeTrade(UpgradeTrade),
    Artisan(Artisan),
    Militia(Militia),
}

impl CompoundAction {
    /// The not-yet-started effect of `card` played by `player`, if `card` has one
    pub fn for_card(card: CardType, player: PlayerId) -> Option<Self> {
        match card {
            CardType::Mine | CardType::Remodel => {
                UpgradeTrade::new(card, player).map(CompoundAction::UpgradeTrade)
            }
            CardType::Artisan => Some(CompoundAction::Artisan(Artisan::new(player))),
            CardType::Militia => Some(CompoundAction::Militia(Militia::new(player))),
            _ => None,
        }
    }

    /// Card kind this effect belongs to
    pub fn kind(&self) -> CardType {
        match self {
            CompoundAction::UpgradeTrade(trade) => trade.kind(),
            CompoundAction::Artisan(_) => CardType::Artisan,
            CompoundAction::Militia(_) => CardType::Militia,
        }
    }

    /// The player who played the card
    pub fn player(&self) -> PlayerId {
        match self {
            CompoundAction::UpgradeTrade(trade) => trade.player(),
            CompoundAction::Artisan(artisan) => artisan.player(),
            CompoundAction::Militia(militia) => militia.player(),
        }
    }

    /// Run the entry test and register as active owner if more steps follow
    pub fn start(mut self, state: &mut GameState) -> Result<bool> {
        let more_steps = self.execute(state)?;
        if more_steps {
            state.set_action_in_progress(self);
        }
        Ok(more_steps)
    }

    fn as_sequence(&self) -> &dyn ExtendedSequence {
        match self {
            CompoundAction::UpgradeTrade(trade) => trade,
            CompoundAction::Artisan(artisan) => artisan,
            CompoundAction::Militia(militia) => militia,
        }
    }

    fn as_sequence_mut(&mut self) -> &mut dyn ExtendedSequence {
        match self {
            CompoundAction::UpgradeTrade(trade) => trade,
            CompoundAction::Artisan(artisan) => artisan,
            CompoundAction::Militia(militia) => militia,
        }
    }
}

impl ExtendedSequence for CompoundAction {
    fn execute(&mut self, state: &mut GameState) -> Result<bool> {
        self.as_sequence_mut().execute(state)
    }

    fn follow_on_actions(&self, state: &GameState) -> Vec<Action> {
        self.as_sequence().follow_on_actions(state)
    }

    fn current_player(&self, state: &GameState) -> PlayerId {
        self.as_sequence().current_player(state)
    }

    fn register_action_taken(&mut self, state: &GameState, action: &Action) {
        self.as_sequence_mut().register_action_taken(state, action)
    }

    fn progress(&self) -> (usize, usize) {
        self.as_sequence().progress()
    }

    fn execution_complete(&self) -> bool {
        self.as_sequence().execution_complete()
    }

    fn sequence_state(&self) -> SequenceState {
        self.as_sequence().sequence_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_for_card() {
        let p0 = PlayerId::new(0);
        for card in [
            CardType::Mine,
            CardType::Remodel,
            CardType::Artisan,
            CardType::Militia,
        ] {
            let compound = CompoundAction::for_card(card, p0).unwrap();
            assert_eq!(compound.kind(), card);
            assert_eq!(compound.player(), p0);
            assert_eq!(compound.sequence_state(), SequenceState::NotStarted);
        }
        assert!(CompoundAction::for_card(CardType::Gold, p0).is_none());
    }

    #[test]
    fn test_kind_is_part_of_identity() {
        let p0 = PlayerId::new(0);
        let mine = CompoundAction::for_card(CardType::Mine, p0).unwrap();
        let remodel = CompoundAction::for_card(CardType::Remodel, p0).unwrap();
        assert_ne!(mine, remodel);

        let keys: FxHashSet<_> = [mine.clone(), remodel, mine].into_iter().collect();
        assert_eq!(keys.len(), 2);
    }
}
