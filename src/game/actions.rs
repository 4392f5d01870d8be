//! Game actions and mechanics
//!
//! `Action` is the closed set of choices a player can make: playing a card
//! with an extended effect, or one of the atomic sub-decisions those effects
//! offer. Actions are plain values; executing one never mutates it.

use crate::core::{CardType, PlayerId};
use crate::game::compound::CompoundAction;
use crate::game::GameState;
use crate::zones::DeckType;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play an action card from hand and start its effect
    PlayCard(CompoundAction),

    /// Move a card from hand to the trash
    TrashCard { player: PlayerId, card: CardType },

    /// Take a card from the supply into one of the player's zones
    GainCard {
        player: PlayerId,
        card: CardType,
        destination: DeckType,
    },

    /// Move a card from hand to the discard pile
    DiscardCard { player: PlayerId, card: CardType },

    /// Put a card from hand on top of the draw pile
    TopdeckCard { player: PlayerId, card: CardType },

    /// Pass: no effect
    DoNothing,
}

impl Action {
    /// The player performing the action (None for `DoNothing`)
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Action::PlayCard(compound) => Some(compound.player()),
            Action::TrashCard { player, .. }
            | Action::GainCard { player, .. }
            | Action::DiscardCard { player, .. }
            | Action::TopdeckCard { player, .. } => Some(*player),
            Action::DoNothing => None,
        }
    }

    /// Execute the action against `state`
    ///
    /// Returns true if the action registered itself as a new active sequence.
    pub fn execute(&self, state: &mut GameState) -> Result<bool> {
        match self {
            Action::PlayCard(compound) => {
                state.play_card(compound.player(), compound.kind())?;
                compound.clone().start(state)
            }
            Action::TrashCard { player, card } => {
                state.move_card(*card, DeckType::Hand, DeckType::Trash, *player)?;
                Ok(false)
            }
            Action::GainCard {
                player,
                card,
                destination,
            } => {
                state.gain_card(*player, *card, *destination)?;
                Ok(false)
            }
            Action::DiscardCard { player, card } => {
                state.move_card(*card, DeckType::Hand, DeckType::Discard, *player)?;
                Ok(false)
            }
            Action::TopdeckCard { player, card } => {
                state.move_card(*card, DeckType::Hand, DeckType::Draw, *player)?;
                Ok(false)
            }
            Action::DoNothing => Ok(false),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::PlayCard(compound) => {
                write!(f, "Player {} plays {}", compound.player(), compound.kind())
            }
            Action::TrashCard { player, card } => write!(f, "Player {player} trashes {card}"),
            Action::GainCard {
                player,
                card,
                destination,
            } => write!(f, "Player {player} gains {card} to {destination:?}"),
            Action::DiscardCard { player, card } => write!(f, "Player {player} discards {card}"),
            Action::TopdeckCard { player, card } => {
                write!(f, "Player {player} puts {card} on their deck")
            }
            Action::DoNothing => f.write_str("Do nothing"),
        }
    }
}
