//! Error types for Dominion Forge

use crate::core::{CardType, PlayerId};
use crate::zones::DeckType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DominionError {
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("{card} not found in {zone:?} of player {player}")]
    CardNotInZone {
        card: CardType,
        zone: DeckType,
        player: PlayerId,
    },

    #[error("Supply pile for {0} is empty")]
    SupplyExhausted(CardType),

    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("Illegal choice: {0}")]
    IllegalAction(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DominionError>;
