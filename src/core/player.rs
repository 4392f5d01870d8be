//! Player representation

use crate::core::{PlayerId, PlayerName};
use serde::{Deserialize, Serialize};

/// Per-turn resources of a player
///
/// Card zones live in [`crate::zones::PlayerZones`]; this only tracks the
/// counters that card effects adjust.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique ID for this player
    pub id: PlayerId,

    /// Player name
    pub name: PlayerName,

    /// Action plays left this turn
    pub actions_left: u32,

    /// Coins produced this turn that are not yet spent
    pub coins: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>) -> Self {
        Player {
            id,
            name: name.into(),
            actions_left: 1,
            coins: 0,
        }
    }

    pub fn can_play_action(&self) -> bool {
        self.actions_left > 0
    }

    pub fn spend_action(&mut self) -> bool {
        if self.actions_left == 0 {
            return false;
        }
        self.actions_left -= 1;
        true
    }

    pub fn add_coins(&mut self, amount: u32) {
        self.coins += amount;
    }

    /// Reset counters at the start of a turn
    pub fn reset_turn(&mut self) {
        self.actions_left = 1;
        self.coins = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let id = PlayerId::new(1);
        let player = Player::new(id, "Alice");

        assert_eq!(player.id, id);
        assert_eq!(player.name.as_str(), "Alice");
        assert_eq!(player.actions_left, 1);
        assert_eq!(player.coins, 0);
    }

    #[test]
    fn test_spend_action() {
        let mut player = Player::new(PlayerId::new(0), "Bob");

        assert!(player.can_play_action());
        assert!(player.spend_action());
        assert!(!player.can_play_action());
        assert!(!player.spend_action());

        player.add_coins(2);
        player.reset_turn();
        assert!(player.can_play_action());
        assert_eq!(player.coins, 0);
    }
}
