//! Player identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for a seat at the table
///
/// IDs are dense and double as the index into the turn order, so
/// `PlayerId::new(0)` is always the first player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    pub const fn new(id: u32) -> Self {
        PlayerId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Position in turn order
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for PlayerId {
    fn from(idx: usize) -> Self {
        PlayerId(idx as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id() {
        let id = PlayerId::new(3);
        assert_eq!(id.as_u32(), 3);
        assert_eq!(id.index(), 3);
        assert_eq!(id.to_string(), "3");
        assert_eq!(PlayerId::from(3usize), id);
    }

    #[test]
    fn test_player_id_ordering() {
        assert!(PlayerId::new(0) < PlayerId::new(1));
    }
}
