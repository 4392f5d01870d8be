//! Game zones (draw pile, hand, discard, table, trash) and the supply

use crate::core::{CardType, PlayerId};
use serde::{Deserialize, Serialize};

/// Different zones where cards can exist
///
/// Every zone but `Trash` belongs to a player; the trash is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckType {
    Draw,
    Hand,
    Discard,
    Table,
    Trash,
}

/// An ordered pile of cards
///
/// For the draw pile the last card is the top card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardZone {
    /// Zone type
    pub zone_type: DeckType,

    /// Owner of this zone (None for the shared trash)
    pub owner: Option<PlayerId>,

    /// Cards in this zone
    pub cards: Vec<CardType>,
}

impl CardZone {
    pub fn new(zone_type: DeckType, owner: Option<PlayerId>) -> Self {
        CardZone {
            zone_type,
            owner,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card: CardType) {
        self.cards.push(card);
    }

    /// Remove one copy of `card`, returning false if none is present
    pub fn remove(&mut self, card: CardType) -> bool {
        if let Some(pos) = self.cards.iter().position(|&c| c == card) {
            // remove() rather than swap_remove(): menu order follows zone order
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: CardType) -> bool {
        self.cards.contains(&card)
    }

    pub fn count(&self, card: CardType) -> usize {
        self.cards.iter().filter(|&&c| c == card).count()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw from top (for the draw pile)
    pub fn draw_top(&mut self) -> Option<CardType> {
        self.cards.pop()
    }

    /// Look at top card without removing it
    pub fn peek_top(&self) -> Option<CardType> {
        self.cards.last().copied()
    }

    /// Shuffle the zone (for the draw pile)
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

/// Collection of all zones for a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerZones {
    pub draw: CardZone,
    pub hand: CardZone,
    pub discard: CardZone,
    pub table: CardZone,
}

impl PlayerZones {
    pub fn new(player_id: PlayerId) -> Self {
        PlayerZones {
            draw: CardZone::new(DeckType::Draw, Some(player_id)),
            hand: CardZone::new(DeckType::Hand, Some(player_id)),
            discard: CardZone::new(DeckType::Discard, Some(player_id)),
            table: CardZone::new(DeckType::Table, Some(player_id)),
        }
    }

    pub fn get_zone(&self, zone: DeckType) -> Option<&CardZone> {
        match zone {
            DeckType::Draw => Some(&self.draw),
            DeckType::Hand => Some(&self.hand),
            DeckType::Discard => Some(&self.discard),
            DeckType::Table => Some(&self.table),
            DeckType::Trash => None,
        }
    }

    pub fn get_zone_mut(&mut self, zone: DeckType) -> Option<&mut CardZone> {
        match zone {
            DeckType::Draw => Some(&mut self.draw),
            DeckType::Hand => Some(&mut self.hand),
            DeckType::Discard => Some(&mut self.discard),
            DeckType::Table => Some(&mut self.table),
            DeckType::Trash => None,
        }
    }
}

/// A supply pile: a card kind and how many copies remain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupplyPile {
    pub card: CardType,
    pub count: u32,
}

/// The shared supply, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    piles: Vec<SupplyPile>,
}

impl Supply {
    pub fn new() -> Self {
        Supply { piles: Vec::new() }
    }

    /// Add copies to a pile, creating it at the end if needed
    pub fn add_pile(&mut self, card: CardType, count: u32) {
        if let Some(pile) = self.piles.iter_mut().find(|p| p.card == card) {
            pile.count += count;
        } else {
            self.piles.push(SupplyPile { card, count });
        }
    }

    pub fn count(&self, card: CardType) -> u32 {
        self.piles
            .iter()
            .find(|p| p.card == card)
            .map(|p| p.count)
            .unwrap_or(0)
    }

    /// Take one copy of `card`, returning false if the pile is missing or empty
    pub fn take(&mut self, card: CardType) -> bool {
        match self.piles.iter_mut().find(|p| p.card == card) {
            Some(pile) if pile.count > 0 => {
                pile.count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Card kinds that can still be gained, in supply order
    pub fn available(&self) -> impl Iterator<Item = CardType> + '_ {
        self.piles.iter().filter(|p| p.count > 0).map(|p| p.card)
    }

    pub fn piles(&self) -> &[SupplyPile] {
        &self.piles
    }

    pub fn empty_piles(&self) -> usize {
        self.piles.iter().filter(|p| p.count == 0).count()
    }
}
