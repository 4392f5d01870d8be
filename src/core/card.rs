//! Card kinds and their rule-table data

use crate::DominionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card categories (a card can belong to several)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Treasure,
    Victory,
    Curse,
    Action,
    Attack,
}

/// Every card kind the engine knows about
///
/// Cards carry no per-instance state, so the kind is also the card's identity
/// for equality, deduplication of menu candidates and hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardType {
    Copper,
    Silver,
    Gold,
    Platinum,
    Curse,
    Estate,
    Duchy,
    Province,
    Militia,
    Remodel,
    Mine,
    Artisan,
}

/// Static rule-table row for a card kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSpec {
    pub name: &'static str,
    pub cost: u32,
    pub categories: &'static [CardCategory],
}

use CardCategory::*;

const fn spec(name: &'static str, cost: u32, categories: &'static [CardCategory]) -> CardSpec {
    CardSpec {
        name,
        cost,
        categories,
    }
}

static COPPER: CardSpec = spec("Copper", 0, &[Treasure]);
static SILVER: CardSpec = spec("Silver", 3, &[Treasure]);
static GOLD: CardSpec = spec("Gold", 6, &[Treasure]);
static PLATINUM: CardSpec = spec("Platinum", 9, &[Treasure]);
static CURSE: CardSpec = spec("Curse", 0, &[Curse]);
static ESTATE: CardSpec = spec("Estate", 2, &[Victory]);
static DUCHY: CardSpec = spec("Duchy", 5, &[Victory]);
static PROVINCE: CardSpec = spec("Province", 8, &[Victory]);
static MILITIA: CardSpec = spec("Militia", 4, &[Action, Attack]);
static REMODEL: CardSpec = spec("Remodel", 4, &[Action]);
static MINE: CardSpec = spec("Mine", 5, &[Action]);
static ARTISAN: CardSpec = spec("Artisan", 6, &[Action]);

impl CardType {
    pub const ALL: [CardType; 12] = [
        CardType::Copper,
        CardType::Silver,
        CardType::Gold,
        CardType::Platinum,
        CardType::Curse,
        CardType::Estate,
        CardType::Duchy,
        CardType::Province,
        CardType::Militia,
        CardType::Remodel,
        CardType::Mine,
        CardType::Artisan,
    ];

    pub fn spec(self) -> &'static CardSpec {
        match self {
            CardType::Copper => &COPPER,
            CardType::Silver => &SILVER,
            CardType::Gold => &GOLD,
            CardType::Platinum => &PLATINUM,
            CardType::Curse => &CURSE,
            CardType::Estate => &ESTATE,
            CardType::Duchy => &DUCHY,
            CardType::Province => &PROVINCE,
            CardType::Militia => &MILITIA,
            CardType::Remodel => &REMODEL,
            CardType::Mine => &MINE,
            CardType::Artisan => &ARTISAN,
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn cost(self) -> u32 {
        self.spec().cost
    }

    pub fn is_category(self, category: CardCategory) -> bool {
        self.spec().categories.contains(&category)
    }

    pub fn is_treasure(self) -> bool {
        self.is_category(CardCategory::Treasure)
    }

    pub fn is_action(self) -> bool {
        self.is_category(CardCategory::Action)
    }

    pub fn is_victory(self) -> bool {
        self.is_category(CardCategory::Victory)
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CardType {
    type Err = DominionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CardType::ALL
            .iter()
            .copied()
            .find(|card| card.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DominionError::UnknownCard(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_table() {
        assert_eq!(CardType::Silver.cost(), 3);
        assert_eq!(CardType::Gold.cost(), 6);
        assert!(CardType::Copper.is_treasure());
        assert!(!CardType::Estate.is_treasure());
        assert!(CardType::Militia.is_action());
        assert!(CardType::Militia.is_category(CardCategory::Attack));
        assert!(CardType::Province.is_victory());
        assert!(CardType::Curse.is_category(CardCategory::Curse));
    }

    #[test]
    fn test_parse_card_name() {
        assert_eq!("mine".parse::<CardType>().unwrap(), CardType::Mine);
        assert_eq!(" Gold ".parse::<CardType>().unwrap(), CardType::Gold);
        assert!(matches!(
            "Chapel".parse::<CardType>(),
            Err(DominionError::UnknownCard(name)) if name == "Chapel"
        ));
    }

    #[test]
    fn test_names_round_trip() {
        for card in CardType::ALL {
            assert_eq!(card.to_string().parse::<CardType>().unwrap(), card);
        }
    }
}
