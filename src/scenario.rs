//! Scenario files
//!
//! A scenario is a JSON description of a mid-turn position: every player's
//! zones, the supply, the trash, which card the turn player plays, the menu
//! indices each player will pick, and optionally the position expected once
//! everything has resolved.
//!
//! ```json
//! {
//!   "name": "mine_silver_to_gold",
//!   "players": [
//!     { "name": "Alice", "hand": ["Mine", "Silver"], "script": [0] },
//!     { "name": "Bob" }
//!   ],
//!   "supply": [{ "card": "Gold", "count": 10 }],
//!   "play": "Mine",
//!   "expect": { "players": [{ "hand": ["Gold"] }], "trash": ["Silver"] }
//! }
//! ```

use crate::core::{CardType, PlayerId};
use crate::game::compound::CompoundAction;
use crate::game::controller::PlayerController;
use crate::game::{Action, ExecutionResult, FixedScriptController, GameState, SequenceExecutor};
use crate::zones::DeckType;
use crate::{DominionError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One player's starting position
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSetup {
    pub name: String,
    pub hand: Vec<String>,
    /// Draw pile, bottom card first
    pub draw: Vec<String>,
    pub discard: Vec<String>,
    pub table: Vec<String>,
    /// Actions available this turn (defaults to 1)
    pub actions: Option<u32>,
    /// Menu indices this player picks, in order; 0 once exhausted
    pub script: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileSetup {
    pub card: String,
    pub count: u32,
}

/// Expected state of one player after resolution; omitted fields are not checked
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerExpectation {
    pub hand: Option<Vec<String>>,
    pub draw: Option<Vec<String>>,
    pub discard: Option<Vec<String>>,
    pub table: Option<Vec<String>>,
    pub coins: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Expectation {
    /// Per player, in seating order; may be shorter than the player list
    pub players: Vec<PlayerExpectation>,
    pub trash: Option<Vec<String>>,
    pub supply: Option<Vec<PileSetup>>,
    /// Number of decisions made while resolving
    pub choices: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: Option<u64>,
    pub players: Vec<PlayerSetup>,
    pub supply: Vec<PileSetup>,
    pub trash: Vec<String>,
    /// Seat index of the player whose turn it is
    pub turn_player: usize,
    /// Card the turn player plays from hand
    pub play: Option<String>,
    pub expect: Option<Expectation>,
}

fn parse_cards(names: &[String]) -> Result<Vec<CardType>> {
    names.iter().map(|name| name.parse()).collect()
}

/// Compare a zone with an expectation, as a multiset unless `ordered`
fn zone_mismatch(
    label: &str,
    actual: &[CardType],
    expected: &[String],
    ordered: bool,
) -> Result<Option<String>> {
    let mut want = parse_cards(expected)?;
    let mut have = actual.to_vec();
    if !ordered {
        want.sort();
        have.sort();
    }
    if want == have {
        Ok(None)
    } else {
        Ok(Some(format!("{label}: expected {want:?}, found {have:?}")))
    }
}

impl Scenario {
    /// Load a scenario from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a scenario from JSON text
    pub fn from_json(contents: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(contents)?;
        if scenario.players.is_empty() {
            return Err(DominionError::InvalidScenario(format!(
                "scenario '{}' has no players",
                scenario.name
            )));
        }
        if scenario.turn_player >= scenario.players.len() {
            return Err(DominionError::InvalidScenario(format!(
                "turn player {} out of range for {} player(s)",
                scenario.turn_player,
                scenario.players.len()
            )));
        }
        Ok(scenario)
    }

    /// Build the starting position
    pub fn build_game(&self) -> Result<GameState> {
        let names: Vec<&str> = self.players.iter().map(|p| p.name.as_str()).collect();
        let mut game = GameState::new(&names);
        if let Some(seed) = self.seed {
            game.seed_rng(seed);
        }
        game.turn_player = PlayerId::from(self.turn_player);

        for (idx, setup) in self.players.iter().enumerate() {
            let player = PlayerId::from(idx);
            for (deck, cards) in [
                (DeckType::Hand, &setup.hand),
                (DeckType::Draw, &setup.draw),
                (DeckType::Discard, &setup.discard),
                (DeckType::Table, &setup.table),
            ] {
                for card in parse_cards(cards)? {
                    game.add_card(deck, player, card)?;
                }
            }
            if let Some(actions) = setup.actions {
                game.get_player_mut(player)?.actions_left = actions;
            }
        }

        for pile in &self.supply {
            game.supply.add_pile(pile.card.parse()?, pile.count);
        }
        for card in parse_cards(&self.trash)? {
            game.add_card(DeckType::Trash, game.turn_player, card)?;
        }
        Ok(game)
    }

    /// The top-level action named by `play`, if any
    pub fn opening_action(&self, game: &GameState) -> Result<Option<Action>> {
        let Some(name) = &self.play else {
            return Ok(None);
        };
        let card: CardType = name.parse()?;
        let compound = CompoundAction::for_card(card, game.turn_player).ok_or_else(|| {
            DominionError::InvalidScenario(format!("{card} has no effect to play"))
        })?;
        Ok(Some(Action::PlayCard(compound)))
    }

    /// One scripted controller per player
    pub fn controllers(&self) -> Vec<Box<dyn PlayerController>> {
        self.players
            .iter()
            .enumerate()
            .map(|(idx, setup)| {
                Box::new(FixedScriptController::new(
                    PlayerId::from(idx),
                    setup.script.clone(),
                )) as Box<dyn PlayerController>
            })
            .collect()
    }

    /// Resolve the scenario with `controllers`
    ///
    /// Plays the opening card and resolves it, or runs the turn player's
    /// action phase when the scenario names no card.
    pub fn run_with(
        &self,
        game: &mut GameState,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<ExecutionResult> {
        let opening = self.opening_action(game)?;
        let mut executor = SequenceExecutor::new(game);
        match opening {
            Some(action) => executor.play(&action, controllers),
            None => executor.run_action_phase(controllers),
        }
    }

    /// Build the position and resolve it with the scripted controllers
    pub fn run(&self) -> Result<(GameState, ExecutionResult)> {
        let mut game = self.build_game()?;
        let mut controllers = self.controllers();
        let result = self.run_with(&mut game, &mut controllers)?;
        Ok((game, result))
    }

    /// Differences between `game` and the expected position
    ///
    /// Empty when there is no expectation or everything matches. Hands,
    /// discard piles, tables and the trash compare as multisets; draw piles
    /// compare in order.
    pub fn check(&self, game: &GameState, result: &ExecutionResult) -> Result<Vec<String>> {
        let Some(expect) = &self.expect else {
            return Ok(Vec::new());
        };
        let mut mismatches = Vec::new();

        for (idx, wanted) in expect.players.iter().enumerate() {
            let player = PlayerId::from(idx);
            let name = game.player_name(player);
            for (deck, cards, ordered) in [
                (DeckType::Hand, &wanted.hand, false),
                (DeckType::Draw, &wanted.draw, true),
                (DeckType::Discard, &wanted.discard, false),
                (DeckType::Table, &wanted.table, false),
            ] {
                if let Some(cards) = cards {
                    let label = format!("{name} {deck:?}");
                    let actual = game.zone_contents(deck, player);
                    mismatches.extend(zone_mismatch(&label, actual, cards, ordered)?);
                }
            }
            if let Some(coins) = wanted.coins {
                let actual = game.get_player(player)?.coins;
                if actual != coins {
                    mismatches.push(format!("{name} coins: expected {coins}, found {actual}"));
                }
            }
        }

        if let Some(trash) = &expect.trash {
            mismatches.extend(zone_mismatch(
                "Trash",
                game.zone_contents(DeckType::Trash, game.turn_player),
                trash,
                false,
            )?);
        }
        if let Some(piles) = &expect.supply {
            for pile in piles {
                let card: CardType = pile.card.parse()?;
                let actual = game.supply.count(card);
                if actual != pile.count {
                    mismatches.push(format!(
                        "Supply {card}: expected {}, found {actual}",
                        pile.count
                    ));
                }
            }
        }
        if let Some(choices) = expect.choices {
            if result.choices_made != choices {
                mismatches.push(format!(
                    "Choices: expected {choices}, found {}",
                    result.choices_made
                ));
            }
        }
        if game.is_action_in_progress() {
            mismatches.push("a sequence is still in progress".to_string());
        }
        Ok(mismatches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINE: &str = r#"{
        "name": "mine",
        "players": [
            { "name": "Alice", "hand": ["Mine", "silver"] },
            { "name": "Bob", "hand": ["Estate"] }
        ],
        "supply": [{ "card": "Gold", "count": 2 }],
        "play": "Mine",
        "expect": {
            "players": [{ "hand": ["Gold"], "table": ["Mine"] }],
            "trash": ["Silver"],
            "supply": [{ "card": "Gold", "count": 1 }],
            "choices": 2
        }
    }"#;

    #[test]
    fn test_build_game() {
        let scenario = Scenario::from_json(MINE).unwrap();
        let game = scenario.build_game().unwrap();
        assert_eq!(
            game.zone_contents(DeckType::Hand, PlayerId::new(0)),
            &[CardType::Mine, CardType::Silver]
        );
        assert_eq!(game.supply.count(CardType::Gold), 2);
        assert_eq!(game.player_name(PlayerId::new(1)), "Bob");
    }

    #[test]
    fn test_run_and_check() {
        let scenario = Scenario::from_json(MINE).unwrap();
        let (game, result) = scenario.run().unwrap();
        assert!(scenario.check(&game, &result).unwrap().is_empty());
    }

    #[test]
    fn test_check_reports_mismatch() {
        let mut scenario = Scenario::from_json(MINE).unwrap();
        if let Some(expect) = scenario.expect.as_mut() {
            expect.trash = Some(vec!["Copper".to_string()]);
        }
        let (game, result) = scenario.run().unwrap();
        let mismatches = scenario.check(&game, &result).unwrap();
        assert_eq!(mismatches.len(), 1);
        assert!(mismatches[0].starts_with("Trash"));
    }

    #[test]
    fn test_bad_scenarios() {
        assert!(matches!(
            Scenario::from_json(r#"{ "name": "empty" }"#),
            Err(DominionError::InvalidScenario(_))
        ));

        let unknown = r#"{ "players": [{ "name": "A", "hand": ["Moat"] }] }"#;
        let scenario = Scenario::from_json(unknown).unwrap();
        assert!(matches!(
            scenario.build_game(),
            Err(DominionError::UnknownCard(name)) if name == "Moat"
        ));

        let no_effect = r#"{ "players": [{ "name": "A", "hand": ["Gold"] }], "play": "Gold" }"#;
        let scenario = Scenario::from_json(no_effect).unwrap();
        let game = scenario.build_game().unwrap();
        assert!(matches!(
            scenario.opening_action(&game),
            Err(DominionError::InvalidScenario(_))
        ));
    }
}
