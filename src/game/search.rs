//! Exhaustive search over the branches of pending sequences
//!
//! Every menu entry is explored on its own copy of the game state, so
//! branches never observe each other. States reached along different paths
//! are recognized by their state hash and explored only once.

use crate::game::state_hash::compute_state_hash;
use crate::game::{Action, GameState, VerbosityLevel};
use crate::Result;
use rustc_hash::FxHashSet;

/// Result of enumerating every way the pending sequences can resolve
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Distinct resolved states, in discovery order
    pub outcomes: Vec<GameState>,
    /// Choice paths that ended on a resolved state, counting ones that
    /// reached an already-seen outcome
    pub terminal_paths: usize,
    /// Times a state was reached again along another path and pruned
    pub transpositions: usize,
    /// States expanded (menus evaluated)
    pub nodes_expanded: usize,
}

struct Search {
    seen: FxHashSet<u64>,
    result: SearchResult,
}

impl Search {
    fn visit(&mut self, state: GameState) -> Result<()> {
        if !self.seen.insert(compute_state_hash(&state)) {
            self.result.transpositions += 1;
            if !state.is_action_in_progress() {
                self.result.terminal_paths += 1;
            }
            return Ok(());
        }
        if !state.is_action_in_progress() {
            self.result.terminal_paths += 1;
            self.result.outcomes.push(state);
            return Ok(());
        }

        self.result.nodes_expanded += 1;
        for action in state.follow_on_actions() {
            let mut branch = state.clone();
            branch.apply_action(&action)?;
            self.visit(branch)?;
        }
        Ok(())
    }
}

/// Enumerate every distinct state the pending sequences of `root` can end in
///
/// A root with nothing in progress is its own single outcome. `root` is not
/// modified.
pub fn enumerate_outcomes(root: &GameState) -> Result<SearchResult> {
    let mut start = root.clone();
    start.logger.set_verbosity(VerbosityLevel::Silent);

    let mut search = Search {
        seen: FxHashSet::default(),
        result: SearchResult {
            outcomes: Vec::new(),
            terminal_paths: 0,
            transpositions: 0,
            nodes_expanded: 0,
        },
    };
    search.visit(start)?;
    Ok(search.result)
}

/// Apply `opening` to a copy of `root`, then enumerate the outcomes
pub fn enumerate_outcomes_of(root: &GameState, opening: &Action) -> Result<SearchResult> {
    let mut start = root.clone();
    start.logger.set_verbosity(VerbosityLevel::Silent);
    start.apply_action(opening)?;
    enumerate_outcomes(&start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardType, PlayerId};
    use crate::game::compound::CompoundAction;
    use crate::zones::DeckType;

    #[test]
    fn test_nothing_pending_is_single_outcome() {
        let game = GameState::new_two_player("Alice", "Bob");
        let result = enumerate_outcomes(&game).unwrap();
        assert_eq!(result.outcomes.len(), 1);
        assert_eq!(result.terminal_paths, 1);
        assert_eq!(result.nodes_expanded, 0);
    }

    #[test]
    fn test_mine_branches() {
        let mut game = GameState::new_two_player("Alice", "Bob");
        let p0 = PlayerId::new(0);
        for card in [CardType::Mine, CardType::Copper, CardType::Silver] {
            game.add_card(DeckType::Hand, p0, card).unwrap();
        }
        game.supply.add_pile(CardType::Silver, 10);
        game.supply.add_pile(CardType::Gold, 10);
        let play = Action::PlayCard(CompoundAction::for_card(CardType::Mine, p0).unwrap());

        let result = enumerate_outcomes_of(&game, &play).unwrap();

        // Copper -> Silver, Silver -> Silver, Silver -> Gold
        assert_eq!(result.terminal_paths, 3);
        assert_eq!(result.outcomes.len(), 3);
        assert_eq!(result.transpositions, 0);
        for outcome in &result.outcomes {
            assert!(!outcome.is_action_in_progress());
            assert_eq!(outcome.zone_contents(DeckType::Hand, p0).len(), 2);
            assert_eq!(outcome.zone_contents(DeckType::Trash, p0).len(), 1);
        }
        // The root is untouched
        assert_eq!(game.zone_contents(DeckType::Hand, p0).len(), 3);
    }

    #[test]
    fn test_militia_discard_orders_transpose() {
        let mut game = GameState::new_two_player("Alice", "Bob");
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        game.add_card(DeckType::Hand, p0, CardType::Militia).unwrap();
        for card in [
            CardType::Copper,
            CardType::Copper,
            CardType::Copper,
            CardType::Copper,
            CardType::Estate,
        ] {
            game.add_card(DeckType::Hand, p1, card).unwrap();
        }
        let play = Action::PlayCard(CompoundAction::for_card(CardType::Militia, p0).unwrap());

        let result = enumerate_outcomes_of(&game, &play).unwrap();

        // Copper+Copper, Copper+Estate; Estate+Copper is the same outcome
        assert_eq!(result.outcomes.len(), 2);
        assert_eq!(result.terminal_paths, 3);
        assert_eq!(result.transpositions, 1);
        for outcome in &result.outcomes {
            assert_eq!(outcome.zone_contents(DeckType::Hand, p1).len(), 3);
            assert_eq!(outcome.get_player(p0).unwrap().coins, 2);
        }
    }
}
