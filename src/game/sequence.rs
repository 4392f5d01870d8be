//! Extended action sequences
//!
//! A compound action is one player decision that needs further sub-decisions
//! before its effect is complete. While it is unresolved it sits on the game's
//! sequence stack as the *active owner*: the engine asks it who chooses next,
//! which follow-on actions are legal, and notifies it after each chosen
//! follow-on has executed.
//!
//! ## Protocol
//!
//! 1. [`ExtendedSequence::execute`] runs once when the action is chosen. It
//!    returns `false` when the action resolved in one shot (every step is then
//!    already marked done) and `true` when more input is needed, in which case
//!    the caller registers the action as the active owner.
//! 2. The engine loops: [`ExtendedSequence::current_player`],
//!    [`ExtendedSequence::follow_on_actions`], execute the chosen follow-on,
//!    [`ExtendedSequence::register_action_taken`],
//!    [`ExtendedSequence::execution_complete`].
//!
//! Steps are resolved strictly in declaration order and never reset. The
//! menu always holds at least one action: when nothing qualifies for the
//! pending step it is a single [`Action::DoNothing`], and choosing it resolves
//! that step.

use crate::core::PlayerId;
use crate::game::{Action, GameState};
use crate::Result;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// One progress marker of a compound action, optionally carrying a value
/// captured when the step resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step<T = ()> {
    Pending,
    Done(T),
}

impl<T: Copy> Step<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Step::Pending)
    }

    /// Captured value, if the step has resolved
    pub fn value(&self) -> Option<T> {
        match self {
            Step::Done(value) => Some(*value),
            Step::Pending => None,
        }
    }

    /// Mark the step done with `value`
    ///
    /// A step that is already done keeps its first value; returns whether this
    /// call changed anything.
    pub fn resolve(&mut self, value: T) -> bool {
        if self.is_done() {
            return false;
        }
        *self = Step::Done(value);
        true
    }
}

/// Lifecycle of a compound action, derived from its steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceState {
    /// No step has resolved yet
    NotStarted,
    /// Some, but not all, steps have resolved
    InProgress,
    /// Every step has resolved
    Complete,
}

/// Contract for actions that may need more than one atomic step
pub trait ExtendedSequence {
    /// Entry test, run once when the action itself executes
    ///
    /// Returns `true` if more steps are needed; the caller must then register
    /// this action as the active owner. Returns `false` if the action resolved
    /// immediately, in which case every step is already done.
    fn execute(&mut self, state: &mut GameState) -> Result<bool>;

    /// Legal follow-on actions for the earliest pending step
    ///
    /// Never empty, de-duplicated by value, in zone/supply order.
    ///
    /// # Panics
    /// If every step is already done.
    fn follow_on_actions(&self, state: &GameState) -> Vec<Action>;

    /// The player who picks the next follow-on action
    fn current_player(&self, state: &GameState) -> PlayerId;

    /// Notification that `action`, drawn from the latest menu, has executed
    ///
    /// Steps that are already done are never re-evaluated.
    ///
    /// # Panics
    /// If the sequence is already complete.
    fn register_action_taken(&mut self, state: &GameState, action: &Action);

    /// Number of resolved steps and total number of steps
    fn progress(&self) -> (usize, usize);

    fn execution_complete(&self) -> bool {
        let (resolved, total) = self.progress();
        resolved == total
    }

    fn sequence_state(&self) -> SequenceState {
        match self.progress() {
            (resolved, total) if resolved == total => SequenceState::Complete,
            (0, _) => SequenceState::NotStarted,
            _ => SequenceState::InProgress,
        }
    }
}

/// Collapse candidates that would have identical effects, keeping the first
/// occurrence of each, and fall back to a single `DoNothing` when empty
pub fn menu_from<I>(candidates: I) -> Vec<Action>
where
    I: IntoIterator<Item = Action>,
{
    let mut seen = FxHashSet::default();
    let mut menu: Vec<Action> = candidates
        .into_iter()
        .filter(|action| seen.insert(action.clone()))
        .collect();
    if menu.is_empty() {
        menu.push(Action::DoNothing);
    }
    menu
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardType;

    #[test]
    fn test_step_first_value_wins() {
        let mut step: Step<u32> = Step::Pending;
        assert!(step.is_pending());
        assert_eq!(step.value(), None);

        assert!(step.resolve(3));
        assert!(!step.resolve(6));
        assert_eq!(step.value(), Some(3));
        assert!(step.is_done());
    }

    #[test]
    fn test_menu_dedup_keeps_order() {
        let player = PlayerId::new(0);
        let trash = |card| Action::TrashCard { player, card };

        let menu = menu_from(vec![
            trash(CardType::Copper),
            trash(CardType::Silver),
            trash(CardType::Copper),
        ]);

        assert_eq!(menu, vec![trash(CardType::Copper), trash(CardType::Silver)]);
    }

    #[test]
    fn test_empty_menu_offers_do_nothing() {
        assert_eq!(menu_from(Vec::new()), vec![Action::DoNothing]);
    }
}
