//! Sequence executor
//!
//! Drives the action loop: ask the player the active sequence points at for
//! one of the published follow-on actions, check the answer against the
//! menu, apply it, and repeat until no sequence is pending.

/// Macro for conditional logging that avoids allocation when feature is disabled
macro_rules! log_if_verbose {
    ($self:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.game.logger.normal(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self;
        }
    };
}

use crate::core::PlayerId;
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{Action, GameState, VerbosityLevel};
use crate::{DominionError, Result};

/// Outcome of driving the executor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Number of controller decisions made
    pub choices_made: u32,
    /// Every applied action with the player who chose it, in order
    pub actions: Vec<(PlayerId, Action)>,
}

/// Executor over a borrowed game state
pub struct SequenceExecutor<'a> {
    pub game: &'a mut GameState,
    /// Decisions allowed before the run is aborted
    max_choices: u32,
    pub verbosity: VerbosityLevel,
    choice_counter: u32,
    history: Vec<(PlayerId, Action)>,
}

impl<'a> SequenceExecutor<'a> {
    pub fn new(game: &'a mut GameState) -> Self {
        let verbosity = game.logger.verbosity();
        SequenceExecutor {
            game,
            max_choices: 1000,
            verbosity,
            choice_counter: 0,
            history: Vec::new(),
        }
    }

    pub fn with_max_choices(mut self, max_choices: u32) -> Self {
        self.max_choices = max_choices;
        self
    }

    /// Set verbosity on the executor and on the game's logger
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self.game.logger.set_verbosity(verbosity);
        self
    }

    pub fn choices_made(&self) -> u32 {
        self.choice_counter
    }

    fn controller_index(
        controllers: &[Box<dyn PlayerController>],
        player: PlayerId,
    ) -> Result<usize> {
        controllers
            .iter()
            .position(|c| c.player_id() == player)
            .ok_or(DominionError::PlayerNotFound(player))
    }

    /// Apply `action` on behalf of `player`, after checking it is in `menu`
    fn apply_checked(
        &mut self,
        player: PlayerId,
        action: Action,
        menu: &[Action],
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<Action> {
        if !menu.contains(&action) {
            return Err(DominionError::IllegalAction(format!(
                "{} chose \"{}\", which is not among the {} offered option(s)",
                self.game.player_name(player),
                action,
                menu.len()
            )));
        }

        self.game.apply_action(&action)?;
        self.history.push((player, action.clone()));

        for controller in controllers.iter_mut() {
            let view = GameStateView::new(self.game, controller.player_id());
            controller.on_action_applied(&view, &action);
        }
        Ok(action)
    }

    /// Solicit one decision from the player who must act and apply it
    ///
    /// Returns the applied action. An action outside the current menu is
    /// rejected with [`DominionError::IllegalAction`] and leaves the game
    /// untouched.
    pub fn choose_and_apply(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<Action> {
        if self.choice_counter >= self.max_choices {
            return Err(DominionError::InvalidAction(format!(
                "choice limit of {} reached",
                self.max_choices
            )));
        }

        let player = self.game.current_player();
        let menu = self.game.legal_actions();
        self.game
            .logger
            .menu(&self.game.player_name(player), &menu);

        let idx = Self::controller_index(controllers, player)?;
        let choice = {
            let view = GameStateView::new(self.game, player);
            controllers[idx].choose_action(&view, &menu)
        };
        self.choice_counter += 1;

        self.apply_checked(player, choice, &menu, controllers)
    }

    /// Keep soliciting follow-on actions until no sequence is pending
    pub fn resolve_active_sequences(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<()> {
        while self.game.is_action_in_progress() {
            self.choose_and_apply(controllers)?;
        }
        Ok(())
    }

    /// Apply a top-level action chosen outside the executor, then resolve
    /// every sequence it starts
    pub fn play(
        &mut self,
        action: &Action,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<ExecutionResult> {
        let player = self.game.current_player();
        let menu = self.game.legal_actions();
        self.apply_checked(player, action.clone(), &menu, controllers)?;
        self.resolve_active_sequences(controllers)?;
        Ok(self.result())
    }

    /// Let the turn player play cards until they choose to stop
    ///
    /// Each played card is resolved completely before the next top-level
    /// choice. Ends when the turn player picks `DoNothing` outside a
    /// sequence.
    pub fn run_action_phase(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>],
    ) -> Result<ExecutionResult> {
        log_if_verbose!(
            self,
            "{}'s action phase (turn {})",
            self.game.player_name(self.game.turn_player),
            self.game.turn_number
        );
        loop {
            let top_level = !self.game.is_action_in_progress();
            let action = self.choose_and_apply(controllers)?;
            if top_level && action == Action::DoNothing {
                break;
            }
            self.resolve_active_sequences(controllers)?;
        }

        self.game.logger.minimal(&format!(
            "{} ends the action phase after {} choice(s)",
            self.game.player_name(self.game.turn_player),
            self.choice_counter
        ));
        Ok(self.result())
    }

    /// Snapshot of what has happened so far
    pub fn result(&self) -> ExecutionResult {
        ExecutionResult {
            choices_made: self.choice_counter,
            actions: self.history.clone(),
        }
    }
}
