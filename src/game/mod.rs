//! Game state, actions and the extended-sequence engine

pub mod actions;
pub mod compound;
pub mod controller;
pub mod executor;
pub mod fixed_script_controller;
pub mod logger;
pub mod random_controller;
pub mod rollout;
pub mod scripted_controller;
pub mod search;
pub mod sequence;
pub mod state;
pub mod state_hash;
pub mod zero_controller;

pub use actions::Action;
pub use compound::{Artisan, CompoundAction, Militia, UpgradeTrade};
pub use controller::{GameStateView, PlayerController};
pub use executor::{ExecutionResult, SequenceExecutor};
pub use fixed_script_controller::FixedScriptController;
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use random_controller::RandomController;
pub use rollout::{run_rollouts, RolloutSummary};
pub use scripted_controller::ScriptedController;
pub use search::{enumerate_outcomes, enumerate_outcomes_of, SearchResult};
pub use sequence::{ExtendedSequence, SequenceState, Step};
pub use state::GameState;
pub use state_hash::{compute_state_hash, format_hash};
pub use zero_controller::ZeroController;
