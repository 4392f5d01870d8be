//! Parallel random rollouts
//!
//! Resolves many copies of one game state with random controllers, using
//! rayon to spread the copies across threads, and reports how often each
//! first choice was taken and how many distinct outcomes were reached.

use crate::game::controller::PlayerController;
use crate::game::executor::SequenceExecutor;
use crate::game::random_controller::RandomController;
use crate::game::state_hash::compute_state_hash;
use crate::game::{Action, GameState, VerbosityLevel};
use crate::Result;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

/// Aggregated statistics over a batch of rollouts
#[derive(Debug, Clone, Default)]
pub struct RolloutSummary {
    pub rollouts: usize,
    /// How often each action was the first controller choice
    pub first_choices: FxHashMap<Action, usize>,
    /// Number of distinct resolved states
    pub distinct_outcomes: usize,
    /// Total controller decisions across all rollouts
    pub total_choices: u64,
}

impl RolloutSummary {
    pub fn average_choices(&self) -> f64 {
        if self.rollouts == 0 {
            return 0.0;
        }
        self.total_choices as f64 / self.rollouts as f64
    }
}

struct RolloutOutcome {
    first_choice: Option<Action>,
    state_hash: u64,
    choices: u32,
}

fn run_one(mut game: GameState, opening: Option<&Action>, seed: u64) -> Result<RolloutOutcome> {
    let mut controllers: Vec<Box<dyn PlayerController>> = game
        .players
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let controller_seed =
                seed.wrapping_add((idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
            Box::new(RandomController::with_seed(p.id, controller_seed))
                as Box<dyn PlayerController>
        })
        .collect();

    let mut executor = SequenceExecutor::new(&mut game).with_verbosity(VerbosityLevel::Silent);
    let result = match opening {
        Some(action) => executor.play(action, &mut controllers)?,
        None if executor.game.is_action_in_progress() => {
            executor.resolve_active_sequences(&mut controllers)?;
            executor.result()
        }
        None => executor.run_action_phase(&mut controllers)?,
    };

    let skip = usize::from(opening.is_some());
    Ok(RolloutOutcome {
        first_choice: result.actions.get(skip).map(|(_, action)| action.clone()),
        state_hash: compute_state_hash(&game),
        choices: result.choices_made,
    })
}

/// Run `count` random rollouts from `root`
///
/// With an `opening` each rollout applies it first and resolves the
/// sequences it starts; without one it resolves whatever is pending, or
/// plays out the turn player's action phase. Per-rollout seeds are derived
/// from `seed`, so a batch is reproducible regardless of thread count.
pub fn run_rollouts(
    root: &GameState,
    opening: Option<&Action>,
    count: usize,
    seed: u64,
) -> Result<RolloutSummary> {
    let mut master = Xoshiro256PlusPlus::seed_from_u64(seed);
    let jobs: Vec<(GameState, u64)> = (0..count).map(|_| (root.clone(), master.gen())).collect();

    let outcomes: Vec<RolloutOutcome> = jobs
        .into_par_iter()
        .map(|(game, rollout_seed)| run_one(game, opening, rollout_seed))
        .collect::<Result<Vec<_>>>()?;

    let mut summary = RolloutSummary {
        rollouts: outcomes.len(),
        ..Default::default()
    };
    let mut distinct = FxHashSet::default();
    for outcome in outcomes {
        if let Some(action) = outcome.first_choice {
            *summary.first_choices.entry(action).or_insert(0) += 1;
        }
        distinct.insert(outcome.state_hash);
        summary.total_choices += u64::from(outcome.choices);
    }
    summary.distinct_outcomes = distinct.len();
    Ok(summary)
}
