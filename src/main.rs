//! Dominion Forge - Main Binary
//!
//! Resolves, explores and samples compound-action scenarios from JSON files

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use dominion_forge_rs::{
    game::{
        compute_state_hash, enumerate_outcomes, enumerate_outcomes_of, format_hash, run_rollouts,
        GameState, PlayerController, RandomController, VerbosityLevel, ZeroController,
    },
    scenario::Scenario,
    zones::DeckType,
};
use std::path::{Path, PathBuf};

/// Controller type for every player
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ControllerType {
    /// Menu indices from the scenario file, then the first option
    Script,
    /// Always chooses the first option
    Zero,
    /// Makes random choices
    Random,
}

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "dominion")]
#[command(about = "Dominion Forge - compound action engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a scenario once and report the final position
    Run {
        /// Scenario file (.json)
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,

        /// Controller type for all players
        #[arg(long, value_enum, default_value = "script")]
        controller: ControllerType,

        /// Set random seed for the random controller
        #[arg(long)]
        seed: Option<u64>,

        /// Fail if the final position differs from the scenario's expectation
        #[arg(long)]
        check: bool,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// Enumerate every distinct way the scenario can resolve
    Explore {
        /// Scenario file (.json)
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,
    },

    /// Run random rollouts in parallel and report choice frequencies
    Rollout {
        /// Scenario file (.json)
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,

        /// Number of rollouts
        #[arg(long, short = 'n', default_value_t = 1000)]
        count: usize,

        /// Master seed for deriving per-rollout seeds
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            controller,
            seed,
            check,
            verbosity,
        } => run_scenario(&scenario, controller, seed, check, verbosity.into()),
        Commands::Explore { scenario } => explore(&scenario),
        Commands::Rollout {
            scenario,
            count,
            seed,
        } => rollout(&scenario, count, seed),
    }
}

fn load(path: &Path) -> anyhow::Result<Scenario> {
    Scenario::from_file(path)
        .with_context(|| format!("failed to load scenario {}", path.display()))
}

fn describe(game: &GameState) {
    for player in &game.players {
        println!(
            "  {}: hand {:?}, discard {:?}, coins {}",
            player.name,
            game.zone_contents(DeckType::Hand, player.id),
            game.zone_contents(DeckType::Discard, player.id),
            player.coins
        );
    }
    println!("  Trash: {:?}", game.trash.cards);
}

fn run_scenario(
    path: &Path,
    controller: ControllerType,
    seed: Option<u64>,
    check: bool,
    verbosity: VerbosityLevel,
) -> anyhow::Result<()> {
    let scenario = load(path)?;
    let mut game = scenario.build_game()?;
    game.logger.set_verbosity(verbosity);

    let mut controllers: Vec<Box<dyn PlayerController>> = match controller {
        ControllerType::Script => scenario.controllers(),
        ControllerType::Zero => game
            .players
            .iter()
            .map(|p| Box::new(ZeroController::new(p.id)) as Box<dyn PlayerController>)
            .collect(),
        ControllerType::Random => game
            .players
            .iter()
            .map(|p| {
                let controller = match seed {
                    Some(seed) => {
                        RandomController::with_seed(p.id, seed.wrapping_add(p.id.as_u32() as u64))
                    }
                    None => RandomController::new(p.id),
                };
                Box::new(controller) as Box<dyn PlayerController>
            })
            .collect(),
    };

    println!("=== {} ===", scenario.name);
    let result = scenario
        .run_with(&mut game, &mut controllers)
        .with_context(|| format!("scenario '{}' failed", scenario.name))?;

    println!("\nResolved after {} choice(s):", result.choices_made);
    describe(&game);
    println!("  State hash: {}", format_hash(compute_state_hash(&game)));

    if check {
        let mismatches = scenario.check(&game, &result)?;
        if !mismatches.is_empty() {
            for mismatch in &mismatches {
                eprintln!("  MISMATCH {mismatch}");
            }
            bail!("{} expectation(s) not met", mismatches.len());
        }
        println!("  All expectations met");
    }
    Ok(())
}

fn explore(path: &Path) -> anyhow::Result<()> {
    let scenario = load(path)?;
    let game = scenario.build_game()?;
    let result = match scenario.opening_action(&game)? {
        Some(action) => enumerate_outcomes_of(&game, &action)?,
        None => enumerate_outcomes(&game)?,
    };

    println!("=== {} ===", scenario.name);
    println!(
        "{} distinct outcome(s) from {} path(s), {} transposition(s), {} node(s) expanded",
        result.outcomes.len(),
        result.terminal_paths,
        result.transpositions,
        result.nodes_expanded
    );
    for (idx, outcome) in result.outcomes.iter().enumerate() {
        println!("\nOutcome {} [{}]", idx + 1, format_hash(compute_state_hash(outcome)));
        describe(outcome);
    }
    Ok(())
}

fn rollout(path: &Path, count: usize, seed: u64) -> anyhow::Result<()> {
    let scenario = load(path)?;
    let game = scenario.build_game()?;
    let opening = scenario.opening_action(&game)?;

    println!("=== {} ===", scenario.name);
    println!("Running {count} rollouts (seed {seed})...");
    let summary = run_rollouts(&game, opening.as_ref(), count, seed)?;

    println!(
        "{} rollout(s), {} distinct outcome(s), {:.2} choices per rollout",
        summary.rollouts,
        summary.distinct_outcomes,
        summary.average_choices()
    );
    let mut first_choices: Vec<_> = summary.first_choices.iter().collect();
    first_choices.sort_by(|a, b| {
        b.1.cmp(a.1)
            .then_with(|| a.0.to_string().cmp(&b.0.to_string()))
    });
    for (action, times) in first_choices {
        let share = *times as f64 * 100.0 / summary.rollouts.max(1) as f64;
        println!("  {share:5.1}%  {action}");
    }
    Ok(())
}
