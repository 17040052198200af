//! Solve command - Run a configured search to completion

use std::{path::PathBuf, thread, time::Duration};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    app::{ApplicationState, Configuration, RunMode},
    cli::output,
    export::{self, RunSummary},
    puzzle::{HeuristicKind, PuzzleState, is_solvable},
    search::AlgorithmKind,
};

#[derive(Parser, Debug)]
#[command(about = "Run a search over the 8-puzzle")]
pub struct SolveArgs {
    /// Initial board as nine comma-separated tiles, 0 for the blank
    /// (e.g. 0,2,3,1,4,5,8,7,6)
    #[arg(long, short = 'i')]
    pub initial: String,

    /// Goal board; defaults to the solved board 1,2,3,4,5,6,7,8,0
    #[arg(long, short = 'g')]
    pub goal: Option<String>,

    /// Search algorithm (bfs, dfs, ids, greedy, astar)
    #[arg(long, short = 'a', default_value = "bfs")]
    pub algorithm: String,

    /// Heuristic for informed algorithms (euclidean, manhattan, tiles)
    #[arg(long)]
    pub heuristic: Option<String>,

    /// Run in burst mode, sleeping between steps
    #[arg(long)]
    pub burst: bool,

    /// Delay between burst steps in milliseconds
    #[arg(long, default_value_t = 20)]
    pub delay_ms: u64,

    /// Maximum steps before giving up
    #[arg(long, default_value_t = 1_000_000)]
    pub max_steps: usize,

    /// Print a statistics snapshot after every step
    #[arg(long)]
    pub trace: bool,

    /// Print the final search tree as an indented outline
    #[arg(long)]
    pub tree: bool,

    /// Undo this many steps at the end, then redo them (action-log demo)
    #[arg(long, default_value_t = 0)]
    pub undo_demo: usize,

    /// Write a JSON run summary to this path
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let initial: PuzzleState = args
        .initial
        .parse()
        .with_context(|| format!("invalid --initial board '{}'", args.initial))?;
    let goal: PuzzleState = match &args.goal {
        Some(goal) => goal
            .parse()
            .with_context(|| format!("invalid --goal board '{goal}'"))?,
        None => PuzzleState::new(),
    };
    let algorithm: AlgorithmKind = args.algorithm.parse()?;
    let heuristic: Option<HeuristicKind> = args
        .heuristic
        .as_deref()
        .map(str::parse)
        .transpose()?;

    if !is_solvable(&initial, &goal) {
        println!(
            "Warning: the goal is not reachable from the initial board; \
             the search will exhaust the reachable space."
        );
    }

    let mut configuration = Configuration::new()
        .with_initial_state(initial)
        .with_goal_state(goal)
        .with_algorithm(algorithm);
    if let Some(heuristic) = heuristic {
        configuration.set_heuristic(heuristic);
    }
    configuration.set_mode(if args.burst {
        RunMode::Burst
    } else {
        RunMode::Single
    });

    output::print_section(&format!("Solving with {}", algorithm.display_name()));
    println!("Initial:\n{}", output::render_board(configuration.initial_state()));
    println!("\nGoal:\n{}", output::render_board(configuration.goal_state()));

    let mut app = ApplicationState::new(configuration);
    app.start()?;

    let mut steps = 0usize;
    while app.is_running() && steps < args.max_steps {
        app.next()?;
        steps += 1;
        if args.trace {
            println!("\nStep {steps}");
            output::print_statistics(app.statistics());
        }
        if args.burst {
            thread::sleep(Duration::from_millis(args.delay_ms));
        }
    }

    if !app.is_complete() {
        return Err(anyhow!(
            "search did not terminate within {} steps",
            args.max_steps
        ));
    }

    output::print_section("Result");
    output::print_kv("Steps", &output::format_number(steps));
    output::print_statistics(app.statistics());

    let goal_path = app.goal_path().unwrap_or_default();
    if goal_path.is_empty() {
        println!("\nNo goal was found; the reachable space was exhausted.");
    } else {
        println!("\nGoal path ({} moves):", goal_path.len() - 1);
        for state in &goal_path {
            println!("\n{}", output::render_board(state));
        }
    }

    if args.tree {
        output::print_section("Search tree");
        output::print_tree(app.tree())?;
    }

    if args.undo_demo > 0 {
        run_undo_demo(&mut app, args.undo_demo)?;
    }

    if let Some(path) = &args.output {
        let summary = RunSummary {
            algorithm: algorithm.key().to_string(),
            heuristic: app
                .configuration()
                .heuristic()
                .map(|h| h.key().to_string()),
            initial: app.configuration().initial_state().clone(),
            goal: app.configuration().goal_state().clone(),
            solved: !goal_path.is_empty(),
            steps,
            statistics: app.statistics().to_vec(),
            goal_path: goal_path.iter().map(|s| s.fresh_copy()).collect(),
        };
        export::write_run_summary(path, &summary)?;
        println!("\nRun summary written to {}", path.display());
    }

    Ok(())
}

/// Walk the action log backward and forward again, printing the tree size
/// at each point to show the history replaying exactly.
fn run_undo_demo(app: &mut ApplicationState, depth: usize) -> Result<()> {
    output::print_section("Undo/redo demo");
    let available = app.undo_count().min(depth);
    output::print_kv("Nodes before", &output::format_number(app.tree().len()));

    for _ in 0..available {
        app.undo()?;
    }
    output::print_kv(
        &format!("After {available} undos"),
        &output::format_number(app.tree().len()),
    );

    for _ in 0..available {
        app.redo()?;
    }
    output::print_kv(
        &format!("After {available} redos"),
        &output::format_number(app.tree().len()),
    );
    Ok(())
}
