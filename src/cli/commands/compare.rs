//! Compare command - Benchmark algorithms against the same boards

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;

use crate::{
    app::{ApplicationState, Configuration},
    cli::output,
    export::{self, ComparisonRow},
    puzzle::{HeuristicKind, PuzzleState, random_solvable, scramble_rng},
    search::{AlgorithmKind, STAT_CLOSED_LIST, STAT_OPEN_LIST},
    types::find_statistic,
};

#[derive(Parser, Debug)]
#[command(about = "Run several algorithms over the same boards and tabulate the results")]
pub struct CompareArgs {
    /// Algorithm specs, either `bfs` or `astar:manhattan`
    #[arg(required = true)]
    pub specs: Vec<String>,

    /// Compare on this single board instead of random scrambles
    #[arg(long, short = 'i')]
    pub initial: Option<String>,

    /// Goal board; defaults to the solved board
    #[arg(long, short = 'g')]
    pub goal: Option<String>,

    /// Number of random scrambles to compare on
    #[arg(long, default_value_t = 5)]
    pub boards: usize,

    /// Seed for reproducible scrambles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum steps per run before giving up
    #[arg(long, default_value_t = 1_000_000)]
    pub max_steps: usize,

    /// Write the results as CSV to this path
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// One algorithm/heuristic combination parsed from a spec argument.
#[derive(Debug, Clone, Copy)]
struct Combination {
    algorithm: AlgorithmKind,
    heuristic: Option<HeuristicKind>,
}

impl Combination {
    fn parse(spec: &str) -> Result<Self> {
        let (algorithm, heuristic) = match spec.split_once(':') {
            Some((algorithm, heuristic)) => {
                (algorithm.parse::<AlgorithmKind>()?, Some(heuristic.parse()?))
            }
            None => (spec.parse::<AlgorithmKind>()?, None),
        };
        if !algorithm.uses_heuristic() && heuristic.is_some() {
            bail!("'{}' does not take a heuristic", algorithm.key());
        }
        Ok(Self {
            algorithm,
            heuristic,
        })
    }

    fn label(&self) -> String {
        match self.heuristic {
            Some(heuristic) => format!("{}:{}", self.algorithm.key(), heuristic.key()),
            None => self.algorithm.key().to_string(),
        }
    }
}

pub fn execute(args: CompareArgs) -> Result<()> {
    let combinations: Vec<Combination> = args
        .specs
        .iter()
        .map(|spec| Combination::parse(spec))
        .collect::<Result<_>>()?;

    let goal: PuzzleState = match &args.goal {
        Some(goal) => goal
            .parse()
            .with_context(|| format!("invalid --goal board '{goal}'"))?,
        None => PuzzleState::new(),
    };
    let boards = collect_boards(&args, &goal)?;

    output::print_section("Comparison");
    output::print_kv("Combinations", &output::format_number(combinations.len()));
    output::print_kv("Boards", &output::format_number(boards.len()));

    let progress =
        output::create_comparison_progress((combinations.len() * boards.len()) as u64);
    let mut rows = Vec::with_capacity(combinations.len() * boards.len());
    for combination in &combinations {
        for board in &boards {
            progress.set_message(combination.label());
            rows.push(run_combination(combination, board, &goal, args.max_steps)?);
            progress.inc(1);
        }
    }
    progress.finish_and_clear();

    print_table(&rows);

    if let Some(path) = &args.output {
        export::write_comparison_csv(path, &rows)?;
        println!("\nResults written to {}", path.display());
    }
    Ok(())
}

fn collect_boards(args: &CompareArgs, goal: &PuzzleState) -> Result<Vec<PuzzleState>> {
    if let Some(initial) = &args.initial {
        let board: PuzzleState = initial
            .parse()
            .with_context(|| format!("invalid --initial board '{initial}'"))?;
        return Ok(vec![board]);
    }
    if args.boards == 0 {
        bail!("--boards must be at least 1");
    }
    let mut rng = scramble_rng(args.seed);
    Ok((0..args.boards)
        .map(|_| random_solvable(goal, &mut rng))
        .collect())
}

fn run_combination(
    combination: &Combination,
    board: &PuzzleState,
    goal: &PuzzleState,
    max_steps: usize,
) -> Result<ComparisonRow> {
    let mut configuration = Configuration::new()
        .with_initial_state(board.fresh_copy())
        .with_goal_state(goal.fresh_copy())
        .with_algorithm(combination.algorithm);
    if let Some(heuristic) = combination.heuristic {
        configuration.set_heuristic(heuristic);
    }

    let mut app = ApplicationState::new(configuration);
    app.start()?;

    let mut steps = 0usize;
    while app.is_running() && steps < max_steps {
        app.next()?;
        steps += 1;
    }
    if !app.is_complete() {
        return Err(anyhow!(
            "{} did not terminate on {} within {} steps",
            combination.label(),
            board.board_key(),
            max_steps
        ));
    }

    let goal_depth = app
        .goal_path()
        .and_then(|path| path.last().map(|state| state.depth()));
    Ok(ComparisonRow {
        algorithm: combination.algorithm.key().to_string(),
        heuristic: combination
            .heuristic
            .map(|h| h.key().to_string())
            .unwrap_or_default(),
        board: board.board_key().to_string(),
        solved: goal_depth.is_some(),
        steps,
        open_list: statistic_value(&app, STAT_OPEN_LIST),
        closed_list: statistic_value(&app, STAT_CLOSED_LIST),
        goal_depth,
    })
}

fn statistic_value(app: &ApplicationState, name: &str) -> usize {
    find_statistic(app.statistics(), name).map_or(0, |statistic| statistic.value)
}

fn print_table(rows: &[ComparisonRow]) {
    println!(
        "\n{:<18} {:>22} {:>8} {:>10} {:>10} {:>6}",
        "Algorithm", "Board", "Steps", "Open", "Closed", "Depth"
    );
    for row in rows {
        let label = if row.heuristic.is_empty() {
            row.algorithm.clone()
        } else {
            format!("{}:{}", row.algorithm, row.heuristic)
        };
        let depth = row
            .goal_depth
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<18} {:>22} {:>8} {:>10} {:>10} {:>6}",
            label,
            row.board,
            output::format_number(row.steps),
            output::format_number(row.open_list),
            output::format_number(row.closed_list),
            depth,
        );
    }
}
