//! Scramble command - Emit random solvable boards

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::output,
    puzzle::{PuzzleState, random_solvable, scramble_rng},
};

#[derive(Parser, Debug)]
#[command(about = "Generate random boards reachable from a goal board")]
pub struct ScrambleArgs {
    /// Number of boards to generate
    #[arg(long, short = 'c', default_value_t = 1)]
    pub count: usize,

    /// Goal board the scrambles must be able to reach; defaults to the
    /// solved board
    #[arg(long, short = 'g')]
    pub goal: Option<String>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print each board as a 3x3 grid instead of a comma-separated list
    #[arg(long)]
    pub pretty: bool,
}

pub fn execute(args: ScrambleArgs) -> Result<()> {
    let goal: PuzzleState = match &args.goal {
        Some(goal) => goal
            .parse()
            .with_context(|| format!("invalid --goal board '{goal}'"))?,
        None => PuzzleState::new(),
    };

    let mut rng = scramble_rng(args.seed);
    for i in 0..args.count {
        let board = random_solvable(&goal, &mut rng);
        if args.pretty {
            if i > 0 {
                println!();
            }
            println!("{}", output::render_board(&board));
        } else {
            let tiles: Vec<String> = board.tiles().iter().map(u8::to_string).collect();
            println!("{}", tiles.join(","));
        }
    }
    Ok(())
}
