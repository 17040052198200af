//! Command-line entry point for the puzzlegraph search engine

use anyhow::Result;
use clap::{Parser, Subcommand};

use puzzlegraph::cli::commands::{compare, scramble, solve};

#[derive(Parser)]
#[command(
    name = "puzzlegraph",
    about = "Graph-search engine for the 8-puzzle",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single search and print its result
    Solve(solve::SolveArgs),
    /// Run several algorithms over the same boards and tabulate the results
    Compare(compare::CompareArgs),
    /// Generate random solvable boards
    Scramble(scramble::ScrambleArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Solve(args) => solve::execute(args),
        Commands::Compare(args) => compare::execute(args),
        Commands::Scramble(args) => scramble::execute(args),
    }
}
