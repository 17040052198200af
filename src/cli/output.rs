//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    puzzle::{BOARD_SIDE, PuzzleState},
    tree::{NodeId, SearchTree},
    types::Statistic,
};

/// Create a progress bar for comparison runs
pub fn create_comparison_progress(total_runs: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_runs);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} runs ({msg})")
            .expect("Invalid progress bar template")
            .progress_chars("=>-"),
    );
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print a statistics snapshot
pub fn print_statistics(statistics: &[Statistic]) {
    for statistic in statistics {
        print_kv(statistic.name, &format_number(statistic.value));
    }
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print the search tree as an indented outline, one node per line with its
/// board key, kind, and expansion order.
pub fn print_tree(tree: &SearchTree) -> Result<()> {
    if let Some(root) = tree.root() {
        print_subtree(tree, root, 0)?;
    }
    Ok(())
}

fn print_subtree(tree: &SearchTree, id: NodeId, indent: usize) -> Result<()> {
    let state = tree.state(id)?;
    let order = state.expansion_order();
    let order = if order == 0 {
        "-".to_string()
    } else {
        order.to_string()
    };
    println!(
        "{}{} [{}] #{}",
        "  ".repeat(indent),
        state.board_key(),
        tree.kind(id)?,
        order
    );
    for &child in tree.children(id)? {
        print_subtree(tree, child, indent + 1)?;
    }
    Ok(())
}

/// Render a board as three rows, with `_` for the blank
pub fn render_board(state: &PuzzleState) -> String {
    let mut lines = Vec::with_capacity(BOARD_SIDE);
    for row in state.tiles().chunks(BOARD_SIDE) {
        let cells: Vec<String> = row
            .iter()
            .map(|&t| {
                if t == 0 {
                    "_".to_string()
                } else {
                    t.to_string()
                }
            })
            .collect();
        lines.push(cells.join(" "));
    }
    lines.join("\n")
}
