//! CLI subcommands.

pub mod compare;
pub mod scramble;
pub mod solve;
