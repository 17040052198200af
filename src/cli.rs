//! CLI infrastructure for the puzzlegraph teaching engine
//!
//! This module provides the command-line interface for running, comparing,
//! and generating 8-puzzle search problems.

pub mod commands;
pub mod output;
