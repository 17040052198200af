//! Error types for the puzzlegraph crate

use thiserror::Error;

/// Main error type for the puzzlegraph crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("tile position ({x}, {y}) is out of bounds (each axis must be 0-2)")]
    PositionOutOfBounds { x: usize, y: usize },

    #[error("tile value {value} is out of bounds (must be 0-8)")]
    TileValueOutOfBounds { value: u8 },

    #[error("failed to locate tile value {value} on the board")]
    TileNotFound { value: u8 },

    #[error("tile array must use each value 0 through 8 exactly once")]
    NotAPermutation,

    #[error("no blank tile found while generating successors")]
    MissingBlank,

    #[error("invalid board '{input}': {reason}")]
    ParseBoard { input: String, reason: String },

    #[error("invalid algorithm '{input}'. Expected one of: {expected}")]
    ParseAlgorithm { input: String, expected: String },

    #[error("invalid heuristic '{input}'. Expected one of: {expected}")]
    ParseHeuristic { input: String, expected: String },

    #[error("invalid run mode '{input}'. Expected one of: {expected}")]
    ParseRunMode { input: String, expected: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("no tree node is mapped to state '{id}'")]
    UnknownState { id: String },

    #[error("node index {index} is not present in the tree arena")]
    UnknownNode { index: usize },

    #[error("cannot add more than one root node to the tree")]
    DuplicateRoot,

    #[error("cannot remove nodes from the tree without a parent state")]
    MissingParent,

    #[error("cannot remove node {index} while it still has children")]
    NodeHasChildren { index: usize },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
