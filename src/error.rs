//! Error types for level, leaderboard and settings files
//!
//! The simulation itself never fails; only file-backed collaborators do.

use thiserror::Error;

/// Errors raised while reading or writing game files
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid level cell {found:?} at index {index}")]
    InvalidCell { index: usize, found: char },

    #[error("Level has {cells} cells, at most {max} fit the grid")]
    TooManyCells { cells: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
