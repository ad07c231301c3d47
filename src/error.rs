//! Error types for board parsing and validation.

use thiserror::Error;

/// Reasons a tile sequence is rejected before any search starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("wrong number of tiles: expected {expected}, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("tile {tile} at position {position} is out of range (expected 0-8)")]
    TileOutOfRange { tile: u32, position: usize },

    #[error("tile {tile} appears more than once")]
    DuplicateTile { tile: u8 },

    #[error("board has no blank tile (0)")]
    MissingBlank,

    #[error("invalid tile '{token}' (expected an integer 0-8)")]
    InvalidToken { token: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
