//! 8-Puzzle Solver Library
//!
//! Finds shortest solutions to the 3x3 sliding tile puzzle with a
//! breadth-first search over board configurations.

pub mod board;
pub mod error;
pub mod grid;
pub mod persistence;
pub mod solver;

pub use board::{Board, Move};
pub use error::{Error, Result};
pub use solver::{solve, Node, SearchOutcome, SearchReport, SearchState, Searcher};
