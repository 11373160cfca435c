//! Errors reported by the board and the engine.
//!
//! Every variant is recoverable: the operation that reported it left the
//! engine state exactly as it was before the call.

use thiserror::Error;

/// Why a board write was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementFault {
    /// The cell lies outside the board.
    OutOfBounds,
    /// The cell already holds an occupant.
    Occupied,
}

/// Errors that can occur while playing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A board write touched a cell that is out of bounds or occupied. The
    /// board was left unchanged.
    #[error("Invalid placement at ({row}, {column}): {fault:?}")]
    InvalidPlacement {
        /// Row of the first offending cell.
        row: isize,
        /// Column of the first offending cell.
        column: isize,
        /// What was wrong with the cell.
        fault: PlacementFault,
    },

    /// The active shape overlaps an occupied cell or leaves the board.
    #[error("Active shape cannot be committed in its current position")]
    IllegalCommit,

    /// There is no committed move to undo.
    #[error("Nothing to undo")]
    NothingToUndo,

    /// The search proved that the remaining cells cannot be filled with the
    /// available shapes.
    #[error("No solution found with the available shapes")]
    NoSolutionFound,

    /// The search was stopped by its step limit before reaching a verdict.
    #[error("Search stopped after {steps} steps without a verdict")]
    SearchBudgetExhausted {
        /// Number of steps taken.
        steps: u64,
    },

    /// The game is already won, no further commits are accepted.
    #[error("Game is already won")]
    GameOver,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
