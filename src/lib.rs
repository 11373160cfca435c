#![deny(missing_docs)]

//! Engine for a single-player grid-placement puzzle.
//!
//! Polyomino [`Shape`]s are positioned on a square [`Board`]: the player
//! moves, rotates and flips the active shape, then commits it. The [`Grid`]
//! engine tracks completion, keeps an undo history of commits and can
//! auto-complete the rest of the board by solving an
//! [exact cover](https://en.wikipedia.org/wiki/Exact_cover) problem with
//! [Dancing Links](https://en.wikipedia.org/wiki/Dancing_Links) and
//! [Algorithm X](https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X).
//!
//! The engine is pull based: callers invoke a command and then query the
//! state they want to display.
//!
//! ```
//! use grid_placement::{catalog, Direction, GameConfig, GameStatus, Grid};
//!
//! let config = GameConfig::default()
//!     .with_extent(4)
//!     .with_catalog(vec![catalog::o_tetromino()]);
//! let mut grid = Grid::new(config);
//!
//! for (moves_right, moves_down) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
//!     for _ in 0..moves_right {
//!         grid.move_active_shape(Direction::Right);
//!     }
//!     for _ in 0..moves_down {
//!         grid.move_active_shape(Direction::Down);
//!     }
//!     grid.add_shape().unwrap();
//! }
//!
//! assert_eq!(grid.status(), GameStatus::Won);
//! ```

pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod grid;
pub mod queue;
pub mod shape;
pub(crate) mod solver;
pub(crate) mod sparse_grid;
pub mod tiling;

pub use board::{Board, BoardSnapshot, Occupant, Position};
pub use config::{GameConfig, SupplyModel};
pub use error::{Error, PlacementFault, Result};
pub use grid::{ActiveShape, AutoCompletion, Command, Direction, GameStatus, Grid, PlacedShape};
pub use queue::ShapeQueue;
pub use shape::{Color, Shape};
pub use solver::{Search, Solver};

use bumpalo::Bump;

/// An instance of an exact cover problem.
pub trait ExactCover {
    /// The type of values that are elements of a solution to the exact cover
    /// problem.
    type Possibility: core::fmt::Debug;

    /// The type of value that are constraints on a given instance of an exact
    /// cover problem.
    type Constraint: core::fmt::Debug;

    /// Return true if the given `Possibility` will satisfy the given
    /// `Constraint`.
    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool;

    /// Return true if the given `Constraint` is optional, meaning it may be
    /// satisfied at most once instead of exactly once.
    fn is_optional(&self, cons: &Self::Constraint) -> bool;

    /// Return a list of possibilities for this instance of the problem.
    fn possibilities(&self) -> &[Self::Possibility];

    /// Return a list of constraints that must be satisfied for this instance of
    /// the problem.
    fn constraints(&self) -> &[Self::Constraint];

    /// Return an iterator over all solutions to this instance of the exact
    /// cover problem, with the search matrix allocated in `arena`.
    fn solver<'a>(&'a self, arena: &'a Bump) -> Solver<'a, Self>
    where
        Self: Sized,
    {
        Solver::new(self, arena)
    }
}

impl<E> ExactCover for &E
where
    E: ExactCover,
{
    type Constraint = E::Constraint;
    type Possibility = E::Possibility;

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        <E as ExactCover>::satisfies(self, poss, cons)
    }

    fn is_optional(&self, cons: &Self::Constraint) -> bool {
        <E as ExactCover>::is_optional(self, cons)
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        <E as ExactCover>::possibilities(self)
    }

    fn constraints(&self) -> &[Self::Constraint] {
        <E as ExactCover>::constraints(self)
    }
}
