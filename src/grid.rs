//! The game engine: active shape, board, shape queue and undo history.
//!
//! A [`Grid`] is either `Active`, with a shape being positioned, or `Won`,
//! once every board cell is occupied. Moving, rotating and flipping the
//! active shape never fail, the shape may sit off the board or on top of
//! committed cells while it is being positioned. Legality is checked when the
//! shape is committed.

use crate::{
    board::{Board, BoardSnapshot, Occupant, Position},
    config::{GameConfig, SupplyModel},
    error::{Error, Result},
    queue::ShapeQueue,
    shape::Shape,
    tiling::Tiling,
    Search, Solver,
};
use bumpalo::Bump;

/// Where a freshly promoted shape is anchored.
const SPAWN_ANCHOR: Position = (0, 0);

/// A direction the active shape can be moved in, one cell at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(fuzzing, derive(arbitrary::Arbitrary))]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Direction {
    /// The `(row, column)` change of a single step.
    pub fn delta(self) -> Position {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// A shape is being positioned.
    Active,
    /// Every cell is occupied. Terminal until undone or restarted.
    Won,
}

/// The shape being positioned, with its current anchor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveShape {
    shape: Shape,
    anchor: Position,
}

impl ActiveShape {
    fn spawn(shape: Shape) -> Self {
        Self {
            shape,
            anchor: SPAWN_ANCHOR,
        }
    }

    /// The shape in its current orientation.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Board position of the shape's origin offset.
    pub fn anchor(&self) -> Position {
        self.anchor
    }

    /// Absolute board positions covered by the shape. Some may be off the
    /// board.
    pub fn cells(&self) -> Vec<Position> {
        let (row, column) = self.anchor;
        self.shape
            .cells()
            .iter()
            .map(|&(r, c)| (row + r as isize, column + c as isize))
            .collect()
    }
}

/// A shape written to the board by auto-completion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacedShape {
    /// The shape in the orientation it was placed in.
    pub shape: Shape,
    /// Board position of the shape's origin offset.
    pub anchor: (usize, usize),
}

/// Successful result of [`Grid::auto_complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoCompletion {
    /// The shapes placed, in the order the search chose them.
    pub placements: Vec<PlacedShape>,
    /// Solver steps spent.
    pub steps: u64,
}

/// A single engine command, for hosts that dispatch input events uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(fuzzing, derive(arbitrary::Arbitrary))]
pub enum Command {
    /// [`Grid::move_active_shape`]
    Move(Direction),
    /// [`Grid::rotate_active_shape`]
    Rotate {
        /// Rotation direction.
        clockwise: bool,
    },
    /// [`Grid::flip_active_shape`]
    Flip {
        /// Mirror axis.
        horizontal: bool,
    },
    /// [`Grid::add_shape`]
    Commit,
    /// [`Grid::undo`]
    Undo,
    /// [`Grid::auto_complete`]
    AutoComplete,
}

/// State captured right before a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HistoryEntry {
    board: BoardSnapshot,
    queue: ShapeQueue,
    active: ActiveShape,
    next_piece: u32,
}

/// The puzzle engine.
///
/// Owns the board, the shape queue, the active shape and the undo history.
/// Callers drive it through the command methods and read back whatever they
/// need to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    config: GameConfig,
    board: Board,
    queue: ShapeQueue,
    // `None` once the game is won
    active: Option<ActiveShape>,
    history: Vec<HistoryEntry>,
    status: GameStatus,
    next_piece: u32,
}

impl Grid {
    /// Start a new game: empty board, freshly seeded queue, empty history.
    ///
    /// # Panics
    ///
    /// Panics if the configured extent is zero or the catalogue is empty.
    pub fn new(config: GameConfig) -> Self {
        let board = Board::new(config.extent);
        let queue = ShapeQueue::new(config.catalog.clone(), config.preview_len, config.seed);
        let active = ActiveShape::spawn(queue.current().clone());

        log::debug!(
            "New game on a [{0}x{0}] board with seed [{1}]",
            config.extent,
            config.seed
        );

        Self {
            config,
            board,
            queue,
            active: Some(active),
            history: Vec::new(),
            status: GameStatus::Active,
            next_piece: 0,
        }
    }

    /// Return a fresh game with the same configuration.
    ///
    /// `self` is left untouched, the caller swaps its handle to the returned
    /// engine.
    pub fn restart_game(&self) -> Grid {
        log::debug!("Restarting game after [{}] commits", self.next_piece);
        Grid::new(self.config.clone())
    }

    /// The configuration this game was started with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The committed cells.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The occupant of a board cell, if any.
    pub fn cell(&self, row: usize, column: usize) -> Option<Occupant> {
        self.board.get((row as isize, column as isize))
    }

    /// The shape being positioned, or `None` once the game is won.
    pub fn active_shape(&self) -> Option<&ActiveShape> {
        self.active.as_ref()
    }

    /// Absolute positions of the active shape, empty once the game is won.
    pub fn active_cells(&self) -> Vec<Position> {
        self.active.as_ref().map(ActiveShape::cells).unwrap_or_default()
    }

    /// The previewed shapes that follow the active one.
    pub fn upcoming(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.queue.upcoming()
    }

    /// Current lifecycle state.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of commits that can be undone.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Return true if there is a commit to undo.
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Number of shapes written to the board so far.
    pub fn commit_count(&self) -> u32 {
        self.next_piece
    }

    /// Translate the active shape by one cell. Legality is not checked.
    pub fn move_active_shape(&mut self, direction: Direction) {
        if let Some(active) = self.active.as_mut() {
            let (dr, dc) = direction.delta();
            active.anchor = (active.anchor.0 + dr, active.anchor.1 + dc);
            log::trace!("Moved active shape {:?} to {:?}", direction, active.anchor);
        }
    }

    /// Rotate the active shape by 90 degrees around its anchor.
    pub fn rotate_active_shape(&mut self, clockwise: bool) {
        if let Some(active) = self.active.as_mut() {
            active.shape = active.shape.rotated(clockwise);
            log::trace!("Rotated active shape, clockwise [{}]", clockwise);
        }
    }

    /// Mirror the active shape, keeping its anchor.
    pub fn flip_active_shape(&mut self, horizontal: bool) {
        if let Some(active) = self.active.as_mut() {
            active.shape = active.shape.flipped(horizontal);
            log::trace!("Flipped active shape, horizontal [{}]", horizontal);
        }
    }

    /// Return true if the active shape covers an occupied cell or leaves the
    /// board. This is the condition that blocks a commit.
    pub fn has_overlapping_shapes(&self) -> bool {
        match &self.active {
            Some(active) => self.board.check_placement(&active.cells()).is_err(),
            None => false,
        }
    }

    /// Return true if every board cell is occupied.
    pub fn has_won(&self) -> bool {
        self.board.is_full()
    }

    /// Commit the active shape to the board and promote the next shape.
    ///
    /// Fails with [`Error::IllegalCommit`] if the active shape overlaps or
    /// leaves the board, and with [`Error::GameOver`] once the game is won.
    /// Neither failure changes any state. Returns the status after the
    /// commit.
    pub fn add_shape(&mut self) -> Result<GameStatus> {
        let active = match &self.active {
            Some(active) if self.status == GameStatus::Active => active,
            _ => return Err(Error::GameOver),
        };

        let cells = active.cells();
        if self.board.check_placement(&cells).is_err() {
            log::debug!("Rejected commit at {:?}", active.anchor);
            return Err(Error::IllegalCommit);
        }

        let entry = HistoryEntry {
            board: self.board.snapshot(),
            queue: self.queue.clone(),
            active: active.clone(),
            next_piece: self.next_piece,
        };
        let occupant = Occupant {
            piece: self.next_piece,
            color: active.shape.color(),
        };

        self.board
            .place(&cells, occupant)
            .map_err(|_| Error::IllegalCommit)?;
        self.history.push(entry);
        self.next_piece += 1;

        log::debug!(
            "Committed piece [{}] at {:?}, [{}] cells occupied",
            occupant.piece,
            cells,
            self.board.occupied_count()
        );

        if self.has_won() {
            log::debug!("Board full after [{}] commits", self.next_piece);
            self.status = GameStatus::Won;
            self.active = None;
        } else {
            let next = self.queue.advance().clone();
            self.active = Some(ActiveShape::spawn(next));
        }

        Ok(self.status)
    }

    /// Restore the board, queue and active shape to how they were right
    /// before the most recent commit.
    ///
    /// Fails with [`Error::NothingToUndo`] when there is no history, leaving
    /// the state untouched.
    pub fn undo(&mut self) -> Result<()> {
        let entry = self.history.pop().ok_or(Error::NothingToUndo)?;

        self.board.restore(&entry.board);
        self.queue = entry.queue;
        self.active = Some(entry.active);
        self.next_piece = entry.next_piece;
        self.status = GameStatus::Active;

        log::debug!("Undid commit, [{}] left in history", self.history.len());
        Ok(())
    }

    /// Fill every empty cell using the configured shape supply.
    ///
    /// On success the whole placement sequence is written to the board, the
    /// game is won, and the history is cleared. On failure nothing changes:
    /// [`Error::NoSolutionFound`] means no filling exists with the available
    /// shapes, [`Error::SearchBudgetExhausted`] means the configured step
    /// limit ran out first.
    pub fn auto_complete(&mut self) -> Result<AutoCompletion> {
        let active = match &self.active {
            Some(active) if self.status == GameStatus::Active => active,
            _ => {
                return Ok(AutoCompletion {
                    placements: Vec::new(),
                    steps: 0,
                })
            }
        };

        let pool = match self.config.supply {
            SupplyModel::Catalog => self.config.catalog.clone(),
            SupplyModel::Queued => std::iter::once(active.shape.clone())
                .chain(self.queue.upcoming().cloned())
                .collect(),
        };

        let tiling = Tiling::new(&self.board, &pool, self.config.supply);
        let arena = Bump::new();
        let mut solver = Solver::new(&tiling, &arena);
        solver.set_step_limit(self.config.step_limit);

        let solution = match solver.search_next() {
            Search::Found(solution) => solution,
            Search::Exhausted => {
                log::debug!("Auto-complete found no solution in [{}] steps", solver.steps());
                return Err(Error::NoSolutionFound);
            }
            Search::OutOfBudget => {
                log::debug!("Auto-complete ran out of budget");
                return Err(Error::SearchBudgetExhausted {
                    steps: solver.steps(),
                });
            }
        };

        // Write to a copy so the board is only replaced once every placement
        // succeeded.
        let mut board = self.board.clone();
        let mut next_piece = self.next_piece;
        let mut placements = Vec::with_capacity(solution.len());
        for placement in solution {
            let shape = tiling.oriented_shape(placement);
            let cells: Vec<Position> = placement
                .occupied_cells
                .iter()
                .map(|&(r, c)| (r as isize, c as isize))
                .collect();
            board.place(
                &cells,
                Occupant {
                    piece: next_piece,
                    color: shape.color(),
                },
            )?;
            next_piece += 1;
            placements.push(PlacedShape {
                shape: shape.clone(),
                anchor: placement.anchor,
            });
        }
        assert!(board.is_full(), "Auto-complete solution left empty cells");

        log::debug!(
            "Auto-complete placed [{}] shapes in [{}] steps",
            placements.len(),
            solver.steps()
        );

        let steps = solver.steps();
        self.board = board;
        self.next_piece = next_piece;
        self.status = GameStatus::Won;
        self.active = None;
        self.history.clear();

        Ok(AutoCompletion { placements, steps })
    }

    /// Run a single command. Move, rotate and flip always succeed.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Move(direction) => self.move_active_shape(direction),
            Command::Rotate { clockwise } => self.rotate_active_shape(clockwise),
            Command::Flip { horizontal } => self.flip_active_shape(horizontal),
            Command::Commit => {
                self.add_shape()?;
            }
            Command::Undo => self.undo()?,
            Command::AutoComplete => {
                self.auto_complete()?;
            }
        }
        Ok(())
    }
}
