//! Fixed-size store of committed cells.

use crate::{
    error::{Error, PlacementFault, Result},
    shape::Color,
};
use std::fmt;

/// An absolute board position `(row, column)`. Signed, because an active
/// shape may hang off the board while it is being positioned.
pub type Position = (isize, isize);

/// The committed shape that owns a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    /// Sequence number of the commit that wrote this cell, starting at zero.
    pub piece: u32,
    /// Color of the committed shape.
    pub color: Color,
}

/// Square grid of cells, each either empty or holding an [`Occupant`].
///
/// Cells are stored in a flat row-major vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    extent: usize,
    cells: Vec<Option<Occupant>>,
}

/// Full copy of a board's occupancy, used to restore it on undo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    extent: usize,
    cells: Vec<Option<Occupant>>,
}

impl Board {
    /// Create an empty board with `extent` cells per side.
    ///
    /// # Panics
    ///
    /// Panics if `extent` is zero.
    pub fn new(extent: usize) -> Self {
        assert!(extent > 0, "Board extent must be positive.");

        Self {
            extent,
            cells: vec![None; extent * extent],
        }
    }

    /// Cells per side.
    pub fn extent(&self) -> usize {
        self.extent
    }

    #[inline]
    fn to_index(&self, (row, column): Position) -> Option<usize> {
        if self.is_in_bounds((row, column)) {
            Some(row as usize * self.extent + column as usize)
        } else {
            None
        }
    }

    /// Return true if the position lies on the board.
    #[inline]
    pub fn is_in_bounds(&self, (row, column): Position) -> bool {
        let extent = self.extent as isize;
        (0..extent).contains(&row) && (0..extent).contains(&column)
    }

    /// Return true if the position is on the board and holds an occupant.
    pub fn is_occupied(&self, position: Position) -> bool {
        self.get(position).is_some()
    }

    /// Return the occupant at a position, or `None` for empty or off-board
    /// positions.
    pub fn get(&self, position: Position) -> Option<Occupant> {
        self.to_index(position).and_then(|index| self.cells[index])
    }

    /// Check that every position is on the board and empty.
    pub fn check_placement(&self, positions: &[Position]) -> Result<()> {
        for &(row, column) in positions {
            let fault = match self.to_index((row, column)) {
                None => PlacementFault::OutOfBounds,
                Some(index) if self.cells[index].is_some() => PlacementFault::Occupied,
                Some(_) => continue,
            };

            return Err(Error::InvalidPlacement { row, column, fault });
        }

        Ok(())
    }

    /// Write `occupant` into every position.
    ///
    /// Either all positions are written or, if any of them is off the board or
    /// already occupied, none are.
    pub fn place(&mut self, positions: &[Position], occupant: Occupant) -> Result<()> {
        self.check_placement(positions)?;

        for &position in positions {
            if let Some(index) = self.to_index(position) {
                self.cells[index] = Some(occupant);
            }
        }

        Ok(())
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Return true if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Return true if no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Return an iterator over the empty positions in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(move |(index, _)| (index / self.extent, index % self.extent))
    }

    /// Return an iterator over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), Option<Occupant>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| ((index / self.extent, index % self.extent), *cell))
    }

    /// Capture the full occupancy.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            extent: self.extent,
            cells: self.cells.clone(),
        }
    }

    /// Replace the occupancy with a previously captured snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot was taken from a board of a different extent.
    pub fn restore(&mut self, snapshot: &BoardSnapshot) {
        assert_eq!(
            snapshot.extent, self.extent,
            "Snapshot extent does not match board extent"
        );
        self.cells.clone_from(&snapshot.cells);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.extent) {
            for cell in row {
                let ch = cell.map_or('.', |occupant| occupant.color.letter());
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupant(piece: u32) -> Occupant {
        Occupant {
            piece,
            color: Color::Green,
        }
    }

    #[test]
    #[should_panic(expected = "Board extent must be positive.")]
    fn test_zero_extent() {
        let _ = Board::new(0);
    }

    #[test]
    fn test_bounds() {
        let board = Board::new(8);
        assert!(board.is_in_bounds((0, 0)));
        assert!(board.is_in_bounds((7, 7)));
        assert!(!board.is_in_bounds((8, 0)));
        assert!(!board.is_in_bounds((0, 8)));
        assert!(!board.is_in_bounds((-1, 3)));
        assert!(!board.is_in_bounds((3, -1)));
    }

    #[test]
    fn test_place_marks_cells() {
        let mut board = Board::new(4);
        board.place(&[(1, 1), (1, 2)], occupant(0)).unwrap();

        assert!(board.is_occupied((1, 1)));
        assert!(board.is_occupied((1, 2)));
        assert_eq!(board.get((1, 1)), Some(occupant(0)));
        assert_eq!(board.occupied_count(), 2);
        assert!(!board.is_occupied((-1, 0)));
    }

    #[test]
    fn test_place_out_of_bounds_is_atomic() {
        let mut board = Board::new(4);
        let before = board.clone();

        let err = board.place(&[(3, 3), (3, 4)], occupant(0)).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidPlacement {
                row: 3,
                column: 4,
                fault: PlacementFault::OutOfBounds
            }
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_place_occupied_is_atomic() {
        let mut board = Board::new(4);
        board.place(&[(0, 1)], occupant(0)).unwrap();
        let before = board.clone();

        let err = board.place(&[(0, 0), (0, 1)], occupant(1)).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidPlacement {
                row: 0,
                column: 1,
                fault: PlacementFault::Occupied
            }
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_place_then_clear() {
        let mut board = Board::new(3);
        board.place(&[(0, 0), (1, 1), (2, 2)], occupant(0)).unwrap();
        board.clear();
        assert!(board.is_empty());
        assert_eq!(board, Board::new(3));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new(2);
        board.place(&[(0, 0), (0, 1), (1, 0)], occupant(0)).unwrap();
        assert!(!board.is_full());
        assert_eq!(board.empty_cells().collect::<Vec<_>>(), vec![(1, 1)]);

        board.place(&[(1, 1)], occupant(1)).unwrap();
        assert!(board.is_full());
        assert_eq!(board.empty_cells().count(), 0);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut board = Board::new(4);
        board.place(&[(0, 0)], occupant(0)).unwrap();
        let snapshot = board.snapshot();

        board.place(&[(2, 2), (2, 3)], occupant(1)).unwrap();
        board.restore(&snapshot);

        assert!(board.is_occupied((0, 0)));
        assert!(!board.is_occupied((2, 2)));
        assert_eq!(board.snapshot(), snapshot);
    }

    #[test]
    #[should_panic(expected = "Snapshot extent does not match board extent")]
    fn test_restore_mismatched_extent() {
        let snapshot = Board::new(3).snapshot();
        Board::new(4).restore(&snapshot);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3);
        board.place(&[(0, 0), (1, 0)], occupant(0)).unwrap();
        assert_eq!(board.to_string(), "G..\nG..\n...\n");
    }
}
