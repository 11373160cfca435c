//! Filling the empty cells of a board with polyominoes, expressed as an exact
//! cover problem.
//!
//! Every empty cell must be covered exactly once. When the shape pool is
//! finite ([`SupplyModel::Queued`]) each pool shape may be used at most once,
//! which is encoded as one optional constraint per shape. With an unbounded
//! pool ([`SupplyModel::Catalog`]) shapes may be reused freely and no shape
//! constraints are generated.

use crate::{board::Board, config::SupplyModel, shape::Shape, ExactCover};

/// Instance of a board tiling puzzle.
#[derive(Debug)]
pub struct Tiling {
    /// The list of possible placements of shapes in the empty cells.
    pub possibilities: Vec<Placement>,
    /// The list of constraints that must be satisfied.
    pub constraints: Vec<Constraint>,
    // distinct orientations of each pool shape, indexed by `Placement`
    orientations: Vec<Vec<Shape>>,
}

impl Tiling {
    /// Create the tiling problem for the empty cells of `board`.
    ///
    /// Placements are listed in a fixed order: by orientation index, then by
    /// pool index, then by anchor in row-major order.
    pub fn new(board: &Board, pool: &[Shape], supply: SupplyModel) -> Self {
        let orientations: Vec<Vec<Shape>> = pool.iter().map(Shape::orientations).collect();
        let possibilities = Self::generate_all_possibilities(board, &orientations);

        let shape_constraints = match supply {
            SupplyModel::Catalog => 0,
            SupplyModel::Queued => pool.len(),
        };
        let constraints = Constraint::all(board, shape_constraints).collect();

        log::trace!(
            "Tiling [{}] empty cells with [{}] shapes: [{}] placements",
            board.empty_cells().count(),
            pool.len(),
            possibilities.len()
        );

        Self {
            possibilities,
            constraints,
            orientations,
        }
    }

    fn generate_all_possibilities(board: &Board, orientations: &[Vec<Shape>]) -> Vec<Placement> {
        let extent = board.extent();
        let max_orientations = orientations.iter().map(Vec::len).max().unwrap_or(0);
        let mut possibilities = Vec::new();

        for orientation in 0..max_orientations {
            for (shape_index, shape_orientations) in orientations.iter().enumerate() {
                let Some(shape) = shape_orientations.get(orientation) else {
                    continue;
                };
                // If the shape is larger than the board, skip it.
                if shape.height() > extent || shape.width() > extent {
                    continue;
                }

                for row in 0..=extent - shape.height() {
                    for column in 0..=extent - shape.width() {
                        let occupied_cells: Vec<_> = shape
                            .cells()
                            .iter()
                            .map(|&(r, c)| (row + r, column + c))
                            .collect();

                        let fits = occupied_cells
                            .iter()
                            .all(|&(r, c)| !board.is_occupied((r as isize, c as isize)));
                        if fits {
                            possibilities.push(Placement {
                                shape_index,
                                orientation,
                                anchor: (row, column),
                                occupied_cells,
                            });
                        }
                    }
                }
            }
        }

        possibilities
    }

    /// The oriented shape a placement puts on the board.
    pub fn oriented_shape(&self, placement: &Placement) -> &Shape {
        &self.orientations[placement.shape_index][placement.orientation]
    }
}

impl ExactCover for Tiling {
    type Constraint = Constraint;
    type Possibility = Placement;

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        poss.satisfies(cons)
    }

    fn is_optional(&self, cons: &Self::Constraint) -> bool {
        matches!(cons, Constraint::ShapeIndex(_))
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        &self.possibilities
    }

    fn constraints(&self) -> &[Self::Constraint] {
        &self.constraints
    }
}

/// A possible placement of a pool shape on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    /// Index of the shape in the pool.
    pub shape_index: usize,
    /// Index into the shape's distinct orientations.
    pub orientation: usize,
    /// Board position of the oriented shape's origin offset.
    pub anchor: (usize, usize),
    /// Board cells covered by the placement.
    pub occupied_cells: Vec<(usize, usize)>,
}

impl Placement {
    /// Check if this placement satisfies a given constraint.
    pub fn satisfies(&self, constraint: &Constraint) -> bool {
        match constraint {
            Constraint::ShapeIndex(index) => self.shape_index == *index,
            Constraint::Field(row, col) => self.occupied_cells.contains(&(*row, *col)),
        }
    }
}

/// A condition that must be satisfied in order to fill the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constraint {
    /// A pool shape may be placed at most once. Inner integer is the index of
    /// the shape in the pool.
    ShapeIndex(usize),
    /// An empty cell must be filled.
    Field(usize, usize),
}

impl Constraint {
    /// Return an iterator over the constraints for the empty cells of a board
    /// and `shape_count` pool shapes.
    pub fn all(board: &Board, shape_count: usize) -> impl Iterator<Item = Constraint> + '_ {
        let shape_it = (0..shape_count).map(Constraint::ShapeIndex);
        let field_it = board
            .empty_cells()
            .map(|(row, col)| Constraint::Field(row, col));

        shape_it.chain(field_it)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board::Occupant, catalog, shape::Color, Solver};
    use bumpalo::Bump;

    fn fill(board: &mut Board, cells: &[(isize, isize)]) {
        board
            .place(
                cells,
                Occupant {
                    piece: 0,
                    color: Color::Red,
                },
            )
            .unwrap();
    }

    #[test]
    fn test_placement_satisfies() {
        let placement = Placement {
            shape_index: 1,
            orientation: 0,
            anchor: (0, 0),
            occupied_cells: vec![(0, 0), (0, 1), (1, 0)],
        };
        assert!(placement.satisfies(&Constraint::ShapeIndex(1)));
        assert!(!placement.satisfies(&Constraint::ShapeIndex(0)));
        assert!(placement.satisfies(&Constraint::Field(1, 0)));
        assert!(!placement.satisfies(&Constraint::Field(1, 1)));
    }

    #[test]
    fn test_constraints_skip_occupied_cells() {
        let mut board = Board::new(2);
        fill(&mut board, &[(0, 0)]);

        let constraints: Vec<_> = Constraint::all(&board, 2).collect();
        assert_eq!(
            constraints,
            vec![
                Constraint::ShapeIndex(0),
                Constraint::ShapeIndex(1),
                Constraint::Field(0, 1),
                Constraint::Field(1, 0),
                Constraint::Field(1, 1),
            ]
        );
    }

    #[test]
    fn test_catalog_supply_has_no_shape_constraints() {
        let board = Board::new(2);
        let tiling = Tiling::new(&board, &[catalog::domino()], SupplyModel::Catalog);
        assert_eq!(tiling.constraints.len(), 4);
        assert!(tiling
            .constraints
            .iter()
            .all(|cons| !tiling.is_optional(cons)));
    }

    #[test]
    fn test_queued_supply_has_optional_shape_constraints() {
        let mut board = Board::new(2);
        fill(&mut board, &[(0, 0)]);
        let pool = vec![catalog::domino(), catalog::domino()];
        let tiling = Tiling::new(&board, &pool, SupplyModel::Queued);

        assert_eq!(tiling.constraints.len(), 2 + 3);
        let optional: Vec<_> = tiling
            .constraints
            .iter()
            .filter(|cons| tiling.is_optional(cons))
            .collect();
        assert_eq!(
            optional,
            vec![&Constraint::ShapeIndex(0), &Constraint::ShapeIndex(1)]
        );
    }

    #[test]
    fn test_generate_single_possibility() {
        let board = Board::new(2);
        let tiling = Tiling::new(&board, &[catalog::o_tetromino()], SupplyModel::Queued);

        assert_eq!(
            tiling.possibilities,
            vec![Placement {
                shape_index: 0,
                orientation: 0,
                anchor: (0, 0),
                occupied_cells: vec![(0, 0), (0, 1), (1, 0), (1, 1)],
            }]
        );
    }

    #[test]
    fn test_generate_no_possibilities() {
        let board = Board::new(1);
        let tiling = Tiling::new(&board, &[catalog::o_tetromino()], SupplyModel::Catalog);
        assert!(tiling.possibilities.is_empty());
    }

    #[test]
    fn test_possibilities_avoid_occupied_cells() {
        let mut board = Board::new(3);
        fill(&mut board, &[(1, 1)]);
        let tiling = Tiling::new(&board, &[catalog::domino()], SupplyModel::Catalog);

        // 12 domino positions on a 3x3 board, 4 of them touch the center
        assert_eq!(tiling.possibilities.len(), 8);
        assert!(tiling
            .possibilities
            .iter()
            .all(|p| !p.occupied_cells.contains(&(1, 1))));
    }

    #[test]
    fn test_possibility_order() {
        let board = Board::new(2);
        let pool = vec![catalog::domino(), catalog::bent_tromino()];
        let tiling = Tiling::new(&board, &pool, SupplyModel::Queued);

        let keys: Vec<_> = tiling
            .possibilities
            .iter()
            .map(|p| (p.orientation, p.shape_index, p.anchor))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        // domino: 2 orientations x 2 anchors, bent tromino: 4 orientations x 1
        assert_eq!(tiling.possibilities.len(), 8);
    }

    #[test]
    fn test_oriented_shape() {
        let board = Board::new(3);
        let tiling = Tiling::new(&board, &[catalog::domino()], SupplyModel::Catalog);
        let vertical = tiling
            .possibilities
            .iter()
            .find(|p| p.orientation == 1)
            .unwrap();
        assert_eq!(tiling.oriented_shape(vertical).cells(), &[(0, 0), (1, 0)]);
    }

    #[test]
    fn test_count_domino_tilings() {
        // a 4x4 square has 36 domino tilings
        let board = Board::new(4);
        let tiling = Tiling::new(&board, &[catalog::domino()], SupplyModel::Catalog);
        let arena = Bump::new();
        let solver = Solver::new(&tiling, &arena);
        assert_eq!(solver.count(), 36);
    }

    #[test]
    fn test_queued_supply_limits_reuse() {
        // a single domino covers the last row
        let mut board = Board::new(2);
        fill(&mut board, &[(0, 0), (0, 1)]);

        let tiling = Tiling::new(&board, &[catalog::domino()], SupplyModel::Queued);
        let arena = Bump::new();
        let mut solver = Solver::new(&tiling, &arena);
        let solution = solver.next_solution().unwrap();
        assert_eq!(solution.len(), 1);
        assert_eq!(solution[0].occupied_cells, vec![(1, 0), (1, 1)]);

        // three cells can not be split into dominoes
        let mut board = Board::new(2);
        fill(&mut board, &[(0, 0)]);
        let tiling = Tiling::new(
            &board,
            &[catalog::domino(), catalog::domino()],
            SupplyModel::Queued,
        );
        let arena = Bump::new();
        let mut solver = Solver::new(&tiling, &arena);
        assert!(solver.next_solution().is_none());
    }

    #[test]
    fn test_catalog_supply_allows_reuse() {
        let board = Board::new(2);
        let tiling = Tiling::new(&board, &[catalog::domino()], SupplyModel::Catalog);
        let arena = Bump::new();
        let solutions = Solver::new(&tiling, &arena).all_solutions();

        // two horizontal or two vertical dominoes
        assert_eq!(solutions.len(), 2);
        assert!(solutions.iter().all(|solution| solution.len() == 2));
    }
}
