//! Sparse dancing-links matrix for use in the `Solver`.
//!
//! Nodes live in a single arena-backed vector and refer to each other by
//! index, so covering and uncovering is plain index arithmetic with no
//! pointer chasing through separate allocations.
//!
//! Node `0` is the root. Nodes `1..=num_columns` are the column headers, so a
//! column id is also the index of its header. Every other node is an entry of
//! the matrix. Only primary columns are linked into the root's header list;
//! optional columns have self-linked headers, so they are never chosen but
//! still get covered when a row that uses them is selected.

use bumpalo::{collections::Vec as BumpVec, Bump};

const ROOT: usize = 0;

#[derive(Debug, Clone, Copy)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    column: usize,
    // 1-indexed row id, 0 for the root and column headers
    row: usize,
}

#[derive(Debug)]
pub(crate) struct SparseGrid<'a> {
    nodes: BumpVec<'a, Node>,
    sizes: BumpVec<'a, usize>,
}

impl<'a> SparseGrid<'a> {
    /// Create a new grid with `num_columns` columns and the given coordinates
    /// filled.
    ///
    /// Rows and columns are 1-indexed, matching the notation for matrices in
    /// general. Coordinates must be sorted by row, and by column within a
    /// row.
    pub fn new(
        arena: &'a Bump,
        num_columns: usize,
        is_primary: impl Fn(usize) -> bool,
        filled_coordinates: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut nodes = BumpVec::with_capacity_in(num_columns + 1, arena);
        let mut sizes = BumpVec::with_capacity_in(num_columns + 1, arena);

        nodes.push(Node {
            left: ROOT,
            right: ROOT,
            up: ROOT,
            down: ROOT,
            column: ROOT,
            row: 0,
        });
        sizes.push(0);

        for column in 1..=num_columns {
            nodes.push(Node {
                left: column,
                right: column,
                up: column,
                down: column,
                column,
                row: 0,
            });
            sizes.push(0);

            if is_primary(column) {
                let last = nodes[ROOT].left;
                nodes[column].left = last;
                nodes[column].right = ROOT;
                nodes[last].right = column;
                nodes[ROOT].left = column;
            }
        }

        let mut current_row = 0;
        let mut row_first = ROOT;
        for (row, column) in filled_coordinates {
            assert!(
                column >= 1 && column <= num_columns,
                "Column index [{}] out of range",
                column
            );
            assert!(row >= 1, "Row indices start at 1");
            assert!(row >= current_row, "Coordinates must be sorted by row");

            let index = nodes.len();
            let above = nodes[column].up;
            nodes.push(Node {
                left: index,
                right: index,
                up: above,
                down: column,
                column,
                row,
            });
            nodes[above].down = index;
            nodes[column].up = index;
            sizes[column] += 1;

            if row == current_row {
                let last = nodes[row_first].left;
                nodes[index].left = last;
                nodes[index].right = row_first;
                nodes[last].right = index;
                nodes[row_first].left = index;
            } else {
                current_row = row;
                row_first = index;
            }
        }

        Self { nodes, sizes }
    }

    /// Return true if every primary column is covered.
    #[inline]
    pub fn is_solved(&self) -> bool {
        self.nodes[ROOT].right == ROOT
    }

    /// Return an iterator over the uncovered primary columns, in column order.
    pub fn uncovered_columns(&self) -> impl Iterator<Item = usize> + '_ {
        let mut current = self.nodes[ROOT].right;
        std::iter::from_fn(move || {
            if current == ROOT {
                None
            } else {
                let column = current;
                current = self.nodes[current].right;
                Some(column)
            }
        })
    }

    /// Number of uncovered rows in a column.
    #[inline]
    pub fn column_size(&self, column: usize) -> usize {
        self.sizes[column]
    }

    /// The node below `node` in its column. For a column header, this is the
    /// first row node, or the header itself if the column is empty.
    #[inline]
    pub fn down(&self, node: usize) -> usize {
        self.nodes[node].down
    }

    /// The 1-indexed row id of an entry node.
    #[inline]
    pub fn row_id(&self, node: usize) -> usize {
        self.nodes[node].row
    }

    /// Cover a column and every row that appears in it.
    pub fn cover(&mut self, column: usize) {
        let Node { left, right, .. } = self.nodes[column];
        self.nodes[right].left = left;
        self.nodes[left].right = right;

        let mut i = self.nodes[column].down;
        while i != column {
            let mut j = self.nodes[i].right;
            while j != i {
                let Node { up, down, .. } = self.nodes[j];
                self.nodes[down].up = up;
                self.nodes[up].down = down;
                self.sizes[self.nodes[j].column] -= 1;
                j = self.nodes[j].right;
            }
            i = self.nodes[i].down;
        }
    }

    /// Undo the matching `cover` call. Calls must be made in the reverse order
    /// of the covers.
    pub fn uncover(&mut self, column: usize) {
        let mut i = self.nodes[column].up;
        while i != column {
            let mut j = self.nodes[i].left;
            while j != i {
                let Node { up, down, .. } = self.nodes[j];
                self.sizes[self.nodes[j].column] += 1;
                self.nodes[down].up = j;
                self.nodes[up].down = j;
                j = self.nodes[j].left;
            }
            i = self.nodes[i].up;
        }

        let Node { left, right, .. } = self.nodes[column];
        self.nodes[right].left = column;
        self.nodes[left].right = column;
    }

    /// Cover the columns of every other entry in the row of `node`.
    pub fn cover_row(&mut self, node: usize) {
        let mut j = self.nodes[node].right;
        while j != node {
            self.cover(self.nodes[j].column);
            j = self.nodes[j].right;
        }
    }

    /// Undo `cover_row`, uncovering in reverse order.
    pub fn uncover_row(&mut self, node: usize) {
        let mut j = self.nodes[node].left;
        while j != node {
            self.uncover(self.nodes[j].column);
            j = self.nodes[j].left;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Knuth's example matrix from "Dancing Links":
    //   A B C D E F G
    // 1 0 0 1 0 1 1 0
    // 2 1 0 0 1 0 0 1
    // 3 0 1 1 0 0 1 0
    // 4 1 0 0 1 0 0 0
    // 5 0 1 0 0 0 0 1
    // 6 0 0 0 1 1 0 1
    fn knuth_coordinates() -> Vec<(usize, usize)> {
        vec![
            (1, 3),
            (1, 5),
            (1, 6),
            (2, 1),
            (2, 4),
            (2, 7),
            (3, 2),
            (3, 3),
            (3, 6),
            (4, 1),
            (4, 4),
            (5, 2),
            (5, 7),
            (6, 4),
            (6, 5),
            (6, 7),
        ]
    }

    #[test]
    fn test_column_sizes() {
        let arena = Bump::new();
        let grid = SparseGrid::new(&arena, 7, |_| true, knuth_coordinates());

        let sizes: Vec<_> = (1..=7).map(|c| grid.column_size(c)).collect();
        assert_eq!(sizes, vec![2, 2, 2, 3, 2, 2, 3]);
        assert_eq!(grid.uncovered_columns().collect::<Vec<_>>(), (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn test_cover_uncover_restores() {
        let arena = Bump::new();
        let mut grid = SparseGrid::new(&arena, 7, |_| true, knuth_coordinates());

        grid.cover(1);
        assert_eq!(
            grid.uncovered_columns().collect::<Vec<_>>(),
            vec![2, 3, 4, 5, 6, 7]
        );
        // rows 2 and 4 are gone
        assert_eq!(grid.column_size(4), 1);
        assert_eq!(grid.column_size(7), 2);

        grid.uncover(1);
        let sizes: Vec<_> = (1..=7).map(|c| grid.column_size(c)).collect();
        assert_eq!(sizes, vec![2, 2, 2, 3, 2, 2, 3]);
        assert_eq!(grid.uncovered_columns().count(), 7);
    }

    #[test]
    fn test_optional_columns_not_listed() {
        let arena = Bump::new();
        let grid = SparseGrid::new(&arena, 7, |c| c <= 3, knuth_coordinates());
        assert_eq!(grid.uncovered_columns().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(grid.column_size(7), 3);
    }

    #[test]
    fn test_no_columns_is_solved() {
        let arena = Bump::new();
        let grid = SparseGrid::new(&arena, 0, |_| true, std::iter::empty());
        assert!(grid.is_solved());
    }

    #[test]
    fn test_rows_in_insertion_order() {
        let arena = Bump::new();
        let grid = SparseGrid::new(&arena, 7, |_| true, knuth_coordinates());

        let first = grid.down(4);
        let second = grid.down(first);
        let third = grid.down(second);
        assert_eq!(
            [grid.row_id(first), grid.row_id(second), grid.row_id(third)],
            [2, 4, 6]
        );
        assert_eq!(grid.down(third), 4);
    }
}
