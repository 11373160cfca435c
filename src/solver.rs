use crate::{sparse_grid::SparseGrid, ExactCover};
use bumpalo::Bump;
use core::iter;

/// Solver that iteratively returns solutions to exact cover problems.
///
/// The search is Knuth's Algorithm X over a dancing-links matrix, driven by an
/// explicit stack of frames instead of recursion so it can stop at any step
/// and resume later. At every level the uncovered primary constraint with the
/// fewest remaining possibilities is chosen, ties going to the constraint
/// listed first. Possibilities are tried in the order the problem lists
/// them, which makes the sequence of solutions reproducible.
#[derive(Debug)]
pub struct Solver<'a, E: ExactCover> {
    problem: &'a E,
    arena: &'a Bump,

    // Values used to track the state of solving
    grid: SparseGrid<'a>,
    partial_solution: Vec<usize>,
    stack: Vec<Frame>,
    // an instance with no primary constraints has exactly one, empty, solution
    pending_trivial: bool,

    steps: u64,
    step_limit: Option<u64>,
}

/// Outcome of a single call to [`Solver::search_next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search<T> {
    /// A solution was found. Calling again continues after it.
    Found(T),
    /// The search space is exhausted, there are no more solutions.
    Exhausted,
    /// The step limit was reached. The search can be resumed after raising
    /// the limit.
    OutOfBudget,
}

#[derive(Debug)]
enum FrameState {
    // Before covering the current row
    Cover,
    // After checking, before uncovering
    Uncover,
}

#[derive(Debug)]
struct Frame {
    column: usize,
    row_node: usize,
    state: FrameState,
}

impl<'a, E> Solver<'a, E>
where
    E: ExactCover,
{
    /// Create a new `Solver` with the given instance of an exact cover
    /// problem. The sparse matrix is allocated in `arena`.
    pub fn new(problem: &'a E, arena: &'a Bump) -> Self {
        let grid = Self::populate_grid(problem, arena);

        let mut solver = Self {
            problem,
            arena,

            grid,
            partial_solution: Vec::new(),
            stack: Vec::new(),
            pending_trivial: false,

            steps: 0,
            step_limit: None,
        };
        solver.start();

        solver
    }

    fn start(&mut self) {
        if self.grid.is_solved() {
            self.pending_trivial = true;
        } else {
            let column = Self::choose_column(&self.grid);
            self.push_frame(column);
        }
    }

    /// Reset all solver state except for the problem and the step limit.
    pub fn reset(&mut self) {
        self.grid = Self::populate_grid(self.problem, self.arena);
        self.partial_solution.clear();
        self.stack.clear();
        self.pending_trivial = false;
        self.steps = 0;
        self.start();
    }

    /// Limit the total number of search steps, `None` for no limit.
    pub fn set_step_limit(&mut self, step_limit: Option<u64>) {
        self.step_limit = step_limit;
    }

    /// Number of search steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn populate_grid(problem: &E, arena: &'a Bump) -> SparseGrid<'a> {
        let coordinates_iter = problem
            .possibilities()
            .iter()
            .enumerate()
            .flat_map({
                move |(row_idx, poss)| {
                    problem
                        .constraints()
                        .iter()
                        .enumerate()
                        .zip(iter::repeat((row_idx, poss)))
                        .map({
                            |((col_idx, cons), (row_idx, poss))| {
                                ((row_idx + 1, col_idx + 1), poss, cons)
                            }
                        })
                }
            })
            .filter_map(|(coord, poss, cons)| {
                if problem.satisfies(poss, cons) {
                    Some(coord)
                } else {
                    None
                }
            });

        let constraints = problem.constraints();
        SparseGrid::new(
            arena,
            constraints.len(),
            |column| !problem.is_optional(&constraints[column - 1]),
            coordinates_iter,
        )
    }

    /// Select a column to remove from the matrix.
    ///
    /// This implementation chooses the primary column that has the least
    /// number of entries uncovered in the grid.
    fn choose_column(grid: &SparseGrid<'a>) -> usize {
        grid.uncovered_columns()
            .min_by_key(|column| grid.column_size(*column))
            .expect("choose_column called on a solved grid")
    }

    fn push_frame(&mut self, column: usize) {
        self.grid.cover(column);
        self.stack.push(Frame {
            column,
            row_node: self.grid.down(column),
            state: FrameState::Cover,
        });
    }

    /// Return all possible solutions.
    pub fn all_solutions(&mut self) -> Vec<Vec<&'a E::Possibility>> {
        self.collect()
    }

    /// Compute up to the next solution, returning `None` if there are no more
    /// or the step limit was reached.
    pub fn next_solution(&mut self) -> Option<Vec<&'a E::Possibility>> {
        match self.search_next() {
            Search::Found(solution) => Some(solution),
            Search::Exhausted | Search::OutOfBudget => None,
        }
    }

    /// Compute up to the next solution, distinguishing an exhausted search
    /// from one stopped by the step limit.
    pub fn search_next(&mut self) -> Search<Vec<&'a E::Possibility>> {
        if self.pending_trivial {
            self.pending_trivial = false;
            return Search::Found(Vec::new());
        }

        while let Some(curr_frame) = self.stack.last_mut() {
            if self.step_limit.is_some_and(|limit| self.steps >= limit) {
                log::debug!("Solver stopped by step limit after [{}] steps", self.steps);
                return Search::OutOfBudget;
            }
            self.steps += 1;

            match curr_frame.state {
                FrameState::Cover => {
                    // Every row of this column has been tried.
                    if curr_frame.row_node == curr_frame.column {
                        let column = curr_frame.column;
                        self.stack.pop();
                        self.grid.uncover(column);
                        continue;
                    }

                    let row_node = curr_frame.row_node;
                    curr_frame.state = FrameState::Uncover;

                    self.partial_solution.push(self.grid.row_id(row_node) - 1);
                    self.grid.cover_row(row_node);

                    if self.grid.is_solved() {
                        let problem = self.problem;
                        return Search::Found(
                            self.partial_solution
                                .iter()
                                .map(|row_index| &problem.possibilities()[*row_index])
                                .collect(),
                        );
                    }

                    let column = Self::choose_column(&self.grid);
                    if self.grid.column_size(column) > 0 {
                        self.push_frame(column);
                    }
                }
                // Cleanup the current row, uncover its columns, remove the row
                // from the solution, and move on to the next row.
                FrameState::Uncover => {
                    let row_node = curr_frame.row_node;
                    self.grid.uncover_row(row_node);
                    self.partial_solution.pop();

                    curr_frame.row_node = self.grid.down(row_node);
                    curr_frame.state = FrameState::Cover;
                }
            }
        }

        Search::Exhausted
    }
}

impl<'a, E> Iterator for Solver<'a, E>
where
    E: ExactCover,
{
    type Item = Vec<&'a E::Possibility>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_solution()
    }
}
