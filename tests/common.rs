use grid_placement::{Board, Direction, GameConfig, Grid, Position, Shape};

/// Install the test logger once per test binary.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Start a game whose queue only ever offers `shape`.
#[allow(dead_code)]
pub fn single_shape_game(extent: usize, shape: Shape) -> Grid {
    Grid::new(
        GameConfig::default()
            .with_extent(extent)
            .with_catalog(vec![shape]),
    )
}

/// Move the active shape so its anchor lands on `target`.
///
/// # Panics
///  - If the game has no active shape.
#[allow(dead_code)]
pub fn move_to(grid: &mut Grid, target: Position) {
    let (row, column) = grid
        .active_shape()
        .expect("game has no active shape")
        .anchor();

    let vertical = if target.0 >= row {
        Direction::Down
    } else {
        Direction::Up
    };
    let horizontal = if target.1 >= column {
        Direction::Right
    } else {
        Direction::Left
    };

    for _ in 0..(target.0 - row).abs() {
        grid.move_active_shape(vertical);
    }
    for _ in 0..(target.1 - column).abs() {
        grid.move_active_shape(horizontal);
    }
}

/// Render the board as one string per row, `.` for empty cells and the
/// color letter for occupied ones.
#[allow(dead_code)]
pub fn board_rows(board: &Board) -> Vec<String> {
    board.to_string().lines().map(str::to_owned).collect()
}

/// Parse a board picture made of `.` (empty) and `#` (occupied) rows into
/// the positions of the occupied cells.
///
/// # Panics
///  - If the rows have different lengths or contain other characters.
#[allow(dead_code)]
pub fn parse_occupied(rows: &[&str]) -> Vec<Position> {
    let width = rows.first().map_or(0, |row| row.len());
    rows.iter()
        .enumerate()
        .flat_map(|(r, row)| {
            assert_eq!(row.len(), width, "Rows must all have the same length.");
            row.chars().enumerate().filter_map(move |(c, ch)| match ch {
                '#' => Some((r as isize, c as isize)),
                '.' => None,
                other => panic!("Unexpected character [{}] in board picture", other),
            })
        })
        .collect()
}
