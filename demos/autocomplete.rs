//! Play a few shapes, then let the solver fill the rest of the board.
//! Usage:
//!
//! ```bash
//! RUST_LOG=debug cargo run --release --example autocomplete [seed]
//! ```

use grid_placement::{config::DEFAULT_SEED, Direction, Error, GameConfig, Grid};

fn main() {
    env_logger::init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => seed,
            Err(err) => {
                eprintln!("invalid seed [{}]: {}", arg, err);
                std::process::exit(1);
            }
        },
        None => DEFAULT_SEED,
    };

    let mut grid = Grid::new(GameConfig::default().with_seed(seed));

    // drop a shape near each corner of the board
    for (down, right) in [(0, 0), (0, 5), (5, 0), (5, 5)] {
        for _ in 0..down {
            grid.move_active_shape(Direction::Down);
        }
        for _ in 0..right {
            grid.move_active_shape(Direction::Right);
        }
        if let Err(err) = grid.add_shape() {
            println!("skipped a shape: {}", err);
        }
    }

    println!("After {} commits:\n{}", grid.commit_count(), grid.board());

    match grid.auto_complete() {
        Ok(completion) => {
            println!(
                "Filled with {} shapes in {} steps:\n{}",
                completion.placements.len(),
                completion.steps,
                grid.board()
            );
        }
        Err(err @ Error::NoSolutionFound) | Err(err @ Error::SearchBudgetExhausted { .. }) => {
            println!("Could not fill the board: {}", err);
        }
        Err(err) => {
            eprintln!("unexpected error: {}", err);
            std::process::exit(1);
        }
    }
}
