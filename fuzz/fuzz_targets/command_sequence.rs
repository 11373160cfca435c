#![no_main]

use grid_placement::{Command, GameConfig, GameStatus, Grid};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct GameInput {
    seed: u64,
    extent: u8,
    commands: Vec<Command>,
}

fuzz_target!(|data: GameInput| {
    let extent = usize::from(data.extent % 6) + 1;
    let config = GameConfig::default()
        .with_extent(extent)
        .with_seed(data.seed)
        .with_step_limit(Some(10_000));
    let mut grid = Grid::new(config);

    for command in data.commands {
        let before = grid.clone();
        if grid.apply(command).is_err() {
            assert_eq!(grid, before);
        }

        let won = grid.status() == GameStatus::Won;
        assert_eq!(grid.has_won(), won);
        assert_eq!(grid.active_shape().is_none(), won);
        assert!(grid.history_len() <= grid.commit_count() as usize);
    }
});
