#![no_main]

use grid_placement::{Direction, GameConfig, Grid, SupplyModel};
use libfuzzer_sys::fuzz_target;

const EXTENT: usize = 5;

#[derive(Debug)]
struct PrefilledGame {
    seed: u64,
    queued: bool,
    targets: Vec<(isize, isize)>,
}

impl<'a> arbitrary::Arbitrary<'a> for PrefilledGame {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let targets = u
            .arbitrary::<[u8; 6]>()?
            .into_iter()
            .map(usize::from)
            .map(|byte| ((byte % EXTENT) as isize, ((byte / EXTENT) % EXTENT) as isize))
            .collect();

        Ok(PrefilledGame {
            seed: u.arbitrary()?,
            queued: u.arbitrary()?,
            targets,
        })
    }
}

fuzz_target!(|data: PrefilledGame| {
    let supply = if data.queued {
        SupplyModel::Queued
    } else {
        SupplyModel::Catalog
    };
    let mut grid = Grid::new(
        GameConfig::default()
            .with_extent(EXTENT)
            .with_seed(data.seed)
            .with_supply(supply)
            .with_step_limit(Some(20_000)),
    );

    for (row, column) in data.targets {
        for _ in 0..row {
            grid.move_active_shape(Direction::Down);
        }
        for _ in 0..column {
            grid.move_active_shape(Direction::Right);
        }
        let _ = grid.add_shape();
    }

    let before = grid.clone();
    match grid.auto_complete() {
        Ok(_) => assert!(grid.board().is_full()),
        Err(_) => assert_eq!(grid, before),
    }
});
