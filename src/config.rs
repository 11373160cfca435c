//! Named constants and the per-game configuration.

use crate::{catalog, shape::Shape};

/// Number of cells along each side of the board.
pub const BOARD_EXTENT: usize = 8;

/// Size of a single tile in pixels. Presentation only.
pub const TILE_SIZE: u32 = 40;

/// Gap between tiles in pixels. Presentation only.
pub const TILE_PADDING: u32 = 2;

/// Number of upcoming shapes shown after the active one.
pub const DEFAULT_PREVIEW_LEN: usize = 2;

/// Seed used for the shape queue when none is given.
pub const DEFAULT_SEED: u64 = 0x5eed_5eed;

/// Upper bound on solver steps for a single auto-complete call.
pub const DEFAULT_STEP_LIMIT: u64 = 2_000_000;

/// Which shapes the auto-completion search may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupplyModel {
    /// Every catalogue shape, any number of times. This matches the live game,
    /// where a new shape is always drawn after a commit.
    Catalog,
    /// Only the active shape and the previewed upcoming shapes, each at most
    /// once.
    Queued,
}

/// Configuration of a single game.
///
/// A `Grid` keeps its configuration for its whole lifetime, and
/// `Grid::restart_game` reuses it, so a restarted game replays the same shape
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Cells per board side.
    pub extent: usize,
    /// Number of upcoming shapes queued behind the active one.
    pub preview_len: usize,
    /// Seed for the shape queue.
    pub seed: u64,
    /// Shapes the queue draws from.
    pub catalog: Vec<Shape>,
    /// Shape supply available to auto-completion.
    pub supply: SupplyModel,
    /// Maximum number of solver steps for auto-completion, `None` for no
    /// limit.
    pub step_limit: Option<u64>,
}

impl GameConfig {
    /// Set the board extent.
    pub fn with_extent(mut self, extent: usize) -> Self {
        self.extent = extent;
        self
    }

    /// Set the number of previewed upcoming shapes.
    pub fn with_preview_len(mut self, preview_len: usize) -> Self {
        self.preview_len = preview_len;
        self
    }

    /// Set the shape queue seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the shape catalogue.
    pub fn with_catalog(mut self, catalog: Vec<Shape>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the shape supply used by auto-completion.
    pub fn with_supply(mut self, supply: SupplyModel) -> Self {
        self.supply = supply;
        self
    }

    /// Set the solver step limit.
    pub fn with_step_limit(mut self, step_limit: Option<u64>) -> Self {
        self.step_limit = step_limit;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            extent: BOARD_EXTENT,
            preview_len: DEFAULT_PREVIEW_LEN,
            seed: DEFAULT_SEED,
            catalog: catalog::standard(),
            supply: SupplyModel::Catalog,
            step_limit: Some(DEFAULT_STEP_LIMIT),
        }
    }
}
