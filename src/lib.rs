//! Cutline - a territory-capture arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, rays, balls, level progression)
//! - `driver`: Fixed-cadence scheduler that runs ticks and fires level transitions
//! - `settings`: Configuration with reference defaults
//! - `error`: Error types for configuration and player input

pub mod driver;
pub mod error;
pub mod settings;
pub mod sim;

pub use driver::{Driver, Renderer};
pub use error::{ConfigError, CutError};
pub use settings::Settings;

use glam::IVec2;

/// Game configuration constants (reference behavior)
pub mod consts {
    /// Grid dimensions in cells
    pub const GRID_ROWS: u32 = 20;
    pub const GRID_COLS: u32 = 20;

    /// Pixel size of one cell (400x400 canvas)
    pub const CELL_SIZE: f32 = 20.0;

    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const TICK_INTERVAL_MS: u64 = 17;
    /// Maximum ticks per driver update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Percent claimed that completes a level
    pub const FINISH_THRESHOLD: u32 = 75;
    /// Every this many percent above the threshold earns another bonus life
    pub const BONUS_DIVISOR: u32 = 7;
    /// Lives granted when (re)entering level 1
    pub const STARTING_LIVES: i32 = 3;

    /// Delay between Finish/Lose and the next level starting
    pub const TRANSITION_DELAY_MS: u64 = 3000;
}

/// Row-major cell index for `pos` on a grid `cols` wide.
///
/// Callers must bounds-check first; see [`sim::Grid::index`].
#[inline]
pub fn cell_index(pos: IVec2, cols: u32) -> usize {
    pos.x as usize + pos.y as usize * cols as usize
}

/// Inverse of [`cell_index`]
#[inline]
pub fn cell_position(index: usize, cols: u32) -> IVec2 {
    let cols = cols as usize;
    IVec2::new((index % cols) as i32, (index / cols) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip_non_square() {
        let pos = IVec2::new(7, 3);
        let idx = cell_index(pos, 11);
        assert_eq!(idx, 7 + 3 * 11);
        assert_eq!(cell_position(idx, 11), pos);
    }
}
