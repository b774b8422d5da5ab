//! Error types
//!
//! The simulation itself has no failure surface: out-of-bounds cells are walls,
//! not faults. Errors only exist at the boundaries (configuration, player input).

use glam::IVec2;
use thiserror::Error;

use crate::sim::GamePhase;

/// Invalid or unreadable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: u32, cols: u32 },
    #[error("finish threshold {0}% is above 100%")]
    ThresholdTooHigh(u32),
    #[error("bonus divisor must be non-zero")]
    ZeroBonusDivisor,
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
    #[error("cell size {0} must be positive")]
    InvalidCellSize(f32),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// A rejected player cut
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CutError {
    #[error("cuts are only accepted while playing (phase is {0:?})")]
    NotPlaying(GamePhase),
    #[error("cell {pos} is outside the {cols}x{rows} grid")]
    OutOfBounds { pos: IVec2, rows: u32, cols: u32 },
}
