//! Game settings
//!
//! Every constant the reference game hard-codes, overridable from a JSON file.
//! Missing fields fall back to the reference values.

use std::path::Path;
use std::time::Duration;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Grid ===
    /// Grid height in cells
    pub rows: u32,
    /// Grid width in cells
    pub cols: u32,
    /// Pixel size of a cell (pointer mapping only)
    pub cell_size: f32,

    // === Timing ===
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u64,
    /// Cap on ticks run per driver update
    pub max_substeps: u32,
    /// Milliseconds the Finish/Lose overlay stays up before the next level
    pub transition_delay_ms: u64,

    // === Rules ===
    /// Percent claimed that completes a level
    pub finish_threshold: u32,
    /// Bonus life step above the threshold
    pub bonus_divisor: u32,
    /// Lives on entering level 1
    pub starting_lives: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            cell_size: CELL_SIZE,

            tick_interval_ms: TICK_INTERVAL_MS,
            max_substeps: MAX_SUBSTEPS,
            transition_delay_ms: TRANSITION_DELAY_MS,

            finish_threshold: FINISH_THRESHOLD,
            bonus_divisor: BONUS_DIVISOR,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file, or the reference defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.finish_threshold > 100 {
            return Err(ConfigError::ThresholdTooHigh(self.finish_threshold));
        }
        if self.bonus_divisor == 0 {
            return Err(ConfigError::ZeroBonusDivisor);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    /// Canvas size in pixels
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.cols as f32, self.rows as f32) * self.cell_size
    }

    /// Map a pointer position (relative to the canvas origin) to a cell.
    ///
    /// Returns `None` for points off the canvas, so input handlers never
    /// produce out-of-bounds cuts.
    pub fn cell_at_pixel(&self, pixel: Vec2) -> Option<IVec2> {
        let cell = (pixel / self.cell_size).floor();
        let (x, y) = (cell.x as i32, cell.y as i32);
        let in_bounds = pixel.x >= 0.0
            && pixel.y >= 0.0
            && (x as u32) < self.cols
            && (y as u32) < self.rows;
        in_bounds.then(|| IVec2::new(x, y))
    }
}
