//! Read-only view of a tick's outcome
//!
//! Renderers and scoreboards receive a `Frame` after every tick. They can draw
//! or serialize it but never feed anything back into the simulation.

use glam::IVec2;
use serde::Serialize;

use super::ray::Axis;
use super::state::{GamePhase, GameState};

/// Scoreboard text, as shown next to the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub lives: String,
    pub level: String,
    pub percent: String,
}

/// Snapshot of everything a renderer draws
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub rows: u32,
    pub cols: u32,
    /// Claimed flags, row-major
    pub cells: Vec<bool>,
    pub balls: Vec<IVec2>,
    /// Trail cell indices of every ray still on the field
    pub trails: Vec<Vec<usize>>,
    pub lives: i32,
    pub level: u32,
    pub percent: u32,
    pub phase: GamePhase,
    pub axis: Axis,
    pub scoreboard: Scoreboard,
    /// Overlay message while a level transition is pending
    pub overlay: Option<String>,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let percent = state.percent_claimed();
        let overlay = match state.phase {
            GamePhase::Play => None,
            GamePhase::Finish => Some(format!("Level {} Complete", state.level)),
            GamePhase::Lose => Some("Game Over".to_string()),
        };

        Self {
            rows: state.grid.rows(),
            cols: state.grid.cols(),
            cells: state.grid.cells().to_vec(),
            balls: state.ball_positions().collect(),
            trails: state.rays.iter().map(|r| r.trail().to_vec()).collect(),
            lives: state.lives,
            level: state.level,
            percent,
            phase: state.phase,
            axis: state.axis,
            scoreboard: Scoreboard {
                lives: format!("{} lives", state.lives),
                level: format!("level {}", state.level),
                percent: format!("cleared {percent}%"),
            },
            overlay,
        }
    }

    /// Text rendering: `#` claimed, `.` open, `*` ray trail, `o` ball
    pub fn to_ascii(&self) -> String {
        let cols = self.cols as usize;
        let mut glyphs: Vec<char> = self
            .cells
            .iter()
            .map(|&claimed| if claimed { '#' } else { '.' })
            .collect();

        for &i in self.trails.iter().flatten() {
            if let Some(g) = glyphs.get_mut(i) {
                *g = '*';
            }
        }
        for ball in &self.balls {
            let i = ball.x as usize + ball.y as usize * cols;
            if let Some(g) = glyphs.get_mut(i) {
                *g = 'o';
            }
        }

        let mut out = String::with_capacity(glyphs.len() + self.rows as usize * 2 + 64);
        for row in glyphs.chunks(cols) {
            out.extend(row);
            out.push('\n');
        }
        out.push_str(&format!(
            "{} | {} | {}",
            self.scoreboard.lives, self.scoreboard.level, self.scoreboard.percent
        ));
        if let Some(msg) = &self.overlay {
            out.push_str(&format!(" | {msg}"));
        }
        out
    }
}
