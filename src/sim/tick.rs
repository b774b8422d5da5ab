//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Phase order
//! within a tick is fixed: inputs, drop dead rays, rays, balls, reclamation,
//! thresholds.

use glam::IVec2;

use super::ray::RayOutcome;
use super::state::{GamePhase, GameState};
use crate::error::CutError;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start a cut at this cell along the current axis
    pub cut: Option<IVec2>,
    /// Flip the cut axis (applied before `cut`)
    pub toggle_axis: bool,
    /// Manual reset to level 1
    pub restart: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Rays that reached a blocked cell and were committed
    pub commits: u32,
    /// Ball hits on uncommitted rays (one life each)
    pub kills: u32,
    /// Whether a reclamation pass ran
    pub reclaimed: bool,
    /// Phase after the tick
    pub phase: GamePhase,
    /// Rejected cut input, if any
    pub rejected_cut: Option<CutError>,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    let mut report = TickReport::default();

    if input.restart {
        state.start_level(1);
    }
    if input.toggle_axis {
        state.toggle_axis();
    }
    if let Some(cell) = input.cut {
        if let Err(err) = state.cut_at(cell.x, cell.y) {
            log::warn!("Cut rejected: {err}");
            report.rejected_cut = Some(err);
        }
    }

    // Nothing moves once the level is decided
    if state.phase != GamePhase::Play {
        report.phase = state.phase;
        return report;
    }

    state.time_ticks += 1;

    // Rays that died last tick leave the field now
    state.rays.retain(|r| r.is_alive());

    // Rays first; commits land on the grid, reclamation waits for the balls
    for ray in &mut state.rays {
        if let RayOutcome::Committed(cells) = ray.attempt_advance(&state.grid) {
            log::debug!("Ray committed {} cells", cells.len());
            state.grid.claim_all(cells);
            report.commits += 1;
        }
    }

    // Balls move, then hit any uncommitted trail they land on
    for ball in &mut state.balls {
        ball.attempt_move(&state.grid);
        let kills = ball.check_ray_collisions(&mut state.rays);
        if kills > 0 {
            log::debug!("Ball at {} destroyed {} ray(s)", ball.pos, kills);
            state.lives -= kills as i32;
            report.kills += kills;
        }
    }

    // One flood fill per tick, over post-move ball positions
    if report.commits > 0 {
        let balls: Vec<IVec2> = state.ball_positions().collect();
        state.grid.reclaim(balls);
        report.reclaimed = true;
    }

    state.evaluate_thresholds();
    report.phase = state.phase;
    report
}
