//! Idle/demo mode - picks cuts on its own
//!
//! Not a strong player: it cuts through a random open cell whenever no rays
//! are in flight, preferring cells away from balls.

use glam::IVec2;
use rand::Rng;

use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// Cells closer than this (Chebyshev) to a ball are avoided when possible
const BALL_CLEARANCE: i32 = 3;
/// Random probes before settling for any open cell
const MAX_ATTEMPTS: usize = 64;

/// Input for the next tick, or `None` to let the current cut play out
pub fn idle_input<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Option<TickInput> {
    if state.phase != GamePhase::Play || state.rays.iter().any(|r| r.is_alive()) {
        return None;
    }

    let cut = choose_cut(state, rng)?;
    Some(TickInput {
        cut: Some(cut),
        toggle_axis: rng.random_bool(0.5),
        ..Default::default()
    })
}

/// Random open cell, clear of balls if one can be found
pub fn choose_cut<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Option<IVec2> {
    let grid = &state.grid;
    let mut fallback = None;

    for _ in 0..MAX_ATTEMPTS {
        let cell = IVec2::new(
            rng.random_range(0..grid.cols() as i32),
            rng.random_range(0..grid.rows() as i32),
        );
        if !grid.is_open_at(cell) {
            continue;
        }
        let clear = state
            .ball_positions()
            .all(|b| (b - cell).abs().max_element() >= BALL_CLEARANCE);
        if clear {
            return Some(cell);
        }
        if fallback.is_none() {
            fallback = Some(cell);
        }
    }

    // Sparse board: scan for anything open
    fallback.or_else(|| {
        (0..grid.len())
            .find(|&i| !grid.cells()[i])
            .map(|i| grid.position(i))
    })
}
