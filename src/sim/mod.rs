//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no clocks
//! - Seeded RNG only
//! - Stable iteration order (rays, then balls, in spawn order)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod ball;
pub mod frame;
pub mod grid;
pub mod ray;
pub mod state;
pub mod tick;
pub mod transition;

pub use ball::Ball;
pub use frame::{Frame, Scoreboard};
pub use grid::Grid;
pub use ray::{Axis, Direction, Ray, RayOutcome};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, TickReport, tick};
pub use transition::{Transition, TransitionAction};
