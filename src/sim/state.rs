//! Game state and level progression
//!
//! One owned aggregate holds the grid, rays, balls, lives and level. Every
//! mutation goes through `&mut GameState`, so the phases of a tick never
//! interleave.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::grid::Grid;
use super::ray::{Axis, Ray};
use super::transition::{Transition, TransitionAction};
use crate::error::CutError;
use crate::settings::Settings;

/// Current phase of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Play,
    /// Level cleared, next level pending
    Finish,
    /// Out of lives, restart pending
    Lose,
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Occupancy grid
    pub grid: Grid,
    /// Active rays (at most one cut's pair)
    pub rays: Vec<Ray>,
    /// Active balls, one per level number
    pub balls: Vec<Ball>,
    /// Player lives; may dip below zero on the tick that loses
    pub lives: i32,
    /// Current level (1-based)
    pub level: u32,
    pub phase: GamePhase,
    /// Persistent cut orientation
    pub axis: Axis,
    /// Deferred level change waiting on the scheduler
    pub pending: Option<Transition>,
    /// Simulation tick counter
    pub time_ticks: u64,
    epoch: u64,
    rng: Pcg32,
}

impl GameState {
    /// Reference configuration, entering level 1
    pub fn new(seed: u64) -> Self {
        Self::with_settings(Settings::default(), seed)
    }

    /// Enter level 1 with custom settings (validated by the caller)
    pub fn with_settings(settings: Settings, seed: u64) -> Self {
        debug_assert!(settings.validate().is_ok(), "invalid settings: {settings:?}");
        let grid = Grid::new(settings.rows, settings.cols);
        let mut state = Self {
            lives: settings.starting_lives,
            settings,
            seed,
            grid,
            rays: Vec::new(),
            balls: Vec::new(),
            level: 1,
            phase: GamePhase::Play,
            axis: Axis::default(),
            pending: None,
            time_ticks: 0,
            epoch: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.start_level(1);
        state
    }

    /// Reset the board and enter level `n`.
    ///
    /// Lives reset only on level 1; otherwise they carry over, bonus included.
    /// Any pending transition is dropped and can no longer fire.
    pub fn start_level(&mut self, n: u32) {
        debug_assert!(n >= 1, "levels start at 1");
        let n = n.max(1);

        self.rays.clear();
        self.balls.clear();
        self.level = n;
        if n == 1 {
            self.lives = self.settings.starting_lives;
        }
        self.grid.reset();
        for _ in 0..n {
            let ball = Ball::spawn(&self.grid, &mut self.rng);
            self.balls.push(ball);
        }
        self.phase = GamePhase::Play;
        self.pending = None;
        self.epoch += 1;

        log::info!("Level {} started: {} balls, {} lives", n, self.balls.len(), self.lives);
    }

    /// Level epoch, bumped by every `start_level`
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Cut at `(x, y)` along the current axis
    pub fn cut_at(&mut self, x: i32, y: i32) -> Result<(), CutError> {
        self.cut_at_axis(x, y, self.axis)
    }

    /// Replace the active rays with a fresh pair leaving `(x, y)` along `axis`
    pub fn cut_at_axis(&mut self, x: i32, y: i32, axis: Axis) -> Result<(), CutError> {
        if self.phase != GamePhase::Play {
            return Err(CutError::NotPlaying(self.phase));
        }
        let pos = IVec2::new(x, y);
        if !self.grid.contains(pos) {
            return Err(CutError::OutOfBounds {
                pos,
                rows: self.grid.rows(),
                cols: self.grid.cols(),
            });
        }

        self.rays.clear();
        for direction in axis.directions() {
            self.rays.push(Ray::new(&self.grid, pos, direction));
        }
        log::debug!("Cut at {pos} ({axis:?})");
        Ok(())
    }

    /// Flip the cut orientation (allowed in any phase)
    pub fn toggle_axis(&mut self) -> Axis {
        self.axis = self.axis.toggled();
        self.axis
    }

    pub fn percent_claimed(&self) -> u32 {
        self.grid.percent_claimed()
    }

    pub fn ball_positions(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.balls.iter().map(|b| b.pos)
    }

    /// Fire a deferred transition. Returns false (and does nothing) when a
    /// level has started since the transition was scheduled.
    pub fn apply_transition(&mut self, transition: Transition) -> bool {
        if transition.epoch != self.epoch {
            log::warn!(
                "Ignoring stale transition {:?} (epoch {} != {})",
                transition.action,
                transition.epoch,
                self.epoch
            );
            return false;
        }
        self.start_level(transition.action.target_level());
        true
    }

    /// End-of-tick win/lose check. Only meaningful while playing.
    pub(super) fn evaluate_thresholds(&mut self) {
        if self.phase != GamePhase::Play {
            return;
        }

        let percent = self.percent_claimed();
        let action = if percent >= self.settings.finish_threshold {
            let bonus = self.finish_bonus(percent);
            self.lives += bonus;
            self.phase = GamePhase::Finish;
            log::info!(
                "Level {} complete at {}%: +{} lives ({} total)",
                self.level,
                percent,
                bonus,
                self.lives
            );
            TransitionAction::NextLevel(self.level + 1)
        } else if self.lives <= 0 {
            self.phase = GamePhase::Lose;
            log::info!("Game over on level {} at {}%", self.level, percent);
            TransitionAction::Restart
        } else {
            return;
        };

        self.pending = Some(Transition {
            after: self.settings.transition_delay(),
            action,
            epoch: self.epoch,
        });
    }

    /// Lives awarded for clearing a level at `percent`
    pub fn finish_bonus(&self, percent: u32) -> i32 {
        let excess = percent.saturating_sub(self.settings.finish_threshold);
        1 + (excess / self.settings.bonus_divisor) as i32
    }
}
