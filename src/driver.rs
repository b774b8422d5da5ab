//! Fixed-cadence scheduler
//!
//! Turns wall-clock time into simulation ticks and fires deferred level
//! transitions once their delay has passed. The simulation never sees time.

use std::time::Duration;

use crate::sim::{Frame, GameState, TickInput, Transition, tick};

/// Largest frame delta accepted; longer stalls are dropped, not replayed
const MAX_FRAME_TIME: Duration = Duration::from_millis(100);

/// Receives a read-only frame after every simulated tick
pub trait Renderer {
    fn render(&mut self, frame: &Frame);
}

/// Renderer that draws nothing
impl Renderer for () {
    fn render(&mut self, _frame: &Frame) {}
}

/// Drives a `GameState` at a fixed tick interval
#[derive(Debug)]
pub struct Driver {
    pub state: GameState,
    /// One-shot inputs, cleared after the next tick consumes them
    pub input: TickInput,
    accumulator: Duration,
    countdown: Option<(Transition, Duration)>,
}

impl Driver {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            input: TickInput::default(),
            accumulator: Duration::ZERO,
            countdown: None,
        }
    }

    /// Manual reset: level 1 now, any pending countdown dropped
    pub fn restart(&mut self) {
        self.state.start_level(1);
        self.countdown = None;
        self.accumulator = Duration::ZERO;
    }

    /// Time left before the pending transition fires
    pub fn transition_remaining(&self) -> Option<Duration> {
        self.countdown.map(|(_, left)| left)
    }

    /// Advance by `elapsed` wall time. Returns the number of ticks run.
    pub fn update(&mut self, elapsed: Duration, renderer: &mut dyn Renderer) -> u32 {
        let elapsed = elapsed.min(MAX_FRAME_TIME);
        let interval = self.state.settings.tick_interval();
        let max_substeps = self.state.settings.max_substeps;
        self.accumulator += elapsed;

        let mut substeps = 0;
        while self.accumulator >= interval && substeps < max_substeps {
            let input = std::mem::take(&mut self.input);
            tick(&mut self.state, &input);
            renderer.render(&Frame::capture(&self.state));
            self.accumulator -= interval;
            substeps += 1;
        }
        // Drop backlog the substep cap refused to run
        if substeps == max_substeps {
            self.accumulator = self.accumulator.min(interval);
        }

        self.advance_transition(elapsed);
        substeps
    }

    fn advance_transition(&mut self, elapsed: Duration) {
        let Some(pending) = self.state.pending else {
            self.countdown = None;
            return;
        };

        let left = match self.countdown {
            // The countdown started with this transition; keep counting
            Some((t, left)) if t == pending => left.saturating_sub(elapsed),
            // Newly pending: the first frame only arms it
            _ => pending.after,
        };

        if left.is_zero() {
            log::info!("Firing transition {:?}", pending.action);
            self.countdown = None;
            self.state.apply_transition(pending);
        } else {
            self.countdown = Some((pending, left));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Ball, GamePhase, TransitionAction};
    use glam::IVec2;

    /// Counts frames and remembers the last overlay
    #[derive(Default)]
    struct Recorder {
        frames: u32,
        overlay: Option<String>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, frame: &Frame) {
            self.frames += 1;
            self.overlay = frame.overlay.clone();
        }
    }

    fn losing_driver() -> Driver {
        let mut state = GameState::new(77);
        state.balls = vec![Ball::new(IVec2::new(9, 11), IVec2::new(1, -1))];
        state.lives = 1;
        state.cut_at(10, 10).unwrap();
        Driver::new(state)
    }

    #[test]
    fn test_ticks_at_fixed_interval() {
        let mut driver = Driver::new(GameState::new(1));
        let mut recorder = Recorder::default();
        assert_eq!(driver.update(Duration::from_millis(10), &mut recorder), 0);
        assert_eq!(driver.update(Duration::from_millis(10), &mut recorder), 1);
        assert_eq!(driver.update(Duration::from_millis(34), &mut recorder), 2);
        assert_eq!(recorder.frames, 3);
        assert_eq!(driver.state.time_ticks, 3);
    }

    #[test]
    fn test_substep_cap() {
        let mut driver = Driver::new(GameState::new(1));
        // 100ms clamp / 17ms = 5 ticks, under the cap of 8
        assert_eq!(driver.update(Duration::from_secs(5), &mut ()), 5);

        driver.state.settings.max_substeps = 2;
        assert_eq!(driver.update(Duration::from_millis(100), &mut ()), 2);
        // Backlog beyond one interval was dropped
        assert!(driver.update(Duration::ZERO, &mut ()) <= 1);
    }

    #[test]
    fn test_one_shot_input_consumed() {
        let mut driver = Driver::new(GameState::new(1));
        driver.input.toggle_axis = true;
        driver.update(Duration::from_millis(17), &mut ());
        driver.update(Duration::from_millis(17), &mut ());
        assert_eq!(driver.state.axis, crate::sim::Axis::Horizontal);
        assert!(!driver.input.toggle_axis);
    }

    #[test]
    fn test_lose_then_restart_after_delay() {
        let mut driver = losing_driver();
        let mut recorder = Recorder::default();
        driver.update(Duration::from_millis(17), &mut recorder);
        assert_eq!(driver.state.phase, GamePhase::Lose);
        assert_eq!(recorder.overlay.as_deref(), Some("Game Over"));
        assert_eq!(driver.transition_remaining(), Some(Duration::from_millis(3000)));

        // 29 x 100ms = 2.9s: still waiting
        for _ in 0..29 {
            driver.update(Duration::from_millis(100), &mut recorder);
        }
        assert_eq!(driver.state.phase, GamePhase::Lose);

        driver.update(Duration::from_millis(100), &mut recorder);
        assert_eq!(driver.state.phase, GamePhase::Play);
        assert_eq!(driver.state.level, 1);
        assert_eq!(driver.state.lives, 3);
        assert!(driver.transition_remaining().is_none());
    }

    #[test]
    fn test_manual_restart_cancels_countdown() {
        let mut driver = losing_driver();
        driver.update(Duration::from_millis(17), &mut ());
        let stale = driver.state.pending.unwrap();
        assert_eq!(stale.action, TransitionAction::Restart);

        driver.restart();
        assert!(driver.transition_remaining().is_none());
        // A late fire of the old transition changes nothing
        driver.state.lives = 2;
        assert!(!driver.state.apply_transition(stale));
        assert_eq!(driver.state.lives, 2);

        for _ in 0..40 {
            driver.update(Duration::from_millis(100), &mut ());
        }
        assert_eq!(driver.state.level, 1);
    }

    #[test]
    fn test_finish_advances_level() {
        let mut state = GameState::new(5);
        state.balls = vec![Ball::new(IVec2::new(19, 19), IVec2::ZERO)];
        state.grid.claim_all(0..300);
        let mut driver = Driver::new(state);

        driver.update(Duration::from_millis(17), &mut ());
        assert_eq!(driver.state.phase, GamePhase::Finish);
        assert_eq!(driver.state.lives, 4);

        for _ in 0..30 {
            driver.update(Duration::from_millis(100), &mut ());
        }
        assert_eq!(driver.state.level, 2);
        assert_eq!(driver.state.balls.len(), 2);
        assert_eq!(driver.state.lives, 4);
        assert_eq!(driver.state.percent_claimed(), 0);
    }
}
