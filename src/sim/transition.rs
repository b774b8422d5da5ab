//! Deferred level transitions
//!
//! Finishing or losing a level does not change level immediately; the session
//! records what should happen after the overlay delay and the scheduler fires it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What to do once the delay elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionAction {
    /// Level cleared: start this level next
    NextLevel(u32),
    /// Out of lives: back to level 1
    Restart,
}

impl TransitionAction {
    /// Level the action starts
    pub fn target_level(self) -> u32 {
        match self {
            TransitionAction::NextLevel(level) => level,
            TransitionAction::Restart => 1,
        }
    }
}

/// A pending level change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub after: Duration,
    pub action: TransitionAction,
    /// Level epoch this transition belongs to; stale once any level has started since
    pub epoch: u64,
}
