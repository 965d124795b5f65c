//! Restartable one-shot countdown.
//!
//! The engine only does arithmetic; the periodic firing comes from a
//! [`TickSource`] which feeds `advance` once per [`TICK_INTERVAL`]. Every
//! `start` bumps the generation so ticks queued for a cancelled countdown
//! are recognised and dropped.

use std::time::Duration;

use crate::display::MILLIS_PER_SECOND;

pub const TICK_INTERVAL: Duration = Duration::from_millis(MILLIS_PER_SECOND);

/// Periodic callback driver for the countdown.
pub trait TickSource {
    /// Fire `Tick(generation)` every `interval`, replacing any running schedule.
    fn start(&mut self, generation: u64, interval: Duration);
    /// Stop firing. Safe to call when nothing is scheduled.
    fn stop(&mut self);
}

/// Result of one tick interval elapsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    Tick(u64),
    Finished,
}

#[derive(Debug, Default)]
pub struct Countdown {
    remaining_millis: u64,
    generation: u64,
    active: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new countdown, cancelling any running one.
    pub fn start(&mut self, initial_millis: u64) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.remaining_millis = initial_millis;
        self.active = true;
        self.generation
    }

    /// Returns whether a countdown was running.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        self.remaining_millis = 0;
        was_active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining_millis(&self) -> u64 {
        self.remaining_millis
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Account for one elapsed interval of the countdown `generation`.
    pub fn advance(&mut self, generation: u64) -> Option<CountdownStep> {
        if !self.active || generation != self.generation {
            return None;
        }

        self.remaining_millis = self.remaining_millis.saturating_sub(MILLIS_PER_SECOND);
        if self.remaining_millis == 0 {
            self.active = false;
            Some(CountdownStep::Finished)
        } else {
            Some(CountdownStep::Tick(self.remaining_millis))
        }
    }
}
