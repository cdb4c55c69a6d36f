pub mod app;
pub mod board;
pub mod components;
pub mod config;
pub mod game;
pub mod snapshot;
pub mod systems;

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

pub use app::App;
pub use board::Board;
pub use components::{ActivePiece, Cell, Command, GameState, Phase, PieceShape, PieceType};
pub use snapshot::Snapshot;

/// Monotonic time source. `elapsed` never goes backwards.
pub trait Clock {
    fn elapsed(&self) -> Duration;
}

/// Wall clock backed by `Instant`.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to, for replays and tests.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now
    }
}

/// Samples a clock once per tick and remembers the step.
#[derive(Debug, Clone, Default)]
pub struct Time {
    delta: Duration,
    last_update: Duration,
}

impl Time {
    #[must_use]
    pub fn new(clock: &impl Clock) -> Self {
        Self {
            delta: Duration::ZERO,
            last_update: clock.elapsed(),
        }
    }

    pub fn update(&mut self, clock: &impl Clock) {
        let now = clock.elapsed();
        self.delta = now.saturating_sub(self.last_update);
        self.last_update = now;
    }

    #[must_use]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}
