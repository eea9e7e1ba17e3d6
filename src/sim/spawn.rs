//! Obstacle spawn timing
//!
//! A countdown that, on expiry, asks for an obstacle and rearms itself with a
//! uniformly drawn interval. The RNG is passed in so tests can seed it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::consts::{MAX_SPAWN_INTERVAL, MIN_SPAWN_INTERVAL};

/// Inclusive bounds for the spawn interval draw (ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRange {
    min: u32,
    max: u32,
}

impl Default for SpawnRange {
    fn default() -> Self {
        Self {
            min: MIN_SPAWN_INTERVAL,
            max: MAX_SPAWN_INTERVAL,
        }
    }
}

impl SpawnRange {
    /// Bounds must satisfy `0 < min <= max`
    pub fn new(min: u32, max: u32) -> Result<Self, GameError> {
        if min == 0 || min > max {
            return Err(GameError::SpawnRangeInvalid { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    /// Draw a whole-millisecond interval in `[min, max]`
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.min..=self.max) as f64
    }
}

/// Countdown to the next obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Time until the next spawn (ms). Zero or below means due.
    pub remaining: f64,
    pub range: SpawnRange,
}

impl SpawnTimer {
    /// The first obstacle always comes after the minimum interval
    pub fn new(range: SpawnRange) -> Self {
        Self {
            remaining: range.min() as f64,
            range,
        }
    }

    /// Run the countdown for `delta` ms.
    ///
    /// Returns, for each expiry inside this window, how long ago it happened
    /// (oldest first). The timer is rearmed after each expiry, so `remaining`
    /// is positive again on return.
    ///
    /// Expiries more than `horizon` ms ago are not replayed: the countdown
    /// restarts from `horizon` ms overdue, so a frame costs at most
    /// `horizon / min + 1` draws however long it was.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        delta: f64,
        horizon: f64,
        rng: &mut R,
    ) -> Vec<f64> {
        let mut overshoots = Vec::new();
        self.remaining -= delta;
        if self.remaining < -horizon {
            self.remaining = -horizon;
        }
        while self.remaining <= 0.0 {
            overshoots.push(-self.remaining);
            self.remaining += self.range.draw(rng);
        }
        overshoots
    }
}
