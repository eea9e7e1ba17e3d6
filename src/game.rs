//! Frame driver
//!
//! `GameLoop` sits between the host (frame scheduler, keyboard, timers) and
//! the simulation. It owns the session, the RNG and the rendering surface,
//! and tracks whether a session is running.
//!
//! The host contract:
//! - call `on_key` for every key press
//! - while `phase()` is `Running`, call `on_frame` once per display frame and
//!   keep scheduling as long as it returns `Continue` (or a non-fatal error)
//! - after `GameOver`, wait `LOSE_REARM_DELAY_MS` and call `rearm`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::consts::*;
use crate::render::{Surface, present};
use crate::sim::{GameEvent, GameState, Pose, SpawnRange, tick};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a key press to start; instructions are shown
    Ready,
    /// Frames are advancing the session
    Running,
    /// Collided; restart is not accepted until `rearm`
    Lost,
}

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame
    Continue,
    /// The session just ended; schedule the rearm timer instead
    GameOver,
    /// No session is running; nothing was advanced
    Stopped,
}

/// What a key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Started,
    Jumped,
    Ignored,
}

/// Drives sessions and pushes their state to a surface
pub struct GameLoop<S, R = Pcg32> {
    state: GameState,
    phase: GamePhase,
    /// Timestamp of the last applied frame; `None` until the first frame
    last_timestamp: Option<f64>,
    spawn_range: SpawnRange,
    surface: S,
    rng: R,
    sessions: u32,
}

impl<S: Surface> GameLoop<S, Pcg32> {
    /// Game with the default spawn range and a seeded PCG
    pub fn new(surface: S, seed: u64) -> Self {
        Self::with_rng(surface, Pcg32::seed_from_u64(seed), SpawnRange::default())
    }
}

impl<S: Surface, R: Rng> GameLoop<S, R> {
    pub fn with_rng(mut surface: S, rng: R, spawn_range: SpawnRange) -> Self {
        surface.set_world_size(WORLD_WIDTH_PX, WORLD_HEIGHT_PX);
        surface.set_instructions_visible(true);
        Self {
            state: GameState::with_spawn_range(spawn_range),
            phase: GamePhase::Ready,
            last_timestamp: None,
            spawn_range,
            surface,
            rng,
            sessions: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted setups (tests, autopilot)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Re-apply the fixed play area size (the host calls this on resize)
    pub fn fit_world(&mut self) {
        self.surface.set_world_size(WORLD_WIDTH_PX, WORLD_HEIGHT_PX);
    }

    /// Sessions started so far
    pub fn sessions(&self) -> u32 {
        self.sessions
    }

    /// Begin a fresh session
    pub fn start(&mut self) {
        self.state = GameState::with_spawn_range(self.spawn_range);
        self.phase = GamePhase::Running;
        self.last_timestamp = None;
        self.sessions += 1;

        self.surface.clear_obstacles();
        self.surface.set_instructions_visible(false);
        present(&self.state, &[], &mut self.surface);

        log::info!("Session {} started", self.sessions);
    }

    /// Handle a key press
    pub fn on_key(&mut self, key: &str) -> KeyOutcome {
        match self.phase {
            GamePhase::Ready => {
                self.start();
                KeyOutcome::Started
            }
            GamePhase::Running if key == JUMP_KEY => {
                if self.jump() {
                    KeyOutcome::Jumped
                } else {
                    KeyOutcome::Ignored
                }
            }
            GamePhase::Running | GamePhase::Lost => KeyOutcome::Ignored,
        }
    }

    /// Make the runner jump if it is on the ground
    pub fn jump(&mut self) -> bool {
        self.phase == GamePhase::Running && self.state.runner.jump()
    }

    /// Per-frame callback with the scheduler's timestamp (ms).
    ///
    /// The first frame of a session only records the timestamp. A bad
    /// timestamp returns `InvalidInput` and changes nothing; the host should
    /// keep scheduling frames.
    pub fn on_frame(&mut self, timestamp: f64) -> Result<FrameOutcome, GameError> {
        if self.phase != GamePhase::Running {
            return Ok(FrameOutcome::Stopped);
        }
        if !timestamp.is_finite() {
            return Err(GameError::InvalidInput {
                reason: format!("frame timestamp is not finite ({})", timestamp),
            });
        }

        let Some(last) = self.last_timestamp else {
            self.last_timestamp = Some(timestamp);
            return Ok(FrameOutcome::Continue);
        };

        let events = tick(&mut self.state, timestamp - last, &mut self.rng)?;
        present(&self.state, &events, &mut self.surface);

        if let Some(GameEvent::Collision { obstacle_id }) = events.last() {
            self.lose(*obstacle_id);
            return Ok(FrameOutcome::GameOver);
        }

        self.last_timestamp = Some(timestamp);
        Ok(FrameOutcome::Continue)
    }

    fn lose(&mut self, obstacle_id: u32) {
        self.state.runner.pose = Pose::Lose;
        self.surface.set_runner_pose(Pose::Lose);
        self.phase = GamePhase::Lost;
        log::info!(
            "Hit obstacle {} after {:.1}s, score {}",
            obstacle_id,
            self.state.elapsed_ms / 1000.0,
            self.state.display_score()
        );
    }

    /// Accept a start key press again after a loss
    pub fn rearm(&mut self) {
        if self.phase != GamePhase::Lost {
            return;
        }
        self.phase = GamePhase::Ready;
        self.surface.set_instructions_visible(true);
        log::info!("Ready for a new session");
    }
}
