//! Dino Runner - an endless runner for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `game`: Frame driver and session state machine
//! - `render`: Rendering surface abstraction (DOM on web, headless elsewhere)
//! - `error`: Failure kinds surfaced by the driver and adapters
//! - `autopilot`: Headless self-playing session for native runs

pub mod autopilot;
pub mod error;
pub mod game;
pub mod render;
pub mod sim;

pub use error::GameError;
pub use game::{FrameOutcome, GameLoop, GamePhase, KeyOutcome};
pub use render::{HeadlessSurface, Surface};

/// Game configuration constants
///
/// Distances are percentages of the world element (x of its width, y of its
/// height). Times are milliseconds, as delivered by the frame scheduler.
pub mod consts {
    /// Horizontal scroll speed (units per ms)
    pub const SPEED: f64 = 0.05;
    /// Vertical deceleration while airborne (units per ms²)
    pub const GRAVITY: f64 = 0.0015;
    /// Vertical velocity set by an accepted jump
    pub const JUMP_SPEED: f64 = 0.45;

    /// Ground segments are recycled once they scroll past -WRAP
    pub const GROUND_WRAP_WIDTH: f64 = 300.0;

    /// Run animation: ms per pose and number of run poses
    pub const RUN_FRAME_TIME: f64 = 100.0;
    pub const RUN_FRAME_COUNT: u32 = 2;

    /// Obstacle spawn interval bounds (ms, inclusive)
    pub const MIN_SPAWN_INTERVAL: u32 = 700;
    pub const MAX_SPAWN_INTERVAL: u32 = 2000;
    /// Obstacles appear just off the right edge
    pub const OBSTACLE_SPAWN_OFFSET: f64 = 100.0;
    /// Obstacles at or beyond this offset are gone
    pub const OBSTACLE_DESPAWN_OFFSET: f64 = -100.0;

    /// Score gained per ms of running
    pub const SCORE_PER_MS: f64 = 0.001;

    /// Debounce after a loss before a key press can restart
    pub const LOSE_REARM_DELAY_MS: i32 = 100;

    /// The only key that makes the runner jump
    pub const JUMP_KEY: &str = " ";

    /// World element is pinned to this size (px)
    pub const WORLD_WIDTH_PX: u32 = 500;
    pub const WORLD_HEIGHT_PX: u32 = 700;

    /// Hitboxes, in world units
    pub const WORLD_HEIGHT: f64 = 100.0;
    pub const RUNNER_LEFT: f64 = 1.0;
    pub const RUNNER_WIDTH: f64 = 8.8;
    pub const RUNNER_HEIGHT: f64 = 30.0;
    pub const OBSTACLE_WIDTH: f64 = 4.5;
    pub const OBSTACLE_HEIGHT: f64 = 30.0;
}
