//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only, passed in by the caller
//! - Stable iteration order (obstacles oldest first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, find_collision, obstacle_rect, runner_rect};
pub use spawn::{SpawnRange, SpawnTimer};
pub use state::{GameEvent, GameState, GroundSegment, Obstacle, Pose, Runner};
pub use tick::tick;
