//! Game state and core simulation types
//!
//! Everything the frame advance reads or writes lives here. Nothing is read
//! back from the rendering surface.

use serde::{Deserialize, Serialize};

use super::spawn::{SpawnRange, SpawnTimer};
use crate::consts::*;

/// Which sprite the runner shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    /// Running, showing run frame `n` of `RUN_FRAME_COUNT`
    Run(u32),
    /// Mid-air
    Jump,
    /// Hit an obstacle
    Lose,
}

/// The player's sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    /// Height above the ground (never negative)
    pub bottom: f64,
    /// Vertical velocity (units per ms, positive is up)
    pub velocity: f64,
    pub airborne: bool,
    /// Current run frame, cycles over `RUN_FRAME_COUNT`
    pub frame: u32,
    /// Time accumulated toward the next run frame
    pub frame_clock: f64,
    pub pose: Pose,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            bottom: 0.0,
            velocity: 0.0,
            airborne: false,
            frame: 0,
            frame_clock: 0.0,
            pose: Pose::Run(0),
        }
    }
}

impl Runner {
    /// Start a jump. Returns false (and changes nothing) if already airborne.
    pub fn jump(&mut self) -> bool {
        if self.airborne {
            return false;
        }
        self.velocity = JUMP_SPEED;
        self.airborne = true;
        true
    }

    /// Advance the run animation
    pub fn animate(&mut self, delta: f64) {
        if self.airborne {
            self.pose = Pose::Jump;
            return;
        }

        self.frame_clock += delta;
        // Keep the remainder so leftover time carries into the next pose
        if self.frame_clock >= RUN_FRAME_TIME {
            let steps = (self.frame_clock / RUN_FRAME_TIME).floor();
            let frame = (self.frame as f64 + steps) % RUN_FRAME_COUNT as f64;
            self.frame = frame as u32;
            self.frame_clock %= RUN_FRAME_TIME;
        }
        self.pose = Pose::Run(self.frame);
    }

    /// Integrate the jump arc (position first, then gravity)
    pub fn integrate(&mut self, delta: f64) {
        if !self.airborne {
            return;
        }

        self.bottom += self.velocity * delta;
        if self.bottom <= 0.0 {
            self.bottom = 0.0;
            self.airborne = false;
        }
        self.velocity -= GRAVITY * delta;
    }
}

/// One of the two ground strips that chase each other across the screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundSegment {
    pub left: f64,
}

impl GroundSegment {
    pub fn scroll(&mut self, delta: f64) {
        self.left -= delta * SPEED;
        if self.left < -GROUND_WRAP_WIDTH {
            self.left = GROUND_WRAP_WIDTH;
        }
    }
}

/// An obstacle scrolling toward the runner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub left: f64,
}

impl Obstacle {
    /// Fully off the left edge
    pub fn is_gone(&self) -> bool {
        self.left <= OBSTACLE_DESPAWN_OFFSET
    }
}

/// Something that happened during a frame, for the renderer and logs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32 },
    ObstacleDespawned { id: u32 },
    Collision { obstacle_id: u32 },
}

/// One session's worth of state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Accumulated score (display with `display_score`)
    pub score: f64,
    /// Total ms advanced this session
    pub elapsed_ms: f64,
    pub runner: Runner,
    pub ground: [GroundSegment; 2],
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    pub spawn: SpawnTimer,
    /// Next obstacle ID
    next_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh session with the default spawn interval range
    pub fn new() -> Self {
        Self::with_spawn_range(SpawnRange::default())
    }

    pub fn with_spawn_range(range: SpawnRange) -> Self {
        Self {
            score: 0.0,
            elapsed_ms: 0.0,
            runner: Runner::default(),
            ground: [
                GroundSegment { left: 0.0 },
                GroundSegment {
                    left: GROUND_WRAP_WIDTH,
                },
            ],
            obstacles: Vec::new(),
            spawn: SpawnTimer::new(range),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Score as shown in the readout
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new();
        assert_eq!(state.ground[0].left, 0.0);
        assert_eq!(state.ground[1].left, GROUND_WRAP_WIDTH);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.runner.bottom, 0.0);
        assert!(!state.runner.airborne);
        assert_eq!(state.display_score(), 0);
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let mut runner = Runner::default();
        assert!(runner.jump());
        runner.integrate(50.0);
        let before = runner.clone();

        assert!(!runner.jump());
        assert_eq!(runner.velocity, before.velocity);
        assert_eq!(runner.bottom, before.bottom);
        assert!(runner.airborne);
    }

    #[test]
    fn test_jump_lands_exactly_on_ground() {
        let mut runner = Runner::default();
        runner.jump();
        assert_eq!(runner.velocity, 0.45);

        let mut frames = 0;
        while runner.airborne {
            runner.integrate(16.0);
            frames += 1;
            assert!(frames < 1000, "runner never landed");
        }
        assert_eq!(runner.bottom, 0.0);
    }

    #[test]
    fn test_position_uses_velocity_before_gravity() {
        let mut runner = Runner::default();
        runner.jump();
        runner.integrate(10.0);
        assert!((runner.bottom - 4.5).abs() < 1e-12);
        assert!((runner.velocity - (0.45 - 0.015)).abs() < 1e-12);
    }

    #[test]
    fn test_run_animation_carries_leftover_time() {
        let mut runner = Runner::default();
        runner.animate(60.0);
        assert_eq!(runner.pose, Pose::Run(0));
        runner.animate(60.0);
        assert_eq!(runner.pose, Pose::Run(1));
        assert!((runner.frame_clock - 20.0).abs() < 1e-9);
        runner.animate(80.0);
        assert_eq!(runner.pose, Pose::Run(0));
        assert!(runner.frame_clock.abs() < 1e-9);
    }

    #[test]
    fn test_run_animation_long_frame() {
        let mut runner = Runner::default();
        runner.animate(350.0);
        assert_eq!(runner.pose, Pose::Run(1));
        assert!((runner.frame_clock - 50.0).abs() < 1e-9);

        runner.animate(1.0e300);
        assert!(runner.frame_clock >= 0.0 && runner.frame_clock < RUN_FRAME_TIME);
        assert!(runner.frame < RUN_FRAME_COUNT);
    }

    #[test]
    fn test_airborne_shows_jump_pose() {
        let mut runner = Runner::default();
        runner.jump();
        runner.animate(250.0);
        assert_eq!(runner.pose, Pose::Jump);
        assert_eq!(runner.frame_clock, 0.0);
    }

    #[test]
    fn test_ground_wraps_to_exactly_wrap_width() {
        let mut seg = GroundSegment { left: -299.0 };
        seg.scroll(40.0); // -301
        assert_eq!(seg.left, GROUND_WRAP_WIDTH);

        // Many laps never drift off the wrap point
        let mut seg = GroundSegment { left: 0.0 };
        let mut wraps = 0;
        for _ in 0..10_000 {
            let before = seg.left;
            seg.scroll(17.0);
            if seg.left > before {
                assert_eq!(seg.left, GROUND_WRAP_WIDTH);
                wraps += 1;
            }
        }
        assert!(wraps > 0);
    }

    #[test]
    fn test_obstacle_gone_is_inclusive() {
        assert!(Obstacle { id: 1, left: -100.0 }.is_gone());
        assert!(!Obstacle { id: 1, left: -99.99 }.is_gone());
    }

    proptest! {
        #[test]
        fn prop_runner_never_below_ground(deltas in proptest::collection::vec(0.0f64..200.0, 1..200)) {
            let mut runner = Runner::default();
            runner.jump();
            for delta in deltas {
                runner.integrate(delta);
                prop_assert!(runner.bottom >= 0.0);
                if !runner.airborne {
                    prop_assert_eq!(runner.bottom, 0.0);
                }
            }
        }
    }
}
