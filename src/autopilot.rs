//! Headless autopilot
//!
//! Plays a seeded session on a `HeadlessSurface` at a fixed frame step,
//! jumping when the next obstacle comes into reach. Used by the native binary
//! to exercise the game outside a browser.

use serde::Serialize;

use crate::consts::*;
use crate::game::{FrameOutcome, GameLoop};
use crate::render::HeadlessSurface;
use crate::sim::GameState;

/// Simulated frame length (about 60 Hz)
pub const FRAME_STEP_MS: f64 = 16.0;

/// Jump once the next obstacle's left edge is this close. Chosen so the
/// obstacle passes under the runner while it is above `OBSTACLE_HEIGHT`.
pub const JUMP_TRIGGER_OFFSET: f64 = 18.0;

/// Why the run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunEnd {
    Collision,
    FrameCap,
}

/// What happened during an autopilot run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub frames: u32,
    pub elapsed_ms: f64,
    pub score: u64,
    pub obstacles_spawned: u32,
    pub jumps: u32,
    pub end: RunEnd,
}

/// Whether the runner should take off now
pub fn should_jump(state: &GameState) -> bool {
    if state.runner.airborne {
        return false;
    }
    state
        .obstacles
        .iter()
        .filter(|o| o.left + OBSTACLE_WIDTH > RUNNER_LEFT)
        .any(|o| o.left <= JUMP_TRIGGER_OFFSET)
}

/// Play one session for at most `max_frames` frames
pub fn run(seed: u64, max_frames: u32) -> RunSummary {
    let mut game = GameLoop::new(HeadlessSurface::default(), seed);
    game.start();

    let mut now = 0.0;
    let mut frames = 0;
    let mut jumps = 0;
    let mut end = RunEnd::FrameCap;

    while frames < max_frames {
        if should_jump(game.state()) && game.jump() {
            jumps += 1;
        }
        match game.on_frame(now) {
            Ok(FrameOutcome::Continue) => {}
            Ok(FrameOutcome::GameOver) => {
                end = RunEnd::Collision;
                frames += 1;
                break;
            }
            Ok(FrameOutcome::Stopped) => break,
            Err(e) => log::warn!("Skipping frame: {}", e),
        }
        frames += 1;
        now += FRAME_STEP_MS;
    }

    let state = game.state();
    let summary = RunSummary {
        seed,
        frames,
        elapsed_ms: state.elapsed_ms,
        score: state.display_score(),
        obstacles_spawned: game.surface().obstacles_created,
        jumps,
        end,
    };
    log::info!(
        "Autopilot finished after {} frames: {:?}, score {}",
        summary.frames,
        summary.end,
        summary.score
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;

    #[test]
    fn test_should_jump_window() {
        let mut state = GameState::new();
        assert!(!should_jump(&state));

        state.obstacles.push(Obstacle { id: 1, left: 40.0 });
        assert!(!should_jump(&state));

        state.obstacles[0].left = 17.5;
        assert!(should_jump(&state));

        state.runner.airborne = true;
        assert!(!should_jump(&state));
    }

    #[test]
    fn test_passed_obstacles_do_not_trigger() {
        let mut state = GameState::new();
        state.obstacles.push(Obstacle {
            id: 1,
            left: RUNNER_LEFT - OBSTACLE_WIDTH - 1.0,
        });
        assert!(!should_jump(&state));
    }

    #[test]
    fn test_autopilot_clears_obstacles() {
        let summary = run(7, 3000);
        assert_eq!(summary.end, RunEnd::FrameCap);
        assert!(summary.obstacles_spawned >= 10);
        assert!(summary.jumps >= summary.obstacles_spawned - 3);
        assert_eq!(summary.score, (summary.elapsed_ms * SCORE_PER_MS) as u64);
    }

    #[test]
    fn test_idle_runner_crashes() {
        // Without any jumping the first obstacle ends the run
        let mut game = GameLoop::new(HeadlessSurface::default(), 3);
        game.start();
        let mut now = 0.0;
        let outcome = loop {
            let outcome = game.on_frame(now).unwrap();
            if outcome != FrameOutcome::Continue {
                break outcome;
            }
            now += FRAME_STEP_MS;
        };
        assert_eq!(outcome, FrameOutcome::GameOver);
        assert!(!game.state().obstacles.is_empty());
        assert_eq!(game.state().runner.bottom, 0.0);
    }
}
