//! Rendering surface
//!
//! The simulation state is authoritative. Each frame it is pushed to a
//! `Surface`, which only ever receives values and never reports them back.
//! On the web the surface is the page's DOM; elsewhere `HeadlessSurface`
//! records what would have been drawn.

use std::collections::BTreeMap;

use crate::sim::{GameEvent, GameState, Pose};

/// Something that can show the game's visual elements
pub trait Surface {
    /// Horizontal offset of ground segment `index` (0 or 1)
    fn set_ground_offset(&mut self, index: usize, left: f64);
    fn set_runner_bottom(&mut self, bottom: f64);
    fn set_runner_pose(&mut self, pose: Pose);
    fn create_obstacle(&mut self, id: u32, left: f64);
    fn move_obstacle(&mut self, id: u32, left: f64);
    fn remove_obstacle(&mut self, id: u32);
    /// Remove every obstacle visual, including ones from earlier sessions
    fn clear_obstacles(&mut self);
    fn set_score(&mut self, score: u64);
    /// Show or hide the "press a key to start" indicator
    fn set_instructions_visible(&mut self, visible: bool);
    /// Pin the play area to a fixed pixel size
    fn set_world_size(&mut self, width_px: u32, height_px: u32);
}

/// Push the state to the surface. `events` are the ones produced by the tick
/// that led to `state`, so obstacle visuals can be created and removed.
pub fn present<S: Surface + ?Sized>(state: &GameState, events: &[GameEvent], surface: &mut S) {
    for event in events {
        match *event {
            GameEvent::ObstacleDespawned { id } => surface.remove_obstacle(id),
            GameEvent::ObstacleSpawned { id } => {
                if let Some(obstacle) = state.obstacles.iter().find(|o| o.id == id) {
                    surface.create_obstacle(id, obstacle.left);
                }
            }
            GameEvent::Collision { .. } => {}
        }
    }

    for (index, segment) in state.ground.iter().enumerate() {
        surface.set_ground_offset(index, segment.left);
    }
    surface.set_runner_bottom(state.runner.bottom);
    surface.set_runner_pose(state.runner.pose);
    for obstacle in &state.obstacles {
        surface.move_obstacle(obstacle.id, obstacle.left);
    }
    surface.set_score(state.display_score());
}

/// Surface that keeps the last value of everything it was given
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    pub ground: [f64; 2],
    pub runner_bottom: f64,
    pub pose: Pose,
    pub obstacles: BTreeMap<u32, f64>,
    pub score: u64,
    pub instructions_visible: bool,
    /// Play area size in px, `(0, 0)` until set
    pub world_size: (u32, u32),
    /// Obstacle visuals created over the surface's lifetime
    pub obstacles_created: u32,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self {
            ground: [0.0; 2],
            runner_bottom: 0.0,
            pose: Pose::Run(0),
            obstacles: BTreeMap::new(),
            score: 0,
            instructions_visible: true,
            world_size: (0, 0),
            obstacles_created: 0,
        }
    }
}

impl Surface for HeadlessSurface {
    fn set_ground_offset(&mut self, index: usize, left: f64) {
        if let Some(slot) = self.ground.get_mut(index) {
            *slot = left;
        }
    }

    fn set_runner_bottom(&mut self, bottom: f64) {
        self.runner_bottom = bottom;
    }

    fn set_runner_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    fn create_obstacle(&mut self, id: u32, left: f64) {
        self.obstacles.insert(id, left);
        self.obstacles_created += 1;
    }

    fn move_obstacle(&mut self, id: u32, left: f64) {
        if let Some(slot) = self.obstacles.get_mut(&id) {
            *slot = left;
        }
    }

    fn remove_obstacle(&mut self, id: u32) {
        self.obstacles.remove(&id);
    }

    fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }

    fn set_score(&mut self, score: u64) {
        self.score = score;
    }

    fn set_instructions_visible(&mut self, visible: bool) {
        self.instructions_visible = visible;
    }

    fn set_world_size(&mut self, width_px: u32, height_px: u32) {
        self.world_size = (width_px, height_px);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;

    #[test]
    fn test_present_mirrors_state() {
        let mut state = GameState::new();
        state.score = 3.7;
        state.ground[0].left = -12.5;
        state.runner.bottom = 20.0;
        state.runner.pose = Pose::Jump;
        state.obstacles.push(Obstacle { id: 4, left: 55.0 });

        let mut surface = HeadlessSurface::default();
        present(&state, &[GameEvent::ObstacleSpawned { id: 4 }], &mut surface);

        assert_eq!(surface.ground, [-12.5, 300.0]);
        assert_eq!(surface.runner_bottom, 20.0);
        assert_eq!(surface.pose, Pose::Jump);
        assert_eq!(surface.score, 3);
        assert_eq!(surface.obstacles.get(&4), Some(&55.0));
    }

    #[test]
    fn test_despawn_removes_visual() {
        let state = GameState::new();
        let mut surface = HeadlessSurface::default();
        surface.create_obstacle(9, -99.0);

        present(&state, &[GameEvent::ObstacleDespawned { id: 9 }], &mut surface);
        assert!(surface.obstacles.is_empty());
    }

    #[test]
    fn test_present_leaves_world_size_alone() {
        let mut surface = HeadlessSurface::default();
        surface.set_world_size(500, 700);
        present(&GameState::new(), &[], &mut surface);
        assert_eq!(surface.world_size, (500, 700));
    }

    #[test]
    fn test_move_ignores_unknown_obstacle() {
        let mut surface = HeadlessSurface::default();
        surface.move_obstacle(1, 10.0);
        assert!(surface.obstacles.is_empty());
    }
}
