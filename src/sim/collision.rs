//! Collision detection between the runner and obstacles
//!
//! Hitboxes are axis-aligned rectangles in screen space (y grows downward, the
//! ground line sits at `WORLD_HEIGHT`). They are computed from simulation
//! state, never queried from the rendered page.

use glam::DVec2;

use super::state::{GameState, Obstacle, Runner};
use crate::consts::*;

/// Axis-aligned rectangle: `min` is the top-left corner, `max` the bottom-right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            min: DVec2::new(left, top),
            max: DVec2::new(right, bottom),
        }
    }

    /// Rectangle standing on the ground line, raised by `elevation`
    pub fn on_ground(left: f64, elevation: f64, size: DVec2) -> Self {
        let bottom = WORLD_HEIGHT - elevation;
        Self::from_edges(left, bottom - size.y, left + size.x, bottom)
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.min.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.max.y
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// The runner's hitbox at its current height
pub fn runner_rect(runner: &Runner) -> Rect {
    Rect::on_ground(
        RUNNER_LEFT,
        runner.bottom,
        DVec2::new(RUNNER_WIDTH, RUNNER_HEIGHT),
    )
}

/// An obstacle's hitbox
pub fn obstacle_rect(obstacle: &Obstacle) -> Rect {
    Rect::on_ground(
        obstacle.left,
        0.0,
        DVec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
    )
}

/// ID of the first obstacle touching the runner, if any
pub fn find_collision(state: &GameState) -> Option<u32> {
    let runner = runner_rect(&state.runner);
    state
        .obstacles
        .iter()
        .find(|obstacle| runner.overlaps(&obstacle_rect(obstacle)))
        .map(|obstacle| obstacle.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-100.0f64..100.0, -100.0f64..100.0, 0.0f64..50.0, 0.0f64..50.0)
            .prop_map(|(x, y, w, h)| Rect::from_edges(x, y, x + w, y + h))
    }

    #[test]
    fn test_overlap_fixtures() {
        let a = Rect::from_edges(0.0, 0.0, 10.0, 10.0);

        let apart = Rect::from_edges(20.0, 0.0, 30.0, 10.0);
        assert!(!a.overlaps(&apart));

        // Sharing an edge is not an overlap
        let touching = Rect::from_edges(10.0, 0.0, 20.0, 10.0);
        assert!(!a.overlaps(&touching));
        let touching_below = Rect::from_edges(0.0, 10.0, 10.0, 20.0);
        assert!(!a.overlaps(&touching_below));

        let overlapping = Rect::from_edges(5.0, 5.0, 15.0, 15.0);
        assert!(a.overlaps(&overlapping));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_runner_rect_rises_with_jump() {
        let mut runner = Runner::default();
        let grounded = runner_rect(&runner);
        assert_eq!(grounded.bottom(), WORLD_HEIGHT);
        assert_eq!(grounded.top(), WORLD_HEIGHT - RUNNER_HEIGHT);

        runner.bottom = 40.0;
        let raised = runner_rect(&runner);
        assert_eq!(raised.bottom(), WORLD_HEIGHT - 40.0);
        assert_eq!(raised.left(), grounded.left());
    }

    #[test]
    fn test_find_collision() {
        let mut state = GameState::new();
        assert_eq!(find_collision(&state), None);

        let far = state.next_entity_id();
        state.obstacles.push(Obstacle { id: far, left: 60.0 });
        assert_eq!(find_collision(&state), None);

        let near = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id: near,
            left: RUNNER_LEFT + 2.0,
        });
        assert_eq!(find_collision(&state), Some(near));

        // Clears the obstacle at the top of the arc
        state.runner.bottom = OBSTACLE_HEIGHT + 1.0;
        assert_eq!(find_collision(&state), None);
    }

    #[test]
    fn test_obstacle_just_past_runner_misses() {
        let mut state = GameState::new();
        state.obstacles.push(Obstacle {
            id: 1,
            left: RUNNER_LEFT - OBSTACLE_WIDTH,
        });
        assert_eq!(find_collision(&state), None);
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
