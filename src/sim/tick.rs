//! Per-frame simulation advance
//!
//! `tick` moves a session forward by one variable-length frame. All motion is
//! scaled by the frame's delta so the game runs at the same speed regardless
//! of display refresh rate.

use rand::Rng;

use super::collision::find_collision;
use super::state::{GameEvent, GameState, Obstacle};
use crate::GameError;
use crate::consts::*;

/// Advance the game state by `delta` ms.
///
/// Order within a frame: ground, runner (animation, then jump physics),
/// obstacles (scroll, despawn, spawn), score, collision. A `Collision` event
/// is the last event of a frame that ends the session.
///
/// An unusable delta leaves the state untouched.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    delta: f64,
    rng: &mut R,
) -> Result<Vec<GameEvent>, GameError> {
    if !delta.is_finite() {
        return Err(GameError::InvalidInput {
            reason: format!("frame delta is not finite ({})", delta),
        });
    }
    if delta < 0.0 {
        return Err(GameError::InvalidInput {
            reason: format!("frame delta is negative ({})", delta),
        });
    }

    let mut events = Vec::new();

    for segment in &mut state.ground {
        segment.scroll(delta);
    }

    state.runner.animate(delta);
    state.runner.integrate(delta);

    update_obstacles(state, delta, rng, &mut events);

    state.score += delta * SCORE_PER_MS;
    state.elapsed_ms += delta;

    if let Some(obstacle_id) = find_collision(state) {
        events.push(GameEvent::Collision { obstacle_id });
    }

    Ok(events)
}

/// Time an obstacle takes to scroll from its spawn point to the despawn line
const SPAWN_HORIZON_MS: f64 = (OBSTACLE_SPAWN_OFFSET - OBSTACLE_DESPAWN_OFFSET) / SPEED;

fn update_obstacles<R: Rng + ?Sized>(
    state: &mut GameState,
    delta: f64,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    for obstacle in &mut state.obstacles {
        obstacle.left -= delta * SPEED;
    }
    state.obstacles.retain(|obstacle| {
        if obstacle.is_gone() {
            log::debug!("Obstacle {} despawned", obstacle.id);
            events.push(GameEvent::ObstacleDespawned { id: obstacle.id });
            false
        } else {
            true
        }
    });

    // Countdown runs before the spawn check, unlike a check-then-decrement
    // loop, so an obstacle appears in the frame its timer expires. Each expiry
    // happened `overshoot` ms ago and the obstacle has been scrolling since.
    // Older expiries than `SPAWN_HORIZON_MS` would already be off screen.
    for overshoot in state.spawn.advance(delta, SPAWN_HORIZON_MS, rng) {
        let left = OBSTACLE_SPAWN_OFFSET - overshoot * SPEED;
        if left <= OBSTACLE_DESPAWN_OFFSET {
            continue;
        }
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle { id, left });
        log::debug!(
            "Obstacle {} spawned, next in {:.0} ms",
            id,
            state.spawn.remaining
        );
        events.push(GameEvent::ObstacleSpawned { id });
    }
}
