//! Per-frame simulation step
//!
//! Time-scaled rather than fixed-step: every velocity is per second and is
//! multiplied by the frame's `dt`.

use super::collision;
use super::state::GameState;

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, dt: f32) {
    let dt_ms = dt as f64 * 1000.0;
    state.play_ms += dt_ms;

    // The timer keeps its cadence through game over but only spawns while alive
    let fired = state.spawn_timer.advance(dt_ms);
    if state.is_active() {
        for _ in 0..fired {
            state.spawn_obstacle();
        }
    }

    state.world.update(dt, &state.tuning);

    state.update_score();

    if state.is_active() {
        if let Some(cause) = collision::detect(&state.world) {
            state.game_over(cause);
        }
    }
}
