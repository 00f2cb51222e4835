//! Data-driven game balance
//!
//! Every number that shapes how the game plays. Defaults reproduce the
//! classic feel; a settings file may override any subset of them.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Vertical velocity set by a jump (pixels/s, negative is up)
    pub jump_velocity: f32,
    /// Volume of the jump sound (0.0 - 1.0)
    pub jump_volume: f32,
    /// Animation frames advanced per second
    pub animation_fps: f32,
    /// Degrees of rotation per pixel/s of vertical velocity
    pub rotation_factor: f32,

    // === Scrolling ===
    /// Sky scroll speed (pixels/s)
    pub background_speed: f32,
    /// Ground scroll speed (pixels/s), faster than the sky for parallax
    pub ground_speed: f32,
    /// Obstacle scroll speed (pixels/s)
    pub obstacle_speed: f32,

    // === Obstacles ===
    /// Milliseconds between obstacle spawns
    pub spawn_interval_ms: u32,
    /// Horizontal spawn distance past the right edge (inclusive range)
    pub spawn_x_min: i32,
    pub spawn_x_max: i32,
    /// How far a floor obstacle's base sits below the screen (inclusive range)
    pub floor_sink_min: i32,
    pub floor_sink_max: i32,
    /// Where a ceiling obstacle's top sits above the screen (inclusive range)
    pub ceiling_top_min: i32,
    pub ceiling_top_max: i32,
    /// Obstacles are removed once their right edge reaches this x
    pub despawn_right: i32,

    // === Score ===
    /// Milliseconds of survival per point
    pub score_interval_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 600.0,
            jump_velocity: -400.0,
            jump_volume: 0.3,
            animation_fps: 10.0,
            rotation_factor: 0.03,

            background_speed: 300.0,
            ground_speed: 360.0,
            obstacle_speed: 400.0,

            spawn_interval_ms: 1500,
            spawn_x_min: 40,
            spawn_x_max: 100,
            floor_sink_min: 10,
            floor_sink_max: 50,
            ceiling_top_min: -50,
            ceiling_top_max: -10,
            despawn_right: -100,

            score_interval_ms: 1500,
        }
    }
}

impl Tuning {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        if self.spawn_interval_ms == 0 {
            return Err(GameError::InvalidTuning(
                "spawn_interval_ms must be positive".into(),
            ));
        }
        if self.score_interval_ms == 0 {
            return Err(GameError::InvalidTuning(
                "score_interval_ms must be positive".into(),
            ));
        }
        let ranges = [
            ("spawn_x", self.spawn_x_min, self.spawn_x_max),
            ("floor_sink", self.floor_sink_min, self.floor_sink_max),
            ("ceiling_top", self.ceiling_top_min, self.ceiling_top_max),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(GameError::InvalidTuning(format!(
                    "{name}_min ({min}) is greater than {name}_max ({max})"
                )));
            }
        }
        let speeds = [
            self.gravity,
            self.jump_velocity,
            self.animation_fps,
            self.rotation_factor,
            self.background_speed,
            self.ground_speed,
            self.obstacle_speed,
        ];
        if speeds.iter().any(|v| !v.is_finite()) {
            return Err(GameError::InvalidTuning("non-finite value".into()));
        }
        if self.jump_velocity >= 0.0 {
            log::warn!(
                "jump_velocity is {} - the cookie will not rise when jumping",
                self.jump_velocity
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let tuning = Tuning {
            spawn_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(GameError::InvalidTuning(_))
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let tuning = Tuning {
            spawn_x_min: 200,
            spawn_x_max: 100,
            ..Default::default()
        };
        let err = tuning.validate().unwrap_err();
        assert!(err.to_string().contains("spawn_x_min"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "gravity": 900.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 900.0);
        assert_eq!(tuning.jump_velocity, -400.0);
        assert_eq!(tuning.spawn_interval_ms, 1500);
    }
}
