//! The cookie: gravity, jumps, frame animation and tilt

use std::ops::Deref;

use glam::Vec2;

use super::sprite::{Image, Rect, Sprite};
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::round_px;
use crate::tuning::Tuning;

/// An animation cycle with at least one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frames(Vec<Image>);

impl Frames {
    pub fn new(first: Image, rest: impl IntoIterator<Item = Image>) -> Self {
        let mut frames = vec![first];
        frames.extend(rest);
        Self(frames)
    }

    /// `None` for an empty list
    pub fn from_vec(frames: Vec<Image>) -> Option<Self> {
        (!frames.is_empty()).then_some(Self(frames))
    }
}

impl Deref for Frames {
    type Target = [Image];

    fn deref(&self) -> &[Image] {
        &self.0
    }
}

/// The player-controlled cookie
#[derive(Debug, Clone)]
pub struct Player {
    /// `image` is the rotated current frame; `rect` keeps the unrotated frame size
    pub sprite: Sprite,
    frames: Frames,
    /// Vertical velocity (pixels/s, positive is down)
    pub velocity: f32,
    /// Fractional animation frame
    pub frame_index: f32,
}

impl Player {
    /// Spawn at the left side of the screen, vertically centered, at rest
    pub fn new(frames: Frames) -> Self {
        let image = frames.0[0].clone();
        let spawn = Vec2::new(WINDOW_WIDTH as f32 / 20.0, WINDOW_HEIGHT as f32 / 2.0);
        let rect = Rect::with_mid_left(image.size(), spawn);
        Self {
            sprite: Sprite::new(image, rect, true),
            frames,
            velocity: 0.0,
            frame_index: 0.0,
        }
    }

    /// Accelerate downward and integrate position
    pub fn apply_gravity(&mut self, dt: f32, gravity: f32) {
        self.velocity += gravity * dt;
        self.sprite.pos.y += self.velocity * dt;
        self.sprite.rect.y = round_px(self.sprite.pos.y);
    }

    /// Replace the current velocity with the jump impulse
    pub fn jump(&mut self, jump_velocity: f32) {
        self.velocity = jump_velocity;
    }

    /// Advance the frame cycle and show the current frame
    pub fn animate(&mut self, dt: f32, fps: f32) {
        self.frame_index += fps * dt;
        if self.frame_index >= self.frames.len() as f32 {
            self.frame_index = 0.0;
        }
        self.sprite.image = self.frames[self.frame_index as usize].clone();
    }

    /// Current tilt in degrees (counter-clockwise positive); unclamped
    pub fn rotation_degrees(&self, rotation_factor: f32) -> f32 {
        -self.velocity * rotation_factor
    }

    /// Tilt the shown frame by velocity and rebuild the mask from the result
    pub fn rotate(&mut self, rotation_factor: f32) {
        let angle = self.rotation_degrees(rotation_factor);
        self.sprite.image = self.sprite.image.rotated(angle);
        self.sprite.refresh_mask();
    }

    /// Gravity, then animation, then rotation of the freshly chosen frame
    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        self.apply_gravity(dt, tuning.gravity);
        self.animate(dt, tuning.animation_fps);
        self.rotate(tuning.rotation_factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sprite::{Mask, Rgba};
    use proptest::prelude::*;

    fn shade(i: u8) -> Image {
        Image::filled(10, 10, Rgba::rgb(i * 100, 0, 0))
    }

    /// Three distinguishable 10x10 frames
    fn frames() -> Frames {
        Frames::new(shade(0), (1..3).map(shade))
    }

    #[test]
    fn test_frames_never_empty() {
        assert!(Frames::from_vec(Vec::new()).is_none());
        let frames = Frames::from_vec(vec![shade(2)]).unwrap();
        assert_eq!(frames.len(), 1);
        // A single frame animates in place
        let mut player = Player::new(frames);
        player.animate(0.5, 10.0);
        assert_eq!(player.frame_index, 0.0);
        assert_eq!(player.sprite.image, shade(2));
    }

    #[test]
    fn test_spawn_position() {
        let player = Player::new(frames());
        assert_eq!(player.sprite.rect.left(), (WINDOW_WIDTH / 20) as i32);
        assert_eq!(player.sprite.rect.center_y(), (WINDOW_HEIGHT / 2) as i32);
        assert_eq!(player.velocity, 0.0);
    }

    #[test]
    fn test_gravity_single_step() {
        let mut player = Player::new(frames());
        let y0 = player.sprite.pos.y;
        player.apply_gravity(0.5, 600.0);
        assert_eq!(player.velocity, 300.0);
        assert_eq!(player.sprite.pos.y, y0 + 150.0);
        assert_eq!(player.sprite.rect.y, round_px(y0 + 150.0));
    }

    #[test]
    fn test_jump_overrides_velocity() {
        let mut player = Player::new(frames());
        for prior in [-1000.0, -400.0, 0.0, 250.0, 99999.0] {
            player.velocity = prior;
            player.jump(-400.0);
            assert_eq!(player.velocity, -400.0);
        }
    }

    #[test]
    fn test_animation_wraps_after_last_frame() {
        let mut player = Player::new(frames());
        player.animate(0.1, 10.0);
        assert_eq!(player.frame_index as usize, 1);
        player.animate(0.1, 10.0);
        assert_eq!(player.frame_index as usize, 2);
        assert_eq!(player.sprite.image, frames()[2]);
        // 3.0 >= frame count wraps to the first frame
        player.frame_index = 2.95;
        player.animate(0.1, 10.0);
        assert_eq!(player.frame_index, 0.0);
        assert_eq!(player.sprite.image, frames()[0]);
    }

    #[test]
    fn test_rotation_follows_velocity() {
        let mut player = Player::new(frames());
        player.velocity = -400.0;
        assert!((player.rotation_degrees(0.03) - 12.0).abs() < 1e-4);
        player.velocity = 1000.0;
        assert!((player.rotation_degrees(0.03) + 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_unclamped_at_high_speed() {
        // A long fall keeps tilting past a full turn
        let mut player = Player::new(frames());
        player.velocity = 20_000.0;
        assert!((player.rotation_degrees(0.03) + 600.0).abs() < 1e-2);
        player.rotate(0.03);
        assert!(player.sprite.mask.is_some());
    }

    #[test]
    fn test_update_order_rotates_new_frame() {
        let mut player = Player::new(frames());
        player.velocity = -3000.0; // 90 degree tilt
        let tuning = Tuning {
            gravity: 0.0,
            ..Default::default()
        };
        player.update(0.1, &tuning);
        // Frame 1 was selected before rotating, so its color shows
        assert!(player.sprite.image.pixels().contains(&Rgba::rgb(100, 0, 0)));
        // Mask matches the rotated image, not the raw frame
        let mask = player.sprite.mask.as_ref().unwrap();
        assert_eq!(mask.width(), player.sprite.image.width());
        assert_eq!(mask.count(), Mask::from_image(&player.sprite.image).count());
        // Rect keeps the unrotated frame size
        assert_eq!(player.sprite.rect.size(), glam::IVec2::new(10, 10));
    }

    #[test]
    fn test_velocity_unclamped() {
        let mut player = Player::new(frames());
        for _ in 0..1000 {
            player.apply_gravity(0.1, 600.0);
        }
        assert!((player.velocity - 60_000.0).abs() < 1.0);
    }

    proptest! {
        #[test]
        fn prop_gravity_integrates_discretely(dt in 0.0f32..0.05, n in 1usize..200) {
            let mut player = Player::new(frames());
            let y0 = player.sprite.pos.y;
            let mut expected_y = y0 as f64;
            let mut expected_v = 0.0f64;
            for _ in 0..n {
                player.apply_gravity(dt, 600.0);
                expected_v += 600.0 * dt as f64;
                expected_y += expected_v * dt as f64;
            }
            let closed_form_v = n as f64 * 600.0 * dt as f64;
            prop_assert!((player.velocity as f64 - closed_form_v).abs() <= 1e-3 * (1.0 + closed_form_v));
            prop_assert!((player.sprite.pos.y as f64 - expected_y).abs() <= 1e-3 * (1.0 + expected_y.abs()));
        }
    }
}
