//! Endless horizontal scrolling for the sky and the ground
//!
//! Each strip's image holds two identical tiles side by side. Sliding the
//! strip left by one tile and snapping back to x = 0 is seamless.

use glam::Vec2;

use super::sprite::{Image, Rect, Sprite};
use crate::consts::WINDOW_HEIGHT;

/// A strip that scrolls left at a constant speed and wraps
#[derive(Debug, Clone)]
pub struct ScrollLayer {
    pub sprite: Sprite,
    /// Pixels per second
    pub speed: f32,
}

impl ScrollLayer {
    /// Sky: anchored at the top-left corner, never collides
    pub fn background(image: Image, speed: f32) -> Self {
        let rect = Rect::new(0, 0, image.width() as i32, image.height() as i32);
        Self {
            sprite: Sprite::new(image, rect, false),
            speed,
        }
    }

    /// Ground: anchored to the bottom of the window, collides
    pub fn ground(image: Image, speed: f32) -> Self {
        let rect = Rect::with_bottom_left(image.size(), Vec2::new(0.0, WINDOW_HEIGHT as f32));
        Self {
            sprite: Sprite::new(image, rect, true),
            speed,
        }
    }

    /// Width of one of the two tiles in the strip
    pub fn tile_width(&self) -> f32 {
        self.sprite.image.width() as f32 / 2.0
    }

    /// Scroll left by `speed * dt`. Returns true when the strip wrapped.
    pub fn update(&mut self, dt: f32) -> bool {
        self.sprite.pos.x -= self.speed * dt;
        // Strip center at or past the left edge means one full tile has gone by
        let wrapped = self.sprite.pos.x + self.tile_width() <= 0.0;
        if wrapped {
            self.sprite.pos.x = 0.0;
        }
        self.sprite.sync_rect();
        wrapped
    }
}
