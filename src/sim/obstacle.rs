//! Scrolling barriers that rise from the floor or hang from the ceiling

use glam::Vec2;
use rand::Rng;

use super::sprite::{Image, Rect, Sprite};
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::tuning::Tuning;

/// Which edge of the screen an obstacle grows from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points upward out of the floor; its base sits below the bottom edge
    TopMounted,
    /// Hangs from above the ceiling, drawn upside down
    BottomMounted,
}

/// A single obstacle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub sprite: Sprite,
    pub orientation: Orientation,
    /// Index of the art variant in use
    pub variant: usize,
}

impl Obstacle {
    /// Pick orientation, art and placement at random; `None` without art
    pub fn spawn(variants: &[Image], tuning: &Tuning, rng: &mut impl Rng) -> Option<Self> {
        if variants.is_empty() {
            return None;
        }
        let orientation = if rng.random_bool(0.5) {
            Orientation::TopMounted
        } else {
            Orientation::BottomMounted
        };
        let variant = rng.random_range(0..variants.len());
        let x = WINDOW_WIDTH as i32 + rng.random_range(tuning.spawn_x_min..=tuning.spawn_x_max);

        let y = match orientation {
            Orientation::TopMounted => {
                WINDOW_HEIGHT as i32 + rng.random_range(tuning.floor_sink_min..=tuning.floor_sink_max)
            }
            Orientation::BottomMounted => {
                rng.random_range(tuning.ceiling_top_min..=tuning.ceiling_top_max)
            }
        };

        Some(Self::new(&variants[variant], variant, orientation, x, y))
    }

    /// Place an obstacle with its anchor edge at `(x, y)`: the bottom
    /// midpoint for floor obstacles, the top midpoint for ceiling ones.
    pub fn new(art: &Image, variant: usize, orientation: Orientation, x: i32, y: i32) -> Self {
        let anchor = Vec2::new(x as f32, y as f32);
        let (image, rect) = match orientation {
            Orientation::TopMounted => (art.clone(), Rect::with_mid_bottom(art.size(), anchor)),
            Orientation::BottomMounted => {
                (art.flipped_vertical(), Rect::with_mid_top(art.size(), anchor))
            }
        };
        Self {
            sprite: Sprite::new(image, rect, true),
            orientation,
            variant,
        }
    }

    pub fn update(&mut self, dt: f32, speed: f32) {
        self.sprite.pos.x -= speed * dt;
        self.sprite.sync_rect();
    }

    /// Fully past the left edge and due for removal
    pub fn is_expired(&self, despawn_right: i32) -> bool {
        self.sprite.rect.right() <= despawn_right
    }
}
