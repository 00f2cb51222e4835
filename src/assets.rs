//! Procedurally generated artwork
//!
//! Every image the game draws is painted here once at startup. Nothing is
//! loaded from disk, so the only way to get bad art is a bug in a painter,
//! which [`Assets::validate`] catches before the first frame.

use glam::{IVec2, Vec2};

use crate::consts::{OBSTACLE_VARIANTS, PLAYER_FRAME_COUNT, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::error::GameError;
use crate::sim::player::Frames;
use crate::sim::sprite::{Image, Mask, Rgba};

/// Height of the ground strip
pub const GROUND_HEIGHT: u32 = 120;
/// Cookie frame edge length
pub const COOKIE_SIZE: u32 = 48;
/// Obstacle art dimensions
pub const OBSTACLE_SIZE: (u32, u32) = (70, 440);
/// Game-over panel dimensions
pub const OVERLAY_SIZE: (u32, u32) = (300, 150);

const SKY_TOP: Rgba = Rgba::rgb(86, 176, 228);
const SKY_BOTTOM: Rgba = Rgba::rgb(196, 232, 250);
const CLOUD: Rgba = Rgba::new(255, 255, 255, 220);
const GRASS: Rgba = Rgba::rgb(92, 178, 64);
const GRASS_DARK: Rgba = Rgba::rgb(62, 140, 48);
const DIRT: Rgba = Rgba::rgb(150, 104, 58);
const DIRT_DARK: Rgba = Rgba::rgb(118, 80, 44);
const DOUGH: Rgba = Rgba::rgb(214, 160, 92);
const DOUGH_EDGE: Rgba = Rgba::rgb(168, 112, 56);
const CHIP: Rgba = Rgba::rgb(70, 40, 24);
const PANEL: Rgba = Rgba::new(143, 93, 39, 235);
const PANEL_BORDER: Rgba = Rgba::rgb(88, 54, 22);

/// All images used by the game
#[derive(Debug, Clone)]
pub struct Assets {
    /// Sky strip: two window-wide tiles side by side
    pub background: Image,
    /// Ground strip: two window-wide tiles side by side
    pub ground: Image,
    /// Cookie animation frames
    pub player_frames: Frames,
    /// Upright obstacle variants
    pub obstacles: Vec<Image>,
    /// Game-over panel
    pub overlay: Image,
}

impl Assets {
    /// Paint every image
    pub fn generate() -> Self {
        Self {
            background: paint_background(),
            ground: paint_ground(),
            player_frames: Frames::new(
                paint_cookie(0),
                (1..PLAYER_FRAME_COUNT).map(paint_cookie),
            ),
            obstacles: (0..OBSTACLE_VARIANTS).map(paint_obstacle).collect(),
            overlay: paint_overlay(),
        }
    }

    /// Paint and check everything
    pub fn build() -> Result<Self, GameError> {
        let assets = Self::generate();
        assets.validate()?;
        log::info!(
            "Generated assets: {} cookie frames, {} obstacle variants",
            assets.player_frames.len(),
            assets.obstacles.len()
        );
        Ok(assets)
    }

    /// Reject art the simulation cannot use
    pub fn validate(&self) -> Result<(), GameError> {
        check_strip("background", &self.background)?;
        check_strip("ground", &self.ground)?;
        check_solid("ground", &self.ground)?;
        if self.ground.height() > WINDOW_HEIGHT {
            return Err(invalid("ground", "taller than the window"));
        }

        for frame in self.player_frames.iter() {
            check_solid("player_frames", frame)?;
        }
        if self.obstacles.is_empty() {
            return Err(invalid("obstacles", "no variants"));
        }
        for art in &self.obstacles {
            check_solid("obstacles", art)?;
        }
        if self.overlay.width() == 0 || self.overlay.height() == 0 {
            return Err(invalid("overlay", "empty image"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> GameError {
    GameError::InvalidAsset {
        name,
        reason: reason.into(),
    }
}

/// A scrolling strip must be two tiles wide, each covering the window
fn check_strip(name: &'static str, image: &Image) -> Result<(), GameError> {
    if image.width() % 2 != 0 {
        return Err(invalid(name, format!("odd strip width {}", image.width())));
    }
    if image.width() / 2 < WINDOW_WIDTH {
        return Err(invalid(
            name,
            format!("tile width {} narrower than the window", image.width() / 2),
        ));
    }
    if image.height() == 0 {
        return Err(invalid(name, "zero height"));
    }
    Ok(())
}

/// Collidable art needs at least one solid pixel
fn check_solid(name: &'static str, image: &Image) -> Result<(), GameError> {
    if Mask::from_image(image).count() == 0 {
        return Err(invalid(name, "no solid pixels"));
    }
    Ok(())
}

/// Filled ellipse, alpha-blended
fn ellipse(image: &mut Image, center: Vec2, radii: Vec2, color: Rgba) {
    let x0 = (center.x - radii.x).floor() as i32;
    let x1 = (center.x + radii.x).ceil() as i32;
    let y0 = (center.y - radii.y).floor() as i32;
    let y1 = (center.y + radii.y).ceil() as i32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let d = (Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center) / radii;
            if d.length_squared() <= 1.0 {
                image.blend(x, y, color);
            }
        }
    }
}

/// Two copies of `tile` side by side, for a seamless scroll wrap
fn doubled(tile: &Image) -> Image {
    let w = tile.width();
    let mut strip = Image::new(w * 2, tile.height());
    strip.paste(tile, IVec2::ZERO);
    strip.paste(tile, IVec2::new(w as i32, 0));
    strip
}

fn paint_background() -> Image {
    let mut tile = Image::from_fn(WINDOW_WIDTH, WINDOW_HEIGHT, |_, y| {
        SKY_TOP.lerp(SKY_BOTTOM, y as f32 / WINDOW_HEIGHT as f32)
    });
    let clouds = [(60.0, 120.0, 1.0), (260.0, 230.0, 0.7), (390.0, 90.0, 0.8), (150.0, 420.0, 1.2)];
    for (x, y, scale) in clouds {
        let c = Vec2::new(x, y);
        ellipse(&mut tile, c, Vec2::new(46.0, 18.0) * scale, CLOUD);
        ellipse(&mut tile, c + Vec2::new(-22.0, 4.0) * scale, Vec2::new(24.0, 14.0) * scale, CLOUD);
        ellipse(&mut tile, c + Vec2::new(18.0, -10.0) * scale, Vec2::new(26.0, 18.0) * scale, CLOUD);
    }
    doubled(&tile)
}

/// Grass surface height at column `x`, a gentle wave
fn grass_line(x: u32) -> u32 {
    let phase = x as f32 / WINDOW_WIDTH as f32 * std::f32::consts::TAU * 8.0;
    (6.0 + 5.0 * phase.sin()).round() as u32
}

fn paint_ground() -> Image {
    let tile = Image::from_fn(WINDOW_WIDTH, GROUND_HEIGHT, |x, y| {
        let surface = grass_line(x);
        if y < surface {
            Rgba::TRANSPARENT
        } else if y < surface + 14 {
            if (x + y) % 9 == 0 { GRASS_DARK } else { GRASS }
        } else if (x / 12 + y / 10) % 5 == 0 {
            DIRT_DARK
        } else {
            DIRT
        }
    });
    doubled(&tile)
}

/// One cookie frame; chips shift position from frame to frame
fn paint_cookie(frame: usize) -> Image {
    let size = COOKIE_SIZE as f32;
    let center = Vec2::splat(size / 2.0);
    let radius = size / 2.0 - 2.0;
    let mut image = Image::new(COOKIE_SIZE, COOKIE_SIZE);
    ellipse(&mut image, center, Vec2::splat(radius), DOUGH_EDGE);
    ellipse(&mut image, center, Vec2::splat(radius - 3.0), DOUGH);

    let turn = frame as f32 * 40.0_f32.to_radians();
    let chips = [(0.55, 0.0), (0.45, 2.1), (0.6, 4.0), (0.2, 5.2), (0.35, 1.1)];
    for (dist, angle) in chips {
        let (sin, cos) = (angle + turn).sin_cos();
        let at = center + Vec2::new(cos, sin) * radius * dist;
        ellipse(&mut image, at, Vec2::new(3.5, 3.0), CHIP);
    }
    image
}

/// Upright obstacle: a candy pillar with a wider cap on top
fn paint_obstacle(variant: usize) -> Image {
    let (w, h) = OBSTACLE_SIZE;
    let (body, stripe) = match variant % 2 {
        0 => (Rgba::rgb(236, 236, 236), Rgba::rgb(214, 52, 60)),
        _ => (Rgba::rgb(110, 66, 38), Rgba::rgb(84, 48, 28)),
    };
    let cap_height = 28;
    let inset = 7;
    Image::from_fn(w, h, |x, y| {
        if y < cap_height {
            if y < 3 || y >= cap_height - 3 || x < 3 || x >= w - 3 {
                stripe
            } else {
                body
            }
        } else if x >= inset && x < w - inset {
            if ((x + y) / 14) % 2 == 0 { stripe } else { body }
        } else {
            Rgba::TRANSPARENT
        }
    })
}

fn paint_overlay() -> Image {
    let (w, h) = OVERLAY_SIZE;
    let radius = 18.0;
    Image::from_fn(w, h, |x, y| {
        // Rounded corners: distance from the nearest corner circle center
        let px = (x as f32 + 0.5).clamp(radius, w as f32 - radius);
        let py = (y as f32 + 0.5).clamp(radius, h as f32 - radius);
        let d = Vec2::new(x as f32 + 0.5 - px, y as f32 + 0.5 - py).length();
        if d > radius {
            Rgba::TRANSPARENT
        } else if d > radius - 4.0 || x < 4 || y < 4 || x >= w - 4 || y >= h - 4 {
            PANEL_BORDER
        } else {
            PANEL
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_assets_validate() {
        let assets = Assets::generate();
        assert!(assets.validate().is_ok());
        assert_eq!(assets.player_frames.len(), PLAYER_FRAME_COUNT);
        assert_eq!(assets.obstacles.len(), OBSTACLE_VARIANTS);
        assert_eq!(assets.background.width(), WINDOW_WIDTH * 2);
        assert_eq!(assets.background.height(), WINDOW_HEIGHT);
    }

    #[test]
    fn test_strips_tile_seamlessly() {
        let assets = Assets::generate();
        for strip in [&assets.background, &assets.ground] {
            let tile = strip.width() / 2;
            for y in (0..strip.height()).step_by(7) {
                for x in (0..tile).step_by(5) {
                    assert_eq!(strip.get(x, y), strip.get(x + tile, y), "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_ground_bottom_is_solid() {
        let mask = Mask::from_image(&Assets::generate().ground);
        for x in 0..mask.width() as i32 {
            assert!(mask.get(x, GROUND_HEIGHT as i32 - 1));
            assert!(mask.get(x, 20));
        }
    }

    #[test]
    fn test_cookie_frames_differ() {
        let assets = Assets::generate();
        assert_ne!(assets.player_frames[0], assets.player_frames[1]);
        // Outside the disc is transparent
        assert_eq!(assets.player_frames[0].get(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_odd_strip_rejected() {
        let mut assets = Assets::generate();
        assets.ground = Image::filled(961, 100, Rgba::WHITE);
        let err = assets.validate().unwrap_err();
        assert!(matches!(err, GameError::InvalidAsset { name: "ground", .. }));
    }

    #[test]
    fn test_transparent_obstacle_rejected() {
        let mut assets = Assets::generate();
        assets.obstacles[1] = Image::new(70, 440);
        assert!(matches!(
            assets.validate(),
            Err(GameError::InvalidAsset { name: "obstacles", .. })
        ));
    }
}
