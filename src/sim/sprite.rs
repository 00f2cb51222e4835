//! Sprite primitives: RGBA images, integer rects and pixel masks
//!
//! A sprite's float position is authoritative; its rect is re-derived from it
//! every frame. Masks are derived from whatever image is currently shown.

use bytemuck::{Pod, Zeroable};
use glam::{IVec2, Vec2};
use image::{Pixel, RgbaImage, imageops};

use crate::round_px;

/// Alpha strictly above this counts as solid in a collision mask
pub const MASK_ALPHA_THRESHOLD: u8 = 127;

/// A straight (non-premultiplied) RGBA pixel
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Linear blend toward `other` by `t` in [0, 1]
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl From<Rgba> for image::Rgba<u8> {
    fn from(c: Rgba) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

impl From<image::Rgba<u8>> for Rgba {
    fn from(p: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = p.0;
        Self::new(r, g, b, a)
    }
}

/// An RGBA image backed by [`RgbaImage`]
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    buf: RgbaImage,
}

impl Image {
    /// Fully transparent image
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            buf: RgbaImage::from_pixel(width, height, color.into()),
        }
    }

    /// Build an image by evaluating `f(x, y)` for every pixel
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgba) -> Self {
        Self {
            buf: RgbaImage::from_fn(width, height, |x, y| f(x, y).into()),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width() as i32, self.height() as i32)
    }

    /// Row-major pixels
    pub fn pixels(&self) -> &[Rgba] {
        bytemuck::cast_slice(self.buf.as_raw().as_slice())
    }

    /// The backing buffer, for encoding
    pub fn as_rgba_image(&self) -> &RgbaImage {
        &self.buf
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.buf.get_pixel_checked(x, y).map(|p| Rgba::from(*p))
    }

    fn pixel_mut(&mut self, x: i32, y: i32) -> Option<&mut image::Rgba<u8>> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        self.buf.get_pixel_mut_checked(x, y)
    }

    /// Overwrite a pixel; out-of-bounds writes are ignored
    pub fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(px) = self.pixel_mut(x, y) {
            *px = color.into();
        }
    }

    /// Composite a pixel over the existing one; out-of-bounds writes are ignored
    pub fn blend(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(px) = self.pixel_mut(x, y) {
            px.blend(&color.into());
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        let color = color.into();
        for px in self.buf.pixels_mut() {
            *px = color;
        }
    }

    /// Alpha-composite `src` with its top-left at `at`, clipped to this image
    pub fn blit(&mut self, src: &Image, at: IVec2) {
        imageops::overlay(&mut self.buf, &src.buf, at.x.into(), at.y.into());
    }

    /// Copy `src` over this image at `at`, alpha included
    pub fn paste(&mut self, src: &Image, at: IVec2) {
        imageops::replace(&mut self.buf, &src.buf, at.x.into(), at.y.into());
    }

    /// Mirror top-to-bottom
    pub fn flipped_vertical(&self) -> Image {
        Image {
            buf: imageops::flip_vertical(&self.buf),
        }
    }

    /// Rotate counter-clockwise (as seen on screen) by `degrees`.
    ///
    /// The result grows to fit the rotated bounds; uncovered pixels are
    /// transparent. A zero angle returns an exact copy.
    pub fn rotated(&self, degrees: f32) -> Image {
        if degrees == 0.0 || !degrees.is_finite() {
            return self.clone();
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (w, h) = (self.width() as f32, self.height() as f32);
        // Trim float noise so quarter turns keep exact dimensions
        let out_w = ((w * cos.abs() + h * sin.abs() - 1e-3).ceil() as u32).max(1);
        let out_h = ((w * sin.abs() + h * cos.abs() - 1e-3).ceil() as u32).max(1);
        let (cx, cy) = (w / 2.0, h / 2.0);
        let (ox, oy) = (out_w as f32 / 2.0, out_h as f32 / 2.0);

        Image::from_fn(out_w, out_h, |x, y| {
            let dx = x as f32 + 0.5 - ox;
            let dy = y as f32 + 0.5 - oy;
            // Inverse mapping; y grows downward
            let sx = dx * cos - dy * sin + cx;
            let sy = dx * sin + dy * cos + cy;
            if sx < 0.0 || sy < 0.0 {
                return Rgba::TRANSPARENT;
            }
            self.get(sx as u32, sy as u32).unwrap_or(Rgba::TRANSPARENT)
        })
    }
}

/// Per-pixel solidity for collision tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Solid wherever the image's alpha exceeds [`MASK_ALPHA_THRESHOLD`]
    pub fn from_image(image: &Image) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            bits: image
                .pixels()
                .iter()
                .map(|p| p.a > MASK_ALPHA_THRESHOLD)
                .collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Solidity at local coordinates; outside the mask is empty
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as u32) < self.width
            && (y as u32) < self.height
            && self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    /// Number of solid pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Whether any solid pixel of `self` at `pos` lands on a solid pixel of
    /// `other` at `other_pos`. Both positions are top-left corners.
    pub fn overlaps(&self, pos: IVec2, other: &Mask, other_pos: IVec2) -> bool {
        let left = pos.x.max(other_pos.x);
        let right = (pos.x + self.width as i32).min(other_pos.x + other.width as i32);
        let top = pos.y.max(other_pos.y);
        let bottom = (pos.y + self.height as i32).min(other_pos.y + other.height as i32);
        if left >= right || top >= bottom {
            return false;
        }
        (top..bottom).any(|y| {
            (left..right).any(|x| {
                self.get(x - pos.x, y - pos.y) && other.get(x - other_pos.x, y - other_pos.y)
            })
        })
    }
}

/// Integer screen rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn top_left(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.w, self.h)
    }

    /// Rect of `size` whose left edge and vertical center sit on `p`
    pub fn with_mid_left(size: IVec2, p: Vec2) -> Self {
        let p = p.as_ivec2();
        Self::new(p.x, p.y - size.y / 2, size.x, size.y)
    }

    /// Rect of `size` whose bottom edge and horizontal center sit on `p`
    pub fn with_mid_bottom(size: IVec2, p: Vec2) -> Self {
        let p = p.as_ivec2();
        Self::new(p.x - size.x / 2, p.y - size.y, size.x, size.y)
    }

    /// Rect of `size` whose top edge and horizontal center sit on `p`
    pub fn with_mid_top(size: IVec2, p: Vec2) -> Self {
        let p = p.as_ivec2();
        Self::new(p.x - size.x / 2, p.y, size.x, size.y)
    }

    /// Rect of `size` whose bottom-left corner sits on `p`
    pub fn with_bottom_left(size: IVec2, p: Vec2) -> Self {
        let p = p.as_ivec2();
        Self::new(p.x, p.y - size.y, size.x, size.y)
    }

    /// Rect of `size` centered on `p`
    pub fn with_center(size: IVec2, p: Vec2) -> Self {
        let p = p.as_ivec2();
        Self::new(p.x - size.x / 2, p.y - size.y / 2, size.x, size.y)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Half-open containment: right and bottom edges are outside
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() as f32
            && p.x < self.right() as f32
            && p.y >= self.top() as f32
            && p.y < self.bottom() as f32
    }
}

/// Shared record for every on-screen entity
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Authoritative top-left position
    pub pos: Vec2,
    /// Derived from `pos` each frame
    pub rect: Rect,
    /// Image currently drawn at `rect.top_left()`
    pub image: Image,
    /// Derived from `image` for entities that collide
    pub mask: Option<Mask>,
}

impl Sprite {
    pub fn new(image: Image, rect: Rect, with_mask: bool) -> Self {
        let mask = with_mask.then(|| Mask::from_image(&image));
        Self {
            pos: rect.top_left().as_vec2(),
            rect,
            image,
            mask,
        }
    }

    /// Re-derive the rect position from the float position
    pub fn sync_rect(&mut self) {
        self.rect.x = round_px(self.pos.x);
        self.rect.y = round_px(self.pos.y);
    }

    /// Recompute the mask from the current image (no-op for maskless sprites)
    pub fn refresh_mask(&mut self) {
        if self.mask.is_some() {
            self.mask = Some(Mask::from_image(&self.image));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32) -> Image {
        Image::filled(w, h, Rgba::WHITE)
    }

    #[test]
    fn test_mask_alpha_threshold() {
        let mut image = Image::new(3, 1);
        image.put(0, 0, Rgba::new(0, 0, 0, 127));
        image.put(1, 0, Rgba::new(0, 0, 0, 128));
        image.put(2, 0, Rgba::new(0, 0, 0, 255));
        let mask = Mask::from_image(&image);
        assert!(!mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert!(mask.get(2, 0));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn test_mask_overlap_requires_solid_pixels() {
        // Bounding boxes overlap but the solid pixels do not
        let mut a = Image::new(10, 10);
        a.put(0, 0, Rgba::WHITE);
        let mut b = Image::new(10, 10);
        b.put(9, 9, Rgba::WHITE);
        let (ma, mb) = (Mask::from_image(&a), Mask::from_image(&b));

        assert!(!ma.overlaps(IVec2::ZERO, &mb, IVec2::new(5, 5)));
        // Shift b so its solid pixel lands on a's
        assert!(ma.overlaps(IVec2::ZERO, &mb, IVec2::new(-9, -9)));
    }

    #[test]
    fn test_mask_overlap_disjoint_boxes() {
        let m = Mask::from_image(&solid(4, 4));
        assert!(!m.overlaps(IVec2::ZERO, &m, IVec2::new(4, 0)));
        assert!(m.overlaps(IVec2::ZERO, &m, IVec2::new(3, 3)));
    }

    #[test]
    fn test_flip_vertical() {
        let mut image = Image::new(2, 3);
        image.put(1, 0, Rgba::WHITE);
        let flipped = image.flipped_vertical();
        assert_eq!(flipped.get(1, 2), Some(Rgba::WHITE));
        assert_eq!(flipped.get(1, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_rotate_zero_is_identity() {
        let mut image = Image::new(5, 3);
        image.put(4, 1, Rgba::WHITE);
        assert_eq!(image.rotated(0.0), image);
    }

    #[test]
    fn test_rotate_quarter_turn_is_counter_clockwise() {
        // Single solid pixel on the right edge, middle row
        let mut image = Image::new(5, 5);
        image.put(4, 2, Rgba::WHITE);
        let rotated = image.rotated(90.0);
        assert_eq!(rotated.width(), 5);
        assert_eq!(rotated.height(), 5);
        // Right moves to top
        assert_eq!(rotated.get(2, 0), Some(Rgba::WHITE));
        assert_eq!(Mask::from_image(&rotated).count(), 1);
    }

    #[test]
    fn test_rotate_grows_bounds() {
        let rotated = solid(10, 10).rotated(45.0);
        assert!(rotated.width() > 10);
        assert!(rotated.height() > 10);
        // Corners of the grown canvas stay empty
        assert_eq!(rotated.get(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_blit_clips_and_blends() {
        let mut dst = Image::filled(4, 4, Rgba::BLACK);
        dst.blit(&solid(2, 2), IVec2::new(3, 3));
        assert_eq!(dst.get(3, 3), Some(Rgba::WHITE));
        assert_eq!(dst.get(2, 2), Some(Rgba::BLACK));

        dst.blit(&Image::new(4, 4), IVec2::ZERO);
        assert_eq!(dst.get(3, 3), Some(Rgba::WHITE));
    }

    #[test]
    fn test_pixels_match_buffer_layout() {
        let mut image = Image::filled(2, 1, Rgba::new(1, 2, 3, 4));
        image.put(1, 0, Rgba::new(5, 6, 7, 8));
        assert_eq!(image.pixels(), &[Rgba::new(1, 2, 3, 4), Rgba::new(5, 6, 7, 8)]);
        assert_eq!(image.as_rgba_image().as_raw(), &vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_paste_replaces_alpha() {
        let mut dst = Image::filled(4, 2, Rgba::BLACK);
        dst.paste(&Image::new(2, 2), IVec2::new(2, 0));
        assert_eq!(dst.get(1, 1), Some(Rgba::BLACK));
        assert_eq!(dst.get(2, 0), Some(Rgba::TRANSPARENT));
        // Off the left edge is clipped
        dst.paste(&Image::filled(2, 2, Rgba::WHITE), IVec2::new(-1, 0));
        assert_eq!(dst.get(0, 0), Some(Rgba::WHITE));
        assert_eq!(dst.get(1, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_blend_half_alpha_mixes() {
        let mut image = Image::filled(1, 1, Rgba::BLACK);
        image.blend(0, 0, Rgba::new(255, 255, 255, 128));
        let px = image.get(0, 0).unwrap();
        assert!(px.a >= 254, "{px:?}");
        assert!(px.r > 100 && px.r < 155, "{px:?}");
        // Out of bounds is ignored
        image.blend(-1, 0, Rgba::WHITE);
        image.blend(1, 0, Rgba::WHITE);
        assert_eq!(image.get(0, 0), Some(px));
    }

    #[test]
    fn test_rect_anchors() {
        let size = IVec2::new(10, 20);
        let r = Rect::with_mid_left(size, Vec2::new(24.0, 400.0));
        assert_eq!((r.left(), r.center_y()), (24, 400));

        let r = Rect::with_mid_bottom(size, Vec2::new(100.0, 50.0));
        assert_eq!((r.center_x(), r.bottom()), (100, 50));

        let r = Rect::with_mid_top(size, Vec2::new(100.0, -30.0));
        assert_eq!((r.center_x(), r.top()), (100, -30));

        let r = Rect::with_bottom_left(size, Vec2::new(0.0, 800.0));
        assert_eq!((r.left(), r.bottom()), (0, 800));
    }

    #[test]
    fn test_rect_contains_point_half_open() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains_point(Vec2::new(10.0, 10.0)));
        assert!(!r.contains_point(Vec2::new(15.0, 12.0)));
    }

    #[test]
    fn test_sprite_sync_rect_rounds() {
        let mut sprite = Sprite::new(solid(2, 2), Rect::new(0, 0, 2, 2), true);
        sprite.pos = Vec2::new(-3.6, 7.4);
        sprite.sync_rect();
        assert_eq!(sprite.rect.top_left(), IVec2::new(-4, 7));
        assert_eq!(sprite.rect.size(), IVec2::new(2, 2));
    }
}
