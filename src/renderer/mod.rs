//! Rendering module
//!
//! The game draws through the [`Surface`] trait. [`Canvas`] is the built-in
//! software implementation backed by an RGBA framebuffer.

pub mod canvas;
pub mod font;
pub mod scene;

use glam::IVec2;

use crate::sim::sprite::{Image, Rect, Rgba};

pub use canvas::{Canvas, TextLabel};
pub use scene::{draw_menu, draw_playing};

/// Something the game can draw a frame onto
pub trait Surface {
    /// Fill the whole surface
    fn clear(&mut self, color: Rgba);
    /// Alpha-composite `image` with its top-left at `at`
    fn blit(&mut self, image: &Image, at: IVec2);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    /// Draw `label` with its top edge centered on `midtop`
    fn text(&mut self, label: &str, midtop: IVec2, size: u32, color: Rgba);
    /// The frame is complete
    fn present(&mut self);
}
