//! Software framebuffer
//!
//! Keeps the text drawn since the last clear so callers can inspect what the
//! HUD showed without reading pixels back.

use std::io::Cursor;
use std::path::Path;

use glam::IVec2;
use image::ImageFormat;

use super::Surface;
use super::font;
use crate::error::GameError;
use crate::sim::sprite::{Image, Rect, Rgba};

/// A piece of text drawn this frame
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub midtop: IVec2,
    pub size: u32,
}

/// RGBA framebuffer implementing [`Surface`]
#[derive(Debug, Clone)]
pub struct Canvas {
    frame: Image,
    labels: Vec<TextLabel>,
    presented: u64,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: Image::filled(width, height, Rgba::BLACK),
            labels: Vec::new(),
            presented: 0,
        }
    }

    pub fn frame(&self) -> &Image {
        &self.frame
    }

    /// Text drawn since the last clear, in draw order
    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    pub fn label(&self, text: &str) -> Option<&TextLabel> {
        self.labels.iter().find(|l| l.text == text)
    }

    /// Number of completed frames
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Encode the framebuffer as PNG
    pub fn to_png(&self) -> Result<Vec<u8>, GameError> {
        let mut bytes = Vec::new();
        self.frame
            .as_rgba_image()
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    pub fn write_png(&self, path: &Path) -> Result<(), GameError> {
        self.frame
            .as_rgba_image()
            .save_with_format(path, ImageFormat::Png)?;
        log::info!("Wrote snapshot to {}", path.display());
        Ok(())
    }
}

impl Surface for Canvas {
    fn clear(&mut self, color: Rgba) {
        self.frame.fill(color);
        self.labels.clear();
    }

    fn blit(&mut self, image: &Image, at: IVec2) {
        self.frame.blit(image, at);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                self.frame.blend(x, y, color);
            }
        }
    }

    fn text(&mut self, label: &str, midtop: IVec2, size: u32, color: Rgba) {
        font::draw_text(&mut self.frame, label, midtop, size, color);
        self.labels.push(TextLabel {
            text: label.to_string(),
            midtop,
            size,
        });
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}
