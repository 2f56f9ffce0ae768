//! Software renderer for headless screenshot generation.
//!
//! Executes the visible part of a [`Page`] to a pixel buffer using fontdue
//! for text rasterization.
//!
//! # Architecture
//!
//! The renderer is the final stage in the pipeline:
//!
//! ```text
//! Style → Layout → Paint → Render
//!                    ↓        ↓
//!              DisplayList → Pixels
//! ```
//!
//! The renderer knows nothing about CSS, layout, or the markup tree. It
//! simply executes drawing commands, shifted up by the page's scroll offset.

use std::path::Path;

use anyhow::Result;
use image::{ImageBuffer, Rgba, RgbaImage};
use wren_css::{ColorValue, DisplayCommand, FontKey};

use crate::font_metrics::{SystemFonts, key_px};
use crate::page::Page;

/// Software renderer that executes display commands to a pixel buffer.
pub struct Renderer<'a> {
    /// RGBA pixel buffer
    buffer: RgbaImage,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Faces for text; text is skipped when none are loaded.
    fonts: &'a SystemFonts,
}

impl<'a> Renderer<'a> {
    /// Create a renderer with a white canvas of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32, fonts: &'a SystemFonts) -> Self {
        Self {
            buffer: ImageBuffer::from_pixel(width, height, Rgba([255, 255, 255, 255])),
            width,
            height,
            fonts,
        }
    }

    /// Draw every visible command of `page` in painting order.
    pub fn render(&mut self, page: &Page) {
        let scroll = page.scroll();
        let visible = page.visible_commands();
        log::debug!(
            target: "wren::render",
            "drawing {} of {} commands at scroll {scroll}",
            visible.len(),
            page.display_list().len()
        );
        for command in visible {
            self.execute_command(command, scroll);
        }
    }

    /// The pixel buffer.
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Execute a single display command.
    fn execute_command(&mut self, command: &DisplayCommand, scroll: f32) {
        match command {
            DisplayCommand::DrawRect {
                top,
                left,
                bottom,
                right,
                color,
            } => {
                self.fill_rect(*left, top - scroll, right - left, bottom - top, *color);
            }
            DisplayCommand::DrawText {
                top,
                left,
                text,
                font,
                color,
                ..
            } => {
                self.draw_text(text, *left, top - scroll, *font, *color);
            }
        }
    }

    /// Fill a rectangle with the given color. Only the part inside the
    /// canvas is visited.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: ColorValue) {
        let rgba = Rgba([color.r, color.g, color.b, 255]);
        let (x0, x1) = clamp_span(x, width, self.width);
        let (y0, y1) = clamp_span(y, height, self.height);

        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, rgba, color.a);
            }
        }
    }

    /// Draw one word with its top-left corner at (`x`, `y`).
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn draw_text(&mut self, text: &str, x: f32, y: f32, key: FontKey, color: ColorValue) {
        let Some(font) = self.fonts.select(key.weight, key.slant) else {
            return;
        };
        let px_size = key_px(key);
        let ascent = font
            .horizontal_line_metrics(px_size)
            .map_or(px_size * 0.8, |line| line.ascent);
        let baseline = (y + ascent) as i32;

        let rgba = Rgba([color.r, color.g, color.b, 255]);
        let mut cursor_x = x;

        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }

            // Rasterize the character; fontdue gives us the bitmap offset
            // from the baseline.
            let (metrics, bitmap) = font.rasterize(ch, px_size);
            let glyph_x = cursor_x as i32 + metrics.xmin;
            let glyph_y = baseline - metrics.ymin - metrics.height as i32;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    if let Some((px, py)) = self.clip(glyph_x + gx as i32, glyph_y + gy as i32) {
                        let alpha = (u16::from(coverage) * u16::from(color.a) / 255) as u8;
                        self.blend_pixel(px, py, rgba, alpha);
                    }
                }
            }

            cursor_x += metrics.advance_width;
        }
    }

    /// Convert signed coordinates to buffer coordinates, if inside it.
    #[allow(clippy::cast_sign_loss)]
    const fn clip(&self, x: i32, y: i32) -> Option<(u32, u32)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.width && y < self.height {
            Some((x, y))
        } else {
            None
        }
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>, alpha: u8) {
        match alpha {
            0 => {}
            255 => self.buffer.put_pixel(x, y, color),
            _ => {
                let bg = *self.buffer.get_pixel(x, y);
                self.buffer.put_pixel(x, y, alpha_blend(color, bg, alpha));
            }
        }
    }

    /// Save the rendered image to a file. The format follows the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be saved to the given path.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.buffer.save(path).map_err(|e| {
            anyhow::anyhow!("failed to save screenshot to '{}': {e}", path.display())
        })?;
        Ok(())
    }
}

/// The pixel range `[start, end)` a span of `length` from `origin` covers,
/// limited to `0..limit`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn clamp_span(origin: f32, length: f32, limit: u32) -> (u32, u32) {
    let max = limit as f32;
    let start = origin.floor().clamp(0.0, max);
    let end = (origin.floor() + length.max(0.0).floor()).clamp(start, max);
    (start as u32, end as u32)
}

/// Alpha blend a foreground color onto a background color.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_blend(fg: Rgba<u8>, bg: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let a = f32::from(alpha) / 255.0;
    let inv_a = 1.0 - a;

    Rgba([
        f32::from(fg[0]).mul_add(a, f32::from(bg[0]) * inv_a) as u8,
        f32::from(fg[1]).mul_add(a, f32::from(bg[1]) * inv_a) as u8,
        f32::from(fg[2]).mul_add(a, f32::from(bg[2]) * inv_a) as u8,
        255,
    ])
}
