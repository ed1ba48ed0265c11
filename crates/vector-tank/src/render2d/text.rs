//! Overlay text, positioned in an orthographic coordinate range.
//!
//! [`TextSurface`] is a raster-position style API: pick an ortho range, move
//! the cursor, pick a color and font, print. [`TextBatch`] records each
//! `print` as a [`TextRun`]; the font renderer maps the run's ortho position
//! to window pixels when it builds glyph quads.

use std::fmt;

use super::Color;
use crate::math::Vec2;

/// Visible coordinate range of the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl OrthoBounds {
    pub const fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// `[-extent, extent]` on both axes.
    pub const fn symmetric(extent: f32) -> Self {
        Self::new(-extent, extent, -extent, extent)
    }

    /// Map a point in this range to window pixels (origin top-left, y down).
    pub fn to_pixels(&self, point: Vec2, width: f32, height: f32) -> Vec2 {
        let u = (point.x - self.left) / (self.right - self.left);
        let v = (point.y - self.bottom) / (self.top - self.bottom);
        Vec2::new(u * width, (1.0 - v) * height)
    }
}

impl Default for OrthoBounds {
    fn default() -> Self {
        Self::symmetric(1.0)
    }
}

/// Font variants the overlay can select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontStyle {
    #[default]
    Normal,
    Underline,
}

/// Text-overlay calls.
pub trait TextSurface {
    /// Coordinate range for subsequent raster positions.
    fn set_ortho(&mut self, bounds: OrthoBounds);

    fn set_font(&mut self, style: FontStyle);

    fn set_color(&mut self, color: Color);

    /// Move the cursor to (`x`, `y`) in the current ortho range.
    fn raster_pos(&mut self, x: f32, y: f32);

    /// Emit formatted text at the cursor.
    fn print(&mut self, args: fmt::Arguments<'_>);
}

/// One printed string with everything needed to place it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub bounds: OrthoBounds,
    pub position: Vec2,
    pub color: Color,
    pub style: FontStyle,
    pub text: String,
}

/// CPU-side [`TextSurface`] that records runs.
#[derive(Debug, Default)]
pub struct TextBatch {
    bounds: OrthoBounds,
    position: Vec2,
    color: Color,
    style: FontStyle,
    runs: Vec<TextRun>,
}

impl TextBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl TextSurface for TextBatch {
    fn set_ortho(&mut self, bounds: OrthoBounds) {
        self.bounds = bounds;
    }

    fn set_font(&mut self, style: FontStyle) {
        self.style = style;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn raster_pos(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    fn print(&mut self, args: fmt::Arguments<'_>) {
        self.runs.push(TextRun {
            bounds: self.bounds,
            position: self.position,
            color: self.color,
            style: self.style,
            text: args.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_state_at_print_time() {
        let mut batch = TextBatch::new();
        batch.set_ortho(OrthoBounds::symmetric(4.0));
        batch.set_color(Color::RED);
        batch.raster_pos(-4.0, 3.6);
        batch.print(format_args!("{}", 1));
        batch.set_font(FontStyle::Underline);
        batch.raster_pos(0.0, 0.0);
        batch.print(format_args!("x = {:.1}", 2.0));

        let runs = batch.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].position, Vec2::new(-4.0, 3.6));
        assert_eq!(runs[0].style, FontStyle::Normal);
        assert_eq!(runs[0].text, "1");
        assert_eq!(runs[1].style, FontStyle::Underline);
        assert_eq!(runs[1].color, Color::RED);
        assert_eq!(runs[1].text, "x = 2.0");
    }

    #[test]
    fn ortho_maps_corners_to_window() {
        let bounds = OrthoBounds::symmetric(4.0);
        assert_eq!(bounds.to_pixels(Vec2::new(-4.0, 4.0), 800.0, 600.0), Vec2::ZERO);
        assert_eq!(
            bounds.to_pixels(Vec2::new(4.0, -4.0), 800.0, 600.0),
            Vec2::new(800.0, 600.0)
        );
        assert_eq!(
            bounds.to_pixels(Vec2::ZERO, 800.0, 600.0),
            Vec2::new(400.0, 300.0)
        );
    }
}
