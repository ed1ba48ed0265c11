//! # Render2d — Line Art and Overlay Text
//!
//! The demo draws with two primitives only: coloured line segments in world
//! space, and short strings of text placed in a fixed orthographic overlay.
//! Game code talks to them through two small traits, [`DrawSurface`] and
//! [`TextSurface`], which mirror the immediate-mode calls a fixed-function
//! API would offer (push/pop a transform, set a colour, emit a loop or a list
//! of segments; set a raster position, print).
//!
//! ## Architecture
//!
//! ```text
//!   Tank::render ──► LineBatch (DrawSurface) ──► Vec<LineVertex> ──┐
//!                                                                  ├──► GPU pass
//!   overlay ───────► TextBatch (TextSurface) ──► Vec<TextRun> ─────┘
//!                                                  │
//!                                                  ▼
//!                                     GlyphAtlas layout → TextVertex quads
//! ```
//!
//! Both batches are plain CPU data. Transforms are applied while recording,
//! so the line shader only multiplies by the view-projection matrix, and the
//! text shader only maps pixels to clip space. The batches are rebuilt from
//! scratch every frame; nothing is retained between frames.

pub mod font;
pub mod lines;
pub(crate) mod pipeline;
pub mod text;
pub(crate) mod vertex;

pub use font::{GlyphAtlas, GlyphInfo};
pub use lines::{DrawSurface, LineBatch, dashed_segment};
pub use text::{FontStyle, OrthoBounds, TextBatch, TextRun, TextSurface};
pub use vertex::{LineVertex, TextVertex};

/// An RGBA color with floating-point components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Self = Self { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };

    /// Create a color from RGB (alpha = 1).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub(crate) fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
