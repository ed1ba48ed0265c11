//! # Font — Glyph Atlas and Text Layout
//!
//! Uses [fontdue](https://docs.rs/fontdue) to rasterize ASCII 32–126 at a
//! fixed pixel size and packs the bitmaps row-by-row into a 512×512 RGBA
//! atlas (`[255, 255, 255, coverage]`). The text shader multiplies the sample
//! by the run's colour, so white glyphs take on any tint.
//!
//! Texel (0, 0) is reserved as solid white. Underlines are drawn as quads
//! that sample only that texel, so they go through the same pipeline and
//! draw call as the glyphs.
//!
//! Layout happens on the CPU: each [`TextRun`] is placed by mapping its ortho
//! position to window pixels, then one quad (six vertices, triangle list) is
//! emitted per visible glyph.

use std::path::Path;

use super::text::{FontStyle, TextRun};
use super::vertex::TextVertex;
use crate::error::{Error, Result};
use crate::math::Vec2;

pub const ATLAS_SIZE: u32 = 512;
const GLYPH_PADDING: u32 = 1;
const FIRST_CHAR: u32 = 32;
const LAST_CHAR: u32 = 126;

/// Per-glyph metrics and UV coordinates in the atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphInfo {
    /// UV rectangle in the atlas (normalized 0..1).
    pub u_min: f32,
    pub v_min: f32,
    pub u_max: f32,
    pub v_max: f32,
    /// Horizontal advance to next glyph (in pixels).
    pub advance: f32,
    /// Horizontal offset from cursor to glyph left edge.
    pub offset_x: f32,
    /// Distance from the baseline up to the glyph's bottom edge.
    pub offset_y: f32,
    /// Glyph pixel dimensions.
    pub width: f32,
    pub height: f32,
}

/// A rasterized glyph before packing.
#[derive(Debug, Clone)]
pub(crate) struct RasterGlyph {
    pub ch: char,
    pub width: u32,
    pub height: u32,
    pub xmin: i32,
    pub ymin: i32,
    pub advance: f32,
    pub coverage: Vec<u8>,
}

/// Packed glyph bitmaps plus the metrics needed to lay text out.
#[derive(Debug)]
pub struct GlyphAtlas {
    glyphs: Vec<Option<GlyphInfo>>,
    pixels: Vec<u8>,
    size: f32,
}

impl GlyphAtlas {
    /// Load a TTF/OTF font from disk and rasterize it at `size` pixels.
    pub fn load(path: &Path, size: f32) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = fontdue::Font::from_bytes(
            bytes,
            fontdue::FontSettings {
                scale: size,
                ..Default::default()
            },
        )
        .map_err(|reason| Error::Font {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        })?;

        let rasterized = (FIRST_CHAR..=LAST_CHAR)
            .filter_map(char::from_u32)
            .map(|ch| {
                let (metrics, coverage) = font.rasterize(ch, size);
                RasterGlyph {
                    ch,
                    width: metrics.width as u32,
                    height: metrics.height as u32,
                    xmin: metrics.xmin,
                    ymin: metrics.ymin,
                    advance: metrics.advance_width,
                    coverage,
                }
            })
            .collect();

        let atlas = Self::pack(rasterized, size);
        log::info!("Loaded font '{}' at {size}px", path.display());
        Ok(atlas)
    }

    /// Pack glyphs row-by-row. Glyphs that don't fit are dropped with a
    /// warning and render as nothing.
    pub(crate) fn pack(rasterized: Vec<RasterGlyph>, size: f32) -> Self {
        let atlas_w = ATLAS_SIZE;
        let atlas_h = ATLAS_SIZE;
        let mut pixels = vec![0u8; (atlas_w * atlas_h * 4) as usize];
        pixels[..4].copy_from_slice(&[255, 255, 255, 255]);

        let mut cursor_x = GLYPH_PADDING;
        let mut cursor_y = GLYPH_PADDING;
        let mut row_height = 0;
        let mut glyphs = vec![None; (LAST_CHAR - FIRST_CHAR + 1) as usize];

        for glyph in rasterized {
            let Some(slot) = glyph_index(glyph.ch) else {
                continue;
            };
            let (gw, gh) = (glyph.width, glyph.height);

            // Space and other zero-size glyphs only advance the pen.
            if gw == 0 || gh == 0 {
                glyphs[slot] = Some(GlyphInfo {
                    u_min: 0.0,
                    v_min: 0.0,
                    u_max: 0.0,
                    v_max: 0.0,
                    advance: glyph.advance,
                    offset_x: 0.0,
                    offset_y: 0.0,
                    width: 0.0,
                    height: 0.0,
                });
                continue;
            }

            if cursor_x + gw + GLYPH_PADDING > atlas_w {
                cursor_x = GLYPH_PADDING;
                cursor_y += row_height + GLYPH_PADDING;
                row_height = 0;
            }

            if cursor_y + gh + GLYPH_PADDING > atlas_h {
                log::warn!(
                    "Font atlas overflow at char '{}' (U+{:04X})",
                    glyph.ch,
                    glyph.ch as u32
                );
                continue;
            }

            for gy in 0..gh {
                for gx in 0..gw {
                    let alpha = glyph.coverage[(gy * gw + gx) as usize];
                    let dst = (((cursor_y + gy) * atlas_w + cursor_x + gx) * 4) as usize;
                    pixels[dst..dst + 4].copy_from_slice(&[255, 255, 255, alpha]);
                }
            }

            glyphs[slot] = Some(GlyphInfo {
                u_min: cursor_x as f32 / atlas_w as f32,
                v_min: cursor_y as f32 / atlas_h as f32,
                u_max: (cursor_x + gw) as f32 / atlas_w as f32,
                v_max: (cursor_y + gh) as f32 / atlas_h as f32,
                advance: glyph.advance,
                offset_x: glyph.xmin as f32,
                offset_y: glyph.ymin as f32,
                width: gw as f32,
                height: gh as f32,
            });

            cursor_x += gw + GLYPH_PADDING;
            row_height = row_height.max(gh);
        }

        Self {
            glyphs,
            pixels,
            size,
        }
    }

    /// RGBA8 atlas pixels, `ATLAS_SIZE × ATLAS_SIZE`.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Look up glyph info. Returns `None` for characters outside ASCII
    /// 32–126 or glyphs that didn't fit.
    pub fn glyph(&self, ch: char) -> Option<&GlyphInfo> {
        glyph_index(ch).and_then(|i| self.glyphs[i].as_ref())
    }

    /// Pen advance of `text` in pixels.
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars()
            .filter_map(|ch| self.glyph(ch))
            .map(|g| g.advance)
            .sum()
    }

    /// Build glyph (and underline) quads for `runs` in a `viewport`-sized
    /// window. Each run's position is its baseline origin.
    pub fn layout(&self, runs: &[TextRun], viewport: Vec2) -> Vec<TextVertex> {
        let white = white_uv();
        let mut vertices = Vec::new();

        for run in runs {
            let origin = run.bounds.to_pixels(run.position, viewport.x, viewport.y);
            let color = run.color.to_array();
            let mut pen_x = origin.x;

            for ch in run.text.chars() {
                let Some(g) = self.glyph(ch) else {
                    continue;
                };
                if g.width > 0.0 && g.height > 0.0 {
                    let x0 = pen_x + g.offset_x;
                    let y1 = origin.y - g.offset_y;
                    let y0 = y1 - g.height;
                    push_quad(
                        &mut vertices,
                        [x0, y0, x0 + g.width, y1],
                        [g.u_min, g.v_min, g.u_max, g.v_max],
                        color,
                    );
                }
                pen_x += g.advance;
            }

            if run.style == FontStyle::Underline && pen_x > origin.x {
                let top = origin.y + (self.size / 12.0).max(1.0);
                let thickness = (self.size / 16.0).max(1.0);
                push_quad(
                    &mut vertices,
                    [origin.x, top, pen_x, top + thickness],
                    [white.x, white.y, white.x, white.y],
                    color,
                );
            }
        }

        vertices
    }
}

fn glyph_index(ch: char) -> Option<usize> {
    let code = ch as u32;
    (FIRST_CHAR..=LAST_CHAR)
        .contains(&code)
        .then(|| (code - FIRST_CHAR) as usize)
}

/// UV of the centre of the reserved white texel.
fn white_uv() -> Vec2 {
    Vec2::splat(0.5 / ATLAS_SIZE as f32)
}

/// Two triangles covering `rect = [x0, y0, x1, y1]` (pixels, y down).
fn push_quad(out: &mut Vec<TextVertex>, rect: [f32; 4], uv: [f32; 4], color: [f32; 4]) {
    let [x0, y0, x1, y1] = rect;
    let [u0, v0, u1, v1] = uv;
    let corner = |x, y, u, v| TextVertex {
        position: [x, y],
        uv: [u, v],
        color,
    };
    let tl = corner(x0, y0, u0, v0);
    let tr = corner(x1, y0, u1, v0);
    let br = corner(x1, y1, u1, v1);
    let bl = corner(x0, y1, u0, v1);
    out.extend_from_slice(&[tl, bl, br, tl, br, tr]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render2d::{Color, OrthoBounds};

    fn glyph(ch: char, width: u32, height: u32, ymin: i32) -> RasterGlyph {
        RasterGlyph {
            ch,
            width,
            height,
            xmin: 1,
            ymin,
            advance: width as f32 + 2.0,
            coverage: vec![200; (width * height) as usize],
        }
    }

    fn test_atlas() -> GlyphAtlas {
        GlyphAtlas::pack(
            vec![
                glyph(' ', 0, 0, 0),
                glyph('0', 8, 12, 0),
                glyph('-', 6, 2, 5),
                glyph('.', 2, 2, 0),
            ],
            16.0,
        )
    }

    fn run(text: &str, style: FontStyle) -> TextRun {
        TextRun {
            bounds: OrthoBounds::symmetric(4.0),
            position: Vec2::ZERO,
            color: Color::GREEN,
            style,
            text: text.to_string(),
        }
    }

    #[test]
    fn white_texel_is_reserved() {
        let atlas = test_atlas();
        assert_eq!(&atlas.pixels()[..4], &[255, 255, 255, 255]);
        let g = atlas.glyph('0').unwrap();
        assert!(g.u_min > 0.0 && g.v_min > 0.0);
    }

    #[test]
    fn glyph_bitmap_copied_as_alpha() {
        let atlas = test_atlas();
        let g = atlas.glyph('0').unwrap();
        let x = (g.u_min * ATLAS_SIZE as f32) as usize;
        let y = (g.v_min * ATLAS_SIZE as f32) as usize;
        let idx = (y * ATLAS_SIZE as usize + x) * 4;
        assert_eq!(&atlas.pixels()[idx..idx + 4], &[255, 255, 255, 200]);
    }

    #[test]
    fn unknown_chars_are_skipped() {
        let atlas = test_atlas();
        assert!(atlas.glyph('é').is_none());
        assert!(atlas.glyph('A').is_none()); // not rasterized
        assert_eq!(atlas.text_width("0é0"), 20.0);
    }

    #[test]
    fn layout_emits_one_quad_per_visible_glyph() {
        let atlas = test_atlas();
        let verts = atlas.layout(&[run(" 0.0", FontStyle::Normal)], Vec2::new(800.0, 800.0));
        assert_eq!(verts.len(), 3 * 6);
        assert!(verts.iter().all(|v| v.color == Color::GREEN.to_array()));
    }

    #[test]
    fn glyph_sits_on_the_baseline() {
        let atlas = test_atlas();
        let verts = atlas.layout(&[run("0", FontStyle::Normal)], Vec2::new(800.0, 800.0));
        // Baseline at window centre (400, 400); '0' has xmin 1, ymin 0, 8×12.
        let tl = verts[0].position;
        let br = verts[2].position;
        assert_eq!(tl, [401.0, 388.0]);
        assert_eq!(br, [409.0, 400.0]);
    }

    #[test]
    fn underline_adds_a_white_texel_quad() {
        let atlas = test_atlas();
        let verts = atlas.layout(&[run("00", FontStyle::Underline)], Vec2::new(800.0, 800.0));
        assert_eq!(verts.len(), 3 * 6);
        let underline = &verts[12..];
        let uv = white_uv();
        assert!(underline.iter().all(|v| v.uv == [uv.x, uv.y]));
        let xs: Vec<f32> = underline.iter().map(|v| v.position[0]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 400.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 420.0);
    }

    #[test]
    fn overflow_drops_glyphs_instead_of_panicking() {
        let big: Vec<RasterGlyph> = (33u8..=126)
            .map(|c| glyph(c as char, 200, 200, 0))
            .collect();
        let atlas = GlyphAtlas::pack(big, 200.0);
        assert!(atlas.glyph('!').is_some());
        assert!(atlas.glyph('~').is_none());
    }

    #[test]
    fn bundled_font_covers_the_readout() {
        let atlas = GlyphAtlas::load(Path::new(crate::config::BUNDLED_FONT), 24.0).unwrap();
        for ch in "Tank Angle = -0.123456789".chars() {
            assert!(atlas.glyph(ch).is_some(), "no glyph for {ch:?}");
        }
        assert!(atlas.text_width("-0.707") > 0.0);
    }

    #[test]
    fn missing_font_is_an_io_error() {
        let err = GlyphAtlas::load(Path::new("/no/such/font.ttf"), 24.0).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
