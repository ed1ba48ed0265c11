//! Immediate-mode line drawing recorded into a CPU vertex list.
//!
//! [`LineBatch`] keeps a transform stack like the fixed-function matrix
//! stack: `push_transform` multiplies onto the current top, `pop_transform`
//! restores the previous one. Every point handed to `line_loop` or `lines` is
//! run through the current top and stored as a world-space
//! [`LineVertex`] pair (line-list topology).

use super::Color;
use super::vertex::LineVertex;
use crate::math::{Mat4, Vec2};

/// The drawing calls game objects are allowed to make.
pub trait DrawSurface {
    /// Push `transform` multiplied onto the current transform.
    fn push_transform(&mut self, transform: Mat4);

    /// Restore the transform active before the matching push.
    fn pop_transform(&mut self);

    /// Color for subsequent lines.
    fn set_color(&mut self, color: Color);

    /// Closed polygon outline through `points`.
    fn line_loop(&mut self, points: &[Vec2]);

    /// Disconnected segments from consecutive point pairs. A trailing odd
    /// point is ignored.
    fn lines(&mut self, points: &[Vec2]);
}

/// CPU-side [`DrawSurface`] producing line-list vertices.
pub struct LineBatch {
    stack: Vec<Mat4>,
    color: Color,
    vertices: Vec<LineVertex>,
}

impl LineBatch {
    pub fn new() -> Self {
        Self {
            stack: vec![Mat4::IDENTITY],
            color: Color::WHITE,
            vertices: Vec::new(),
        }
    }

    /// Recorded vertices, two per segment.
    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    /// Number of recorded segments.
    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Current top of the transform stack.
    pub fn current_transform(&self) -> Mat4 {
        // The base entry is never popped, so the stack is never empty.
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Drop all recorded vertices and reset the stack and color.
    pub fn clear(&mut self) {
        self.stack.truncate(1);
        self.color = Color::WHITE;
        self.vertices.clear();
    }

    fn push_segment(&mut self, transform: &Mat4, a: Vec2, b: Vec2) {
        let color = self.color.to_array();
        for p in [a, b] {
            let world = transform.transform_point3(p.extend(0.0));
            self.vertices.push(LineVertex {
                position: [world.x, world.y],
                color,
            });
        }
    }
}

impl Default for LineBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSurface for LineBatch {
    fn push_transform(&mut self, transform: Mat4) {
        let top = self.current_transform();
        self.stack.push(top * transform);
    }

    fn pop_transform(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            log::warn!("pop_transform with no matching push, ignored");
        }
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn line_loop(&mut self, points: &[Vec2]) {
        if points.len() < 2 {
            return;
        }
        let transform = self.current_transform();
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.push_segment(&transform, a, b);
        }
    }

    fn lines(&mut self, points: &[Vec2]) {
        let transform = self.current_transform();
        for pair in points.chunks_exact(2) {
            self.push_segment(&transform, pair[0], pair[1]);
        }
    }
}

/// Split the segment `from → to` into dashes of length `dash` separated by
/// gaps of the same length. Returns point pairs ready for
/// [`DrawSurface::lines`].
pub fn dashed_segment(from: Vec2, to: Vec2, dash: f32) -> Vec<Vec2> {
    let length = from.distance(to);
    if length <= 0.0 || dash <= 0.0 {
        return Vec::new();
    }
    let dir = (to - from) / length;
    let mut points = Vec::new();
    let mut t = 0.0;
    while t < length {
        let end = (t + dash).min(length);
        points.push(from + dir * t);
        points.push(from + dir * end);
        t += dash * 2.0;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{rotation_matrix, translation_matrix};

    fn pos(v: &LineVertex) -> Vec2 {
        Vec2::new(v.position[0], v.position[1])
    }

    #[test]
    fn line_loop_closes_polygon() {
        let mut batch = LineBatch::new();
        batch.line_loop(&[Vec2::ZERO, Vec2::X, Vec2::Y]);
        assert_eq!(batch.segment_count(), 3);
        let v = batch.vertices();
        assert_eq!(pos(&v[4]), Vec2::Y);
        assert_eq!(pos(&v[5]), Vec2::ZERO);
    }

    #[test]
    fn degenerate_loop_draws_nothing() {
        let mut batch = LineBatch::new();
        batch.line_loop(&[Vec2::ONE]);
        batch.line_loop(&[]);
        assert_eq!(batch.segment_count(), 0);
    }

    #[test]
    fn lines_ignore_trailing_point() {
        let mut batch = LineBatch::new();
        batch.lines(&[Vec2::ZERO, Vec2::X, Vec2::Y]);
        assert_eq!(batch.segment_count(), 1);
    }

    #[test]
    fn color_applies_to_following_segments() {
        let mut batch = LineBatch::new();
        batch.set_color(Color::RED);
        batch.lines(&[Vec2::ZERO, Vec2::X]);
        batch.set_color(Color::GREEN);
        batch.lines(&[Vec2::ZERO, Vec2::Y]);
        let v = batch.vertices();
        assert_eq!(v[0].color, Color::RED.to_array());
        assert_eq!(v[1].color, Color::RED.to_array());
        assert_eq!(v[2].color, Color::GREEN.to_array());
    }

    #[test]
    fn transforms_nest_and_restore() {
        let mut batch = LineBatch::new();
        batch.push_transform(translation_matrix(Vec2::new(1.0, 0.0)));
        batch.push_transform(rotation_matrix(std::f32::consts::FRAC_PI_2));
        batch.lines(&[Vec2::ZERO, Vec2::X]);
        batch.pop_transform();
        batch.lines(&[Vec2::ZERO, Vec2::X]);
        batch.pop_transform();
        batch.lines(&[Vec2::ZERO, Vec2::X]);

        let v = batch.vertices();
        // Rotated then translated: (1,0) → (0,1) → (1,1).
        assert!(pos(&v[1]).abs_diff_eq(Vec2::new(1.0, 1.0), 1e-6));
        assert_eq!(pos(&v[3]), Vec2::new(2.0, 0.0));
        assert_eq!(pos(&v[5]), Vec2::X);
    }

    #[test]
    fn popping_the_base_is_ignored() {
        let mut batch = LineBatch::new();
        batch.pop_transform();
        assert_eq!(batch.current_transform(), Mat4::IDENTITY);
    }

    #[test]
    fn clear_resets_everything() {
        let mut batch = LineBatch::new();
        batch.push_transform(translation_matrix(Vec2::ONE));
        batch.set_color(Color::RED);
        batch.lines(&[Vec2::ZERO, Vec2::X]);
        batch.clear();
        assert!(batch.vertices().is_empty());
        assert_eq!(batch.current_transform(), Mat4::IDENTITY);
    }

    #[test]
    fn dashes_cover_half_the_segment() {
        let points = dashed_segment(Vec2::ZERO, Vec2::new(2.0, 0.0), 0.25);
        assert_eq!(points.len(), 8); // 4 dashes
        let drawn: f32 = points.chunks_exact(2).map(|p| p[0].distance(p[1])).sum();
        assert!((drawn - 1.0).abs() < 1e-5);
        assert!(dashed_segment(Vec2::ZERO, Vec2::ZERO, 0.1).is_empty());
    }
}
