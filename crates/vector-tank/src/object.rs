//! Pose and the per-frame game-object contract.

use serde::{Deserialize, Serialize};

use crate::input::InputState;
use crate::math::Vec2;
use crate::render2d::DrawSurface;

/// Minimal placement of an object in the plane.
///
/// `orientation` is in radians, counter-clockwise from +X. `size` scales the
/// object's unit-sized local geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
    pub position: Vec2,
    pub orientation: f32,
    pub size: Vec2,
}

impl Pose {
    pub fn new(position: Vec2, orientation: f32, size: Vec2) -> Self {
        Self {
            position,
            orientation,
            size,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 0.0, Vec2::ONE)
    }
}

/// Opaque handle to a visual resource. Carried, never interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Something the frame loop can step and draw.
pub trait GameObject {
    /// Advance by `dt` seconds given this frame's input snapshot.
    fn update(&mut self, dt: f32, input: &InputState);

    /// Emit draw calls. Must not change any state.
    fn render(&self, surface: &mut dyn DrawSurface);
}
