//! # Tank — Pose In, Matrices Out
//!
//! The tank owns a [`Pose`] and three matrices derived from it:
//!
//! ```text
//!   T  = translate(position.x, position.y, 0)
//!   R  = rotate_z(orientation)
//!   TR = T × R        (rotate about the local origin, then move into place)
//! ```
//!
//! `TR` is the model-to-world transform used for drawing and for the matrix
//! readout. All three are recomputed at construction and at the end of every
//! [`update`](Tank::update), and the pose can only be changed through methods
//! that do the same, so a caller never sees a matrix that lags the pose.
//!
//! Movement reads the forward direction from the first column of `R`, i.e.
//! the orientation as of the previous update; rotation input is applied after
//! movement in the same frame.

use std::f32::consts::FRAC_PI_4;

use crate::input::InputState;
use crate::math::{self, Mat4, Vec2, Vec3};
use crate::object::{GameObject, Pose, TextureId};
use crate::render2d::{Color, DrawSurface};

/// World units per second while moving forward or backward.
pub const LINEAR_SPEED: f32 = 0.5;

/// Radians per second while rotating (45°/s).
pub const ANGULAR_SPEED: f32 = FRAC_PI_4;

const BODY_COLOR: Color = Color::rgb(0.0, 0.8, 0.0);
const AXIS_LENGTH: f32 = 0.4;

const BODY: [Vec2; 4] = [
    Vec2::new(-0.1, 0.05),
    Vec2::new(0.1, 0.05),
    Vec2::new(0.1, -0.05),
    Vec2::new(-0.1, -0.05),
];

const TURRET: [Vec2; 3] = [
    Vec2::new(-0.05, 0.04),
    Vec2::new(0.075, 0.0),
    Vec2::new(-0.05, -0.04),
];

/// A keyboard-driven tank drawn as line art.
#[derive(Debug, Clone)]
pub struct Tank {
    pose: Pose,
    texture: TextureId,
    translation: Mat4,
    rotation: Mat4,
    model: Mat4,
}

impl Tank {
    /// Create a tank with the given pose. Derived matrices are ready
    /// immediately.
    pub fn new(position: Vec2, orientation: f32, size: Vec2, texture: TextureId) -> Self {
        Self::from_pose(Pose::new(position, orientation, size), texture)
    }

    pub fn from_pose(pose: Pose, texture: TextureId) -> Self {
        let mut tank = Self {
            pose,
            texture,
            translation: Mat4::IDENTITY,
            rotation: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
        };
        tank.recompute();
        tank
    }

    fn recompute(&mut self) {
        self.translation = math::translation_matrix(self.pose.position);
        self.rotation = math::rotation_matrix(self.pose.orientation);
        self.model = self.translation * self.rotation;
    }

    /// Replace the whole pose.
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
        self.recompute();
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn position(&self) -> Vec2 {
        self.pose.position
    }

    /// Orientation in radians, counter-clockwise from +X.
    pub fn orientation(&self) -> f32 {
        self.pose.orientation
    }

    pub fn size(&self) -> Vec2 {
        self.pose.size
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    pub fn translation_matrix(&self) -> &Mat4 {
        &self.translation
    }

    pub fn rotation_matrix(&self) -> &Mat4 {
        &self.rotation
    }

    /// Composed `translation × rotation`, the model-to-world transform.
    pub fn model_transform(&self) -> &Mat4 {
        &self.model
    }

    /// Direction the tank currently faces.
    pub fn forward(&self) -> Vec2 {
        math::forward_from_rotation(&self.rotation)
    }

    /// Advance the pose by `dt` seconds. Forward beats backward and
    /// rotate-left beats rotate-right when both of a pair are held.
    pub fn update(&mut self, dt: f32, input: &InputState) {
        let step = self.forward() * LINEAR_SPEED * dt;
        if input.forward {
            self.pose.position += step;
        } else if input.backward {
            self.pose.position -= step;
        }

        let turn = ANGULAR_SPEED * dt;
        if input.rotate_left {
            self.pose.orientation += turn;
        } else if input.rotate_right {
            self.pose.orientation -= turn;
        }

        self.recompute();

        if input.forward || input.backward || input.rotate_left || input.rotate_right {
            log::debug!(
                "tank at ({:.3}, {:.3}) facing {:.1}°",
                self.pose.position.x,
                self.pose.position.y,
                self.pose.orientation.to_degrees()
            );
        }
    }

    /// Draw body, turret and local axes under `model × scale(size)`.
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        let scale = Mat4::from_scale(Vec3::new(self.pose.size.x, self.pose.size.y, 1.0));
        surface.push_transform(self.model * scale);

        surface.set_color(BODY_COLOR);
        surface.line_loop(&BODY);
        surface.line_loop(&TURRET);

        surface.set_color(Color::RED);
        surface.lines(&[Vec2::ZERO, Vec2::new(AXIS_LENGTH, 0.0)]);
        surface.set_color(Color::GREEN);
        surface.lines(&[Vec2::ZERO, Vec2::new(0.0, AXIS_LENGTH)]);

        surface.pop_transform();
    }
}

impl GameObject for Tank {
    fn update(&mut self, dt: f32, input: &InputState) {
        Tank::update(self, dt, input);
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        Tank::render(self, surface);
    }
}
