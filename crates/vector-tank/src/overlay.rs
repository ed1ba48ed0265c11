//! World axes and the on-screen matrix readout.
//!
//! The readout prints the tank's model matrix column by column in a fixed
//! `[-4, 4]` ortho range, each column in its own colour, with the heading in
//! degrees underneath:
//!
//! ```text
//!  x col   y col   z col   w col        y
//!  ─────   ─────   ─────   ─────       3.6
//!   0.707  -0.707   0.000   0.500      3.3
//!   0.707   0.707   0.000   0.250      3.0
//!   0.000   0.000   1.000   0.000      2.7
//!   0.000   0.000   0.000   1.000
//!
//!  Tank Angle =  45.000                2.0
//! ```

use std::fmt;

use crate::math::Vec2;
use crate::render2d::{Color, DrawSurface, FontStyle, OrthoBounds, TextSurface, dashed_segment};
use crate::tank::Tank;

/// Overlay coordinate range.
pub const READOUT_BOUNDS: OrthoBounds = OrthoBounds::symmetric(4.0);

const COLUMN_X: [f32; 4] = [-4.0, -3.2, -2.4, -1.6];
const ROW_Y: [f32; 4] = [3.6, 3.3, 3.0, 2.7];
const COLUMN_COLORS: [Color; 4] = [
    Color::RED,
    Color::GREEN,
    Color::rgb(0.0, 0.0, 0.5),
    Color::rgb(0.75, 0.75, 0.0),
];
const ANGLE_POS: Vec2 = Vec2::new(-4.0, 2.0);

/// Dash length of the world axes, in world units.
const AXIS_DASH: f32 = 0.05;

/// Formats like printf's `% .3f`: three decimals, and a space where the
/// minus sign would go for non-negative values.
#[derive(Debug, Clone, Copy)]
pub struct Signed(pub f32);

impl fmt::Display for Signed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_sign_negative() {
            write!(f, "{:.3}", self.0)
        } else {
            write!(f, " {:.3}", self.0)
        }
    }
}

/// Dashed red +X and green +Y axes from the origin to the edge of a
/// `viewplane`-sized view centred on the origin.
pub fn draw_global_axes(surface: &mut dyn DrawSurface, viewplane: Vec2) {
    let half = viewplane * 0.5;

    surface.set_color(Color::RED);
    surface.lines(&dashed_segment(Vec2::ZERO, Vec2::new(half.x, 0.0), AXIS_DASH));

    surface.set_color(Color::GREEN);
    surface.lines(&dashed_segment(Vec2::ZERO, Vec2::new(0.0, half.y), AXIS_DASH));
}

/// Print the tank's heading and composed transform.
pub fn display_transform_matrix(text: &mut dyn TextSurface, tank: &Tank) {
    text.set_ortho(READOUT_BOUNDS);

    text.set_font(FontStyle::Underline);
    text.set_color(Color::WHITE);
    text.raster_pos(ANGLE_POS.x, ANGLE_POS.y);
    text.print(format_args!(
        "Tank Angle = {}",
        Signed(tank.orientation().to_degrees())
    ));

    let m = tank.model_transform();
    text.set_font(FontStyle::Normal);
    for (c, (&x, &color)) in COLUMN_X.iter().zip(&COLUMN_COLORS).enumerate() {
        let column = m.col(c);
        text.set_color(color);
        for (r, &y) in ROW_Y.iter().enumerate() {
            text.raster_pos(x, y);
            text.print(format_args!("{}", Signed(column[r])));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use crate::object::TextureId;
    use crate::render2d::{LineBatch, LineVertex, TextBatch};

    #[test]
    fn signed_matches_printf_space_flag() {
        assert_eq!(Signed(0.5).to_string(), " 0.500");
        assert_eq!(Signed(-0.5).to_string(), "-0.500");
        assert_eq!(Signed(0.0).to_string(), " 0.000");
        assert_eq!(Signed(-0.0).to_string(), "-0.000");
        assert_eq!(Signed(45.0).to_string(), " 45.000");
        assert_eq!(Signed(1.23456).to_string(), " 1.235");
    }

    #[test]
    fn readout_layout_for_a_turned_tank() {
        let mut tank = Tank::new(Vec2::new(0.5, 0.25), 0.0, Vec2::ONE, TextureId(0));
        let input = InputState {
            rotate_left: true,
            ..InputState::default()
        };
        tank.update(1.0, &input);

        let mut text = TextBatch::new();
        display_transform_matrix(&mut text, &tank);
        let runs = text.runs();
        assert_eq!(runs.len(), 17);

        assert_eq!(runs[0].text, "Tank Angle =  45.000");
        assert_eq!(runs[0].style, FontStyle::Underline);
        assert_eq!(runs[0].position, ANGLE_POS);
        assert!(runs.iter().all(|r| r.bounds == READOUT_BOUNDS));

        // x column
        assert_eq!(runs[1].text, " 0.707");
        assert_eq!(runs[2].text, " 0.707");
        assert_eq!(runs[1].color, Color::RED);
        assert_eq!(runs[1].position, Vec2::new(-4.0, 3.6));
        // y column
        assert_eq!(runs[5].text, "-0.707");
        assert_eq!(runs[5].color, Color::GREEN);
        assert_eq!(runs[6].position, Vec2::new(-3.2, 3.3));
        // w column carries the translation
        assert_eq!(runs[13].text, " 0.500");
        assert_eq!(runs[14].text, " 0.250");
        assert_eq!(runs[16].text, " 1.000");
        assert_eq!(runs[16].position, Vec2::new(-1.6, 2.7));
        assert!(runs[1..].iter().all(|r| r.style == FontStyle::Normal));
    }

    #[test]
    fn global_axes_stay_on_their_axis() {
        let mut lines = LineBatch::new();
        draw_global_axes(&mut lines, Vec2::new(4.0, 2.0));
        assert!(lines.segment_count() > 0);

        let (red, green): (Vec<&LineVertex>, Vec<&LineVertex>) = lines
            .vertices()
            .iter()
            .partition(|v| v.color == Color::RED.to_array());
        assert!(red.iter().all(|v| v.position[1] == 0.0 && v.position[0] <= 2.0));
        assert!(green.iter().all(|v| v.position[0] == 0.0 && v.position[1] <= 1.0));
        assert!(!green.is_empty());
    }
}
