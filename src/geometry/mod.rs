//! Rotation-aware geometry for regions.
//!
//! Everything goes through [`rotate_point`]: handle placement rotates local
//! points into world space, and hit testing rotates world points back into the
//! region's unrotated frame, so no shape needs its own trigonometry.

pub mod handles;
pub mod hit_testing;

use egui::Pos2;

pub use handles::{
    delete_button_position, handle_position, handle_positions, resize_anchor, resize_from_anchor,
    rotation_handle_position, Handle, HandleMetrics, ResizeAnchor,
};
pub use hit_testing::{distance_to_line_segment, hit_selection_control, hit_test, SelectionControl};

/// Rotates `p` about `center` by `angle` radians (y axis pointing down, so a
/// positive angle turns clockwise on screen).
pub fn rotate_point(p: Pos2, center: Pos2, angle: f32) -> Pos2 {
    let (sin, cos) = angle.sin_cos();
    let d = p - center;
    Pos2::new(center.x + d.x * cos - d.y * sin, center.y + d.x * sin + d.y * cos)
}

/// Angle of `p` around `center`, as used by the rotation handle.
pub fn angle_around(p: Pos2, center: Pos2) -> f32 {
    (p.y - center.y).atan2(p.x - center.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx(a: Pos2, b: Pos2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_rotate_point_quarter_turns() {
        let center = Pos2::new(10.0, 10.0);
        assert!(approx(rotate_point(Pos2::new(20.0, 10.0), center, FRAC_PI_2), Pos2::new(10.0, 20.0)));
        assert!(approx(rotate_point(Pos2::new(20.0, 10.0), center, PI), Pos2::new(0.0, 10.0)));
        assert!(approx(rotate_point(center, center, 1.234), center));
    }

    #[test]
    fn test_rotate_point_inverse() {
        let center = Pos2::new(-3.0, 7.5);
        let p = Pos2::new(12.0, -4.0);
        let there = rotate_point(p, center, 0.7);
        assert!(approx(rotate_point(there, center, -0.7), p));
    }

    #[test]
    fn test_angle_around() {
        let center = Pos2::new(5.0, 5.0);
        assert!((angle_around(Pos2::new(5.0, 10.0), center) - FRAC_PI_2).abs() < 1e-6);
        assert!(angle_around(Pos2::new(10.0, 5.0), center).abs() < 1e-6);
    }
}
