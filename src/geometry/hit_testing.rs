use egui::Pos2;

use super::handles::{delete_button_position, handle_positions, rotation_handle_position, Handle, HandleMetrics};
use super::rotate_point;
use crate::region::Region;

/// A control of the selected region under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionControl {
    Delete,
    Rotate,
    Resize(Handle),
}

/// Whether `point` lies in the region's box, taking rotation into account.
///
/// The point is rotated back into the region's unrotated frame, after which a
/// plain bounding-box check is enough for every shape.
pub fn hit_test(point: Pos2, region: &Region) -> bool {
    let local = rotate_point(point, region.center(), -region.rotation);
    let rect = region.rect();
    local.x >= rect.min.x && local.x <= rect.max.x && local.y >= rect.min.y && local.y <= rect.max.y
}

/// Checks the selected region's controls in priority order: delete, rotate,
/// then the resize handles.
pub fn hit_selection_control(pos: Pos2, region: &Region, metrics: HandleMetrics) -> Option<SelectionControl> {
    if pos.distance(delete_button_position(region, metrics)) < metrics.delete_radius() {
        return Some(SelectionControl::Delete);
    }

    let threshold = metrics.grab_threshold();
    if pos.distance(rotation_handle_position(region, metrics)) < threshold {
        return Some(SelectionControl::Rotate);
    }

    handle_positions(region)
        .into_iter()
        .find(|(_, p)| (pos.x - p.x).abs() < threshold && (pos.y - p.y).abs() < threshold)
        .map(|(handle, _)| SelectionControl::Resize(handle))
}

/// Distance from a point to a line segment, used for the rotation connector.
pub fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let len_sq = line_vec.length_sq();
    if len_sq == 0.0 {
        return point_vec.length();
    }

    let t = (point_vec.dot(line_vec) / len_sq).clamp(0.0, 1.0);
    let projection = line_start + line_vec * t;
    (point - projection).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{Effect, RegionId, Shape};
    use egui::{Rect, Vec2};

    fn region() -> Region {
        Region::new(
            RegionId(1),
            Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(200.0, 100.0)),
            Shape::Ellipse,
            Effect::Erase,
        )
    }

    #[test]
    fn test_hit_test_uses_box_not_shape() {
        let r = region();
        // Box corner hits even though the ellipse does not cover it.
        assert!(hit_test(Pos2::new(101.0, 101.0), &r));
        assert!(!hit_test(Pos2::new(99.0, 150.0), &r));
    }

    #[test]
    fn test_hit_test_rotated() {
        let mut r = region();
        r.rotation = std::f32::consts::FRAC_PI_2;
        // After a quarter turn the box spans x 150..250, y 50..250.
        assert!(hit_test(Pos2::new(200.0, 60.0), &r));
        assert!(!hit_test(Pos2::new(110.0, 150.0), &r));
    }

    #[test]
    fn test_control_priority() {
        let r = region();
        let metrics = HandleMetrics::default();
        assert_eq!(
            hit_selection_control(delete_button_position(&r, metrics), &r, metrics),
            Some(SelectionControl::Delete)
        );
        assert_eq!(
            hit_selection_control(rotation_handle_position(&r, metrics), &r, metrics),
            Some(SelectionControl::Rotate)
        );
        assert_eq!(
            hit_selection_control(Pos2::new(300.0, 200.0), &r, metrics),
            Some(SelectionControl::Resize(Handle::BottomRight))
        );
        assert_eq!(
            hit_selection_control(Pos2::new(104.0, 148.0), &r, metrics),
            Some(SelectionControl::Resize(Handle::MiddleLeft))
        );
        assert_eq!(hit_selection_control(Pos2::new(200.0, 150.0), &r, metrics), None);
    }

    #[test]
    fn test_distance_to_line_segment() {
        let a = Pos2::new(0.0, 0.0);
        let b = Pos2::new(10.0, 0.0);
        assert_eq!(distance_to_line_segment(Pos2::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_line_segment(Pos2::new(-4.0, 3.0), a, b), 5.0);
        assert_eq!(distance_to_line_segment(Pos2::new(2.0, 2.0), a, a), 8.0_f32.sqrt());
    }
}
