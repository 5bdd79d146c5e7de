use egui::{CursorIcon, Pos2, Rect, Vec2};

use super::rotate_point;
use crate::region::{Region, MIN_REGION_SIZE};

/// Handle size in screen pixels; scaled into image pixels by the view scale.
pub const HANDLE_BASE_SIZE: f32 = 6.0;
const GRAB_FACTOR: f32 = 1.5;
const DELETE_HIT_FACTOR: f32 = 2.4;
const ROTATION_OFFSET_FACTOR: f32 = 5.0;
const DELETE_OFFSET_FACTOR: f32 = 3.2;

/// One of the eight resize handles of the selected region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::TopCenter,
        Handle::TopRight,
        Handle::MiddleLeft,
        Handle::MiddleRight,
        Handle::BottomLeft,
        Handle::BottomCenter,
        Handle::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Handle::TopLeft => "top_left",
            Handle::TopCenter => "top_center",
            Handle::TopRight => "top_right",
            Handle::MiddleLeft => "middle_left",
            Handle::MiddleRight => "middle_right",
            Handle::BottomLeft => "bottom_left",
            Handle::BottomCenter => "bottom_center",
            Handle::BottomRight => "bottom_right",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Handle::TopLeft | Handle::BottomRight => CursorIcon::ResizeNwSe,
            Handle::TopRight | Handle::BottomLeft => CursorIcon::ResizeNeSw,
            Handle::TopCenter | Handle::BottomCenter => CursorIcon::ResizeVertical,
            Handle::MiddleLeft | Handle::MiddleRight => CursorIcon::ResizeHorizontal,
        }
    }

    /// Position within the unrotated box as a fraction of its size.
    fn factor(&self) -> Vec2 {
        match self {
            Handle::TopLeft => Vec2::new(0.0, 0.0),
            Handle::TopCenter => Vec2::new(0.5, 0.0),
            Handle::TopRight => Vec2::new(1.0, 0.0),
            Handle::MiddleLeft => Vec2::new(0.0, 0.5),
            Handle::MiddleRight => Vec2::new(1.0, 0.5),
            Handle::BottomLeft => Vec2::new(0.0, 1.0),
            Handle::BottomCenter => Vec2::new(0.5, 1.0),
            Handle::BottomRight => Vec2::new(1.0, 1.0),
        }
    }
}

/// Sizes of the on-canvas controls, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMetrics {
    pub size: f32,
}

impl HandleMetrics {
    /// `view_scale` is image pixels per screen pixel.
    pub fn for_view_scale(view_scale: f32) -> Self {
        Self { size: HANDLE_BASE_SIZE * view_scale }
    }

    pub fn grab_threshold(&self) -> f32 {
        self.size * GRAB_FACTOR
    }

    pub fn delete_radius(&self) -> f32 {
        self.size * DELETE_HIT_FACTOR
    }
}

impl Default for HandleMetrics {
    fn default() -> Self {
        Self::for_view_scale(1.0)
    }
}

fn local_point(region: &Region, factor: Vec2) -> Pos2 {
    region.pos + region.size * factor
}

pub fn handle_position(region: &Region, handle: Handle) -> Pos2 {
    rotate_point(local_point(region, handle.factor()), region.center(), region.rotation)
}

/// World-space positions of all eight resize handles.
pub fn handle_positions(region: &Region) -> [(Handle, Pos2); 8] {
    Handle::ALL.map(|handle| (handle, handle_position(region, handle)))
}

/// The rotation handle floats above the top edge.
pub fn rotation_handle_position(region: &Region, metrics: HandleMetrics) -> Pos2 {
    let local = Pos2::new(
        region.pos.x + region.size.x * 0.5,
        region.pos.y - metrics.size * ROTATION_OFFSET_FACTOR,
    );
    rotate_point(local, region.center(), region.rotation)
}

/// The delete control sits above the top-right corner.
pub fn delete_button_position(region: &Region, metrics: HandleMetrics) -> Pos2 {
    let local = Pos2::new(
        region.pos.x + region.size.x,
        region.pos.y - metrics.size * DELETE_OFFSET_FACTOR,
    );
    rotate_point(local, region.center(), region.rotation)
}

/// What stays put while a handle is dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeAnchor {
    /// The opposite corner or edge midpoint, in world space.
    pub point: Pos2,
    pub resize_x: bool,
    pub resize_y: bool,
    /// Offset of the region center from `point`, in the region's local frame.
    pub center_offset: Vec2,
    pub angle: f32,
}

pub fn resize_anchor(handle: Handle, region: &Region) -> ResizeAnchor {
    let factor = handle.factor();
    let opposite = Vec2::new(1.0 - factor.x, 1.0 - factor.y);
    let point = rotate_point(local_point(region, opposite), region.center(), region.rotation);
    ResizeAnchor {
        point,
        resize_x: factor.x != 0.5,
        resize_y: factor.y != 0.5,
        center_offset: (factor - Vec2::splat(0.5)) * region.size,
        angle: region.rotation,
    }
}

/// New unrotated box for a region whose handle is dragged to `pointer`.
///
/// The pointer offset from the anchor is projected onto the region's rotated
/// axes; each resizable axis takes the projected length (floored at the minimum
/// region size) and the center is rebuilt from the anchor so the anchor stays fixed.
pub fn resize_from_anchor(anchor: &ResizeAnchor, pointer: Pos2, current_size: Vec2) -> Rect {
    let (sin, cos) = anchor.angle.sin_cos();
    let v = pointer - anchor.point;
    let proj = Vec2::new(v.x * cos + v.y * sin, -v.x * sin + v.y * cos);

    let (width, off_x) = if anchor.resize_x {
        let width = proj.x.abs().max(MIN_REGION_SIZE);
        (width, proj.x.signum() * width * 0.5)
    } else {
        (current_size.x, anchor.center_offset.x)
    };
    let (height, off_y) = if anchor.resize_y {
        let height = proj.y.abs().max(MIN_REGION_SIZE);
        (height, proj.y.signum() * height * 0.5)
    } else {
        (current_size.y, anchor.center_offset.y)
    };

    let center = anchor.point + Vec2::new(off_x * cos - off_y * sin, off_x * sin + off_y * cos);
    Rect::from_center_size(center, Vec2::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{Effect, RegionId, Shape};

    fn region(rotation: f32) -> Region {
        let mut r = Region::new(
            RegionId(1),
            Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::new(90.0, 70.0)),
            Shape::Rectangle,
            Effect::Redact,
        );
        r.rotation = rotation;
        r
    }

    #[test]
    fn test_unrotated_handle_positions() {
        let r = region(0.0);
        let positions = handle_positions(&r);
        assert_eq!(positions[0], (Handle::TopLeft, Pos2::new(10.0, 10.0)));
        assert_eq!(positions[1], (Handle::TopCenter, Pos2::new(55.0, 10.0)));
        assert_eq!(positions[4], (Handle::MiddleRight, Pos2::new(100.0, 45.0)));
        assert_eq!(positions[7], (Handle::BottomRight, Pos2::new(100.0, 80.0)));
    }

    #[test]
    fn test_anchor_is_opposite_handle() {
        for rotation in [0.0, 0.4, -2.0] {
            let r = region(rotation);
            let anchor = resize_anchor(Handle::TopLeft, &r);
            assert!((anchor.point - handle_position(&r, Handle::BottomRight)).length() < 1e-4);
            assert!(anchor.resize_x && anchor.resize_y);

            let anchor = resize_anchor(Handle::TopCenter, &r);
            assert!((anchor.point - handle_position(&r, Handle::BottomCenter)).length() < 1e-4);
            assert!(!anchor.resize_x && anchor.resize_y);
            assert_eq!(anchor.center_offset, Vec2::new(0.0, -35.0));
        }
    }

    #[test]
    fn test_resize_bottom_right_keeps_top_left() {
        let r = region(0.0);
        let anchor = resize_anchor(Handle::BottomRight, &r);
        let rect = resize_from_anchor(&anchor, Pos2::new(150.0, 130.0), r.size);
        assert!((rect.min - Pos2::new(10.0, 10.0)).length() < 1e-4);
        assert!((rect.size() - Vec2::new(140.0, 120.0)).length() < 1e-4);
    }

    #[test]
    fn test_resize_is_floored_and_anchor_stays() {
        let r = region(0.0);
        let anchor = resize_anchor(Handle::BottomRight, &r);
        let rect = resize_from_anchor(&anchor, Pos2::new(11.0, 11.0), r.size);
        assert_eq!(rect.size(), Vec2::new(MIN_REGION_SIZE, MIN_REGION_SIZE));
        assert!((rect.min - Pos2::new(10.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn test_rotation_and_delete_controls_above_top_edge() {
        let r = region(0.0);
        let metrics = HandleMetrics::default();
        assert_eq!(rotation_handle_position(&r, metrics), Pos2::new(55.0, 10.0 - 30.0));
        let delete = delete_button_position(&r, metrics);
        assert!((delete - Pos2::new(100.0, 10.0 - 19.2)).length() < 1e-4);
    }

    #[test]
    fn test_cursor_icons() {
        assert_eq!(Handle::TopLeft.cursor_icon(), CursorIcon::ResizeNwSe);
        assert_eq!(Handle::BottomLeft.cursor_icon(), CursorIcon::ResizeNeSw);
        assert_eq!(Handle::BottomCenter.cursor_icon(), CursorIcon::ResizeVertical);
        assert_eq!(Handle::MiddleLeft.cursor_icon(), CursorIcon::ResizeHorizontal);
    }
}
