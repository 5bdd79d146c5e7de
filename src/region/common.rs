use egui::{Pos2, Rect};

// Common constants for all regions
pub const MIN_REGION_SIZE: f32 = 4.0;
/// Below this the compositor skips a region entirely.
pub const MIN_RENDER_SIZE: f32 = 2.0;
/// Corner radius of a rounded rectangle, as a fraction of its shorter side.
pub const ROUNDED_CORNER_FACTOR: f32 = 0.25;

/// The rectangle spanned by a drag from `start` to `end`, with non-negative size
/// whatever direction the pointer moved in.
pub fn normalized_rect(start: Pos2, end: Pos2) -> Rect {
    Rect::from_two_pos(start, end)
}

/// Whether a drawn rectangle is big enough to become a region (or a crop).
pub fn meets_min_size(rect: &Rect) -> bool {
    rect.width() >= MIN_REGION_SIZE && rect.height() >= MIN_REGION_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_rect_any_direction() {
        let rect = normalized_rect(Pos2::new(100.0, 80.0), Pos2::new(10.0, 10.0));
        assert_eq!(rect.min, Pos2::new(10.0, 10.0));
        assert_eq!(rect.width(), 90.0);
        assert_eq!(rect.height(), 70.0);
    }

    #[test]
    fn test_min_size() {
        assert!(meets_min_size(&Rect::from_min_size(Pos2::ZERO, egui::vec2(4.0, 4.0))));
        assert!(!meets_min_size(&Rect::from_min_size(Pos2::ZERO, egui::vec2(3.9, 40.0))));
    }
}
