use egui::{Pos2, Vec2};

use crate::geometry::rotate_point;
use crate::region::Region;

/// Sub-pixel sample offsets (2x2 grid) used for soft shape edges.
const SAMPLES: [(f32, f32); 4] = [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)];

/// Per-pixel coverage of a region's rotated shape, limited to the surface.
#[derive(Debug, Clone)]
pub struct ShapeMask {
    pub x0: u32,
    pub y0: u32,
    pub width: u32,
    pub height: u32,
    coverage: Vec<u8>,
}

impl ShapeMask {
    /// `None` when the region does not touch the surface at all.
    pub fn build(region: &Region, surface_width: u32, surface_height: u32) -> Option<Self> {
        let (x0, y0, width, height) =
            clamp_to_surface(region.world_bounds(), surface_width, surface_height)?;

        let center = region.center();
        let mut coverage = vec![0u8; (width * height) as usize];
        for row in 0..height {
            for column in 0..width {
                let px = (x0 + column) as f32;
                let py = (y0 + row) as f32;
                let hits = SAMPLES
                    .iter()
                    .filter(|(dx, dy)| {
                        let local = rotate_point(Pos2::new(px + dx, py + dy), center, -region.rotation);
                        region.shape.contains_local(local - center, region.size)
                    })
                    .count();
                coverage[(row * width + column) as usize] = (hits * 255 / SAMPLES.len()) as u8;
            }
        }

        Some(Self { x0, y0, width, height, coverage })
    }

    #[cfg(test)]
    pub fn coverage_at(&self, x: u32, y: u32) -> u8 {
        if x < self.x0 || y < self.y0 || x >= self.x0 + self.width || y >= self.y0 + self.height {
            return 0;
        }
        self.coverage[((y - self.y0) * self.width + (x - self.x0)) as usize]
    }

    /// Calls `f(x, y, coverage)` for every surface pixel the shape touches.
    pub fn for_each_covered(&self, mut f: impl FnMut(u32, u32, u8)) {
        for row in 0..self.height {
            for column in 0..self.width {
                let c = self.coverage[(row * self.width + column) as usize];
                if c > 0 {
                    f(self.x0 + column, self.y0 + row, c);
                }
            }
        }
    }

    #[cfg(test)]
    pub fn covered_pixels(&self) -> usize {
        self.coverage.iter().filter(|c| **c > 0).count()
    }
}

/// Position of a surface pixel center in the region's unrotated frame,
/// relative to the box's top-left corner.
pub fn local_offset(region: &Region, x: u32, y: u32) -> Vec2 {
    let center = region.center();
    let world = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
    rotate_point(world, center, -region.rotation) - region.pos
}

/// Whole-pixel window `(x, y, w, h)` of `rect` inside a `width` x `height`
/// surface, or `None` if nothing is left after clamping.
pub fn clamp_to_surface(rect: egui::Rect, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    if !rect.is_finite() {
        return None;
    }
    let x0 = rect.min.x.floor().max(0.0);
    let y0 = rect.min.y.floor().max(0.0);
    let x1 = rect.max.x.ceil().min(width as f32);
    let y1 = rect.max.y.ceil().min(height as f32);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some((x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{Effect, RegionId, Shape};
    use egui::Rect;

    fn region(shape: Shape) -> Region {
        Region::new(
            RegionId(1),
            Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::new(20.0, 20.0)),
            shape,
            Effect::Redact,
        )
    }

    #[test]
    fn test_rectangle_mask_is_full_inside() {
        let mask = ShapeMask::build(&region(Shape::Rectangle), 64, 64).unwrap();
        assert_eq!((mask.x0, mask.y0, mask.width, mask.height), (10, 10, 20, 20));
        assert_eq!(mask.coverage_at(10, 10), 255);
        assert_eq!(mask.coverage_at(29, 29), 255);
        assert_eq!(mask.coverage_at(30, 30), 0);
        assert_eq!(mask.covered_pixels(), 400);
    }

    #[test]
    fn test_ellipse_mask_skips_corners() {
        let mask = ShapeMask::build(&region(Shape::Ellipse), 64, 64).unwrap();
        assert_eq!(mask.coverage_at(10, 10), 0);
        assert_eq!(mask.coverage_at(20, 20), 255);
        assert!(mask.covered_pixels() < 400);
    }

    #[test]
    fn test_mask_clamped_to_surface() {
        assert!(ShapeMask::build(&region(Shape::Rectangle), 8, 8).is_none());
        let mask = ShapeMask::build(&region(Shape::Rectangle), 20, 15).unwrap();
        assert_eq!((mask.width, mask.height), (10, 5));
    }

    #[test]
    fn test_local_offset_of_rotated_region() {
        let mut r = region(Shape::Rectangle);
        r.rotation = std::f32::consts::PI;
        // Half a turn maps the top-left pixel onto the bottom-right corner.
        let offset = local_offset(&r, 10, 10);
        assert!((offset - Vec2::new(19.5, 19.5)).length() < 1e-3);
    }
}
