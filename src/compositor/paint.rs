//! Small raster drawing primitives for the on-canvas overlay.
//!
//! Everything here alpha-blends straight into an [`RgbaImage`] and silently
//! clips to its bounds.

use egui::{Color32, Pos2, Rect};
use image::{Rgba, RgbaImage};

use crate::geometry::distance_to_line_segment;

/// Source-over blend of `color`, scaled by `coverage` (0..=255).
pub fn blend_pixel(image: &mut RgbaImage, x: i64, y: i64, color: Color32, coverage: u8) {
    if x < 0 || y < 0 || x >= i64::from(image.width()) || y >= i64::from(image.height()) {
        return;
    }
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let alpha = u32::from(a) * u32::from(coverage) / 255;
    if alpha == 0 {
        return;
    }
    let dst = image.get_pixel_mut(x as u32, y as u32);
    *dst = mix(*dst, Rgba([r, g, b, 255]), alpha as u8);
}

/// Linear mix of `src` over `dst` with weight `alpha`, keeping the result opaque
/// where either side is.
pub fn mix(dst: Rgba<u8>, src: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let a = u32::from(alpha);
    let inv = 255 - a;
    let channel = |d: u8, s: u8| ((u32::from(s) * a + u32::from(d) * inv + 127) / 255) as u8;
    Rgba([
        channel(dst[0], src[0]),
        channel(dst[1], src[1]),
        channel(dst[2], src[2]),
        channel(dst[3], src[3]),
    ])
}

/// Pixel span covering `rect`, clipped to the image.
fn pixel_window(image: &RgbaImage, rect: Rect) -> (i64, i64, i64, i64) {
    let (w, h) = (i64::from(image.width()), i64::from(image.height()));
    (
        (rect.min.x.floor() as i64).clamp(0, w),
        (rect.min.y.floor() as i64).clamp(0, h),
        (rect.max.x.ceil() as i64).clamp(0, w),
        (rect.max.y.ceil() as i64).clamp(0, h),
    )
}

pub fn fill_circle(image: &mut RgbaImage, center: Pos2, radius: f32, color: Color32) {
    let (x0, y0, x1, y1) = pixel_window(image, Rect::from_center_size(center, egui::Vec2::splat(radius * 2.0 + 2.0)));
    for y in y0..y1 {
        for x in x0..x1 {
            let d = Pos2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
            let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend_pixel(image, x, y, color, (coverage * 255.0) as u8);
            }
        }
    }
}

/// Circle outline of `width` centered on `radius`.
pub fn stroke_circle(image: &mut RgbaImage, center: Pos2, radius: f32, width: f32, color: Color32) {
    let outer = radius + width * 0.5;
    let (x0, y0, x1, y1) = pixel_window(image, Rect::from_center_size(center, egui::Vec2::splat(outer * 2.0 + 2.0)));
    for y in y0..y1 {
        for x in x0..x1 {
            let d = Pos2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
            let coverage = (width * 0.5 + 0.5 - (d - radius).abs()).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend_pixel(image, x, y, color, (coverage * 255.0) as u8);
            }
        }
    }
}

pub fn draw_segment(image: &mut RgbaImage, a: Pos2, b: Pos2, width: f32, color: Color32) {
    let half = width * 0.5;
    let bounds = Rect::from_two_pos(a, b).expand(half + 1.0);
    let (x0, y0, x1, y1) = pixel_window(image, bounds);
    for y in y0..y1 {
        for x in x0..x1 {
            let d = distance_to_line_segment(Pos2::new(x as f32 + 0.5, y as f32 + 0.5), a, b);
            let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend_pixel(image, x, y, color, (coverage * 255.0) as u8);
            }
        }
    }
}

/// Dashed polyline through `points`, closed back to the first point.
///
/// The dash pattern carries over from one edge to the next; `phase` shifts
/// where it starts.
pub fn draw_dashed_loop(
    image: &mut RgbaImage,
    points: &[Pos2],
    width: f32,
    dash: f32,
    gap: f32,
    phase: f32,
    color: Color32,
) {
    if points.len() < 2 || dash <= 0.0 || gap < 0.0 {
        return;
    }
    let period = dash + gap;
    let start = phase.rem_euclid(period);
    let (mut on, mut remaining) = if start < dash {
        (true, dash - start)
    } else {
        (false, period - start)
    };

    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let length = a.distance(b);
        if length <= f32::EPSILON {
            continue;
        }
        let dir = (b - a) / length;
        let mut t = 0.0;
        while t < length {
            let step = remaining.min(length - t);
            if on && step > 0.0 {
                draw_segment(image, a + dir * t, a + dir * (t + step), width, color);
            }
            remaining -= step;
            if remaining <= 0.0 {
                on = !on;
                remaining = if on { dash } else { gap };
            }
            if step >= length - t {
                break;
            }
            t += step;
        }
    }
}

/// Blends `color` over every pixel of `rect`.
pub fn fill_rect_blend(image: &mut RgbaImage, rect: Rect, color: Color32) {
    let (x0, y0, x1, y1) = pixel_window(image, rect);
    for y in y0..y1 {
        for x in x0..x1 {
            blend_pixel(image, x, y, color, 255);
        }
    }
}

/// Axis-aligned outline drawn inside `rect`.
pub fn stroke_rect(image: &mut RgbaImage, rect: Rect, width: f32, color: Color32) {
    let w = width.max(1.0);
    let edges = [
        Rect::from_min_max(rect.min, Pos2::new(rect.max.x, rect.min.y + w)),
        Rect::from_min_max(Pos2::new(rect.min.x, rect.max.y - w), rect.max),
        Rect::from_min_max(Pos2::new(rect.min.x, rect.min.y + w), Pos2::new(rect.min.x + w, rect.max.y - w)),
        Rect::from_min_max(Pos2::new(rect.max.x - w, rect.min.y + w), Pos2::new(rect.max.x, rect.max.y - w)),
    ];
    for edge in edges {
        fill_rect_blend(image, edge, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn test_blend_pixel_clips_and_mixes() {
        let mut image = blank(4);
        blend_pixel(&mut image, -1, 0, Color32::BLACK, 255);
        blend_pixel(&mut image, 4, 4, Color32::BLACK, 255);
        assert!(image.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));

        blend_pixel(&mut image, 1, 1, Color32::BLACK, 255);
        assert_eq!(*image.get_pixel(1, 1), Rgba([0, 0, 0, 255]));

        blend_pixel(&mut image, 2, 2, Color32::from_black_alpha(128), 255);
        let p = image.get_pixel(2, 2);
        assert!((126..=128).contains(&p[0]), "got {:?}", p);
    }

    #[test]
    fn test_fill_circle_covers_center_only() {
        let mut image = blank(20);
        fill_circle(&mut image, Pos2::new(10.0, 10.0), 3.0, Color32::RED);
        assert_eq!(*image.get_pixel(10, 10), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_segment_and_rect_outline() {
        let mut image = blank(20);
        draw_segment(&mut image, Pos2::new(2.0, 5.5), Pos2::new(18.0, 5.5), 1.0, Color32::BLACK);
        assert_eq!(image.get_pixel(10, 5)[0], 0);
        assert_eq!(image.get_pixel(10, 8)[0], 255);

        let mut image = blank(20);
        stroke_rect(&mut image, Rect::from_min_max(Pos2::new(2.0, 2.0), Pos2::new(12.0, 12.0)), 2.0, Color32::BLACK);
        assert_eq!(image.get_pixel(2, 2)[0], 0);
        assert_eq!(image.get_pixel(11, 6)[0], 0);
        assert_eq!(image.get_pixel(6, 6)[0], 255);
    }

    #[test]
    fn test_dashed_loop_leaves_gaps() {
        let mut image = blank(40);
        let square = [
            Pos2::new(5.5, 5.5),
            Pos2::new(35.5, 5.5),
            Pos2::new(35.5, 35.5),
            Pos2::new(5.5, 35.5),
        ];
        draw_dashed_loop(&mut image, &square, 1.0, 4.0, 4.0, 0.0, Color32::BLACK);
        let row: Vec<u8> = (6..34).map(|x| image.get_pixel(x, 5)[0]).collect();
        assert!(row.iter().any(|v| *v == 0));
        assert!(row.iter().any(|v| *v == 255));
    }

    #[test]
    fn test_dashed_loop_finishes_at_fractional_scales() {
        let square = [
            Pos2::new(3.25, 4.1),
            Pos2::new(23.25, 4.1),
            Pos2::new(23.25, 18.1),
            Pos2::new(3.25, 18.1),
        ];
        for scale in [0.37, 1.6, 2.0 / 3.0, 0.8123, 1.0 / 7.0, 2.4] {
            let mut image = blank(30);
            draw_dashed_loop(&mut image, &square, 3.0 * scale, 8.0 * scale, 5.0 * scale, 6.0 * scale, Color32::BLACK);
            assert!(image.pixels().any(|p| p[0] < 255), "nothing drawn at scale {scale}");
        }
    }

    #[test]
    fn test_dashed_loop_without_gap_is_solid() {
        let mut image = blank(20);
        let line = [Pos2::new(2.0, 10.5), Pos2::new(18.0, 10.5)];
        draw_dashed_loop(&mut image, &line, 1.0, 3.0, 0.0, 0.0, Color32::BLACK);
        assert!((2..18).all(|x| image.get_pixel(x, 10)[0] == 0));
    }

    #[test]
    fn test_huge_shapes_are_clipped_to_the_image() {
        let mut image = blank(16);
        fill_circle(&mut image, Pos2::new(8.0, 8.0), 5.0e7, Color32::BLACK);
        stroke_circle(&mut image, Pos2::new(8.0, -1.0e7), 1.0e7, 4.0, Color32::BLACK);
        draw_segment(&mut image, Pos2::new(-1.0e8, 3.5), Pos2::new(1.0e8, 3.5), 1.0, Color32::BLACK);
        assert!(image.pixels().all(|p| p[0] == 0));
    }
}
