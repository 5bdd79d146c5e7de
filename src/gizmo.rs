//! On-canvas controls drawn over the composited frame: the selection outline
//! with its handles, and the crop mask.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use egui::{Color32, Pos2, Rect, Vec2};
use image::RgbaImage;

use crate::compositor::paint::{
    draw_dashed_loop, draw_segment, fill_circle, fill_rect_blend, stroke_circle, stroke_rect,
};
use crate::geometry::{
    delete_button_position, handle_position, handle_positions, rotate_point, rotation_handle_position, Handle,
    HandleMetrics,
};
use crate::region::{Region, Shape, ROUNDED_CORNER_FACTOR};

const HANDLE_COLOR: Color32 = Color32::from_rgb(95, 180, 228);
const DELETE_COLOR: Color32 = Color32::from_rgb(239, 68, 68);
const CROP_SHADE_ALPHA: u8 = 140;

const OUTLINE_DARK_WIDTH: f32 = 3.0;
const OUTLINE_LIGHT_WIDTH: f32 = 1.5;
const DASH: f32 = 8.0;
const GAP: f32 = 5.0;
const LIGHT_DASH_OFFSET: f32 = 6.0;

const CURVE_SEGMENTS: usize = 48;
const CORNER_SEGMENTS: usize = 8;

/// The region's outline as a closed polygon in world space.
pub fn outline_points(region: &Region) -> Vec<Pos2> {
    let center = region.center();
    let half = region.size * 0.5;
    let local: Vec<Vec2> = match region.shape {
        Shape::Rectangle => vec![
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ],
        Shape::Ellipse => (0..CURVE_SEGMENTS)
            .map(|i| {
                let t = i as f32 / CURVE_SEGMENTS as f32 * TAU;
                Vec2::new(half.x * t.cos(), half.y * t.sin())
            })
            .collect(),
        Shape::RoundedRectangle => {
            let radius = region.size.x.min(region.size.y) * ROUNDED_CORNER_FACTOR;
            // Corner centers, clockwise from top-left, with the angle each arc starts at.
            let corners = [
                (Vec2::new(-half.x + radius, -half.y + radius), PI),
                (Vec2::new(half.x - radius, -half.y + radius), -FRAC_PI_2),
                (Vec2::new(half.x - radius, half.y - radius), 0.0),
                (Vec2::new(-half.x + radius, half.y - radius), FRAC_PI_2),
            ];
            corners
                .iter()
                .flat_map(|&(c, start)| {
                    (0..=CORNER_SEGMENTS).map(move |i| {
                        let t = start + i as f32 / CORNER_SEGMENTS as f32 * FRAC_PI_2;
                        c + Vec2::new(t.cos(), t.sin()) * radius
                    })
                })
                .collect()
        }
    };
    local
        .into_iter()
        .map(|v| rotate_point(center + v, center, region.rotation))
        .collect()
}

/// Two-tone dashed outline used for the selection and the drawing preview.
pub fn draw_region_outline(image: &mut RgbaImage, region: &Region, view_scale: f32) {
    let points = outline_points(region);
    let s = view_scale.max(f32::EPSILON);
    draw_dashed_loop(
        image,
        &points,
        OUTLINE_DARK_WIDTH * s,
        DASH * s,
        GAP * s,
        0.0,
        Color32::from_black_alpha(153),
    );
    draw_dashed_loop(
        image,
        &points,
        OUTLINE_LIGHT_WIDTH * s,
        DASH * s,
        GAP * s,
        LIGHT_DASH_OFFSET * s,
        Color32::from_white_alpha(230),
    );
}

/// Outline, eight resize handles, the rotation handle and the delete control.
pub fn draw_selection(image: &mut RgbaImage, region: &Region, metrics: HandleMetrics) {
    let hs = metrics.size;
    draw_region_outline(image, region, hs / crate::geometry::handles::HANDLE_BASE_SIZE);

    for (_, p) in handle_positions(region) {
        fill_circle(image, p, hs, Color32::WHITE);
        stroke_circle(image, p, hs, hs * 0.4, HANDLE_COLOR);
    }

    let top = handle_position(region, Handle::TopCenter);
    let rotate = rotation_handle_position(region, metrics);
    draw_segment(image, top, rotate, hs * 0.3, HANDLE_COLOR);
    fill_circle(image, rotate, hs, HANDLE_COLOR);
    stroke_circle(image, rotate, hs, hs * 0.3, Color32::WHITE);

    let delete = delete_button_position(region, metrics);
    let radius = hs * 1.6;
    fill_circle(image, delete, radius, DELETE_COLOR);
    let arm = Vec2::splat(radius * 0.4);
    draw_segment(image, delete - arm, delete + arm, hs * 0.35, Color32::WHITE);
    let arm = Vec2::new(arm.x, -arm.y);
    draw_segment(image, delete - arm, delete + arm, hs * 0.35, Color32::WHITE);
}

/// Darkens everything outside `crop` and frames it in white.
pub fn draw_crop_overlay(image: &mut RgbaImage, crop: Rect, view_scale: f32) {
    let full = Rect::from_min_size(Pos2::ZERO, Vec2::new(image.width() as f32, image.height() as f32));
    let shade = Color32::from_black_alpha(CROP_SHADE_ALPHA);
    let bands = [
        Rect::from_min_max(full.min, Pos2::new(full.max.x, crop.min.y)),
        Rect::from_min_max(Pos2::new(full.min.x, crop.min.y), Pos2::new(crop.min.x, crop.max.y)),
        Rect::from_min_max(Pos2::new(crop.max.x, crop.min.y), Pos2::new(full.max.x, crop.max.y)),
        Rect::from_min_max(Pos2::new(full.min.x, crop.max.y), full.max),
    ];
    for band in bands {
        if band.is_positive() {
            fill_rect_blend(image, band.intersect(full), shade);
        }
    }
    stroke_rect(image, crop, 2.0 * view_scale, Color32::WHITE);
}
