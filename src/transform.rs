use egui::Rect;
use image::imageops;
use image::RgbaImage;

use crate::region::meets_min_size;

/// Whole-image operations. Each one replaces the base image and throws the
/// region list away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageTransform {
    FlipHorizontal,
    FlipVertical,
    RotateClockwise,
    RotateCounterClockwise,
    /// Cut out a rectangle given in image pixels.
    Crop(Rect),
}

impl ImageTransform {
    pub fn name(&self) -> &'static str {
        match self {
            ImageTransform::FlipHorizontal => "flip horizontal",
            ImageTransform::FlipVertical => "flip vertical",
            ImageTransform::RotateClockwise => "rotate clockwise",
            ImageTransform::RotateCounterClockwise => "rotate counter-clockwise",
            ImageTransform::Crop(_) => "crop",
        }
    }

    /// The transformed image, or `None` when a crop leaves nothing usable.
    pub fn apply(&self, image: &RgbaImage) -> Option<RgbaImage> {
        match self {
            ImageTransform::FlipHorizontal => Some(imageops::flip_horizontal(image)),
            ImageTransform::FlipVertical => Some(imageops::flip_vertical(image)),
            ImageTransform::RotateClockwise => Some(imageops::rotate90(image)),
            ImageTransform::RotateCounterClockwise => Some(imageops::rotate270(image)),
            ImageTransform::Crop(rect) => {
                let (x, y, width, height) = crop_window(*rect, image.width(), image.height())?;
                Some(imageops::crop_imm(image, x, y, width, height).to_image())
            }
        }
    }
}

/// Whole-pixel window of a crop rectangle: corners rounded, then clamped to the
/// image. Rectangles under the minimum size are refused.
pub fn crop_window(rect: Rect, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    if !meets_min_size(&rect) {
        return None;
    }
    let x0 = rect.min.x.round().clamp(0.0, width as f32) as u32;
    let y0 = rect.min.y.round().clamp(0.0, height as f32) as u32;
    let x1 = rect.max.x.round().clamp(0.0, width as f32) as u32;
    let y1 = rect.max.y.round().clamp(0.0, height as f32) as u32;
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some((x0, y0, x1 - x0, y1 - y0))
}
