use egui::Rect;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::mask::clamp_to_surface;

const GAUSSIAN_PADDING: f32 = 3.0;
const DOWNSCALE_PADDING: f32 = 2.0;

/// How a region's blurred content is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlurStrategy {
    /// Gaussian filter over the padded sample.
    #[default]
    Gaussian,
    /// Repeated downscale/upscale, a cheap box-blur approximation.
    Downscale,
}

impl BlurStrategy {
    pub const ALL: [BlurStrategy; 2] = [BlurStrategy::Gaussian, BlurStrategy::Downscale];

    pub fn label(&self) -> &'static str {
        match self {
            BlurStrategy::Gaussian => "Gaussian",
            BlurStrategy::Downscale => "Downscale",
        }
    }

    fn padding(&self, amount: f32) -> f32 {
        match self {
            BlurStrategy::Gaussian => amount * GAUSSIAN_PADDING,
            BlurStrategy::Downscale => amount * DOWNSCALE_PADDING,
        }
    }
}

/// A blurred copy of part of the surface, positioned at `(x, y)`.
#[derive(Debug, Clone)]
pub struct BlurredSample {
    pub x: u32,
    pub y: u32,
    pub image: RgbaImage,
}

impl BlurredSample {
    /// Pixel of the blurred copy at surface coordinates, if the sample covers it.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&image::Rgba<u8>> {
        let lx = x.checked_sub(self.x)?;
        let ly = y.checked_sub(self.y)?;
        if lx < self.image.width() && ly < self.image.height() {
            Some(self.image.get_pixel(lx, ly))
        } else {
            None
        }
    }
}

/// Blurs the surface under `bounds` (a rotated region's world bounds), pulling
/// in padding around it so the edge of the region is not sampled hard.
pub fn blurred_sample(
    surface: &RgbaImage,
    bounds: Rect,
    amount: f32,
    strategy: BlurStrategy,
) -> Option<BlurredSample> {
    let padded = bounds.expand(strategy.padding(amount));
    let (x, y, width, height) = clamp_to_surface(padded, surface.width(), surface.height())?;
    let sample = imageops::crop_imm(surface, x, y, width, height).to_image();

    let image = match strategy {
        BlurStrategy::Gaussian => imageops::blur(&sample, amount),
        BlurStrategy::Downscale => downscale_blur(&sample, amount),
    };
    Some(BlurredSample { x, y, image })
}

fn downscale_blur(sample: &RgbaImage, amount: f32) -> RgbaImage {
    let (width, height) = sample.dimensions();
    let steps = (amount / 4.0).ceil().max(2.0) as u32;
    let scale = (amount / 2.0).round().max(1.0) as u32;
    let tw = width.div_ceil(scale).max(1);
    let th = height.div_ceil(scale).max(1);

    let mut small = imageops::resize(sample, tw, th, FilterType::Triangle);
    for _ in 1..steps {
        let half = imageops::resize(&small, tw.div_ceil(2).max(1), th.div_ceil(2).max(1), FilterType::Triangle);
        small = imageops::resize(&half, tw, th, FilterType::Triangle);
    }
    imageops::resize(&small, width, height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Pos2, Vec2};
    use image::Rgba;

    fn checkerboard(size: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    fn contrast(image: &RgbaImage) -> u8 {
        let (min, max) = image
            .pixels()
            .fold((255u8, 0u8), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
        max - min
    }

    #[test]
    fn test_sample_is_padded_and_clamped() {
        let surface = checkerboard(100);
        let bounds = Rect::from_min_size(Pos2::new(40.0, 40.0), Vec2::new(10.0, 10.0));
        let sample = blurred_sample(&surface, bounds, 5.0, BlurStrategy::Gaussian).unwrap();
        assert_eq!((sample.x, sample.y), (25, 25));
        assert_eq!(sample.image.dimensions(), (40, 40));

        let edge = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let sample = blurred_sample(&surface, edge, 5.0, BlurStrategy::Downscale).unwrap();
        assert_eq!((sample.x, sample.y), (0, 0));
        assert_eq!(sample.image.dimensions(), (20, 20));
    }

    #[test]
    fn test_both_strategies_smooth_content() {
        let surface = checkerboard(64);
        let bounds = Rect::from_min_size(Pos2::new(16.0, 16.0), Vec2::new(32.0, 32.0));
        for strategy in BlurStrategy::ALL {
            let sample = blurred_sample(&surface, bounds, 8.0, strategy).unwrap();
            assert!(contrast(&sample.image) < 128, "{} barely blurred", strategy.label());
        }
    }

    #[test]
    fn test_sample_outside_surface() {
        let surface = checkerboard(16);
        let bounds = Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(10.0, 10.0));
        assert!(blurred_sample(&surface, bounds, 2.0, BlurStrategy::Gaussian).is_none());
    }
}
