//! Per-region effect rendering.
//!
//! Effects are applied in region order onto one surface, so a later blur
//! samples whatever earlier regions already painted there.

pub mod blur;
pub mod chunky;
pub mod mask;
pub mod paint;

use image::{Rgba, RgbaImage};

pub use blur::{blurred_sample, BlurStrategy, BlurredSample};
pub use chunky::{BlockColor, ChunkyPattern, Mulberry32};
pub use mask::{local_offset, ShapeMask};

use crate::region::{Effect, Region};

/// Blur amounts below this leave the content unchanged.
const MIN_BLUR_AMOUNT: f32 = 0.5;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Compositor {
    pub strategy: BlurStrategy,
}

impl Compositor {
    pub fn new(strategy: BlurStrategy) -> Self {
        Self { strategy }
    }

    /// Paints `region`'s effect onto `surface`, clipped to its rotated shape.
    ///
    /// Regions smaller than two pixels on either axis are skipped.
    pub fn apply_effect(&self, surface: &mut RgbaImage, region: &Region) {
        if !region.is_renderable() {
            return;
        }
        let Some(mask) = ShapeMask::build(region, surface.width(), surface.height()) else {
            return;
        };

        match region.effect {
            Effect::Redact => fill_masked(surface, &mask, BLACK),
            Effect::Erase => fill_masked(surface, &mask, WHITE),
            Effect::Blur { amount, chunky } => {
                if amount >= MIN_BLUR_AMOUNT {
                    if let Some(sample) = blurred_sample(surface, region.world_bounds(), amount, self.strategy) {
                        mask.for_each_covered(|x, y, coverage| {
                            if let Some(blurred) = sample.pixel(x, y) {
                                let dst = surface.get_pixel_mut(x, y);
                                *dst = paint::mix(*dst, *blurred, coverage);
                            }
                        });
                    }
                }
                if let Some(overlay) = chunky {
                    let pattern = ChunkyPattern::generate(overlay, region.size.x, region.size.y);
                    paint_pattern(surface, &mask, region, &pattern);
                }
            }
        }
    }

    /// Applies every region in order.
    pub fn apply_all<'a>(&self, surface: &mut RgbaImage, regions: impl IntoIterator<Item = &'a Region>) {
        for region in regions {
            self.apply_effect(surface, region);
        }
    }
}

fn fill_masked(surface: &mut RgbaImage, mask: &ShapeMask, color: Rgba<u8>) {
    mask.for_each_covered(|x, y, coverage| {
        let dst = surface.get_pixel_mut(x, y);
        *dst = paint::mix(*dst, color, coverage);
    });
}

fn paint_pattern(surface: &mut RgbaImage, mask: &ShapeMask, region: &Region, pattern: &ChunkyPattern) {
    mask.for_each_covered(|x, y, coverage| {
        let local = local_offset(region, x, y);
        if let Some(color) = pattern.color_at(local.x, local.y) {
            let dst = surface.get_pixel_mut(x, y);
            *dst = paint::mix(*dst, color, coverage);
        }
    });
}
