use serde::{Deserialize, Serialize};

use crate::compositor::BlurStrategy;
use crate::region::{ChunkyOverlay, Effect, EffectMode, RegionTemplate, Shape};

pub const DEFAULT_BLUR_AMOUNT: f32 = 20.0;
pub const DEFAULT_CHUNK_SIZE: u32 = 16;
pub const BLUR_AMOUNT_RANGE: std::ops::RangeInclusive<f32> = 5.0..=60.0;
pub const CHUNK_SIZE_RANGE: std::ops::RangeInclusive<u32> = 4..=48;

/// What newly drawn or detected regions look like.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    pub mode: EffectMode,
    pub blur_amount: f32,
    pub chunky: bool,
    pub chunk_size: u32,
    pub shape: Shape,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            mode: EffectMode::Blur,
            blur_amount: DEFAULT_BLUR_AMOUNT,
            chunky: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            shape: Shape::Rectangle,
        }
    }
}

impl EffectSettings {
    /// Freezes the current settings for one new region; `seed` drives its
    /// chunky pattern if chunky is on.
    pub fn template(&self, seed: u32) -> RegionTemplate {
        let effect = match self.mode {
            EffectMode::Blur => Effect::Blur {
                amount: self.blur_amount,
                chunky: self.chunky.then_some(ChunkyOverlay { block_size: self.chunk_size.max(1), seed }),
            },
            EffectMode::Redact => Effect::Redact,
            EffectMode::Erase => Effect::Erase,
        };
        RegionTemplate { shape: self.shape, effect }
    }
}

/// Everything the app remembers between runs. Regions are never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub effect: EffectSettings,
    pub blur_strategy: BlurStrategy,
}
