use image::Rgba;

use crate::region::ChunkyOverlay;

const BLACK_CUTOFF: f64 = 0.33;
const WHITE_CUTOFF: f64 = 0.66;

/// Mulberry32: a tiny seeded generator, plenty for a visual pattern.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let a = self.state;
        let mut t = (a ^ (a >> 15)).wrapping_mul(1 | a);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Color of one block; `None` leaves the blurred pixels visible.
pub type BlockColor = Option<Rgba<u8>>;

/// The block grid laid over a region's unrotated box, row-major from the
/// top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkyPattern {
    pub block_size: u32,
    pub columns: u32,
    pub rows: u32,
    blocks: Vec<BlockColor>,
}

impl ChunkyPattern {
    /// The same overlay and box size always produce the same pattern, so a
    /// region does not flicker while it is re-rendered during a drag.
    pub fn generate(overlay: ChunkyOverlay, width: f32, height: f32) -> Self {
        let block_size = overlay.block_size.max(1);
        let columns = (width / block_size as f32).ceil().max(0.0) as u32;
        let rows = (height / block_size as f32).ceil().max(0.0) as u32;

        let mut rng = Mulberry32::new(overlay.seed);
        let blocks = (0..columns as usize * rows as usize)
            .map(|_| {
                let v = rng.next_f64();
                if v < BLACK_CUTOFF {
                    Some(Rgba([0, 0, 0, 255]))
                } else if v < WHITE_CUTOFF {
                    Some(Rgba([255, 255, 255, 255]))
                } else {
                    None
                }
            })
            .collect();

        Self { block_size, columns, rows, blocks }
    }

    pub fn blocks(&self) -> &[BlockColor] {
        &self.blocks
    }

    /// Block color at a point given relative to the box's top-left corner.
    pub fn color_at(&self, x: f32, y: f32) -> BlockColor {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let column = (x / self.block_size as f32) as u32;
        let row = (y / self.block_size as f32) as u32;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.blocks[(row * self.columns + column) as usize]
    }
}
