use std::sync::Arc;

use image::RgbaImage;

use super::history::RegionHistory;
use crate::region::Region;

/// Maximum number of whole-image checkpoints kept.
pub const CHECKPOINT_CAPACITY: usize = 20;

/// Everything needed to step back over a whole-image operation.
#[derive(Debug, Clone)]
pub struct ImageCheckpoint {
    pub image: Arc<RgbaImage>,
    pub regions: Vec<Region>,
    pub history: RegionHistory,
    /// Next id the generator would have handed out.
    pub next_id: u64,
    pub source_name: Option<String>,
}

/// Bounded stack of checkpoints; the oldest is dropped when full.
#[derive(Debug, Clone, Default)]
pub struct CheckpointStack {
    stack: Vec<ImageCheckpoint>,
}

impl CheckpointStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, checkpoint: ImageCheckpoint) {
        self.stack.push(checkpoint);
        if self.stack.len() > CHECKPOINT_CAPACITY {
            self.stack.remove(0);
        }
        log::debug!("Checkpoint pushed ({} stored)", self.stack.len());
    }

    pub fn pop(&mut self) -> Option<ImageCheckpoint> {
        let checkpoint = self.stack.pop();
        if checkpoint.is_some() {
            log::debug!("Checkpoint popped ({} left)", self.stack.len());
        }
        checkpoint
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkpoint(width: u32) -> ImageCheckpoint {
        ImageCheckpoint {
            image: Arc::new(RgbaImage::new(width, 1)),
            regions: Vec::new(),
            history: RegionHistory::new(),
            next_id: 1,
            source_name: None,
        }
    }

    #[test]
    fn test_push_pop_order() {
        let mut stack = CheckpointStack::new();
        stack.push(checkpoint(1));
        stack.push(checkpoint(2));
        assert_eq!(stack.pop().map(|c| c.image.width()), Some(2));
        assert_eq!(stack.pop().map(|c| c.image.width()), Some(1));
        assert!(stack.pop().is_none());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut stack = CheckpointStack::new();
        for width in 1..=25 {
            stack.push(checkpoint(width));
        }
        assert_eq!(stack.len(), CHECKPOINT_CAPACITY);
        let mut last = 0;
        while let Some(c) = stack.pop() {
            last = c.image.width();
        }
        assert_eq!(last, 6);
    }
}
