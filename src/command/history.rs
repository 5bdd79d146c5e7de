use crate::region::Region;

/// Maximum number of region snapshots kept.
pub const HISTORY_CAPACITY: usize = 50;

/// Linear undo/redo over full snapshots of the region list.
///
/// There is always at least one entry (the empty list), and `index` always
/// points at a valid entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionHistory {
    entries: Vec<Vec<Region>>,
    index: usize,
}

impl RegionHistory {
    pub fn new() -> Self {
        Self {
            entries: vec![Vec::new()],
            index: 0,
        }
    }

    /// Records a copy of `regions` as the newest entry, dropping any redo tail.
    pub fn commit(&mut self, regions: &[Region]) {
        self.entries.truncate(self.index + 1);
        self.entries.push(regions.to_vec());
        if self.entries.len() > HISTORY_CAPACITY {
            self.entries.remove(0);
        } else {
            self.index += 1;
        }
        log::debug!("History commit: {} regions, depth {}/{}", regions.len(), self.index + 1, self.entries.len());
    }

    /// Steps back one entry and returns the snapshot to restore.
    pub fn undo(&mut self) -> Option<&[Region]> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index])
    }

    /// Steps forward one entry and returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<&[Region]> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index])
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn current(&self) -> &[Region] {
        &self.entries[self.index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1 && self.entries[0].is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for RegionHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{Effect, RegionId, Shape};
    use egui::{Pos2, Rect, Vec2};

    fn regions(n: u64) -> Vec<Region> {
        (1..=n)
            .map(|i| {
                Region::new(
                    RegionId(i),
                    Rect::from_min_size(Pos2::new(i as f32, 0.0), Vec2::splat(10.0)),
                    Shape::Rectangle,
                    Effect::Redact,
                )
            })
            .collect()
    }

    #[test]
    fn test_starts_with_empty_entry() {
        let history = RegionHistory::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut history = RegionHistory::new();
        history.commit(&regions(1));
        history.commit(&regions(2));

        assert_eq!(history.undo().map(<[Region]>::len), Some(1));
        assert_eq!(history.undo().map(<[Region]>::len), Some(0));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo().map(<[Region]>::len), Some(1));
        assert_eq!(history.redo().map(<[Region]>::len), Some(2));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_commit_truncates_redo_tail() {
        let mut history = RegionHistory::new();
        history.commit(&regions(1));
        history.commit(&regions(2));
        history.undo();
        history.commit(&regions(3));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().len(), 3);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = RegionHistory::new();
        for i in 1..=60 {
            history.commit(&regions(i % 5 + 1));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.index(), HISTORY_CAPACITY - 1);
    }
}
