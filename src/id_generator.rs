use crate::region::RegionId;

/// Hands out region ids in increasing order.
///
/// Owned by the [`Document`](crate::document::Document) instead of living in a
/// global, so loading a new image can restart numbering explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub const FIRST_ID: u64 = 1;

    pub fn new() -> Self {
        Self { next: Self::FIRST_ID }
    }

    pub fn generate_id(&mut self) -> RegionId {
        let id = RegionId(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`generate_id`](Self::generate_id) returns.
    pub fn peek(&self) -> u64 {
        self.next
    }

    pub fn reset(&mut self) {
        self.next = Self::FIRST_ID;
    }

    /// Continue numbering from `next`, used when a checkpoint is restored.
    pub fn reseed(&mut self, next: u64) {
        self.next = next.max(Self::FIRST_ID);
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic_and_reset() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.generate_id(), RegionId(1));
        assert_eq!(ids.generate_id(), RegionId(2));
        assert_eq!(ids.peek(), 3);

        ids.reset();
        assert_eq!(ids.generate_id(), RegionId(1));

        ids.reseed(10);
        assert_eq!(ids.generate_id(), RegionId(10));
    }
}
