use crate::shared::detection::{Detection, DetectionSet};
use crate::shared::error::PipelineError;

/// Temporal smoothing buffer over the last `capacity` ticks.
///
/// Each tick overwrites exactly one slot; the merged view is every slot
/// concatenated in slot-index order. Overlapping hits from consecutive
/// frames are kept as-is, since spatial clustering belongs to the
/// classifier.
pub struct DetectionAggregator {
    slots: Vec<DetectionSet>,
    cursor: usize,
    recorded: usize,
}

impl DetectionAggregator {
    pub fn new(capacity: usize) -> Result<Self, PipelineError> {
        if capacity == 0 {
            return Err(PipelineError::InvalidCapacity(capacity));
        }
        Ok(Self {
            slots: vec![Vec::new(); capacity],
            cursor: 0,
            recorded: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of ticks currently held, at most `capacity`.
    pub fn len_recorded(&self) -> usize {
        self.recorded
    }

    /// Stores `detections` in the current slot, advances the cursor and
    /// returns the merged view of the whole window.
    pub fn record_and_merge(&mut self, detections: DetectionSet) -> DetectionSet {
        self.slots[self.cursor] = detections;
        self.cursor = (self.cursor + 1) % self.slots.len();
        self.recorded = (self.recorded + 1).min(self.slots.len());
        self.merged()
    }

    fn merged(&self) -> DetectionSet {
        let total = self.slots.iter().map(Vec::len).sum();
        let mut merged: Vec<Detection> = Vec::with_capacity(total);
        for slot in &self.slots {
            merged.extend_from_slice(slot);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(score: f32) -> Detection {
        Detection::new(score, score, 24.0, score)
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let err = DetectionAggregator::new(0).err().unwrap();
        assert!(matches!(err, PipelineError::InvalidCapacity(0)));
    }

    #[test]
    fn test_capacity_is_reported() {
        let agg = DetectionAggregator::new(5).unwrap();
        assert_eq!(agg.capacity(), 5);
        assert_eq!(agg.len_recorded(), 0);
    }

    #[test]
    fn test_oldest_slot_is_evicted_after_wraparound() {
        let (a, b, c, d) = (det(1.0), det(2.0), det(3.0), det(4.0));
        let mut agg = DetectionAggregator::new(3).unwrap();

        assert_eq!(agg.record_and_merge(vec![a]), vec![a]);
        assert_eq!(agg.record_and_merge(vec![b]), vec![a, b]);
        assert_eq!(agg.record_and_merge(vec![c]), vec![a, b, c]);
        // Tick 4 lands in slot 0, so the merged order is slot order, not recency.
        assert_eq!(agg.record_and_merge(vec![d]), vec![d, b, c]);
    }

    #[test]
    fn test_empty_sets_clear_their_slot() {
        let mut agg = DetectionAggregator::new(2).unwrap();
        agg.record_and_merge(vec![det(1.0)]);
        agg.record_and_merge(vec![det(2.0)]);
        assert_eq!(agg.record_and_merge(Vec::new()), vec![det(2.0)]);
        assert!(agg.record_and_merge(Vec::new()).is_empty());
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let mut agg = DetectionAggregator::new(3).unwrap();
        agg.record_and_merge(vec![det(7.0)]);
        let merged = agg.record_and_merge(vec![det(7.0), det(7.0)]);
        assert_eq!(merged.len(), 3);
        assert!(merged.iter().all(|d| *d == det(7.0)));
    }

    #[test]
    fn test_capacity_one_holds_only_latest() {
        let mut agg = DetectionAggregator::new(1).unwrap();
        agg.record_and_merge(vec![det(1.0)]);
        assert_eq!(agg.record_and_merge(vec![det(2.0)]), vec![det(2.0)]);
    }

    #[test]
    fn test_len_recorded_saturates_at_capacity() {
        let mut agg = DetectionAggregator::new(2).unwrap();
        for _ in 0..5 {
            agg.record_and_merge(Vec::new());
        }
        assert_eq!(agg.len_recorded(), 2);
    }

    #[test]
    fn test_within_set_order_is_kept() {
        let mut agg = DetectionAggregator::new(2).unwrap();
        let merged = agg.record_and_merge(vec![det(3.0), det(1.0), det(2.0)]);
        assert_eq!(merged, vec![det(3.0), det(1.0), det(2.0)]);
    }
}
