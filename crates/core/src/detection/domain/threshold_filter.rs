use crate::shared::detection::{Detection, DetectionSet};
use crate::shared::error::PipelineError;

/// Drops detections whose score does not strictly exceed the cutoff.
///
/// A detection scoring exactly the cutoff is discarded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdFilter {
    cutoff: f32,
}

impl ThresholdFilter {
    pub fn new(cutoff: f32) -> Result<Self, PipelineError> {
        if cutoff.is_nan() {
            return Err(PipelineError::InvalidThreshold(cutoff));
        }
        Ok(Self { cutoff })
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    pub fn apply(&self, detections: &[Detection]) -> DetectionSet {
        filter(detections, self.cutoff)
    }
}

/// Order-preserving `score > cutoff` filter.
pub fn filter(detections: &[Detection], cutoff: f32) -> DetectionSet {
    detections
        .iter()
        .filter(|d| d.score > cutoff)
        .copied()
        .collect()
}
