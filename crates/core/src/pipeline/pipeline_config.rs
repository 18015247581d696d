use crate::shared::constants::{
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_HISTORY_CAPACITY, DEFAULT_IOU_THRESHOLD,
};
use crate::shared::error::PipelineError;
use crate::shared::run_parameters::RunParameters;

/// Where the optional spatial clustering step runs inside a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClusterStage {
    /// No clustering; merged output keeps every overlapping hit.
    Disabled,
    /// Cluster each frame's raw detections before they enter the history.
    BeforeAggregation { iou_threshold: f32 },
    /// Cluster the merged window before thresholding.
    AfterAggregation { iou_threshold: f32 },
}

impl ClusterStage {
    pub fn before_aggregation() -> Self {
        Self::BeforeAggregation {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
        }
    }

    pub fn after_aggregation() -> Self {
        Self::AfterAggregation {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

/// Everything the scheduler needs to know up front. Validated once at
/// scheduler construction and never changed afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    pub history_capacity: usize,
    pub confidence_threshold: f32,
    pub run_parameters: RunParameters,
    pub cluster_stage: ClusterStage,
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.history_capacity == 0 {
            return Err(PipelineError::InvalidCapacity(self.history_capacity));
        }
        if self.confidence_threshold.is_nan() {
            return Err(PipelineError::InvalidThreshold(self.confidence_threshold));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            run_parameters: RunParameters::default(),
            cluster_stage: ClusterStage::Disabled,
        }
    }
}
