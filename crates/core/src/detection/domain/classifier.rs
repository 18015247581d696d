use crate::shared::detection::{Detection, DetectionSet};
use crate::shared::error::{PipelineError, PortError};
use crate::shared::frame::Frame;
use crate::shared::run_parameters::RunParameters;

/// Domain interface for the external cascade engine.
///
/// `run` receives a single-channel luminance frame and must be deterministic
/// for identical inputs given the loaded cascade.
pub trait Classifier: Send {
    fn run(&self, luminance: &Frame, params: &RunParameters) -> Result<DetectionSet, PortError>;
}

/// Builds a [`Classifier`] from a cascade blob.
///
/// Implementations report unreadable blobs as
/// [`PipelineError::InvalidCascadeFormat`].
pub trait CascadeLoader {
    fn load(&self, cascade: &[u8]) -> Result<Box<dyn Classifier>, PipelineError>;
}

/// Optional spatial non-max suppression offered by the engine.
///
/// Works on one detection set at a time and is unrelated to temporal
/// aggregation; the scheduler decides where in the tick it runs.
pub trait DetectionClusterer: Send {
    fn cluster(
        &self,
        detections: &[Detection],
        iou_threshold: f32,
    ) -> Result<DetectionSet, PortError>;
}
