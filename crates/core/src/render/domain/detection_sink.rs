use crate::shared::detection::Detection;
use crate::shared::error::PortError;
use crate::shared::frame::Frame;

/// Receives the per-tick result: the colour source frame plus the
/// detections that survived aggregation and thresholding.
///
/// The frame is only borrowed for the duration of the call; sinks that need
/// it later must copy it.
pub trait DetectionSink: Send {
    fn emit(&mut self, frame: &Frame, detections: &[Detection]) -> Result<(), PortError>;
}
