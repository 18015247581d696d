use crossbeam_channel::{Receiver, Sender};

use crate::render::domain::detection_sink::DetectionSink;
use crate::shared::detection::{Detection, DetectionSet};
use crate::shared::error::PortError;
use crate::shared::frame::Frame;

/// An owned copy of one tick's output, handed to a renderer thread.
#[derive(Clone, Debug, PartialEq)]
pub struct EmittedFrame {
    pub frame: Frame,
    pub detections: DetectionSet,
}

/// Forwards each tick's result over a bounded channel.
///
/// `emit` blocks when the renderer falls `capacity` frames behind, so a slow
/// consumer throttles the loop instead of growing a backlog. A dropped
/// receiver is reported as an error, which halts the pipeline.
pub struct ChannelDetectionSink {
    tx: Sender<EmittedFrame>,
}

impl ChannelDetectionSink {
    pub fn new(tx: Sender<EmittedFrame>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with the receiving end for the renderer.
    pub fn bounded(capacity: usize) -> (Self, Receiver<EmittedFrame>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        (Self::new(tx), rx)
    }
}

impl DetectionSink for ChannelDetectionSink {
    fn emit(&mut self, frame: &Frame, detections: &[Detection]) -> Result<(), PortError> {
        self.tx
            .send(EmittedFrame {
                frame: frame.clone(),
                detections: detections.to_vec(),
            })
            .map_err(|_| "renderer channel disconnected".into())
    }
}
