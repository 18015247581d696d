use std::collections::VecDeque;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::error::PortError;
use crate::shared::frame::Frame;

/// Serves frames that were captured elsewhere (e.g. handed over by a host
/// application), in insertion order.
pub struct MemoryFrameSource {
    pending: VecDeque<Frame>,
}

impl MemoryFrameSource {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            pending: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, frame: Frame) {
        self.pending.push_back(frame);
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for MemoryFrameSource {
    fn open(&mut self) -> Result<(), PortError> {
        Ok(())
    }

    fn next_frame(&mut self) -> Option<Result<Frame, PortError>> {
        self.pending.pop_front().map(Ok)
    }

    fn close(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(index: usize) -> Frame {
        Frame::new(vec![0; 4], 1, 1, 4, index).unwrap()
    }

    #[test]
    fn test_yields_in_order_then_exhausts() {
        let mut source = MemoryFrameSource::new([frame(0), frame(1)]);
        source.open().unwrap();
        assert_eq!(source.next_frame().unwrap().unwrap().index(), 0);
        assert_eq!(source.next_frame().unwrap().unwrap().index(), 1);
        assert!(source.next_frame().is_none());
    }

    #[test]
    fn test_push_appends() {
        let mut source = MemoryFrameSource::new([]);
        source.push(frame(7));
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.next_frame().unwrap().unwrap().index(), 7);
    }

    #[test]
    fn test_close_drops_pending_frames() {
        let mut source = MemoryFrameSource::new([frame(0), frame(1)]);
        source.close();
        assert_eq!(source.remaining(), 0);
        assert!(source.next_frame().is_none());
    }
}
