use crate::shared::error::PortError;
use crate::shared::frame::Frame;

/// Pulls RGBA frames from a camera, video or still image.
///
/// `open` may block while the device comes up; after that every
/// `next_frame` call is synchronous. `None` means the source is exhausted
/// (a still image after its single frame); `Some(Err(_))` means the source
/// is broken and will not recover.
pub trait FrameSource: Send {
    fn open(&mut self) -> Result<(), PortError>;

    fn next_frame(&mut self) -> Option<Result<Frame, PortError>>;

    /// Releases the device and any buffered frame. Must be idempotent.
    fn close(&mut self);
}
