use std::path::PathBuf;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::constants::RGBA_CHANNELS;
use crate::shared::error::PortError;
use crate::shared::frame::Frame;

/// Adapts a still image file to the [`FrameSource`] interface.
///
/// Decodes once on `open` and yields a single RGBA frame, after which the
/// source reports exhaustion. This lets the scheduler treat a photo and a
/// live stream the same way.
pub struct StillImageSource {
    path: PathBuf,
    frame: Option<Frame>,
    opened: bool,
}

impl StillImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            frame: None,
            opened: false,
        }
    }
}

impl FrameSource for StillImageSource {
    fn open(&mut self) -> Result<(), PortError> {
        let img = image::open(&self.path)?.to_rgba8();
        let (width, height) = img.dimensions();
        let frame = Frame::new(img.into_raw(), width, height, RGBA_CHANNELS, 0)?;
        log::debug!("Decoded {} ({width}x{height})", self.path.display());
        self.frame = Some(frame);
        self.opened = true;
        Ok(())
    }

    fn next_frame(&mut self) -> Option<Result<Frame, PortError>> {
        if !self.opened {
            return Some(Err("StillImageSource: not opened".into()));
        }
        self.frame.take().map(Ok)
    }

    fn close(&mut self) {
        self.frame = None;
        self.opened = false;
    }
}
