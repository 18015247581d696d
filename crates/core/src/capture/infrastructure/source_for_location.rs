use std::path::Path;

use crate::capture::domain::frame_source::FrameSource;
use crate::capture::infrastructure::still_image_source::StillImageSource;
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::error::PipelineError;

/// Picks the capture adapter for `location`: still images decode through
/// [`StillImageSource`], anything else goes to libav when the `ffmpeg`
/// feature is enabled.
pub fn source_for_location(location: &Path) -> Result<Box<dyn FrameSource>, PipelineError> {
    if is_image(location) {
        return Ok(Box::new(StillImageSource::new(location)));
    }
    video_source(location)
}

#[cfg(feature = "ffmpeg")]
fn video_source(location: &Path) -> Result<Box<dyn FrameSource>, PipelineError> {
    use crate::capture::infrastructure::ffmpeg_capture_source::FfmpegCaptureSource;

    Ok(Box::new(FfmpegCaptureSource::new(location)))
}

#[cfg(not(feature = "ffmpeg"))]
fn video_source(location: &Path) -> Result<Box<dyn FrameSource>, PipelineError> {
    Err(PipelineError::CaptureUnavailable(
        format!(
            "{} is not a still image and video capture needs the `ffmpeg` feature",
            location.display()
        )
        .into(),
    ))
}

/// True when the extension names a still image format the decoder handles.
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
