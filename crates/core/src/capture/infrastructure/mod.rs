#[cfg(feature = "ffmpeg")]
pub mod ffmpeg_capture_source;
pub mod memory_frame_source;
pub mod source_for_location;
pub mod still_image_source;
