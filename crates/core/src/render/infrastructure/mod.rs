pub mod channel_sink;
pub mod overlay_image_sink;
