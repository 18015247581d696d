/// Number of recent ticks whose detections are merged (history ring size).
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Score cutoff applied after aggregation. Scores are unbounded classifier
/// confidences, not probabilities.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// IoU threshold handed to the external clusterer when a cluster stage is on.
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.2;

pub const DEFAULT_MAX_SIZE: f32 = 1000.0;
pub const DEFAULT_MIN_SIZE: f32 = 20.0;
pub const DEFAULT_SCALE_FACTOR: f32 = 1.1;
pub const DEFAULT_SHIFT_FACTOR: f32 = 0.1;

/// Target tick rate for [`IntervalClock`](crate::pipeline::refresh_clock::IntervalClock)
/// when driving a live source.
pub const DEFAULT_REFRESH_HZ: f64 = 60.0;

pub const RGBA_CHANNELS: u8 = 4;
pub const LUMINANCE_CHANNELS: u8 = 1;

/// Overlay stroke colour (RGBA) and width in pixels.
pub const OVERLAY_COLOR: [u8; 4] = [255, 0, 0, 255];
pub const OVERLAY_STROKE: u32 = 3;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
