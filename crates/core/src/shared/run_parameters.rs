use crate::shared::constants::{
    DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE, DEFAULT_SCALE_FACTOR, DEFAULT_SHIFT_FACTOR,
};

/// Classifier tuning knobs. The pipeline never interprets these; they are
/// handed to the classifier unchanged on every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunParameters {
    pub max_size: f32,
    pub min_size: f32,
    pub scale_factor: f32,
    pub shift_factor: f32,
}

impl RunParameters {
    pub fn new(max_size: f32, min_size: f32, scale_factor: f32, shift_factor: f32) -> Self {
        Self {
            max_size,
            min_size,
            scale_factor,
            shift_factor,
        }
    }
}

impl Default for RunParameters {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_SIZE,
            DEFAULT_MIN_SIZE,
            DEFAULT_SCALE_FACTOR,
            DEFAULT_SHIFT_FACTOR,
        )
    }
}
