use crate::shared::error::PipelineError;

/// Number of `f32` values per detection in the packed layout.
pub const PACKED_STRIDE: usize = 4;

/// One classifier hit: window centre, window size and confidence.
///
/// Detections have no identity beyond their values; two hits with the same
/// fields are interchangeable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    pub row: f32,
    pub col: f32,
    pub scale: f32,
    pub score: f32,
}

/// Detections produced by a single classifier run, in classifier order.
pub type DetectionSet = Vec<Detection>;

impl Detection {
    pub fn new(row: f32, col: f32, scale: f32, score: f32) -> Self {
        Self {
            row,
            col,
            scale,
            score,
        }
    }

    /// Radius of the circle that encloses the square detection window.
    pub fn radius(&self) -> f32 {
        self.scale / 2.0
    }

    /// Reads the flat `[row, col, scale, score, row, col, ...]` layout.
    pub fn from_packed(values: &[f32]) -> Result<DetectionSet, PipelineError> {
        if values.len() % PACKED_STRIDE != 0 {
            return Err(PipelineError::InvalidDimensions(format!(
                "packed detection buffer of length {} is not a multiple of {PACKED_STRIDE}",
                values.len()
            )));
        }
        Ok(values
            .chunks_exact(PACKED_STRIDE)
            .map(|c| Detection::new(c[0], c[1], c[2], c[3]))
            .collect())
    }

    pub fn to_packed(detections: &[Detection]) -> Vec<f32> {
        detections
            .iter()
            .flat_map(|d| [d.row, d.col, d.scale, d.score])
            .collect()
    }
}
