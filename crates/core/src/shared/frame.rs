use ndarray::ArrayView3;

use crate::shared::error::PipelineError;

/// A single captured or derived frame: packed pixels in row-major order.
///
/// `channels` is 4 for RGBA source frames and 1 for luminance frames.
/// The buffer length always equals `width * height * channels`; frames with
/// any other length cannot be constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        channels: u8,
        index: usize,
    ) -> Result<Self, PipelineError> {
        if channels == 0 {
            return Err(PipelineError::InvalidDimensions(
                "channel count must be at least 1".to_string(),
            ));
        }
        let expected = expected_len(width, height, channels)?;
        if data.len() != expected {
            return Err(PipelineError::InvalidDimensions(format!(
                "buffer length {} does not match {width}x{height}x{channels} = {expected}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            index,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Sequence number assigned by the frame source.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Row stride in pixels. Frames are always tightly packed, so this is
    /// the width; classifiers address luminance as `row * ldim + col`.
    pub fn ldim(&self) -> usize {
        self.width as usize
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

pub(crate) fn expected_len(width: u32, height: u32, channels: u8) -> Result<usize, PipelineError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(channels as usize))
        .ok_or_else(|| {
            PipelineError::InvalidDimensions(format!(
                "{width}x{height}x{channels} overflows the address space"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 16]; // 2x2x4
        let frame = Frame::new(data.clone(), 2, 2, 4, 5).unwrap();
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 4);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.ldim(), 2);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_mismatched_data_length_is_rejected() {
        let data = vec![0u8; 10]; // wrong size for 2x2x4
        let err = Frame::new(data, 2, 2, 4, 0).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidDimensions(_)));
    }

    #[test]
    fn test_zero_channels_is_rejected() {
        let err = Frame::new(Vec::new(), 2, 2, 0, 0).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidDimensions(_)));
    }

    #[test]
    fn test_empty_frame_is_valid() {
        let frame = Frame::new(Vec::new(), 0, 0, 4, 0).unwrap();
        assert!(frame.data().is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let frame = Frame::new(vec![100u8; 4], 1, 1, 4, 0).unwrap();
        let mut raw = frame.clone().into_data();
        raw[0] = 0;
        assert_eq!(frame.data()[0], 100);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let frame = Frame::new(vec![0u8; 32], 4, 2, 4, 0).unwrap();
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 4, 4]); // (height, width, channels)
    }

    #[test]
    fn test_as_ndarray_pixel_access() {
        // 2x2 RGBA: set pixel (row=1, col=0) green channel
        let mut data = vec![0u8; 16];
        data[9] = 200; // row=1, col=0, G
        let frame = Frame::new(data, 2, 2, 4, 0).unwrap();
        let arr = frame.as_ndarray();
        assert_eq!(arr[[1, 0, 0]], 0);
        assert_eq!(arr[[1, 0, 1]], 200);
    }
}
