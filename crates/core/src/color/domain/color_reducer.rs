use crate::shared::constants::{LUMINANCE_CHANNELS, RGBA_CHANNELS};
use crate::shared::error::PipelineError;
use crate::shared::frame::{expected_len, Frame};

const RED_WEIGHT: u32 = 2;
const GREEN_WEIGHT: u32 = 7;
const BLUE_WEIGHT: u32 = 1;
const WEIGHT_SUM: u32 = 10;

/// Reduces packed RGBA frames to the single-channel luminance the cascade
/// classifier was trained on.
///
/// Luminance is `floor((2R + 7G + B) / 10)` with integer truncation. These
/// weights are part of the classifier's input contract and must not be
/// swapped for standard luma coefficients. Alpha is ignored.
pub struct ColorReducer;

impl ColorReducer {
    /// Returns a freshly allocated luminance frame; `frame` is left intact so
    /// a renderer can keep drawing on the colour original.
    pub fn reduce(frame: &Frame) -> Result<Frame, PipelineError> {
        if frame.channels() != RGBA_CHANNELS {
            return Err(PipelineError::InvalidDimensions(format!(
                "expected {RGBA_CHANNELS}-channel RGBA frame, got {} channels",
                frame.channels()
            )));
        }
        let gray = reduce_pixels(frame.data());
        Frame::new(
            gray,
            frame.width(),
            frame.height(),
            LUMINANCE_CHANNELS,
            frame.index(),
        )
    }

    /// Same as [`reduce`](Self::reduce) for a raw RGBA buffer, e.g. straight
    /// from an image decoder.
    pub fn reduce_packed(rgba: &[u8], width: u32, height: u32) -> Result<Frame, PipelineError> {
        let expected = expected_len(width, height, RGBA_CHANNELS)?;
        if rgba.len() != expected {
            return Err(PipelineError::InvalidDimensions(format!(
                "RGBA buffer length {} does not match {width}x{height}x4 = {expected}",
                rgba.len()
            )));
        }
        Frame::new(reduce_pixels(rgba), width, height, LUMINANCE_CHANNELS, 0)
    }
}

fn reduce_pixels(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(RGBA_CHANNELS as usize)
        .map(|px| luminance(px[0], px[1], px[2]))
        .collect()
}

#[inline]
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    // Max is 2550 / 10 = 255, so the narrowing cast never truncates.
    ((RED_WEIGHT * r as u32 + GREEN_WEIGHT * g as u32 + BLUE_WEIGHT * b as u32) / WEIGHT_SUM) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rgba_frame(width: u32, height: u32, pixels: &[[u8; 4]]) -> Frame {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        Frame::new(data, width, height, 4, 3).unwrap()
    }

    #[rstest]
    #[case([0, 0, 0], 0)]
    #[case([255, 255, 255], 255)]
    #[case([255, 0, 0], 51)]
    #[case([0, 255, 0], 178)]
    #[case([0, 0, 255], 25)]
    #[case([10, 20, 30], 19)] // (20 + 140 + 30) / 10 = 19
    #[case([1, 1, 1], 1)]
    #[case([3, 0, 3], 0)] // (6 + 0 + 3) / 10 = 0.9 truncates to 0
    fn test_luminance_weights(#[case] rgb: [u8; 3], #[case] expected: u8) {
        assert_eq!(luminance(rgb[0], rgb[1], rgb[2]), expected);
    }

    #[test]
    fn test_output_is_single_channel_with_same_dimensions() {
        let frame = rgba_frame(3, 2, &[[10, 20, 30, 255]; 6]);
        let gray = ColorReducer::reduce(&frame).unwrap();
        assert_eq!(gray.channels(), 1);
        assert_eq!(gray.width(), 3);
        assert_eq!(gray.height(), 2);
        assert_eq!(gray.data().len(), 6);
        assert_eq!(gray.index(), 3);
    }

    #[test]
    fn test_every_pixel_matches_formula() {
        let pixels = [
            [12, 200, 7, 0],
            [255, 1, 99, 10],
            [80, 80, 80, 255],
            [0, 33, 250, 128],
        ];
        let frame = rgba_frame(2, 2, &pixels);
        let gray = ColorReducer::reduce(&frame).unwrap();
        for (i, px) in pixels.iter().enumerate() {
            let expected = (2 * px[0] as u32 + 7 * px[1] as u32 + px[2] as u32) / 10;
            assert_eq!(gray.data()[i] as u32, expected, "pixel {i}");
        }
    }

    #[test]
    fn test_alpha_is_ignored() {
        let opaque = rgba_frame(1, 1, &[[40, 50, 60, 255]]);
        let clear = rgba_frame(1, 1, &[[40, 50, 60, 0]]);
        assert_eq!(
            ColorReducer::reduce(&opaque).unwrap().data(),
            ColorReducer::reduce(&clear).unwrap().data()
        );
    }

    #[test]
    fn test_input_frame_is_not_mutated() {
        let frame = rgba_frame(1, 1, &[[40, 50, 60, 70]]);
        let before = frame.clone();
        let _ = ColorReducer::reduce(&frame).unwrap();
        assert_eq!(frame, before);
    }

    #[test]
    fn test_non_rgba_frame_is_rejected() {
        let gray = Frame::new(vec![0; 4], 2, 2, 1, 0).unwrap();
        let err = ColorReducer::reduce(&gray).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidDimensions(_)));
    }

    #[rstest]
    #[case(15)]
    #[case(17)]
    #[case(0)]
    fn test_reduce_packed_rejects_wrong_length(#[case] len: usize) {
        let err = ColorReducer::reduce_packed(&vec![0; len], 2, 2).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidDimensions(_)));
    }

    #[test]
    fn test_reduce_packed_matches_reduce() {
        let pixels = [[9, 99, 199, 1], [200, 100, 50, 2]];
        let frame = rgba_frame(2, 1, &pixels);
        let from_frame = ColorReducer::reduce(&frame).unwrap();
        let from_slice = ColorReducer::reduce_packed(frame.data(), 2, 1).unwrap();
        assert_eq!(from_frame.data(), from_slice.data());
    }
}
