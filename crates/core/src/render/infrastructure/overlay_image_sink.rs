use std::path::{Path, PathBuf};

use crate::render::domain::detection_sink::DetectionSink;
use crate::shared::constants::{OVERLAY_COLOR, OVERLAY_STROKE, RGBA_CHANNELS};
use crate::shared::detection::Detection;
use crate::shared::error::PortError;
use crate::shared::frame::Frame;

/// Draws a circle around every detection on a copy of the source frame and
/// writes it as `frame_{index:06}.png` into the output directory.
pub struct OverlayImageSink {
    output_dir: PathBuf,
    color: [u8; 4],
    stroke: u32,
    last_written: Option<PathBuf>,
    frames_written: usize,
}

impl OverlayImageSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            color: OVERLAY_COLOR,
            stroke: OVERLAY_STROKE,
            last_written: None,
            frames_written: 0,
        }
    }

    pub fn with_color(mut self, color: [u8; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn with_stroke(mut self, stroke: u32) -> Self {
        self.stroke = stroke.max(1);
        self
    }

    /// Path of the most recently written overlay.
    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    fn path_for(&self, frame: &Frame) -> PathBuf {
        self.output_dir.join(format!("frame_{:06}.png", frame.index()))
    }
}

impl DetectionSink for OverlayImageSink {
    fn emit(&mut self, frame: &Frame, detections: &[Detection]) -> Result<(), PortError> {
        if frame.channels() != RGBA_CHANNELS {
            return Err(format!(
                "overlay needs an RGBA frame, got {} channels",
                frame.channels()
            )
            .into());
        }

        let mut img =
            image::RgbaImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
                .ok_or("Failed to create image from frame data")?;
        for det in detections {
            draw_circle(&mut img, det, self.color, self.stroke);
        }

        let path = self.path_for(frame);
        save(&img, &path)?;
        self.last_written = Some(path);
        self.frames_written += 1;
        Ok(())
    }
}

fn save(img: &image::RgbaImage, path: &Path) -> Result<(), PortError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    img.save(path)?;
    Ok(())
}

/// Midpoint circle outline centred on `(col, row)`, thickened inward and
/// outward by `stroke / 2`. Points outside the image are skipped, as are
/// detections with non-finite geometry.
fn draw_circle(img: &mut image::RgbaImage, det: &Detection, color: [u8; 4], stroke: u32) {
    if !(det.row.is_finite() && det.col.is_finite() && det.scale.is_finite()) {
        log::debug!("Skipping overlay for non-finite detection {det:?}");
        return;
    }
    if !ring_reaches_frame(img, det, stroke) {
        return;
    }
    let cx = det.col.round() as i64;
    let cy = det.row.round() as i64;
    let base = det.radius().abs().round() as i64;
    let half = (stroke / 2) as i64;

    for radius in (base - half).max(0)..=base + half {
        let mut x = radius;
        let mut y = 0i64;
        let mut err = 1 - radius;
        while x >= y {
            for (dx, dy) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                put(img, cx + dx, cy + dy, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }
}

/// False when no point of the ring lands inside the frame, or when the ring
/// is too large to rasterise within one tick.
fn ring_reaches_frame(img: &image::RgbaImage, det: &Detection, stroke: u32) -> bool {
    let (w, h) = (img.width() as f64, img.height() as f64);
    if w == 0.0 || h == 0.0 {
        return false;
    }
    let (cx, cy) = (det.col as f64, det.row as f64);
    let radius = (det.radius() as f64).abs();
    let half = (stroke / 2) as f64 + 1.0;
    if radius > 4.0 * (w + h) {
        log::debug!("Skipping overlay for oversized detection {det:?}");
        return false;
    }

    let dx = (0.0 - cx).max(cx - (w - 1.0)).max(0.0);
    let dy = (0.0 - cy).max(cy - (h - 1.0)).max(0.0);
    let nearest = dx.hypot(dy);
    let farthest = (cx.abs().max((cx - (w - 1.0)).abs()))
        .hypot(cy.abs().max((cy - (h - 1.0)).abs()));
    radius + half >= nearest && radius - half <= farthest
}

fn put(img: &mut image::RgbaImage, x: i64, y: i64, color: [u8; 4]) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    img.put_pixel(x as u32, y as u32, image::Rgba(color));
}
