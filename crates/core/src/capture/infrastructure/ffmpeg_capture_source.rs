use std::path::PathBuf;

use crate::capture::domain::frame_source::FrameSource;
use crate::shared::constants::RGBA_CHANNELS;
use crate::shared::error::PortError;
use crate::shared::frame::Frame;

/// Captures frames through libav (ffmpeg-next): video files, network
/// streams, or any capture device URL libavformat can probe.
///
/// Each decoded picture is scaled to RGBA so the rest of the pipeline sees
/// the same layout as a canvas read.
pub struct FfmpegCaptureSource {
    location: PathBuf,
    session: Option<DecodeSession>,
}

struct DecodeSession {
    location: PathBuf,
    input: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    stream_index: usize,
    width: u32,
    height: u32,
    frame_index: usize,
    flushing: bool,
    done: bool,
}

// Safety: the source is driven from one thread at a time; ffmpeg's raw
// pointers never escape the session.
unsafe impl Send for FfmpegCaptureSource {}

impl FfmpegCaptureSource {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            session: None,
        }
    }
}

impl FrameSource for FfmpegCaptureSource {
    fn open(&mut self) -> Result<(), PortError> {
        ffmpeg_next::init()?;
        ffmpeg_next::device::register_all();

        let input = ffmpeg_next::format::input(&self.location)?;
        let stream = input
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or("No video stream found")?;
        let stream_index = stream.index();

        let codec_ctx =
            ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = codec_ctx.decoder().video()?;
        let width = decoder.width();
        let height = decoder.height();

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )?;

        log::info!("Opened capture {} ({width}x{height})", self.location.display());

        self.session = Some(DecodeSession {
            location: self.location.clone(),
            input,
            decoder,
            scaler,
            stream_index,
            width,
            height,
            frame_index: 0,
            flushing: false,
            done: false,
        });
        Ok(())
    }

    fn next_frame(&mut self) -> Option<Result<Frame, PortError>> {
        let Some(session) = self.session.as_mut() else {
            return Some(Err("FfmpegCaptureSource: not opened".into()));
        };
        session.next_frame()
    }

    fn close(&mut self) {
        self.session = None;
    }
}

impl DecodeSession {
    fn next_frame(&mut self) -> Option<Result<Frame, PortError>> {
        if self.done {
            return None;
        }
        if let Some(result) = self.try_receive() {
            return Some(result);
        }
        if self.flushing {
            self.done = true;
            return None;
        }

        loop {
            let Some((stream, packet)) = self.input.packets().next() else {
                let _ = self.decoder.send_eof();
                self.flushing = true;
                if let Some(result) = self.try_receive() {
                    return Some(result);
                }
                self.done = true;
                return None;
            };

            if stream.index() != self.stream_index {
                continue;
            }
            if let Err(e) = self.decoder.send_packet(&packet) {
                log::warn!(
                    "Dropped corrupt packet from {} before frame {}: {e}",
                    self.location.display(),
                    self.frame_index
                );
                continue;
            }
            if let Some(result) = self.try_receive() {
                return Some(result);
            }
        }
    }

    fn try_receive(&mut self) -> Option<Result<Frame, PortError>> {
        let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
        if self.decoder.receive_frame(&mut decoded).is_err() {
            return None;
        }
        let mut rgba = ffmpeg_next::util::frame::video::Video::empty();
        if let Err(e) = self.scaler.run(&decoded, &mut rgba) {
            return Some(Err(Box::new(e)));
        }

        let pixels = extract_rgba_pixels(&rgba, self.width, self.height);
        let frame = Frame::new(pixels, self.width, self.height, RGBA_CHANNELS, self.frame_index)
            .map_err(PortError::from);
        self.frame_index += 1;
        Some(frame)
    }
}

fn extract_rgba_pixels(
    frame: &ffmpeg_next::util::frame::video::Video,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let stride = frame.stride(0);
    let data = frame.data(0);
    let row_bytes = width as usize * RGBA_CHANNELS as usize;

    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * stride;
        pixels.extend_from_slice(&data[start..start + row_bytes]);
    }
    pixels
}
