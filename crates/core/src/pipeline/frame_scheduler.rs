use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::capture::domain::frame_source::FrameSource;
use crate::color::domain::color_reducer::ColorReducer;
use crate::detection::domain::classifier::{Classifier, DetectionClusterer};
use crate::detection::domain::detection_aggregator::DetectionAggregator;
use crate::detection::domain::threshold_filter::ThresholdFilter;
use crate::pipeline::pipeline_config::{ClusterStage, PipelineConfig};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::refresh_clock::RefreshClock;
use crate::render::domain::detection_sink::DetectionSink;
use crate::shared::detection::DetectionSet;
use crate::shared::error::PipelineError;
use crate::shared::frame::Frame;
use crate::shared::run_parameters::RunParameters;

/// Cloneable stop signal, checked by the scheduler between ticks.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What one call to [`FrameScheduler::tick`] produced.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Emitted(TickReport),
    /// The source has no more frames; the scheduler is now stopped.
    Exhausted,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub frame_index: usize,
    pub raw_detections: usize,
    pub merged_detections: usize,
    pub emitted_detections: usize,
    pub elapsed: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunEnd {
    Exhausted,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: usize,
    pub end: RunEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Streaming,
    Stopped,
}

/// Per-frame loop: acquire → reduce → classify → aggregate → threshold → emit.
///
/// Ticks are strictly sequential and fully synchronous once the source is
/// open. Any capture, classifier or sink failure stops the scheduler for
/// good; a stopped scheduler never touches its source again and cannot be
/// restarted.
pub struct FrameScheduler {
    source: Box<dyn FrameSource>,
    classifier: Box<dyn Classifier>,
    clusterer: Option<Box<dyn DetectionClusterer>>,
    sink: Box<dyn DetectionSink>,
    logger: Box<dyn PipelineLogger>,
    aggregator: DetectionAggregator,
    threshold: ThresholdFilter,
    params: RunParameters,
    cluster_stage: ClusterStage,
    stop: StopHandle,
    state: State,
}

impl FrameScheduler {
    pub fn new(
        config: PipelineConfig,
        source: Box<dyn FrameSource>,
        classifier: Box<dyn Classifier>,
        clusterer: Option<Box<dyn DetectionClusterer>>,
        sink: Box<dyn DetectionSink>,
        logger: Box<dyn PipelineLogger>,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        if config.cluster_stage.is_enabled() && clusterer.is_none() {
            return Err(PipelineError::MissingClusterer);
        }
        Ok(Self {
            source,
            classifier,
            clusterer,
            sink,
            logger,
            aggregator: DetectionAggregator::new(config.history_capacity)?,
            threshold: ThresholdFilter::new(config.confidence_threshold)?,
            params: config.run_parameters,
            cluster_stage: config.cluster_stage,
            stop: StopHandle::default(),
            state: State::Idle,
        })
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.state == State::Stopped
    }

    /// Stops in place: closes the source and makes the scheduler terminal.
    pub fn stop(&mut self) {
        self.stop.stop();
        self.shutdown();
    }

    /// Opens the frame source. Called implicitly by the first tick; exposed
    /// so callers can bring the device up before starting the refresh loop.
    pub fn start(&mut self) -> Result<(), PipelineError> {
        match self.state {
            State::Stopped => return Err(PipelineError::PipelineStopped),
            State::Streaming => return Ok(()),
            State::Idle => {}
        }
        if let Err(e) = self.source.open() {
            log::error!("Capture source failed to open: {e}");
            self.shutdown();
            return Err(PipelineError::CaptureUnavailable(e));
        }
        self.state = State::Streaming;
        self.logger.info("Capture source opened");
        Ok(())
    }

    /// Runs exactly one iteration of the loop.
    pub fn tick(&mut self) -> Result<TickOutcome, PipelineError> {
        if self.stop.is_stopped() {
            self.shutdown();
            return Err(PipelineError::PipelineStopped);
        }
        self.start()?;

        let frame = match self.source.next_frame() {
            None => {
                self.logger.info("Capture source exhausted");
                self.shutdown();
                return Ok(TickOutcome::Exhausted);
            }
            Some(Err(e)) => {
                log::error!("Frame acquisition failed: {e}");
                self.shutdown();
                return Err(PipelineError::CaptureUnavailable(e));
            }
            Some(Ok(frame)) => frame,
        };

        match self.process(&frame) {
            Ok(report) => {
                self.logger.tick(report.frame_index);
                Ok(TickOutcome::Emitted(report))
            }
            Err(e) => {
                log::error!("Tick for frame {} failed: {e}", frame.index());
                self.shutdown();
                Err(e)
            }
        }
    }

    /// Drives ticks until the source runs dry or the stop signal is raised,
    /// waiting on `clock` between ticks.
    pub fn run(&mut self, clock: &mut dyn RefreshClock) -> Result<RunSummary, PipelineError> {
        if self.state == State::Stopped {
            return Err(PipelineError::PipelineStopped);
        }
        let mut ticks = 0;
        loop {
            if self.stop.is_stopped() {
                self.shutdown();
                return Ok(RunSummary {
                    ticks,
                    end: RunEnd::Stopped,
                });
            }
            match self.tick()? {
                TickOutcome::Exhausted => {
                    return Ok(RunSummary {
                        ticks,
                        end: RunEnd::Exhausted,
                    })
                }
                TickOutcome::Emitted(_) => ticks += 1,
            }
            clock.wait_for_refresh();
        }
    }

    fn process(&mut self, frame: &Frame) -> Result<TickReport, PipelineError> {
        let tick_start = Instant::now();

        let luminance = self.timed("reduce", |_| ColorReducer::reduce(frame))?;

        let params = self.params;
        let mut raw = self.timed("classify", |s| {
            s.classifier
                .run(&luminance, &params)
                .map_err(PipelineError::ClassifierFailure)
        })?;
        drop(luminance);
        let raw_count = raw.len();

        if let ClusterStage::BeforeAggregation { iou_threshold } = self.cluster_stage {
            raw = self.timed("cluster", |s| s.cluster(&raw, iou_threshold))?;
        }

        let mut merged = self.timed("aggregate", |s| Ok(s.aggregator.record_and_merge(raw)))?;

        if let ClusterStage::AfterAggregation { iou_threshold } = self.cluster_stage {
            merged = self.timed("cluster", |s| s.cluster(&merged, iou_threshold))?;
        }
        let merged_count = merged.len();

        let emitted = self.timed("filter", |s| Ok(s.threshold.apply(&merged)))?;

        self.timed("emit", |s| {
            s.sink
                .emit(frame, &emitted)
                .map_err(PipelineError::SinkFailure)
        })?;

        self.logger.metric("raw_detections", raw_count as f64);
        self.logger.metric("merged_detections", merged_count as f64);
        self.logger.metric("emitted_detections", emitted.len() as f64);

        Ok(TickReport {
            frame_index: frame.index(),
            raw_detections: raw_count,
            merged_detections: merged_count,
            emitted_detections: emitted.len(),
            elapsed: tick_start.elapsed(),
        })
    }

    fn cluster(
        &self,
        detections: &DetectionSet,
        iou_threshold: f32,
    ) -> Result<DetectionSet, PipelineError> {
        let clusterer = self
            .clusterer
            .as_ref()
            .ok_or(PipelineError::MissingClusterer)?;
        clusterer
            .cluster(detections, iou_threshold)
            .map_err(PipelineError::ClassifierFailure)
    }

    fn timed<T>(
        &mut self,
        stage: &str,
        f: impl FnOnce(&mut Self) -> Result<T, PipelineError>,
    ) -> Result<T, PipelineError> {
        let start = Instant::now();
        let result = f(self);
        self.logger
            .timing(stage, start.elapsed().as_secs_f64() * 1000.0);
        result
    }

    fn shutdown(&mut self) {
        if self.state == State::Stopped {
            return;
        }
        self.source.close();
        self.stop.stop();
        self.state = State::Stopped;
        self.logger.summary();
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
