use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::capture::domain::frame_source::FrameSource;
use crate::control::domain::control_dispatcher::{ControlDispatcher, Dispatch};
use crate::control::domain::control_reading::ControlReadings;
use crate::control::domain::readings_display::ReadingsDisplay;
use crate::detection::domain::hand_detector::HandDetector;
use crate::gesture::domain::frame_classifier::FrameClassifier;
use crate::gesture::domain::gesture_mapper::GestureMapper;
use crate::gesture::domain::hand_role::HandRole;
use crate::shared::frame::Frame;

use super::control_logger::ControlLogger;

/// Per-frame callback: `(frames_completed, readings)`. Return `false` to stop.
pub type FrameCallback = Box<dyn FnMut(usize, &ControlReadings) -> bool + Send>;

/// Counters for one run of the control loop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames that went through the whole pipeline.
    pub frames: usize,
    /// Frames the source failed to deliver.
    pub capture_errors: usize,
    /// Frames the detector failed on.
    pub detection_errors: usize,
    /// Hands assigned a role, summed over all frames.
    pub hands: usize,
    /// Classified hands that lacked the landmarks to measure.
    pub unmeasurable_hands: usize,
    pub actuator_failures: usize,
    /// Dispatches recorded for display only (channel has no backend).
    pub display_only: usize,
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames, {} hands, {} capture errors, {} detection errors, {} actuator failures",
            self.frames,
            self.hands,
            self.capture_errors,
            self.detection_errors,
            self.actuator_failures
        )
    }
}

/// The frame-driven control loop: read, detect, classify, measure, map,
/// dispatch, render.
///
/// Single-threaded. Every failure inside a frame degrades to skipping that
/// frame's effect; only the readings survive from one frame to the next.
/// The loop ends when the source is exhausted, when `cancelled` is raised,
/// or when the per-frame callback returns `false`. Single-use: `execute`
/// consumes the frame source.
pub struct GestureControlUseCase {
    source: Option<Box<dyn FrameSource>>,
    detector: Box<dyn HandDetector>,
    classifier: FrameClassifier,
    mapper: GestureMapper,
    dispatcher: ControlDispatcher,
    display: Box<dyn ReadingsDisplay>,
    logger: Box<dyn ControlLogger>,
    on_frame: Option<FrameCallback>,
    cancelled: Arc<AtomicBool>,
}

impl GestureControlUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn HandDetector>,
        classifier: FrameClassifier,
        mapper: GestureMapper,
        dispatcher: ControlDispatcher,
        display: Box<dyn ReadingsDisplay>,
        logger: Box<dyn ControlLogger>,
        on_frame: Option<FrameCallback>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            source: Some(source),
            detector,
            classifier,
            mapper,
            dispatcher,
            display,
            logger,
            on_frame,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn readings(&self) -> &ControlReadings {
        self.dispatcher.readings()
    }

    pub fn execute(&mut self) -> Result<RunStats, Box<dyn std::error::Error>> {
        let mut source = self.source.take().ok_or("Control loop already executed")?;
        let mut stats = RunStats::default();

        if !self.dispatcher.brightness_available() {
            self.logger
                .info("Brightness control unavailable; right-hand readings are display-only");
        }

        let mut frames = source.frames();
        loop {
            if self.cancelled.load(Ordering::Relaxed) {
                self.logger.info("Stop requested");
                break;
            }
            let Some(item) = frames.next() else {
                self.logger.info("Frame source exhausted");
                break;
            };

            let frame = match item {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("Skipping frame: capture failed: {e}");
                    stats.capture_errors += 1;
                    continue;
                }
            };

            if let Err(e) = self.process_frame(&frame, &mut stats) {
                log::warn!("Skipping frame {}: detection failed: {e}", frame.index());
                stats.detection_errors += 1;
                continue;
            }

            stats.frames += 1;
            self.display.render(self.dispatcher.readings());
            self.logger.progress(stats.frames);

            if let Some(on_frame) = self.on_frame.as_mut() {
                if !on_frame(stats.frames, self.dispatcher.readings()) {
                    break;
                }
            }
        }
        drop(frames);

        self.display.finish();
        self.logger.info(&format!("Run finished: {stats}"));
        self.logger.summary();
        Ok(stats)
    }

    fn process_frame(
        &mut self,
        frame: &Frame,
        stats: &mut RunStats,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let start = Instant::now();
        let detections = self.detector.detect(frame)?;
        self.logger.timing("detect", elapsed_ms(start));

        let start = Instant::now();
        let hands = self.classifier.classify(&detections);
        self.logger.timing("classify", elapsed_ms(start));
        self.logger.metric("hands_per_frame", hands.count() as f64);
        stats.hands += hands.count();

        for role in [HandRole::Left, HandRole::Right] {
            let Some(hand) = hands.get(role) else {
                continue;
            };
            let reading = match self.mapper.read(role, hand) {
                Ok(reading) => reading,
                Err(e) => {
                    log::debug!("Frame {}: ignoring {role} hand: {e}", frame.index());
                    stats.unmeasurable_hands += 1;
                    continue;
                }
            };

            log::trace!(
                "Frame {}: {role} hand pinch {:.3} -> {} {:.3}",
                frame.index(),
                reading.distance,
                reading.channel,
                reading.value
            );

            let start = Instant::now();
            match self.dispatcher.dispatch(role, reading.value) {
                Ok(Dispatch::Applied) => {}
                Ok(Dispatch::DisplayOnly) => stats.display_only += 1,
                Err(e) => {
                    log::warn!("Frame {}: {e}", frame.index());
                    stats.actuator_failures += 1;
                }
            }
            self.logger.timing("dispatch", elapsed_ms(start));
        }
        Ok(())
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
