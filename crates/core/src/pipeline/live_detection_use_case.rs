use std::time::{Duration, Instant};

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::detection::domain::eye_locator::EyeLocator;
use crate::detection::domain::region_detector::RegionDetector;
use crate::display::domain::display_surface::DisplaySurface;
use crate::pipeline::loop_controller::LoopController;
use crate::pipeline::pipeline_logger::{NullPipelineLogger, PipelineLogger};
use crate::preprocessing::domain::grayscale::PreprocessError;
use crate::preprocessing::domain::grayscale_converter::{CpuGrayscaleConverter, GrayscaleConverter};
use crate::shared::constants::{DEFAULT_MAX_MISSED_FRAMES, KEY_WAIT};
use crate::video::domain::frame_source::FrameSource;

/// Why the detection loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The quit key was pressed.
    UserQuit,
    /// Too many consecutive iterations delivered no frame.
    SourceExhausted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_rendered: usize,
    pub frames_skipped: usize,
    pub faces_detected: usize,
    pub stop_reason: StopReason,
}

enum Iteration {
    Rendered { faces: usize },
    Skipped,
}

struct EyeStage {
    locator: EyeLocator,
    annotator: Box<dyn FrameAnnotator>,
}

/// Live detection loop: capture → grayscale → detect → annotate → show → poll.
///
/// Runs on the calling thread until the quit key is seen or the source stops
/// delivering frames. The capture and the window are released on every exit
/// path, including errors.
pub struct LiveDetectionUseCase {
    source: Box<dyn FrameSource>,
    converter: Box<dyn GrayscaleConverter>,
    detector: Box<dyn RegionDetector>,
    annotator: Box<dyn FrameAnnotator>,
    display: Box<dyn DisplaySurface>,
    eye_stage: Option<EyeStage>,
    logger: Box<dyn PipelineLogger>,
    controller: LoopController,
    key_wait: Duration,
    max_missed_frames: usize,
}

impl LiveDetectionUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn RegionDetector>,
        annotator: Box<dyn FrameAnnotator>,
        display: Box<dyn DisplaySurface>,
    ) -> Self {
        Self {
            source,
            converter: Box::new(CpuGrayscaleConverter),
            detector,
            annotator,
            display,
            eye_stage: None,
            logger: Box::new(NullPipelineLogger),
            controller: LoopController::new(),
            key_wait: KEY_WAIT,
            max_missed_frames: DEFAULT_MAX_MISSED_FRAMES,
        }
    }

    /// Enables eye search in the top half of every detected face.
    pub fn with_eye_stage(mut self, locator: EyeLocator, annotator: Box<dyn FrameAnnotator>) -> Self {
        self.eye_stage = Some(EyeStage { locator, annotator });
        self
    }

    pub fn with_converter(mut self, converter: Box<dyn GrayscaleConverter>) -> Self {
        self.converter = converter;
        self
    }

    pub fn with_logger(mut self, logger: Box<dyn PipelineLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_key_wait(mut self, key_wait: Duration) -> Self {
        self.key_wait = key_wait;
        self
    }

    pub fn with_max_missed_frames(mut self, max_missed_frames: usize) -> Self {
        self.max_missed_frames = max_missed_frames.max(1);
        self
    }

    pub fn execute(&mut self) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let result = self.run_loop();
        self.display.close();
        self.source.release();
        self.logger.summary();
        result
    }

    fn run_loop(&mut self) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let mut frames_rendered = 0;
        let mut frames_skipped = 0;
        let mut faces_detected = 0;
        let mut missed = 0;

        let stop_reason = loop {
            match self.process_frame()? {
                Iteration::Rendered { faces } => {
                    missed = 0;
                    frames_rendered += 1;
                    faces_detected += faces;
                    self.logger.progress(frames_rendered);
                }
                Iteration::Skipped => {
                    missed += 1;
                    frames_skipped += 1;
                }
            }

            self.poll_input()?;

            if !self.controller.is_running() {
                break StopReason::UserQuit;
            }
            if missed >= self.max_missed_frames {
                self.logger
                    .info(&format!("No frame delivered in {missed} attempts; stopping"));
                break StopReason::SourceExhausted;
            }
        };

        Ok(RunSummary {
            frames_rendered,
            frames_skipped,
            faces_detected,
            stop_reason,
        })
    }

    fn process_frame(&mut self) -> Result<Iteration, Box<dyn std::error::Error>> {
        let t0 = Instant::now();
        let Some(mut frame) = self.source.read()? else {
            log::debug!("No frame delivered; skipping iteration");
            return Ok(Iteration::Skipped);
        };
        self.logger.timing("capture", elapsed_ms(t0));

        let t0 = Instant::now();
        let gray = match self.converter.convert(&frame) {
            Ok(gray) => gray,
            Err(PreprocessError::EmptyFrame(index)) => {
                log::debug!("Frame {index} is empty; skipping iteration");
                return Ok(Iteration::Skipped);
            }
            Err(e) => return Err(e.into()),
        };
        self.logger.timing("preprocess", elapsed_ms(t0));

        let t0 = Instant::now();
        let faces = self.detector.detect(&gray)?;
        let eyes = match self.eye_stage.as_mut() {
            Some(stage) => stage.locator.locate(&gray, &faces)?,
            None => Vec::new(),
        };
        self.logger.timing("detect", elapsed_ms(t0));

        let t0 = Instant::now();
        self.annotator.annotate(&mut frame, &faces)?;
        if let Some(stage) = &self.eye_stage {
            stage.annotator.annotate(&mut frame, &eyes)?;
        }
        self.logger.timing("annotate", elapsed_ms(t0));

        let t0 = Instant::now();
        self.display.show(&frame)?;
        self.logger.timing("render", elapsed_ms(t0));

        self.logger.metric("faces", faces.len() as f64);
        if self.eye_stage.is_some() {
            self.logger.metric("eyes", eyes.len() as f64);
        }
        Ok(Iteration::Rendered { faces: faces.len() })
    }

    fn poll_input(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let t0 = Instant::now();
        let key = self.display.wait_key(self.key_wait)?;
        self.logger.timing("poll", elapsed_ms(t0));

        if let Some(mode) = self.controller.handle_key(key) {
            self.display.set_mode(mode)?;
            self.logger.info(&format!("Display mode: {mode}"));
        }
        Ok(())
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
