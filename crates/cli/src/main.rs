use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use facecascade_core::annotation::infrastructure::rectangle_annotator::RectangleAnnotator;
use facecascade_core::detection::domain::detection_params::{
    DetectionParams, DEFAULT_EYE_MIN_SIZE,
};
use facecascade_core::detection::domain::eye_locator::EyeLocator;
use facecascade_core::detection::infrastructure::cascade_detector::CascadeDetector;
use facecascade_core::display::infrastructure::highgui_window::HighGuiWindow;
use facecascade_core::pipeline::live_detection_use_case::LiveDetectionUseCase;
use facecascade_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use facecascade_core::preprocessing::infrastructure::opencv_grayscale_converter::OpenCvGrayscaleConverter;
use facecascade_core::shared::constants::{
    known_model_url, DEFAULT_MAX_MISSED_FRAMES, EYE_COLOR, FACE_CASCADE_NAME, FACE_COLOR,
    OUTLINE_THICKNESS, WINDOW_NAME,
};
use facecascade_core::shared::model_resolver;
use facecascade_core::video::domain::capture_selector::{open_capture, CaptureError};
use facecascade_core::video::infrastructure::opencv_capture::OpenCvSourceOpener;

/// Face detection with a cascade classifier on a live camera or video file.
///
/// Press "x" in the window to quit and "f" to toggle fullscreen.
#[derive(Parser, Debug)]
#[command(name = "facecascade")]
struct Cli {
    /// Optional video file; the camera is used when absent or unopenable.
    video_file: Option<PathBuf>,

    /// Camera index to use when no video file opens.
    #[arg(short = 'c', long = "camera_to_use", default_value = "0")]
    camera_to_use: i32,

    /// Face cascade model (downloaded to the cache if missing).
    #[arg(long, default_value = FACE_CASCADE_NAME)]
    cascade: PathBuf,

    /// Eye cascade model; enables eye search in the top half of each face.
    #[arg(long = "eye_cascade")]
    eye_cascade: Option<PathBuf>,

    /// Downscale ratio between detection pyramid levels (> 1.0).
    #[arg(long = "scale_factor", default_value = "1.3")]
    scale_factor: f64,

    /// Overlapping hits needed to confirm a face.
    #[arg(long = "min_neighbors", default_value = "3")]
    min_neighbors: i32,

    /// Smallest face side in pixels.
    #[arg(long = "min_size", default_value = "30")]
    min_size: i32,

    /// Consecutive frame-less iterations before stopping.
    #[arg(long = "max_missed_frames", default_value_t = DEFAULT_MAX_MISSED_FRAMES)]
    max_missed_frames: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        if let Some(CaptureError::NoSource) = e.downcast_ref::<CaptureError>() {
            println!("{e}");
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let params = validate(&cli)?;

    let face_detector = load_cascade(&cli.cascade, params)?;
    let eye_locator = match &cli.eye_cascade {
        Some(path) => {
            let eye_params = DetectionParams {
                min_size: DEFAULT_EYE_MIN_SIZE,
                ..params
            };
            Some(EyeLocator::new(Box::new(load_cascade(path, eye_params)?)))
        }
        None => None,
    };

    let mut opener = OpenCvSourceOpener::new();
    let capture = open_capture(&mut opener, cli.video_file.as_deref(), cli.camera_to_use)?;
    log::info!("Capturing from {}", capture.origin);

    let mut use_case = LiveDetectionUseCase::new(
        capture.source,
        Box::new(face_detector),
        Box::new(RectangleAnnotator::new(FACE_COLOR, OUTLINE_THICKNESS)),
        Box::new(HighGuiWindow::new(WINDOW_NAME)),
    )
    .with_converter(Box::new(OpenCvGrayscaleConverter))
    .with_logger(Box::new(StdoutPipelineLogger::default()))
    .with_max_missed_frames(cli.max_missed_frames);
    if let Some(locator) = eye_locator {
        use_case = use_case.with_eye_stage(
            locator,
            Box::new(RectangleAnnotator::new(EYE_COLOR, OUTLINE_THICKNESS)),
        );
    }

    let summary = use_case.execute()?;
    log::info!(
        "Stopped ({:?}): {} frames shown, {} skipped, {} faces detected",
        summary.stop_reason,
        summary.frames_rendered,
        summary.frames_skipped,
        summary.faces_detected
    );
    Ok(())
}

fn load_cascade(
    requested: &Path,
    params: DetectionParams,
) -> Result<CascadeDetector, Box<dyn std::error::Error>> {
    let url = requested
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(known_model_url);
    let path = model_resolver::resolve(requested, url, Some(Box::new(download_progress)))?;
    CascadeDetector::load(&path, params).map_err(|e| {
        log::error!("{e}");
        e.into()
    })
}

fn validate(cli: &Cli) -> Result<DetectionParams, Box<dyn std::error::Error>> {
    let params = DetectionParams::new(
        cli.scale_factor,
        cli.min_neighbors,
        (cli.min_size, cli.min_size),
    );
    params.validate()?;
    if cli.max_missed_frames == 0 {
        return Err("Max missed frames must be at least 1".into());
    }
    Ok(params)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading cascade model... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading cascade model... {downloaded} bytes");
    }
}
