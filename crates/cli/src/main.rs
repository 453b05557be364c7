use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use handdial_core::capture::domain::frame_source::FrameSource;
use handdial_core::capture::infrastructure::detector_process::DetectorProcess;
use handdial_core::capture::infrastructure::landmark_stream::LandmarkStreamReader;
use handdial_core::control::domain::actuator::Actuator;
use handdial_core::control::domain::control_channel::ControlChannel;
use handdial_core::control::domain::control_dispatcher::ControlDispatcher;
use handdial_core::control::domain::readings_display::{NullReadingsDisplay, ReadingsDisplay};
use handdial_core::control::infrastructure::command_actuator::CommandActuator;
use handdial_core::control::infrastructure::logging_actuator::LoggingActuator;
use handdial_core::control::infrastructure::terminal_display::TerminalDisplay;
use handdial_core::detection::infrastructure::json_landmark_detector::JsonLandmarkDetector;
use handdial_core::gesture::domain::frame_classifier::{FrameClassifier, TieBreak};
use handdial_core::pipeline::control_logger::StdoutControlLogger;
use handdial_core::pipeline::gesture_control_use_case::{FrameCallback, GestureControlUseCase};
use handdial_core::shared::control_config::ControlConfig;

/// Control system volume and screen brightness with hand gestures.
///
/// The left hand's thumb-index pinch sets the volume, the right hand's sets
/// the brightness. Hand landmarks come from a JSON-lines stream, either a
/// file/stdin or the stdout of a detector process.
#[derive(Parser)]
#[command(name = "handdial")]
struct Cli {
    /// Calibration config file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Landmark JSON-lines file, or "-" for stdin.
    ///
    /// The first Ctrl-C stops after the current frame, which on an idle
    /// stdin means after the next line; a second Ctrl-C exits at once.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Detector command whose stdout is a landmark JSON-lines stream.
    #[arg(long)]
    detector_cmd: Option<String>,

    /// Volume command template; {value} and {percent} are substituted.
    #[arg(long)]
    volume_cmd: Option<String>,

    /// Brightness command template; {value} and {percent} are substituted.
    #[arg(long)]
    brightness_cmd: Option<String>,

    /// Which hand wins when two share a side: last_seen, first_seen, largest_hand.
    #[arg(long)]
    tie_break: Option<TieBreak>,

    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<usize>,

    /// Log progress every N frames.
    #[arg(long, default_value = "300")]
    log_every: usize,

    /// Do not draw the status line.
    #[arg(long)]
    quiet: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = ControlConfig::resolve(cli.config.as_deref())?;
    let tie_break = cli.tie_break.unwrap_or(config.tie_break);
    log::info!("Tie-break policy: {tie_break}");

    let source = open_source(&cli)?;
    let volume = build_volume_actuator(cli.volume_cmd.as_deref())?;
    let brightness = build_brightness_actuator(cli.brightness_cmd.as_deref())?;
    let display: Box<dyn ReadingsDisplay> = if cli.quiet {
        Box::new(NullReadingsDisplay)
    } else {
        Box::new(TerminalDisplay::stderr())
    };

    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();
    ctrlc::set_handler(move || {
        if !request_stop(&flag) {
            eprintln!();
            process::exit(INTERRUPTED_EXIT_CODE);
        }
    })?;

    let on_frame = cli.max_frames.map(|max| -> FrameCallback {
        Box::new(move |frames, _| frames < max)
    });

    let mut use_case = GestureControlUseCase::new(
        source,
        Box::new(JsonLandmarkDetector::new()),
        FrameClassifier::new(tie_break),
        config.mapper(),
        ControlDispatcher::new(volume, brightness),
        display,
        Box::new(StdoutControlLogger::new(cli.log_every)),
        on_frame,
        Some(cancelled),
    );
    let stats = use_case.execute()?;
    log::info!("Final readings: {}", use_case.readings());
    log::info!(
        "Processed {} frames ({} skipped)",
        stats.frames,
        stats.capture_errors + stats.detection_errors
    );
    Ok(())
}

/// Exit status after a forced second interrupt, as a shell reports SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Raises the stop flag. Returns `false` if a stop was already pending,
/// meaning the user interrupted twice and the loop is stuck waiting.
fn request_stop(flag: &AtomicBool) -> bool {
    if flag.swap(true, Ordering::Relaxed) {
        return false;
    }
    log::info!("Stopping after the current frame, press Ctrl-C again to quit");
    true
}

fn open_source(cli: &Cli) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    match (&cli.input, &cli.detector_cmd) {
        (Some(path), None) => {
            log::info!("Reading landmarks from {}", path.display());
            Ok(Box::new(LandmarkStreamReader::open(path)?))
        }
        (None, Some(command)) => Ok(Box::new(DetectorProcess::spawn(command)?)),
        _ => Err("Exactly one of --input and --detector-cmd is required".into()),
    }
}

fn build_volume_actuator(
    template: Option<&str>,
) -> Result<Box<dyn Actuator>, Box<dyn std::error::Error>> {
    match template {
        Some(template) => {
            let actuator = CommandActuator::new(template)?;
            if !actuator.is_available() {
                log::warn!(
                    "Volume command '{}' not found; volume changes will fail",
                    actuator.program()
                );
            }
            Ok(Box::new(actuator))
        }
        None => {
            log::info!("No --volume-cmd given, volume changes are only logged");
            Ok(Box::new(LoggingActuator::new(ControlChannel::Volume)))
        }
    }
}

/// Brightness control is optional: without a usable backend the channel is
/// display-only for the whole run.
fn build_brightness_actuator(
    template: Option<&str>,
) -> Result<Option<Box<dyn Actuator>>, Box<dyn std::error::Error>> {
    let Some(template) = template else {
        log::info!("No --brightness-cmd given, brightness control disabled");
        return Ok(None);
    };
    let actuator = CommandActuator::new(template)?;
    if actuator.is_available() {
        log::info!("Brightness control enabled via '{}'", actuator.program());
        Ok(Some(Box::new(actuator)))
    } else {
        log::warn!(
            "Brightness command '{}' not found, brightness control disabled",
            actuator.program()
        );
        Ok(None)
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.input.is_some() == cli.detector_cmd.is_some() {
        return Err("Exactly one of --input and --detector-cmd is required".into());
    }
    if let Some(path) = &cli.input {
        if path.as_os_str() != "-" && !path.exists() {
            return Err(format!("Input file not found: {}", path.display()).into());
        }
    }
    if cli.max_frames == Some(0) {
        return Err("--max-frames must be at least 1".into());
    }
    if cli.log_every == 0 {
        return Err("--log-every must be at least 1".into());
    }
    Ok(())
}
