use clap::Parser;
use colored::*;
use std::time::Duration;
use tracing::{info, warn};

use hand_toggle::action::{ActionDispatcher, CommandAction, LogAction};
use hand_toggle::args::Args;
use hand_toggle::camera::{self, CameraSource};
use hand_toggle::config::AppConfig;
use hand_toggle::controller::GestureController;
use hand_toggle::detector;
use hand_toggle::hud::{Canvas, FpsMeter, Hud};
use hand_toggle::output::WindowOutput;
use hand_toggle::probe::{BackgroundProbe, DisabledProbe, StatusProbe};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hand_toggle=info".into()),
        )
        .init();

    if args.list {
        return camera::print_cameras();
    }

    // 0. Load Config
    let mut config = AppConfig::load_from(&args.config)?;
    if let Some(model) = &args.model {
        config.detector.model_path = model.clone();
    }
    if let Some(mirror) = args.mirror_override() {
        config.camera.mirror = mirror;
    }
    if args.dry_run {
        config.action.dry_run = true;
    }

    // 1. Setup Camera
    let mut camera = CameraSource::new(args.cam_index, &config.camera)?;
    info!("Camera {} at {}x{}", camera.name(), camera.width(), camera.height());

    // 2. Setup Detector + Gesture
    let mut landmarker = detector::create_landmarker(&config.detector)?;
    info!("Active Detector: {}", landmarker.name());

    let mut controller = GestureController::from_config(&config.gesture);
    let mut action: Box<dyn ActionDispatcher> = if config.action.dry_run {
        Box::new(LogAction::default())
    } else {
        Box::new(CommandAction::spawn(
            &config.action.command,
            Duration::from_millis(config.action.timeout_ms),
        )?)
    };
    info!("Toggle action: {}", action.name());

    let mut probe: Box<dyn StatusProbe> = if config.probe.enabled {
        Box::new(BackgroundProbe::spawn(
            config.probe.command.clone(),
            Duration::from_millis(config.probe.interval_ms),
            Duration::from_millis(config.probe.timeout_ms),
        )?)
    } else {
        Box::new(DisabledProbe)
    };

    // 3. Setup Output
    let mut window = WindowOutput::new(
        &config.ui.window_title,
        camera.width() as usize,
        camera.height() as usize,
    )?;
    let mut hud = Hud::new(&config.ui);
    let mut fps_meter = FpsMeter::new();

    println!("{}", "Pinch thumb and little finger to toggle play/pause. [q] quits.".cyan());

    // 4. Loop
    while window.is_open() && !window.quit_requested() {
        let frame = match camera.capture() {
            Ok(f) => f,
            Err(e) => {
                warn!("Frame capture failed: {:#}", e);
                break;
            }
        };

        let detection = match landmarker.detect(&frame) {
            Ok(d) => d,
            Err(e) => {
                warn!("Hand detection failed on this frame: {:#}", e);
                None
            }
        };

        let report = controller.process(detection.as_ref(), action.as_mut());
        let status = probe.poll_status();
        let fps = fps_meter.tick();

        let mut canvas = Canvas::from_frame(&frame);
        hud.draw(&mut canvas, detection.as_ref(), report.toggle.as_ref(), status, fps);
        window.show(&canvas)?;
    }

    info!("Stopped (gesture phase {:?})", controller.state().phase());
    Ok(())
}
