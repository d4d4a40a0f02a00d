use anyhow::{anyhow, Context, Result};
use colored::*;
use image::{ImageBuffer, Rgb};
use nokhwa::{
    pixel_format::RgbFormat,
    utils::{ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution},
    Camera,
};
use tracing::info;

use crate::config::CameraConfig;

pub struct CameraSource {
    camera: Camera,
    mirror: bool,
}

impl CameraSource {
    pub fn new(index: u32, config: &CameraConfig) -> Result<Self> {
        let cam_index = CameraIndex::Index(index);
        let wanted = CameraFormat::new(
            Resolution::new(config.width, config.height),
            FrameFormat::MJPEG,
            30,
        );
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(wanted));
        let mut camera = Camera::new(cam_index, requested)
            .map_err(|e| anyhow!(e))
            .context("Cannot open camera. Check index or connection")?;

        camera
            .open_stream()
            .map_err(|e| anyhow!(e))
            .context("Failed to open camera stream")?;

        println!("{}", format!("Opened camera: {}", camera.info().human_name()).green());
        info!("Camera format: {}", camera.camera_format());

        Ok(Self {
            camera,
            mirror: config.mirror,
        })
    }

    /// Grabs one RGB frame, mirrored if configured.
    pub fn capture(&mut self) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>> {
        let frame = self.camera.frame().map_err(|e| anyhow!(e)).context("Failed to get frame")?;
        let mut decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| anyhow!(e))
            .context("Failed to decode frame")?;
        if self.mirror {
            image::imageops::flip_horizontal_in_place(&mut decoded);
        }
        Ok(decoded)
    }

    pub fn width(&self) -> u32 {
        self.camera.resolution().width()
    }

    pub fn height(&self) -> u32 {
        self.camera.resolution().height()
    }

    pub fn name(&self) -> String {
        self.camera.info().human_name()
    }
}

/// Prints the cameras the native backend can see.
pub fn print_cameras() -> Result<()> {
    let cameras = nokhwa::query(ApiBackend::Auto).map_err(|e| anyhow!(e))?;
    println!("{}", "Available Cameras:".bold());
    println!("{:<5} | {:<30} | {:<10}", "Index", "Name", "Misc");
    println!("{}", "-".repeat(60));
    for cam in cameras {
        println!("{:<5} | {:<30} | {:?}", cam.index(), cam.human_name(), cam.misc());
    }
    Ok(())
}
