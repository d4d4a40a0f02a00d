use anyhow::{Context, Result};
use image::{imageops::FilterType, ImageBuffer, Rgb};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::Path;
use tracing::{info, warn};

use crate::config::DetectorConfig;
use crate::types::{HandDetection, Point2D, HAND_LANDMARK_COUNT};

/// Side length of the landmark model's square input.
const INPUT_SIZE: u32 = 224;

/// Maps a camera frame to at most one hand's landmarks.
pub trait HandLandmarker {
    fn name(&self) -> String;
    fn detect(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<HandDetection>>;
}

/// Uses the ONNX model when it exists, otherwise a simulated hand.
pub fn create_landmarker(config: &DetectorConfig) -> Result<Box<dyn HandLandmarker>> {
    if Path::new(&config.model_path).exists() {
        info!("Loading hand landmark model from {}...", config.model_path);
        Ok(Box::new(OnnxHandLandmarker::new(config)?))
    } else {
        warn!(
            "Hand landmark model {} not found. Using a simulated hand.",
            config.model_path
        );
        Ok(Box::new(SimulatedHandLandmarker::new()))
    }
}

/// MediaPipe-style 21-point hand landmark model (224x224 NHWC input, [0, 1] pixels).
pub struct OnnxHandLandmarker {
    session: Session,
    min_confidence: f32,
}

impl OnnxHandLandmarker {
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(config.intra_threads)?
            .with_execution_providers([
                ort::execution_providers::CoreMLExecutionProvider::default().build(),
                ort::execution_providers::CPUExecutionProvider::default().build(),
            ])?
            .commit_from_file(&config.model_path)
            .with_context(|| format!("Failed to load {}", config.model_path))?;

        Ok(Self {
            session,
            min_confidence: config.min_detection_confidence,
        })
    }
}

impl HandLandmarker for OnnxHandLandmarker {
    fn name(&self) -> String {
        "Hand Landmarks (ONNX, 21 pts)".to_string()
    }

    fn detect(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<HandDetection>> {
        let resized = image::imageops::resize(frame, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);

        let side = INPUT_SIZE as usize;
        let mut input_data = Vec::with_capacity(side * side * 3);
        for pixel in resized.pixels() {
            input_data.push(pixel[0] as f32 / 255.0);
            input_data.push(pixel[1] as f32 / 255.0);
            input_data.push(pixel[2] as f32 / 255.0);
        }

        let input = Tensor::from_array((vec![1, side, side, 3], input_data))?;
        let outputs = self.session.run(ort::inputs![input])?;

        let (_presence_shape, presence_data) = outputs[1].try_extract_tensor::<f32>()?;
        let score = presence_data.first().copied().map(to_probability).unwrap_or(0.0);
        if score < self.min_confidence {
            return Ok(None);
        }

        let (_coords_shape, coords) = outputs[0].try_extract_tensor::<f32>()?;
        if coords.len() < HAND_LANDMARK_COUNT * 3 {
            warn!("Landmark output too short: {} values", coords.len());
            return Ok(None);
        }

        // Model space (0..224) -> frame pixels
        let sx = frame.width() as f32 / INPUT_SIZE as f32;
        let sy = frame.height() as f32 / INPUT_SIZE as f32;
        let points: Vec<Point2D> = (0..HAND_LANDMARK_COUNT)
            .map(|i| Point2D::new(coords[i * 3] * sx, coords[i * 3 + 1] * sy))
            .collect();

        Ok(Some(HandDetection::from_points(&points, score)))
    }
}

/// Some exports emit the raw logit for hand presence.
fn to_probability(v: f32) -> f32 {
    if (0.0..=1.0).contains(&v) {
        v
    } else {
        1.0 / (1.0 + (-v).exp())
    }
}

/// Stand-in when no model is available: an upright hand in the frame centre
/// that brings thumb and little finger together for part of every cycle.
pub struct SimulatedHandLandmarker {
    frame_count: u32,
    period: u32,
    pinch_frames: u32,
}

impl SimulatedHandLandmarker {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            period: 90,
            pinch_frames: 30,
        }
    }

    fn is_pinching(&self) -> bool {
        self.frame_count % self.period >= self.period - self.pinch_frames
    }
}

impl Default for SimulatedHandLandmarker {
    fn default() -> Self {
        Self::new()
    }
}

impl HandLandmarker for SimulatedHandLandmarker {
    fn name(&self) -> String {
        "No model (Simulated Hand)".to_string()
    }

    fn detect(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<HandDetection>> {
        self.frame_count += 1;

        let cx = frame.width() as f32 / 2.0;
        let cy = frame.height() as f32 / 2.0;
        let unit = frame.height() as f32 / 10.0;

        // Wrist at the bottom, five fingers fanning upward: 4 joints each.
        let mut points = vec![Point2D::new(cx, cy + 2.5 * unit)];
        for finger in 0..5 {
            let base_x = cx + (finger as f32 - 2.0) * 0.6 * unit;
            for joint in 1..=4 {
                let y = cy + 1.0 * unit - joint as f32 * 0.8 * unit;
                let spread = if finger == 0 { -0.4 * joint as f32 * unit } else { 0.0 };
                points.push(Point2D::new(base_x + spread, y));
            }
        }

        if self.is_pinching() {
            // Thumb tip (4) folds across onto the little-finger tip (20).
            points[4] = Point2D::new(points[20].x - 0.2 * unit, points[20].y + 0.1 * unit);
        }

        Ok(Some(HandDetection::from_points(&points, 1.0)))
    }
}
