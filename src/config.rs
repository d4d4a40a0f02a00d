use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::geometry::{LandmarkRoles, PoseThresholds};
use crate::types::HAND_LANDMARK_COUNT;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gesture: GestureConfig,
    pub camera: CameraConfig,
    pub detector: DetectorConfig,
    pub action: ActionConfig,
    pub probe: ProbeConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Thumb-to-little-tip distance divided by hand height.
    pub distance_threshold: f32,
    pub angle_threshold_degrees: f32,
    /// Consecutive touching frames before a toggle fires.
    pub touch_frame_required: u32,
    /// Non-touching frames tolerated inside a run before it resets. 0 = strict.
    pub release_tolerance_frames: u32,
    pub landmarks: LandmarkIndices,
}

/// Detector indices for the three tracked points (MediaPipe hand layout).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkIndices {
    pub thumb_tip: usize,
    pub little_tip: usize,
    pub little_base: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub width: u32,
    pub height: u32,
    pub mirror: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub model_path: String,
    pub min_detection_confidence: f32,
    pub intra_threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Program and arguments run once per toggle.
    pub command: Vec<String>,
    pub dry_run: bool,
    /// A run still going after this long is killed.
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub enabled: bool,
    pub command: Vec<String>,
    pub interval_ms: u64,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub window_title: String,
    pub show_landmarks: bool,
    pub show_hud: bool,
    pub font_scale: usize,
    /// How many frames the green feedback dot stays up after a toggle.
    pub feedback_frames: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 0.25,
            angle_threshold_degrees: 60.0,
            touch_frame_required: 3,
            release_tolerance_frames: 0,
            landmarks: LandmarkIndices::default(),
        }
    }
}

impl Default for LandmarkIndices {
    fn default() -> Self {
        Self {
            thumb_tip: 4,
            little_tip: 20,
            little_base: 17,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            mirror: true,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: "hand_landmark.onnx".to_string(),
            min_detection_confidence: 0.8,
            intra_threads: 4,
        }
    }
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            command: vec!["playerctl".to_string(), "play-pause".to_string()],
            dry_run: false,
            timeout_ms: 2000,
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: vec!["playerctl".to_string(), "status".to_string()],
            interval_ms: 500,
            timeout_ms: 250,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_title: "Media Hand Control (Pinky+Thumb)".to_string(),
            show_landmarks: true,
            show_hud: true,
            font_scale: 3,
            feedback_frames: 8,
        }
    }
}

impl GestureConfig {
    pub fn thresholds(&self) -> PoseThresholds {
        PoseThresholds {
            distance: self.distance_threshold,
            angle_degrees: self.angle_threshold_degrees,
        }
    }

    pub fn roles(&self) -> LandmarkRoles {
        LandmarkRoles {
            thumb_tip: self.landmarks.thumb_tip,
            little_tip: self.landmarks.little_tip,
            little_base: self.landmarks.little_base,
        }
    }
}

impl AppConfig {
    pub const DEFAULT_PATH: &'static str = "config.json";

    /// Loads `path`, falling back to defaults when it is missing or unparsable.
    /// A parsed or newly created config is written back so new fields show up in
    /// the file; an unparsable file is left as-is.
    pub fn load_from(path: &Path) -> Result<Self> {
        let (config, write_back) = if path.exists() {
            let content = fs::read_to_string(path)?;
            match serde_json::from_str::<AppConfig>(&content) {
                Ok(c) => {
                    info!("Loaded configuration from {}", path.display());
                    (c, true)
                }
                Err(e) => {
                    warn!(
                        "Error parsing config: {}. Loading defaults; {} left untouched.",
                        e,
                        path.display()
                    );
                    (Self::default(), false)
                }
            }
        } else {
            info!("Configuration file not found. Creating default at {}", path.display());
            (Self::default(), true)
        };

        config.validate()?;
        if write_back {
            config.save_to(path)?;
        }

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let g = &self.gesture;
        ensure!(g.touch_frame_required >= 1, "gesture.touch_frame_required must be at least 1");
        ensure!(
            g.distance_threshold > 0.0 && g.distance_threshold.is_finite(),
            "gesture.distance_threshold must be a positive number, got {}",
            g.distance_threshold
        );
        ensure!(
            g.angle_threshold_degrees > 0.0 && g.angle_threshold_degrees <= 180.0,
            "gesture.angle_threshold_degrees must be in (0, 180], got {}",
            g.angle_threshold_degrees
        );

        let idx = g.landmarks;
        for (name, i) in [
            ("thumb_tip", idx.thumb_tip),
            ("little_tip", idx.little_tip),
            ("little_base", idx.little_base),
        ] {
            ensure!(
                i < HAND_LANDMARK_COUNT,
                "gesture.landmarks.{} = {} is outside the {}-point hand layout",
                name,
                i,
                HAND_LANDMARK_COUNT
            );
        }
        ensure!(
            idx.thumb_tip != idx.little_tip
                && idx.thumb_tip != idx.little_base
                && idx.little_tip != idx.little_base,
            "gesture.landmarks must name three distinct points"
        );

        ensure!(!self.action.command.is_empty(), "action.command must not be empty");
        ensure!(
            !self.probe.enabled || !self.probe.command.is_empty(),
            "probe.command must not be empty while the probe is enabled"
        );
        Ok(())
    }
}
