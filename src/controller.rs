use tracing::{debug, info};

use crate::action::ActionDispatcher;
use crate::config::GestureConfig;
use crate::debounce::{self, DebounceConfig, TouchPhase, TouchState};
use crate::geometry::{self, GeometryResult, LandmarkRoles, PoseThresholds};
use crate::types::{HandDetection, Point2D};

/// Emitted on the frame that confirms a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleEvent {
    pub frame_index: u64,
    /// Between thumb tip and little-finger tip, for on-screen feedback.
    pub midpoint: Point2D,
}

/// What happened on one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub geometry: Option<GeometryResult>,
    pub touching: bool,
    pub phase: TouchPhase,
    pub toggle: Option<ToggleEvent>,
}

/// Per-frame glue: detection -> geometry -> predicate -> debounce -> dispatch.
pub struct GestureController {
    thresholds: PoseThresholds,
    roles: LandmarkRoles,
    debounce: DebounceConfig,
    state: TouchState,
    frame_index: u64,
}

impl GestureController {
    pub fn new(thresholds: PoseThresholds, roles: LandmarkRoles, debounce: DebounceConfig) -> Self {
        Self {
            thresholds,
            roles,
            debounce,
            state: TouchState::IDLE,
            frame_index: 0,
        }
    }

    pub fn from_config(config: &GestureConfig) -> Self {
        Self::new(
            config.thresholds(),
            config.roles(),
            DebounceConfig {
                touch_frame_required: config.touch_frame_required,
                release_tolerance_frames: config.release_tolerance_frames,
            },
        )
    }

    pub fn state(&self) -> TouchState {
        self.state
    }

    /// Runs one cycle. `None` means no hand this frame, which counts as not touching.
    pub fn process(
        &mut self,
        detection: Option<&HandDetection>,
        action: &mut dyn ActionDispatcher,
    ) -> FrameReport {
        let frame_index = self.frame_index;
        self.frame_index += 1;

        let geometry = detection.map(|hand| geometry::evaluate(hand, &self.roles));
        let touching = geometry
            .map(|g| self.thresholds.is_touching(&g))
            .unwrap_or(false);

        let step = debounce::step(self.state, touching, &self.debounce);
        if step.state.phase() != self.state.phase() {
            debug!("frame {}: {:?} -> {:?}", frame_index, self.state.phase(), step.state.phase());
        }
        self.state = step.state;

        let toggle = if step.fired {
            let midpoint = detection
                .and_then(|hand| self.roles.resolve(hand))
                .map(|p| p.thumb_tip.midpoint(&p.little_tip))
                .unwrap_or_default();
            if let Some(g) = geometry {
                info!(
                    "Toggle on frame {} (distance {:.3}, angle {:.1} deg)",
                    frame_index, g.normalized_distance, g.angle_degrees
                );
            }
            action.on_toggle();
            Some(ToggleEvent {
                frame_index,
                midpoint,
            })
        } else {
            None
        };

        FrameReport {
            geometry,
            touching,
            phase: self.state.phase(),
            toggle,
        }
    }
}
