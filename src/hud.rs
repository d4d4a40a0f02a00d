use image::{ImageBuffer, Rgb};
use std::time::Instant;

use crate::config::UiConfig;
use crate::controller::ToggleEvent;
use crate::font;
use crate::probe::MediaStatus;
use crate::types::{HandDetection, Point2D};

const LANDMARK_COLOR: (u8, u8, u8) = (255, 0, 0);
const FPS_COLOR: (u8, u8, u8) = (255, 0, 255);
const STATUS_COLOR: (u8, u8, u8) = (0, 255, 255);
const FEEDBACK_COLOR: (u8, u8, u8) = (0, 255, 0);
const FEEDBACK_RADIUS: i32 = 20;

/// RGB8 drawing surface, row-major.
pub struct Canvas {
    buffer: Vec<u8>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: vec![0; width * height * 3],
            width,
            height,
        }
    }

    pub fn from_frame(frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Self {
        Self {
            buffer: frame.as_raw().clone(),
            width: frame.width() as usize,
            height: frame.height() as usize,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_rgb(&self) -> &[u8] {
        &self.buffer
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 3;
        Some((self.buffer[idx], self.buffer[idx + 1], self.buffer[idx + 2]))
    }

    pub fn put(&mut self, x: i32, y: i32, color: (u8, u8, u8)) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 3;
        self.buffer[idx] = color.0;
        self.buffer[idx + 1] = color.1;
        self.buffer[idx + 2] = color.2;
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: usize, h: usize, color: (u8, u8, u8)) {
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                self.put(x + dx, y + dy, color);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: (u8, u8, u8)) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }
}

/// Instantaneous frame rate from consecutive ticks.
pub struct FpsMeter {
    last: Option<Instant>,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self { last: None }
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let fps = match self.last {
            Some(prev) => {
                let dt = now.duration_since(prev).as_secs_f32();
                if dt > 0.0 {
                    1.0 / dt
                } else {
                    0.0
                }
            }
            None => 0.0,
        };
        self.last = Some(now);
        fps
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new()
    }
}

/// Landmarks, FPS / media status text, and the green dot after a toggle.
pub struct Hud {
    show_landmarks: bool,
    show_text: bool,
    scale: usize,
    feedback_frames: u32,
    feedback: Option<(Point2D, u32)>,
}

impl Hud {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            show_landmarks: config.show_landmarks,
            show_text: config.show_hud,
            scale: config.font_scale.max(1),
            feedback_frames: config.feedback_frames,
            feedback: None,
        }
    }

    pub fn draw(
        &mut self,
        canvas: &mut Canvas,
        hand: Option<&HandDetection>,
        toggle: Option<&ToggleEvent>,
        status: MediaStatus,
        fps: f32,
    ) {
        if self.show_landmarks {
            if let Some(hand) = hand {
                for lm in &hand.landmarks {
                    canvas.fill_circle(lm.position.x as i32, lm.position.y as i32, 3, LANDMARK_COLOR);
                }
            }
        }

        if let Some(t) = toggle {
            self.feedback = Some((t.midpoint, self.feedback_frames));
        }
        if let Some((p, remaining)) = self.feedback {
            if remaining > 0 {
                canvas.fill_circle(p.x as i32, p.y as i32, FEEDBACK_RADIUS, FEEDBACK_COLOR);
            }
            self.feedback = remaining.checked_sub(1).filter(|r| *r > 0).map(|r| (p, r));
        }

        if self.show_text {
            let x = 10;
            let y = 10;
            let fps_text = format!("FPS: {}", fps as u32);
            font::draw_text(canvas, x, y, &fps_text, FPS_COLOR, self.scale);
            let status_text = format!("Media: {}", status.label());
            font::draw_text(
                canvas,
                x,
                y + font::line_height(self.scale) * 2,
                &status_text,
                STATUS_COLOR,
                self.scale,
            );
        }
    }
}
