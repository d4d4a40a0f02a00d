use anyhow::Result;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::hud::Canvas;

pub struct WindowOutput {
    window: Window,
    buffer: Vec<u32>,
}

impl WindowOutput {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| anyhow::anyhow!("Failed to create window: {}", e))?;

        window.limit_update_rate(Some(std::time::Duration::from_micros(16600))); // ~60 FPS

        Ok(Self {
            window,
            buffer: vec![0; width * height],
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// `q` or Escape.
    pub fn quit_requested(&self) -> bool {
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .iter()
            .any(|k| matches!(k, Key::Q | Key::Escape))
    }

    pub fn show(&mut self, canvas: &Canvas) -> Result<()> {
        let (w, h) = (canvas.width(), canvas.height());
        if self.buffer.len() != w * h {
            self.buffer.resize(w * h, 0);
        }

        // RGB8 -> 0RGB u32
        for (dst, px) in self.buffer.iter_mut().zip(canvas.as_rgb().chunks_exact(3)) {
            *dst = ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32;
        }

        self.window
            .update_with_buffer(&self.buffer, w, h)
            .map_err(|e| anyhow::anyhow!("Window update failed: {}", e))
    }
}
