//! Tiny 3x5 bitmap font for HUD text. Upper-case letters, digits and a few symbols;
//! anything else renders as a filled block.

use crate::hud::Canvas;

const GLYPH_W: usize = 3;
const GLYPH_H: usize = 5;

/// Rows top to bottom, bit 2 is the left column.
fn glyph(c: char) -> [u8; GLYPH_H] {
    match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b011, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b100, 0b100],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        ' ' => [0; GLYPH_H],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        _ => [0b111; GLYPH_H],
    }
}

/// Horizontal advance per character at `scale`.
pub fn advance(scale: usize) -> usize {
    (GLYPH_W + 1) * scale
}

pub fn line_height(scale: usize) -> usize {
    (GLYPH_H + 2) * scale
}

pub fn measure_text_width(text: &str, scale: usize) -> usize {
    text.chars().count() * advance(scale)
}

pub fn draw_text(canvas: &mut Canvas, x: usize, y: usize, text: &str, color: (u8, u8, u8), scale: usize) {
    for (i, c) in text.chars().enumerate() {
        let ox = x + i * advance(scale);
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_W {
                if (bits >> (GLYPH_W - 1 - col)) & 1 == 1 {
                    canvas.fill_rect(
                        (ox + col * scale) as i32,
                        (y + row * scale) as i32,
                        scale,
                        scale,
                        color,
                    );
                }
            }
        }
    }
}
