//! Draws face boxes and attribute labels onto frames.
//!
//! Text is rendered with a built-in 3x5 bitmap font covering the closed
//! label alphabet, so no font asset ships with the binary.

use crate::classification::domain::labels::FaceLabel;
use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

const BOX_COLOR: [u8; 3] = [0, 255, 0];
const TEXT_COLOR: [u8; 3] = [255, 255, 0];
const BACKGROUND_COLOR: [u8; 3] = [0, 0, 0];

const BOX_THICKNESS: u32 = 2;
const FONT_SCALE: i32 = 2;

/// Pure drawing stage of the pipeline.
///
/// Always returns a new frame; the input is never modified, so callers can
/// keep the clean frame around for cropping or re-detection.
pub struct FrameAnnotator;

impl FrameAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Renders every labeled face onto a copy of `frame`.
    ///
    /// Per face: a filled background strip above the box, the box outline,
    /// then the label text. The label strip is clamped so it never leaves
    /// the top edge of the frame.
    pub fn annotate(&self, frame: &Frame, faces: &[(FaceBox, FaceLabel)]) -> Frame {
        let mut out = frame.clone();

        for (face, label) in faces {
            let text = label.to_string();
            let (text_w, text_h) = text_size(&text);
            let baseline = FONT_SCALE;

            let x1 = face.x as i32;
            let y1 = face.y as i32;

            // Label baseline sits just above the box, pushed down when the
            // box touches the top of the frame.
            let label_y = y1.max(text_h + 10);

            fill_rect(
                &mut out,
                x1,
                label_y - text_h - 10,
                x1 + text_w,
                label_y + baseline - 10,
                BACKGROUND_COLOR,
            );
            draw_box_outline(&mut out, face, BOX_THICKNESS, BOX_COLOR);
            draw_text(&mut out, x1, label_y - 7 - text_h, &text, TEXT_COLOR);
        }

        out
    }
}

impl Default for FrameAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

/// Rendered pixel extent of `text`: `(width, height)`.
fn text_size(text: &str) -> (i32, i32) {
    let chars = text.chars().count() as i32;
    if chars == 0 {
        return (0, 5 * FONT_SCALE);
    }
    // 3 columns per glyph plus 1 column of spacing, minus trailing spacing
    (chars * 4 * FONT_SCALE - FONT_SCALE, 5 * FONT_SCALE)
}

fn put_pixel(frame: &mut Frame, x: i32, y: i32, color: [u8; 3]) {
    if x < 0 || y < 0 || x >= frame.width() as i32 || y >= frame.height() as i32 {
        return;
    }
    let ch = frame.channels() as usize;
    let offset = (y as usize * frame.width() as usize + x as usize) * ch;
    frame.data_mut()[offset..offset + 3].copy_from_slice(&color);
}

fn fill_rect(frame: &mut Frame, x1: i32, y1: i32, x2: i32, y2: i32, color: [u8; 3]) {
    for y in y1..=y2 {
        for x in x1..=x2 {
            put_pixel(frame, x, y, color);
        }
    }
}

/// Hollow rectangle outline, drawn `thickness` pixels inward from the edge.
fn draw_box_outline(frame: &mut Frame, face: &FaceBox, thickness: u32, color: [u8; 3]) {
    let x1 = face.x as i32;
    let y1 = face.y as i32;
    let x2 = face.right() as i32;
    let y2 = face.bottom() as i32;

    for t in 0..thickness as i32 {
        for x in x1..=x2 {
            put_pixel(frame, x, y1 + t, color);
            put_pixel(frame, x, y2 - t, color);
        }
        for y in y1..=y2 {
            put_pixel(frame, x1 + t, y, color);
            put_pixel(frame, x2 - t, y, color);
        }
    }
}

fn draw_text(frame: &mut Frame, x: i32, y: i32, text: &str, color: [u8; 3]) {
    let mut cursor_x = x;
    for ch in text.chars() {
        draw_char(frame, cursor_x, y, ch, FONT_SCALE, color);
        cursor_x += 4 * FONT_SCALE;
    }
}

/// 3x5 glyphs for the label alphabet. Unknown characters render blank.
fn draw_char(frame: &mut Frame, x: i32, y: i32, ch: char, scale: i32, color: [u8; 3]) {
    let bitmap: [u8; 5] = match ch {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'a' => [0b000, 0b011, 0b101, 0b101, 0b011],
        'e' => [0b010, 0b101, 0b111, 0b100, 0b011],
        'l' => [0b010, 0b010, 0b010, 0b010, 0b011],
        'm' => [0b000, 0b101, 0b111, 0b101, 0b101],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        _ => [0b000, 0b000, 0b000, 0b000, 0b000],
    };

    for (row, bits) in bitmap.iter().enumerate() {
        for col in 0..3 {
            if (bits >> (2 - col)) & 1 == 1 {
                for dy in 0..scale {
                    for dx in 0..scale {
                        put_pixel(
                            frame,
                            x + col * scale + dx,
                            y + row as i32 * scale + dy,
                            color,
                        );
                    }
                }
            }
        }
    }
}
