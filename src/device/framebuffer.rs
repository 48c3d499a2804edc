use anyhow::Result;
use font8x8::UnicodeFonts;

use super::{Color, DISPLAY_HEIGHT, DISPLAY_WIDTH, Display};

/// Width and height of a glyph cell
pub const GLYPH_SIZE: i32 = 8;

/// In-memory monochrome bitmap. Everything drawn outside it is clipped.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: i32,
    height: i32,
    pixels: Vec<bool>,
    commits: u64,
}

impl FrameBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; (width.max(0) * height.max(0)) as usize],
            commits: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether the pixel is lit; anything off-screen reads as dark
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.pixels[i])
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    /// Number of frames committed so far
    pub fn commits(&self) -> u64 {
        self.commits
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    fn set(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color == Color::White;
        }
    }

    fn draw_char(&mut self, ch: char, x: i32, y: i32, color: Color) {
        let glyph = font8x8::BASIC_FONTS
            .get(ch)
            .or_else(|| font8x8::BASIC_FONTS.get('?'))
            .unwrap_or([0; 8]);

        // Only set bits are drawn, the background shows through
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..8 {
                if (bits >> col) & 1 == 1 {
                    self.set(x + col, y + row as i32, color);
                }
            }
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

impl Display for FrameBuffer {
    fn clear(&mut self) {
        self.pixels.fill(false);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for py in y..y + h {
            for px in x..x + w {
                self.set(px, py, color);
            }
        }
    }

    fn draw_point(&mut self, x: i32, y: i32, color: Color) {
        self.set(x, y, color);
    }

    fn draw_frame(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        for px in x..x + w {
            self.set(px, y, color);
            self.set(px, y + h - 1, color);
        }
        for py in y..y + h {
            self.set(x, py, color);
            self.set(x + w - 1, py, color);
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        let mut cursor = x;
        for ch in text.chars() {
            self.draw_char(ch, cursor, y, color);
            cursor += GLYPH_SIZE;
        }
    }

    fn commit(&mut self) -> Result<()> {
        self.commits += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_display() {
        let fb = FrameBuffer::default();
        assert_eq!((fb.width(), fb.height()), (128, 64));
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_fill_rect_and_clear() {
        let mut fb = FrameBuffer::new(16, 8);
        fb.fill_rect(2, 1, 3, 2, Color::White);

        assert_eq!(fb.lit_count(), 6);
        assert!(fb.pixel(2, 1));
        assert!(fb.pixel(4, 2));
        assert!(!fb.pixel(5, 2));

        fb.draw_point(3, 1, Color::Black);
        assert!(!fb.pixel(3, 1));

        fb.clear();
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_drawing_is_clipped() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.fill_rect(-4, -4, 6, 6, Color::White);
        fb.draw_point(8, 0, Color::White);
        fb.draw_point(0, -1, Color::White);

        assert_eq!(fb.lit_count(), 4);
        assert!(!fb.pixel(-1, 0));
    }

    #[test]
    fn test_frame_is_outline() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.draw_frame(0, 0, 10, 10, Color::White);

        assert_eq!(fb.lit_count(), 36);
        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(9, 9));
        assert!(!fb.pixel(5, 5));
    }

    #[test]
    fn test_text_uses_glyphs() {
        let mut fb = FrameBuffer::new(32, 8);
        fb.draw_text("I", 0, 0, Color::White);
        let one = fb.lit_count();
        assert!(one > 0);
        // Nothing spills into the next glyph cell
        assert!((8..32).all(|x| (0..8).all(|y| !fb.pixel(x, y))));

        fb.clear();
        fb.draw_text("II", 0, 0, Color::White);
        assert_eq!(fb.lit_count(), one * 2);

        fb.clear();
        fb.draw_text(" ", 0, 0, Color::White);
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_commit_counts_frames() {
        let mut fb = FrameBuffer::default();
        fb.commit().unwrap();
        fb.commit().unwrap();
        assert_eq!(fb.commits(), 2);
    }
}
