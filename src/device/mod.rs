//! Hardware collaborators
//!
//! The game never touches hardware directly. It talks to a [`Device`]: a
//! display it can draw into and commit, a keypad to poll, a clock to block
//! on, and a speaker driven by timer periods.

pub mod audio;
pub mod framebuffer;
pub mod terminal;

use anyhow::Result;

use crate::game::Key;

/// Display width in pixels
pub const DISPLAY_WIDTH: i32 = 128;
/// Display height in pixels
pub const DISPLAY_HEIGHT: i32 = 64;

/// Monochrome pixel color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

/// Drawing primitives of a monochrome bitmap display. Drawing goes to a
/// back buffer; nothing is visible until [`Display::commit`].
pub trait Display {
    fn clear(&mut self);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color);
    fn draw_point(&mut self, x: i32, y: i32, color: Color);
    /// One pixel wide outline
    fn draw_frame(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color);
    /// Text with its top-left corner at (x, y)
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color);
    fn commit(&mut self) -> Result<()>;
}

pub trait Keypad {
    /// Consume at most one pending key
    fn poll_key(&mut self) -> Key;
}

pub trait Clock {
    fn wait_ms(&mut self, ms: u32);
    fn wait_us(&mut self, us: u32);
}

pub trait Speaker {
    /// Start a square wave with the given timer period
    fn play_tone(&mut self, period: u16);
    fn stop_tone(&mut self);
}

/// Everything the frame loop needs from the hardware
pub trait Device: Display + Keypad + Clock + Speaker {}

impl<T: Display + Keypad + Clock + Speaker> Device for T {}
