//! Host emulation of the handheld on a terminal.
//!
//! The framebuffer is shown with half-block characters, two pixel rows per
//! terminal line. There is no tone generator, so tones are only logged.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{error, trace};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color as TermColor, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::time::Duration;

use super::framebuffer::FrameBuffer;
use super::{Clock, Color, Display, Keypad, Speaker};
use crate::game::Key;
use crate::input::{InputHandler, KeyAction};

pub struct TerminalDevice<B: Backend> {
    terminal: Terminal<B>,
    framebuffer: FrameBuffer,
    input_handler: InputHandler,
    quit_requested: bool,
}

impl<B: Backend> TerminalDevice<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            framebuffer: FrameBuffer::default(),
            input_handler: InputHandler::new(),
            quit_requested: false,
        }
    }

    /// Set once the player asked to leave; the handheld itself has no way out
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    fn next_event(&mut self) -> Result<Option<Event>> {
        if !event::poll(Duration::ZERO).context("Failed to poll terminal events")? {
            return Ok(None);
        }
        let event = event::read().context("Failed to read terminal event")?;
        Ok(Some(event))
    }
}

/// Turn the bitmap into terminal lines, two pixel rows per line
pub fn bitmap_lines(fb: &FrameBuffer) -> Vec<Line<'static>> {
    (0..fb.height())
        .step_by(2)
        .map(|y| {
            let row: String = (0..fb.width())
                .map(|x| match (fb.pixel(x, y), fb.pixel(x, y + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                })
                .collect();
            Line::from(row)
        })
        .collect()
}

fn draw_screen(frame: &mut Frame, fb: &FrameBuffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(fb.height() as u16 / 2 + 2), // Screen
            Constraint::Length(1),                          // Controls
            Constraint::Min(0),
        ])
        .split(frame.area());

    let screen = Paragraph::new(bitmap_lines(fb))
        .style(Style::default().fg(TermColor::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(TermColor::DarkGray))
                .title(" Snake "),
        );
    frame.render_widget(screen, chunks[0]);

    let controls = Paragraph::new(Line::from(vec![
        Span::styled("↑↓←→", Style::default().fg(TermColor::Cyan)),
        Span::raw(" or "),
        Span::styled("WASD", Style::default().fg(TermColor::Cyan)),
        Span::raw(" to move | "),
        Span::styled("Z/X", Style::default().fg(TermColor::Green)),
        Span::raw(" A/B | "),
        Span::styled("Q", Style::default().fg(TermColor::Red)),
        Span::raw(" to quit"),
    ]))
    .alignment(Alignment::Left);
    frame.render_widget(controls, chunks[1]);
}

impl<B: Backend> Display for TerminalDevice<B> {
    fn clear(&mut self) {
        self.framebuffer.clear();
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.framebuffer.fill_rect(x, y, w, h, color);
    }

    fn draw_point(&mut self, x: i32, y: i32, color: Color) {
        self.framebuffer.draw_point(x, y, color);
    }

    fn draw_frame(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.framebuffer.draw_frame(x, y, w, h, color);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.framebuffer.draw_text(text, x, y, color);
    }

    fn commit(&mut self) -> Result<()> {
        self.framebuffer.commit()?;
        let fb = &self.framebuffer;
        self.terminal
            .draw(|frame| draw_screen(frame, fb))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

impl<B: Backend> Keypad for TerminalDevice<B> {
    fn poll_key(&mut self) -> Key {
        let event = match self.next_event() {
            Ok(Some(event)) => event,
            Ok(None) => return Key::None,
            Err(err) => {
                error!("{:#}", err);
                return Key::None;
            }
        };

        let Event::Key(key) = event else {
            return Key::None;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return Key::None;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Button(button) => button,
            KeyAction::Quit => {
                self.quit_requested = true;
                Key::None
            }
            KeyAction::None => Key::None,
        }
    }
}

impl<B: Backend> Clock for TerminalDevice<B> {
    fn wait_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }

    fn wait_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(us as u64));
    }
}

impl<B: Backend> Speaker for TerminalDevice<B> {
    fn play_tone(&mut self, period: u16) {
        trace!("speaker on, period {}", period);
    }

    fn stop_tone(&mut self) {
        trace!("speaker off");
    }
}
