//! The real terminal: raw mode, alternate screen, mouse capture, and
//! diffed frame output.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::style::{
    Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, event, execute, queue, terminal};

use crate::buffer::Buffer;
use crate::element::Element;
use crate::event::Event;
use crate::layout::{layout, LayoutResult, Rect};
use crate::render::render_to_buffer;
use crate::style::Rgb;
use crate::text::char_columns;

/// Owns the terminal for its lifetime and restores it on drop.
///
/// Frames are drawn into `next` and only cells that differ from `shown`
/// are written out.
pub struct Terminal {
    out: Stdout,
    next: Buffer,
    shown: Buffer,
    layout: LayoutResult,
    blank: (Rgb, Rgb),
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            out,
            next: Buffer::new(width, height),
            shown: unknown_screen(width, height),
            layout: LayoutResult::new(),
            blank: (Rgb::WHITE, Rgb::BLACK),
        })
    }

    /// Foreground and background of cells no element paints.
    pub fn set_clear_colors(&mut self, fg: Rgb, bg: Rgb) {
        self.blank = (fg, bg);
    }

    pub fn size(&self) -> (u16, u16) {
        (self.next.width(), self.next.height())
    }

    /// Wait up to `timeout` for input, then drain whatever else is queued.
    pub fn poll(&self, timeout: Duration) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();
        let mut wait = timeout;
        while event::poll(wait)? {
            if let Some(ev) = Event::from_crossterm(event::read()?) {
                events.push(ev);
            }
            wait = Duration::ZERO;
        }
        Ok(events)
    }

    /// Lay out and draw `root` over the whole screen. The layout stays
    /// available through [`Terminal::layout`] for routing input.
    pub fn render(&mut self, root: &Element) -> io::Result<&LayoutResult> {
        let (width, height) = terminal::size()?;
        if (width, height) != self.size() {
            log::debug!("terminal resized to {width}x{height}");
            self.next = Buffer::new(width, height);
            self.shown = unknown_screen(width, height);
            execute!(self.out, terminal::Clear(terminal::ClearType::All))?;
        }

        let (fg, bg) = self.blank;
        self.next.fill(fg, bg);
        self.layout = layout(root, Rect::new(0, 0, width, height));
        render_to_buffer(root, &self.layout, &mut self.next);

        self.flush_changes()?;
        std::mem::swap(&mut self.next, &mut self.shown);
        Ok(&self.layout)
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    /// Write the cells that changed since the last frame, moving the cursor
    /// only when a change does not continue the previous one.
    fn flush_changes(&mut self) -> io::Result<()> {
        let mut cursor_at: Option<(u16, u16)> = None;
        let mut colors: Option<(Rgb, Rgb)> = None;
        let mut bold = false;

        queue!(self.out, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.next.changes(&self.shown) {
            // Drawn together with the wide char to its left
            if cell.continuation {
                continue;
            }

            if cursor_at != Some((x, y)) {
                queue!(self.out, cursor::MoveTo(x, y))?;
            }

            if cell.bold != bold {
                let weight = if cell.bold { Attribute::Bold } else { Attribute::NormalIntensity };
                queue!(self.out, SetAttribute(weight))?;
                bold = cell.bold;
            }

            if colors != Some((cell.fg, cell.bg)) {
                queue!(
                    self.out,
                    SetForegroundColor(color(cell.fg)),
                    SetBackgroundColor(color(cell.bg))
                )?;
                colors = Some((cell.fg, cell.bg));
            }

            write!(self.out, "{}", cell.ch)?;
            cursor_at = Some((x.saturating_add(char_columns(cell.ch).max(1)), y));
        }

        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()
    }
}

/// A buffer standing for screen contents nobody knows, so the first frame
/// is written out in full.
fn unknown_screen(width: u16, height: u16) -> Buffer {
    let mut buf = Buffer::new(width, height);
    buf.invalidate();
    buf
}

fn color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
