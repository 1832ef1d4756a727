use crate::config::Config;
use crate::error::{Error, Result};
use crate::signal::SigwinchWatcher;
use crate::status_bar::StatusBar;
use crate::term_color::{Color, TermColor};
use crate::text_buffer::TextBuffer;
use std::cmp;
use std::io::{self, Write};
use std::time::{Duration, SystemTime};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const HELP: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";
const MAX_MESSAGE_LEN: usize = 79;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum StatusMessageKind {
    Info,
    Error,
}

struct StatusMessage {
    text: String,
    timestamp: SystemTime,
    kind: StatusMessageKind,
}

impl StatusMessage {
    fn new<S: Into<String>>(message: S, kind: StatusMessageKind) -> StatusMessage {
        let mut text = message.into();
        text.truncate(clip(&text, MAX_MESSAGE_LEN).len());
        StatusMessage {
            text,
            timestamp: SystemTime::now(),
            kind,
        }
    }
}

// Longest prefix of `s` which fits in `max` bytes without splitting a UTF-8 sequence
fn clip(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn check_window_size(w: usize, h: usize) -> Result<()> {
    if w < 1 || h < 3 {
        Err(Error::TooSmallWindow(w, h))
    } else {
        Ok(())
    }
}

pub struct Screen<W: Write> {
    output: W,
    // X coordinate in `render` text of rows
    rx: usize,
    // Screen size. `num_rows` excludes status bar and message bar
    num_cols: usize,
    num_rows: usize,
    message: Option<StatusMessage>,
    message_timeout: Duration,
    // Scroll position (row/col offset)
    pub rowoff: usize,
    pub coloff: usize,
    color: TermColor,
    sigwinch: Option<SigwinchWatcher>,
}

impl<W: Write> Screen<W> {
    pub fn new(window_size: (usize, usize), output: W, config: &Config) -> Result<Self> {
        let (w, h) = window_size;
        check_window_size(w, h)?;
        Ok(Self {
            output,
            rx: 0,
            num_cols: w,
            num_rows: h - 2,
            message: Some(StatusMessage::new(HELP, StatusMessageKind::Info)),
            message_timeout: config.message_timeout,
            rowoff: 0,
            coloff: 0,
            color: config.color,
            sigwinch: None,
        })
    }

    pub fn watch_resize(&mut self) -> Result<()> {
        self.sigwinch = Some(SigwinchWatcher::new()?);
        Ok(())
    }

    pub fn resize(&mut self, window_size: (usize, usize)) -> Result<()> {
        let (w, h) = window_size;
        check_window_size(w, h)?;
        tracing::debug!(cols = w, rows = h, "window resized");
        self.num_cols = w;
        self.num_rows = h - 2;
        Ok(())
    }

    // Returns true when the window size was changed since the last call
    pub fn maybe_resize(&mut self) -> Result<bool> {
        if !self.sigwinch.as_ref().map_or(false, SigwinchWatcher::take) {
            return Ok(false);
        }
        let size = term_size::dimensions_stdout().ok_or(Error::UnknownWindowSize)?;
        self.resize(size)?;
        Ok(true)
    }

    fn draw_welcome_message(&self, buf: &mut Vec<u8>) -> io::Result<()> {
        let msg = format!("TypeAway editor -- version {}", VERSION);
        let welcome = clip(&msg, self.num_cols);
        let padding = (self.num_cols - welcome.len()) / 2;
        if padding > 0 {
            buf.write_all(b"~")?;
            for _ in 0..padding - 1 {
                buf.write_all(b" ")?;
            }
        }
        buf.write_all(welcome.as_bytes())
    }

    fn draw_rows(&self, buf: &mut Vec<u8>, text: &TextBuffer) -> io::Result<()> {
        let rows = text.rows();
        let mut prev_color = Color::Reset;

        for y in 0..self.num_rows {
            let file_row = y + self.rowoff;

            // Move cursor to target line
            write!(buf, "\x1b[{}H", y + 1)?;

            if file_row >= rows.len() {
                if prev_color != Color::Reset {
                    buf.write_all(self.color.sequence(Color::Reset))?;
                    prev_color = Color::Reset;
                }
                if rows.is_empty() && y == self.num_rows / 3 {
                    self.draw_welcome_message(buf)?;
                } else {
                    buf.write_all(b"~")?;
                }
            } else {
                let row = &rows[file_row];
                let start = cmp::min(self.coloff, row.render().len());
                let end = cmp::min(self.coloff + self.num_cols, row.render().len());

                for (&b, hl) in row.render()[start..end]
                    .iter()
                    .zip(row.highlight()[start..end].iter())
                {
                    if b.is_ascii_control() {
                        // Draw control characters as '@' + byte ('^@', '^A', ...) or '?' in inverted color
                        let sym = if b <= 26 { b'@' + b } else { b'?' };
                        buf.write_all(self.color.sequence(Color::Invert))?;
                        buf.write_all(&[sym])?;
                        buf.write_all(self.color.sequence(Color::Reset))?;
                        if prev_color != Color::Reset {
                            buf.write_all(self.color.sequence(prev_color))?;
                        }
                        continue;
                    }

                    let color = hl.color();
                    if color != prev_color {
                        buf.write_all(self.color.sequence(color))?;
                        prev_color = color;
                    }
                    buf.write_all(&[b])?;
                }
            }

            // Erases the part of the line to the right of the cursor. http://vt100.net/docs/vt100-ug/chapter3.html#EL
            buf.write_all(b"\x1b[K")?;
        }

        if prev_color != Color::Reset {
            buf.write_all(self.color.sequence(Color::Reset))?; // Ensure to reset color at end of screen
        }

        Ok(())
    }

    fn draw_status_bar(&self, buf: &mut Vec<u8>, text: &TextBuffer) -> io::Result<()> {
        write!(buf, "\x1b[{}H", self.num_rows + 1)?;

        buf.write_all(self.color.sequence(Color::Invert))?;

        let bar = StatusBar::from_buffer(text);
        let left = bar.left();
        let left = clip(&left, self.num_cols);
        buf.write_all(left.as_bytes())?; // Left of status bar

        let rest_len = self.num_cols - left.len();
        let right = bar.right();
        if right.len() <= rest_len {
            for _ in 0..rest_len - right.len() {
                buf.write_all(b" ")?; // Add spaces at center of status bar
            }
            buf.write_all(right.as_bytes())?;
        } else {
            for _ in 0..rest_len {
                buf.write_all(b" ")?;
            }
        }

        buf.write_all(self.color.sequence(Color::Reset))
    }

    fn draw_message_bar(&self, buf: &mut Vec<u8>) -> io::Result<()> {
        write!(buf, "\x1b[{}H", self.num_rows + 2)?;
        if let Some(message) = &self.message {
            let visible = SystemTime::now()
                .duration_since(message.timestamp)
                .map(|d| d < self.message_timeout)
                .unwrap_or(true);
            if visible {
                let msg = clip(&message.text, self.num_cols);
                if message.kind == StatusMessageKind::Error {
                    buf.write_all(self.color.sequence(Color::RedBG))?;
                    buf.write_all(msg.as_bytes())?;
                    buf.write_all(self.color.sequence(Color::Reset))?;
                } else {
                    buf.write_all(msg.as_bytes())?;
                }
            }
        }
        buf.write_all(b"\x1b[K")
    }

    fn redraw(&mut self, text: &TextBuffer) -> io::Result<()> {
        let mut buf = Vec::with_capacity((self.num_rows + 2) * self.num_cols);

        // \x1b[: Escape sequence header
        // Hide cursor while updating screen. 'l' is command to set mode http://vt100.net/docs/vt100-ug/chapter3.html#SM
        buf.write_all(b"\x1b[?25l")?;
        // H: Command to move cursor. Here \x1b[H is the same as \x1b[1;1H
        buf.write_all(b"\x1b[H")?;

        self.draw_rows(&mut buf, text)?;
        self.draw_status_bar(&mut buf, text)?;
        self.draw_message_bar(&mut buf)?;

        // Move cursor
        let cursor_row = text.cy() - self.rowoff + 1;
        let cursor_col = self.rx - self.coloff + 1;
        write!(buf, "\x1b[{};{}H", cursor_row, cursor_col)?;

        // Reveal cursor again. 'h' is command to reset mode https://vt100.net/docs/vt100-ug/chapter3.html#RM
        buf.write_all(b"\x1b[?25h")?;

        self.output.write_all(&buf)?;
        self.output.flush()
    }

    fn do_scroll(&mut self, text: &TextBuffer) {
        let (cx, cy) = text.cursor();

        // Calculate X coordinate to render considering tab stop
        self.rx = text.rows().get(cy).map(|r| r.rx_from_cx(cx)).unwrap_or(0);

        // Adjust scroll position when cursor is outside screen
        if cy < self.rowoff {
            // Scroll up when cursor is above the top of window
            self.rowoff = cy;
        }
        if cy >= self.rowoff + self.num_rows {
            // Scroll down when cursor is below the bottom of screen
            self.rowoff = cy - self.num_rows + 1;
        }
        if self.rx < self.coloff {
            self.coloff = self.rx;
        }
        if self.rx >= self.coloff + self.num_cols {
            self.coloff = self.rx - self.num_cols + 1;
        }
    }

    pub fn refresh(&mut self, text: &TextBuffer) -> io::Result<()> {
        self.do_scroll(text);
        self.redraw(text)
    }

    pub fn clear(&mut self) -> io::Result<()> {
        // 2: Argument of 'J' command to reset entire screen
        // J: Command to erase screen http://vt100.net/docs/vt100-ug/chapter3.html#ED
        self.output.write_all(b"\x1b[2J")?;
        // Set cursor position to left-top corner
        self.output.write_all(b"\x1b[H")?;
        self.output.flush()
    }

    pub fn set_info_message<S: Into<String>>(&mut self, message: S) {
        self.message = Some(StatusMessage::new(message, StatusMessageKind::Info));
    }

    pub fn set_error_message<S: Into<String>>(&mut self, message: S) {
        self.message = Some(StatusMessage::new(message, StatusMessageKind::Error));
    }

    pub fn unset_message(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<(&str, StatusMessageKind)> {
        self.message.as_ref().map(|m| (m.text.as_str(), m.kind))
    }

    pub fn rows(&self) -> usize {
        self.num_rows
    }

    pub fn cols(&self) -> usize {
        self.num_cols
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}
