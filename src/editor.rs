use crate::config::Config;
use crate::error::Result;
use crate::input::{ctrl_key, KeySeq};
use crate::prompt::{NoAction, Prompt, PromptResult};
use crate::screen::Screen;
use crate::search::TextSearch;
use crate::text_buffer::{CursorDir, Lines, TextBuffer};
use std::io::Write;
use std::path::Path;

pub struct Editor<I: Iterator<Item = Result<KeySeq>>, W: Write> {
    input: I, // Escape sequences stream represented as Iterator
    screen: Screen<W>,
    buf: TextBuffer,
    config: Config,
    // Remaining Ctrl-Q presses to quit while buffer has unsaved changes
    quit_times: usize,
}

impl<I, W> Editor<I, W>
where
    I: Iterator<Item = Result<KeySeq>>,
    W: Write,
{
    fn with_buf(
        buf: TextBuffer,
        input: I,
        output: W,
        window_size: (usize, usize),
        config: Config,
    ) -> Result<Editor<I, W>> {
        let screen = Screen::new(window_size, output, &config)?;
        tracing::info!(
            cols = window_size.0,
            rows = window_size.1,
            file = buf.filename(),
            lines = buf.rows().len(),
            syntax = buf.syntax().map(|s| s.name).unwrap_or("none"),
            "editor started"
        );
        Ok(Editor {
            input,
            screen,
            buf,
            quit_times: config.quit_times,
            config,
        })
    }

    pub fn new(
        input: I,
        output: W,
        window_size: (usize, usize),
        config: Config,
    ) -> Result<Editor<I, W>> {
        Self::with_buf(TextBuffer::empty(), input, output, window_size, config)
    }

    pub fn with_lines<B: AsRef<[u8]>, L: IntoIterator<Item = B>>(
        lines: L,
        input: I,
        output: W,
        window_size: (usize, usize),
        config: Config,
    ) -> Result<Editor<I, W>> {
        let buf = TextBuffer::with_lines(lines);
        Self::with_buf(buf, input, output, window_size, config)
    }

    pub fn open<P: AsRef<Path>>(
        path: P,
        input: I,
        output: W,
        window_size: (usize, usize),
        config: Config,
    ) -> Result<Editor<I, W>> {
        let buf = TextBuffer::open(path)?;
        Self::with_buf(buf, input, output, window_size, config)
    }

    // Watch SIGWINCH to follow window size changes
    pub fn watch_resize(&mut self) -> Result<()> {
        self.screen.watch_resize()
    }

    fn prompt<S: AsRef<str>>(&mut self, prompt: S) -> Result<PromptResult> {
        Prompt::new(&mut self.screen, &mut self.buf).run::<NoAction, _, _>(prompt, &mut self.input)
    }

    fn save(&mut self) -> Result<()> {
        if !self.buf.has_file() {
            match self.prompt("Save as: {} (ESC to cancel)")? {
                PromptResult::Input(input) => self.buf.set_file(input),
                PromptResult::Canceled => {
                    self.screen.set_info_message("Save aborted");
                    return Ok(());
                }
            }
        }

        match self.buf.save() {
            Ok(bytes) => {
                tracing::info!(file = self.buf.filename(), bytes, "saved");
                self.screen
                    .set_info_message(format!("{} bytes written to disk", bytes));
            }
            Err(err) => {
                tracing::warn!(file = self.buf.filename(), %err, "could not save");
                self.screen
                    .set_error_message(format!("Can't save! I/O error: {}", err));
            }
        }

        Ok(())
    }

    fn find(&mut self) -> Result<()> {
        let prompt = "Search: {} (Use ESC/Arrows/Enter)";
        Prompt::new(&mut self.screen, &mut self.buf)
            .run::<TextSearch, _, _>(prompt, &mut self.input)?;
        Ok(())
    }

    // Returns true when the editor should quit
    fn handle_quit(&mut self) -> bool {
        if !self.buf.modified() || self.quit_times == 0 {
            return true;
        }
        self.screen.set_error_message(format!(
            "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
            self.quit_times,
        ));
        self.quit_times -= 1;
        false
    }

    fn handle_not_mapped(&mut self, key: KeySeq) {
        tracing::debug!(%key, "key not mapped");
        self.screen
            .set_error_message(format!("Key '{}' not mapped", key));
    }

    fn process_keypress(&mut self, key: KeySeq) -> Result<bool> {
        use KeySeq::*;

        let rowoff = self.screen.rowoff;
        let rows = self.screen.rows();

        match key {
            Unidentified => return Ok(false),
            Key(b) if b == ctrl_key(b'q') => return Ok(self.handle_quit()),
            Key(b) if b == ctrl_key(b's') => self.save()?,
            Key(b) if b == ctrl_key(b'f') => self.find()?,
            Key(b) if b == ctrl_key(b'h') || b == 0x7f => self.buf.delete_char(),
            Key(b) if b == ctrl_key(b'l') || b == 0x1b => {} // Screen is redrawn after every key
            Key(b'\r') => self.buf.insert_line(),
            Key(b) if b == b'\t' || !b.is_ascii_control() => self.buf.insert_char(b),
            Key(_) => self.handle_not_mapped(key),
            UpKey => self.buf.move_cursor_one(CursorDir::Up),
            LeftKey => self.buf.move_cursor_one(CursorDir::Left),
            DownKey => self.buf.move_cursor_one(CursorDir::Down),
            RightKey => self.buf.move_cursor_one(CursorDir::Right),
            PageUpKey => self.buf.move_cursor_page(CursorDir::Up, rowoff, rows),
            PageDownKey => self.buf.move_cursor_page(CursorDir::Down, rowoff, rows),
            HomeKey => self.buf.move_cursor_to_line_edge(CursorDir::Left),
            EndKey => self.buf.move_cursor_to_line_edge(CursorDir::Right),
            DeleteKey => self.buf.delete_right_char(),
        }

        self.quit_times = self.config.quit_times;
        Ok(false)
    }

    pub fn edit(&mut self) -> Result<()> {
        self.screen.refresh(&self.buf)?; // First paint

        while let Some(seq) = self.input.next() {
            let key = seq?;
            if key == KeySeq::Unidentified {
                if self.screen.maybe_resize()? {
                    self.screen.refresh(&self.buf)?;
                }
                continue;
            }

            if self.process_keypress(key)? {
                tracing::info!(modified = self.buf.modified(), "quit");
                self.screen.clear()?;
                break;
            }

            self.screen.refresh(&self.buf)?;
        }

        Ok(())
    }

    pub fn buf(&self) -> &TextBuffer {
        &self.buf
    }

    pub fn lines(&self) -> Lines<'_> {
        self.buf.lines()
    }

    pub fn screen(&self) -> &'_ Screen<W> {
        &self.screen
    }
}
