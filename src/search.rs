use crate::error::Result;
use crate::highlight::Highlight;
use crate::input::KeySeq;
use crate::prompt::{Action, Prompt, PromptResult};
use std::io::Write;

#[derive(Clone, Copy, PartialEq, Debug)]
enum FindDir {
    Back,
    Forward,
}

impl FindDir {
    // Next row index with wraparound at both ends
    fn advance(self, y: usize, len: usize) -> usize {
        match self {
            FindDir::Forward => (y + 1) % len,
            FindDir::Back if y == 0 => len - 1,
            FindDir::Back => y - 1,
        }
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

// Incremental search running as an observer of the find prompt
pub struct TextSearch {
    saved_cursor: (usize, usize),
    saved_offset: (usize, usize),
    dir: FindDir,
    last_match: Option<usize>,
    // Row index and its highlights before they were overwritten by Highlight::Match
    saved_hl: Option<(usize, Vec<Highlight>)>,
}

impl TextSearch {
    fn restore_highlight<W: Write>(&mut self, prompt: &mut Prompt<'_, W>) {
        if let Some((y, hl)) = self.saved_hl.take() {
            if let Some(row) = prompt.buf.rows_mut().get_mut(y) {
                row.restore_highlight(hl);
            }
        }
    }

    fn handle_key(&mut self, key: KeySeq) {
        use KeySeq::*;
        match key {
            RightKey | DownKey => self.dir = FindDir::Forward,
            LeftKey | UpKey => self.dir = FindDir::Back,
            _ => {
                // Query was changed. Restart from the cursor
                self.last_match = None;
                self.dir = FindDir::Forward;
            }
        }
        if self.last_match.is_none() {
            self.dir = FindDir::Forward;
        }
    }

    fn search<W: Write>(&mut self, query: &str, prompt: &mut Prompt<'_, W>) {
        let len = prompt.buf.rows().len();
        if len == 0 {
            return;
        }

        let mut y = match self.last_match {
            Some(y) => self.dir.advance(y, len),
            None if prompt.buf.cy() < len => prompt.buf.cy(),
            None => 0,
        };

        for _ in 0..len {
            let row = &mut prompt.buf.rows_mut()[y];
            if let Some(rx) = find_bytes(row.render(), query.as_bytes()) {
                let cx = row.cx_from_rx(rx);
                let saved = row.highlight_match(rx, rx + query.len());
                self.saved_hl = Some((y, saved));
                self.last_match = Some(y);
                prompt.buf.set_cursor(cx, y);
                // Cause the next scroll to put the matched line at top of screen
                prompt.screen.rowoff = len;
                tracing::debug!(row = y, col = cx, "search hit");
                return;
            }
            y = self.dir.advance(y, len);
        }
    }
}

impl Action for TextSearch {
    fn new<W: Write>(prompt: &mut Prompt<'_, W>) -> Self {
        Self {
            saved_cursor: prompt.buf.cursor(),
            saved_offset: (prompt.screen.rowoff, prompt.screen.coloff),
            dir: FindDir::Forward,
            last_match: None,
            saved_hl: None,
        }
    }

    fn on_key<W: Write>(
        &mut self,
        prompt: &mut Prompt<'_, W>,
        input: &str,
        key: KeySeq,
    ) -> Result<()> {
        self.restore_highlight(prompt);

        if let KeySeq::Key(b'\r') | KeySeq::Key(0x1b) = key {
            self.last_match = None;
            self.dir = FindDir::Forward;
            return Ok(());
        }

        self.handle_key(key);
        if !input.is_empty() {
            self.search(input, prompt);
        }
        Ok(())
    }

    fn on_end<W: Write>(
        mut self,
        prompt: &mut Prompt<'_, W>,
        result: PromptResult,
    ) -> Result<PromptResult> {
        self.restore_highlight(prompt);

        if result == PromptResult::Canceled {
            let (cx, cy) = self.saved_cursor;
            prompt.buf.set_cursor(cx, cy);
            let (rowoff, coloff) = self.saved_offset;
            prompt.screen.rowoff = rowoff;
            prompt.screen.coloff = coloff;
        }

        Ok(result)
    }
}
