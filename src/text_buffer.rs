use crate::error::{Error, Result};
use crate::row::Row;
use crate::syntax::Syntax;
use std::cmp;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::slice;

// Contain both actual path sequence and display string
pub struct FilePath {
    pub path: PathBuf,
    pub display: String,
}

impl FilePath {
    fn from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        FilePath {
            path: PathBuf::from(path),
            display: path.to_string_lossy().to_string(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum CursorDir {
    Left,
    Right,
    Up,
    Down,
}

pub struct Lines<'a>(slice::Iter<'a, Row>);

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|r| r.chars())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.as_slice().len();
        (len, Some(len))
    }
}

pub struct TextBuffer {
    // (x, y) coordinate in `chars` of rows. cy == rows.len() means the line after end of buffer
    cx: usize,
    cy: usize,
    // File editor is opening
    file: Option<FilePath>,
    // Lines of text buffer
    row: Vec<Row>,
    // Number of modifications since the buffer was loaded or saved
    dirty: usize,
    syntax: Option<&'static Syntax>,
}

impl TextBuffer {
    pub fn empty() -> Self {
        Self {
            cx: 0,
            cy: 0,
            file: None,
            row: vec![],
            dirty: 0,
            syntax: None,
        }
    }

    pub fn with_lines<B: AsRef<[u8]>, I: IntoIterator<Item = B>>(lines: I) -> Self {
        let mut buf = Self::empty();
        buf.row = lines
            .into_iter()
            .map(|l| Row::new(l.as_ref(), None))
            .collect();
        buf
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let open_error = |source| Error::Open {
            path: path.to_path_buf(),
            source,
        };

        let syntax = Syntax::detect(path);
        let file = File::open(path).map_err(open_error)?;
        let mut row = vec![];
        for line in BufReader::new(file).split(b'\n') {
            let mut line = line.map_err(open_error)?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            row.push(Row::new(line, syntax));
        }

        Ok(Self {
            cx: 0,
            cy: 0,
            file: Some(FilePath::from(path)),
            row,
            dirty: 0,
            syntax,
        })
    }

    // Returns the number of bytes written. Failure does not affect the buffer content and dirty
    // counter
    pub fn save(&mut self) -> io::Result<usize> {
        let file = match &self.file {
            Some(file) => file,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    "file name is not set",
                ))
            }
        };

        // File::create() truncates existing file
        let mut f = BufWriter::new(File::create(&file.path)?);
        let mut bytes = 0;
        for row in self.row.iter() {
            let b = row.chars();
            f.write_all(b)?;
            f.write_all(b"\n")?;
            bytes += b.len() + 1;
        }
        f.flush()?;

        self.dirty = 0;
        Ok(bytes)
    }

    pub fn set_file<S: Into<String>>(&mut self, name: S) {
        let file = FilePath::from(name.into());
        self.syntax = Syntax::detect(&file.path);
        self.file = Some(file);
        for row in self.row.iter_mut() {
            row.rehighlight(self.syntax);
        }
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn filename(&self) -> &str {
        self.file
            .as_ref()
            .map(|f| f.display.as_str())
            .unwrap_or("[No Name]")
    }

    pub fn syntax(&self) -> Option<&'static Syntax> {
        self.syntax
    }

    pub fn rows(&self) -> &[Row] {
        &self.row
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.row
    }

    pub fn lines(&self) -> Lines<'_> {
        Lines(self.row.iter())
    }

    pub fn cx(&self) -> usize {
        self.cx
    }

    pub fn cy(&self) -> usize {
        self.cy
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cx, self.cy)
    }

    pub fn set_cursor(&mut self, x: usize, y: usize) {
        self.cy = cmp::min(y, self.row.len());
        self.cx = cmp::min(x, self.current_row_len());
    }

    pub fn dirty(&self) -> usize {
        self.dirty
    }

    pub fn modified(&self) -> bool {
        self.dirty > 0
    }

    fn current_row_len(&self) -> usize {
        self.row.get(self.cy).map(Row::len).unwrap_or(0)
    }

    // Primitive row operations. They do not move the cursor

    fn insert_row<B: Into<Vec<u8>>>(&mut self, at: usize, line: B) {
        if at > self.row.len() {
            return;
        }
        self.row.insert(at, Row::new(line, self.syntax));
        self.dirty += 1;
    }

    fn delete_row(&mut self, at: usize) -> Option<Row> {
        if at >= self.row.len() {
            return None;
        }
        self.dirty += 1;
        Some(self.row.remove(at))
    }

    fn split_row(&mut self, y: usize, at: usize) {
        let rest = self.row[y].split_off(at, self.syntax);
        self.insert_row(y + 1, rest);
    }

    fn join_with_next_row(&mut self, y: usize) {
        if let Some(next) = self.delete_row(y + 1) {
            self.row[y].append(next.chars(), self.syntax);
            self.dirty += 1;
        }
    }

    // Editor operations

    pub fn insert_char(&mut self, c: u8) {
        if self.cy == self.row.len() {
            self.insert_row(self.row.len(), "");
        }
        self.row[self.cy].insert_char(self.cx, c, self.syntax);
        self.cx += 1;
        self.dirty += 1;
    }

    pub fn insert_line(&mut self) {
        if self.cx == 0 {
            self.insert_row(self.cy, "");
        } else {
            self.split_row(self.cy, self.cx);
        }
        self.cy += 1;
        self.cx = 0;
    }

    // Backspace
    pub fn delete_char(&mut self) {
        if self.cy == self.row.len() || self.cx == 0 && self.cy == 0 {
            return;
        }
        if self.cx > 0 {
            self.row[self.cy].delete_char(self.cx - 1, self.syntax);
            self.cx -= 1;
            self.dirty += 1;
        } else {
            // At top of line, backspace concats current line to previous line
            self.cx = self.row[self.cy - 1].len();
            self.join_with_next_row(self.cy - 1);
            self.cy -= 1;
        }
    }

    pub fn delete_right_char(&mut self) {
        self.move_cursor_one(CursorDir::Right);
        self.delete_char();
    }

    pub fn move_cursor_one(&mut self, dir: CursorDir) {
        match dir {
            CursorDir::Up => self.cy = self.cy.saturating_sub(1),
            CursorDir::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    // When moving to left at top of line, move cursor to end of previous line
                    self.cy -= 1;
                    self.cx = self.row[self.cy].len();
                }
            }
            CursorDir::Down => {
                // Allow to move cursor until next line to the last line of file to enable to add a
                // new line at the end.
                if self.cy < self.row.len() {
                    self.cy += 1;
                }
            }
            CursorDir::Right => {
                if self.cy < self.row.len() {
                    let len = self.row[self.cy].len();
                    if self.cx < len {
                        // Allow to move cursor until next col to the last col of line to enable to
                        // add a new character at the end of line.
                        self.cx += 1;
                    } else {
                        // When moving to right at the end of line, move cursor to top of next line.
                        self.cy += 1;
                        self.cx = 0;
                    }
                }
            }
        };

        // Snap cursor to end of line when moving up/down from longer line
        let len = self.current_row_len();
        if self.cx > len {
            self.cx = len;
        }
    }

    pub fn move_cursor_page(&mut self, dir: CursorDir, rowoff: usize, num_rows: usize) {
        match dir {
            CursorDir::Up => {
                self.cy = rowoff; // Set cursor to top of screen
                for _ in 0..num_rows {
                    self.move_cursor_one(CursorDir::Up);
                }
            }
            CursorDir::Down => {
                // Set cursor to bottom of screen considering end of buffer
                self.cy = cmp::min((rowoff + num_rows).saturating_sub(1), self.row.len());
                for _ in 0..num_rows {
                    self.move_cursor_one(CursorDir::Down);
                }
            }
            CursorDir::Left | CursorDir::Right => {}
        }
    }

    pub fn move_cursor_to_line_edge(&mut self, dir: CursorDir) {
        match dir {
            CursorDir::Left => self.cx = 0,
            CursorDir::Right => self.cx = self.current_row_len(),
            CursorDir::Up | CursorDir::Down => {}
        }
    }
}
