use crate::text_buffer::TextBuffer;

pub struct StatusBar<'a> {
    pub filename: &'a str,
    pub modified: bool,
    pub syntax: Option<&'static str>,
    pub line_pos: (usize, usize),
}

impl<'a> StatusBar<'a> {
    pub fn from_buffer(buf: &'a TextBuffer) -> Self {
        Self {
            filename: buf.filename(),
            modified: buf.modified(),
            syntax: buf.syntax().map(|s| s.name),
            line_pos: (buf.cy() + 1, buf.rows().len()),
        }
    }

    pub fn left(&self) -> String {
        format!(
            "{:.20} - {} lines {}",
            self.filename,
            self.line_pos.1,
            if self.modified { "(modified)" } else { "" }
        )
    }

    pub fn right(&self) -> String {
        let (y, len) = self.line_pos;
        format!("{} | {}/{}", self.syntax.unwrap_or("no ft"), y, len)
    }
}
