use crate::highlight::{self, Highlight};
use crate::syntax::Syntax;

pub const TAB_STOP: usize = 8;

// One line of text. `render` and `hl` are derived from `chars` and are updated within every method
// which modifies `chars`, so they are never stale.
#[derive(Default, Debug, Clone)]
pub struct Row {
    chars: Vec<u8>,
    render: Vec<u8>,
    hl: Vec<Highlight>, // One item per byte of `render`
}

impl Row {
    pub fn new<B: Into<Vec<u8>>>(line: B, syntax: Option<&Syntax>) -> Row {
        let mut row = Row {
            chars: line.into(),
            render: vec![],
            hl: vec![],
        };
        row.update(syntax);
        row
    }

    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    pub fn render(&self) -> &[u8] {
        &self.render
    }

    pub fn highlight(&self) -> &[Highlight] {
        &self.hl
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    fn update_render(&mut self) {
        let tabs = self.chars.iter().filter(|&&b| b == b'\t').count();
        self.render.clear();
        self.render.reserve(self.chars.len() + tabs * (TAB_STOP - 1));
        for &b in self.chars.iter() {
            if b == b'\t' {
                self.render.push(b' ');
                while self.render.len() % TAB_STOP != 0 {
                    self.render.push(b' ');
                }
            } else {
                self.render.push(b);
            }
        }
    }

    fn update(&mut self, syntax: Option<&Syntax>) {
        self.update_render();
        self.rehighlight(syntax);
    }

    // Necessary when syntax is changed without modifying the text
    pub fn rehighlight(&mut self, syntax: Option<&Syntax>) {
        highlight::highlight_line(&self.render, syntax, &mut self.hl);
    }

    pub fn rx_from_cx(&self, cx: usize) -> usize {
        self.chars.iter().take(cx).fold(0, |rx, &b| {
            if b == b'\t' {
                // Proceed TAB_STOP spaces then subtract spaces by mod TAB_STOP
                rx + TAB_STOP - (rx % TAB_STOP)
            } else {
                rx + 1
            }
        })
    }

    pub fn cx_from_rx(&self, rx: usize) -> usize {
        let mut current_rx = 0;
        for (cx, &b) in self.chars.iter().enumerate() {
            if b == b'\t' {
                current_rx += TAB_STOP - (current_rx % TAB_STOP);
            } else {
                current_rx += 1;
            }
            if current_rx > rx {
                return cx; // Found
            }
        }
        self.chars.len() // Fall back to end of line
    }

    // Note: 'at' is an index of `chars`, not render text
    pub fn insert_char(&mut self, at: usize, c: u8, syntax: Option<&Syntax>) {
        if self.chars.len() <= at {
            self.chars.push(c);
        } else {
            self.chars.insert(at, c);
        }
        self.update(syntax);
    }

    pub fn delete_char(&mut self, at: usize, syntax: Option<&Syntax>) {
        if at < self.chars.len() {
            self.chars.remove(at);
            self.update(syntax);
        }
    }

    pub fn append(&mut self, s: &[u8], syntax: Option<&Syntax>) {
        self.chars.extend_from_slice(s);
        self.update(syntax);
    }

    // Truncate this row at `at` and return the rest
    pub fn split_off(&mut self, at: usize, syntax: Option<&Syntax>) -> Vec<u8> {
        let at = at.min(self.chars.len());
        let rest = self.chars.split_off(at);
        self.update(syntax);
        rest
    }

    // Overwrite highlights of render[start..end] with Match and return the previous highlights so
    // that the caller can put them back by restore_highlight()
    pub fn highlight_match(&mut self, start: usize, end: usize) -> Vec<Highlight> {
        let saved = self.hl.clone();
        let end = end.min(self.hl.len());
        if start < end {
            for hl in self.hl[start..end].iter_mut() {
                *hl = Highlight::Match;
            }
        }
        saved
    }

    pub fn restore_highlight(&mut self, saved: Vec<Highlight>) {
        debug_assert_eq!(saved.len(), self.render.len());
        if saved.len() == self.render.len() {
            self.hl = saved;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariants(row: &Row) {
        assert!(row.render().len() >= row.chars().len());
        assert_eq!(row.highlight().len(), row.render().len());
    }

    #[test]
    fn tab_expands_to_next_tab_stop() {
        let mut row = Row::default();
        row.insert_char(0, b'\t', None);
        assert_eq!(row.render(), b"        ");
        assert_invariants(&row);

        let row = Row::new("ab\tc", None);
        assert_eq!(row.render(), b"ab      c");
        assert_eq!(row.rx_from_cx(2), 2);
        assert_eq!(row.rx_from_cx(3), 8);
        assert_eq!(row.rx_from_cx(4), 9);
        assert_invariants(&row);
    }

    #[test]
    fn tab_at_tab_stop_is_full_width() {
        let row = Row::new("12345678\tx", None);
        assert_eq!(row.render().len(), 17);
        assert_eq!(row.rx_from_cx(9), 16);
    }

    #[test]
    fn render_x_to_char_x() {
        let row = Row::new("\tab", None);
        assert_eq!(row.cx_from_rx(0), 0);
        assert_eq!(row.cx_from_rx(7), 0);
        assert_eq!(row.cx_from_rx(8), 1);
        assert_eq!(row.cx_from_rx(9), 2);
        assert_eq!(row.cx_from_rx(100), 3);
    }

    #[test]
    fn mutations_keep_render_in_sync() {
        let c = Syntax::detect("a.c");
        let mut row = Row::new("it", c);
        row.insert_char(1, b'n', c);
        assert_eq!(row.chars(), b"int");
        assert_eq!(row.highlight(), &[Highlight::Keyword2; 3]);
        assert_invariants(&row);

        row.insert_char(100, b'\t', c);
        assert_eq!(row.render(), b"int     ");
        assert_invariants(&row);

        row.delete_char(3, c);
        row.delete_char(0, c);
        assert_eq!(row.chars(), b"nt");
        assert_eq!(row.highlight(), &[Highlight::Normal; 2]);
        assert_invariants(&row);

        row.delete_char(10, c);
        assert_eq!(row.chars(), b"nt");

        row.append(b"\t1", c);
        assert_eq!(row.render(), b"nt      1");
        assert_eq!(row.highlight()[8], Highlight::Number);
        assert_invariants(&row);
    }

    #[test]
    fn split_off_returns_rest() {
        let mut row = Row::new("int x", Syntax::detect("a.c"));
        let rest = row.split_off(3, Syntax::detect("a.c"));
        assert_eq!(rest, b" x");
        assert_eq!(row.chars(), b"int");
        assert_invariants(&row);

        let rest = row.split_off(10, None);
        assert!(rest.is_empty());
        assert_eq!(row.chars(), b"int");
    }

    #[test]
    fn match_highlight_is_restorable() {
        let c = Syntax::detect("a.c");
        let mut row = Row::new("int abc;", c);
        let before = row.highlight().to_vec();

        let saved = row.highlight_match(4, 7);
        assert_eq!(row.highlight()[4..7], [Highlight::Match; 3]);
        assert_eq!(row.highlight()[..3], [Highlight::Keyword2; 3]);

        row.restore_highlight(saved);
        assert_eq!(row.highlight(), &before[..]);
    }
}
