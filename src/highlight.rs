use crate::syntax::Syntax;
use crate::term_color::Color;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Highlight {
    Normal,
    Comment,
    Keyword1,
    Keyword2,
    String,
    Number,
    Match,
}

impl Highlight {
    pub fn color(self) -> Color {
        use Color::*;
        use Highlight::*;
        match self {
            Normal => Reset,
            Comment => Cyan,
            Keyword1 => Yellow,
            Keyword2 => Green,
            String => Purple,
            Number => Red,
            Match => Blue,
        }
    }
}

pub fn is_separator(b: u8) -> bool {
    // Vertical tab (\x0b) is whitespace as well
    b.is_ascii_whitespace() || b == 0x0b || b == b'\0' || b",.()+-/*=~%<>[];".contains(&b)
}

// Classify each byte of the rendered line. No state is carried over from the previous line so
// strings and comments never continue to the next row.
pub fn highlight_line(render: &[u8], syntax: Option<&Syntax>, out: &mut Vec<Highlight>) {
    out.clear();
    out.resize(render.len(), Highlight::Normal);

    let syntax = match syntax {
        Some(s) => s,
        None => return,
    };

    let mut prev_sep = true; // Start of line is a word boundary
    let mut in_string: Option<u8> = None;
    let mut i = 0;

    while i < render.len() {
        let c = render[i];
        let prev_hl = if i > 0 { out[i - 1] } else { Highlight::Normal };

        if let Some(leader) = syntax.line_comment {
            if in_string.is_none() && render[i..].starts_with(leader.as_bytes()) {
                for hl in out[i..].iter_mut() {
                    *hl = Highlight::Comment;
                }
                break;
            }
        }

        if syntax.string {
            if let Some(quote) = in_string {
                out[i] = Highlight::String;
                if c == b'\\' && i + 1 < render.len() {
                    // Escaped character never closes the string
                    out[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                out[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if syntax.number
            && (c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number)
                || c == b'.' && prev_hl == Highlight::Number)
        {
            out[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            if let Some((len, hl)) = syntax.keyword_at(&render[i..]) {
                for out in out[i..i + len].iter_mut() {
                    *out = hl;
                }
                i += len;
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }
}
