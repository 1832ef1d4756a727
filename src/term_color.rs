use std::env;
use term::terminfo::TermInfo;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Color {
    Reset,
    Red,
    Green,
    Yellow,
    Blue,
    Purple,
    Cyan,
    RedBG,
    Invert,
}

// Color depth the terminal supports
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TermColor {
    TrueColor,
    Extended256,
    Only16,
}

// SGR sequences. Columns are 16 colors, 256 colors and 24bit colors
//   https://vt100.net/docs/vt100-ug/chapter3.html#SGR
//   https://en.wikipedia.org/wiki/ANSI_escape_code#Colors
const RESET: &[u8] = b"\x1b[39;0m";
const INVERT: &[u8] = b"\x1b[7m";
const RED: [&[u8]; 3] = [b"\x1b[31m", b"\x1b[38;5;203m", b"\x1b[38;2;230;90;80m"];
const GREEN: [&[u8]; 3] = [b"\x1b[32m", b"\x1b[38;5;114m", b"\x1b[38;2;140;190;110m"];
const YELLOW: [&[u8]; 3] = [b"\x1b[33m", b"\x1b[38;5;221m", b"\x1b[38;2;235;195;100m"];
const BLUE: [&[u8]; 3] = [b"\x1b[34m", b"\x1b[38;5;75m", b"\x1b[38;2;95;160;230m"];
const PURPLE: [&[u8]; 3] = [b"\x1b[35m", b"\x1b[38;5;176m", b"\x1b[38;2;200;130;210m"];
const CYAN: [&[u8]; 3] = [b"\x1b[36m", b"\x1b[38;5;73m", b"\x1b[38;2;90;180;180m"];
const RED_BG: [&[u8]; 3] = [b"\x1b[41m", b"\x1b[48;5;160m", b"\x1b[48;2;190;40;40m"];

impl TermColor {
    pub fn from_env() -> TermColor {
        if let Ok(v) = env::var("COLORTERM") {
            if v == "truecolor" || v == "24bit" {
                return TermColor::TrueColor;
            }
        }
        match TermInfo::from_env().map(|info| info.numbers.get("colors").copied()) {
            Ok(Some(colors)) if colors >= 256 => TermColor::Extended256,
            _ => TermColor::Only16,
        }
    }

    fn column(self) -> usize {
        match self {
            TermColor::Only16 => 0,
            TermColor::Extended256 => 1,
            TermColor::TrueColor => 2,
        }
    }

    pub fn sequence(self, color: Color) -> &'static [u8] {
        let table = match color {
            Color::Reset => return RESET,
            Color::Invert => return INVERT,
            Color::Red => RED,
            Color::Green => GREEN,
            Color::Yellow => YELLOW,
            Color::Blue => BLUE,
            Color::Purple => PURPLE,
            Color::Cyan => CYAN,
            Color::RedBG => RED_BG,
        };
        table[self.column()]
    }
}
