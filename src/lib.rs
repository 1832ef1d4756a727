// Refs:
//   Build Your Own Text Editor: https://viewsourcecode.org/snaptoken/kilo/index.html
//   VT100 User Guide: https://vt100.net/docs/vt100-ug/chapter3.html

mod config;
mod editor;
mod error;
mod highlight;
mod input;
mod prompt;
mod row;
mod screen;
mod search;
mod signal;
mod status_bar;
mod syntax;
mod term_color;
mod text_buffer;

#[cfg(test)]
mod ui_test;

pub use config::Config;
pub use editor::Editor;
pub use error::{Error, Result};
pub use highlight::Highlight;
pub use input::{ctrl_key, InputSequences, KeySeq, StdinRawMode};
pub use row::Row;
pub use screen::{Screen, StatusMessageKind, HELP, VERSION};
pub use syntax::{Syntax, SYNTAXES};
pub use term_color::TermColor;
pub use text_buffer::{Lines, TextBuffer};
