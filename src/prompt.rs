use crate::error::Result;
use crate::input::{ctrl_key, KeySeq};
use crate::screen::Screen;
use crate::text_buffer::TextBuffer;
use std::io::Write;

#[derive(PartialEq, Debug)]
pub enum PromptResult {
    Canceled,
    Input(String),
}

// Observer of a prompt session. It is notified exactly once per key with the current input
// Sized is necessary to move self
pub trait Action: Sized {
    fn new<W: Write>(prompt: &mut Prompt<'_, W>) -> Self;

    fn on_key<W: Write>(
        &mut self,
        _prompt: &mut Prompt<'_, W>,
        _input: &str,
        _key: KeySeq,
    ) -> Result<()> {
        Ok(())
    }

    fn on_end<W: Write>(
        self, // Note: Consumes self
        _prompt: &mut Prompt<'_, W>,
        result: PromptResult,
    ) -> Result<PromptResult> {
        Ok(result)
    }
}

pub struct NoAction;
impl Action for NoAction {
    fn new<W: Write>(_prompt: &mut Prompt<'_, W>) -> Self {
        Self
    }
}

// Message template such as "Save as: {} (ESC to cancel)". "{}" is replaced with the input
struct PromptTemplate<'a> {
    prefix: &'a str,
    suffix: &'a str,
}

impl<'a> PromptTemplate<'a> {
    fn parse(template: &'a str) -> Self {
        let (prefix, suffix) = template.split_once("{}").unwrap_or((template, ""));
        Self { prefix, suffix }
    }

    fn build(&self, input: &str) -> String {
        let cap = self.prefix.len() + self.suffix.len() + input.len();
        let mut buf = String::with_capacity(cap);
        buf.push_str(self.prefix);
        buf.push_str(input);
        buf.push_str(self.suffix);
        buf
    }
}

pub struct Prompt<'a, W: Write> {
    pub(crate) screen: &'a mut Screen<W>,
    pub(crate) buf: &'a mut TextBuffer,
}

impl<'a, W: Write> Prompt<'a, W> {
    pub fn new(screen: &'a mut Screen<W>, buf: &'a mut TextBuffer) -> Self {
        Self { screen, buf }
    }

    fn render_screen(&mut self, input: &str, template: &PromptTemplate<'_>) -> Result<()> {
        self.screen.set_info_message(template.build(input));
        self.screen.refresh(self.buf)?;
        Ok(())
    }

    pub fn run<A, S, I>(&mut self, template: S, input: I) -> Result<PromptResult>
    where
        A: Action,
        S: AsRef<str>,
        I: Iterator<Item = Result<KeySeq>>,
    {
        let mut action = A::new(self);
        let mut buf = String::new();
        let template = PromptTemplate::parse(template.as_ref());

        self.render_screen(&buf, &template)?;

        for seq in input {
            use KeySeq::*;

            let key = seq?;
            match key {
                Unidentified => {
                    if self.screen.maybe_resize()? {
                        self.render_screen(&buf, &template)?;
                    }
                    continue;
                }
                Key(b) if b == 0x7f || b == ctrl_key(b'h') => {
                    buf.pop();
                }
                DeleteKey => {
                    buf.pop();
                }
                Key(0x1b) => {
                    self.screen.unset_message();
                    action.on_key(self, &buf, key)?;
                    tracing::debug!("prompt canceled");
                    return action.on_end(self, PromptResult::Canceled);
                }
                Key(b'\r') if !buf.is_empty() => {
                    self.screen.unset_message();
                    action.on_key(self, &buf, key)?;
                    return action.on_end(self, PromptResult::Input(buf));
                }
                Key(b) if b.is_ascii() && !b.is_ascii_control() => buf.push(b as char),
                _ => {}
            }

            action.on_key(self, &buf, key)?;
            self.render_screen(&buf, &template)?;
        }

        // Input stream was closed in the middle of prompt
        self.screen.unset_message();
        action.on_end(self, PromptResult::Canceled)
    }
}
