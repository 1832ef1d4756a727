use crate::config::Config;
use crate::editor::Editor;
use crate::error::Result;
use crate::highlight::Highlight;
use crate::input::{ctrl_key, KeySeq};
use crate::screen::{StatusMessageKind, HELP};
use std::fs;
use std::io::{self, Write};

use KeySeq::*;

struct DummyInputs(Vec<KeySeq>);

impl Iterator for DummyInputs {
    type Item = Result<KeySeq>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            Some(Ok(self.0.remove(0)))
        }
    }
}

struct Discard;

impl Write for Discard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn key(c: char) -> KeySeq {
    Key(c as u8)
}

fn ctrl(c: char) -> KeySeq {
    Key(ctrl_key(c as u8))
}

fn text(s: &str) -> impl Iterator<Item = KeySeq> + '_ {
    s.bytes().map(Key)
}

const ENTER: KeySeq = Key(b'\r');
const ESC: KeySeq = Key(0x1b);
const BACKSPACE: KeySeq = Key(0x7f);

fn run_empty(keys: Vec<KeySeq>) -> Editor<DummyInputs, Discard> {
    let mut editor =
        Editor::new(DummyInputs(keys), Discard, (80, 24), Config::default()).unwrap();
    editor.edit().unwrap();
    editor
}

fn run_with_lines(lines: &[&str], keys: Vec<KeySeq>) -> Editor<DummyInputs, Discard> {
    let mut editor = Editor::with_lines(
        lines,
        DummyInputs(keys),
        Discard,
        (80, 24),
        Config::default(),
    )
    .unwrap();
    editor.edit().unwrap();
    editor
}

fn lines<I: Iterator<Item = Result<KeySeq>>, W: Write>(editor: &Editor<I, W>) -> Vec<String> {
    editor
        .lines()
        .map(|l| String::from_utf8_lossy(l).into_owned())
        .collect()
}

fn message<I: Iterator<Item = Result<KeySeq>>, W: Write>(
    editor: &Editor<I, W>,
) -> (String, StatusMessageKind) {
    let (text, kind) = editor.screen().message().unwrap();
    (text.to_string(), kind)
}

#[test]
fn test_empty_buffer() {
    let editor = run_empty(vec![ctrl('q')]);

    assert!(editor.screen().rows() > 0);
    assert!(editor.screen().cols() > 0);
    assert!(lines(&editor).is_empty());
    assert_eq!(message(&editor).0, HELP);
}

#[test]
fn test_write_then_backspace() {
    let editor = run_empty(vec![key('a'), key('b'), key('c'), BACKSPACE]);
    assert_eq!(lines(&editor), vec!["ab"]);
    assert_eq!(editor.buf().cursor(), (2, 0));
    assert!(editor.buf().modified());
}

#[test]
fn test_move_cursor_down() {
    let editor = run_empty(vec![key('a'), DownKey, key('b'), DownKey, key('c')]);
    assert_eq!(lines(&editor), vec!["a", "b", "c"]);
    assert_eq!(editor.buf().cursor(), (1, 2));
}

#[test]
fn test_backspace_joins_lines() {
    let editor = run_with_lines(&["ab", "cd"], vec![DownKey, BACKSPACE]);
    assert_eq!(lines(&editor), vec!["abcd"]);
    assert_eq!(editor.buf().cursor(), (2, 0));

    let editor = run_with_lines(&["ab", "cd"], vec![BACKSPACE, ctrl('h')]);
    assert_eq!(lines(&editor), vec!["ab", "cd"]);
    assert!(!editor.buf().modified());
}

#[test]
fn test_insert_newline() {
    let editor = run_with_lines(&["hello"], vec![RightKey, RightKey, ENTER]);
    assert_eq!(lines(&editor), vec!["he", "llo"]);
    assert_eq!(editor.buf().cursor(), (0, 1));

    let editor = run_with_lines(&["hello"], vec![ENTER]);
    assert_eq!(lines(&editor), vec!["", "hello"]);
    assert_eq!(editor.buf().cursor(), (0, 1));
}

#[test]
fn test_line_edges_and_delete_key() {
    let editor = run_with_lines(&["abc"], vec![EndKey, key('x'), HomeKey, key('y')]);
    assert_eq!(lines(&editor), vec!["yabcx"]);

    let editor = run_with_lines(&["abc", "de"], vec![DeleteKey, EndKey, DeleteKey]);
    assert_eq!(lines(&editor), vec!["bcde"]);
}

#[test]
fn test_tab_is_inserted() {
    let editor = run_empty(vec![key('\t'), key('a')]);
    assert_eq!(lines(&editor), vec!["\ta"]);
    assert_eq!(editor.buf().rows()[0].render(), b"        a");
}

#[test]
fn test_page_down_and_up() {
    let numbers: Vec<String> = (0..50).map(|i| i.to_string()).collect();
    let mut editor = Editor::with_lines(
        &numbers,
        DummyInputs(vec![PageDownKey]),
        Discard,
        (80, 12),
        Config::default(),
    )
    .unwrap();
    editor.edit().unwrap();
    assert_eq!(editor.buf().cy(), 19);
    assert_eq!(editor.screen().rowoff, 10);

    let mut editor = Editor::with_lines(
        &numbers,
        DummyInputs(vec![PageDownKey, PageUpKey]),
        Discard,
        (80, 12),
        Config::default(),
    )
    .unwrap();
    editor.edit().unwrap();
    assert_eq!(editor.buf().cy(), 0);
}

#[test]
fn test_quit_with_unsaved_changes() {
    // Ctrl-Q must be pressed 3 more times. Typing 'b' after quitting has no effect
    let editor = run_empty(vec![key('a'), ctrl('q'), ctrl('q'), ctrl('q'), ctrl('q'), key('b')]);
    assert_eq!(lines(&editor), vec!["a"]);

    let editor = run_empty(vec![key('a'), ctrl('q'), ctrl('q'), ctrl('q'), key('b')]);
    assert_eq!(lines(&editor), vec!["ab"]);
    let (msg, kind) = message(&editor);
    assert_eq!(
        msg,
        "WARNING!!! File has unsaved changes. Press Ctrl-Q 1 more times to quit."
    );
    assert_eq!(kind, StatusMessageKind::Error);

    // Other key resets the count
    let editor = run_empty(vec![
        key('a'),
        ctrl('q'),
        ctrl('q'),
        key('b'),
        ctrl('q'),
        ctrl('q'),
        ctrl('q'),
        key('c'),
    ]);
    assert_eq!(lines(&editor), vec!["abc"]);
}

#[test]
fn test_quit_clears_screen() {
    let mut editor =
        Editor::new(DummyInputs(vec![ctrl('q')]), vec![], (80, 24), Config::default()).unwrap();
    editor.edit().unwrap();
    assert!(editor.screen().output().ends_with(b"\x1b[2J\x1b[H"));
}

#[test]
fn test_key_not_mapped() {
    let editor = run_empty(vec![ctrl('x')]);
    let (msg, kind) = message(&editor);
    assert_eq!(msg, "Key 'C-x' not mapped");
    assert_eq!(kind, StatusMessageKind::Error);
    assert!(lines(&editor).is_empty());
}

#[test]
fn test_open_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.c");
    fs::write(&path, "int x;\r\n// note\ndone\n").unwrap();

    let mut editor = Editor::open(
        &path,
        DummyInputs(vec![ctrl('q')]),
        vec![],
        (80, 24),
        Config::default(),
    )
    .unwrap();
    editor.edit().unwrap();

    assert_eq!(lines(&editor), vec!["int x;", "// note", "done"]);
    assert_eq!(editor.buf().syntax().map(|s| s.name), Some("c"));

    let rows = editor.buf().rows();
    assert_eq!(rows[0].highlight()[..3], [Highlight::Keyword2; 3]);
    assert_eq!(rows[0].highlight()[3..], [Highlight::Normal; 3]);
    assert_eq!(rows[1].highlight(), &[Highlight::Comment; 7]);

    let out = String::from_utf8_lossy(editor.screen().output()).into_owned();
    assert!(out.contains("c | 1/3"), "{:?}", out);
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");
    let result = Editor::open(&path, DummyInputs(vec![]), Discard, (80, 24), Config::default());
    assert!(result.is_err());
}

#[test]
fn test_save_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.txt");
    fs::write(&path, "abc\n").unwrap();

    let mut editor = Editor::open(
        &path,
        DummyInputs(vec![key('x'), ctrl('s')]),
        Discard,
        (80, 24),
        Config::default(),
    )
    .unwrap();
    editor.edit().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "xabc\n");
    assert!(!editor.buf().modified());
    assert_eq!(message(&editor).0, "5 bytes written to disk");
}

#[test]
fn test_save_as() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.rs");
    let path_str = path.to_str().unwrap();

    let mut keys = vec![key('f'), key('n'), ctrl('s')];
    keys.extend(text(path_str));
    keys.push(ENTER);
    let editor = run_empty(keys);

    assert_eq!(fs::read_to_string(&path).unwrap(), "fn\n");
    assert!(!editor.buf().modified());
    assert_eq!(editor.buf().filename(), path_str);
    // Naming the buffer selects syntax and rehighlights
    assert_eq!(editor.buf().syntax().map(|s| s.name), Some("rust"));
    assert_eq!(editor.buf().rows()[0].highlight(), &[Highlight::Keyword1; 2]);
    assert_eq!(message(&editor).0, "3 bytes written to disk");
}

#[test]
fn test_save_as_canceled() {
    let editor = run_empty(vec![key('a'), ctrl('s'), key('x'), ESC]);
    assert_eq!(message(&editor).0, "Save aborted");
    assert!(!editor.buf().has_file());
    assert!(editor.buf().modified());
    assert_eq!(lines(&editor), vec!["a"]);

    // Empty input is not committed
    let editor = run_empty(vec![key('a'), ctrl('s'), ENTER, ESC]);
    assert_eq!(message(&editor).0, "Save aborted");
}

#[test]
fn test_save_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("a.txt");

    let mut keys = vec![key('a'), ctrl('s')];
    keys.extend(text(path.to_str().unwrap()));
    keys.push(ENTER);
    keys.push(key('b'));
    let editor = run_empty(keys);

    let (msg, kind) = message(&editor);
    assert!(msg.starts_with("Can't save! I/O error: "), "{}", msg);
    assert_eq!(kind, StatusMessageKind::Error);
    assert!(editor.buf().modified());
    // Editing continues after the failure
    assert_eq!(lines(&editor), vec!["ab"]);
}

#[test]
fn test_find_and_cancel() {
    let editor = run_with_lines(
        &["ab", "xy", "abcd"],
        vec![RightKey, ctrl('f'), key('c'), key('d'), ESC],
    );
    assert_eq!(editor.buf().cursor(), (1, 0));
    assert_eq!(editor.screen().rowoff, 0);
    assert!(editor.screen().message().is_none());
    assert_eq!(editor.buf().rows()[2].highlight(), &[Highlight::Normal; 4]);
}

#[test]
fn test_find_and_accept() {
    let editor = run_with_lines(
        &["ab", "xy", "abcd"],
        vec![ctrl('f'), key('c'), key('d'), ENTER, key('!')],
    );
    assert_eq!(lines(&editor), vec!["ab", "xy", "ab!cd"]);
    assert_eq!(editor.buf().rows()[2].highlight(), &[Highlight::Normal; 5]);
}

#[test]
fn test_find_next_and_previous() {
    let editor = run_with_lines(
        &["foo", "bar", "foo", "baz"],
        vec![ctrl('f'), key('f'), DownKey, DownKey, ENTER],
    );
    assert_eq!(editor.buf().cursor(), (0, 0));

    let editor = run_with_lines(
        &["foo", "bar", "foo", "baz"],
        vec![ctrl('f'), key('a'), key('z'), UpKey, ENTER],
    );
    assert_eq!(editor.buf().cursor(), (1, 3));

    let editor = run_with_lines(
        &["foo", "bar", "foo", "baz"],
        vec![ctrl('f'), key('f'), LeftKey, ENTER],
    );
    assert_eq!(editor.buf().cursor(), (0, 2));
}

#[test]
fn test_message_bar_squashed() {
    let mut editor =
        Editor::new(DummyInputs(vec![ctrl('x')]), vec![], (10, 5), Config::default()).unwrap();
    editor.edit().unwrap();
    let out = String::from_utf8_lossy(editor.screen().output()).into_owned();
    assert!(out.contains("\x1b[5H\x1b[41mKey 'C-x' \x1b[39;0m\x1b[K"), "{:?}", out);
}
