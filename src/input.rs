use crate::error::{Error, Result};
use std::fmt;
use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;
use std::str;

const ESC: u8 = 0x1b;

// Ctrl modifier masks the key with 0b11111
pub const fn ctrl_key(b: u8) -> u8 {
    b & 0x1f
}

pub struct StdinRawMode {
    stdin: io::Stdin,
    orig: termios::Termios,
}

impl StdinRawMode {
    pub fn new() -> Result<StdinRawMode> {
        use termios::*;

        let stdin = io::stdin();
        let fd = stdin.as_raw_fd();
        let mut termios = Termios::from_fd(fd)?;
        let orig = termios;

        // Set terminal raw mode. Disable echo back, canonical mode, signals (SIGINT, SIGTSTP) and Ctrl+V.
        termios.c_lflag &= !(ECHO | ICANON | ISIG | IEXTEN);
        // Disable control flow mode (Ctrl+Q/Ctrl+S) and CR-to-NL translation
        termios.c_iflag &= !(IXON | ICRNL | BRKINT | INPCK | ISTRIP);
        // Disable output processing such as \n to \r\n translation
        termios.c_oflag &= !OPOST;
        // Ensure character size is 8bits
        termios.c_cflag |= CS8;
        // Do not wait for next byte with blocking since reading 0 byte is permitted
        termios.c_cc[VMIN] = 0;
        // Set read timeout to 1/10 second it enables 100ms timeout on read()
        termios.c_cc[VTIME] = 1;
        // Apply terminal configurations
        tcsetattr(fd, TCSAFLUSH, &termios)?;

        Ok(StdinRawMode { stdin, orig })
    }

    pub fn input_keys(self) -> InputSequences<StdinRawMode> {
        InputSequences::new(self)
    }
}

impl Drop for StdinRawMode {
    fn drop(&mut self) {
        // Restore original terminal mode. Nothing can be done on failure while dropping
        let _ = termios::tcsetattr(self.stdin.as_raw_fd(), termios::TCSAFLUSH, &self.orig);
    }
}

impl Read for StdinRawMode {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stdin.read(buf)
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum KeySeq {
    Unidentified, // Read timed out. No key was typed
    Key(u8),      // Literal byte including control characters
    LeftKey,
    RightKey,
    UpKey,
    DownKey,
    PageUpKey,
    PageDownKey,
    HomeKey,
    EndKey,
    DeleteKey,
}

impl fmt::Display for KeySeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use KeySeq::*;
        match self {
            Unidentified => write!(f, "UNKNOWN"),
            Key(b' ') => write!(f, "SPACE"),
            Key(0x7f) => write!(f, "BACKSPACE"),
            Key(0x1b) => write!(f, "ESC"),
            Key(b @ 1..=26) => write!(f, "C-{}", (*b | 0b0110_0000) as char),
            Key(b) if b.is_ascii_control() => write!(f, "C-{}", (*b | 0b0100_0000) as char),
            Key(b) if b.is_ascii() => write!(f, "{}", *b as char),
            Key(b) => write!(f, "\\x{:x}", b),
            LeftKey => write!(f, "LEFT"),
            RightKey => write!(f, "RIGHT"),
            UpKey => write!(f, "UP"),
            DownKey => write!(f, "DOWN"),
            PageUpKey => write!(f, "PAGEUP"),
            PageDownKey => write!(f, "PAGEDOWN"),
            HomeKey => write!(f, "HOME"),
            EndKey => write!(f, "END"),
            DeleteKey => write!(f, "DELETE"),
        }
    }
}

pub struct InputSequences<R: Read> {
    reader: R,
}

impl<R: Read> InputSequences<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut one_byte: [u8; 1] = [0];
        match self.reader.read(&mut one_byte) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(one_byte[0])),
            // Non-blocking stdin and interrupted read are the same as timeout
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn decode_escape_sequence(&mut self) -> Result<KeySeq> {
        use KeySeq::*;

        // If the following bytes do not arrive within the read timeout, the user pressed ESC key
        // alone. Any broken or unknown sequence is also treated as ESC key.
        let header = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(Key(ESC)),
        };
        let cmd = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(Key(ESC)),
        };

        let key = match (header, cmd) {
            // e.g. PAGE UP => \x1b[5~
            (b'[', b'0'..=b'9') => match self.read_byte()? {
                Some(b'~') => match cmd {
                    b'1' | b'7' => HomeKey,
                    b'3' => DeleteKey,
                    b'4' | b'8' => EndKey,
                    b'5' => PageUpKey,
                    b'6' => PageDownKey,
                    _ => Key(ESC),
                },
                _ => Key(ESC),
            },
            (b'[', b'A') => UpKey,
            (b'[', b'B') => DownKey,
            (b'[', b'C') => RightKey,
            (b'[', b'D') => LeftKey,
            (b'[', b'H') | (b'O', b'H') => HomeKey,
            (b'[', b'F') | (b'O', b'F') => EndKey,
            _ => Key(ESC),
        };

        Ok(key)
    }

    pub fn read_seq(&mut self) -> Result<KeySeq> {
        match self.read_byte()? {
            Some(ESC) => self.decode_escape_sequence(),
            Some(b) => Ok(KeySeq::Key(b)),
            None => Ok(KeySeq::Unidentified),
        }
    }

    // Ask the terminal where the cursor is after moving it to the bottom-right corner. This is used
    // only when the window size is not available from ioctl(). The reply is read directly from the
    // byte stream since it is not a key sequence.
    pub fn query_window_size<W: Write>(&mut self, mut out: W) -> Result<(usize, usize)> {
        // \x1b[9999;9999H is not available since it does not guarantee cursor stops on the corner
        out.write_all(b"\x1b[999C\x1b[999B\x1b[6n")?;
        out.flush()?;

        // e.g. \x1b[24;80R
        let mut buf = Vec::with_capacity(32);
        while buf.len() < 32 {
            match self.read_byte()? {
                Some(b'R') | None => break,
                Some(b) => buf.push(b),
            }
        }

        let args = match buf.strip_prefix(b"\x1b[") {
            Some(args) => args,
            None => return Err(Error::UnknownWindowSize),
        };

        let mut it = args
            .split(|b| *b == b';')
            .map(|s| str::from_utf8(s).ok().and_then(|s| s.parse::<usize>().ok()));
        match (it.next(), it.next()) {
            (Some(Some(rows)), Some(Some(cols))) => Ok((cols, rows)),
            _ => Err(Error::UnknownWindowSize),
        }
    }
}

impl<R: Read> Iterator for InputSequences<R> {
    type Item = Result<KeySeq>;

    // Read next key with timeout 100ms. If nothing was read, it returns KeySeq::Unidentified and the
    // caller simply polls again. This method never returns None so for loop never ends
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.read_seq())
    }
}
