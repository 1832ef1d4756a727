use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Could not detect terminal window size")]
    UnknownWindowSize,

    #[error("Screen {0}x{1} is too small. At least 1x3 is necessary in width x height")]
    TooSmallWindow(usize, usize),

    #[error("Could not open {}: {}", .path.display(), .source)]
    Open { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
