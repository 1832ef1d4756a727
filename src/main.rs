use std::env;
use std::fs::OpenOptions;
use std::io::{self, Read, Write};
use std::process::exit;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use typeaway::{Config, Editor, InputSequences, Result, StdinRawMode};

// Logs go to a file since stdout is occupied by the editor screen
fn init_logging(config: &Config) -> io::Result<()> {
    let path = match &config.log_file {
        Some(path) => path,
        None => return Ok(()),
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("typeaway=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn window_size<R: Read>(input: &mut InputSequences<R>) -> Result<(usize, usize)> {
    if let Some(size) = term_size::dimensions_stdout() {
        return Ok(size);
    }
    input.query_window_size(io::stdout())
}

fn run(config: Config) -> Result<()> {
    // Raw mode is restored when `input` is dropped at the end of this function
    let mut input = StdinRawMode::new()?.input_keys();
    let size = window_size(&mut input)?;
    let output = io::stdout();

    let mut editor = match env::args_os().nth(1) {
        Some(path) => Editor::open(path, input, output, size, config)?,
        None => Editor::new(input, output, size, config)?,
    };
    editor.watch_resize()?;
    editor.edit()
}

fn main() {
    let config = Config::from_env();
    if let Err(err) = init_logging(&config) {
        eprintln!("typeaway: could not open log file: {}", err);
    }

    if let Err(err) = run(config) {
        tracing::error!(%err, "fatal error");
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x1b[2J\x1b[H");
        let _ = stdout.flush();
        eprintln!("typeaway: {}", err);
        exit(1);
    }
}
