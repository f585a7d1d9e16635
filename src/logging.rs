use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};

use crate::settings::APP_DIR_NAME;

const LOG_FILE_NAME: &str = "border_terminator.log";
const LOG_ENV: &str = "BORDER_TERMINATOR_LOG";

/// Copies every formatted record to stderr and, when available, the log file.
struct TeeWriter {
    file: Option<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let _ = io::stderr().write_all(buf);
        if let Some(file) = self.file.as_mut() {
            if file.write_all(buf).is_err() {
                self.file = None;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let _ = io::stderr().flush();
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

pub fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Failed to create log directory: {}", e);
            return None;
        }
    }

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: Failed to open log file {}: {}", path.display(), e);
            None
        }
    }
}

/// Installs the global logger. `default_level` applies unless
/// `BORDER_TERMINATOR_LOG` is set.
pub fn init(default_level: &str) -> Option<PathBuf> {
    let path = log_file_path();
    let file = path.as_deref().and_then(open_log_file);
    let path = if file.is_some() { path } else { None };

    let result = Builder::from_env(Env::default().filter_or(LOG_ENV, default_level))
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(TeeWriter { file })))
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: Logger already initialised: {}", e);
    }

    path
}
