//! Logging setup for the DCS-gRPC Installer
//!
//! Routes the `log` facade through env_logger into a timestamped log file, with
//! old log files rotated out. Debug builds echo every line to stderr as well.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::{APP_DIR_NAME, MAX_LOG_FILES};

/// Returns the installer log directory (e.g., C:\Users\User\AppData\Roaming\DcsGrpcInstaller\logs)
pub fn get_log_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR_NAME).join("logs"))
}

/// Delete the oldest `.log` files in `log_dir` until at most `keep` remain.
pub fn rotate_logs(log_dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };
    let mut log_files: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "log").unwrap_or(false))
        .map(|e| {
            let modified = e.metadata().and_then(|m| m.modified()).ok();
            (modified, e.file_name(), e.path())
        })
        .collect();
    log_files.sort();

    let excess = log_files.len().saturating_sub(keep);
    for (_, _, path) in log_files.into_iter().take(excess) {
        let _ = fs::remove_file(path);
    }
}

struct LogSink {
    file: Option<File>,
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(file) = &mut self.file {
            file.write_all(buf)?;
        }
        if cfg!(debug_assertions) || self.file.is_none() {
            io::stderr().write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        io::stderr().flush()
    }
}

fn open_log_file(log_dir: &Path) -> io::Result<File> {
    fs::create_dir_all(log_dir)?;
    let filename = Local::now().format("%m-%d-%y_%H-%M-%S.log").to_string();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(filename))?;
    rotate_logs(log_dir, MAX_LOG_FILES);
    Ok(file)
}

/// Install the global logger. `RUST_LOG` overrides the default `info` level.
pub fn init() {
    let file = get_log_dir().and_then(|dir| open_log_file(&dir).ok());

    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[DcsGrpcInstaller] {} {}: {}",
                Local::now().format("[%m/%d/%Y - %H:%M:%S]"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(LogSink { file })))
        .try_init();

    if let Err(e) = result {
        eprintln!("Logger already initialized: {}", e);
    }
}
