//! Logging capability consumed by [`Fleet`](crate::fleet::Fleet).
//!
//! The fleet only needs something it can hand a message to. Sinks here
//! cover the console, an append-only file, the process `tracing`
//! subscriber and an in-memory buffer.

use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{config::AppConfig, error::FleetError};

/// Receives fleet activity messages.
pub trait FleetLogger {
    /// Record a single message. Delivery is best-effort.
    fn log(&self, message: &str);
}

/// Selects which sink [`build_logger`] creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggerKind {
    /// Print to [`AppConfig::console_stream`].
    #[default]
    Console,
    /// Append to [`AppConfig::log_file`].
    File,
    /// Forward to `tracing`.
    Tracing,
    /// Keep messages in memory.
    Memory,
}

impl std::str::FromStr for LoggerKind {
    type Err = FleetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "console" => Ok(LoggerKind::Console),
            "file" => Ok(LoggerKind::File),
            "tracing" => Ok(LoggerKind::Tracing),
            "memory" => Ok(LoggerKind::Memory),
            other => Err(FleetError::UnknownLogger(other.to_string())),
        }
    }
}

/// Terminal stream used by [`ConsoleLogger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleStream {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error; keeps stdout free for machine-readable output.
    Stderr,
}

/// Writes `[Console] <message>` lines to a terminal stream.
#[derive(Debug, Default)]
pub struct ConsoleLogger {
    stream: ConsoleStream,
}

impl ConsoleLogger {
    /// Log to `stream`.
    pub fn new(stream: ConsoleStream) -> Self {
        Self { stream }
    }

    /// Stream this logger writes to.
    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl FleetLogger for ConsoleLogger {
    fn log(&self, message: &str) {
        match self.stream {
            ConsoleStream::Stdout => println!("[Console] {message}"),
            ConsoleStream::Stderr => eprintln!("[Console] {message}"),
        }
    }
}

/// Appends `[File] <message>` lines to a file.
#[derive(Debug)]
pub struct FileLogger {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileLogger {
    /// Open `path` for appending, creating it and its parent directory if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FleetError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| FleetError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| FleetError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FleetLogger for FileLogger {
    fn log(&self, message: &str) {
        let mut file = self.file.lock();
        if let Err(err) = writeln!(file, "[File] {message}") {
            warn!("failed to write to {}: {err}", self.path.display());
        }
    }
}

/// Forwards messages to the installed `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingLogger;

impl FleetLogger for TracingLogger {
    fn log(&self, message: &str) {
        info!(target: "fleet", "{message}");
    }
}

/// Buffers messages in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<String>>,
}

impl MemoryLogger {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded messages in order.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Number of recorded messages.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl FleetLogger for MemoryLogger {
    fn log(&self, message: &str) {
        self.entries.lock().push(message.to_string());
    }
}

/// Create the sink selected by `config`.
pub fn build_logger(config: &AppConfig) -> Result<Box<dyn FleetLogger>, FleetError> {
    let logger: Box<dyn FleetLogger> = match config.logger {
        LoggerKind::Console => Box::new(ConsoleLogger::new(config.console_stream)),
        LoggerKind::File => Box::new(FileLogger::open(&config.log_file)?),
        LoggerKind::Tracing => Box::new(TracingLogger),
        LoggerKind::Memory => Box::new(MemoryLogger::new()),
    };
    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn memory_logger_keeps_order() {
        let logger = MemoryLogger::new();
        assert!(logger.is_empty());
        logger.log("first");
        logger.log("second");
        assert_eq!(logger.entries(), vec!["first", "second"]);
        assert_eq!(logger.len(), 2);
    }

    #[test]
    fn file_logger_appends_prefixed_lines() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("fleet.log");

        let logger = FileLogger::open(&path)?;
        logger.log("one");
        drop(logger);

        let logger = FileLogger::open(&path)?;
        logger.log("two");
        assert_eq!(logger.path(), path.as_path());

        assert_eq!(fs::read_to_string(&path)?, "[File] one\n[File] two\n");
        Ok(())
    }

    #[test]
    fn parses_logger_kinds() {
        assert_eq!("Console".parse::<LoggerKind>().ok(), Some(LoggerKind::Console));
        assert_eq!(" file ".parse::<LoggerKind>().ok(), Some(LoggerKind::File));
        assert_eq!("tracing".parse::<LoggerKind>().ok(), Some(LoggerKind::Tracing));
        assert!(matches!(
            "syslog".parse::<LoggerKind>(),
            Err(FleetError::UnknownLogger(name)) if name == "syslog"
        ));
    }

    #[test]
    fn console_stream_defaults_to_stdout() {
        assert_eq!(ConsoleLogger::default().stream(), ConsoleStream::Stdout);
        assert_eq!(
            ConsoleLogger::new(ConsoleStream::Stderr).stream(),
            ConsoleStream::Stderr
        );
    }

    #[test]
    fn builds_file_logger_from_config() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig {
            logger: LoggerKind::File,
            log_file: dir.path().join("fleet.log"),
            ..AppConfig::default()
        };
        let logger = build_logger(&config)?;
        logger.log("hello");
        assert_eq!(fs::read_to_string(&config.log_file)?, "[File] hello\n");
        Ok(())
    }
}
