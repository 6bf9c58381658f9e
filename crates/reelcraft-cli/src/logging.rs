//! Run logging: every line goes to stdout and to `run.log` in the brand's
//! output folder, so a finished run leaves a complete transcript next to its
//! artifacts.

use anyhow::Result;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Writer that copies every line to stdout and, when the file handle could
/// be cloned, to the run log.
enum TeeWriter {
    Both(File),
    StdoutOnly,
}

impl io::Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().lock().write_all(buf)?;
        if let TeeWriter::Both(file) = self {
            // A log-file write failure must not take down the run.
            let _ = file.write_all(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()?;
        if let TeeWriter::Both(file) = self {
            let _ = file.flush();
        }
        Ok(())
    }
}

struct TeeMakeWriter(File);

impl<'a> MakeWriter<'a> for TeeMakeWriter {
    type Writer = TeeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(TeeWriter::Both)
            .unwrap_or(TeeWriter::StdoutOnly)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Truncate the run log, stamp the run-started header, and install a
/// subscriber that tees every line to stdout and the log file.
pub fn init_run_logging(log_path: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    writeln!(
        file,
        "Run started: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(file, "{}", "=".repeat(60))?;

    let writer = BoxMakeWriter::new(TeeMakeWriter(file));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!(path = %log_path.display(), "Run logging initialized");
    Ok(())
}

/// Stdout-only logging for commands that have no run folder.
pub fn init_stdout_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .init();
}
