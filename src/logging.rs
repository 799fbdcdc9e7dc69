//! Tracing setup: stderr plus two rotating log files.
//!
//! Events are split across two channels by tracing target:
//!
//! | Target | File | Contents |
//! |--------|------|----------|
//! | `main` | `main.log` | pipeline lifecycle, exports |
//! | `scraper` | `scraper.log` | requests, responses, row failures |
//!
//! Each file is capped at [`MAX_LOG_BYTES`] and rolled over to
//! `main.log.1`, `main.log.2`, … keeping [`LOG_BACKUPS`] old files.

use std::error::Error;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt as tfmt};

pub const MAX_LOG_BYTES: u64 = 1_000_000;
pub const LOG_BACKUPS: usize = 3;

/// Target for pipeline-level events.
pub const MAIN: &str = "main";
/// Target for scrape-level events.
pub const SCRAPER: &str = "scraper";

struct RotatingState {
    path: PathBuf,
    file: File,
    written: u64,
    max_bytes: u64,
    backups: usize,
}

impl RotatingState {
    fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.backups > 0 {
            for n in (1..self.backups).rev() {
                let from = self.backup_path(n);
                if from.exists() {
                    fs::rename(&from, self.backup_path(n + 1))?;
                }
            }
            fs::rename(&self.path, self.backup_path(1))?;
        }
        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

/// Append-only log file, rolled over once it would exceed its size cap.
pub struct RotatingFile {
    state: Mutex<RotatingState>,
}

impl RotatingFile {
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            state: Mutex::new(RotatingState {
                path,
                file,
                written,
                max_bytes,
                backups,
            }),
        })
    }
}

/// Exclusive handle on a [`RotatingFile`] for one event.
pub struct RotatingWriter<'a> {
    state: MutexGuard<'a, RotatingState>,
}

impl Write for RotatingWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let state = &mut *self.state;
        if state.written > 0 && state.written + buf.len() as u64 > state.max_bytes {
            state.rotate()?;
        }
        let n = state.file.write(buf)?;
        state.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.state.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = RotatingWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriter {
            state: self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner()),
        }
    }
}

fn channel_file(log_dir: &Path, target: &str) -> io::Result<RotatingFile> {
    RotatingFile::open(log_dir.join(format!("{target}.log")), MAX_LOG_BYTES, LOG_BACKUPS)
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init(log_dir: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(log_dir)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr = tfmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(UtcTime::rfc_3339())
        .with_filter(filter);

    let main_file = tfmt::layer()
        .with_writer(channel_file(log_dir, MAIN)?)
        .with_ansi(false)
        .with_timer(UtcTime::rfc_3339())
        .with_filter(Targets::new().with_target(MAIN, Level::DEBUG));

    let scraper_file = tfmt::layer()
        .with_writer(channel_file(log_dir, SCRAPER)?)
        .with_ansi(false)
        .with_timer(UtcTime::rfc_3339())
        .with_filter(Targets::new().with_target(SCRAPER, Level::DEBUG));

    tracing_subscriber::registry()
        .with(stderr)
        .with(main_file)
        .with(scraper_file)
        .try_init()?;
    Ok(())
}
