//! Prediction Recorder
//!
//! Append-only JSONL writer for served predictions.
//! One mutex guards the file; concurrent `record` calls never interleave.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use parking_lot::Mutex;
use thiserror::Error;

use crate::constants::DEFAULT_MAX_LOG_FILE_SIZE;

use super::record::PredictionRecord;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Log file prefix
const LOG_PREFIX: &str = "predictions_";

/// Log file extension
const LOG_EXT: &str = "jsonl";

// ============================================================================
// SINK
// ============================================================================

#[derive(Debug, Error)]
pub enum LogError {
    #[error("prediction log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode prediction record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Anything that can durably accept prediction records
pub trait PredictionSink: Send + Sync {
    fn record(&self, entry: &PredictionRecord) -> Result<(), LogError>;
}

// ============================================================================
// FILE RECORDER
// ============================================================================

struct LogFile {
    writer: BufWriter<File>,
    current_file: PathBuf,
    current_size: u64,
    sequence: u32,
}

impl LogFile {
    fn open(base_dir: &Path, sequence: u32) -> std::io::Result<Self> {
        let filename = format!(
            "{}{}_{:03}.{}",
            LOG_PREFIX,
            Utc::now().format("%Y_%m_%d_%H%M%S"),
            sequence,
            LOG_EXT
        );
        let file_path = base_dir.join(filename);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)?;
        let current_size = file.metadata()?.len();

        log::info!("Opened prediction log: {:?}", file_path);
        Ok(Self {
            writer: BufWriter::new(file),
            current_file: file_path,
            current_size,
            sequence,
        })
    }
}

/// Append-only JSONL prediction log with size-based rotation
pub struct PredictionLogger {
    base_dir: PathBuf,
    max_file_size: u64,
    file: Mutex<LogFile>,
    records_written: AtomicU64,
}

impl PredictionLogger {
    /// Create a logger writing into `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        Self::with_max_file_size(base_dir, DEFAULT_MAX_LOG_FILE_SIZE)
    }

    pub fn with_max_file_size(base_dir: impl Into<PathBuf>, max_file_size: u64) -> std::io::Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        let file = LogFile::open(&base_dir, 0)?;

        Ok(Self {
            base_dir,
            max_file_size,
            file: Mutex::new(file),
            records_written: AtomicU64::new(0),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn current_file(&self) -> PathBuf {
        self.file.lock().current_file.clone()
    }

    /// Records written by this logger
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::SeqCst)
    }

    /// Switch to a fresh file. Caller holds the lock.
    fn rotate(&self, file: &mut LogFile) -> std::io::Result<()> {
        file.writer.flush()?;
        let next = LogFile::open(&self.base_dir, file.sequence + 1)?;
        log::info!("Rotated from {:?} to {:?}", file.current_file, next.current_file);
        *file = next;
        Ok(())
    }
}

impl PredictionSink for PredictionLogger {
    fn record(&self, entry: &PredictionRecord) -> Result<(), LogError> {
        let line = entry.to_jsonl()?;
        let bytes = line.as_bytes();

        let mut file = self.file.lock();

        if file.current_size > 0 && file.current_size + bytes.len() as u64 + 1 > self.max_file_size {
            self.rotate(&mut file)?;
        }

        file.writer.write_all(bytes)?;
        file.writer.write_all(b"\n")?;
        file.writer.flush()?;
        file.current_size += bytes.len() as u64 + 1;

        self.records_written.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for PredictionLogger {
    fn drop(&mut self) {
        let _ = self.file.get_mut().writer.flush();
    }
}

// ============================================================================
// QUERY API (for reading logs)
// ============================================================================

/// Read all records from a log file, skipping unparseable lines
pub fn read_records(file_path: &Path) -> std::io::Result<Vec<PredictionRecord>> {
    let reader = BufReader::new(File::open(file_path)?);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<PredictionRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("Skipping bad line in {:?}: {}", file_path, e),
        }
    }

    Ok(records)
}

/// All prediction log files in `dir`, oldest first
pub fn list_log_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if dir.is_dir() {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_log = path.extension().map_or(false, |e| e == LOG_EXT)
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map_or(false, |n| n.starts_with(LOG_PREFIX));
            if is_log {
                files.push(path);
            }
        }
    }

    // Names embed timestamp + sequence
    files.sort();
    Ok(files)
}

// ============================================================================
// TESTS
// ============================================================================
