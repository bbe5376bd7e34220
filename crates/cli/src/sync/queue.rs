// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline queue for persisting transactions while the remote is unreachable.
//!
//! Uses JSONL format for durability - each record is written as a single line
//! and fsynced immediately. Rewrites (front removal) go through a temp file and
//! a rename, so a reader never sees a half-written queue. A sidecar lock file
//! serializes access between processes sharing the same data directory.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use sw_core::TransactionRecord;

/// Error type for queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A line other than the last one could not be parsed.
    #[error("corrupted queue entry at line {line}: {reason}")]
    Corrupted { line: usize, reason: String },

    /// Atomic rewrite failed.
    #[error("storage error: {0}")]
    Storage(#[from] sw_core::Error),
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Offline queue for persisting transactions.
///
/// Records are stored in a JSONL file, oldest first, one record per line.
/// Nothing is cached in memory: every read goes to disk.
pub struct OfflineQueue {
    /// Path to the queue file.
    path: PathBuf,
    /// Path to the sidecar lock file.
    lock_path: PathBuf,
}

impl OfflineQueue {
    /// Create or open an offline queue at the given path.
    pub fn open(path: &Path) -> QueueResult<Self> {
        // Ensure the file exists (create if not)
        OpenOptions::new().create(true).append(true).open(path)?;

        let mut lock_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        lock_name.push(".lock");

        Ok(OfflineQueue {
            path: path.to_path_buf(),
            lock_path: path.with_file_name(lock_name),
        })
    }

    /// Path to the queue file.
    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Enqueue a record for later sending.
    ///
    /// The record is persisted to disk before this returns.
    pub fn enqueue(&mut self, record: &TransactionRecord) -> QueueResult<()> {
        let _lock = self.lock_exclusive()?;

        let json = serde_json::to_string(record)?;
        if !self.ends_cleanly()? {
            // Drop a torn trailing line before appending after it.
            let records = self.read_unlocked()?;
            sw_core::jsonl::write_all(&self.path, &records)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", json)?;
        file.sync_all()?;

        Ok(())
    }

    /// Read all queued records without removing them, oldest first.
    pub fn peek_all(&self) -> QueueResult<Vec<TransactionRecord>> {
        let _lock = self.lock_shared()?;
        self.read_unlocked()
    }

    /// Clear all queued records.
    pub fn clear(&mut self) -> QueueResult<()> {
        let _lock = self.lock_exclusive()?;
        sw_core::jsonl::write_all::<TransactionRecord>(&self.path, &[])?;
        Ok(())
    }

    /// Get the number of queued records.
    pub fn len(&self) -> QueueResult<usize> {
        Ok(self.peek_all()?.len())
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> QueueResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Remove the first N records from the queue.
    ///
    /// For callers that confirm a batch and then trim it in one step. Drains
    /// use [`remove_front_if`](Self::remove_front_if) instead.
    pub fn remove_first(&mut self, count: usize) -> QueueResult<()> {
        if count == 0 {
            return Ok(());
        }
        let _lock = self.lock_exclusive()?;
        let records = self.read_unlocked()?;
        let remaining = records.get(count..).unwrap_or(&[]);
        sw_core::jsonl::write_all(&self.path, remaining)?;
        Ok(())
    }

    /// Remove the front record only if it equals `expected`.
    ///
    /// Returns false (and leaves the queue alone) when the head differs, which
    /// happens if another process rewrote the queue while a drain was running.
    pub fn remove_front_if(&mut self, expected: &TransactionRecord) -> QueueResult<bool> {
        let _lock = self.lock_exclusive()?;
        let records = self.read_unlocked()?;
        match records.first() {
            Some(head) if head == expected => {
                sw_core::jsonl::write_all(&self.path, &records[1..])?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn read_unlocked(&self) -> QueueResult<Vec<TransactionRecord>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let lines: Vec<String> = BufReader::new(file)
            .lines()
            .collect::<std::io::Result<_>>()?;
        let last = lines.iter().rposition(|l| !l.trim().is_empty());

        let mut records = Vec::new();
        for (idx, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<TransactionRecord>(line) {
                Ok(record) => records.push(record),
                // A crash mid-append can leave a torn final line. That record
                // was never acknowledged as queued, so it is dropped.
                Err(e) if Some(idx) == last => {
                    tracing::warn!("ignoring torn trailing queue entry: {}", e);
                }
                Err(e) => {
                    return Err(QueueError::Corrupted {
                        line: idx + 1,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(records)
    }

    /// True if the file is empty or its last byte is a newline.
    fn ends_cleanly(&self) -> QueueResult<bool> {
        let mut file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(true),
            Err(e) => return Err(e.into()),
        };
        if file.metadata()?.len() == 0 {
            return Ok(true);
        }
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        Ok(last[0] == b'\n')
    }

    fn lock_exclusive(&self) -> QueueResult<QueueLock> {
        let file = self.open_lock_file()?;
        file.lock_exclusive()?;
        Ok(QueueLock(file))
    }

    fn lock_shared(&self) -> QueueResult<QueueLock> {
        let file = self.open_lock_file()?;
        file.lock_shared()?;
        Ok(QueueLock(file))
    }

    fn open_lock_file(&self) -> QueueResult<File> {
        Ok(OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)?)
    }
}

/// Holds an fs2 lock on the sidecar file until dropped.
struct QueueLock(File);

impl Drop for QueueLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.0);
    }
}
