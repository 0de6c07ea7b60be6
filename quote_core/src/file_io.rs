//! # File I/O Module
//!
//! Handles quotation file operations with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **File locking**: Prevent concurrent edits on shared drives
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Quotations are saved as `.pqt` (PressQuote) files containing JSON.
//! Lock files use the `.pqt.lock` extension with metadata about who holds
//! the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use quote_core::file_io::{save_quotation, load_quotation, FileLock};
//! use quote_core::quotation::Quotation;
//! use std::path::Path;
//!
//! let quotation = Quotation::new("Estimator", "Q-2031", "Customer");
//! let path = Path::new("q2031.pqt");
//!
//! // Acquire lock before saving
//! let lock = FileLock::acquire(path, "estimator@press.example").unwrap();
//!
//! // Save with atomic write
//! save_quotation(&quotation, path).unwrap();
//!
//! // Lock is released when dropped
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::quotation::{Quotation, SCHEMA_VERSION};

/// A lock older than this is treated as abandoned (hours)
const STALE_LOCK_HOURS: i64 = 24;

/// Lock file metadata stored in .pqt.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where the lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

fn hostname() -> Option<String> {
    std::env::var("HOSTNAME")
        .ok()
        .or_else(|| std::env::var("COMPUTERNAME").ok())
        .or_else(|| std::env::var("HOST").ok())
}

/// File lock guard that releases the lock when dropped.
///
/// Uses both:
/// 1. OS-level file locking (via fs2) for process safety
/// 2. A .lock file with metadata for user visibility
pub struct FileLock {
    /// Path to the lock file
    lock_path: PathBuf,
    /// The underlying file handle (keeps the OS lock)
    _lock_file: File,
    /// Lock metadata
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a quotation file.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired successfully
    /// * `Err(EstimateError::FileLocked)` - Another process holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> EstimateResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                if !is_lock_stale(&existing) {
                    return Err(EstimateError::file_locked(
                        path.display().to_string(),
                        format!("{} ({})", existing.user_id, existing.machine),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
                // Stale lock: take it over
            }
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                EstimateError::file_error(
                    "create lock",
                    lock_path.display().to_string(),
                    e.to_string(),
                )
            })?;

        lock_file.try_lock_exclusive().map_err(|_| {
            EstimateError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        let lock_json =
            serde_json::to_string_pretty(&info).map_err(|e| EstimateError::SerializationError {
                reason: e.to_string(),
            })?;
        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            EstimateError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;
        lock_file.sync_all().map_err(|e| {
            EstimateError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        Ok(FileLock {
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check whether a file is locked without acquiring the lock.
    ///
    /// Returns `Some(LockInfo)` if locked, `None` if available.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if !lock_path.exists() {
            return None;
        }
        match read_lock_info(&lock_path) {
            Ok(info) if !is_lock_stale(&info) => Some(info),
            _ => None,
        }
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // The OS lock is released with _lock_file
        let _ = fs::remove_file(&self.lock_path);
    }
}

fn lock_path_for(quotation_path: &Path) -> PathBuf {
    let mut lock_path = quotation_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

fn read_lock_info(lock_path: &Path) -> EstimateResult<LockInfo> {
    let contents = fs::read_to_string(lock_path).map_err(|e| {
        EstimateError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;
    serde_json::from_str(&contents).map_err(|e| EstimateError::SerializationError {
        reason: e.to_string(),
    })
}

/// A lock is stale when its process is gone (same machine) or it has aged
/// past [`STALE_LOCK_HOURS`].
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            #[cfg(unix)]
            if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                return true;
            }
        }
    }
    (Utc::now() - info.locked_at).num_hours() > STALE_LOCK_HOURS
}

/// Save a quotation to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize the quotation to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp to .pqt (atomic on most filesystems)
///
/// This prevents corruption if the process is interrupted during write.
pub fn save_quotation(quotation: &Quotation, path: &Path) -> EstimateResult<()> {
    let json = serde_json::to_string_pretty(quotation).map_err(|e| {
        EstimateError::SerializationError {
            reason: e.to_string(),
        }
    })?;

    let tmp_path = path.with_extension("pqt.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        EstimateError::file_error(
            "create temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;
    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        EstimateError::file_error(
            "write temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;
    tmp_file.sync_all().map_err(|e| {
        EstimateError::file_error(
            "sync temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Do not leave the temp file behind on a failed rename
        let _ = fs::remove_file(&tmp_path);
        EstimateError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a quotation from a file.
///
/// # Returns
///
/// * `Ok(Quotation)` - Successfully loaded
/// * `Err(EstimateError::VersionMismatch)` - File version is incompatible
/// * `Err(EstimateError::SerializationError)` - Invalid JSON
/// * `Err(EstimateError::FileError)` - I/O error
pub fn load_quotation(path: &Path) -> EstimateResult<Quotation> {
    let mut file = File::open(path).map_err(|e| {
        EstimateError::file_error("open", path.display().to_string(), e.to_string())
    })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        EstimateError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let quotation: Quotation =
        serde_json::from_str(&contents).map_err(|e| EstimateError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&quotation.meta.version)?;
    Ok(quotation)
}

/// Validate that a file version is compatible with the current schema.
///
/// The major version must match; for 0.x schemas a file with a newer minor
/// version than ours is also rejected.
fn validate_version(file_version: &str) -> EstimateResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let mismatch = || EstimateError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }
    Ok(())
}
