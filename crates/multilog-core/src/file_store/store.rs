//! Rotating on-disk log storage
//!
//! One store owns one log folder. Lines are appended to a single active file
//! and flushed on every write; the file rolls to the archive when it gets older
//! than the rolling frequency, would exceed the size limit, or when a roll or
//! purge is requested. Archived files are kept oldest first and trimmed so that
//! the folder never holds more than `max_files` files after a rotation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::types::LogLevel;
use super::config::FileStoreConfig;
use super::error::{FileStoreError, FileStoreResult};
use super::naming::{format_line, FileNaming};

/// File currently receiving writes
struct ActiveFile {
    path: PathBuf,
    writer: BufWriter<File>,
    created: SystemTime,
    size: u64,
}

struct StoreState {
    active: Option<ActiveFile>,
    /// Rolled files, oldest first
    archived: Vec<PathBuf>,
}

/// A log file found in the folder when the store opens
struct ExistingFile {
    path: PathBuf,
    created: SystemTime,
    len: u64,
    is_active_name: bool,
}

/// Durable, rotating, multi-reader-safe log storage
///
/// All methods take `&self`; share the store between threads with an `Arc`.
/// Writers are serialized by an internal mutex so lines never interleave.
/// Readers hold that mutex only long enough to flush and open the current
/// set of files, then read outside of it.
///
/// # Example
///
/// ```no_run
/// use multilog_core::file_store::{FileStoreConfig, RotatingFileStore};
/// use multilog_core::LogLevel;
///
/// let store = RotatingFileStore::open(
///     FileStoreConfig::new().with_log_folder("/tmp/app-logs").with_max_files(3),
/// ).unwrap();
/// store.write(LogLevel::INFO, "started").unwrap();
/// let files = store.get_logs().unwrap();
/// ```
pub struct RotatingFileStore {
    config: FileStoreConfig,
    folder: PathBuf,
    naming: FileNaming,
    rolling_frequency: Duration,
    max_file_size: Option<u64>,
    state: Mutex<StoreState>,
}

impl RotatingFileStore {
    /// Open the store, scanning the folder for files left by earlier sessions
    pub fn open(config: FileStoreConfig) -> FileStoreResult<Self> {
        config.validate()?;

        let folder = config.resolved_folder();
        fs::create_dir_all(&folder).map_err(|e| FileStoreError::io(&folder, e))?;

        let naming = FileNaming::from_file_name(config.file_name.as_deref());
        let store = Self {
            rolling_frequency: config.rolling_frequency(),
            max_file_size: config.effective_max_file_size(),
            folder,
            naming,
            config,
            state: Mutex::new(StoreState {
                active: None,
                archived: Vec::new(),
            }),
        };

        let mut existing = store.scan_folder()?;
        let mut active = None;
        if store.config.reuse_existing_file {
            if let Some(index) = store.reusable_index(&existing) {
                let file = existing.remove(index);
                active = Some(store.reopen(file)?);
            }
        }

        let mut archived = Vec::with_capacity(existing.len());
        for file in existing {
            if file.is_active_name {
                archived.push(store.move_to_archive(&file.path, file.created)?);
            } else {
                archived.push(file.path);
            }
        }

        {
            let mut state = store.state.lock();
            state.archived = archived;
            state.active = match active {
                Some(active) => Some(active),
                None => Some(store.create_active()?),
            };
            store.enforce_retention(&mut state);
            tracing::debug!(
                folder = %store.folder.display(),
                archived = state.archived.len(),
                "log file store opened"
            );
        }

        Ok(store)
    }

    pub fn config(&self) -> &FileStoreConfig {
        &self.config
    }

    /// Folder holding the log files
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Path of the file currently receiving writes
    pub fn current_log_path(&self) -> Option<PathBuf> {
        self.state.lock().active.as_ref().map(|a| a.path.clone())
    }

    /// Append one rendered line to the active file
    ///
    /// The line is prefixed with a timestamp, newline-terminated and flushed to
    /// the file before this returns. Events at `LogLevel::OFF` are ignored.
    /// Errors are returned so the caller can decide
    /// whether to surface them; the store stays usable after a failed write.
    pub fn write(&self, level: LogLevel, line: &str) -> FileStoreResult<()> {
        if level.is_off() {
            return Ok(());
        }
        let formatted = format_line(Local::now(), line);

        let mut state = self.state.lock();
        if self.needs_roll(&state, formatted.len() as u64) {
            self.roll(&mut state)?;
        }
        if state.active.is_none() {
            state.active = Some(self.create_active()?);
        }
        let Some(active) = state.active.as_mut() else {
            return Err(FileStoreError::Other(io::Error::other("no active log file")));
        };

        active
            .writer
            .write_all(formatted.as_bytes())
            .and_then(|()| active.writer.flush())
            .map_err(|e| FileStoreError::io(&active.path, e))?;
        active.size += formatted.len() as u64;
        Ok(())
    }

    /// Flush buffered lines to disk
    pub fn flush(&self) -> FileStoreResult<()> {
        let mut state = self.state.lock();
        Self::flush_active(&mut state)
    }

    /// Contents of every retained file, oldest first
    ///
    /// Reflects every write that completed before the call. Writers are only
    /// blocked while the file set is snapshotted, not while it is read.
    pub fn get_logs(&self) -> FileStoreResult<Vec<Vec<u8>>> {
        let snapshot = self.snapshot()?;
        let mut logs = Vec::with_capacity(snapshot.len());
        for (path, file, len) in snapshot {
            let mut data = Vec::with_capacity(len as usize);
            file.take(len)
                .read_to_end(&mut data)
                .map_err(|e| FileStoreError::io(&path, e))?;
            logs.push(data);
        }
        Ok(logs)
    }

    /// Paths of every retained file, oldest first
    pub fn get_log_paths(&self) -> FileStoreResult<Vec<PathBuf>> {
        let mut state = self.state.lock();
        Self::flush_active(&mut state)?;
        Ok(Self::ordered_paths(&state))
    }

    /// Read the logs on the blocking pool of the current tokio runtime
    pub async fn get_logs_async(self: &Arc<Self>) -> FileStoreResult<Vec<Vec<u8>>> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.get_logs())
            .await
            .map_err(|e| FileStoreError::Other(io::Error::other(e.to_string())))?
    }

    /// Read the logs off the calling thread and hand them to `completion`
    ///
    /// The read runs on `runtime`'s blocking pool and `completion` is invoked
    /// from a task on `runtime`.
    pub fn get_logs_with<F>(self: &Arc<Self>, runtime: &Handle, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(FileStoreResult<Vec<Vec<u8>>>) + Send + 'static,
    {
        let store = Arc::clone(self);
        runtime.spawn(async move {
            let result = store.get_logs_async().await;
            completion(result);
        })
    }

    /// Archive the active file and start a new one
    pub fn roll_log_file(&self) -> FileStoreResult<()> {
        let mut state = self.state.lock();
        self.roll(&mut state)
    }

    /// Roll the active file and delete every archived file
    ///
    /// Leaves a fresh, empty active file behind. Files are deleted after the
    /// lock is released; a file that is already gone is not an error.
    pub fn purge_logs(&self) -> FileStoreResult<()> {
        let doomed = {
            let mut state = self.state.lock();
            if let Err(e) = Self::flush_active(&mut state) {
                tracing::warn!(error = %e, "flush before purge failed");
            }
            self.roll(&mut state)?;
            std::mem::take(&mut state.archived)
        };

        let mut first_error = None;
        for path in &doomed {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to delete log file");
                    if first_error.is_none() {
                        first_error = Some(FileStoreError::io(path, e));
                    }
                }
            }
        }
        tracing::debug!(deleted = doomed.len(), "log files purged");

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    // Internals; callers hold the state lock where a `StoreState` is passed.

    fn needs_roll(&self, state: &StoreState, incoming: u64) -> bool {
        let Some(active) = state.active.as_ref() else {
            return false;
        };
        let age = SystemTime::now()
            .duration_since(active.created)
            .unwrap_or_default();
        if age >= self.rolling_frequency {
            return true;
        }
        match self.max_file_size {
            Some(limit) => active.size > 0 && active.size + incoming > limit,
            None => false,
        }
    }

    fn roll(&self, state: &mut StoreState) -> FileStoreResult<()> {
        if let Some(mut active) = state.active.take() {
            if let Err(e) = active.writer.flush() {
                tracing::warn!(path = %active.path.display(), error = %e, "flush before roll failed");
            }
            let ActiveFile { path, writer, created, .. } = active;
            drop(writer);

            match self.move_to_archive(&path, created) {
                Ok(archived) => state.archived.push(archived),
                Err(e) => {
                    state.active = Some(self.reopen_after_failed_roll(path, created)?);
                    return Err(e);
                }
            }
        }

        state.active = Some(self.create_active()?);
        self.enforce_retention(state);
        tracing::debug!(archived = state.archived.len(), "log file rolled");
        Ok(())
    }

    /// Rename a fixed-name file to its archive name; timestamped files stay put
    fn move_to_archive(&self, path: &Path, created: SystemTime) -> FileStoreResult<PathBuf> {
        match self.naming.archive_path(&self.folder, DateTime::<Local>::from(created)) {
            Some(target) => {
                fs::rename(path, &target).map_err(|e| FileStoreError::io(path, e))?;
                Ok(target)
            }
            None => Ok(path.to_path_buf()),
        }
    }

    fn reopen_after_failed_roll(&self, path: PathBuf, created: SystemTime) -> FileStoreResult<ActiveFile> {
        let file = open_append(&path)?;
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(ActiveFile {
            path,
            writer: BufWriter::new(file),
            created,
            size,
        })
    }

    fn create_active(&self) -> FileStoreResult<ActiveFile> {
        fs::create_dir_all(&self.folder).map_err(|e| FileStoreError::io(&self.folder, e))?;
        let path = self.naming.active_path(&self.folder, Local::now());
        let file = open_append(&path)?;
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(ActiveFile {
            path,
            writer: BufWriter::new(file),
            created: SystemTime::now(),
            size,
        })
    }

    fn reopen(&self, existing: ExistingFile) -> FileStoreResult<ActiveFile> {
        let file = open_append(&existing.path)?;
        Ok(ActiveFile {
            path: existing.path,
            writer: BufWriter::new(file),
            created: existing.created,
            size: existing.len,
        })
    }

    /// Delete the oldest archived files beyond `max_files - 1`
    fn enforce_retention(&self, state: &mut StoreState) {
        let keep = (self.config.max_files as usize).saturating_sub(1);
        if state.archived.len() <= keep {
            return;
        }
        let excess = state.archived.len() - keep;
        for path in state.archived.drain(..excess) {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to delete expired log file");
                }
            }
        }
    }

    fn reusable_index(&self, existing: &[ExistingFile]) -> Option<usize> {
        let index = match self.naming {
            FileNaming::Fixed { .. } => existing.iter().position(|f| f.is_active_name)?,
            FileNaming::Timestamped => existing.len().checked_sub(1)?,
        };
        let candidate = &existing[index];
        let age = SystemTime::now()
            .duration_since(candidate.created)
            .unwrap_or_default();
        let fits = self.max_file_size.map_or(true, |limit| candidate.len < limit);
        (age < self.rolling_frequency && fits).then_some(index)
    }

    /// Log files in the folder, oldest first
    fn scan_folder(&self) -> FileStoreResult<Vec<ExistingFile>> {
        let entries = fs::read_dir(&self.folder).map_err(|e| FileStoreError::io(&self.folder, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let Ok(entry) = entry else { continue };
            let Ok(metadata) = entry.metadata() else { continue };
            if !metadata.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !self.naming.is_log_file(name) {
                continue;
            }
            let created = metadata
                .created()
                .or_else(|_| metadata.modified())
                .unwrap_or(UNIX_EPOCH);
            files.push(ExistingFile {
                path: entry.path(),
                created,
                len: metadata.len(),
                is_active_name: self.naming.is_active_name(name),
            });
        }
        files.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.path.cmp(&b.path)));
        Ok(files)
    }

    fn flush_active(state: &mut StoreState) -> FileStoreResult<()> {
        if let Some(active) = state.active.as_mut() {
            active
                .writer
                .flush()
                .map_err(|e| FileStoreError::io(&active.path, e))?;
        }
        Ok(())
    }

    fn ordered_paths(state: &StoreState) -> Vec<PathBuf> {
        state
            .archived
            .iter()
            .cloned()
            .chain(state.active.as_ref().map(|a| a.path.clone()))
            .collect()
    }

    /// Flush, then open every retained file and record its length
    ///
    /// Open handles keep reading valid if a concurrent roll renames or a purge
    /// deletes the file; the recorded length bounds the read to the writes that
    /// completed before the snapshot.
    fn snapshot(&self) -> FileStoreResult<Vec<(PathBuf, File, u64)>> {
        let mut state = self.state.lock();
        Self::flush_active(&mut state)?;

        let mut snapshot = Vec::new();
        for path in Self::ordered_paths(&state) {
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(FileStoreError::io(&path, e)),
            };
            let len = file.metadata().map_err(|e| FileStoreError::io(&path, e))?.len();
            snapshot.push((path, file, len));
        }
        Ok(snapshot)
    }
}

impl Drop for RotatingFileStore {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if let Err(e) = Self::flush_active(state) {
            tracing::warn!(error = %e, "failed to flush log file on shutdown");
        }
    }
}

impl std::fmt::Debug for RotatingFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileStore")
            .field("folder", &self.folder)
            .field("naming", &self.naming)
            .field("rolling_frequency", &self.rolling_frequency)
            .field("max_files", &self.config.max_files)
            .finish()
    }
}

fn open_append(path: &Path) -> FileStoreResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| FileStoreError::io(path, e))
}
