//! File destination backed by a [`RotatingFileStore`]

use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::state::DestinationCore;
use super::traits::{Destination, DestinationResult};
use crate::file_store::{FileStoreConfig, FileStoreResult, RotatingFileStore};
use crate::types::{Location, LogLevel, Properties};

/// A destination that appends rendered events to rotating log files
///
/// # Example
///
/// ```no_run
/// use multilog_core::destination::{Destination, FileDestination};
/// use multilog_core::file_store::FileStoreConfig;
/// use multilog_core::{location, LogLevel};
///
/// let file = FileDestination::new(
///     "file",
///     LogLevel::ALL,
///     FileStoreConfig::new().with_log_folder("/tmp/app-logs"),
/// ).unwrap();
/// file.log(LogLevel::INFO, "launch", None, None, &location!());
/// let logs = file.get_logs().unwrap();
/// ```
pub struct FileDestination {
    core: DestinationCore,
    store: Arc<RotatingFileStore>,
}

impl FileDestination {
    /// Open a store for `config` and wrap it
    pub fn new(
        identifier: impl Into<String>,
        level: LogLevel,
        config: FileStoreConfig,
    ) -> FileStoreResult<Self> {
        let store = RotatingFileStore::open(config)?;
        Ok(Self::with_store(identifier, level, Arc::new(store)))
    }

    /// Wrap an already opened store
    pub fn with_store(
        identifier: impl Into<String>,
        level: LogLevel,
        store: Arc<RotatingFileStore>,
    ) -> Self {
        Self {
            core: DestinationCore::new(identifier, level, None),
            store,
        }
    }

    pub fn with_default_properties(self, properties: Properties) -> Self {
        self.core.set_default_properties(properties);
        self
    }

    pub fn store(&self) -> &Arc<RotatingFileStore> {
        &self.store
    }

    /// Path of the file currently receiving writes
    pub fn current_log_path(&self) -> Option<PathBuf> {
        self.store.current_log_path()
    }

    /// Contents of every retained file, oldest first
    pub fn get_logs(&self) -> FileStoreResult<Vec<Vec<u8>>> {
        self.store.get_logs()
    }

    pub fn get_log_paths(&self) -> FileStoreResult<Vec<PathBuf>> {
        self.store.get_log_paths()
    }

    pub async fn get_logs_async(&self) -> FileStoreResult<Vec<Vec<u8>>> {
        self.store.get_logs_async().await
    }

    /// See [`RotatingFileStore::get_logs_with`]
    pub fn get_logs_with<F>(&self, runtime: &Handle, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(FileStoreResult<Vec<Vec<u8>>>) + Send + 'static,
    {
        self.store.get_logs_with(runtime, completion)
    }

    pub fn roll_log_file(&self) -> FileStoreResult<()> {
        self.store.roll_log_file()
    }
}

impl Destination for FileDestination {
    fn core(&self) -> &DestinationCore {
        &self.core
    }

    fn log(
        &self,
        level: LogLevel,
        event_name: &str,
        message: Option<&str>,
        _properties: Option<&Properties>,
        location: &Location<'_>,
    ) {
        let line = self.core.render_line(level, event_name, message, location);
        if let Err(e) = self.store.write(level, &line) {
            tracing::warn!(
                destination = self.core.identifier(),
                error = %e,
                "dropping log line"
            );
        }
    }

    fn can_purge(&self) -> bool {
        true
    }

    fn purge_logs(&self) -> DestinationResult<()> {
        self.store.purge_logs()?;
        Ok(())
    }
}

impl std::fmt::Debug for FileDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDestination")
            .field("core", &self.core)
            .field("folder", &self.store.folder())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{properties_from, EventError};
    use tempfile::tempdir;

    fn text(logs: &[Vec<u8>]) -> String {
        logs.iter()
            .map(|l| String::from_utf8_lossy(l).into_owned())
            .collect()
    }

    #[test]
    fn test_log_writes_rendered_line() {
        let dir = tempdir().unwrap();
        let file = FileDestination::new(
            "file",
            LogLevel::ALL,
            FileStoreConfig::new().with_log_folder(dir.path()),
        )
        .unwrap()
        .with_default_properties(properties_from([("user", "alice")]));

        let location = Location::new("src/app.rs", 3, "app::main");
        file.log(LogLevel::INFO, "launch", Some("cold"), None, &location);

        let logs = file.get_logs().unwrap();
        assert_eq!(logs.len(), 1);
        let content = text(&logs);
        assert!(content.ends_with(
            "{✅ \"launch\": {\"message\": \"cold\", \"defaultProperties\": \"user: alice\", \"location\": \"app.rs:app::main:3\"}}\n"
        ));
    }

    #[test]
    fn test_log_error_uses_domain_and_code() {
        let dir = tempdir().unwrap();
        let file = FileDestination::new(
            "file",
            LogLevel::ALL,
            FileStoreConfig::new().with_log_folder(dir.path()),
        )
        .unwrap();

        let error = EventError::new("com.example.sync", 42).with_description("timed out");
        file.log_error(&error, &Location::new("sync.rs", 1, "sync"));

        let content = text(&file.get_logs().unwrap());
        assert!(content.contains("🛑 \"com.example.sync, 42\""));
        assert!(content.contains("\"message\": \"timed out\""));
    }

    #[test]
    fn test_purge_and_current_path() {
        let dir = tempdir().unwrap();
        let file = FileDestination::new(
            "file",
            LogLevel::ALL,
            FileStoreConfig::new().with_log_folder(dir.path()).with_max_files(3),
        )
        .unwrap();
        let location = Location::new("a.rs", 1, "a");

        assert!(file.can_purge());
        let path = file.current_log_path().unwrap();
        assert!(path.starts_with(dir.path()));

        file.log(LogLevel::DEBUG, "one", None, None, &location);
        file.roll_log_file().unwrap();
        file.log(LogLevel::DEBUG, "two", None, None, &location);
        assert_eq!(file.get_log_paths().unwrap().len(), 2);

        file.purge_logs().unwrap();
        let logs = file.get_logs().unwrap();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].is_empty());
    }

    #[tokio::test]
    async fn test_get_logs_async() {
        let dir = tempdir().unwrap();
        let file = FileDestination::new(
            "file",
            LogLevel::ALL,
            FileStoreConfig::new().with_log_folder(dir.path()),
        )
        .unwrap();
        file.log(LogLevel::INFO, "async", None, None, &Location::new("a.rs", 1, "a"));

        let logs = file.get_logs_async().await.unwrap();
        assert!(text(&logs).contains("\"async\""));
    }
}
