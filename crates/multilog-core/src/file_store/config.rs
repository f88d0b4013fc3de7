//! File store configuration
//!
//! Configuration is plain data so that the surrounding application can load it
//! from YAML or JSON alongside its other settings.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{FileStoreError, FileStoreResult};

/// Two days, in seconds
pub const DEFAULT_ROLLING_FREQUENCY_SECS: f64 = 48.0 * 60.0 * 60.0;

/// Size limit applied when `max_file_size_bytes` is not set
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 1024 * 1024;

/// Configuration for a [`RotatingFileStore`](super::RotatingFileStore)
///
/// # Example
///
/// ```
/// use multilog_core::file_store::FileStoreConfig;
///
/// let config = FileStoreConfig::from_yaml_str(
///     "rolling_frequency_secs: 3600\nmax_files: 5\nfile_name: app.log\n",
/// ).unwrap();
/// assert_eq!(config.max_files, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// Maximum age of the active file before it rolls
    pub rolling_frequency_secs: f64,

    /// Folder holding the log files (platform cache folder when unset)
    pub log_folder: Option<PathBuf>,

    /// Fixed file name including extension (timestamped names when unset)
    pub file_name: Option<String>,

    /// Maximum number of files kept on disk, active file included
    pub max_files: u32,

    /// Size at which the active file rolls. `None` applies the 1 MiB
    /// default, `Some(0)` disables size-based rolling.
    pub max_file_size_bytes: Option<u64>,

    /// Continue appending to the newest existing file instead of starting a
    /// new one for every session
    pub reuse_existing_file: bool,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            rolling_frequency_secs: DEFAULT_ROLLING_FREQUENCY_SECS,
            log_folder: None,
            file_name: None,
            max_files: 1,
            max_file_size_bytes: None,
            reuse_existing_file: false,
        }
    }
}

impl FileStoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolling_frequency(mut self, frequency: Duration) -> Self {
        self.rolling_frequency_secs = frequency.as_secs_f64();
        self
    }

    pub fn with_log_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.log_folder = Some(folder.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_max_files(mut self, max_files: u32) -> Self {
        self.max_files = max_files;
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size_bytes = Some(bytes);
        self
    }

    pub fn with_reuse_existing_file(mut self, reuse: bool) -> Self {
        self.reuse_existing_file = reuse;
        self
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> FileStoreResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| FileStoreError::Parse(format!("Failed to parse YAML: {}", e)))
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> FileStoreResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FileStoreError::Parse(format!("Failed to parse JSON: {}", e)))
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> FileStoreResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| FileStoreError::io(path, e))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> FileStoreResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| FileStoreError::Parse(format!("Failed to serialize YAML: {}", e)))
    }

    /// Reject configurations the store cannot honour
    pub fn validate(&self) -> FileStoreResult<()> {
        let frequency_ok = self.rolling_frequency_secs > 0.0
            && Duration::try_from_secs_f64(self.rolling_frequency_secs).is_ok();
        if !frequency_ok {
            return Err(FileStoreError::invalid_config(format!(
                "rolling frequency must be a positive number of seconds, got {}",
                self.rolling_frequency_secs
            )));
        }
        if self.max_files == 0 {
            return Err(FileStoreError::invalid_config(
                "max_files must be at least 1",
            ));
        }
        if let Some(name) = &self.file_name {
            let stem = Path::new(name).file_stem().and_then(|s| s.to_str());
            if name.contains(['/', '\\']) || stem.map_or(true, str::is_empty) {
                return Err(FileStoreError::invalid_config(format!(
                    "file_name must be a bare file name, got {:?}",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn rolling_frequency(&self) -> Duration {
        Duration::try_from_secs_f64(self.rolling_frequency_secs).unwrap_or(Duration::MAX)
    }

    /// Effective size limit, `None` when size-based rolling is disabled
    pub fn effective_max_file_size(&self) -> Option<u64> {
        match self.max_file_size_bytes {
            None => Some(DEFAULT_MAX_FILE_SIZE_BYTES),
            Some(0) => None,
            Some(bytes) => Some(bytes),
        }
    }

    /// Folder the store writes into
    pub fn resolved_folder(&self) -> PathBuf {
        match &self.log_folder {
            Some(folder) => folder.clone(),
            None => Self::default_folder(),
        }
    }

    /// Platform cache folder (`~/.cache/multilog/logs` on Linux)
    pub fn default_folder() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("multilog")
            .join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = FileStoreConfig::default();
        assert_eq!(config.rolling_frequency(), Duration::from_secs(172_800));
        assert_eq!(config.max_files, 1);
        assert!(!config.reuse_existing_file);
        assert_eq!(config.effective_max_file_size(), Some(DEFAULT_MAX_FILE_SIZE_BYTES));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial_document_uses_defaults() {
        let config = FileStoreConfig::from_yaml_str("max_files: 7\nreuse_existing_file: true\n").unwrap();
        assert_eq!(config.max_files, 7);
        assert!(config.reuse_existing_file);
        assert_eq!(config.rolling_frequency_secs, DEFAULT_ROLLING_FREQUENCY_SECS);
        assert!(config.file_name.is_none());
    }

    #[test]
    fn test_json_document() {
        let config = FileStoreConfig::from_json_str(
            r#"{"rolling_frequency_secs": 1.5, "log_folder": "/tmp/logs", "max_file_size_bytes": 0}"#,
        )
        .unwrap();
        assert_eq!(config.rolling_frequency(), Duration::from_millis(1500));
        assert_eq!(config.log_folder, Some(PathBuf::from("/tmp/logs")));
        assert_eq!(config.effective_max_file_size(), None);
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            FileStoreConfig::from_yaml_str("max_files: [1, 2]"),
            Err(FileStoreError::Parse(_))
        ));
        assert!(matches!(
            FileStoreConfig::from_json_str("{"),
            Err(FileStoreError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_frequency = FileStoreConfig::new().with_rolling_frequency(Duration::ZERO);
        assert!(matches!(zero_frequency.validate(), Err(FileStoreError::InvalidConfig(_))));

        let nan = FileStoreConfig {
            rolling_frequency_secs: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());

        let no_files = FileStoreConfig::new().with_max_files(0);
        assert!(no_files.validate().is_err());

        let nested_name = FileStoreConfig::new().with_file_name("logs/app.log");
        assert!(nested_name.validate().is_err());

        let empty_stem = FileStoreConfig::new().with_file_name("");
        assert!(empty_stem.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();

        let yaml_path = dir.path().join("logging.yaml");
        fs::write(&yaml_path, "file_name: app.log\nmax_files: 3\n").unwrap();
        let config = FileStoreConfig::load(&yaml_path).unwrap();
        assert_eq!(config.file_name.as_deref(), Some("app.log"));

        let json_path = dir.path().join("logging.json");
        fs::write(&json_path, r#"{"max_files": 4}"#).unwrap();
        assert_eq!(FileStoreConfig::load(&json_path).unwrap().max_files, 4);

        let missing = FileStoreConfig::load(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(FileStoreError::Io { .. })));
    }

    #[test]
    fn test_yaml_roundtrip_is_readable() {
        let config = FileStoreConfig::new().with_file_name("app.log").with_max_files(2);
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("app.log"));
        assert_eq!(FileStoreConfig::from_yaml_str(&yaml).unwrap(), config);
    }
}
