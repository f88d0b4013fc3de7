//! Rotating file storage for file-backed destinations
//!
//! - `FileStoreConfig`: rolling frequency, retention and naming options
//! - `RotatingFileStore`: concurrent write/read/purge over the log folder

mod error;
mod config;
mod naming;
mod store;

pub use error::{FileStoreError, FileStoreResult};
pub use config::{FileStoreConfig, DEFAULT_MAX_FILE_SIZE_BYTES, DEFAULT_ROLLING_FREQUENCY_SECS};
pub use naming::{FileNaming, format_line};
pub use store::RotatingFileStore;
