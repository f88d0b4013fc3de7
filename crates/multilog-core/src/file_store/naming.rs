//! Log file naming and line formatting

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

const TIMESTAMPED_PREFIX: &str = "log ";
const TIMESTAMPED_EXTENSION: &str = "log";

/// How files in the log folder are named
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNaming {
    /// Active file always has the configured name; rolled files get the
    /// creation date appended to the stem
    Fixed {
        name: String,
        stem: String,
        extension: Option<String>,
    },
    /// Every file is named after the moment it was created
    Timestamped,
}

impl FileNaming {
    pub fn from_file_name(file_name: Option<&str>) -> Self {
        match file_name {
            Some(name) => {
                let path = Path::new(name);
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| name.to_string());
                let extension = path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned());
                FileNaming::Fixed {
                    name: name.to_string(),
                    stem,
                    extension,
                }
            }
            None => FileNaming::Timestamped,
        }
    }

    /// Path for a new active file
    pub fn active_path(&self, folder: &Path, now: DateTime<Local>) -> PathBuf {
        match self {
            FileNaming::Fixed { name, .. } => folder.join(name),
            FileNaming::Timestamped => {
                let base = format!(
                    "{}{}",
                    TIMESTAMPED_PREFIX,
                    now.format("%Y-%m-%d--%H-%M-%S-%3f")
                );
                unique_path(folder, &base, Some(TIMESTAMPED_EXTENSION))
            }
        }
    }

    /// Path a rolled file moves to, `None` when it keeps its name
    pub fn archive_path(&self, folder: &Path, created: DateTime<Local>) -> Option<PathBuf> {
        match self {
            FileNaming::Fixed { stem, extension, .. } => {
                let base = format!("{} {}", stem, created.format("%Y-%m-%d %H-%M-%S"));
                Some(unique_path(folder, &base, extension.as_deref()))
            }
            FileNaming::Timestamped => None,
        }
    }

    /// Whether a file found in the log folder belongs to this store
    pub fn is_log_file(&self, file_name: &str) -> bool {
        let path = Path::new(file_name);
        let extension = path.extension().and_then(|e| e.to_str());
        match self {
            FileNaming::Fixed {
                name,
                stem,
                extension: expected,
            } => {
                file_name == name.as_str()
                    || (extension == expected.as_deref()
                        && file_name.starts_with(&format!("{} ", stem)))
            }
            FileNaming::Timestamped => {
                extension == Some(TIMESTAMPED_EXTENSION) && file_name.starts_with(TIMESTAMPED_PREFIX)
            }
        }
    }

    /// Whether `file_name` is the fixed active file
    pub fn is_active_name(&self, file_name: &str) -> bool {
        match self {
            FileNaming::Fixed { name, .. } => name == file_name,
            FileNaming::Timestamped => false,
        }
    }
}

/// First of `base.ext`, `base 1.ext`, `base 2.ext`, ... that does not exist
fn unique_path(folder: &Path, base: &str, extension: Option<&str>) -> PathBuf {
    let file_name = |suffix: Option<u32>| {
        let mut name = base.to_string();
        if let Some(n) = suffix {
            name.push_str(&format!(" {}", n));
        }
        if let Some(ext) = extension {
            name.push('.');
            name.push_str(ext);
        }
        name
    };

    let candidate = folder.join(file_name(None));
    if !candidate.exists() {
        return candidate;
    }
    let mut n = 1;
    loop {
        let candidate = folder.join(file_name(Some(n)));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Prefix a rendered event with its timestamp and terminate the line
///
/// Trailing line breaks in `line` are dropped so every event occupies exactly
/// one physical line.
pub fn format_line(timestamp: DateTime<Local>, line: &str) -> String {
    format!(
        "{} {}\n",
        timestamp.format("%Y/%m/%d %H:%M:%S:%3f %z"),
        line.trim_end_matches(['\r', '\n'])
    )
}
