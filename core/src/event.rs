//! File creation events produced by the directory watcher.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A newly created file observed in the watched directory.
///
/// Carries no identity beyond the path; duplicate creations produce
/// duplicate events and are delivered as such.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEvent {
    /// Absolute path of the created file.
    pub path: PathBuf,

    /// When the event was observed.
    pub timestamp: DateTime<Utc>,
}

impl FileEvent {
    /// Create a new file event.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timestamp: Utc::now(),
        }
    }

    /// Display name for the event: the file's basename, or the full path
    /// when there is no final component.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// The event path as a borrowed [`Path`].
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_event_creation() {
        let event = FileEvent::new("/data/report.txt");
        assert_eq!(event.path, Path::new("/data/report.txt"));
    }

    #[test]
    fn test_file_name_is_basename() {
        let event = FileEvent::new("/data/sub dir/report.txt");
        assert_eq!(event.file_name(), "report.txt");
    }

    #[test]
    fn test_file_name_without_final_component() {
        let event = FileEvent::new("/");
        assert_eq!(event.file_name(), "/");
    }
}
