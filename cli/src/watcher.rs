use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Polls a presentation file for modifications.
#[derive(Debug)]
pub struct FileWatcher {
    path: PathBuf,
    last_modified: Option<SystemTime>,
}

impl FileWatcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let last_modified = modified(&path);
        FileWatcher {
            path,
            last_modified,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once per modification. A file that cannot be inspected is
    /// treated as unchanged.
    pub fn changed(&mut self) -> bool {
        match modified(&self.path) {
            Some(time) if Some(time) != self.last_modified => {
                self.last_modified = Some(time);
                true
            }
            _ => false,
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
