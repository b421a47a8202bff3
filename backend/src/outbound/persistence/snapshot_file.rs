//! JSON snapshot file access through `cap_std` directory handles.
//!
//! Writes go to a hidden temporary file beside the target which is then
//! renamed over it, so readers never observe a partially written snapshot.

use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use thiserror::Error;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Raised when a snapshot path does not name a file.
#[derive(Debug, Error)]
#[error("snapshot path {path} must name a file")]
pub struct SnapshotPathError {
    /// Rejected path.
    pub path: PathBuf,
}

/// Location of the persisted user snapshot.
///
/// # Examples
/// ```
/// use users_backend::outbound::persistence::UserSnapshotFile;
///
/// let file = UserSnapshotFile::new("Data/users.json").expect("valid path");
/// assert_eq!(file.path().to_str(), Some("Data/users.json"));
/// assert!(UserSnapshotFile::new("Data/..").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct UserSnapshotFile {
    path: PathBuf,
    parent: PathBuf,
    file_name: OsString,
}

impl UserSnapshotFile {
    /// Validate `path` as a snapshot file location.
    ///
    /// # Errors
    /// Returns [`SnapshotPathError`] when `path` has no file name component.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, SnapshotPathError> {
        let path = path.as_ref();
        let Some(file_name) = path.file_name() else {
            return Err(SnapshotPathError {
                path: path.to_path_buf(),
            });
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self {
            path: path.to_path_buf(),
            parent,
            file_name: file_name.to_os_string(),
        })
    }

    /// Full snapshot path as configured.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot contents, or `None` when the file does not exist.
    ///
    /// # Errors
    /// Propagates I/O failures other than a missing file or directory.
    pub fn read(&self) -> io::Result<Option<String>> {
        let dir = match Dir::open_ambient_dir(&self.parent, ambient_authority()) {
            Ok(dir) => dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        match dir.read_to_string(Path::new(&self.file_name)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Replace the snapshot with `contents`, creating the directory if needed.
    ///
    /// # Errors
    /// Propagates directory creation, write, and rename failures.
    pub fn write(&self, contents: &str) -> io::Result<()> {
        Dir::create_ambient_dir_all(&self.parent, ambient_authority())?;
        let dir = Dir::open_ambient_dir(&self.parent, ambient_authority())?;
        let tmp_name = temp_name(&self.file_name);

        if let Err(err) = write_temp(&dir, &tmp_name, contents) {
            drop(dir.remove_file(&tmp_name));
            return Err(err);
        }
        if let Err(err) = dir.rename(&tmp_name, &dir, Path::new(&self.file_name)) {
            drop(dir.remove_file(&tmp_name));
            return Err(err);
        }
        Ok(())
    }
}

fn temp_name(file_name: &OsStr) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!(
        ".{}.tmp.{}.{counter}",
        file_name.to_string_lossy(),
        std::process::id()
    )
}

fn write_temp(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}
