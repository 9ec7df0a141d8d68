use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::logging::picker_trace;
use crate::permissions::mode_flags;

/// Kind of a listed filesystem object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FsEntryKind {
    /// A directory (not a symlink to one).
    Dir,
    /// A regular file (not a symlink to one).
    File,
    /// Symlinks, sockets, devices, ... Never listed by the picker.
    Other,
}

/// Directory entry returned by [`FileSystem::read_dir`].
#[derive(Clone, Debug)]
pub struct FsEntry {
    /// Base name (no parent path)
    pub name: String,
    /// Full path
    pub path: PathBuf,
    /// Object kind.
    pub kind: FsEntryKind,
    /// File size in bytes (0 for directories).
    pub size: u64,
    /// Last modified timestamp (when available).
    pub modified: Option<SystemTime>,
    /// Any read permission bit is set.
    pub readable: bool,
    /// Any write permission bit is set.
    pub writable: bool,
}

/// File system abstraction used by the directory snapshot.
///
/// Permission probes of the listed directory itself always hit the real
/// filesystem; this trait only covers enumeration and directory creation.
pub trait FileSystem {
    /// List the entries of one directory level.
    ///
    /// Entries whose type or metadata cannot be queried are skipped; only a
    /// failure to open `dir` itself is an error.
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FsEntry>>;
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;
    /// Create a directory.
    fn create_dir(&self, path: &Path) -> std::io::Result<()>;
}

/// Default filesystem implementation using `std::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FsEntry>> {
        let mut out = Vec::new();
        let rd = std::fs::read_dir(dir)?;
        for e in rd {
            let e = match e {
                Ok(v) => v,
                Err(_) => continue,
            };
            let ft = match e.file_type() {
                Ok(v) => v,
                Err(_) => {
                    picker_trace!(entry = ?e.path(), "skipping entry without file type");
                    continue;
                }
            };
            let kind = if ft.is_dir() {
                FsEntryKind::Dir
            } else if ft.is_file() {
                FsEntryKind::File
            } else {
                FsEntryKind::Other
            };
            let md = match e.metadata() {
                Ok(v) => v,
                Err(_) => {
                    picker_trace!(entry = ?e.path(), "skipping entry without metadata");
                    continue;
                }
            };
            let (readable, writable) = mode_flags(&md);
            out.push(FsEntry {
                name: e.file_name().to_string_lossy().into_owned(),
                path: e.path(),
                kind,
                size: if kind == FsEntryKind::File { md.len() } else { 0 },
                modified: md.modified().ok(),
                readable,
                writable,
            });
        }
        Ok(out)
    }

    fn exists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    fn create_dir(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir(path)
    }
}
