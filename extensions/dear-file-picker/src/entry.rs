use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};

use crate::fs::FsEntry;

/// Name and type tag of the synthetic parent-navigation entry.
pub const PARENT_MARKER: &str = "..";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What a listed row stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// Synthetic `..` row pointing at the parent directory.
    Parent,
    /// A subdirectory.
    Directory,
    /// A regular file.
    File,
}

/// One row of a directory listing, with cached metadata.
#[derive(Clone, Debug)]
pub struct Entry {
    pub(crate) path: PathBuf,
    pub(crate) name: String,
    pub(crate) kind: EntryKind,
    pub(crate) file_type: String,
    pub(crate) size: u64,
    pub(crate) modified_ms: u64,
    pub(crate) modified_label: String,
    pub(crate) read: bool,
    pub(crate) write: bool,
    pub(crate) index: usize,
    pub(crate) selected: bool,
}

impl Entry {
    pub(crate) fn parent(path: PathBuf, read: bool) -> Self {
        Self {
            path,
            name: PARENT_MARKER.into(),
            kind: EntryKind::Parent,
            file_type: PARENT_MARKER.into(),
            size: 0,
            modified_ms: 0,
            modified_label: PARENT_MARKER.into(),
            read,
            write: false,
            index: 0,
            selected: false,
        }
    }

    /// Directories are listed with their read bit only; they are not write-probed.
    pub(crate) fn directory(fs_entry: FsEntry, index: usize) -> Self {
        Self {
            path: fs_entry.path,
            name: fs_entry.name,
            kind: EntryKind::Directory,
            file_type: String::new(),
            size: 0,
            modified_ms: 0,
            modified_label: String::new(),
            read: fs_entry.readable,
            write: false,
            index,
            selected: false,
        }
    }

    pub(crate) fn file(fs_entry: FsEntry, index: usize) -> Self {
        let file_type = extension_tag(&fs_entry.path);
        let (modified_ms, modified_label) = match fs_entry.modified {
            Some(t) => (epoch_millis(t), format_time(t)),
            None => (0, String::new()),
        };
        Self {
            path: fs_entry.path,
            name: fs_entry.name,
            kind: EntryKind::File,
            file_type,
            size: fs_entry.size,
            modified_ms,
            modified_label,
            read: fs_entry.readable,
            write: fs_entry.writable,
            index,
            selected: false,
        }
    }

    /// Absolute path of the entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Display name (`..` for the parent entry).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Row kind.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Extension including the dot (`.txt`), empty for directories, `..` for the parent entry.
    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    /// Size in bytes (0 for directories).
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Last modification time as milliseconds since the Unix epoch (0 if unknown).
    pub fn modified_ms(&self) -> u64 {
        self.modified_ms
    }

    /// Last modification time formatted as local `YYYY-MM-DD HH:MM:SS`.
    pub fn modified_label(&self) -> &str {
        &self.modified_label
    }

    /// Whether the entry could be read when listed.
    pub fn can_read(&self) -> bool {
        self.read
    }

    /// Whether the entry carried a write bit when listed (files only).
    pub fn can_write(&self) -> bool {
        self.write
    }

    /// Position-stable index within its own collection.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the entry is part of the current selection.
    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

fn extension_tag(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

fn epoch_millis(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

fn format_time(t: SystemTime) -> String {
    let dt: DateTime<Local> = DateTime::<Local>::from(t);
    dt.format(TIME_FORMAT).to_string()
}

#[cfg(test)]
pub(crate) fn test_file(name: &str, size: u64, modified_ms: u64, index: usize) -> Entry {
    use crate::fs::FsEntryKind;
    use std::time::Duration;

    Entry::file(
        FsEntry {
            name: name.to_string(),
            path: PathBuf::from("/tmp/picker").join(name),
            kind: FsEntryKind::File,
            size,
            modified: Some(UNIX_EPOCH + Duration::from_millis(modified_ms)),
            readable: true,
            writable: true,
        },
        index,
    )
}
