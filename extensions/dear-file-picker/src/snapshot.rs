use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::{SelectionMode, SortSpec};
use crate::entry::Entry;
use crate::fs::{FileSystem, FsEntryKind, StdFileSystem};
use crate::glob_filter::GlobFilter;
use crate::logging::{picker_debug, picker_trace};
use crate::name_buffer::NameBuffer;
use crate::path_resolver::resolve_start;
use crate::permissions::{can_read, can_write};
use crate::selection::SelectionSet;
use crate::sorter::sort_files;

/// One directory level, listed and annotated.
///
/// Directories come first in `dirs` (with the `..` entry at slot 0 when the
/// directory has a parent), files in `files`. Only files are selectable, and
/// within `files` every entry's index equals its position.
#[derive(Clone, Debug)]
pub struct Snapshot {
    path: PathBuf,
    dirs: Vec<Entry>,
    files: Vec<Entry>,
    filter_index: usize,
    sort: Option<SortSpec>,
    buffer: NameBuffer,
    selection: SelectionSet,
    read: bool,
    write: bool,
    pub(crate) accepted: bool,
    pub(crate) peeked: bool,
}

impl Snapshot {
    /// Load a directory from the real filesystem.
    ///
    /// The active filter index and sort spec are carried over from `previous`,
    /// which is dropped afterwards.
    pub fn load(previous: Option<Snapshot>, hint: Option<&Path>, filters: &[String]) -> Self {
        Self::load_with_fs(&StdFileSystem, previous, hint, filters)
    }

    /// Load a directory through a custom [`FileSystem`].
    ///
    /// Only enumeration goes through `fs`. Resolving the start location and
    /// the read/write probes always use the real filesystem.
    pub fn load_with_fs(
        fs: &dyn FileSystem,
        previous: Option<Snapshot>,
        hint: Option<&Path>,
        filters: &[String],
    ) -> Self {
        let _started = Instant::now();
        let start = resolve_start(hint);
        let (filter_index, sort) = previous
            .map(|prev| (prev.filter_index, prev.sort))
            .unwrap_or((0, None));

        let mut read = can_read(&start.dir);
        let write = can_write(&start.dir);

        let mut dirs = Vec::new();
        if let Some(parent) = start.dir.parent() {
            dirs.push(Entry::parent(parent.to_path_buf(), can_read(parent)));
        }

        let filter = GlobFilter::from_patterns(filters, filter_index);
        let mut files = Vec::new();
        match fs.read_dir(&start.dir) {
            Ok(listing) => {
                for fs_entry in listing {
                    match fs_entry.kind {
                        FsEntryKind::Dir => {
                            let index = dirs.len();
                            dirs.push(Entry::directory(fs_entry, index));
                        }
                        FsEntryKind::File if filter.matches(&fs_entry.name) => {
                            let index = files.len();
                            files.push(Entry::file(fs_entry, index));
                        }
                        FsEntryKind::File => {}
                        FsEntryKind::Other => {
                            picker_trace!(entry = %fs_entry.path.display(), "skipping non-regular entry");
                        }
                    }
                }
            }
            Err(_err) => {
                read = false;
                picker_debug!(dir = %start.dir.display(), err = %_err, "directory could not be listed");
            }
        }

        if let Some(spec) = sort {
            sort_files(&mut files, spec);
        }

        let mut buffer = NameBuffer::new();
        if let Some(name) = &start.file_name {
            buffer.set(name);
        }

        picker_debug!(
            target: "dear_file_picker::snapshot",
            dir = %start.dir.display(),
            dirs = dirs.len(),
            files = files.len(),
            read,
            write,
            elapsed_us = u64::try_from(_started.elapsed().as_micros()).unwrap_or(u64::MAX),
            "snapshot.loaded"
        );

        Self {
            path: start.dir,
            dirs,
            files,
            filter_index,
            sort,
            buffer,
            selection: SelectionSet::new(),
            read,
            write,
            accepted: false,
            peeked: true,
        }
    }

    /// Re-list the same directory from the real filesystem.
    pub fn reload(self, filters: &[String]) -> Self {
        self.reload_with_fs(&StdFileSystem, filters)
    }

    /// Re-list the same directory through a custom [`FileSystem`].
    pub fn reload_with_fs(self, fs: &dyn FileSystem, filters: &[String]) -> Self {
        let dir = self.path.clone();
        Self::load_with_fs(fs, Some(self), Some(&dir), filters)
    }

    /// Absolute path of the listed directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory rows, parent entry first when present.
    pub fn dirs(&self) -> &[Entry] {
        &self.dirs
    }

    /// File rows in display order.
    pub fn files(&self) -> &[Entry] {
        &self.files
    }

    /// Index of the active filter pattern.
    pub fn filter_index(&self) -> usize {
        self.filter_index
    }

    /// Active sort, if any.
    pub fn sort_spec(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Contents of the name input.
    pub fn buffer(&self) -> &str {
        self.buffer.as_str()
    }

    /// Current selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Number of selected files.
    pub fn count_selected(&self) -> usize {
        self.selection.len()
    }

    /// The `n`-th selected file, in selection order.
    pub fn selected_file(&self, n: usize) -> Option<&Entry> {
        self.selection.get(n).and_then(|i| self.files.get(i))
    }

    /// Whether the listed directory was readable at load time.
    pub fn can_read(&self) -> bool {
        self.read
    }

    /// Whether the listed directory was writable at load time.
    pub fn can_write(&self) -> bool {
        self.write
    }

    /// Whether an accepted result is waiting to be collected.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Whether the current state has already been previewed.
    pub fn is_peeked(&self) -> bool {
        self.peeked
    }

    /// Make file `i` the only selected one.
    pub fn select_single(&mut self, i: usize) -> bool {
        self.peeked = false;
        self.selection.select_single(&mut self.files, i)
    }

    /// Add file `i` to the selection.
    pub fn select_add(&mut self, i: usize) -> bool {
        self.peeked = false;
        self.selection.select_add(&mut self.files, i)
    }

    /// Extend the selection to the span covering it and file `i`.
    pub fn select_range(&mut self, i: usize) -> bool {
        self.peeked = false;
        self.selection.select_range(&mut self.files, i)
    }

    /// Clear the selection. The name input is cleared too when it held
    /// several joined names.
    pub fn unselect_all(&mut self) {
        self.peeked = false;
        if self.selection.unselect_all(&mut self.files) > 1 {
            self.buffer.clear();
        }
    }

    /// Apply a click on file `i` and mirror the selection into the name input.
    pub fn click_file(&mut self, i: usize, mode: SelectionMode) -> bool {
        let changed = match mode {
            SelectionMode::Replace => self.select_single(i),
            SelectionMode::Add => self.select_add(i),
            SelectionMode::Range => self.select_range(i),
        };
        self.selection.sync_buffer(&self.files, &mut self.buffer);
        changed
    }

    /// Sort the files and remember the spec for later reloads.
    ///
    /// Positions change, so the selection is cleared. Dropping a selection
    /// invalidates the last preview; a reorder of nothing selected does not.
    pub fn sort_by(&mut self, spec: SortSpec) {
        let dropped = self.selection.unselect_all(&mut self.files);
        if dropped > 0 {
            self.peeked = false;
        }
        if dropped > 1 {
            self.buffer.clear();
        }
        self.sort = Some(spec);
        sort_files(&mut self.files, spec);
    }

    /// Replace the name input (truncated to capacity).
    pub fn set_buffer(&mut self, text: &str) {
        self.peeked = false;
        self.buffer.set(text);
    }

    /// Clear the name input.
    pub fn clear_buffer(&mut self) {
        self.peeked = false;
        self.buffer.clear();
    }

    /// Re-probe directory row `i` before entering it.
    ///
    /// Returns its path when it can still be listed; otherwise the row is
    /// marked unreadable.
    pub(crate) fn enterable_dir(&mut self, i: usize) -> Option<PathBuf> {
        let entry = self.dirs.get_mut(i)?;
        if !entry.read {
            return None;
        }
        entry.read = can_read(&entry.path);
        entry.read.then(|| entry.path.clone())
    }

    /// Switch the active filter. Takes effect on the next reload.
    pub(crate) fn set_filter_index(&mut self, index: usize) {
        self.filter_index = index;
    }
}
