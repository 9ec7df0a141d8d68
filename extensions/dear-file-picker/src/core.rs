use std::path::{Path, PathBuf};
use thiserror::Error;

/// Sort keys for the file list
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Sort by file name (byte-wise, case-sensitive)
    Name,
    /// Sort by file size in bytes
    Size,
    /// Sort by file type (extension, byte-wise)
    Type,
    /// Sort by last modified time
    Modified,
}

/// Sort direction for the file list
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

/// A complete sort request (key + direction).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SortSpec {
    /// Column to sort by.
    pub key: SortKey,
    /// Direction of the ordering.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Create a sort spec.
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Ascending sort by `key`.
    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    /// Descending sort by `key`.
    pub fn descending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Descending)
    }
}

/// Keyboard modifier keys held while clicking a row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Ctrl key held.
    pub ctrl: bool,
    /// Shift key held.
    pub shift: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
    };

    /// Only Ctrl held.
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
    };

    /// Only Shift held.
    pub const SHIFT: Self = Self {
        ctrl: false,
        shift: true,
    };

    /// Maps held modifiers to a selection mode.
    ///
    /// Ctrl wins over Shift. Without multi-selection every click replaces.
    pub fn selection_mode(self, multi_select: bool) -> SelectionMode {
        if multi_select && self.ctrl {
            SelectionMode::Add
        } else if multi_select && self.shift {
            SelectionMode::Range
        } else {
            SelectionMode::Replace
        }
    }
}

/// How a click on a file row changes the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    /// Replace the selection with the clicked row.
    Replace,
    /// Add the clicked row to the selection (Ctrl-click).
    Add,
    /// Extend the selection to a contiguous range (Shift-click).
    Range,
}

/// User-facing labels used by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labels {
    /// Accept button of the main dialog.
    pub main_accept: String,
    /// Cancel button of the main dialog.
    pub main_cancel: String,
    /// "Create directory" button of the main dialog.
    pub main_create: String,
    /// Title of the new-directory popup.
    pub dir_title: String,
    /// Prompt shown above the new-directory name input.
    pub dir_input: String,
    /// Accept button of the new-directory popup.
    pub dir_accept: String,
    /// Cancel button of the new-directory popup.
    pub dir_cancel: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            main_accept: "Select".into(),
            main_cancel: "Cancel".into(),
            main_create: "New Directory".into(),
            dir_title: "New Folder".into(),
            dir_input: "Enter a new folder name:".into(),
            dir_accept: "OK".into(),
            dir_cancel: "Cancel".into(),
        }
    }
}

/// Builder describing how a picker dialog should be opened.
///
/// Examples
/// ```
/// use dear_file_picker::{FilePicker, OpenRequest};
/// let mut picker = FilePicker::new();
/// picker.open(
///     "Open##docs",
///     OpenRequest::new()
///         .path(std::env::temp_dir())
///         .filters(["*.md", "*.txt", "*"])
///         .accept_empty(true),
/// );
/// assert!(picker.is_open());
/// ```
#[derive(Clone, Debug, Default)]
pub struct OpenRequest {
    pub(crate) start_path: Option<PathBuf>,
    pub(crate) filters: Vec<String>,
    pub(crate) labels: Labels,
    pub(crate) read_only: bool,
    pub(crate) accept_empty: bool,
    pub(crate) dir_only: bool,
    pub(crate) multi_select: bool,
}

impl OpenRequest {
    /// Create a request with default settings (current directory, no filters).
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting location: a directory, or a file whose name seeds the name input.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.start_path = Some(path.into());
        self
    }

    /// Add one glob pattern (`*.rs`, `notes.*`, ...).
    pub fn filter(mut self, pattern: impl Into<String>) -> Self {
        self.filters.push(pattern.into());
        self
    }

    /// Add several glob patterns. The first one is active when the dialog opens.
    pub fn filters<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Override the default labels.
    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Only read permission is required to pick a file (open dialogs).
    pub fn read_only(mut self, yes: bool) -> Self {
        self.read_only = yes;
        self
    }

    /// Allow accepting with an empty name (yields the current directory).
    pub fn accept_empty(mut self, yes: bool) -> Self {
        self.accept_empty = yes;
        self
    }

    /// Show and accept directories only; files are listed but not selectable.
    pub fn dir_only(mut self, yes: bool) -> Self {
        self.dir_only = yes;
        self
    }

    /// Enable Ctrl/Shift multi-selection from the first frame.
    pub fn multi_select(mut self, yes: bool) -> Self {
        self.multi_select = yes;
        self
    }

    /// Starting location, if any.
    pub fn start_path(&self) -> Option<&Path> {
        self.start_path.as_deref()
    }

    /// Configured glob patterns.
    pub fn patterns(&self) -> &[String] {
        &self.filters
    }

    /// Whether only read permission is required.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Whether directories-only mode is active.
    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    /// Whether an empty acceptance is allowed. Directory pickers always allow it.
    pub fn allows_empty(&self) -> bool {
        self.accept_empty || self.dir_only
    }
}

/// Errors reported by the picker engine.
///
/// Almost every engine operation is total; this type is only returned where a
/// caller is expected to react (e.g. re-prompt for a directory name).
#[derive(Error, Debug)]
pub enum PickerError {
    /// No directory snapshot is loaded (dialog closed or not yet shown).
    #[error("no directory loaded")]
    NotLoaded,
    /// The dialog was opened read-only.
    #[error("dialog is read-only")]
    ReadOnly,
    /// The current directory does not allow writing.
    #[error("directory is not writable: {}", .0.display())]
    NotWritable(PathBuf),
    /// The requested name is empty or contains a path separator.
    #[error("invalid name: {0:?}")]
    InvalidName(String),
    /// Target already exists.
    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_map_to_modes_only_when_multi_select() {
        assert_eq!(Modifiers::CTRL.selection_mode(false), SelectionMode::Replace);
        assert_eq!(Modifiers::SHIFT.selection_mode(false), SelectionMode::Replace);
        assert_eq!(Modifiers::CTRL.selection_mode(true), SelectionMode::Add);
        assert_eq!(Modifiers::SHIFT.selection_mode(true), SelectionMode::Range);
        let both = Modifiers {
            ctrl: true,
            shift: true,
        };
        assert_eq!(both.selection_mode(true), SelectionMode::Add);
        assert_eq!(Modifiers::NONE.selection_mode(true), SelectionMode::Replace);
    }

    #[test]
    fn dir_only_implies_accept_empty() {
        let req = OpenRequest::new().dir_only(true);
        assert!(req.allows_empty());
        assert!(!OpenRequest::new().allows_empty());
        assert!(OpenRequest::new().accept_empty(true).allows_empty());
    }

    #[test]
    fn filters_keep_insertion_order() {
        let req = OpenRequest::new().filter("*.md").filters(["*.txt", "*"]);
        assert_eq!(req.patterns(), ["*.md", "*.txt", "*"]);
    }
}
