use std::path::{Path, PathBuf};

use crate::core::{Labels, Modifiers, OpenRequest, PickerError, SortSpec};
use crate::fs::{FileSystem, StdFileSystem};
use crate::logging::picker_debug;
use crate::path_resolver::make_absolute;
use crate::protocol::ResultProtocol;
use crate::snapshot::Snapshot;

/// Input decoded by the presentation layer for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerEvent {
    /// Enter directory row `i` (`0` is the parent entry when present).
    OpenDirectory(usize),
    /// Click a file row.
    ClickFile {
        /// Position in the files collection.
        index: usize,
        /// Modifier keys held during the click.
        modifiers: Modifiers,
    },
    /// Double-click a file row: select it, then accept when allowed.
    DoubleClickFile {
        /// Position in the files collection.
        index: usize,
        /// Modifier keys held during the click.
        modifiers: Modifiers,
    },
    /// A sort header changed.
    Sort(SortSpec),
    /// The name input was edited.
    EditName(String),
    /// Another filter pattern was picked.
    SelectFilter(usize),
    /// Confirm the new-directory popup with this name.
    CreateDirectory(String),
    /// Accept button.
    Accept,
    /// Cancel button or Escape.
    Cancel,
}

/// What happened while applying one frame of events.
#[derive(Debug, Default)]
pub struct FrameOutcome {
    /// The dialog is closed (it already was, or a `Cancel` closed it).
    pub closed: bool,
    /// A result was accepted this frame and can be collected.
    pub accepted: bool,
    /// Outcome of a `CreateDirectory` event, if one was processed.
    pub created_directory: Option<Result<PathBuf, PickerError>>,
}

/// Size constraints requested on the first frame of a dialog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowHint {
    /// Minimum and initial size.
    pub size: [f32; 2],
    /// Whether the popup may be resized.
    pub resizable: bool,
}

/// Headless file/folder picker driving one popup at a time.
///
/// Per frame, call [`show`](Self::show) and, when it returns `true`,
/// [`end`](Self::end) with the frame's events. Collect results with
/// [`file_accepted`](Self::file_accepted) or the indexed
/// [`file_accepted_at`](Self::file_accepted_at).
pub struct FilePicker {
    fs: Box<dyn FileSystem + Send>,
    title: Option<String>,
    request: OpenRequest,
    closed: bool,
    first_frame: bool,
    single: bool,
    window: Option<WindowHint>,
    snapshot: Option<Snapshot>,
    protocol: ResultProtocol,
}

impl Default for FilePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FilePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePicker")
            .field("title", &self.title)
            .field("closed", &self.closed)
            .field("single", &self.single)
            .field("current_path", &self.current_path())
            .finish_non_exhaustive()
    }
}

impl FilePicker {
    /// Picker over the real filesystem.
    pub fn new() -> Self {
        Self::with_file_system(StdFileSystem)
    }

    /// Picker listing directories through `fs`.
    pub fn with_file_system(fs: impl FileSystem + Send + 'static) -> Self {
        Self {
            fs: Box::new(fs),
            title: None,
            request: OpenRequest::default(),
            closed: true,
            first_frame: false,
            single: true,
            window: None,
            snapshot: None,
            protocol: ResultProtocol::new(),
        }
    }

    /// Open a dialog titled `title`. Any previous listing is dropped.
    pub fn open(&mut self, title: impl Into<String>, request: OpenRequest) {
        let title = title.into();
        picker_debug!(title = %title, start = ?request.start_path(), "picker.open");
        self.single = !request.multi_select;
        self.request = request;
        self.title = Some(title);
        self.closed = false;
        self.first_frame = true;
        self.window = None;
        self.snapshot = None;
        self.protocol.reset();
    }

    /// Per-frame visibility check. Returns `true` when [`end`](Self::end)
    /// should run this frame.
    ///
    /// Passing `Some(&mut false)` resets the picker. When the dialog has been
    /// closed by the engine, the caller's flag is cleared.
    pub fn show(&mut self, title: &str, open: Option<&mut bool>) -> bool {
        self.show_inner(title, open, None, true)
    }

    /// Like [`show`](Self::show), with a minimum/initial size applied on the
    /// first frame.
    pub fn show_with_size(
        &mut self,
        title: &str,
        open: Option<&mut bool>,
        size: [f32; 2],
        resizable: bool,
    ) -> bool {
        self.show_inner(title, open, Some(size), resizable)
    }

    fn show_inner(
        &mut self,
        title: &str,
        open: Option<&mut bool>,
        size: Option<[f32; 2]>,
        resizable: bool,
    ) -> bool {
        if let Some(false) = open.as_deref() {
            self.reset();
            return false;
        }

        if self.title.as_deref() == Some(title) {
            if self.closed {
                if let Some(flag) = open {
                    *flag = false;
                }
                return false;
            }
            if self.first_frame {
                self.window = size.map(|size| WindowHint { size, resizable });
                self.first_frame = false;
            }
            return true;
        }

        picker_debug!(title, "picker.adopt_title");
        self.title = Some(title.to_owned());
        self.closed = false;
        self.first_frame = false;
        self.window = size.map(|size| WindowHint { size, resizable });
        self.snapshot = None;
        self.protocol.reset();
        true
    }

    /// Apply one frame of events. Loads the listing on first use.
    ///
    /// Processing stops at the first [`PickerEvent::Cancel`].
    pub fn end<I>(&mut self, events: I) -> FrameOutcome
    where
        I: IntoIterator<Item = PickerEvent>,
    {
        let mut outcome = FrameOutcome::default();
        if self.closed {
            self.snapshot = None;
            outcome.closed = true;
            return outcome;
        }

        if self.snapshot.is_none() {
            let snap = Snapshot::load_with_fs(
                &*self.fs,
                None,
                self.request.start_path(),
                self.request.patterns(),
            );
            self.snapshot = Some(snap);
        }

        for event in events {
            match event {
                PickerEvent::OpenDirectory(i) => self.open_directory(i),
                PickerEvent::ClickFile { index, modifiers } => {
                    self.click_file(index, modifiers);
                }
                PickerEvent::DoubleClickFile { index, modifiers } => {
                    if self.click_file(index, modifiers) && self.accept() {
                        outcome.accepted = true;
                    }
                }
                PickerEvent::Sort(spec) => {
                    if let Some(snap) = self.snapshot.as_mut() {
                        snap.sort_by(spec);
                    }
                }
                PickerEvent::EditName(text) => self.edit_name(&text),
                PickerEvent::SelectFilter(i) => self.select_filter(i),
                PickerEvent::CreateDirectory(name) => {
                    outcome.created_directory = Some(self.create_directory(&name));
                }
                PickerEvent::Accept => {
                    if self.accept() {
                        outcome.accepted = true;
                    }
                }
                PickerEvent::Cancel => {
                    picker_debug!("picker.cancel");
                    self.close();
                    outcome.closed = true;
                    return outcome;
                }
            }
        }
        outcome
    }

    fn open_directory(&mut self, i: usize) {
        let Some(snap) = self.snapshot.as_mut() else {
            return;
        };
        let Some(target) = snap.enterable_dir(i) else {
            return;
        };
        picker_debug!(dir = %target.display(), "picker.navigate");
        let previous = self.snapshot.take();
        let mut next = Snapshot::load_with_fs(
            &*self.fs,
            previous,
            Some(&target),
            self.request.patterns(),
        );
        next.peeked = false;
        self.snapshot = Some(next);
    }

    /// Returns `true` when the click reached a selectable file.
    fn click_file(&mut self, index: usize, modifiers: Modifiers) -> bool {
        if !self.is_file_selectable(index) {
            return false;
        }
        let mode = modifiers.selection_mode(!self.single);
        if let Some(snap) = self.snapshot.as_mut() {
            snap.click_file(index, mode);
        }
        true
    }

    fn edit_name(&mut self, text: &str) {
        if self.request.is_dir_only() {
            return;
        }
        if let Some(snap) = self.snapshot.as_mut() {
            if snap.count_selected() > 1 {
                return;
            }
            snap.set_buffer(text);
        }
    }

    fn select_filter(&mut self, i: usize) {
        if i >= self.request.patterns().len() {
            return;
        }
        let Some(mut snap) = self.snapshot.take() else {
            return;
        };
        if snap.filter_index() == i {
            self.snapshot = Some(snap);
            return;
        }
        snap.set_filter_index(i);
        let mut next = snap.reload_with_fs(&*self.fs, self.request.patterns());
        next.peeked = false;
        self.snapshot = Some(next);
    }

    fn accept(&mut self) -> bool {
        if !self.can_accept() {
            return false;
        }
        if let Some(snap) = self.snapshot.as_mut() {
            picker_debug!(dir = %snap.path().display(), selected = snap.count_selected(), "picker.accept");
            snap.accepted = true;
        }
        true
    }

    fn is_file_selectable(&self, index: usize) -> bool {
        if self.request.is_dir_only() {
            return false;
        }
        let Some(file) = self.snapshot.as_ref().and_then(|s| s.files().get(index)) else {
            return false;
        };
        file.can_read() && (file.can_write() || self.request.is_read_only())
    }

    /// Create `name` inside the current directory and re-list it.
    pub fn create_directory(&mut self, name: &str) -> Result<PathBuf, PickerError> {
        let snap = self.snapshot.as_ref().ok_or(PickerError::NotLoaded)?;
        if self.request.is_read_only() {
            return Err(PickerError::ReadOnly);
        }
        if !(snap.can_read() && snap.can_write()) {
            return Err(PickerError::NotWritable(snap.path().to_path_buf()));
        }
        if name.is_empty() || name.contains(std::path::is_separator) {
            return Err(PickerError::InvalidName(name.to_owned()));
        }
        let target = make_absolute(&snap.path().join(name));
        if self.fs.exists(&target) {
            return Err(PickerError::AlreadyExists(target));
        }
        self.fs.create_dir(&target)?;
        picker_debug!(dir = %target.display(), "picker.create_directory");

        if let Some(snap) = self.snapshot.take() {
            let mut next = snap.reload_with_fs(&*self.fs, self.request.patterns());
            next.peeked = false;
            self.snapshot = Some(next);
        }
        Ok(target)
    }

    /// Whether the dialog is open.
    pub fn is_open(&self) -> bool {
        !self.closed
    }

    /// Title of the current dialog.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Directory being listed, once loaded.
    pub fn current_path(&self) -> Option<&Path> {
        self.snapshot.as_ref().map(|s| s.path())
    }

    /// Number of selected files.
    pub fn count_selected(&self) -> usize {
        self.snapshot.as_ref().map_or(0, |s| s.count_selected())
    }

    /// Current listing, for rendering.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Labels of the current dialog.
    pub fn labels(&self) -> &Labels {
        &self.request.labels
    }

    /// Request the current dialog was opened with.
    pub fn request(&self) -> &OpenRequest {
        &self.request
    }

    /// Size hint applied on the first frame, if any.
    pub fn window_hint(&self) -> Option<WindowHint> {
        self.window
    }

    /// Whether Ctrl/Shift clicks extend the selection.
    pub fn is_multi_select(&self) -> bool {
        !self.single
    }

    /// Whether the accept button is enabled.
    pub fn can_accept(&self) -> bool {
        let Some(snap) = self.snapshot.as_ref() else {
            return false;
        };
        snap.can_read()
            && (snap.can_write() || self.request.is_read_only())
            && (self.request.allows_empty() || !snap.buffer().is_empty())
    }

    /// Whether the new-directory button is enabled.
    pub fn can_create_directory(&self) -> bool {
        !self.request.is_read_only()
            && self
                .snapshot
                .as_ref()
                .is_some_and(|s| s.can_read() && s.can_write())
    }

    /// Clear the selection and discard any pending result.
    pub fn unselect_all(&mut self) {
        if let Some(snap) = self.snapshot.as_mut() {
            snap.unselect_all();
            settle(snap);
        }
    }

    /// Clear the name input and discard any pending result.
    pub fn reset_buffer(&mut self) {
        if let Some(snap) = self.snapshot.as_mut() {
            snap.clear_buffer();
            settle(snap);
        }
    }

    /// Re-list the current directory and discard any pending result.
    pub fn reload(&mut self) {
        if let Some(snap) = self.snapshot.take() {
            let mut next = snap.reload_with_fs(&*self.fs, self.request.patterns());
            settle(&mut next);
            self.snapshot = Some(next);
        }
    }

    /// Close the dialog and drop its listing.
    pub fn close(&mut self) {
        picker_debug!(title = ?self.title, "picker.close");
        self.closed = true;
        self.snapshot = None;
        self.protocol.reset();
    }

    fn reset(&mut self) {
        self.title = None;
        self.request = OpenRequest::default();
        self.closed = true;
        self.first_frame = false;
        self.single = true;
        self.window = None;
        self.snapshot = None;
        self.protocol.reset();
    }

    /// Preview the current choice once per change.
    pub fn peek_selected(&mut self) -> Option<PathBuf> {
        self.protocol.peek(self.snapshot.as_mut())
    }

    /// Preview the `index`-th selected path. Enables multi-selection.
    pub fn peek_selected_at(&mut self, index: usize) -> Option<PathBuf> {
        self.single = false;
        self.protocol.peek_at(self.snapshot.as_mut(), index)
    }

    /// Collect the accepted path once.
    pub fn file_accepted(&mut self) -> Option<PathBuf> {
        let allow_empty = self.request.allows_empty();
        self.protocol.accepted(self.snapshot.as_mut(), allow_empty)
    }

    /// Collect the `index`-th accepted path. Enables multi-selection.
    ///
    /// Call with `0, 1, 2, ...` until `None`.
    pub fn file_accepted_at(&mut self, index: usize) -> Option<PathBuf> {
        self.single = false;
        let allow_empty = self.request.allows_empty();
        self.protocol
            .accepted_at(self.snapshot.as_mut(), index, allow_empty)
    }
}

/// Nothing pending: no accepted result and nothing new to preview.
fn settle(snap: &mut Snapshot) {
    snap.accepted = false;
    snap.peeked = true;
}
