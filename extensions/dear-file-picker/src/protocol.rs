//! Pull-style retrieval of previewed and accepted paths.
//!
//! A presentation layer polls once per frame. The single forms return one path
//! per commit. The indexed forms drain a multi-selection one path per call:
//! the caller passes `0, 1, 2, ...` and stops at the first `None`. Indices must
//! not go backwards within one sequence; doing so ends it.

use std::path::PathBuf;

use crate::path_resolver::make_absolute;
use crate::snapshot::Snapshot;

/// One-shot flag a retrieval sequence consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gate {
    /// Open while the current state has not been previewed.
    Peek,
    /// Open while an accepted result is pending.
    Accept,
}

impl Gate {
    fn is_open(self, snap: &Snapshot) -> bool {
        match self {
            Gate::Peek => !snap.peeked,
            Gate::Accept => snap.accepted,
        }
    }

    fn close(self, snap: &mut Snapshot) {
        match self {
            Gate::Peek => snap.peeked = true,
            Gate::Accept => snap.accepted = false,
        }
    }
}

/// Progress of one indexed retrieval sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResultCursor {
    last_index: usize,
}

impl ResultCursor {
    /// Last index served in the running sequence.
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    fn reset(&mut self) {
        self.last_index = 0;
    }
}

/// Per-dialog retrieval state: one cursor for previews, one for acceptance.
#[derive(Clone, Debug, Default)]
pub struct ResultProtocol {
    peek: ResultCursor,
    accept: ResultCursor,
}

impl ResultProtocol {
    /// Fresh protocol with both cursors at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor of the preview sequence.
    pub fn peek_cursor(&self) -> ResultCursor {
        self.peek
    }

    /// Cursor of the acceptance sequence.
    pub fn accept_cursor(&self) -> ResultCursor {
        self.accept
    }

    /// Reset both cursors.
    pub fn reset(&mut self) {
        self.peek.reset();
        self.accept.reset();
    }

    /// Preview the current choice once per change.
    ///
    /// Nothing selected yields the typed name (or the directory itself when
    /// the name is empty); one selection yields its directory joined with the
    /// name input; several yield the first selected file.
    pub fn peek(&mut self, snapshot: Option<&mut Snapshot>) -> Option<PathBuf> {
        let snap = snapshot?;
        if snap.peeked {
            return None;
        }
        snap.peeked = true;
        match snap.count_selected() {
            0 => buffer_path(snap, true),
            1 => joined_with_buffer(snap, 0),
            _ => selected_path(snap, 0),
        }
    }

    /// Collect the accepted choice once.
    ///
    /// With files selected the result is the first selection's directory
    /// joined with the name input. With nothing selected an empty name yields
    /// the directory only when `accept_empty` is set.
    pub fn accepted(&mut self, snapshot: Option<&mut Snapshot>, accept_empty: bool) -> Option<PathBuf> {
        let snap = snapshot?;
        if !snap.accepted {
            return None;
        }
        snap.accepted = false;
        if snap.count_selected() == 0 {
            buffer_path(snap, accept_empty)
        } else {
            joined_with_buffer(snap, 0)
        }
    }

    /// Preview the `index`-th selected path.
    pub fn peek_at(&mut self, snapshot: Option<&mut Snapshot>, index: usize) -> Option<PathBuf> {
        indexed(&mut self.peek, Gate::Peek, snapshot, index, true)
    }

    /// Collect the `index`-th accepted path.
    pub fn accepted_at(
        &mut self,
        snapshot: Option<&mut Snapshot>,
        index: usize,
        accept_empty: bool,
    ) -> Option<PathBuf> {
        indexed(&mut self.accept, Gate::Accept, snapshot, index, accept_empty)
    }
}

fn indexed(
    cursor: &mut ResultCursor,
    gate: Gate,
    snapshot: Option<&mut Snapshot>,
    index: usize,
    allow_empty: bool,
) -> Option<PathBuf> {
    let Some(snap) = snapshot else {
        cursor.reset();
        return None;
    };
    if index < cursor.last_index || !gate.is_open(snap) {
        gate.close(snap);
        cursor.reset();
        return None;
    }

    cursor.last_index = index;
    let count = snap.count_selected();

    if count == 0 || index >= count {
        gate.close(snap);
        cursor.reset();
        // A fresh sequence with nothing to drain falls back to the name input.
        return if index == 0 {
            buffer_path(snap, allow_empty)
        } else {
            None
        };
    }

    if count == 1 {
        gate.close(snap);
        cursor.reset();
        return joined_with_buffer(snap, index);
    }

    let path = selected_path(snap, index);
    if index >= count - 1 {
        gate.close(snap);
        cursor.reset();
    }
    path
}

/// Current directory joined with the name input. An empty name yields the
/// directory itself when `allow_empty`, otherwise nothing.
fn buffer_path(snap: &Snapshot, allow_empty: bool) -> Option<PathBuf> {
    if snap.buffer().is_empty() {
        return allow_empty.then(|| make_absolute(snap.path()));
    }
    Some(make_absolute(&snap.path().join(snap.buffer())))
}

/// Directory of the `n`-th selection joined with the name input.
///
/// An untouched name input resolves to the file itself, so names that are
/// not valid UTF-8 still yield their on-disk path.
fn joined_with_buffer(snap: &Snapshot, n: usize) -> Option<PathBuf> {
    let file = snap.selected_file(n)?;
    if snap.buffer() == file.name() {
        return Some(make_absolute(file.path()));
    }
    let dir = file.path().parent().unwrap_or_else(|| snap.path());
    Some(make_absolute(&dir.join(snap.buffer())))
}

fn selected_path(snap: &Snapshot, n: usize) -> Option<PathBuf> {
    snap.selected_file(n).map(|file| make_absolute(file.path()))
}
