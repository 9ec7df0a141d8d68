#![deny(missing_docs)]
//! Headless directory browser and selection engine for immediate-mode file
//! picker popups.
//!
//! The crate owns everything a picker needs apart from drawing: listing one
//! directory level, permission probing, glob filters, single/additive/range
//! selection, sorting, and a pull-style protocol that hands accepted paths to
//! the caller one per call across frames.
//!
//! A presentation layer (Dear ImGui or anything else) drives a [`FilePicker`]
//! once per frame:
//!
//! ```no_run
//! use dear_file_picker::{FilePicker, Modifiers, OpenRequest, PickerEvent};
//!
//! let mut picker = FilePicker::new();
//! picker.open("Open##main", OpenRequest::new().filters(["*.rs", "*"]).multi_select(true));
//!
//! let mut open = true;
//! if picker.show("Open##main", Some(&mut open)) {
//!     let events = vec![
//!         PickerEvent::ClickFile { index: 0, modifiers: Modifiers::NONE },
//!         PickerEvent::Accept,
//!     ];
//!     let outcome = picker.end(events);
//!     if outcome.accepted {
//!         let mut i = 0;
//!         while let Some(path) = picker.file_accepted_at(i) {
//!             println!("{}", path.display());
//!             i += 1;
//!         }
//!         picker.close();
//!     }
//! }
//! ```

pub mod logging;

mod core;
mod entry;
mod fs;
mod glob_filter;
mod name_buffer;
mod path_resolver;
mod permissions;
mod picker;
mod protocol;
mod selection;
mod snapshot;
mod sorter;

pub use core::{
    Labels, Modifiers, OpenRequest, PickerError, SelectionMode, SortDirection, SortKey, SortSpec,
};
pub use entry::{Entry, EntryKind, PARENT_MARKER};
pub use fs::{FileSystem, FsEntry, FsEntryKind, StdFileSystem};
pub use glob_filter::GlobFilter;
pub use name_buffer::{NAME_BUFFER_CAPACITY, NameBuffer};
pub use path_resolver::{StartLocation, resolve_start};
pub use permissions::{can_read, can_write};
pub use picker::{FilePicker, FrameOutcome, PickerEvent, WindowHint};
pub use protocol::{ResultCursor, ResultProtocol};
pub use selection::SelectionSet;
pub use snapshot::Snapshot;
pub use sorter::sort_files;
