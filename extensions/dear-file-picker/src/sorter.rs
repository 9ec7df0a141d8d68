use std::cmp::Ordering;

use crate::core::{SortDirection, SortKey, SortSpec};
use crate::entry::Entry;

/// Stable in-place sort of a files collection.
///
/// Names and types compare byte-wise (case-sensitive); size and time compare
/// numerically. Ties keep their current relative order in both directions.
/// Afterwards every entry's `index` equals its position.
pub fn sort_files(files: &mut [Entry], spec: SortSpec) {
    files.sort_by(|a, b| {
        let ord = compare(a, b, spec.key);
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    for (pos, entry) in files.iter_mut().enumerate() {
        entry.index = pos;
    }
}

fn compare(a: &Entry, b: &Entry, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.as_bytes().cmp(b.name.as_bytes()),
        SortKey::Size => a.size.cmp(&b.size),
        SortKey::Type => a.file_type.as_bytes().cmp(b.file_type.as_bytes()),
        SortKey::Modified => a.modified_ms.cmp(&b.modified_ms),
    }
}
