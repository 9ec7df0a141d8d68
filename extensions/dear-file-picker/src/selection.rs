use indexmap::IndexSet;

use crate::entry::Entry;
use crate::name_buffer::NameBuffer;

const JOIN_SEPARATOR: &str = "; ";

/// Positions of the selected entries in a files collection.
///
/// Kept in lockstep with each entry's `selected` flag: every method updates
/// both before returning. Range selections are stored ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    indices: IndexSet<usize>,
}

impl SelectionSet {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected entries.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether position `i` is selected.
    pub fn contains(&self, i: usize) -> bool {
        self.indices.contains(&i)
    }

    /// The `n`-th selected position, in selection order.
    pub fn get(&self, n: usize) -> Option<usize> {
        self.indices.get_index(n).copied()
    }

    /// Selected positions in selection order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Make `i` the only selected entry. Returns `false` when nothing changed.
    pub(crate) fn select_single(&mut self, files: &mut [Entry], i: usize) -> bool {
        if i >= files.len() {
            return false;
        }
        if self.indices.len() == 1 && self.indices.contains(&i) {
            return false;
        }
        self.clear_flags(files);
        self.indices.insert(i);
        files[i].selected = true;
        true
    }

    /// Add `i` to the selection. Returns `false` when nothing changed.
    pub(crate) fn select_add(&mut self, files: &mut [Entry], i: usize) -> bool {
        if i >= files.len() || self.indices.contains(&i) {
            return false;
        }
        self.indices.insert(i);
        files[i].selected = true;
        true
    }

    /// Extend the selection to the contiguous span covering it and `i`.
    pub(crate) fn select_range(&mut self, files: &mut [Entry], i: usize) -> bool {
        if i >= files.len() {
            return false;
        }
        let (Some(&min), Some(&max)) = (self.indices.iter().min(), self.indices.iter().max())
        else {
            return self.select_single(files, i);
        };
        let lo = min.min(i);
        let hi = max.max(i);
        if lo == hi {
            return self.select_single(files, i);
        }
        if self.indices.len() == hi - lo + 1 && self.indices.iter().copied().eq(lo..=hi) {
            return false;
        }
        self.clear_flags(files);
        for (pos, entry) in files.iter_mut().enumerate().take(hi + 1).skip(lo) {
            entry.selected = true;
            self.indices.insert(pos);
        }
        true
    }

    /// Clear the selection. Returns how many entries were selected.
    pub(crate) fn unselect_all(&mut self, files: &mut [Entry]) -> usize {
        let count = self.indices.len();
        self.clear_flags(files);
        count
    }

    /// Rewrite `buffer` to reflect the selection: one name, several names
    /// joined with `"; "`, or empty.
    pub(crate) fn sync_buffer(&self, files: &[Entry], buffer: &mut NameBuffer) {
        buffer.clear();
        for (n, i) in self.iter().enumerate() {
            let Some(entry) = files.get(i) else {
                continue;
            };
            if n > 0 {
                buffer.push(JOIN_SEPARATOR);
            }
            buffer.push(entry.name());
        }
    }

    fn clear_flags(&mut self, files: &mut [Entry]) {
        for i in self.indices.drain(..) {
            if let Some(entry) = files.get_mut(i) {
                entry.selected = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::test_file;
    use pretty_assertions::assert_eq;

    fn files(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| test_file(&format!("f{i}.txt"), 0, 0, i))
            .collect()
    }

    fn flagged(files: &[Entry]) -> Vec<usize> {
        files
            .iter()
            .filter(|e| e.is_selected())
            .map(|e| e.index())
            .collect()
    }

    #[test]
    fn select_single_twice_is_a_no_op() {
        let mut f = files(4);
        let mut s = SelectionSet::new();
        assert!(s.select_single(&mut f, 2));
        let before = s.clone();
        assert!(!s.select_single(&mut f, 2));
        assert_eq!(s, before);
        assert_eq!(flagged(&f), vec![2]);
    }

    #[test]
    fn single_then_range_selects_inclusive_span_ascending() {
        let mut f = files(8);
        let mut s = SelectionSet::new();
        s.select_single(&mut f, 2);
        s.select_range(&mut f, 5);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
        assert_eq!(flagged(&f), vec![2, 3, 4, 5]);

        // Extending below the current minimum keeps the old maximum.
        s.select_range(&mut f, 0);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn range_on_empty_selection_acts_as_single() {
        let mut f = files(3);
        let mut s = SelectionSet::new();
        assert!(s.select_range(&mut f, 1));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn range_collapsing_to_one_entry_acts_as_single() {
        let mut f = files(3);
        let mut s = SelectionSet::new();
        s.select_single(&mut f, 1);
        assert!(!s.select_range(&mut f, 1));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn add_appends_in_click_order() {
        let mut f = files(5);
        let mut s = SelectionSet::new();
        s.select_add(&mut f, 3);
        s.select_add(&mut f, 0);
        assert!(!s.select_add(&mut f, 3));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![3, 0]);
        assert_eq!(flagged(&f), vec![0, 3]);
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let mut f = files(2);
        let mut s = SelectionSet::new();
        assert!(!s.select_single(&mut f, 7));
        assert!(!s.select_add(&mut f, 7));
        assert!(!s.select_range(&mut f, 7));
        assert!(s.is_empty());
    }

    #[test]
    fn unselect_all_clears_flags_and_reports_count() {
        let mut f = files(4);
        let mut s = SelectionSet::new();
        s.select_single(&mut f, 0);
        s.select_range(&mut f, 2);
        assert_eq!(s.unselect_all(&mut f), 3);
        assert!(s.is_empty());
        assert!(flagged(&f).is_empty());
    }

    #[test]
    fn buffer_reflects_selection() {
        let mut f = files(3);
        let mut s = SelectionSet::new();
        let mut buf = NameBuffer::new();

        s.sync_buffer(&f, &mut buf);
        assert_eq!(buf.as_str(), "");

        s.select_single(&mut f, 1);
        s.sync_buffer(&f, &mut buf);
        assert_eq!(buf.as_str(), "f1.txt");

        s.select_add(&mut f, 0);
        s.sync_buffer(&f, &mut buf);
        assert_eq!(buf.as_str(), "f1.txt; f0.txt");
    }
}
