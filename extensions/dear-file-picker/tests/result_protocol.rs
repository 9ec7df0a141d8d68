use std::path::PathBuf;

use dear_file_picker::{FilePicker, Modifiers, OpenRequest, PickerEvent, SortKey, SortSpec};
use pretty_assertions::assert_eq;

const TITLE: &str = "Pick##protocol";

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    p.push(format!("dear-file-picker-{prefix}-{pid}-{t}"));
    p
}

fn dir_with_files(prefix: &str, files: &[&str]) -> PathBuf {
    let dir = unique_temp_dir(prefix);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    for f in files {
        std::fs::write(dir.join(f), b"x").unwrap();
    }
    dir
}

/// Open a multi-select picker on `dir` with files sorted by name.
fn open_sorted(dir: &PathBuf) -> FilePicker {
    let mut picker = FilePicker::new();
    picker.open(TITLE, OpenRequest::new().path(dir).multi_select(true));
    assert!(picker.show(TITLE, None));
    picker.end([PickerEvent::Sort(SortSpec::ascending(SortKey::Name))]);
    picker
}

fn click(index: usize, modifiers: Modifiers) -> PickerEvent {
    PickerEvent::ClickFile { index, modifiers }
}

#[test]
fn indexed_accept_drains_three_selections() {
    let dir = dir_with_files("drain", &["a.txt", "b.txt", "c.txt"]);
    let mut picker = open_sorted(&dir);

    assert!(picker.show(TITLE, None));
    let out = picker.end([
        click(0, Modifiers::NONE),
        click(2, Modifiers::SHIFT),
        PickerEvent::Accept,
    ]);
    assert!(out.accepted);
    assert_eq!(picker.count_selected(), 3);

    let a = picker.file_accepted_at(0);
    assert!(picker.snapshot().unwrap().is_accepted());
    let b = picker.file_accepted_at(1);
    assert!(picker.snapshot().unwrap().is_accepted());
    let c = picker.file_accepted_at(2);
    assert!(!picker.snapshot().unwrap().is_accepted());

    assert_eq!(
        vec![a, b, c],
        vec![
            Some(dir.join("a.txt")),
            Some(dir.join("b.txt")),
            Some(dir.join("c.txt")),
        ]
    );
    assert_eq!(picker.file_accepted_at(0), None);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn single_form_joins_selections_with_the_first_directory() {
    let dir = dir_with_files("single", &["a.txt", "b.txt"]);
    let mut picker = open_sorted(&dir);

    picker.end([
        click(0, Modifiers::NONE),
        click(1, Modifiers::CTRL),
        PickerEvent::Accept,
    ]);
    assert_eq!(picker.file_accepted(), Some(dir.join("a.txt; b.txt")));
    assert_eq!(picker.file_accepted(), None);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn cancel_mid_sequence_discards_state_and_restarts_at_zero() {
    let dir = dir_with_files("cancel", &["a.txt", "b.txt", "c.txt"]);
    let mut picker = open_sorted(&dir);

    picker.end([
        click(0, Modifiers::NONE),
        click(2, Modifiers::SHIFT),
        PickerEvent::Accept,
    ]);
    assert_eq!(picker.file_accepted_at(0), Some(dir.join("a.txt")));
    assert_eq!(picker.file_accepted_at(1), Some(dir.join("b.txt")));

    let mut open = false;
    assert!(!picker.show(TITLE, Some(&mut open)));
    assert!(!picker.is_open());
    assert!(picker.snapshot().is_none());
    assert_eq!(picker.file_accepted_at(2), None);

    // A fresh dialog drains from index 0 again.
    let mut picker = open_sorted(&dir);
    picker.end([
        click(1, Modifiers::NONE),
        click(2, Modifiers::SHIFT),
        PickerEvent::Accept,
    ]);
    assert_eq!(picker.file_accepted_at(0), Some(dir.join("b.txt")));
    assert_eq!(picker.file_accepted_at(1), Some(dir.join("c.txt")));
    assert_eq!(picker.file_accepted_at(2), None);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn navigation_enters_subdirectories_and_parent() {
    let dir = dir_with_files("navigate", &["top.txt"]);
    std::fs::create_dir(dir.join("inner")).unwrap();
    std::fs::write(dir.join("inner").join("deep.txt"), b"x").unwrap();

    let mut picker = FilePicker::new();
    picker.open(TITLE, OpenRequest::new().path(&dir));
    assert!(picker.show(TITLE, None));
    picker.end([]);
    let inner = picker
        .snapshot()
        .unwrap()
        .dirs()
        .iter()
        .position(|d| d.name() == "inner")
        .unwrap();

    picker.end([PickerEvent::OpenDirectory(inner)]);
    assert_eq!(picker.current_path(), Some(dir.join("inner").as_path()));
    assert_eq!(picker.snapshot().unwrap().files()[0].name(), "deep.txt");
    assert_eq!(picker.peek_selected(), Some(dir.join("inner")));

    picker.end([PickerEvent::OpenDirectory(0)]);
    assert_eq!(picker.current_path(), Some(dir.as_path()));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn peek_follows_selection_changes() {
    let dir = dir_with_files("peek", &["a.txt", "b.txt"]);
    let mut picker = open_sorted(&dir);

    assert_eq!(picker.peek_selected(), None);
    picker.end([click(1, Modifiers::NONE)]);
    assert_eq!(picker.peek_selected(), Some(dir.join("b.txt")));
    assert_eq!(picker.peek_selected(), None);

    picker.end([PickerEvent::EditName("renamed.txt".into())]);
    assert_eq!(picker.peek_selected_at(0), Some(dir.join("renamed.txt")));
    assert_eq!(picker.peek_selected_at(1), None);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn sorting_a_selection_invalidates_the_last_preview() {
    let dir = dir_with_files("resort", &["a.txt", "b.txt"]);
    let mut picker = open_sorted(&dir);

    picker.end([click(1, Modifiers::NONE), click(0, Modifiers::CTRL)]);
    assert_eq!(picker.peek_selected(), Some(dir.join("b.txt")));

    picker.end([PickerEvent::Sort(SortSpec::descending(SortKey::Name))]);
    assert_eq!(picker.count_selected(), 0);
    assert_eq!(picker.snapshot().unwrap().buffer(), "");
    assert_eq!(picker.peek_selected(), Some(dir.clone()));
    assert_eq!(picker.peek_selected(), None);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[cfg(unix)]
#[test]
fn non_utf8_file_name_resolves_to_the_real_file() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = dir_with_files("bytes", &[]);
    let raw = dir.join(OsStr::from_bytes(b"bad\xffname.txt"));
    std::fs::write(&raw, b"x").unwrap();

    let mut picker = FilePicker::new();
    picker.open(TITLE, OpenRequest::new().path(&dir));
    assert!(picker.show(TITLE, None));
    let out = picker.end([click(0, Modifiers::NONE), PickerEvent::Accept]);
    assert!(out.accepted);

    let accepted = picker.file_accepted().unwrap();
    assert_eq!(accepted, raw);
    assert!(accepted.exists());

    std::fs::remove_dir_all(&dir).unwrap();
}
