#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use dear_file_picker::{FilePicker, OpenRequest, PickerError, can_read, can_write};

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

fn set_mode(path: &Path, mode: u32) {
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
}

/// Permission bits do not bind a superuser; detect that by writing into a
/// directory without write bits.
fn bypasses_permissions(locked: &Path) -> bool {
    let probe = locked.join("superuser-probe");
    let created = std::fs::write(&probe, b"x").is_ok();
    let _ = std::fs::remove_file(&probe);
    created
}

#[test]
fn locked_directory_is_not_writable_while_its_files_are() {
    let root = unique_temp_dir("locked");
    let locked = root.join("locked");
    std::fs::create_dir_all(&locked).unwrap();
    let file = locked.join("inside.txt");
    std::fs::write(&file, b"x").unwrap();
    set_mode(&locked, 0o555);

    if bypasses_permissions(&locked) {
        set_mode(&locked, 0o755);
        std::fs::remove_dir_all(&root).unwrap();
        return;
    }

    assert!(can_read(&locked));
    assert!(!can_write(&locked));
    // The file keeps its own write bits; the two probes are independent.
    assert!(can_write(&file));

    set_mode(&locked, 0o755);
    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn locked_directory_rejects_accept_and_directory_creation() {
    let root = unique_temp_dir("locked-picker");
    std::fs::create_dir_all(&root).unwrap();
    set_mode(&root, 0o555);

    if bypasses_permissions(&root) {
        set_mode(&root, 0o755);
        std::fs::remove_dir_all(&root).unwrap();
        return;
    }

    let mut picker = FilePicker::new();
    picker.open("Save", OpenRequest::new().path(&root).accept_empty(true));
    assert!(picker.show("Save", None));
    picker.end([]);
    assert!(!picker.can_accept());
    assert!(!picker.can_create_directory());
    assert!(matches!(
        picker.create_directory("new"),
        Err(PickerError::NotWritable(_))
    ));

    // Open dialogs only need read access.
    let mut picker = FilePicker::new();
    picker.open(
        "Open",
        OpenRequest::new().path(&root).accept_empty(true).read_only(true),
    );
    assert!(picker.show("Open", None));
    picker.end([]);
    assert!(picker.can_accept());

    set_mode(&root, 0o755);
    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn unreadable_directory_cannot_be_entered() {
    let root = unique_temp_dir("unreadable");
    let closed = root.join("closed");
    std::fs::create_dir_all(&closed).unwrap();

    let mut picker = FilePicker::new();
    picker.open("Nav", OpenRequest::new().path(&root));
    assert!(picker.show("Nav", None));
    picker.end([]);
    let idx = picker
        .snapshot()
        .unwrap()
        .dirs()
        .iter()
        .position(|d| d.name() == "closed")
        .unwrap();

    set_mode(&closed, 0o000);
    picker.end([dear_file_picker::PickerEvent::OpenDirectory(idx)]);
    // No read bits at all: the bit check fails even for a superuser.
    assert_eq!(picker.current_path(), Some(root.as_path()));
    assert!(!picker.snapshot().unwrap().dirs()[idx].can_read());

    set_mode(&closed, 0o755);
    std::fs::remove_dir_all(&root).unwrap();
}
