//! Headless picker driver.
//! - Lists a directory (first argument, default: current directory)
//! - Applies optional glob patterns (remaining arguments)
//! - Range-selects every listed file, accepts, and drains the indexed results
//!
//! Run with `RUST_LOG=dear_file_picker=debug` to see engine events.

use dear_file_picker::{
    EntryKind, FilePicker, Modifiers, OpenRequest, PickerEvent, SortKey, SortSpec,
};

const TITLE: &str = "Headless##picker";

fn main() {
    dear_file_picker::logging::init_tracing();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| ".".to_string());
    let patterns: Vec<String> = args.collect();

    let mut picker = FilePicker::new();
    picker.open(
        TITLE,
        OpenRequest::new()
            .path(&path)
            .filters(patterns)
            .multi_select(true)
            .accept_empty(true)
            .read_only(true),
    );

    // Frame 1: load and sort.
    let mut open = true;
    if !picker.show_with_size(TITLE, Some(&mut open), [720.0, 480.0], true) {
        return;
    }
    picker.end([PickerEvent::Sort(SortSpec::ascending(SortKey::Name))]);

    let Some(snapshot) = picker.snapshot() else {
        return;
    };
    println!("{}", snapshot.path().display());
    for dir in snapshot.dirs() {
        let marker = match dir.kind() {
            EntryKind::Parent => "^",
            _ => "/",
        };
        println!("  {marker} {}", dir.name());
    }
    for file in snapshot.files() {
        println!(
            "  {:>4} {:<32} {:>10} {:<6} {}",
            file.index(),
            file.name(),
            file.size(),
            file.file_type(),
            file.modified_label()
        );
    }
    let file_count = snapshot.files().len();

    // Frame 2: select everything and accept.
    if !picker.show(TITLE, Some(&mut open)) {
        return;
    }
    let mut events = Vec::new();
    if file_count > 0 {
        events.push(PickerEvent::ClickFile {
            index: 0,
            modifiers: Modifiers::NONE,
        });
        events.push(PickerEvent::ClickFile {
            index: file_count - 1,
            modifiers: Modifiers::SHIFT,
        });
    }
    events.push(PickerEvent::Accept);
    let outcome = picker.end(events);
    tracing::info!(
        accepted = outcome.accepted,
        selected = picker.count_selected(),
        "frame applied"
    );

    let mut index = 0;
    while let Some(path) = picker.file_accepted_at(index) {
        println!("accepted[{index}] {}", path.display());
        index += 1;
    }

    picker.close();
    if !picker.show(TITLE, Some(&mut open)) {
        println!("closed (open = {open})");
    }
}
