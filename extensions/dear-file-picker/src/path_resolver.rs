use std::path::{Path, PathBuf};

/// Where a dialog starts: a directory plus an optional file name to prefill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartLocation {
    /// Absolute directory to list.
    pub dir: PathBuf,
    /// Name of the regular file the hint pointed at, if any.
    pub file_name: Option<String>,
}

/// Resolve a caller-supplied hint into a directory that exists right now.
///
/// Missing or non-existent hints fall back to the process working directory.
/// A hint naming a file resolves to its parent directory; when it is a regular
/// file its name is returned so the dialog can prefill the name input.
pub fn resolve_start(hint: Option<&Path>) -> StartLocation {
    let Some(hint) = hint.filter(|p| !p.as_os_str().is_empty() && p.exists()) else {
        return StartLocation {
            dir: current_dir(),
            file_name: None,
        };
    };

    if hint.is_dir() {
        return StartLocation {
            dir: make_absolute(hint),
            file_name: None,
        };
    }

    let dir = match hint.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => make_absolute(parent),
        _ => current_dir(),
    };
    let file_name = if hint.is_file() {
        hint.file_name().map(|n| n.to_string_lossy().into_owned())
    } else {
        None
    };
    StartLocation { dir, file_name }
}

pub(crate) fn make_absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn current_dir() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    make_absolute(&cwd)
}
