//! Read/write capability probes.
//!
//! Permission bits alone are unreliable on mounted network shares, container
//! overlays and some FUSE filesystems. Reads are confirmed by opening the path;
//! directory writes are confirmed by creating and removing a marker file.

use std::fs::{self, File, Metadata, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;

use rand::Rng;

use crate::logging::picker_trace;

const PROBE_PREFIX: &str = ".perm_check_";
const PROBE_SUFFIX: &str = ".tmp";

/// Whether `path` can be read.
///
/// Requires at least one read bit and a successful open (`read_dir` for
/// directories). Any metadata failure yields `false`.
pub fn can_read(path: &Path) -> bool {
    let Ok(md) = fs::metadata(path) else {
        return false;
    };
    if !mode_readable(&md) {
        return false;
    }
    if md.is_dir() {
        fs::read_dir(path).is_ok()
    } else {
        File::open(path).is_ok()
    }
}

/// Whether `path` can be written.
///
/// Directories are probed by creating and removing a uniquely named marker
/// file inside them. Regular files pass when any write bit is set, or when an
/// append-mode open succeeds.
pub fn can_write(path: &Path) -> bool {
    let Ok(md) = fs::metadata(path) else {
        return false;
    };
    if md.is_dir() {
        return probe_dir_write(path);
    }
    if mode_writable(&md) {
        return true;
    }
    OpenOptions::new().append(true).open(path).is_ok()
}

fn probe_dir_write(dir: &Path) -> bool {
    let marker = probe_marker_path(dir);
    let created = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&marker);
    let ok = match created {
        Ok(file) => {
            drop(file);
            fs::remove_file(&marker).is_ok()
        }
        Err(_) => false,
    };
    picker_trace!(dir = %dir.display(), ok, "write probe");
    ok
}

/// Marker path: `.perm_check_<monotonic nanos>_<random>.tmp` inside `dir`.
pub(crate) fn probe_marker_path(dir: &Path) -> PathBuf {
    static ANCHOR: OnceLock<Instant> = OnceLock::new();
    let ticks = ANCHOR.get_or_init(Instant::now).elapsed().as_nanos();
    let salt: u32 = rand::rng().random_range(100_000..=999_999);
    dir.join(format!("{PROBE_PREFIX}{ticks}_{salt}{PROBE_SUFFIX}"))
}

/// Read/write flags derived from permission bits only (no I/O).
pub(crate) fn mode_flags(md: &Metadata) -> (bool, bool) {
    (mode_readable(md), mode_writable(md))
}

#[cfg(unix)]
fn mode_readable(md: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    md.permissions().mode() & 0o444 != 0
}

#[cfg(not(unix))]
fn mode_readable(_md: &Metadata) -> bool {
    true
}

#[cfg(unix)]
fn mode_writable(md: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    md.permissions().mode() & 0o222 != 0
}

#[cfg(not(unix))]
fn mode_writable(md: &Metadata) -> bool {
    !md.permissions().readonly()
}
