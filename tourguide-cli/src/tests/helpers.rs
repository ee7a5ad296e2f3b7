//! Test helpers for writing catalogue fixtures into temporary directories.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Write `contents` to `path`, failing the test on IO errors.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// A temporary directory exposed through a UTF-8 root path.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// A small catalogue around Anaheim in file order.
pub(super) const CATALOGUE_JSON: &str = r#"[
    {"name": "Joshua Tree National Park", "city": "Joshua Tree National Park", "state": "CA", "latitude": 33.881866, "longitude": -115.90065},
    {"name": "Disneyland", "city": "Anaheim", "state": "CA", "latitude": 33.817595, "longitude": -117.922008},
    {"name": "Jackson Hole", "latitude": 43.582767, "longitude": -110.821999},
    {"name": "Mojave National Preserve", "city": "Kelso", "state": "CA", "latitude": 35.141689, "longitude": -115.510399}
]"#;

/// Write [`CATALOGUE_JSON`] under `root` and return its path.
pub(super) fn write_catalogue(root: &Utf8Path) -> Utf8PathBuf {
    let path = root.join("attractions.json");
    write_utf8(&path, CATALOGUE_JSON.as_bytes());
    path
}
