//! Test helpers for laying out catalogues and state directories on disk.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub(super) const CATALOGUE_JSON: &str = r#"[
  {"id": "heat-1995", "title": "Heat", "year": "1995", "rating": 4.5,
   "genre": "Crime, Drama", "director": "Michael Mann"},
  {"id": "collateral-2004", "title": "Collateral", "year": "2004", "rating": 3.5,
   "genre": "Crime, Thriller", "director": "Michael Mann"},
  {"title": "Paddington 2", "year": "2017", "rating": 3, "genre": "Comedy, Family"}
]"#;

/// Temporary directory holding a catalogue and a state directory.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn catalog(&self) -> Utf8PathBuf {
        self.root.join("catalog.json")
    }

    pub(super) fn state_dir(&self) -> Utf8PathBuf {
        self.root.join("state")
    }

    pub(super) fn write_catalog(&self, contents: &str) -> Utf8PathBuf {
        let path = self.catalog();
        write_utf8(&path, contents);
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &str) {
    cinephile_fs::ensure_parent_dir(path).expect("create parent directory");
    cinephile_fs::write_string(path, contents).expect("write test file");
}
