//! Input file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

const KML_SUFFIX: &str = ".kml";

/// Returns every regular file directly inside `dir` whose name ends in `.kml`,
/// ignoring case. Symlinks to files count as files. Subdirectories are not searched.
/// The result is sorted.
pub fn find_kml_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // Follows symlinks; directories and dangling links are not input files.
        if has_kml_suffix(&entry.file_name().to_string_lossy()) && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn has_kml_suffix(file_name: &str) -> bool {
    let len = file_name.len();
    len >= KML_SUFFIX.len()
        && file_name.is_char_boundary(len - KML_SUFFIX.len())
        && file_name[len - KML_SUFFIX.len()..].eq_ignore_ascii_case(KML_SUFFIX)
}
