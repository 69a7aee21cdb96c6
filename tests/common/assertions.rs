//! Archive inspection helpers and assertion macros.

#![allow(dead_code)]

use std::fs::File;
use std::path::Path;

use flate2::read::GzDecoder;

/// Entry names of a tar.gz, with `./` prefixes and trailing slashes removed
pub fn archive_entries(archive: &Path) -> Vec<String> {
    let file = File::open(archive)
        .unwrap_or_else(|e| panic!("Failed to open archive {}: {}", archive.display(), e));
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    archive
        .entries()
        .expect("Failed to read archive")
        .map(|entry| {
            let entry = entry.expect("Corrupt archive entry");
            let name = entry.path().expect("Bad entry path").to_string_lossy().into_owned();
            name.trim_start_matches("./").trim_end_matches('/').to_string()
        })
        .filter(|name| !name.is_empty() && name != ".")
        .collect()
}

/// Content of one file entry
pub fn archive_file(archive: &Path, wanted: &str) -> Option<String> {
    use std::io::Read;

    let file = File::open(archive).ok()?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    for entry in archive.entries().ok()? {
        let mut entry = entry.ok()?;
        let name = entry.path().ok()?.to_string_lossy().into_owned();
        if name.trim_start_matches("./") == wanted {
            let mut content = String::new();
            entry.read_to_string(&mut content).ok()?;
            return Some(content);
        }
    }
    None
}

/// Files directly inside `dir`
pub fn dir_entries(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Assert that an archive contains an entry.
///
/// # Example
/// ```ignore
/// assert_archived!(artifact.path(), "README");
/// ```
#[macro_export]
macro_rules! assert_archived {
    ($archive:expr, $entry:expr) => {
        let entries = $crate::common::archive_entries($archive);
        assert!(
            entries.iter().any(|e| e == $entry),
            "Expected '{}' in archive {:?}.\nEntries:\n  {}",
            $entry,
            $archive,
            entries.join("\n  ")
        );
    };
}

/// Assert that no archive entry lies at or under a path.
#[macro_export]
macro_rules! assert_not_archived {
    ($archive:expr, $prefix:expr) => {
        let entries = $crate::common::archive_entries($archive);
        let prefix = format!("{}/", $prefix);
        assert!(
            entries.iter().all(|e| e != $prefix.trim_end_matches('/') && !e.starts_with(&prefix)),
            "Expected nothing under '{}' in archive {:?}.\nEntries:\n  {}",
            $prefix,
            $archive,
            entries.join("\n  ")
        );
    };
}
