//! core/mod.rs
//!
//! The brain of the app:
//! - Discover mp3 paths (filesystem walk)
//! - Read/write tags and the comment JSON (metadata IO)
//! - Rules, search, sort, statistics, presets
//! - Return plain data structs for the GUI to render
//!
//! The scan pipeline is two explicit steps:
//!   (A) discover paths -> Vec<PathBuf>
//!   (B) read tags -> Vec<SongRecord>

pub mod apply;
pub mod error;
pub mod files;
pub mod library;
pub mod metadata;
pub mod presets;
pub mod rules;
pub mod search;
pub mod settings;
pub mod sort;
pub mod stats;
pub mod tags;
pub mod types;
pub mod versions;

use std::path::{Path, PathBuf};

use tracing::info;

use error::Result;
use types::SongRecord;

/// Discover mp3 files under `root`, sorted by path.
pub fn scan_paths(root: &Path, include_subfolders: bool) -> Result<Vec<PathBuf>> {
    let mut paths = library::scan_mp3s(root, include_subfolders)?;
    paths.sort();
    paths.dedup();
    Ok(paths)
}

/// Read tags for already-discovered paths.
///
/// - Never fails hard per-file: unreadable tags give a record with no metadata
/// - Returns (songs, tag_failures)
pub fn read_songs(paths: Vec<PathBuf>) -> (Vec<SongRecord>, usize) {
    let mut songs = Vec::with_capacity(paths.len());
    let mut failures = 0;

    for path in paths {
        let (song, failed) = tags::read_song(path);
        if failed {
            failures += 1;
        }
        songs.push(song);
    }

    (songs, failures)
}

/// scan_paths + read_songs.
pub fn scan_and_read(root: &Path, include_subfolders: bool) -> Result<(Vec<SongRecord>, usize)> {
    let paths = scan_paths(root, include_subfolders)?;
    let (songs, failures) = read_songs(paths);
    info!(
        root = %root.display(),
        songs = songs.len(),
        with_metadata = songs.iter().filter(|s| s.has_metadata()).count(),
        failures,
        "scan complete"
    );
    Ok((songs, failures))
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::path::{Path, PathBuf};

    use id3::frame::Comment;
    use id3::{Tag, TagLike, Version};

    /// A few fake MPEG frame bytes; id3 only cares about the tag.
    pub(crate) fn fake_mp3(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, [0xFFu8, 0xFB, 0x90, 0x64, 0, 0, 0, 0]).unwrap();
        path
    }

    /// fake_mp3 with `json` stored in a `ved` comment.
    pub(crate) fn mp3_with_json(dir: &Path, name: &str, json: &str) -> PathBuf {
        let path = fake_mp3(dir, name);
        let mut tag = Tag::new();
        tag.add_frame(Comment {
            lang: "ved".to_string(),
            description: String::new(),
            text: json.to_string(),
        });
        tag.write_to_path(&path, Version::Id3v24).unwrap();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testutil::mp3_with_json;
    use types::Field;

    #[test]
    fn scan_reads_every_song() {
        let dir = tempfile::tempdir().unwrap();
        mp3_with_json(dir.path(), "b.mp3", r#"{"Title":"B"}"#);
        mp3_with_json(dir.path(), "a.mp3", r#"{"Title":"A"}"#);

        let (songs, failures) = scan_and_read(dir.path(), false).unwrap();
        assert_eq!(failures, 0);
        let titles: Vec<String> = songs.iter().map(|s| s.get(Field::Title)).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }
}
