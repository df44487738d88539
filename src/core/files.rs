//! core/files.rs
//!
//! File-level operations: rename, JSON export, exact-audio duplicates.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use super::error::{Error, Result};
use super::types::SongRecord;

/// Rename an mp3 inside its folder. `.mp3` is appended when missing.
/// Returns the new path.
pub fn rename_song(path: &Path, new_name: &str, overwrite: bool) -> Result<PathBuf> {
    let name = new_name.trim();
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(Error::InvalidFileName(new_name.to_string()));
    }

    let file_name = if name.to_ascii_lowercase().ends_with(".mp3") {
        name.to_string()
    } else {
        format!("{name}.mp3")
    };

    let target = match path.parent() {
        Some(dir) => dir.join(&file_name),
        None => PathBuf::from(&file_name),
    };
    if target == path {
        return Ok(target);
    }
    if target.exists() && !overwrite {
        return Err(Error::TargetExists(file_name));
    }

    fs::rename(path, &target)?;
    info!(from = %path.display(), to = %target.display(), "file renamed");
    Ok(target)
}

/// Write each song's JSON blob to `dest/<relative path>.json`.
/// Songs outside `root` land directly in `dest`. Returns files written.
pub fn export_json(songs: &[SongRecord], root: &Path, dest: &Path) -> Result<usize> {
    let mut written = 0;

    for song in songs.iter().filter(|s| s.has_metadata()) {
        let rel = match song.path.strip_prefix(root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => PathBuf::from(song.file_name()),
        };
        let out = dest.join(rel).with_extension("json");
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out, serde_json::to_string_pretty(&song.metadata)?)?;
        written += 1;
    }

    info!(dest = %dest.display(), written, "JSON exported");
    Ok(written)
}

/// SHA-256 of the audio payload, with ID3v2 header and ID3v1 trailer removed.
pub fn audio_hash(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(format!("{:x}", Sha256::digest(audio_payload(&bytes))))
}

fn audio_payload(bytes: &[u8]) -> &[u8] {
    let mut start = 0;
    if bytes.len() >= 10 && &bytes[..3] == b"ID3" {
        // synchsafe size, 7 bits per byte
        let size = bytes[6..10]
            .iter()
            .fold(0usize, |acc, b| (acc << 7) | usize::from(b & 0x7F));
        let footer = if bytes[5] & 0x10 != 0 { 10 } else { 0 };
        start = (10 + size + footer).min(bytes.len());
    }

    let mut end = bytes.len();
    if end - start >= 128 && &bytes[end - 128..end - 125] == b"TAG" {
        end -= 128;
    }

    &bytes[start..end]
}

/// Groups of two or more files with identical audio. Unreadable files are
/// logged and left out.
pub fn find_duplicates(paths: &[PathBuf]) -> Vec<Vec<PathBuf>> {
    let mut by_hash: HashMap<String, Vec<PathBuf>> = HashMap::new();

    for path in paths {
        match audio_hash(path) {
            Ok(hash) => {
                debug!(path = %path.display(), %hash, "hashed");
                by_hash.entry(hash).or_default().push(path.clone());
            }
            Err(e) => warn!(path = %path.display(), error = %e, "could not hash file"),
        }
    }

    let mut groups: Vec<Vec<PathBuf>> = by_hash
        .into_values()
        .filter(|g| g.len() > 1)
        .map(|mut g| {
            g.sort();
            g
        })
        .collect();
    groups.sort();

    info!(files = paths.len(), groups = groups.len(), "duplicate check complete");
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tags::read_song;
    use crate::core::testutil::{fake_mp3, mp3_with_json};

    #[test]
    fn rename_appends_extension_and_refuses_clobber() {
        let dir = tempfile::tempdir().unwrap();
        let a = fake_mp3(dir.path(), "a.mp3");
        fake_mp3(dir.path(), "taken.mp3");

        let renamed = rename_song(&a, "New Name", false).unwrap();
        assert_eq!(renamed, dir.path().join("New Name.mp3"));
        assert!(!a.exists());

        let err = rename_song(&renamed, "taken", false).unwrap_err();
        assert!(matches!(err, Error::TargetExists(ref n) if n == "taken.mp3"));
        assert!(renamed.exists());

        let over = rename_song(&renamed, "taken.mp3", true).unwrap();
        assert!(over.exists());
        assert!(!renamed.exists());
    }

    #[test]
    fn rename_rejects_paths() {
        let dir = tempfile::tempdir().unwrap();
        let a = fake_mp3(dir.path(), "a.mp3");
        assert!(matches!(rename_song(&a, "../x", false), Err(Error::InvalidFileName(_))));
        assert!(matches!(rename_song(&a, "  ", false), Err(Error::InvalidFileName(_))));
    }

    #[test]
    fn export_mirrors_folders() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let sub = src.path().join("disc1");
        fs::create_dir(&sub).unwrap();

        let songs = vec![
            read_song(mp3_with_json(&sub, "x.mp3", r#"{"Title":"X"}"#)).0,
            read_song(fake_mp3(src.path(), "empty.mp3")).0,
        ];
        assert_eq!(export_json(&songs, src.path(), dest.path()).unwrap(), 1);

        let text = fs::read_to_string(dest.path().join("disc1").join("x.json")).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["Title"], "X");
    }

    #[test]
    fn duplicates_ignore_tags() {
        let dir = tempfile::tempdir().unwrap();
        let a = mp3_with_json(dir.path(), "a.mp3", r#"{"Title":"A"}"#);
        let b = mp3_with_json(dir.path(), "b.mp3", r#"{"Title":"Completely different"}"#);
        let c = dir.path().join("c.mp3");
        fs::write(&c, [1u8, 2, 3, 4]).unwrap();

        let groups = find_duplicates(&[a.clone(), b.clone(), c]);
        assert_eq!(groups, vec![vec![a, b]]);
    }

    #[test]
    fn payload_strips_v1_trailer() {
        let mut bytes = vec![9u8; 20];
        let mut trailer = b"TAG".to_vec();
        trailer.resize(128, 0);
        bytes.extend(trailer);
        assert_eq!(audio_payload(&bytes), &[9u8; 20][..]);
    }
}
