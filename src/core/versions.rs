//! core/versions.rs
//!
//! Version parsing and the per-song version index.
//!
//! A song (title, artist, cover artist) can exist in several versions.
//! "Latest" means the highest version within that group; ties are all latest.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::types::{Field, SongKey, SongRecord};

/// Comparable form of a version string: every run of digits, in order.
/// "2.10" -> [2, 10], "v3" -> [3], "" -> [0].
///
/// Comparison pads the shorter side with zeros, so `3 == 3.0`.
#[derive(Debug, Clone, Eq)]
pub struct VersionKey(Vec<u64>);

impl VersionKey {
    pub fn parse(s: &str) -> Self {
        let mut parts = Vec::new();
        let mut current: Option<u64> = None;

        for c in s.chars() {
            match c.to_digit(10) {
                Some(d) => {
                    let n = current.unwrap_or(0);
                    current = Some(n.saturating_mul(10).saturating_add(u64::from(d)));
                }
                None => {
                    if let Some(n) = current.take() {
                        parts.push(n);
                    }
                }
            }
        }
        if let Some(n) = current {
            parts.push(n);
        }
        if parts.is_empty() {
            parts.push(0);
        }
        VersionKey(parts)
    }

    /// Built from the raw JSON value so "2.10" is not read as "2.1".
    pub fn of(record: &SongRecord) -> Self {
        match record.raw("Version") {
            Some(v) if !v.trim().is_empty() => Self::parse(&v),
            _ => Self::parse("0"),
        }
    }
}

impl Ord for VersionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        for i in 0..len {
            let a = self.0.get(i).copied().unwrap_or(0);
            let b = other.0.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

#[derive(Debug, Clone, Default)]
struct Group {
    latest: Option<VersionKey>,
    /// Display strings, sorted by version, de-duplicated.
    versions: Vec<(VersionKey, String)>,
}

/// Version index over a song list.
///
/// Rebuilt whenever the library changes (scan, JSON save, rename).
#[derive(Debug, Clone, Default)]
pub struct VersionIndex {
    groups: HashMap<SongKey, Group>,
}

impl VersionIndex {
    pub fn build(songs: &[SongRecord]) -> Self {
        let mut groups: HashMap<SongKey, Group> = HashMap::new();

        for song in songs.iter().filter(|s| s.has_metadata()) {
            let display = song.get(Field::Version);
            let key = VersionKey::of(song);
            let group = groups.entry(song.song_key()).or_default();

            if group.latest.as_ref().is_none_or(|l| key > *l) {
                group.latest = Some(key.clone());
            }
            if !group.versions.iter().any(|(k, _)| *k == key) {
                group.versions.push((key, display));
            }
        }

        for group in groups.values_mut() {
            group.versions.sort_by(|a, b| a.0.cmp(&b.0));
        }

        Self { groups }
    }

    /// True when `record` carries the highest version of its song.
    /// Songs the index has never seen count as latest.
    pub fn is_latest(&self, record: &SongRecord) -> bool {
        match self.groups.get(&record.song_key()).and_then(|g| g.latest.as_ref()) {
            Some(latest) => VersionKey::of(record) == *latest,
            None => true,
        }
    }

    /// All known versions of the record's song, lowest first.
    pub fn versions_of(&self, record: &SongRecord) -> Vec<String> {
        self.groups
            .get(&record.song_key())
            .map(|g| g.versions.iter().map(|(_, s)| s.clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::path::PathBuf;

    fn song(path: &str, v: Value) -> SongRecord {
        let mut r = SongRecord::new(PathBuf::from(path));
        if let Value::Object(map) = v {
            r.metadata = map;
        }
        r
    }

    #[test]
    fn version_keys_compare_numerically() {
        assert!(VersionKey::parse("2.10") > VersionKey::parse("2.9"));
        assert!(VersionKey::parse("10") > VersionKey::parse("9"));
        assert_eq!(VersionKey::parse("3"), VersionKey::parse("3.0"));
        assert_eq!(VersionKey::parse(""), VersionKey::parse("0"));
        assert!(VersionKey::parse("v2") > VersionKey::parse("1.99"));
    }

    #[test]
    fn latest_is_per_title_artist_cover_group() {
        let songs = vec![
            song("a1.mp3", json!({"Title": "A", "Artist": "X", "CoverArtist": "Neuro", "Version": 1})),
            song("a2.mp3", json!({"Title": "A", "Artist": "X", "CoverArtist": "Neuro", "Version": 2})),
            song("a3.mp3", json!({"Title": "A", "Artist": "X", "CoverArtist": "Evil", "Version": 1})),
        ];
        let index = VersionIndex::build(&songs);

        assert!(!index.is_latest(&songs[0]));
        assert!(index.is_latest(&songs[1]));
        // Different cover artist = different group
        assert!(index.is_latest(&songs[2]));
        assert_eq!(index.versions_of(&songs[0]), vec!["1", "2"]);
    }

    #[test]
    fn ties_are_all_latest() {
        let songs = vec![
            song("a.mp3", json!({"Title": "A", "Version": "2"})),
            song("b.mp3", json!({"Title": "A", "Version": 2.0})),
        ];
        let index = VersionIndex::build(&songs);
        assert!(index.is_latest(&songs[0]));
        assert!(index.is_latest(&songs[1]));
        assert_eq!(index.versions_of(&songs[0]), vec!["2"]);
    }

    #[test]
    fn two_ten_beats_two_nine() {
        let songs = vec![
            song("old.mp3", json!({"Title": "S", "Version": "2.9"})),
            song("new.mp3", json!({"Title": "S", "Version": "2.10"})),
        ];
        let index = VersionIndex::build(&songs);
        assert!(!index.is_latest(&songs[0]));
        assert!(index.is_latest(&songs[1]));
        assert_eq!(index.versions_of(&songs[0]), vec!["2.9", "2.10"]);
    }

    #[test]
    fn unknown_songs_count_as_latest() {
        let index = VersionIndex::default();
        assert!(index.is_latest(&song("z.mp3", json!({"Title": "Z", "Version": 1}))));
    }
}
