//! Core data types shared between core logic and the UI.
//!
//! Rule of thumb:
//! - These structs should be “boring bags of data”
//! - No GUI code
//! - No filesystem code
//!
//! 'SongRecord' represents ONE mp3 on disk plus the JSON metadata blob
//! stored in its comment frame.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A song field that rules, search clauses and sort rules can refer to.
///
/// Serialized by its JSON key (`"CoverArtist"`, `"Discnumber"`, ...), which is
/// also the key used inside the comment blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    #[serde(alias = "title")]
    Title,
    #[serde(alias = "artist")]
    Artist,
    #[serde(alias = "coverartist")]
    CoverArtist,
    #[serde(alias = "version")]
    Version,
    #[serde(alias = "disc", alias = "discnumber")]
    Discnumber,
    #[serde(alias = "track")]
    Track,
    #[serde(alias = "date")]
    Date,
    #[serde(alias = "comment")]
    Comment,
    #[serde(alias = "special")]
    Special,
    /// File name on disk (not part of the JSON blob).
    #[serde(alias = "file")]
    File,
}

impl Field {
    /// Fields stored in the JSON blob (rule conditions pick from these).
    pub const METADATA: [Field; 9] = [
        Field::Title,
        Field::Artist,
        Field::CoverArtist,
        Field::Version,
        Field::Discnumber,
        Field::Track,
        Field::Date,
        Field::Comment,
        Field::Special,
    ];

    /// Every column of the song list (sort rules pick from these).
    pub const ALL: [Field; 10] = [
        Field::Title,
        Field::Artist,
        Field::CoverArtist,
        Field::Version,
        Field::Discnumber,
        Field::Track,
        Field::Date,
        Field::Comment,
        Field::Special,
        Field::File,
    ];

    /// Key inside the comment JSON. `None` for `File`.
    pub fn json_key(self) -> Option<&'static str> {
        match self {
            Field::Title => Some("Title"),
            Field::Artist => Some("Artist"),
            Field::CoverArtist => Some("CoverArtist"),
            Field::Version => Some("Version"),
            Field::Discnumber => Some("Discnumber"),
            Field::Track => Some("Track"),
            Field::Date => Some("Date"),
            Field::Comment => Some("Comment"),
            Field::Special => Some("Special"),
            Field::File => None,
        }
    }

    /// Column header text.
    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Artist => "Artist",
            Field::CoverArtist => "Cover Artist",
            Field::Version => "Version",
            Field::Discnumber => "Disc",
            Field::Track => "Track",
            Field::Date => "Date",
            Field::Comment => "Comment",
            Field::Special => "Special",
            Field::File => "File",
        }
    }

    /// Parse a user-typed field name (search box). Case-insensitive.
    pub fn from_name(name: &str) -> Option<Field> {
        match name.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Field::Title),
            "artist" => Some(Field::Artist),
            "coverartist" | "cover" | "cover_artist" => Some(Field::CoverArtist),
            "version" | "ver" => Some(Field::Version),
            "discnumber" | "disc" => Some(Field::Discnumber),
            "track" => Some(Field::Track),
            "date" => Some(Field::Date),
            "comment" => Some(Field::Comment),
            "special" => Some(Field::Special),
            "file" | "filename" => Some(Field::File),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Groups the versions of one song: (Title, Artist, CoverArtist).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SongKey {
    pub title: String,
    pub artist: String,
    pub cover_artist: String,
}

impl fmt::Display for SongKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.title, self.artist, self.cover_artist)
    }
}

/// The plain ID3 frames currently on disk, for display next to the JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSnapshot {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub track: Option<String>,
    pub disc: Option<String>,
    pub date: Option<String>,
}

/// One mp3 file and its metadata.
///
/// Identity is the path. `metadata` is the merged JSON object from the
/// comment frame(s); it is empty when the file has none.
#[derive(Debug, Clone, Default)]
pub struct SongRecord {
    pub path: PathBuf,

    /// Parsed JSON blob (keys as written by the archive: Title, Artist, ...).
    pub metadata: Map<String, Value>,

    /// Text that preceded the JSON inside the comment. Written back on save.
    pub comment_prefix: String,

    /// Set when a comment looked like JSON but did not parse.
    pub json_error: Option<String>,

    pub tags: TagSnapshot,
}

impl SongRecord {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    pub fn has_metadata(&self) -> bool {
        !self.metadata.is_empty()
    }

    /// Display value of a field.
    ///
    /// - Title falls back to the file stem.
    /// - Version is normalised (`3.0` -> `3`) and defaults to `0`.
    /// - Missing fields are empty strings.
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::Title => self
                .raw("Title")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| file_stem(&self.path)),
            Field::Version => version_display(self.metadata.get("Version")),
            Field::File => self.file_name(),
            other => other
                .json_key()
                .and_then(|k| self.raw(k))
                .unwrap_or_default(),
        }
    }

    /// Stringified JSON value for any key in the blob.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.metadata.get(key).map(value_to_string)
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string()
    }

    pub fn song_key(&self) -> SongKey {
        SongKey {
            title: self.get(Field::Title),
            artist: self.get(Field::Artist),
            cover_artist: self.get(Field::CoverArtist),
        }
    }
}

/// Gets filename without extension, used as a fallback title.
/// Ex: 'song.mp3' -> 'song'
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Render a JSON value the way the song list shows it.
/// Integral numbers drop their fraction; null is empty.
pub fn value_to_string(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::Array(_) | Value::Object(_) => v.to_string(),
    }
}

fn version_display(v: Option<&Value>) -> String {
    let Some(v) = v else { return "0".to_string() };
    let s = value_to_string(v);
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return "0".to_string();
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(path: &str, v: Value) -> SongRecord {
        let mut r = SongRecord::new(PathBuf::from(path));
        if let Value::Object(map) = v {
            r.metadata = map;
        }
        r
    }

    #[test]
    fn title_falls_back_to_file_stem() {
        let r = record("/music/My Song.mp3", json!({ "Title": "" }));
        assert_eq!(r.get(Field::Title), "My Song");

        let r = record("/music/x.mp3", json!({ "Title": "Real" }));
        assert_eq!(r.get(Field::Title), "Real");
    }

    #[test]
    fn version_is_normalised() {
        assert_eq!(record("a.mp3", json!({ "Version": 3.0 })).get(Field::Version), "3");
        assert_eq!(record("a.mp3", json!({ "Version": "2.5" })).get(Field::Version), "2.5");
        assert_eq!(record("a.mp3", json!({})).get(Field::Version), "0");
        assert_eq!(record("a.mp3", json!({ "Version": "2.10" })).get(Field::Version), "2.10");
        assert_eq!(record("a.mp3", json!({ "Version": "v2b" })).get(Field::Version), "v2b");
    }

    #[test]
    fn numbers_render_without_fraction() {
        let r = record("a.mp3", json!({ "Track": 7, "Discnumber": 2.0, "Special": 1.5 }));
        assert_eq!(r.get(Field::Track), "7");
        assert_eq!(r.get(Field::Discnumber), "2");
        assert_eq!(r.get(Field::Special), "1.5");
    }

    #[test]
    fn field_names_accept_aliases() {
        assert_eq!(Field::from_name("Disc"), Some(Field::Discnumber));
        assert_eq!(Field::from_name("cover"), Some(Field::CoverArtist));
        assert_eq!(Field::from_name("FILE"), Some(Field::File));
        assert_eq!(Field::from_name("album"), None);
    }

    #[test]
    fn field_serializes_as_json_key() {
        let s = serde_json::to_string(&Field::CoverArtist).unwrap();
        assert_eq!(s, "\"CoverArtist\"");
        let f: Field = serde_json::from_str("\"disc\"").unwrap();
        assert_eq!(f, Field::Discnumber);
    }
}
