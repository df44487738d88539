//! Write ID3 frames and the comment JSON back to an MP3.

use std::path::Path;

use id3::frame::Comment;
use id3::{TagLike, Version};
use tracing::debug;

use super::super::error::Result;
use super::super::metadata::extract_from_comment;
use super::util::{load_or_new, set_text_or_remove};

/// Language code of the comment frame that carries the JSON blob.
pub const COMMENT_LANG: &str = "ved";

/// Frames to write. `None` leaves the frame on disk untouched;
/// `Some("")` removes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagUpdate {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub track: Option<String>,
    pub disc: Option<String>,
    pub date: Option<String>,
}

impl TagUpdate {
    pub fn is_empty(&self) -> bool {
        *self == TagUpdate::default()
    }
}

pub fn write_tags(path: &Path, update: &TagUpdate) -> Result<()> {
    let mut tag = load_or_new(path)?;

    let frames = [
        ("TIT2", &update.title),
        ("TPE1", &update.artist),
        ("TALB", &update.album),
        ("TRCK", &update.track),
        ("TPOS", &update.disc),
        ("TDRC", &update.date),
    ];
    for (id, value) in frames {
        if let Some(v) = value {
            set_text_or_remove(&mut tag, id, v);
        }
    }

    tag.write_to_path(path, Version::Id3v24)?;
    debug!(path = %path.display(), "tags written");
    Ok(())
}

/// Replace the JSON comment with `comment_text`.
///
/// Every COMM frame that carried a parseable JSON object (or used our language
/// code) is dropped so stale keys can't be merged back in on the next read.
/// Other comments stay, even when they contain braces.
pub fn write_comment_json(path: &Path, comment_text: &str) -> Result<()> {
    let mut tag = load_or_new(path)?;

    let keep: Vec<Comment> = tag
        .comments()
        .filter(|c| c.lang != COMMENT_LANG && !carries_json(&c.text))
        .cloned()
        .collect();

    let _ = tag.remove("COMM");
    for c in keep {
        let _ = tag.add_frame(c);
    }
    let _ = tag.add_frame(Comment {
        lang: COMMENT_LANG.to_string(),
        description: String::new(),
        text: comment_text.to_string(),
    });

    tag.write_to_path(path, Version::Id3v24)?;
    debug!(path = %path.display(), "comment JSON written");
    Ok(())
}

fn carries_json(text: &str) -> bool {
    extract_from_comment(text).is_some_and(|blob| blob.parsed.is_ok())
}
