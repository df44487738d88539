//! core/tags/read.rs
//! Read an MP3's ID3 tag and comment JSON into a `SongRecord`.
//!
//! Never fails hard: a file we can't read becomes a record with no metadata,
//! and the bool in the return value tells the caller it failed.

use std::path::PathBuf;

use id3::{ErrorKind, Tag, TagLike};
use tracing::{debug, warn};

use super::super::metadata::extract_from_comment;
use super::super::types::{SongRecord, TagSnapshot};
use super::util::text_frame;

pub fn read_song(path: PathBuf) -> (SongRecord, bool) {
    match Tag::read_from_path(&path) {
        Ok(tag) => (build_record_from_tag(path, &tag), false),
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => {
            debug!(path = %path.display(), "no ID3 tag");
            (SongRecord::new(path), false)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read ID3 tag");
            (SongRecord::new(path), true)
        }
    }
}

fn build_record_from_tag(path: PathBuf, tag: &Tag) -> SongRecord {
    let mut record = SongRecord::new(path);

    record.tags = TagSnapshot {
        title: tag.title().map(str::to_owned),
        artist: tag.artist().map(str::to_owned),
        album: tag.album().map(str::to_owned),
        track: text_frame(tag, "TRCK"),
        disc: text_frame(tag, "TPOS"),
        date: text_frame(tag, "TDRC").or_else(|| text_frame(tag, "TYER")),
    };

    // Every COMM frame may carry JSON; later frames add to / override earlier ones.
    for comment in tag.comments() {
        let Some(blob) = extract_from_comment(&comment.text) else {
            continue;
        };

        match blob.parsed {
            Ok(map) => {
                if record.comment_prefix.is_empty() {
                    record.comment_prefix = blob.prefix;
                }
                record.metadata.extend(map);
            }
            Err(e) => {
                warn!(path = %record.path.display(), error = %e, "malformed JSON in comment");
                if record.json_error.is_none() {
                    record.json_error = Some(e.to_string());
                }
            }
        }
    }

    record
}
