//! core/tags/util.rs
//! Small helpers shared by tag reading/writing.

use std::path::Path;

use id3::frame::Content;
use id3::{ErrorKind, Tag, TagLike};

use super::super::error::Result;

/// Get a best-effort string value from a frame id.
pub(crate) fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) => Some(s.clone()),
        _ => None,
    }
}

/// Load the existing tag, or start fresh when the file has none.
/// Any other read error is returned so we never clobber a tag we failed to parse.
pub(crate) fn load_or_new(path: &Path) -> Result<Tag> {
    match Tag::read_from_path(path) {
        Ok(tag) => Ok(tag),
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => Ok(Tag::new()),
        Err(e) => Err(e.into()),
    }
}

/// Set a text frame, or remove it when the value is blank.
pub(crate) fn set_text_or_remove(tag: &mut Tag, id: &str, value: &str) {
    let v = value.trim();
    if v.is_empty() {
        let _ = tag.remove(id); // TagLike::remove returns Vec<Frame>; discard it
    } else {
        tag.set_text(id, v.to_string());
    }
}
