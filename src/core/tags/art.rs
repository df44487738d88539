use std::path::Path;

use id3::frame::Content;
use id3::{ErrorKind, Tag};

use super::super::error::Result;

/// Returns (image_bytes, mime) for the first embedded picture (APIC/PIC).
pub fn read_embedded_art(path: &Path) -> Result<Option<(Vec<u8>, String)>> {
    let tag = match Tag::read_from_path(path) {
        Ok(t) => t,
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    for f in tag.frames() {
        if f.id() != "APIC" && f.id() != "PIC" {
            continue;
        }
        if let Content::Picture(p) = f.content() {
            return Ok(Some((p.data.clone(), p.mime_type.clone())));
        }
    }

    Ok(None)
}
