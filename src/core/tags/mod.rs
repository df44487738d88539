//! core/tags/mod.rs
//!
//! ID3 tag read/write utilities.
//! Public API:
//! - [`read_song`] reads an MP3 into a [`SongRecord`](super::types::SongRecord) (non-fatal on tag read failure).
//! - [`write_tags`] writes the provided frames back to disk.
//! - [`write_comment_json`] replaces the JSON comment frame.

mod art;
mod read;
mod util;
mod write;

pub use art::read_embedded_art;
pub use read::read_song;
pub use write::{TagUpdate, write_comment_json, write_tags};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Field;
    use id3::frame::Comment;
    use crate::core::testutil::fake_mp3;
    use id3::{Tag, TagLike, Version};
    use std::path::Path;

    fn with_comments(path: &Path, comments: &[(&str, &str)]) {
        let mut tag = Tag::new();
        for (lang, text) in comments {
            tag.add_frame(Comment {
                lang: lang.to_string(),
                description: String::new(),
                text: text.to_string(),
            });
        }
        tag.write_to_path(path, Version::Id3v24).unwrap();
    }

    #[test]
    fn untagged_file_reads_as_empty_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_mp3(dir.path(), "bare.mp3");

        let (rec, failed) = read_song(path);
        assert!(!failed);
        assert!(!rec.has_metadata());
        assert_eq!(rec.get(Field::Title), "bare");
    }

    #[test]
    fn comment_json_is_merged_across_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_mp3(dir.path(), "a.mp3");
        with_comments(
            &path,
            &[
                ("eng", "plain note"),
                ("ved", "src: {\"Title\": \"Song\", \"Version\": 1}"),
                ("xxx", "{\"Artist\": \"Neuro\"}"),
            ],
        );

        let (rec, failed) = read_song(path);
        assert!(!failed);
        assert_eq!(rec.get(Field::Title), "Song");
        assert_eq!(rec.get(Field::Artist), "Neuro");
        assert_eq!(rec.comment_prefix, "src: ");
        assert!(rec.json_error.is_none());
    }

    #[test]
    fn malformed_json_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_mp3(dir.path(), "bad.mp3");
        with_comments(&path, &[("ved", "{\"Title\": }")]);

        let (rec, failed) = read_song(path);
        assert!(!failed);
        assert!(!rec.has_metadata());
        assert!(rec.json_error.is_some());
    }

    #[test]
    fn comment_json_round_trips_and_keeps_other_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_mp3(dir.path(), "rt.mp3");
        with_comments(&path, &[("eng", "keep me"), ("ved", "{\"Title\": \"Old\"}")]);

        write_comment_json(&path, "p {\"Title\":\"New\",\"Track\":3}").unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        let texts: Vec<&str> = tag.comments().map(|c| c.text.as_str()).collect();
        assert_eq!(texts.len(), 2);
        assert!(texts.contains(&"keep me"));

        let (rec, _) = read_song(path);
        assert_eq!(rec.get(Field::Title), "New");
        assert_eq!(rec.get(Field::Track), "3");
        assert_eq!(rec.comment_prefix, "p ");
    }

    #[test]
    fn comments_with_stray_braces_survive_a_json_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_mp3(dir.path(), "braces.mp3");
        with_comments(
            &path,
            &[
                ("eng", "ripped with {lame}"),
                ("xxx", "{\"Artist\": \"Stale\"}"),
                ("ved", "{\"Title\": \"Old\"}"),
            ],
        );

        write_comment_json(&path, "{\"Title\":\"New\"}").unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        let mut texts: Vec<&str> = tag.comments().map(|c| c.text.as_str()).collect();
        texts.sort();
        assert_eq!(texts, vec!["ripped with {lame}", "{\"Title\":\"New\"}"]);
    }

    #[test]
    fn write_tags_only_touches_provided_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_mp3(dir.path(), "w.mp3");
        let mut tag = Tag::new();
        tag.set_album("Keep");
        tag.set_artist("Drop");
        tag.write_to_path(&path, Version::Id3v24).unwrap();

        let update = TagUpdate {
            title: Some("New Title".into()),
            artist: Some(String::new()),
            track: Some("4".into()),
            ..Default::default()
        };
        write_tags(&path, &update).unwrap();

        let (rec, _) = read_song(path);
        assert_eq!(rec.tags.title.as_deref(), Some("New Title"));
        assert_eq!(rec.tags.album.as_deref(), Some("Keep"));
        assert_eq!(rec.tags.artist, None);
        assert_eq!(rec.tags.track.as_deref(), Some("4"));
    }

    #[test]
    fn no_art_in_untagged_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_mp3(dir.path(), "n.mp3");
        assert!(read_embedded_art(&path).unwrap().is_none());
    }
}
