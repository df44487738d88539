//! gui/update/editor.rs
//! JSON editor (validate while typing, save back to the comment) and rename.

use iced::Task;
use iced::widget::text_editor;

use crate::core::error::Error;
use crate::core::files::rename_song;
use crate::core::metadata::{parse_object, prepare_for_save};
use crate::core::tags::{read_song, write_comment_json};
use crate::core::types::SongRecord;
use crate::core::versions::VersionIndex;

use super::super::state::{Message, RenameOutcome, Tagwright};
use super::listing::refresh_visible;
use super::selection::{load_editor, remove_song};
use super::util::spawn_blocking;

pub(crate) fn json_edited(state: &mut Tagwright, action: text_editor::Action) -> Task<Message> {
    let is_edit = action.is_edit();
    state.json_editor.perform(action);

    if is_edit {
        state.json_dirty = true;
        let text = state.json_editor.text();
        state.json_error = if text.trim().is_empty() {
            None
        } else {
            parse_object(&text).err().map(|e| e.to_string())
        };
    }
    Task::none()
}

pub(crate) fn save_json(state: &mut Tagwright) -> Task<Message> {
    if state.is_busy() {
        return Task::none();
    }
    let Some(i) = state.current else {
        state.status = "Select a song first.".to_string();
        return Task::none();
    };
    let Some(song) = state.songs.get(i) else {
        return Task::none();
    };

    let (comment, _) = match prepare_for_save(&state.json_editor.text(), &song.comment_prefix) {
        Ok(ok) => ok,
        Err(e) => {
            state.json_error = Some(e.to_string());
            state.status = format!("Not saved: {e}");
            return Task::none();
        }
    };
    let path = song.path.clone();

    state.working = true;
    state.status = "Writing JSON to file...".to_string();

    Task::perform(
        spawn_blocking(move || {
            write_comment_json(&path, &comment).map_err(|e| e.to_string())?;
            match read_song(path) {
                (song, false) => Ok(song),
                (_, true) => Err("Saved, but failed to re-read the file".to_string()),
            }
        }),
        move |res| Message::JsonSaved(i, res.and_then(|r| r)),
    )
}

pub(crate) fn json_saved(
    state: &mut Tagwright,
    i: usize,
    result: Result<SongRecord, String>,
) -> Task<Message> {
    state.working = false;

    match result {
        Ok(song) => {
            if i < state.songs.len() {
                state.songs[i] = song;
                library_changed(state);
                if state.current == Some(i) {
                    load_editor(state);
                }
            }
            state.status = "JSON saved.".to_string();
        }
        Err(e) => state.status = format!("Save error: {e}"),
    }
    Task::none()
}

pub(crate) fn revert_json(state: &mut Tagwright) -> Task<Message> {
    load_editor(state);
    Task::none()
}

pub(crate) fn rename_input_changed(state: &mut Tagwright, s: String) -> Task<Message> {
    state.rename_input = s;
    state.rename_conflict = None;
    Task::none()
}

pub(crate) fn cancel_overwrite(state: &mut Tagwright) -> Task<Message> {
    state.rename_conflict = None;
    state.status = "Rename cancelled.".to_string();
    Task::none()
}

pub(crate) fn start_rename(state: &mut Tagwright, overwrite: bool) -> Task<Message> {
    if state.is_busy() {
        return Task::none();
    }
    let Some(i) = state.current else {
        state.status = "Select a song first.".to_string();
        return Task::none();
    };
    let Some(song) = state.songs.get(i) else {
        return Task::none();
    };

    let path = song.path.clone();
    let name = state.rename_input.trim().to_string();
    state.rename_conflict = None;
    state.working = true;
    state.status = "Renaming...".to_string();

    Task::perform(
        spawn_blocking(move || match rename_song(&path, &name, overwrite) {
            Ok(new_path) => RenameOutcome::Done(read_song(new_path).0),
            Err(Error::TargetExists(n)) => RenameOutcome::Exists(n),
            Err(e) => RenameOutcome::Failed(e.to_string()),
        }),
        move |res| Message::Renamed(i, res.unwrap_or_else(RenameOutcome::Failed)),
    )
}

pub(crate) fn renamed(state: &mut Tagwright, i: usize, outcome: RenameOutcome) -> Task<Message> {
    state.working = false;

    match outcome {
        RenameOutcome::Done(song) => {
            let Some(old) = state.songs.get(i).map(|s| s.path.clone()) else {
                return Task::none();
            };
            state.covers.pop(&old);
            state.covers.pop(&song.path);

            // Overwrote another listed file: drop its stale entry.
            let mut i = i;
            let clobbered = state
                .songs
                .iter()
                .enumerate()
                .find(|(j, s)| *j != i && s.path == song.path)
                .map(|(j, _)| j);
            if let Some(j) = clobbered {
                remove_song(state, j);
                if j < i {
                    i -= 1;
                }
            }

            state.status = format!("Renamed to {}", song.file_name());
            state.songs[i] = song;
            library_changed(state);
            if state.current == Some(i) {
                load_editor(state);
            }
        }
        RenameOutcome::Exists(name) => {
            state.status = format!("'{name}' already exists. Overwrite?");
            state.rename_conflict = Some(name);
        }
        RenameOutcome::Failed(e) => state.status = format!("Rename error: {e}"),
    }
    Task::none()
}

/// Song data changed: version groups and the visible list may shift.
fn library_changed(state: &mut Tagwright) {
    state.versions = VersionIndex::build(&state.songs);
    refresh_visible(state);
}
