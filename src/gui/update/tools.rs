//! gui/update/tools.rs
//! Statistics panel, JSON export, duplicate check.

use std::path::PathBuf;

use iced::Task;

use crate::core::files::{export_json as export_songs, find_duplicates};

use super::super::state::{Message, Tagwright};
use super::super::util::parse_name_list;
use super::listing::refresh_visible;
use super::util::{persist_settings, spawn_blocking};

pub(crate) fn toggle_stats(state: &mut Tagwright) -> Task<Message> {
    state.show_stats = !state.show_stats;
    Task::none()
}

pub(crate) fn solo_artists_changed(state: &mut Tagwright, s: String) -> Task<Message> {
    state.settings.solo_artists = parse_name_list(&s);
    state.solo_input = s;
    persist_settings(state);
    refresh_visible(state);
    Task::none()
}

pub(crate) fn export_input_changed(state: &mut Tagwright, s: String) -> Task<Message> {
    state.export_input = s;
    Task::none()
}

pub(crate) fn export_json(state: &mut Tagwright) -> Task<Message> {
    if state.is_busy() {
        return Task::none();
    }
    let Some(root) = state.root.clone() else {
        state.status = "Load a folder first.".to_string();
        return Task::none();
    };
    let dest = state.export_input.trim();
    if dest.is_empty() {
        state.status = "Enter an export folder.".to_string();
        return Task::none();
    }
    let dest = PathBuf::from(dest);

    let songs: Vec<_> = state.visible.iter().filter_map(|&i| state.songs.get(i).cloned()).collect();
    state.working = true;
    state.status = format!("Exporting JSON to {}...", dest.display());

    Task::perform(
        spawn_blocking(move || export_songs(&songs, &root, &dest).map_err(|e| e.to_string())),
        |res| Message::ExportFinished(res.and_then(|r| r)),
    )
}

pub(crate) fn export_finished(state: &mut Tagwright, result: Result<usize, String>) -> Task<Message> {
    state.working = false;
    state.status = match result {
        Ok(n) => format!("Exported {n} JSON file(s)."),
        Err(e) => format!("Export error: {e}"),
    };
    Task::none()
}

pub(crate) fn check_duplicates(state: &mut Tagwright) -> Task<Message> {
    if state.is_busy() {
        return Task::none();
    }
    if state.songs.is_empty() {
        state.status = "Load a folder first.".to_string();
        return Task::none();
    }

    let paths: Vec<PathBuf> = state.songs.iter().map(|s| s.path.clone()).collect();
    state.working = true;
    state.status = format!("Checking {} files for duplicate audio...", paths.len());

    Task::perform(
        spawn_blocking(move || find_duplicates(&paths)),
        Message::DuplicatesFound,
    )
}

pub(crate) fn duplicates_found(
    state: &mut Tagwright,
    result: Result<Vec<Vec<PathBuf>>, String>,
) -> Task<Message> {
    state.working = false;

    match result {
        Ok(groups) => {
            state.status = if groups.is_empty() {
                "No duplicate audio found.".to_string()
            } else {
                format!("Found {} duplicate group(s).", groups.len())
            };
            state.duplicates = Some(groups);
            state.show_stats = true;
        }
        Err(e) => state.status = format!("Duplicate check error: {e}"),
    }
    Task::none()
}
