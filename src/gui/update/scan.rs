//! gui/update/scan.rs
//! Folder input + scan lifecycle + async boundary.
//!
//! Uses the explicit core scan pipeline:
//!   (A) core::scan_paths(root) -> Vec<PathBuf>
//!   (B) core::read_songs(paths) -> (Vec<SongRecord>, failures)

use std::path::PathBuf;

use iced::Task;

use crate::core;
use crate::core::types::SongRecord;
use crate::core::versions::VersionIndex;

use super::super::state::{Message, Tagwright};
use super::listing::refresh_visible;
use super::selection::reset_selection;
use super::util::{persist_settings, spawn_blocking};

pub(crate) fn folder_input_changed(state: &mut Tagwright, s: String) -> Task<Message> {
    state.folder_input = s;
    Task::none()
}

pub(crate) fn load_folder(state: &mut Tagwright) -> Task<Message> {
    if state.is_busy() {
        return Task::none();
    }

    let input = state.folder_input.trim();
    if input.is_empty() {
        state.status = "Enter a folder path.".to_string();
        return Task::none();
    }

    let root = PathBuf::from(input);
    if !root.is_dir() {
        state.status = format!("Not a folder: {}", root.display());
        return Task::none();
    }

    state.scanning = true;
    state.status = "Scanning...".to_string();

    let include_subfolders = state.settings.include_subfolders;
    let scan_root = root.clone();

    Task::perform(
        spawn_blocking(move || {
            core::scan_and_read(&scan_root, include_subfolders).map_err(|e| e.to_string())
        }),
        move |res| Message::ScanFinished(root.clone(), res.and_then(|r| r)),
    )
}

pub(crate) fn toggle_subfolders(state: &mut Tagwright, v: bool) -> Task<Message> {
    state.settings.include_subfolders = v;
    persist_settings(state);

    // Re-scan what's loaded so the list matches the toggle.
    if state.root.is_some() {
        return load_folder(state);
    }
    Task::none()
}

pub(crate) fn scan_finished(
    state: &mut Tagwright,
    root: PathBuf,
    result: Result<(Vec<SongRecord>, usize), String>,
) -> Task<Message> {
    state.scanning = false;

    match result {
        Ok((songs, tag_failures)) => {
            let with_json = songs.iter().filter(|s| s.has_metadata()).count();
            let bad_json = songs.iter().filter(|s| s.json_error.is_some()).count();

            let mut status = format!("Loaded {} songs ({with_json} with metadata)", songs.len());
            if tag_failures > 0 {
                status.push_str(&format!(", {tag_failures} tag read failures"));
            }
            if bad_json > 0 {
                status.push_str(&format!(", {bad_json} with malformed JSON"));
            }
            state.status = status;

            state.versions = VersionIndex::build(&songs);
            state.songs = songs;
            state.duplicates = None;
            state.last_report = None;

            state.settings.last_folder = Some(root.clone());
            state.root = Some(root);
            persist_settings(state);

            // New library = old indices are invalid.
            reset_selection(state);
            refresh_visible(state);
        }
        Err(e) => {
            // Keep previous songs; just report.
            state.status = format!("Scan error: {e}");
        }
    }

    Task::none()
}
