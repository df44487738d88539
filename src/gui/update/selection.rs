//! gui/update/selection.rs
//!
//! Selection + prev/next navigation + editor loading.
//!
//! Indices point into `state.songs` and stay valid until the next scan.
//! Cover art cache is keyed by path.

use std::path::{Path, PathBuf};

use iced::Task;
use iced::widget::{image, text_editor};

use crate::core::metadata::to_pretty;
use crate::core::types::file_stem;

use super::super::state::{Message, Tagwright};
use super::super::util::step_index;
use super::util::spawn_blocking;

pub(crate) fn select_song(state: &mut Tagwright, i: usize) -> Task<Message> {
    if i >= state.songs.len() {
        return Task::none();
    }

    // Plain click: replace selection.
    state.selected.clear();
    state.selected.insert(i);
    state.current = Some(i);

    load_editor(state);
    maybe_load_cover(state, i)
}

/// Ctrl-style toggle: add/remove one song without clearing the rest.
pub(crate) fn toggle_selected(state: &mut Tagwright, i: usize) -> Task<Message> {
    if i >= state.songs.len() {
        return Task::none();
    }

    if state.selected.remove(&i) {
        if state.current == Some(i) {
            state.current = state.selected.iter().next().copied();
            load_editor(state);
        }
        return Task::none();
    }

    state.selected.insert(i);
    state.current = Some(i);
    load_editor(state);
    maybe_load_cover(state, i)
}

pub(crate) fn select_all_visible(state: &mut Tagwright) -> Task<Message> {
    state.selected = state.visible.iter().copied().collect();
    state.status = format!("Selected {} songs", state.selected.len());

    if state.current.is_none() {
        if let Some(&first) = state.visible.first() {
            state.current = Some(first);
            load_editor(state);
            return maybe_load_cover(state, first);
        }
    }
    Task::none()
}

pub(crate) fn clear_selection(state: &mut Tagwright) -> Task<Message> {
    reset_selection(state);
    Task::none()
}

pub(crate) fn reset_selection(state: &mut Tagwright) {
    state.selected.clear();
    state.current = None;
    load_editor(state);
}

/// Move through the visible list (wraps neither way).
pub(crate) fn step(state: &mut Tagwright, forward: bool) -> Task<Message> {
    let Some(pos) = step_index(state.current_visible_pos(), state.visible.len(), forward) else {
        return Task::none();
    };
    let i = state.visible[pos];
    select_song(state, i)
}

pub(crate) fn cover_loaded(
    state: &mut Tagwright,
    path: PathBuf,
    handle: Option<image::Handle>,
) -> Task<Message> {
    state.covers.put(path, handle);
    Task::none()
}

/// Fill the JSON editor and rename box from the current song.
pub(crate) fn load_editor(state: &mut Tagwright) {
    state.json_dirty = false;
    state.rename_conflict = None;

    let Some(song) = state.current_song() else {
        state.json_editor = text_editor::Content::new();
        state.json_error = None;
        state.rename_input.clear();
        return;
    };

    let text = if song.has_metadata() {
        to_pretty(&song.metadata)
    } else {
        String::new()
    };
    let json_error = song.json_error.clone();
    let stem = file_stem(&song.path);

    state.json_editor = text_editor::Content::with_text(&text);
    state.json_error = json_error;
    state.rename_input = stem;
}

/// Drop `songs[j]` (a rename overwrote it) and shift indices above it.
pub(crate) fn remove_song(state: &mut Tagwright, j: usize) {
    if j >= state.songs.len() {
        return;
    }
    state.songs.remove(j);

    let shift = |i: usize| if i > j { i - 1 } else { i };
    state.current = state.current.filter(|&c| c != j).map(shift);
    state.selected = state
        .selected
        .iter()
        .filter(|&&i| i != j)
        .map(|&i| shift(i))
        .collect();
}

fn maybe_load_cover(state: &mut Tagwright, i: usize) -> Task<Message> {
    let Some(song) = state.songs.get(i) else {
        return Task::none();
    };
    let path = song.path.clone();

    // Cached: just mark it recently used.
    if state.covers.get(&path).is_some() {
        return Task::none();
    }

    let key = path.clone();
    Task::perform(
        spawn_blocking(move || load_cover_handle_from_path(&path)),
        move |res| Message::CoverLoaded(key.clone(), res.ok().flatten()),
    )
}

fn load_cover_handle_from_path(path: &Path) -> Option<image::Handle> {
    let (bytes, _mime) = crate::core::tags::read_embedded_art(path).ok()??;
    Some(image::Handle::from_bytes(bytes))
}
