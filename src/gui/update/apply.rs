//! gui/update/apply.rs
//! Batch "apply rules -> write ID3 tags" on a background thread.

use iced::Task;

use crate::core::apply::{ApplyReport, apply_rules_to};
use crate::core::tags::read_song;
use crate::core::types::SongRecord;

use super::super::state::{Message, Tagwright};
use super::listing::refresh_visible;
use super::util::spawn_blocking;

/// Selected songs, or the current one when nothing is multi-selected.
pub(crate) fn apply_selected(state: &mut Tagwright) -> Task<Message> {
    let indices: Vec<usize> = if state.selected.is_empty() {
        state.current.into_iter().collect()
    } else {
        state.selected.iter().copied().collect()
    };
    start_apply(state, indices)
}

pub(crate) fn apply_all(state: &mut Tagwright) -> Task<Message> {
    let indices = state.visible.clone();
    start_apply(state, indices)
}

fn start_apply(state: &mut Tagwright, indices: Vec<usize>) -> Task<Message> {
    if state.is_busy() {
        return Task::none();
    }
    if indices.is_empty() {
        state.status = "Nothing to apply to.".to_string();
        return Task::none();
    }

    let batch: Vec<(usize, SongRecord)> = indices
        .into_iter()
        .filter_map(|i| state.songs.get(i).map(|s| (i, s.clone())))
        .collect();
    let rules = state.rules.clone();
    let versions = state.versions.clone();

    state.working = true;
    state.status = format!("Applying rules to {} file(s)...", batch.len());

    Task::perform(
        spawn_blocking(move || {
            let report = apply_rules_to(batch.iter().map(|(_, s)| s), &rules, &versions);
            // Re-read so the tag snapshot shows what is on disk now.
            let refreshed: Vec<(usize, SongRecord)> = batch
                .into_iter()
                .map(|(i, s)| (i, read_song(s.path).0))
                .collect();
            (report, refreshed)
        }),
        Message::ApplyFinished,
    )
}

pub(crate) fn apply_finished(
    state: &mut Tagwright,
    result: Result<(ApplyReport, Vec<(usize, SongRecord)>), String>,
) -> Task<Message> {
    state.working = false;

    match result {
        Ok((report, refreshed)) => {
            for (i, song) in refreshed {
                if let Some(slot) = state.songs.get_mut(i) {
                    if slot.path == song.path {
                        *slot = song;
                    }
                }
            }
            state.status = report.summary();
            state.last_report = Some(report);
            refresh_visible(state);
        }
        Err(e) => state.status = format!("Apply error: {e}"),
    }
    Task::none()
}
