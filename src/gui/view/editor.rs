//! gui/view/editor.rs
//! Right panel, top half: current song, output preview, JSON editor, rename.

use iced::widget::{Column, column, row, text, text_editor, text_input};
use iced::{Alignment, Length};

use crate::core::types::SongRecord;

use super::super::state::{Message, Tagwright};
use super::super::util::display_path;
use super::constants::{COVER_BIG, JSON_EDITOR_H};
use super::widgets::{action, cover_thumb, info_row, section};

pub(crate) fn build_editor_panel(state: &Tagwright) -> Column<'_, Message> {
    let busy = state.is_busy();

    let nav = row![
        action("◀ Prev", !state.visible.is_empty(), Message::Prev),
        action("Next ▶", !state.visible.is_empty(), Message::Next),
        action("Select all", !state.visible.is_empty(), Message::SelectAllVisible),
        action("Clear", !state.selected.is_empty(), Message::ClearSelection),
        text(format!("Selected: {}", state.selected.len())).size(12),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let Some(song) = state.current_song() else {
        return column![section("Song"), nav, text("Select a song in the list.").size(13)].spacing(8);
    };

    let cover = cover_thumb(state.covers.peek(&song.path).and_then(Option::as_ref), COVER_BIG);
    let header = row![
        cover,
        column![
            text(song.file_name()).size(15),
            text(display_path(&song.path, state.root.as_deref())).size(11),
            tag_snapshot(song),
        ]
        .spacing(4)
        .width(Length::Fill),
    ]
    .spacing(10);

    // JSON editor
    let json_status = match &state.json_error {
        Some(e) => text(format!("Invalid JSON: {e}")).size(12),
        None if state.json_dirty => text("Valid JSON (unsaved)").size(12),
        None => text("").size(12),
    };
    let prefix = if song.comment_prefix.is_empty() {
        text("").size(11)
    } else {
        text(format!("Comment prefix kept on save: {:?}", song.comment_prefix)).size(11)
    };
    let editor = text_editor(&state.json_editor)
        .on_action(Message::JsonEdited)
        .height(Length::Fixed(JSON_EDITOR_H));
    let json_buttons = row![
        action("Save JSON", !busy && state.json_dirty && state.json_error.is_none(), Message::SaveJson),
        action("Revert", state.json_dirty, Message::RevertJson),
    ]
    .spacing(8);

    // Rename
    let rename_row = row![
        text_input("New file name", &state.rename_input)
            .on_input(Message::RenameInputChanged)
            .on_submit(Message::Rename)
            .width(Length::Fill),
        text(".mp3").size(12),
        action("Rename", !busy, Message::Rename),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let mut col = column![
        section("Song"),
        nav,
        header,
        build_preview(state, song),
        section("JSON metadata"),
        editor,
        json_status,
        prefix,
        json_buttons,
        section("Rename"),
        rename_row,
    ]
    .spacing(8);

    if let Some(name) = &state.rename_conflict {
        col = col.push(
            row![
                text(format!("'{name}' exists.")).size(12),
                action("Overwrite", !busy, Message::ConfirmOverwrite),
                action("Cancel", true, Message::CancelOverwrite),
            ]
            .spacing(6)
            .align_y(Alignment::Center),
        );
    }

    col
}

/// ID3 frames currently on disk.
fn tag_snapshot(song: &SongRecord) -> Column<'_, Message> {
    let t = &song.tags;
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".into());
    column![
        info_row("ID3 title", show(&t.title)),
        info_row("ID3 artist", show(&t.artist)),
        info_row("ID3 album", show(&t.album)),
        info_row(
            "Disc / Track",
            format!("{} / {}", show(&t.disc), show(&t.track))
        ),
        info_row("Date", show(&t.date)),
    ]
    .spacing(2)
}

/// What "Apply" would write for this song.
fn build_preview<'a>(state: &'a Tagwright, song: &'a SongRecord) -> Column<'a, Message> {
    let out = state.rules.render(song, &state.versions);
    let show = |v: Option<String>| v.unwrap_or_else(|| "(unchanged)".into());
    let versions = state.versions.versions_of(song).join(", ");

    column![
        section("Output preview"),
        info_row("Title", show(out.title)),
        info_row("Artist", show(out.artist)),
        info_row("Album", show(out.album)),
        info_row("Disc", show(out.disc)),
        info_row("Track", show(out.track)),
        info_row("Date", show(out.date)),
        info_row("Versions", if versions.is_empty() { "-".into() } else { versions }),
    ]
    .spacing(2)
}
