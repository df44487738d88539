//! Top bar: folder, subfolder toggle, search.

use iced::widget::{checkbox, column, container, row, text, text_input};
use iced::{Alignment, Length};

use super::super::state::{Message, Tagwright};
use super::widgets::action;

pub(crate) fn build_toolbar(state: &Tagwright) -> iced::widget::Container<'_, Message> {
    let busy = state.is_busy();

    let folder_input = text_input("Folder with mp3 files", &state.folder_input)
        .on_input(Message::FolderInputChanged)
        .on_submit(Message::LoadFolder)
        .width(Length::Fill);

    let load_btn = action(
        if state.scanning { "Scanning..." } else { "Load" },
        !busy,
        Message::LoadFolder,
    );

    let subfolders = checkbox(state.settings.include_subfolders)
        .label("Include subfolders")
        .on_toggle(Message::ToggleSubfolders);

    let tools_btn = action(
        if state.show_stats { "Hide stats & tools" } else { "Stats & tools" },
        true,
        Message::ToggleStats,
    );

    let folder_row = row![folder_input, load_btn, subfolders, tools_btn]
        .spacing(8)
        .align_y(Alignment::Center);

    let search = text_input(
        "Search: words, or field=value (artist=Neuro track>=3 version=latest title~love)",
        &state.search_input,
    )
    .on_input(Message::SearchChanged)
    .width(Length::Fill);

    let counts = text(format!("{} / {}", state.visible.len(), state.songs.len())).size(12);

    let search_row = row![search, counts].spacing(8).align_y(Alignment::Center);

    container(column![text("tagwright").size(20), folder_row, search_row].spacing(8)).padding(12)
}
