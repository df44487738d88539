//! gui/view/tools.rs
//! Statistics, JSON export and duplicate check.

use iced::widget::{Column, column, row, text, text_input};
use iced::{Alignment, Length};

use super::super::state::{Message, Tagwright};
use super::super::util::display_path;
use super::widgets::{action, section};

pub(crate) fn build_tools_panel(state: &Tagwright) -> Column<'_, Message> {
    let busy = state.is_busy();
    let stats = &state.stats;

    let mut counts = column![
        text(stats.headline()).size(13),
        text(format!("Unique (T,A,C): {}", stats.unique_tac)).size(13),
    ]
    .spacing(2);
    for c in stats.solos.iter().chain([&stats.duets, &stats.other]) {
        counts = counts.push(
            text(format!("{}: {} unique / {} total", c.name, c.unique, c.total)).size(12),
        );
    }

    let solo_row = row![
        text("Solo artists").size(12),
        text_input("Neuro, Evil", &state.solo_input)
            .on_input(Message::SoloArtistsChanged)
            .size(12)
            .width(Length::Fill),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let export_row = row![
        text_input("Export folder", &state.export_input)
            .on_input(Message::ExportInputChanged)
            .on_submit(Message::ExportJson)
            .size(12)
            .width(Length::Fill),
        action(
            "Export JSON",
            !busy && state.root.is_some() && !state.export_input.trim().is_empty(),
            Message::ExportJson
        ),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let mut col = column![
        section("Statistics (shown songs)"),
        counts,
        solo_row,
        section("Export"),
        export_row,
        section("Duplicates"),
        action("Check duplicate audio", !busy && !state.songs.is_empty(), Message::CheckDuplicates),
    ]
    .spacing(8);

    match &state.duplicates {
        None => {}
        Some(groups) if groups.is_empty() => {
            col = col.push(text("No duplicate audio found.").size(12));
        }
        Some(groups) => {
            let root = state.root.as_deref();
            for (n, group) in groups.iter().enumerate() {
                let mut g = column![text(format!("Group {}", n + 1)).size(12)].spacing(1);
                for p in group {
                    g = g.push(text(format!("  {}", display_path(p, root))).size(11));
                }
                col = col.push(g);
            }
        }
    }

    col
}
