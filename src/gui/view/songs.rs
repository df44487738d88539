//! Song list: sort bar + table of the visible songs.

use iced::widget::{Column, button, checkbox, column, container, mouse_area, pick_list, row, scrollable, text};
use iced::{Alignment, Length};

use crate::core::sort::MAX_SORT_RULES;
use crate::core::types::Field;

use super::super::state::{Message, Tagwright};
use super::constants::{
    COL_MARK, COL_MID, COL_NUM, COL_WIDE, HEADER_TEXT, ROW_TEXT, SONG_LIST_SPACING, SONG_ROW_H,
    SONG_ROW_HPAD, SONG_ROW_VPAD,
};
use super::widgets::action;

/// Table columns after the marker.
const COLUMNS: [(Field, f32); 10] = [
    (Field::Title, COL_WIDE),
    (Field::Artist, COL_MID),
    (Field::CoverArtist, COL_MID),
    (Field::Version, COL_NUM),
    (Field::Discnumber, COL_NUM),
    (Field::Track, COL_NUM),
    (Field::Date, COL_MID),
    (Field::Comment, COL_MID),
    (Field::Special, COL_NUM),
    (Field::File, COL_WIDE),
];

pub(crate) fn build_songs_panel(state: &Tagwright) -> Column<'_, Message> {
    column![build_sort_bar(state), build_songs_table(state).height(Length::Fill)].spacing(8)
}

fn build_sort_bar(state: &Tagwright) -> iced::widget::Row<'_, Message> {
    let mut bar = row![text("Sort").size(14)].spacing(6).align_y(Alignment::Center);

    for (i, rule) in state.settings.sort_rules.iter().enumerate() {
        let field = pick_list(&Field::ALL[..], Some(rule.field), move |f| {
            Message::SortFieldChanged(i, f)
        })
        .text_size(13);
        let order = button(text(rule.order.to_string()).size(13)).on_press(Message::SortOrderToggled(i));

        let mut item = row![field, order].spacing(2).align_y(Alignment::Center);
        // Primary key always stays.
        if i > 0 {
            item = item.push(button(text("×").size(13)).on_press(Message::RemoveSortRule(i)));
        }
        bar = bar.push(item);
    }

    let can_add = state.settings.sort_rules.len() < MAX_SORT_RULES;
    bar.push(action("+ Sort", can_add, Message::AddSortRule))
}

fn build_songs_table(state: &Tagwright) -> iced::widget::Scrollable<'_, Message> {
    let mut header = row![text("").size(HEADER_TEXT).width(Length::Fixed(COL_MARK))]
        .spacing(10)
        .align_y(Alignment::Center);
    for (field, w) in COLUMNS {
        header = header.push(text(field.label()).size(HEADER_TEXT).width(Length::Fixed(w)));
    }

    let mut col = column![header].spacing(SONG_LIST_SPACING);

    for &i in &state.visible {
        let Some(song) = state.songs.get(i) else {
            continue;
        };
        let is_current = state.current == Some(i);
        let is_selected = state.selected.contains(&i);

        // Current song gets ▶; malformed JSON gets !.
        let marker = if is_current {
            "▶"
        } else if song.json_error.is_some() {
            "!"
        } else {
            ""
        };

        let mark = row![
            checkbox(is_selected).on_toggle(move |_| Message::ToggleSelected(i)),
            text(marker).size(ROW_TEXT),
        ]
        .spacing(4)
        .width(Length::Fixed(COL_MARK))
        .align_y(Alignment::Center);

        let mut cells = row![mark].spacing(10).align_y(Alignment::Center);
        for (field, w) in COLUMNS {
            cells = cells.push(text(song.get(field)).size(ROW_TEXT).width(Length::Fixed(w)));
        }

        let row_widget = mouse_area(
            container(cells)
                .padding([SONG_ROW_VPAD, SONG_ROW_HPAD])
                .height(Length::Fixed(SONG_ROW_H))
                .width(Length::Shrink),
        )
        .on_press(Message::SelectSong(i));

        col = col.push(row_widget);
    }

    if state.visible.is_empty() {
        let hint = if state.songs.is_empty() {
            "No songs loaded."
        } else {
            "No songs match the search."
        };
        col = col.push(text(hint).size(ROW_TEXT));
    }

    scrollable(col).height(Length::Fill)
}
