//! GUI renderer (reads state, produces widgets; no mutation).

mod constants;
mod editor;
mod rules;
mod songs;
mod toolbar;
mod tools;
mod widgets;

use iced::Length;
use iced::widget::{Column, column, row, scrollable, text};

use super::state::{Message, Tagwright};
use constants::SIDE_W;

pub(crate) fn view(state: &Tagwright) -> Column<'_, Message> {
    let toolbar = toolbar::build_toolbar(state);

    let mut main = Column::new().spacing(12).width(Length::Fill);
    if state.show_stats {
        main = main.push(tools::build_tools_panel(state));
    }
    main = main.push(songs::build_songs_panel(state).height(Length::Fill));

    let side = scrollable(
        column![
            editor::build_editor_panel(state),
            rules::build_rules_panel(state),
        ]
        .spacing(20)
        .padding(4),
    )
    .width(Length::Fixed(SIDE_W))
    .height(Length::Fill);

    let body = row![main, side].spacing(12).height(Length::Fill);
    let status = text(state.status.as_str()).size(12);

    column![toolbar, body, status].spacing(12).padding(12)
}
