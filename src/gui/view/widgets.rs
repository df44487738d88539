//! Reusable small widgets/helpers used across view modules.

use iced::widget::{Button, button, column, container, image, row, text};
use iced::{Alignment, Element, Length};

use super::super::state::Message;
use super::constants::LABEL_W;

pub(crate) fn cover_placeholder(size: f32) -> iced::widget::Container<'static, Message> {
    container(
        column![text("♪").size(28), text("no cover").size(12)]
            .spacing(4)
            .align_x(Alignment::Center),
    )
    .width(Length::Fixed(size))
    .height(Length::Fixed(size))
    .center_x(Length::Fixed(size))
    .center_y(Length::Fixed(size))
}

/// If `handle` exists, show it; otherwise show the placeholder.
pub(crate) fn cover_thumb(handle: Option<&image::Handle>, size: f32) -> Element<'static, Message> {
    match handle {
        Some(h) => container(image(h.clone()))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .center_x(Length::Fixed(size))
            .center_y(Length::Fixed(size))
            .into(),
        None => cover_placeholder(size).into(),
    }
}

/// "Label   value" read-only line.
pub(crate) fn info_row<'a>(label: &'a str, value: String) -> iced::widget::Row<'a, Message> {
    row![
        text(label).size(12).width(Length::Fixed(LABEL_W)),
        text(value).size(12).width(Length::Fill),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
}

/// Button that only fires when `enabled`.
pub(crate) fn action<'a>(label: &'a str, enabled: bool, msg: Message) -> Button<'a, Message> {
    button(text(label).size(13)).on_press_maybe(enabled.then_some(msg))
}

/// Tab-style toggle: checked tabs show a mark and don't fire.
pub(crate) fn tab<'a>(label: String, active: bool, msg: Message) -> Button<'a, Message> {
    if active {
        button(text(format!("✓ {label}")).size(13))
    } else {
        button(text(label).size(13)).on_press(msg)
    }
}

pub(crate) fn section(title: &str) -> iced::widget::Text<'_> {
    text(title).size(16)
}
