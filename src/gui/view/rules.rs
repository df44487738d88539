//! gui/view/rules.rs
//! Right panel, bottom half: rule tables per output tag, presets, apply.

use iced::widget::{Column, Row, button, column, pick_list, row, text, text_input};
use iced::{Alignment, Length};

use crate::core::rules::{Logic, Operator, Rule, RuleTarget};
use crate::core::types::Field;

use super::super::state::{Message, Tagwright};
use super::constants::REPORT_LINES;
use super::widgets::{action, section, tab};

pub(crate) fn build_rules_panel(state: &Tagwright) -> Column<'_, Message> {
    let tabs = RuleTarget::ALL.iter().fold(Row::new().spacing(6), |r, &t| {
        r.push(tab(t.to_string(), state.rule_tab == t, Message::SelectRuleTab(t)))
    });

    let rules = state.rules.rules(state.rule_tab);
    let mut list = Column::new().spacing(6);
    if rules.is_empty() {
        list = list.push(text("No rules: this tag is left unchanged.").size(12));
    }
    for (i, rule) in rules.iter().enumerate() {
        list = list.push(rule_row(i, rule, rules.len()));
    }

    let add = action("+ Add rule", true, Message::AddRule);

    column![
        section("Rules"),
        tabs,
        list,
        add,
        build_presets(state),
        build_apply(state),
    ]
    .spacing(8)
}

fn rule_row(i: usize, rule: &Rule, count: usize) -> Column<'_, Message> {
    let logic: iced::Element<'_, Message> = if i == 0 {
        text("IF").size(12).width(Length::Fixed(56.0)).into()
    } else {
        pick_list(&Logic::ALL[..], Some(rule.logic), move |l| {
            Message::RuleLogicChanged(i, l)
        })
        .text_size(12)
        .width(Length::Fixed(56.0))
        .into()
    };

    let mut cond = row![
        logic,
        pick_list(&Field::METADATA[..], Some(rule.field), move |f| {
            Message::RuleFieldChanged(i, f)
        })
        .text_size(12),
        pick_list(&Operator::ALL[..], Some(rule.operator), move |o| {
            Message::RuleOperatorChanged(i, o)
        })
        .text_size(12),
    ]
    .spacing(4)
    .align_y(Alignment::Center);

    if !rule.operator.is_unary() {
        cond = cond.push(
            text_input("value", &rule.value)
                .on_input(move |v| Message::RuleValueChanged(i, v))
                .size(12)
                .width(Length::Fill),
        );
    }

    let then = row![
        text("then").size(12).width(Length::Fixed(56.0)),
        text_input("{Title}", &rule.template)
            .on_input(move |v| Message::RuleTemplateChanged(i, v))
            .size(12)
            .width(Length::Fill),
        button(text("↑").size(12)).on_press_maybe((i > 0).then_some(Message::MoveRule(i, true))),
        button(text("↓").size(12))
            .on_press_maybe((i + 1 < count).then_some(Message::MoveRule(i, false))),
        button(text("×").size(12)).on_press(Message::RemoveRule(i)),
    ]
    .spacing(4)
    .align_y(Alignment::Center);

    column![cond, then].spacing(2)
}

fn build_presets(state: &Tagwright) -> Column<'_, Message> {
    let busy = state.is_busy();
    let picker = pick_list(
        state.preset_names.as_slice(),
        state.selected_preset.clone(),
        Message::PresetSelected,
    )
    .placeholder("Load preset…")
    .text_size(12)
    .width(Length::Fill);

    let save_row = row![
        text_input("Preset name", &state.preset_name_input)
            .on_input(Message::PresetNameChanged)
            .on_submit(Message::SavePreset)
            .size(12)
            .width(Length::Fill),
        action("Save", !busy && !state.preset_name_input.trim().is_empty(), Message::SavePreset),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let manage = row![
        action("Delete", !busy && state.selected_preset.is_some(), Message::DeletePreset),
        action("Reset to defaults", !busy, Message::ResetRules),
    ]
    .spacing(6);

    column![section("Presets"), picker, save_row, manage].spacing(6)
}

fn build_apply(state: &Tagwright) -> Column<'_, Message> {
    let busy = state.is_busy();
    let selected_label = if state.selected.is_empty() {
        "Apply to current".to_string()
    } else {
        format!("Apply to {} selected", state.selected.len())
    };
    let can_selected = !state.selected.is_empty() || state.current.is_some();

    let buttons = row![
        button(text(selected_label).size(13))
            .on_press_maybe((!busy && can_selected).then_some(Message::ApplySelected)),
        action("Apply to all shown", !busy && !state.visible.is_empty(), Message::ApplyAll),
    ]
    .spacing(8);

    let mut col = column![section("Apply"), buttons].spacing(6);

    if let Some(report) = &state.last_report {
        col = col.push(text(report.summary()).size(12));
        for err in report.errors.iter().take(REPORT_LINES) {
            col = col.push(text(err.as_str()).size(11));
        }
        if report.errors.len() > REPORT_LINES {
            col = col.push(
                text(format!("… and {} more", report.errors.len() - REPORT_LINES)).size(11),
            );
        }
    }

    col
}
