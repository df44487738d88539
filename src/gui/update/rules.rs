//! gui/update/rules.rs
//! Rule rows for the active tab, and named presets.

use iced::Task;
use tracing::warn;

use crate::core::rules::{MAX_RULES_PER_TARGET, Operator, Rule, RuleSet, RuleTarget};
use crate::core::types::Field;

use super::super::state::{Message, Tagwright};
use super::util::persist_settings;

pub(crate) fn select_tab(state: &mut Tagwright, target: RuleTarget) -> Task<Message> {
    state.rule_tab = target;
    Task::none()
}

pub(crate) fn add_rule(state: &mut Tagwright) -> Task<Message> {
    let target = state.rule_tab;
    let list = state.rules.rules_mut(target);
    if list.len() >= MAX_RULES_PER_TARGET {
        state.status = format!("At most {MAX_RULES_PER_TARGET} rules per tab.");
        return Task::none();
    }
    list.push(Rule::new(
        Field::Title,
        Operator::IsNotEmpty,
        "",
        target.default_template(),
    ));
    Task::none()
}

pub(crate) fn remove_rule(state: &mut Tagwright, i: usize) -> Task<Message> {
    let list = state.rules.rules_mut(state.rule_tab);
    if i < list.len() {
        list.remove(i);
    }
    Task::none()
}

pub(crate) fn move_rule(state: &mut Tagwright, i: usize, up: bool) -> Task<Message> {
    let list = state.rules.rules_mut(state.rule_tab);
    let j = if up { i.checked_sub(1) } else { Some(i + 1) };
    if let Some(j) = j.filter(|&j| j < list.len() && i < list.len()) {
        list.swap(i, j);
    }
    Task::none()
}

pub(crate) fn edit_rule(
    state: &mut Tagwright,
    i: usize,
    edit: impl FnOnce(&mut Rule),
) -> Task<Message> {
    if let Some(rule) = state.rules.rules_mut(state.rule_tab).get_mut(i) {
        edit(rule);
    }
    Task::none()
}

pub(crate) fn preset_selected(state: &mut Tagwright, name: String) -> Task<Message> {
    match state.presets.load(&name) {
        Ok(rules) => {
            state.rules = rules;
            state.status = format!("Loaded preset '{name}'");
            state.preset_name_input = name.clone();
            state.settings.last_preset = Some(name.clone());
            state.selected_preset = Some(name);
            persist_settings(state);
        }
        Err(e) => state.status = format!("Preset error: {e}"),
    }
    Task::none()
}

pub(crate) fn preset_name_changed(state: &mut Tagwright, s: String) -> Task<Message> {
    state.preset_name_input = s;
    Task::none()
}

pub(crate) fn save_preset(state: &mut Tagwright) -> Task<Message> {
    let name = state.preset_name_input.trim().to_string();

    match state.presets.save(&name, &state.rules) {
        Ok(()) => {
            reload_names(state);
            state.status = format!("Saved preset '{name}'");
            state.settings.last_preset = Some(name.clone());
            state.selected_preset = Some(name);
            persist_settings(state);
        }
        Err(e) => state.status = format!("Preset error: {e}"),
    }
    Task::none()
}

pub(crate) fn delete_preset(state: &mut Tagwright) -> Task<Message> {
    let Some(name) = state.selected_preset.clone() else {
        state.status = "Pick a preset to delete.".to_string();
        return Task::none();
    };

    match state.presets.delete(&name) {
        Ok(()) => {
            reload_names(state);
            state.selected_preset = None;
            state.settings.forget_preset();
            persist_settings(state);
            state.status = format!("Deleted preset '{name}'");
        }
        Err(e) => state.status = format!("Preset error: {e}"),
    }
    Task::none()
}

/// Back to the built-in rules (presets on disk are untouched).
pub(crate) fn reset_rules(state: &mut Tagwright) -> Task<Message> {
    state.rules = RuleSet::builtin();
    state.selected_preset = None;
    state.settings.forget_preset();
    persist_settings(state);
    state.status = "Rules reset to defaults.".to_string();
    Task::none()
}

fn reload_names(state: &mut Tagwright) {
    match state.presets.list() {
        Ok(names) => state.preset_names = names,
        Err(e) => warn!(error = %e, "could not list presets"),
    }
}
