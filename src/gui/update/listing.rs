//! gui/update/listing.rs
//! Search box + sort rules -> `state.visible`, plus statistics over it.

use iced::Task;

use crate::core::search::{self, parse_query};
use crate::core::sort::{self, SortRule};
use crate::core::stats;
use crate::core::types::Field;

use super::super::state::{Message, Tagwright};
use super::util::persist_settings;

/// Re-filter, re-sort and re-count. Call after anything that changes
/// the songs, the query or the sort rules.
pub(crate) fn refresh_visible(state: &mut Tagwright) {
    let mut visible = search::filter(&state.songs, &state.query, &state.versions);
    sort::sort_indices(&state.songs, &mut visible, &state.settings.sort_rules);
    state.visible = visible;

    state.stats = stats::compute(
        state.visible.iter().filter_map(|&i| state.songs.get(i)),
        &state.settings.solo_artists,
    );
}

pub(crate) fn search_changed(state: &mut Tagwright, s: String) -> Task<Message> {
    state.query = parse_query(&s);
    state.search_input = s;
    refresh_visible(state);

    if !state.query.is_empty() {
        state.status = format!(
            "Filter: {} ({} of {} shown)",
            state.query.summary(),
            state.visible.len(),
            state.songs.len()
        );
    }
    Task::none()
}

pub(crate) fn sort_field_changed(state: &mut Tagwright, i: usize, field: Field) -> Task<Message> {
    if let Some(rule) = state.settings.sort_rules.get_mut(i) {
        rule.field = field;
        sort_rules_changed(state);
    }
    Task::none()
}

pub(crate) fn sort_order_toggled(state: &mut Tagwright, i: usize) -> Task<Message> {
    if let Some(rule) = state.settings.sort_rules.get_mut(i) {
        rule.order = rule.order.toggled();
        sort_rules_changed(state);
    }
    Task::none()
}

pub(crate) fn add_sort_rule(state: &mut Tagwright) -> Task<Message> {
    let mut rules = state.settings.sort_rules.clone();
    rules.push(SortRule::asc(Field::Artist));
    if let Err(e) = sort::validate(&rules) {
        state.status = e.to_string();
        return Task::none();
    }
    state.settings.sort_rules = rules;
    sort_rules_changed(state);
    Task::none()
}

/// The first (primary) rule always stays.
pub(crate) fn remove_sort_rule(state: &mut Tagwright, i: usize) -> Task<Message> {
    if i == 0 || i >= state.settings.sort_rules.len() {
        return Task::none();
    }
    state.settings.sort_rules.remove(i);
    sort_rules_changed(state);
    Task::none()
}

fn sort_rules_changed(state: &mut Tagwright) {
    persist_settings(state);
    refresh_visible(state);
}
