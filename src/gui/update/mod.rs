//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use iced::Task;

use super::state::{Message, Tagwright};

mod apply;
mod editor;
mod listing;
mod rules;
mod scan;
mod selection;
mod tools;
mod util;

pub(crate) fn update(state: &mut Tagwright, message: Message) -> Task<Message> {
    match message {
        // Folder + scan
        Message::FolderInputChanged(s) => scan::folder_input_changed(state, s),
        Message::LoadFolder => scan::load_folder(state),
        Message::ToggleSubfolders(v) => scan::toggle_subfolders(state, v),
        Message::ScanFinished(root, result) => scan::scan_finished(state, root, result),

        // Search + sort
        Message::SearchChanged(s) => listing::search_changed(state, s),
        Message::SortFieldChanged(i, field) => listing::sort_field_changed(state, i, field),
        Message::SortOrderToggled(i) => listing::sort_order_toggled(state, i),
        Message::AddSortRule => listing::add_sort_rule(state),
        Message::RemoveSortRule(i) => listing::remove_sort_rule(state, i),

        // Selection
        Message::SelectSong(i) => selection::select_song(state, i),
        Message::ToggleSelected(i) => selection::toggle_selected(state, i),
        Message::SelectAllVisible => selection::select_all_visible(state),
        Message::ClearSelection => selection::clear_selection(state),
        Message::Prev => selection::step(state, false),
        Message::Next => selection::step(state, true),
        Message::CoverLoaded(path, handle) => selection::cover_loaded(state, path, handle),

        // JSON editor
        Message::JsonEdited(action) => editor::json_edited(state, action),
        Message::SaveJson => editor::save_json(state),
        Message::RevertJson => editor::revert_json(state),
        Message::JsonSaved(i, result) => editor::json_saved(state, i, result),

        // Rename
        Message::RenameInputChanged(s) => editor::rename_input_changed(state, s),
        Message::Rename => editor::start_rename(state, false),
        Message::ConfirmOverwrite => editor::start_rename(state, true),
        Message::CancelOverwrite => editor::cancel_overwrite(state),
        Message::Renamed(i, outcome) => editor::renamed(state, i, outcome),

        // Rules
        Message::SelectRuleTab(t) => rules::select_tab(state, t),
        Message::AddRule => rules::add_rule(state),
        Message::RemoveRule(i) => rules::remove_rule(state, i),
        Message::MoveRule(i, up) => rules::move_rule(state, i, up),
        Message::RuleLogicChanged(i, v) => rules::edit_rule(state, i, |r| r.logic = v),
        Message::RuleFieldChanged(i, v) => rules::edit_rule(state, i, |r| r.field = v),
        Message::RuleOperatorChanged(i, v) => rules::edit_rule(state, i, |r| r.operator = v),
        Message::RuleValueChanged(i, v) => rules::edit_rule(state, i, |r| r.value = v),
        Message::RuleTemplateChanged(i, v) => rules::edit_rule(state, i, |r| r.template = v),

        // Presets
        Message::PresetSelected(name) => rules::preset_selected(state, name),
        Message::PresetNameChanged(s) => rules::preset_name_changed(state, s),
        Message::SavePreset => rules::save_preset(state),
        Message::DeletePreset => rules::delete_preset(state),
        Message::ResetRules => rules::reset_rules(state),

        // Apply
        Message::ApplySelected => apply::apply_selected(state),
        Message::ApplyAll => apply::apply_all(state),
        Message::ApplyFinished(result) => apply::apply_finished(state, result),

        // Tools
        Message::ToggleStats => tools::toggle_stats(state),
        Message::SoloArtistsChanged(s) => tools::solo_artists_changed(state, s),
        Message::ExportInputChanged(s) => tools::export_input_changed(state, s),
        Message::ExportJson => tools::export_json(state),
        Message::ExportFinished(result) => tools::export_finished(state, result),
        Message::CheckDuplicates => tools::check_duplicates(state),
        Message::DuplicatesFound(result) => tools::duplicates_found(state, result),
    }
}
