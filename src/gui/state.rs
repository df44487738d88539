//! GUI state + messages.
//! Pure data definitions used by update/ + view/.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use iced::Task;
use iced::widget::{image, text_editor};
use lru::LruCache;
use tracing::warn;

use crate::core::apply::ApplyReport;
use crate::core::presets::PresetStore;
use crate::core::rules::{Logic, Operator, RuleSet, RuleTarget};
use crate::core::search::Query;
use crate::core::settings::{self, Settings};
use crate::core::stats::Statistics;
use crate::core::types::{Field, SongRecord};
use crate::core::versions::VersionIndex;

/// Decoded covers kept in memory.
pub(crate) const COVER_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

/// Result of a background rename.
#[derive(Debug, Clone)]
pub(crate) enum RenameOutcome {
    Done(SongRecord),
    /// Target name already taken; ask before overwriting.
    Exists(String),
    Failed(String),
}

/// App state
pub(crate) struct Tagwright {
    pub status: String,
    pub scanning: bool,
    /// A write (JSON save, rename, apply, export) is running.
    pub working: bool,

    // Persistence
    pub base_dir: PathBuf,
    pub settings: Settings,
    pub presets: PresetStore,

    // Folder
    pub folder_input: String,
    pub root: Option<PathBuf>,

    // Library
    pub songs: Vec<SongRecord>,
    pub versions: VersionIndex,
    /// Filtered + sorted indices into `songs`.
    pub visible: Vec<usize>,

    // Search
    pub search_input: String,
    pub query: Query,

    // Selection (indices into `songs`)
    pub current: Option<usize>,
    pub selected: BTreeSet<usize>,
    pub covers: LruCache<PathBuf, Option<image::Handle>>,

    // JSON editor
    pub json_editor: text_editor::Content,
    pub json_dirty: bool,
    pub json_error: Option<String>,

    // Rename
    pub rename_input: String,
    pub rename_conflict: Option<String>,

    // Rules + presets
    pub rules: RuleSet,
    pub rule_tab: RuleTarget,
    pub preset_names: Vec<String>,
    pub selected_preset: Option<String>,
    pub preset_name_input: String,

    // Tools
    pub stats: Statistics,
    pub show_stats: bool,
    pub solo_input: String,
    pub export_input: String,
    pub duplicates: Option<Vec<Vec<PathBuf>>>,
    pub last_report: Option<ApplyReport>,
}

impl Tagwright {
    /// Boot: load settings and presets, then rescan the last folder.
    pub(crate) fn new() -> (Self, Task<Message>) {
        let base_dir = settings::base_dir();
        let settings = Settings::load_from(&settings::settings_path(&base_dir));
        let presets = PresetStore::new(base_dir.clone());

        let preset_names = presets.list().unwrap_or_else(|e| {
            warn!(error = %e, "could not list presets");
            Vec::new()
        });
        let selected_preset = settings
            .last_preset
            .clone()
            .filter(|p| preset_names.contains(p));
        let rules = presets.load_or_builtin(selected_preset.as_deref());

        let folder_input = settings
            .last_folder
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let solo_input = settings.solo_artists.join(", ");

        let state = Self {
            status: "Enter a folder, then Load.".to_string(),
            scanning: false,
            working: false,

            base_dir,
            settings,
            presets,

            folder_input,
            root: None,

            songs: Vec::new(),
            versions: VersionIndex::default(),
            visible: Vec::new(),

            search_input: String::new(),
            query: Query::default(),

            current: None,
            selected: BTreeSet::new(),
            covers: LruCache::new(COVER_CACHE_SIZE),

            json_editor: text_editor::Content::new(),
            json_dirty: false,
            json_error: None,

            rename_input: String::new(),
            rename_conflict: None,

            rules,
            rule_tab: RuleTarget::Title,
            preset_names,
            selected_preset,
            preset_name_input: String::new(),

            stats: Statistics::default(),
            show_stats: false,
            solo_input,
            export_input: String::new(),
            duplicates: None,
            last_report: None,
        };

        let task = if state.folder_input.is_empty() {
            Task::none()
        } else {
            Task::done(Message::LoadFolder)
        };
        (state, task)
    }

    pub(crate) fn current_song(&self) -> Option<&SongRecord> {
        self.current.and_then(|i| self.songs.get(i))
    }

    /// Position of the current song inside `visible`.
    pub(crate) fn current_visible_pos(&self) -> Option<usize> {
        let cur = self.current?;
        self.visible.iter().position(|&i| i == cur)
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.scanning || self.working
    }
}

/// Message = “something happened”.
#[derive(Debug, Clone)]
pub(crate) enum Message {
    // Folder + scan
    FolderInputChanged(String),
    LoadFolder,
    ToggleSubfolders(bool),
    ScanFinished(PathBuf, Result<(Vec<SongRecord>, usize), String>),

    // Search + sort
    SearchChanged(String),
    SortFieldChanged(usize, Field),
    SortOrderToggled(usize),
    AddSortRule,
    RemoveSortRule(usize),

    // Selection
    SelectSong(usize),
    ToggleSelected(usize),
    SelectAllVisible,
    ClearSelection,
    Prev,
    Next,
    CoverLoaded(PathBuf, Option<image::Handle>),

    // JSON editor
    JsonEdited(text_editor::Action),
    SaveJson,
    RevertJson,
    JsonSaved(usize, Result<SongRecord, String>),

    // Rename
    RenameInputChanged(String),
    Rename,
    ConfirmOverwrite,
    CancelOverwrite,
    Renamed(usize, RenameOutcome),

    // Rules
    SelectRuleTab(RuleTarget),
    AddRule,
    RemoveRule(usize),
    MoveRule(usize, bool),
    RuleLogicChanged(usize, Logic),
    RuleFieldChanged(usize, Field),
    RuleOperatorChanged(usize, Operator),
    RuleValueChanged(usize, String),
    RuleTemplateChanged(usize, String),

    // Presets
    PresetSelected(String),
    PresetNameChanged(String),
    SavePreset,
    DeletePreset,
    ResetRules,

    // Apply
    ApplySelected,
    ApplyAll,
    ApplyFinished(Result<(ApplyReport, Vec<(usize, SongRecord)>), String>),

    // Tools
    ToggleStats,
    SoloArtistsChanged(String),
    ExportInputChanged(String),
    ExportJson,
    ExportFinished(Result<usize, String>),
    CheckDuplicates,
    DuplicatesFound(Result<Vec<Vec<PathBuf>>, String>),
}
