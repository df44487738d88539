//! core/settings.rs
//!
//! App settings persisted as JSON next to the executable.
//! A missing or unreadable file is never an error: defaults are used.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::Result;
use super::sort::{self, MAX_SORT_RULES, SortRule};

pub const SETTINGS_FILE: &str = "tagwright_settings.json";

/// Overrides the directory that holds settings and presets.
pub const HOME_ENV: &str = "TAGWRIGHT_HOME";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub last_folder: Option<PathBuf>,
    pub include_subfolders: bool,
    pub sort_rules: Vec<SortRule>,
    pub last_preset: Option<String>,
    /// CoverArtist values that count as solo performances in statistics.
    pub solo_artists: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_folder: None,
            include_subfolders: true,
            sort_rules: sort::default_rules(),
            last_preset: None,
            solo_artists: vec!["Neuro".to_string(), "Evil".to_string()],
        }
    }
}

/// `$TAGWRIGHT_HOME`, else the executable's folder, else the working directory.
pub fn base_dir() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(home);
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn settings_path(base_dir: &Path) -> PathBuf {
    base_dir.join(SETTINGS_FILE)
}

impl Settings {
    pub fn load_from(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no settings file, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&text) {
            Ok(mut settings) => {
                settings.sanitize();
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "settings unreadable, using defaults");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Start with the built-in rules next launch.
    pub fn forget_preset(&mut self) {
        self.last_preset = None;
    }

    /// Keep 1..=5 sort rules.
    fn sanitize(&mut self) {
        if self.sort_rules.is_empty() {
            self.sort_rules = sort::default_rules();
        }
        if let Err(e) = sort::validate(&self.sort_rules) {
            warn!(error = %e, "dropping extra sort rules");
            self.sort_rules.truncate(MAX_SORT_RULES);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Field;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load_from(&settings_path(dir.path()));
        assert_eq!(s, Settings::default());
        assert!(s.include_subfolders);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = settings_path(dir.path());
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn round_trip_and_partial_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = settings_path(dir.path());

        let s = Settings {
            last_folder: Some(PathBuf::from("/music")),
            include_subfolders: false,
            sort_rules: vec![SortRule::desc(Field::Version), SortRule::asc(Field::Track)],
            last_preset: Some("Mine".into()),
            solo_artists: vec!["Solo".into()],
        };
        s.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), s);

        fs::write(&path, r#"{"last_preset":"x","sort_rules":[]}"#).unwrap();
        let partial = Settings::load_from(&path);
        assert_eq!(partial.last_preset.as_deref(), Some("x"));
        assert!(partial.include_subfolders);
        assert_eq!(partial.sort_rules, sort::default_rules());
    }

    #[test]
    fn forgotten_preset_is_not_reloaded() {
        use crate::core::presets::PresetStore;
        use crate::core::rules::{Operator, Rule, RuleSet};

        let dir = tempfile::tempdir().unwrap();
        let path = settings_path(dir.path());
        let store = PresetStore::new(dir.path());

        let mut mine = RuleSet::builtin();
        mine.title = vec![Rule::new(Field::Title, Operator::IsNotEmpty, "", "custom")];
        store.save("Mine", &mine).unwrap();

        let mut s = Settings {
            last_preset: Some("Mine".into()),
            ..Settings::default()
        };
        s.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path);
        assert_eq!(store.load_or_builtin(loaded.last_preset.as_deref()), mine);

        s.forget_preset();
        s.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.last_preset, None);
        assert_eq!(store.load_or_builtin(loaded.last_preset.as_deref()), RuleSet::builtin());
    }

    #[test]
    fn extra_sort_rules_are_dropped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = settings_path(dir.path());
        let rules = vec![SortRule::asc(Field::Track); MAX_SORT_RULES + 2];
        let text = serde_json::json!({ "sort_rules": rules }).to_string();
        fs::write(&path, text).unwrap();

        let s = Settings::load_from(&path);
        assert_eq!(s.sort_rules.len(), MAX_SORT_RULES);
        assert!(sort::validate(&s.sort_rules).is_ok());
    }
}
