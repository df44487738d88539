//! core/presets.rs
//!
//! Named rule sets on disk.
//!
//! Each preset is `presets/<name>.json` under the base directory.
//! Older installs kept every preset in one `metadata_presets.json`
//! (name -> preset); that file is still listed and read as a fallback.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use super::error::{Error, Result};
use super::rules::{MAX_RULES_PER_TARGET, RuleSet};

pub const PRESETS_DIR: &str = "presets";
pub const LEGACY_FILE: &str = "metadata_presets.json";

#[derive(Debug, Clone)]
pub struct PresetStore {
    base_dir: PathBuf,
}

impl PresetStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn presets_dir(&self) -> PathBuf {
        self.base_dir.join(PRESETS_DIR)
    }

    fn preset_path(&self, name: &str) -> PathBuf {
        self.presets_dir().join(format!("{name}.json"))
    }

    fn legacy_path(&self) -> PathBuf {
        self.base_dir.join(LEGACY_FILE)
    }

    /// Every preset name, folder and legacy file combined, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::new();

        let dir = self.presets_dir();
        if dir.is_dir() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                let is_json = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("json"));
                if !is_json {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }

        names.extend(self.read_legacy().into_keys());
        names.sort_by_key(|n| n.to_lowercase());
        names.dedup();
        Ok(names)
    }

    pub fn save(&self, name: &str, rules: &RuleSet) -> Result<()> {
        let name = validate_name(name)?;
        fs::create_dir_all(self.presets_dir())?;

        let json = serde_json::to_string_pretty(rules)?;
        fs::write(self.preset_path(name), json)?;
        info!(preset = name, "preset saved");
        Ok(())
    }

    /// Load a preset. Rows past the per-target limit are dropped.
    pub fn load(&self, name: &str) -> Result<RuleSet> {
        let name = validate_name(name)?;
        let path = self.preset_path(name);

        let mut rules = if path.is_file() {
            serde_json::from_str::<RuleSet>(&fs::read_to_string(&path)?)?
        } else {
            self.read_legacy()
                .remove(name)
                .ok_or_else(|| Error::PresetNotFound(name.to_string()))?
        };

        let dropped = rules.truncate();
        if dropped > 0 {
            warn!(preset = name, dropped, max = MAX_RULES_PER_TARGET, "preset had too many rules");
        }
        Ok(rules)
    }

    /// Load `name`, or the built-in rules when it is unset or unreadable.
    pub fn load_or_builtin(&self, name: Option<&str>) -> RuleSet {
        let Some(name) = name else {
            return RuleSet::builtin();
        };
        match self.load(name) {
            Ok(rules) => rules,
            Err(e) => {
                warn!(preset = name, error = %e, "falling back to built-in rules");
                RuleSet::builtin()
            }
        }
    }

    /// Delete from the presets folder, or from the legacy bundle.
    pub fn delete(&self, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        let path = self.preset_path(name);

        if path.is_file() {
            fs::remove_file(&path)?;
            info!(preset = name, "preset deleted");
            return Ok(());
        }

        let mut legacy = self.read_legacy();
        if legacy.remove(name).is_none() {
            return Err(Error::PresetNotFound(name.to_string()));
        }
        fs::write(self.legacy_path(), serde_json::to_string_pretty(&legacy)?)?;
        info!(preset = name, file = LEGACY_FILE, "preset deleted");
        Ok(())
    }

    /// Legacy bundle contents. Missing or unreadable means empty.
    fn read_legacy(&self) -> BTreeMap<String, RuleSet> {
        let path = self.legacy_path();
        let Ok(text) = fs::read_to_string(&path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&text) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable legacy presets");
                BTreeMap::new()
            }
        }
    }
}

/// Preset names become file names, so keep them to one plain path component.
fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    let bad = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.chars().any(|c| {
            matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
        });
    if bad {
        return Err(Error::InvalidPresetName(name.to_string()));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::{Operator, Rule};
    use crate::core::types::Field;

    fn sample() -> RuleSet {
        RuleSet {
            title: vec![Rule::new(Field::Title, Operator::IsNotEmpty, "", "{Title}!")],
            artist: vec![],
            album: vec![Rule::new(Field::Discnumber, Operator::Is, "1", "Vol 1").or()],
        }
    }

    #[test]
    fn save_list_load_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path());

        assert!(store.list().unwrap().is_empty());
        store.save("Mine", &sample()).unwrap();
        store.save("another", &RuleSet::builtin()).unwrap();

        assert_eq!(store.list().unwrap(), vec!["another", "Mine"]);
        assert_eq!(store.load("Mine").unwrap(), sample());

        store.delete("Mine").unwrap();
        assert!(matches!(store.load("Mine"), Err(Error::PresetNotFound(_))));
        assert!(matches!(store.delete("Mine"), Err(Error::PresetNotFound(_))));
    }

    #[test]
    fn rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        for name in ["", "  ", "../x", "a/b", "..", "c:d"] {
            assert!(
                matches!(store.save(name, &sample()), Err(Error::InvalidPresetName(_))),
                "{name:?}"
            );
        }
    }

    #[test]
    fn legacy_bundle_is_a_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = serde_json::json!({
            "Old": {
                "title": [{"logic": "AND", "if_field": "Title", "if_operator": "is not empty",
                           "if_value": "", "then_template": "{Title}"}],
                "artist": [],
                "album": []
            }
        });
        fs::write(dir.path().join(LEGACY_FILE), legacy.to_string()).unwrap();

        let store = PresetStore::new(dir.path());
        assert_eq!(store.list().unwrap(), vec!["Old"]);
        assert_eq!(store.load("Old").unwrap().title.len(), 1);

        store.delete("Old").unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn oversized_presets_are_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        let big = RuleSet {
            artist: vec![Rule::new(Field::Artist, Operator::IsEmpty, "", "x"); 60],
            ..Default::default()
        };
        store.save("big", &big).unwrap();
        assert_eq!(store.load("big").unwrap().artist.len(), MAX_RULES_PER_TARGET);
    }

    #[test]
    fn missing_preset_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::new(dir.path());
        assert_eq!(store.load_or_builtin(Some("gone")), RuleSet::builtin());
        assert_eq!(store.load_or_builtin(None), RuleSet::builtin());
    }
}
