//! core/rules.rs
//!
//! Conditional formatting rules: "if <field> <op> <value> then <template>".
//!
//! Rows are grouped into blocks: the first row opens a block, every later row
//! either joins the current block (`AND`) or opens a new one (`OR`).
//! Blocks are tried in order; the first block whose rows all match and whose
//! template renders to something non-blank wins.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tags::TagUpdate;
use super::types::{Field, SongRecord};
use super::versions::VersionIndex;

pub const MAX_RULES_PER_TARGET: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Logic {
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    #[serde(rename = "OR", alias = "or")]
    Or,
}

impl Logic {
    pub const ALL: [Logic; 2] = [Logic::And, Logic::Or];
}

impl std::fmt::Display for Logic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[default]
    #[serde(rename = "is")]
    Is,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "starts with")]
    StartsWith,
    #[serde(rename = "ends with")]
    EndsWith,
    #[serde(rename = "is empty")]
    IsEmpty,
    #[serde(rename = "is not empty")]
    IsNotEmpty,
    #[serde(rename = "is latest version")]
    IsLatestVersion,
    #[serde(rename = "is not latest version")]
    IsNotLatestVersion,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Is,
        Operator::Contains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::IsEmpty,
        Operator::IsNotEmpty,
        Operator::IsLatestVersion,
        Operator::IsNotLatestVersion,
    ];

    /// Operators that ignore the comparison value.
    pub fn is_unary(self) -> bool {
        matches!(
            self,
            Operator::IsEmpty
                | Operator::IsNotEmpty
                | Operator::IsLatestVersion
                | Operator::IsNotLatestVersion
        )
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Operator::Is => "is",
            Operator::Contains => "contains",
            Operator::StartsWith => "starts with",
            Operator::EndsWith => "ends with",
            Operator::IsEmpty => "is empty",
            Operator::IsNotEmpty => "is not empty",
            Operator::IsLatestVersion => "is latest version",
            Operator::IsNotLatestVersion => "is not latest version",
        })
    }
}

/// One rule row, in the shape presets store it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub logic: Logic,
    #[serde(rename = "if_field")]
    pub field: Field,
    #[serde(rename = "if_operator")]
    pub operator: Operator,
    #[serde(rename = "if_value", default)]
    pub value: String,
    #[serde(rename = "then_template", default)]
    pub template: String,
}

impl Rule {
    pub fn new(field: Field, operator: Operator, value: &str, template: &str) -> Self {
        Self {
            logic: Logic::And,
            field,
            operator,
            value: value.to_string(),
            template: template.to_string(),
        }
    }

    pub fn or(mut self) -> Self {
        self.logic = Logic::Or;
        self
    }

    /// Does this single row hold for `record`?
    pub fn matches(&self, record: &SongRecord, index: &VersionIndex) -> bool {
        let actual = record.get(self.field);
        let expected = self.value.as_str();

        match self.operator {
            Operator::Is => actual == expected,
            Operator::Contains => actual.contains(expected),
            Operator::StartsWith => actual.starts_with(expected),
            Operator::EndsWith => actual.ends_with(expected),
            Operator::IsEmpty => actual.is_empty(),
            Operator::IsNotEmpty => !actual.is_empty(),
            Operator::IsLatestVersion => index.is_latest(record),
            Operator::IsNotLatestVersion => !index.is_latest(record),
        }
    }
}

/// Which output tag a rule list produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleTarget {
    Title,
    Artist,
    Album,
}

impl RuleTarget {
    pub const ALL: [RuleTarget; 3] = [RuleTarget::Title, RuleTarget::Artist, RuleTarget::Album];

    /// Template a freshly added row starts with.
    pub fn default_template(self) -> &'static str {
        match self {
            RuleTarget::Title => "{CoverArtist} - {Title}",
            RuleTarget::Artist => "{CoverArtist}",
            RuleTarget::Album => "Archive VOL {Discnumber}",
        }
    }
}

impl std::fmt::Display for RuleTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RuleTarget::Title => "Title",
            RuleTarget::Artist => "Artist",
            RuleTarget::Album => "Album",
        })
    }
}

/// Split rows into AND-blocks. An `OR` row opens a new block.
/// The first row's own logic is ignored.
pub fn group_blocks(rules: &[Rule]) -> Vec<&[Rule]> {
    let mut blocks = Vec::new();
    let mut start = 0;

    for (i, rule) in rules.iter().enumerate().skip(1) {
        if rule.logic == Logic::Or {
            blocks.push(&rules[start..i]);
            start = i;
        }
    }
    if start < rules.len() {
        blocks.push(&rules[start..]);
    }
    blocks
}

/// First matching block wins. `None` means nothing matched and the
/// target should be left as it is.
pub fn apply_rules(rules: &[Rule], record: &SongRecord, index: &VersionIndex) -> Option<String> {
    for block in group_blocks(rules) {
        if !block.iter().all(|r| r.matches(record, index)) {
            continue;
        }
        let Some(last) = block.last() else { continue };
        let rendered = render_template(&last.template, record);
        if !rendered.trim().is_empty() {
            return Some(rendered);
        }
    }
    None
}

/// Replace `{Key}` placeholders with the record's values.
///
/// Known fields resolve through [`SongRecord::get`] (so `{Title}` gets the
/// file-stem fallback); other keys come straight from the JSON blob.
/// Unknown placeholders and stray braces stay as written.
pub fn render_template(template: &str, record: &SongRecord) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = &after[..close];
        // "{a{b}" -> keep "{a" and try again from the inner brace
        if key.contains('{') {
            let inner = key.rfind('{').map_or(0, |i| i + 1);
            out.push_str(&rest[open..open + inner]);
            rest = &rest[open + inner..];
            continue;
        }

        match resolve(key, record) {
            Some(v) => out.push_str(&v),
            None => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

fn resolve(key: &str, record: &SongRecord) -> Option<String> {
    let known = Field::METADATA
        .iter()
        .copied()
        .find(|f| f.json_key() == Some(key));

    match known {
        Some(field) => Some(record.get(field)),
        None => record.raw(key),
    }
}

/// Rules for the three output tags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub title: Vec<Rule>,
    #[serde(default)]
    pub artist: Vec<Rule>,
    #[serde(default)]
    pub album: Vec<Rule>,
}

impl RuleSet {
    /// What a fresh install starts with.
    pub fn builtin() -> Self {
        Self {
            title: vec![
                Rule::new(Field::Version, Operator::IsLatestVersion, "", "{Title}"),
                Rule::new(Field::Version, Operator::IsNotLatestVersion, "", "{Title} (v{Version})").or(),
            ],
            artist: vec![
                Rule::new(Field::CoverArtist, Operator::IsNotEmpty, "", "{CoverArtist}"),
                Rule::new(Field::Artist, Operator::IsNotEmpty, "", "{Artist}").or(),
            ],
            album: vec![Rule::new(
                Field::Discnumber,
                Operator::IsNotEmpty,
                "",
                "Archive VOL {Discnumber}",
            )],
        }
    }

    pub fn rules(&self, target: RuleTarget) -> &[Rule] {
        match target {
            RuleTarget::Title => &self.title,
            RuleTarget::Artist => &self.artist,
            RuleTarget::Album => &self.album,
        }
    }

    pub fn rules_mut(&mut self, target: RuleTarget) -> &mut Vec<Rule> {
        match target {
            RuleTarget::Title => &mut self.title,
            RuleTarget::Artist => &mut self.artist,
            RuleTarget::Album => &mut self.album,
        }
    }

    /// Drop rows past the per-target limit. Returns how many were dropped.
    pub fn truncate(&mut self) -> usize {
        let mut dropped = 0;
        for target in RuleTarget::ALL {
            let list = self.rules_mut(target);
            if list.len() > MAX_RULES_PER_TARGET {
                dropped += list.len() - MAX_RULES_PER_TARGET;
                list.truncate(MAX_RULES_PER_TARGET);
            }
        }
        dropped
    }

    /// Tag values this rule set produces for one song.
    ///
    /// Title/Artist/Album come from the rules; Track/Disc/Date are copied
    /// from the JSON blob when present.
    pub fn render(&self, record: &SongRecord, index: &VersionIndex) -> TagUpdate {
        let copied = |field: Field| {
            let v = record.get(field);
            (!v.trim().is_empty()).then_some(v)
        };

        let update = TagUpdate {
            title: apply_rules(&self.title, record, index),
            artist: apply_rules(&self.artist, record, index),
            album: apply_rules(&self.album, record, index),
            track: copied(Field::Track),
            disc: copied(Field::Discnumber),
            date: copied(Field::Date),
        };
        debug!(path = %record.path.display(), ?update, "rules rendered");
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::path::PathBuf;

    fn song(path: &str, v: Value) -> SongRecord {
        let mut r = SongRecord::new(PathBuf::from(path));
        if let Value::Object(map) = v {
            r.metadata = map;
        }
        r
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = vec![
            Rule::new(Field::Artist, Operator::Is, "Neuro", "first"),
            Rule::new(Field::Artist, Operator::Contains, "eur", "second").or(),
        ];
        let r = song("a.mp3", json!({ "Artist": "Neuro" }));
        let idx = VersionIndex::build(std::slice::from_ref(&r));
        assert_eq!(apply_rules(&rules, &r, &idx).as_deref(), Some("first"));

        let r = song("a.mp3", json!({ "Artist": "Neuron" }));
        assert_eq!(apply_rules(&rules, &r, &idx).as_deref(), Some("second"));
    }

    #[test]
    fn and_rows_form_one_block() {
        let rules = vec![
            Rule::new(Field::Artist, Operator::Is, "Neuro", "unused"),
            Rule::new(Field::CoverArtist, Operator::Is, "Evil", "both"),
            Rule::new(Field::Title, Operator::IsNotEmpty, "", "fallback").or(),
        ];
        let idx = VersionIndex::default();

        let both = song("a.mp3", json!({ "Title": "T", "Artist": "Neuro", "CoverArtist": "Evil" }));
        assert_eq!(apply_rules(&rules, &both, &idx).as_deref(), Some("both"));

        let one = song("a.mp3", json!({ "Title": "T", "Artist": "Neuro", "CoverArtist": "Neuro" }));
        assert_eq!(apply_rules(&rules, &one, &idx).as_deref(), Some("fallback"));
    }

    #[test]
    fn blank_render_falls_through() {
        let rules = vec![
            Rule::new(Field::Title, Operator::IsNotEmpty, "", "{Special}"),
            Rule::new(Field::Title, Operator::IsNotEmpty, "", "{Title}!").or(),
        ];
        let r = song("a.mp3", json!({ "Title": "Song" }));
        let out = apply_rules(&rules, &r, &VersionIndex::default());
        assert_eq!(out.as_deref(), Some("Song!"));
    }

    #[test]
    fn no_match_leaves_target_alone() {
        let rules = vec![Rule::new(Field::Artist, Operator::Is, "x", "y")];
        let r = song("a.mp3", json!({ "Artist": "z" }));
        assert_eq!(apply_rules(&rules, &r, &VersionIndex::default()), None);
        assert_eq!(apply_rules(&[], &r, &VersionIndex::default()), None);
    }

    #[test]
    fn latest_version_operator_uses_index() {
        let old = song("old.mp3", json!({ "Title": "S", "Artist": "A", "Version": 1 }));
        let new = song("new.mp3", json!({ "Title": "S", "Artist": "A", "Version": 2 }));
        let idx = VersionIndex::build(&[old.clone(), new.clone()]);

        let rules = vec![
            Rule::new(Field::Version, Operator::IsLatestVersion, "", "latest"),
            Rule::new(Field::Version, Operator::IsNotLatestVersion, "", "old v{Version}").or(),
        ];
        assert_eq!(apply_rules(&rules, &new, &idx).as_deref(), Some("latest"));
        assert_eq!(apply_rules(&rules, &old, &idx).as_deref(), Some("old v1"));
    }

    #[test]
    fn template_placeholders() {
        let r = song("/m/Stem.mp3", json!({ "Artist": "A", "Extra": 5, "Version": 2.0 }));
        assert_eq!(render_template("{Title} by {Artist}", &r), "Stem by A");
        assert_eq!(render_template("{Extra}/{Version}", &r), "5/2");
        assert_eq!(render_template("{Nope} {Artist", &r), "{Nope} {Artist");
        assert_eq!(render_template("{{Artist}}", &r), "{A}");
        assert_eq!(render_template("", &r), "");
    }

    #[test]
    fn grouping_ignores_first_logic() {
        let rules = vec![
            Rule::new(Field::Title, Operator::IsEmpty, "", "a").or(),
            Rule::new(Field::Title, Operator::IsEmpty, "", "b"),
            Rule::new(Field::Title, Operator::IsEmpty, "", "c").or(),
        ];
        let blocks = group_blocks(&rules);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].len(), 2);
        assert_eq!(blocks[1][0].template, "c");
    }

    #[test]
    fn rule_json_shape() {
        let json = r#"{"logic":"OR","if_field":"CoverArtist","if_operator":"starts with","if_value":"Ev","then_template":"{CoverArtist}"}"#;
        let rule: Rule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.logic, Logic::Or);
        assert_eq!(rule.field, Field::CoverArtist);
        assert_eq!(rule.operator, Operator::StartsWith);

        let back = serde_json::to_value(&rule).unwrap();
        assert_eq!(back["if_operator"], "starts with");
        assert_eq!(back["then_template"], "{CoverArtist}");
    }

    #[test]
    fn render_copies_numbering_fields() {
        let r = song(
            "a.mp3",
            json!({ "Title": "S", "CoverArtist": "Evil", "Discnumber": 3, "Track": "07", "Date": "2024-01-01" }),
        );
        let idx = VersionIndex::build(std::slice::from_ref(&r));
        let update = RuleSet::builtin().render(&r, &idx);

        assert_eq!(update.title.as_deref(), Some("S"));
        assert_eq!(update.artist.as_deref(), Some("Evil"));
        assert_eq!(update.album.as_deref(), Some("Archive VOL 3"));
        assert_eq!(update.track.as_deref(), Some("07"));
        assert_eq!(update.disc.as_deref(), Some("3"));
        assert_eq!(update.date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn truncate_caps_each_target() {
        let mut set = RuleSet {
            title: vec![Rule::new(Field::Title, Operator::Is, "", ""); MAX_RULES_PER_TARGET + 3],
            ..Default::default()
        };
        assert_eq!(set.truncate(), 3);
        assert_eq!(set.title.len(), MAX_RULES_PER_TARGET);
    }
}
