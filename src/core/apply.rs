//! core/apply.rs
//!
//! Render the rule set for many songs and write the resulting ID3 frames.
//! One bad file never stops the batch; failures are collected in the report.

use tracing::{info, warn};

use super::rules::RuleSet;
use super::tags::{TagUpdate, write_tags};
use super::types::SongRecord;
use super::versions::VersionIndex;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub written: usize,
    pub skipped: usize,
    /// "<file>: <reason>" per failed or skipped file.
    pub errors: Vec<String>,
}

impl ApplyReport {
    pub fn summary(&self) -> String {
        let mut s = format!("Applied to {} file(s)", self.written);
        if self.skipped > 0 {
            s.push_str(&format!(", skipped {}", self.skipped));
        }
        if !self.errors.is_empty() {
            s.push_str(&format!(", {} problem(s)", self.errors.len()));
        }
        s
    }
}

pub fn apply_rules_to<'a, I>(songs: I, rules: &RuleSet, index: &VersionIndex) -> ApplyReport
where
    I: IntoIterator<Item = &'a SongRecord>,
{
    let mut report = ApplyReport::default();

    for song in songs {
        if !song.has_metadata() {
            report.skipped += 1;
            report.errors.push(format!("{}: no metadata", song.file_name()));
            continue;
        }

        let update: TagUpdate = rules.render(song, index);
        if update.is_empty() {
            report.skipped += 1;
            continue;
        }

        match write_tags(&song.path, &update) {
            Ok(()) => report.written += 1,
            Err(e) => {
                warn!(path = %song.path.display(), error = %e, "failed to write tags");
                report.errors.push(format!("{}: {e}", song.file_name()));
            }
        }
    }

    info!(
        written = report.written,
        skipped = report.skipped,
        errors = report.errors.len(),
        "rules applied"
    );
    report
}
