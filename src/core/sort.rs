//! core/sort.rs
//!
//! Multi-key song list sorting. Up to five (field, order) rules, first rule
//! is the primary key. The sort is stable, so equal songs keep list order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};
use super::types::{Field, SongRecord};
use super::versions::VersionKey;

pub const MAX_SORT_RULES: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "Asc",
            SortOrder::Desc => "Desc",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRule {
    pub field: Field,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortRule {
    pub fn asc(field: Field) -> Self {
        Self {
            field,
            order: SortOrder::Asc,
        }
    }

    #[cfg(test)]
    pub fn desc(field: Field) -> Self {
        Self {
            field,
            order: SortOrder::Desc,
        }
    }
}

/// Title ascending.
pub fn default_rules() -> Vec<SortRule> {
    vec![SortRule::asc(Field::Title)]
}

pub fn validate(rules: &[SortRule]) -> Result<()> {
    if rules.len() > MAX_SORT_RULES {
        return Err(Error::TooManySortRules { max: MAX_SORT_RULES });
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Int(i64),
    Version(VersionKey),
    Text(String),
}

fn sort_key(song: &SongRecord, field: Field) -> SortKey {
    let value = song.get(field);
    match field {
        Field::Discnumber | Field::Track | Field::Special => {
            SortKey::Int(value.trim().parse().unwrap_or(0))
        }
        Field::Version => SortKey::Version(VersionKey::of(song)),
        _ => SortKey::Text(value.to_lowercase()),
    }
}

/// Reorder `indices` (into `songs`) by `rules`. Keys are computed once per song.
pub fn sort_indices(songs: &[SongRecord], indices: &mut [usize], rules: &[SortRule]) {
    if rules.is_empty() || indices.len() < 2 {
        return;
    }

    let mut keyed: Vec<(usize, Vec<SortKey>)> = indices
        .iter()
        .map(|&i| (i, rules.iter().map(|r| sort_key(&songs[i], r.field)).collect()))
        .collect();

    keyed.sort_by(|(_, a), (_, b)| {
        for (rule, (ka, kb)) in rules.iter().zip(a.iter().zip(b.iter())) {
            let ord = match rule.order {
                SortOrder::Asc => ka.cmp(kb),
                SortOrder::Desc => kb.cmp(ka),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });

    for (slot, (i, _)) in indices.iter_mut().zip(keyed) {
        *slot = i;
    }
}
