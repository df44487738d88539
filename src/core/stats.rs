//! core/stats.rs
//!
//! Song counts for the statistics panel.
//!
//! Categories come from CoverArtist: exactly one configured solo artist is a
//! solo, two or more of them is a duet, anything else is "other".
//! "Unique" counts distinct (Title, Artist) pairs within a category.

use std::collections::HashSet;

use super::types::{Field, SongRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Index into the solo artist list.
    Solo(usize),
    Duet,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub unique: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub all_songs: usize,
    /// Distinct (Title, Artist).
    pub unique_ta: usize,
    /// Distinct (Title, Artist, CoverArtist).
    pub unique_tac: usize,
    pub solos: Vec<CategoryCount>,
    pub duets: CategoryCount,
    pub other: CategoryCount,
}

impl Statistics {
    /// Short form for the status bar.
    pub fn headline(&self) -> String {
        format!("All songs: {} | Unique (T,A): {}", self.all_songs, self.unique_ta)
    }
}

pub fn classify(cover_artist: &str, solo_artists: &[String]) -> Category {
    let cover = cover_artist.trim();
    if let Some(i) = solo_artists
        .iter()
        .position(|s| s.trim().eq_ignore_ascii_case(cover))
    {
        return Category::Solo(i);
    }

    let normalised = cover.replace(" and ", "&").replace(" x ", "&");
    let parts: Vec<&str> = normalised
        .split([',', '&', '/', '+', ';'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let named = solo_artists
        .iter()
        .filter(|s| parts.iter().any(|p| p.eq_ignore_ascii_case(s.trim())))
        .count();

    if named >= 2 { Category::Duet } else { Category::Other }
}

/// Statistics over the given (usually the visible) songs.
pub fn compute<'a, I>(songs: I, solo_artists: &[String]) -> Statistics
where
    I: IntoIterator<Item = &'a SongRecord>,
{
    let mut stats = Statistics {
        solos: solo_artists
            .iter()
            .map(|name| CategoryCount {
                name: format!("{name} solos"),
                ..Default::default()
            })
            .collect(),
        duets: CategoryCount {
            name: "Duets".to_string(),
            ..Default::default()
        },
        other: CategoryCount {
            name: "Other".to_string(),
            ..Default::default()
        },
        ..Default::default()
    };

    let mut ta: HashSet<(String, String)> = HashSet::new();
    let mut tac: HashSet<(String, String, String)> = HashSet::new();
    let mut per_category: Vec<HashSet<(String, String)>> = vec![HashSet::new(); solo_artists.len() + 2];
    let duet_slot = solo_artists.len();
    let other_slot = duet_slot + 1;

    for song in songs {
        stats.all_songs += 1;

        let title = song.get(Field::Title);
        let artist = song.get(Field::Artist);
        let cover = song.get(Field::CoverArtist);

        let slot = match classify(&cover, solo_artists) {
            Category::Solo(i) => i,
            Category::Duet => duet_slot,
            Category::Other => other_slot,
        };
        per_category[slot].insert((title.clone(), artist.clone()));
        match slot {
            s if s == duet_slot => stats.duets.total += 1,
            s if s == other_slot => stats.other.total += 1,
            s => stats.solos[s].total += 1,
        }

        ta.insert((title.clone(), artist.clone()));
        tac.insert((title, artist, cover));
    }

    stats.unique_ta = ta.len();
    stats.unique_tac = tac.len();
    for (i, solo) in stats.solos.iter_mut().enumerate() {
        solo.unique = per_category[i].len();
    }
    stats.duets.unique = per_category[duet_slot].len();
    stats.other.unique = per_category[other_slot].len();

    stats
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

    fn solos() -> Vec<String> {
        vec!["Neuro".to_string(), "Evil".to_string()]
    }

    #[test]
    fn classification() {
        let s = solos();
        assert_eq!(classify("Neuro", &s), Category::Solo(0));
        assert_eq!(classify(" evil ", &s), Category::Solo(1));
        assert_eq!(classify("Neuro, Evil", &s), Category::Duet);
        assert_eq!(classify("Evil & Neuro", &s), Category::Duet);
        assert_eq!(classify("Neuro and Evil", &s), Category::Duet);
        assert_eq!(classify("Neuro, Vedal", &s), Category::Other);
        assert_eq!(classify("", &s), Category::Other);
    }

    #[test]
    fn counts_totals_and_uniques() {
        let songs = vec![
            song("1.mp3", json!({"Title": "A", "Artist": "X", "CoverArtist": "Neuro", "Version": 1})),
            song("2.mp3", json!({"Title": "A", "Artist": "X", "CoverArtist": "Neuro", "Version": 2})),
            song("3.mp3", json!({"Title": "A", "Artist": "X", "CoverArtist": "Evil"})),
            song("4.mp3", json!({"Title": "B", "Artist": "Y", "CoverArtist": "Neuro & Evil"})),
            song("5.mp3", json!({"Title": "C", "Artist": "Z"})),
        ];
        let stats = compute(&songs, &solos());

        assert_eq!(stats.all_songs, 5);
        assert_eq!(stats.unique_ta, 3);
        assert_eq!(stats.unique_tac, 4);
        assert_eq!((stats.solos[0].unique, stats.solos[0].total), (1, 2));
        assert_eq!((stats.solos[1].unique, stats.solos[1].total), (1, 1));
        assert_eq!((stats.duets.unique, stats.duets.total), (1, 1));
        assert_eq!((stats.other.unique, stats.other.total), (1, 1));
        assert_eq!(stats.solos[0].name, "Neuro solos");
        assert_eq!(stats.headline(), "All songs: 5 | Unique (T,A): 3");
    }

    #[test]
    fn empty_list() {
        let stats = compute(std::iter::empty::<&SongRecord>(), &solos());
        assert_eq!(stats.all_songs, 0);
        assert_eq!(stats.solos.len(), 2);
    }
}
