//! core/search.rs
//!
//! Search box queries.
//!
//! A query is whitespace-separated tokens, all of which must match:
//! - `field<op>value` with a known field name is a clause
//!   (`artist=Neuro`, `track>=3`, `title~love`, `version=latest`)
//! - anything else is a free-text term matched against every column
//!
//! Double quotes group spaces: `artist="Evil Neuro"`, `"two words"`.

use std::cmp::Ordering;
use std::fmt;

use super::types::{Field, SongRecord};
use super::versions::{VersionIndex, VersionKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Contains,
}

impl CompareOp {
    /// Longest operators first so `>=` is not read as `>`.
    const SYMBOLS: [(&'static str, CompareOp); 7] = [
        ("!=", CompareOp::Ne),
        (">=", CompareOp::Ge),
        ("<=", CompareOp::Le),
        ("=", CompareOp::Eq),
        (">", CompareOp::Gt),
        ("<", CompareOp::Lt),
        ("~", CompareOp::Contains),
    ];

    fn symbol(self) -> &'static str {
        Self::SYMBOLS
            .iter()
            .find(|(_, op)| *op == self)
            .map(|(s, _)| *s)
            .unwrap_or("=")
    }

    fn holds(self, ord: Ordering) -> bool {
        match self {
            CompareOp::Eq => ord == Ordering::Equal,
            CompareOp::Ne => ord != Ordering::Equal,
            CompareOp::Gt => ord == Ordering::Greater,
            CompareOp::Ge => ord != Ordering::Less,
            CompareOp::Lt => ord == Ordering::Less,
            CompareOp::Le => ord != Ordering::Greater,
            CompareOp::Contains => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Compare {
        field: Field,
        op: CompareOp,
        value: String,
    },
    /// `version=latest` (or `!=` when `negate`).
    Latest { negate: bool },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub clauses: Vec<Clause>,
    /// Lowercased free-text terms.
    pub terms: Vec<String>,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.terms.is_empty()
    }

    pub fn matches(&self, song: &SongRecord, index: &VersionIndex) -> bool {
        self.clauses.iter().all(|c| clause_matches(c, song, index))
            && self.terms.iter().all(|t| term_matches(t, song))
    }

    /// One line for the status bar, e.g. `Artist = Neuro, latest version, "live"`.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        for clause in &self.clauses {
            parts.push(match clause {
                Clause::Compare { field, op, value } => {
                    format!("{} {} {}", field.label(), op.symbol(), value)
                }
                Clause::Latest { negate: false } => "latest version".to_string(),
                Clause::Latest { negate: true } => "not latest version".to_string(),
            });
        }
        for term in &self.terms {
            parts.push(format!("\"{term}\""));
        }
        if parts.is_empty() {
            f.write_str("no filter")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

pub fn parse_query(input: &str) -> Query {
    let mut query = Query::default();

    for (token, quoted) in tokenize(input) {
        let clause = if quoted { None } else { parse_clause(&token) };
        match clause {
            Some(c) => query.clauses.push(c),
            None => {
                if !token.is_empty() {
                    query.terms.push(token.to_lowercase());
                }
            }
        }
    }

    query
}

/// Indices of the songs that match, in list order.
pub fn filter(songs: &[SongRecord], query: &Query, index: &VersionIndex) -> Vec<usize> {
    songs
        .iter()
        .enumerate()
        .filter(|(_, s)| query.matches(s, index))
        .map(|(i, _)| i)
        .collect()
}

/// Split on whitespace, honouring double quotes anywhere in a token.
/// The flag is true when the token *started* with a quote (always a free term).
fn tokenize(input: &str) -> Vec<(String, bool)> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut started_quoted = false;
    let mut in_quotes = false;
    let mut in_token = false;

    for c in input.chars() {
        match c {
            '"' => {
                if !in_token {
                    started_quoted = true;
                    in_token = true;
                }
                in_quotes = !in_quotes;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push((std::mem::take(&mut current), started_quoted));
                    in_token = false;
                    started_quoted = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }
    if in_token {
        tokens.push((current, started_quoted));
    }

    tokens
}

fn parse_clause(token: &str) -> Option<Clause> {
    let pos = token.find(['=', '!', '<', '>', '~'])?;
    let field = Field::from_name(&token[..pos])?;
    let rest = &token[pos..];

    let (symbol, op) = CompareOp::SYMBOLS
        .iter()
        .find(|(s, _)| rest.starts_with(*s))?;
    let value = rest[symbol.len()..].trim().to_string();

    if field == Field::Version && value.eq_ignore_ascii_case("latest") {
        return match op {
            CompareOp::Eq => Some(Clause::Latest { negate: false }),
            CompareOp::Ne => Some(Clause::Latest { negate: true }),
            _ => None,
        };
    }

    Some(Clause::Compare {
        field,
        op: *op,
        value,
    })
}

fn clause_matches(clause: &Clause, song: &SongRecord, index: &VersionIndex) -> bool {
    match clause {
        Clause::Latest { negate } => index.is_latest(song) != *negate,
        Clause::Compare { field, op, value } => {
            let actual = song.get(*field);

            if *op == CompareOp::Contains {
                return actual.to_lowercase().contains(&value.to_lowercase());
            }

            let ord = if *field == Field::Version {
                VersionKey::of(song).cmp(&VersionKey::parse(value))
            } else {
                compare_values(&actual, value)
            };
            op.holds(ord)
        }
    }
}

/// Numeric when both sides are finite numbers, otherwise case-insensitive text.
fn compare_values(actual: &str, expected: &str) -> Ordering {
    match (actual.trim().parse::<f64>(), expected.trim().parse::<f64>()) {
        (Ok(a), Ok(b)) if a.is_finite() && b.is_finite() => a.total_cmp(&b),
        _ => actual.to_lowercase().cmp(&expected.to_lowercase()),
    }
}

fn term_matches(term: &str, song: &SongRecord) -> bool {
    Field::ALL
        .iter()
        .any(|f| song.get(*f).to_lowercase().contains(term))
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

    fn library() -> Vec<SongRecord> {
        vec![
            song("/m/one.mp3", json!({"Title": "Alpha", "Artist": "Neuro", "CoverArtist": "Neuro", "Version": 1, "Track": 2})),
            song("/m/two.mp3", json!({"Title": "Alpha", "Artist": "Neuro", "CoverArtist": "Neuro", "Version": 2, "Track": 10})),
            song("/m/three.mp3", json!({"Title": "Beta", "Artist": "Evil Neuro", "CoverArtist": "Evil", "Version": "1.5", "Track": 3})),
            song("/m/four live.mp3", json!({"Title": "Gamma", "Artist": "Other", "CoverArtist": "Neuro, Evil", "Track": 1})),
        ]
    }

    fn run(q: &str) -> Vec<usize> {
        let songs = library();
        let index = VersionIndex::build(&songs);
        filter(&songs, &parse_query(q), &index)
    }

    #[test]
    fn parses_clauses_and_terms() {
        let q = parse_query(r#"artist="Evil Neuro" track>=3 hello "two words" bogus=1"#);
        assert_eq!(
            q.clauses,
            vec![
                Clause::Compare { field: Field::Artist, op: CompareOp::Eq, value: "Evil Neuro".into() },
                Clause::Compare { field: Field::Track, op: CompareOp::Ge, value: "3".into() },
            ]
        );
        assert_eq!(q.terms, vec!["hello", "two words", "bogus=1"]);
    }

    #[test]
    fn version_latest_selects_group_maximum() {
        // one.mp3 is superseded by two.mp3; the rest are alone in their groups.
        assert_eq!(run("version=latest"), vec![1, 2, 3]);
        assert_eq!(run("version!=latest"), vec![0]);
    }

    #[test]
    fn version_latest_compares_raw_version_strings() {
        let songs = vec![
            song("/m/a.mp3", json!({"Title": "S", "Version": "2.9"})),
            song("/m/b.mp3", json!({"Title": "S", "Version": "2.10"})),
        ];
        let index = VersionIndex::build(&songs);
        assert_eq!(filter(&songs, &parse_query("version=latest"), &index), vec![1]);
        assert_eq!(filter(&songs, &parse_query("version>2.9"), &index), vec![1]);
    }

    #[test]
    fn numeric_and_text_comparisons() {
        assert_eq!(run("track>=3"), vec![1, 2]);
        assert_eq!(run("track<3"), vec![0, 3]);
        assert_eq!(run("artist=neuro"), vec![0, 1]);
        assert_eq!(run("cover~evil"), vec![2, 3]);
        assert_eq!(run("version>1"), vec![1, 2]);
    }

    #[test]
    fn nan_and_inf_compare_as_text() {
        let songs = vec![
            song("/m/a.mp3", json!({"Title": "NaN"})),
            song("/m/b.mp3", json!({"Title": "inf"})),
            song("/m/c.mp3", json!({"Title": "5"})),
        ];
        let index = VersionIndex::build(&songs);
        assert_eq!(filter(&songs, &parse_query("title=5"), &index), vec![2]);
        assert_eq!(filter(&songs, &parse_query("title=nan"), &index), vec![0]);
    }

    #[test]
    fn terms_and_clauses_are_anded() {
        assert_eq!(run("alpha track>5"), vec![1]);
        assert_eq!(run("live"), vec![3]);
        assert_eq!(run("alpha beta"), Vec::<usize>::new());
        assert_eq!(run(""), vec![0, 1, 2, 3]);
    }

    #[test]
    fn summary_reads_back_the_query() {
        assert_eq!(parse_query("").summary(), "no filter");
        assert_eq!(
            parse_query("disc=2 version=latest foo").summary(),
            "Disc = 2, latest version, \"foo\""
        );
    }
}
