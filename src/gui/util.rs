//! Small pure helpers used by the GUI.
//! - no UI widgets or state mutation

use std::path::Path;

/// Path shown in the list: relative to the loaded folder when possible.
pub(crate) fn display_path(path: &Path, root: Option<&Path>) -> String {
    root.and_then(|r| path.strip_prefix(r).ok())
        .unwrap_or(path)
        .display()
        .to_string()
}

/// "Neuro, Evil" -> ["Neuro", "Evil"]
pub(crate) fn parse_name_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

/// Clamp a step through a list of `len` items.
pub(crate) fn step_index(pos: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (pos, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(p), true) => (p + 1).min(len - 1),
        (Some(p), false) => p.saturating_sub(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn relative_display() {
        let root = PathBuf::from("/music");
        let p = PathBuf::from("/music/disc1/a.mp3");
        assert_eq!(display_path(&p, Some(&root)), PathBuf::from("disc1/a.mp3").display().to_string());
        assert_eq!(display_path(&p, None), p.display().to_string());
    }

    #[test]
    fn name_lists_and_steps() {
        assert_eq!(parse_name_list(" Neuro , ,Evil"), vec!["Neuro", "Evil"]);
        assert_eq!(step_index(None, 3, true), Some(0));
        assert_eq!(step_index(Some(2), 3, true), Some(2));
        assert_eq!(step_index(Some(0), 3, false), Some(0));
        assert_eq!(step_index(None, 3, false), Some(2));
        assert_eq!(step_index(Some(1), 0, true), None);
    }
}
