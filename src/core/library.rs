use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use super::error::{Error, Result};

/// All `.mp3` files under `root`. Subfolders are walked only when asked.
///
/// Symlinked folders are not entered, so a link back up the tree can't loop.
/// Symlinks to files are kept.
pub fn scan_mp3s(root: &Path, include_subfolders: bool) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::FolderNotFound(root.to_path_buf()));
    }

    let depth = if include_subfolders { usize::MAX } else { 1 };
    let walker = WalkDir::new(root).follow_links(false).max_depth(depth);

    let mut out = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if !entry.file_type().is_dir() && path.is_file() && is_mp3(path) {
                    out.push(path.to_path_buf());
                }
            }
            Err(e) => warn!(error = %e, "skipping unreadable entry"),
        }
    }
    Ok(out)
}

pub fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}
