//! Candidate videos in the input directory.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::FrameGrabError;

/// Default directory scanned for videos.
pub const DEFAULT_VIDEO_DIR: &str = "video";

/// Regular files directly inside `dir`, sorted by path.
///
/// Hidden entries are skipped. A directory that does not exist yields an
/// empty list rather than an error.
///
/// # Errors
///
/// Returns [`FrameGrabError::CatalogPattern`] if `dir` cannot be turned into
/// a glob pattern.
pub fn list_videos<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, FrameGrabError> {
    let dir = dir.as_ref();
    let escaped = Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join("*");

    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let entries = glob::glob_with(&pattern.to_string_lossy(), options)
        .map_err(|error| FrameGrabError::CatalogPattern(error.to_string()))?;

    let mut videos: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(error) => {
                log::debug!("Skipping unreadable entry: {error}");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    videos.sort();

    log::debug!("Found {} candidate video(s) in {}", videos.len(), dir.display());
    Ok(videos)
}

/// File name shown for `path` in the selection menu.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
