//! Video directory listing tests.

use std::fs;

use framegrab::catalog;

#[test]
fn lists_regular_files_sorted() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let dir = temporary_directory.path();

    fs::write(dir.join("b_clip.mp4"), b"").unwrap();
    fs::write(dir.join("a_clip.mkv"), b"").unwrap();
    fs::write(dir.join(".hidden.mp4"), b"").unwrap();
    fs::create_dir(dir.join("nested")).unwrap();
    fs::write(dir.join("nested").join("deep.mp4"), b"").unwrap();

    let videos = framegrab::list_videos(dir).unwrap();
    let names: Vec<String> = videos
        .iter()
        .map(|path| catalog::display_name(path))
        .collect();

    assert_eq!(names, vec!["a_clip.mkv", "b_clip.mp4"]);
    assert!(videos.iter().all(|path| path.starts_with(dir)));
}

#[test]
fn missing_directory_is_empty() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let videos = framegrab::list_videos(temporary_directory.path().join("video")).unwrap();
    assert!(videos.is_empty());
}

#[test]
fn glob_characters_in_directory_name_are_literal() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let dir = temporary_directory.path().join("clips [2024]");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("holiday.mp4"), b"").unwrap();

    let videos = framegrab::list_videos(&dir).unwrap();
    assert_eq!(videos, vec![dir.join("holiday.mp4")]);
}
