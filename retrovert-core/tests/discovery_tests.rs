// retrovert-core/tests/discovery_tests.rs

use retrovert_core::config::CoreConfig;
use retrovert_core::discovery::find_video_files;
use std::fs::{self, File};
use std::path::PathBuf;
use tempfile::tempdir;

fn test_config(output_dir: PathBuf) -> CoreConfig {
    CoreConfig::new(output_dir)
}

#[test]
fn finds_recognized_extensions_case_insensitively() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    File::create(input_dir.join("movie1.mp4"))?;
    File::create(input_dir.join("movie2.MKV"))?;
    File::create(input_dir.join("movie3.Avi"))?;
    File::create(input_dir.join("notes.txt"))?;
    File::create(input_dir.join("cover.jpg"))?;
    File::create(input_dir.join("noextension"))?;

    let config = test_config(input_dir.join("out"));
    let mut files = find_video_files(&config, &[input_dir.to_path_buf()]);
    files.sort();

    assert_eq!(files.len(), 3);
    assert_eq!(files[0].file_name().unwrap(), "movie1.mp4");
    assert_eq!(files[1].file_name().unwrap(), "movie2.MKV");
    assert_eq!(files[2].file_name().unwrap(), "movie3.Avi");

    dir.close()?;
    Ok(())
}

#[test]
fn recurses_into_subdirectories() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    fs::create_dir_all(input_dir.join("season1").join("extras"))?;
    File::create(input_dir.join("top.mkv"))?;
    File::create(input_dir.join("season1").join("ep1.mp4"))?;
    File::create(input_dir.join("season1").join("extras").join("blooper.mov"))?;
    File::create(input_dir.join("season1").join("cover.png"))?;

    let config = test_config(input_dir.join("out"));
    let files = find_video_files(&config, &[input_dir.to_path_buf()]);

    assert_eq!(files.len(), 3);

    dir.close()?;
    Ok(())
}

#[test]
fn file_arguments_are_filtered_by_extension() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let video = dir.path().join("movie.flv");
    let text = dir.path().join("readme.txt");
    File::create(&video)?;
    File::create(&text)?;

    let config = test_config(dir.path().join("out"));
    let files = find_video_files(&config, &[video.clone(), text]);

    assert_eq!(files, vec![video]);

    dir.close()?;
    Ok(())
}

#[test]
fn duplicates_from_overlapping_roots_are_kept() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let video = dir.path().join("movie.wmv");
    File::create(&video)?;

    let config = test_config(dir.path().join("out"));
    let files = find_video_files(&config, &[dir.path().to_path_buf(), video.clone()]);

    assert_eq!(files.len(), 2);
    assert_eq!(files[0], video);
    assert_eq!(files[1], video);

    dir.close()?;
    Ok(())
}

#[test]
fn nonexistent_paths_are_skipped() {
    let config = test_config(PathBuf::from("out"));
    let files = find_video_files(
        &config,
        &[PathBuf::from("surely_this_does_not_exist_42_integration")],
    );
    assert!(files.is_empty());
}
