// retrovert-core/tests/output_path_tests.rs

use retrovert_core::output_path::reserve_output_path;
use std::fs::File;
use tempfile::tempdir;

#[test]
fn first_allocation_uses_plain_suffix() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = reserve_output_path(dir.path(), "foo", "mpg")?;
    assert_eq!(path, dir.path().join("foo_converted.mpg"));
    Ok(())
}

#[test]
fn existing_output_gets_counter_suffix() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("foo_converted.mpg"))?;

    let path = reserve_output_path(dir.path(), "foo", "mpg")?;
    assert_eq!(path, dir.path().join("foo_converted_1.mpg"));

    File::create(&path)?;
    let path = reserve_output_path(dir.path(), "foo", "mpg")?;
    assert_eq!(path, dir.path().join("foo_converted_2.mpg"));
    Ok(())
}

#[test]
fn allocated_path_never_exists_at_call_time() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for _ in 0..25 {
        let path = reserve_output_path(dir.path(), "movie", "mpg")?;
        assert!(!path.exists());
        File::create(&path)?;
    }
    Ok(())
}

#[test]
fn creates_missing_output_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let nested = dir.path().join("deeply").join("nested");
    let path = reserve_output_path(&nested, "foo", "mpg")?;
    assert!(nested.is_dir());
    assert_eq!(path, nested.join("foo_converted.mpg"));
    Ok(())
}
