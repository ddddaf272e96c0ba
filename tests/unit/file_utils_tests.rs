/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use srtalign::errors::AppError;
use srtalign::file_utils::FileManager;
use crate::common;

/// Test reading lines, including an unterminated last line
#[test]
fn test_read_lines_withUnterminatedTail_shouldKeepIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "lines.txt", "eins\r\nzwei\n\ndrei")?;
    let lines = FileManager::read_lines(&path)?;
    assert_eq!(lines, vec!["eins", "zwei", "", "drei"]);
    Ok(())
}

/// Test that a missing source is reported with its path
#[test]
fn test_read_lines_withMissingFile_shouldBeResourceUnavailable() {
    match FileManager::read_lines("missing/lines.txt") {
        Err(AppError::ResourceUnavailable { path, .. }) => {
            assert!(path.ends_with("lines.txt"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

/// Test writing into a directory that does not exist yet
#[test]
fn test_write_to_file_withNestedDir_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("ranges.txt");
    FileManager::write_to_file(&path, "00:00:01,000 --> 00:00:02,000 hi\n")?;
    assert_eq!(std::fs::read_to_string(&path)?, "00:00:01,000 --> 00:00:02,000 hi\n");
    Ok(())
}
