/*!
 * Common test utilities for the srtalign test suite
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

/// Route library logging to the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// German sample track with the usual index/timestamp/text/blank layout
pub const SAMPLE_SRT: &str = "1
00:28:40,100 --> 00:28:42,000
Wo ist Andreas?

2
00:28:42,500 --> 00:28:45,900
Ich weiß es nicht.
Frag Gudrun.

3
00:28:48,251 --> 00:28:50,620
Komm mal rüber.

4
00:28:51,000 --> 00:28:53,400
Wir müssen sofort los!
";

/// Transcript lines for the sample track; the blank line has nothing to match
pub const SAMPLE_LINES: &str = "Ich weiß es nicht, frag Gudrun.
Komm mal ruber!

Wir müssen sofort los.
";

/// Creates the sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_SRT)
}

/// Creates the sample line file for testing
pub fn create_test_lines(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_LINES)
}
