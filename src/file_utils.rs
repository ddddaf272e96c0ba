use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::errors::AppError;
use crate::timecode;

// @module: File and stream utilities

/// Iterate over the lines of `reader`, keeping each line's terminator.
///
/// A final line without a terminator is still yielded.
pub fn raw_lines<R: BufRead>(mut reader: R) -> impl Iterator<Item = io::Result<String>> {
    std::iter::from_fn(move || {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(e) => Some(Err(e)),
        }
    })
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @opens: Buffered reader over a subtitle or line source
    pub fn open_reader<P: AsRef<Path>>(path: P) -> Result<BufReader<File>, AppError> {
        let path = path.as_ref();
        File::open(path)
            .map(BufReader::new)
            .map_err(|e| AppError::unavailable(path, e))
    }

    /// Read every line of a text source with terminators removed
    pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, AppError> {
        let path = path.as_ref();
        let reader = Self::open_reader(path)?;
        Self::lines_from_reader(reader).map_err(|e| AppError::unavailable(path, e))
    }

    /// Same as `read_lines`, over any reader
    pub fn lines_from_reader<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
        raw_lines(reader)
            .map(|line| line.map(|l| timecode::strip_terminator(&l).to_string()))
            .collect()
    }

    /// Write a string to a file, creating parent directories as needed
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<(), AppError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AppError::unavailable(parent, e))?;
        }

        let mut file = File::create(path).map_err(|e| AppError::unavailable(path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| AppError::unavailable(path, e))
    }
}
