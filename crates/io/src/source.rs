//! Grid sources and the acquisition error taxonomy.
//!
//! Parsing a bad cell never fails; failing to obtain the grid at all
//! always does. That split is load-bearing for the whole tool: cell
//! garbage degrades to zeros inside the engine, while everything here
//! returns a `SourceError` the caller must surface.

use std::fmt;
use std::path::PathBuf;

use opsgrid_engine::Grid;

use crate::csv;

#[derive(Debug)]
pub enum SourceError {
    /// File open / read failure.
    Io(String),
    /// CSV structure error in fetched content.
    Csv(String),
    /// Network failure fetching a published sheet.
    Http(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "read error: {msg}"),
            Self::Csv(msg) => write!(f, "csv error: {msg}"),
            Self::Http(msg) => write!(f, "fetch error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Anything that can produce a fresh grid snapshot on demand.
pub trait GridSource {
    fn fetch(&self) -> Result<Grid, SourceError>;

    /// Human-readable origin, echoed in output meta.
    fn describe(&self) -> String;
}

/// Local CSV export on disk.
pub struct FileSource {
    path: PathBuf,
    delimiter: Option<u8>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: None,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }
}

impl GridSource for FileSource {
    fn fetch(&self) -> Result<Grid, SourceError> {
        let content = csv::read_to_utf8(&self.path)?;
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| csv::sniff_delimiter(&content));
        csv::grid_from_str(&content, delimiter)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_source_sniffs_and_parses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Op;Conf\nAlice;98,5%\n").unwrap();
        let grid = FileSource::new(file.path()).fetch().unwrap();
        assert_eq!(grid.cell(1, 1), "98,5%");
    }

    #[test]
    fn explicit_delimiter_overrides_sniffing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // Commas would sniff fine; force pipe and the line stays whole.
        file.write_all(b"a,b|c,d\n").unwrap();
        let grid = FileSource::new(file.path())
            .with_delimiter(b'|')
            .fetch()
            .unwrap();
        assert_eq!(grid.cell(0, 0), "a,b");
        assert_eq!(grid.cell(0, 1), "c,d");
    }

    #[test]
    fn missing_file_fails_loudly() {
        let err = FileSource::new("/nonexistent/board.csv").fetch().unwrap_err();
        assert!(matches!(err, SourceError::Io(_)), "{err}");
    }
}
