//! Report content collaborator: the only I/O seam in the crate.

use std::path::Path;

use crate::error::{CovratioError, Result};

/// Supplies report content for a path. The aggregation core never touches
/// the filesystem directly, so tests substitute in-memory implementations.
pub trait ReportReader {
    fn read(&self, path: &Path) -> Result<String>;
}

/// Local filesystem reader.
pub struct FsReader;

impl ReportReader for FsReader {
    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|source| CovratioError::ReportUnavailable {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_reader_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jacoco.xml");
        std::fs::write(&path, "<report></report>").unwrap();

        let content = FsReader.read(&path).unwrap();
        assert_eq!(content, "<report></report>");
    }

    #[test]
    fn test_fs_reader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.xml");

        let err = FsReader.read(&path).unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("nope.xml"), "should name the path: {msg}");
    }
}
