use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use covratio::error::{CovratioError, Result};
use covratio::reader::ReportReader;

/// In-memory report reader keyed by path string. Unknown paths surface as
/// `ReportUnavailable`, same as the filesystem reader.
#[derive(Default)]
pub struct StaticReader {
    reports: HashMap<String, String>,
}

impl StaticReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, content: &str) -> Self {
        self.reports.insert(path.to_string(), content.to_string());
        self
    }
}

impl ReportReader for StaticReader {
    fn read(&self, path: &Path) -> Result<String> {
        let key = path.display().to_string();
        self.reports
            .get(&key)
            .cloned()
            .ok_or_else(|| CovratioError::ReportUnavailable {
                path: key,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such report"),
            })
    }
}

/// A `Write` sink that shares its buffer, so a test can hand a boxed clone
/// to the aggregator and still inspect the logged lines afterwards.
#[derive(Clone, Default)]
pub struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
