//! Command handler for the covratio CLI.
//!
//! `cmd_coverage` returns its output as a `String`, making it easy to test
//! without capturing stdout. Diagnostic lines go to the supplied sink.

use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::aggregate::Aggregator;
use crate::query::QuickXmlQuery;
use crate::reader::FsReader;

/// Per-file result row (independent mode).
#[derive(Serialize)]
struct FileRatio {
    file: String,
    coverage: f64,
}

/// Single cross-file result (Sonar-aligned mode).
#[derive(Serialize)]
struct AggregateRatio {
    coverage: f64,
}

/// Process the given report files and render the result.
///
/// Independent mode prints one ratio per file; Sonar-aligned mode prints a
/// single accumulated ratio after all files.
pub fn cmd_coverage(
    files: &[PathBuf],
    counter: Option<&str>,
    sonar: bool,
    json: bool,
    sink: Box<dyn Write>,
) -> Result<String> {
    let mut aggregator = Aggregator::new(
        Box::new(FsReader),
        Box::new(QuickXmlQuery),
        sink,
        counter,
        sonar,
    );

    if aggregator.is_aggregating() {
        for file in files {
            aggregator.process_one(file)?;
        }
        let coverage = aggregator.aggregate();
        if json {
            let row = AggregateRatio { coverage };
            Ok(format!("{}\n", serde_json::to_string(&row)?))
        } else {
            Ok(format!("{:.1}%\n", coverage * 100.0))
        }
    } else {
        let mut rows = Vec::new();
        for file in files {
            let coverage = aggregator.process_one(file)?;
            rows.push(FileRatio {
                file: file.display().to_string(),
                coverage,
            });
        }
        if json {
            Ok(format!("{}\n", serde_json::to_string(&rows)?))
        } else {
            let mut out = String::new();
            for row in &rows {
                writeln!(out, "{:<60} {:>6.1}%", row.file, row.coverage * 100.0).unwrap();
            }
            Ok(out)
        }
    }
}
