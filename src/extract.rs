//! Counter extraction: turning report content + counter kind into numeric
//! missed/covered values, with required and optional flavors.
//!
//! Both flavors are pure functions of the content and kind; the asymmetry
//! is in failure handling. The simple per-file ratio must not silently
//! report 0% from a broken report, so its lookups are required. The
//! Sonar-aligned accumulation tolerates reports that lack a counter kind
//! (e.g. no branch data), so its lookups default to 0.

use crate::counter::{CounterKind, CounterPair};
use crate::error::{CovratioError, Result};
use crate::query::{lookup_expr, CounterField, XmlQuery};

/// Extract missed/covered for `kind`, failing with `MalformedReport` when
/// either value is absent or non-numeric.
pub fn required(
    query: &dyn XmlQuery,
    path: &str,
    content: &str,
    kind: CounterKind,
) -> Result<CounterPair> {
    let missed = required_field(query, path, content, kind, CounterField::Missed)?;
    let covered = required_field(query, path, content, kind, CounterField::Covered)?;
    Ok(CounterPair::new(missed, covered))
}

/// Extract missed/covered for `kind`, substituting 0.0 for any value that
/// is absent or non-numeric.
pub fn optional(query: &dyn XmlQuery, content: &str, kind: CounterKind) -> CounterPair {
    CounterPair::new(
        optional_field(query, content, kind, CounterField::Missed),
        optional_field(query, content, kind, CounterField::Covered),
    )
}

fn required_field(
    query: &dyn XmlQuery,
    path: &str,
    content: &str,
    kind: CounterKind,
    field: CounterField,
) -> Result<f64> {
    query
        .find_counter(content, kind, field)
        .and_then(|value| value.parse::<f64>().ok())
        .ok_or_else(|| CovratioError::MalformedReport {
            path: path.to_string(),
            expr: lookup_expr(kind, field),
            content: content.to_string(),
        })
}

fn optional_field(
    query: &dyn XmlQuery,
    content: &str,
    kind: CounterKind,
    field: CounterField,
) -> f64 {
    query
        .find_counter(content, kind, field)
        .and_then(|value| value.parse::<f64>().ok())
        .unwrap_or(0.0)
}
