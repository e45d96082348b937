//! XML lookup collaborator: locating a report-level counter attribute.
//!
//! The aggregation core never walks XML itself; it asks an `XmlQuery` for
//! the `missed`/`covered` attribute of the `<counter>` element whose `type`
//! matches a given kind. Absence is `None`, never an error — the caller
//! decides whether a missing value is fatal.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::counter::CounterKind;

/// Which attribute of a counter element to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterField {
    Missed,
    Covered,
}

impl CounterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterField::Missed => "missed",
            CounterField::Covered => "covered",
        }
    }
}

/// Render the XPath-equivalent lookup expression for diagnostics, e.g.
/// `/report/counter[@type='LINE']/@missed`.
pub fn lookup_expr(kind: CounterKind, field: CounterField) -> String {
    format!(
        "/report/counter[@type='{}']/@{}",
        kind.as_str(),
        field.as_str()
    )
}

/// Lookup contract over report content.
pub trait XmlQuery {
    /// Find the `missed`/`covered` attribute text of the report-level
    /// counter of the given kind. `None` when the counter or attribute is
    /// absent, or the content is not a well-formed report.
    fn find_counter(&self, content: &str, kind: CounterKind, field: CounterField)
        -> Option<String>;
}

/// Default query over JaCoCo XML using quick-xml event streaming.
///
/// Matches only counters that are direct children of the root `<report>`
/// element — the report totals — not the per-package/class/method counters
/// nested deeper in the document.
pub struct QuickXmlQuery;

impl XmlQuery for QuickXmlQuery {
    fn find_counter(
        &self,
        content: &str,
        kind: CounterKind,
        field: CounterField,
    ) -> Option<String> {
        let mut reader = Reader::from_str(content);
        let mut depth = 0usize;
        let mut root_is_report = false;

        loop {
            match reader.read_event() {
                // Malformed content is absence, not an error.
                Err(_) => return None,
                Ok(Event::Eof) => break,
                Ok(Event::Start(e)) => {
                    if depth == 0 {
                        root_is_report = e.name().as_ref() == b"report";
                    } else if let Some(value) =
                        match_counter(&e, depth, root_is_report, kind, field)
                    {
                        return Some(value);
                    }
                    depth += 1;
                }
                Ok(Event::Empty(e)) => {
                    if let Some(value) = match_counter(&e, depth, root_is_report, kind, field) {
                        return Some(value);
                    }
                }
                Ok(Event::End(_)) => {
                    depth = depth.saturating_sub(1);
                }
                Ok(_) => {}
            }
        }

        None
    }
}

/// Check one element event against `/report/counter[@type=KIND]` and pull
/// out the requested attribute.
fn match_counter(
    e: &BytesStart,
    depth: usize,
    root_is_report: bool,
    kind: CounterKind,
    field: CounterField,
) -> Option<String> {
    if depth != 1 || !root_is_report || e.name().as_ref() != b"counter" {
        return None;
    }
    if get_attr(e, b"type")? != kind.as_str() {
        return None;
    }
    get_attr(e, field.as_str().as_bytes())
}

fn get_attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == name)
        .and_then(|attr| attr.unescape_value().ok())
        .map(|value| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<report name="demo">
  <package name="com/example">
    <class name="com/example/Foo" sourcefilename="Foo.java">
      <counter type="LINE" missed="9" covered="9"/>
    </class>
    <counter type="LINE" missed="8" covered="8"/>
  </package>
  <counter type="INSTRUCTION" missed="1" covered="4"/>
  <counter type="LINE" missed="1" covered="2"/>
  <counter type="CLASS" missed="0" covered="1"/>
</report>"#;

    #[test]
    fn test_find_report_level_counter() {
        let query = QuickXmlQuery;
        assert_eq!(
            query.find_counter(REPORT, CounterKind::Line, CounterField::Missed),
            Some("1".to_string())
        );
        assert_eq!(
            query.find_counter(REPORT, CounterKind::Line, CounterField::Covered),
            Some("2".to_string())
        );
        assert_eq!(
            query.find_counter(REPORT, CounterKind::Instruction, CounterField::Covered),
            Some("4".to_string())
        );
    }

    #[test]
    fn test_nested_counters_ignored() {
        // The package- and class-level LINE counters (missed 8/9) must not
        // shadow the report total.
        let query = QuickXmlQuery;
        assert_eq!(
            query.find_counter(REPORT, CounterKind::Line, CounterField::Missed),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_absent_counter() {
        let query = QuickXmlQuery;
        assert_eq!(
            query.find_counter(REPORT, CounterKind::Branch, CounterField::Missed),
            None
        );
    }

    #[test]
    fn test_non_report_root() {
        let query = QuickXmlQuery;
        let content = r#"<coverage><counter type="LINE" missed="1" covered="2"/></coverage>"#;
        assert_eq!(
            query.find_counter(content, CounterKind::Line, CounterField::Missed),
            None
        );
    }

    #[test]
    fn test_malformed_xml_is_absence() {
        let query = QuickXmlQuery;
        let content = "<report><counter type=\"LINE\" missed=";
        assert_eq!(
            query.find_counter(content, CounterKind::Line, CounterField::Missed),
            None
        );
    }

    #[test]
    fn test_counter_with_separate_end_tag() {
        let query = QuickXmlQuery;
        let content = r#"<report><counter type="METHOD" missed="2" covered="6"></counter></report>"#;
        assert_eq!(
            query.find_counter(content, CounterKind::Method, CounterField::Covered),
            Some("6".to_string())
        );
    }

    #[test]
    fn test_lookup_expr() {
        assert_eq!(
            lookup_expr(CounterKind::Branch, CounterField::Covered),
            "/report/counter[@type='BRANCH']/@covered"
        );
    }
}
