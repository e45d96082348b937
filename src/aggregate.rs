//! Coverage aggregation: one or more report files in, one ratio out.
//!
//! Two mutually exclusive strategies, chosen once at construction:
//!
//! - [`SimpleRatio`]: each report stands alone; `process` returns
//!   `covered / (missed + covered)` for the requested counter kind and a
//!   malformed report is a hard failure.
//! - [`SonarAligned`]: reports accumulate into line/branch running sums and
//!   the final ratio comes from a separate [`RatioStrategy::aggregate`]
//!   call, using the Sonar branch+line formula. Reports lacking a counter
//!   contribute zero instead of failing.
//!
//! The two modes are not numerically comparable: the Sonar formula weighs
//! every branch evaluation and executable line together rather than taking
//! a per-kind ratio.

use std::io::Write;
use std::path::Path;

use crate::counter::{CounterKind, CounterPair};
use crate::error::Result;
use crate::extract;
use crate::query::XmlQuery;
use crate::reader::ReportReader;

/// Prefix on every diagnostic line written to the sink.
pub const LOG_PREFIX: &str = "[covratio]";

/// Running line/branch sums for one Sonar-aligned run. Never reset; a new
/// run gets a new instance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccumulatorState {
    pub lines_missed: f64,
    pub lines_covered: f64,
    pub branch_missed: f64,
    pub branch_covered: f64,
}

impl AccumulatorState {
    fn add(&mut self, lines: CounterPair, branches: CounterPair) {
        self.lines_missed += lines.missed;
        self.lines_covered += lines.covered;
        self.branch_missed += branches.missed;
        self.branch_covered += branches.covered;
    }

    /// Sonar coverage definition:
    /// `coverage = (CT + CF + LC) / (B + EL)` where `CT + CF` is the number
    /// of covered branch outcomes, `LC` the covered lines, `B` all branch
    /// outcomes, and `EL` all executable lines. `0/0` normalizes to 0.
    pub fn coverage(&self) -> f64 {
        let b = self.branch_missed + self.branch_covered;
        let el = self.lines_covered + self.lines_missed;
        let coverage = (self.branch_covered + self.lines_covered) / (b + el);
        if coverage.is_nan() {
            0.0
        } else {
            coverage
        }
    }
}

/// One of the two aggregation behaviors behind a common interface.
pub trait RatioStrategy {
    /// Whether the final ratio comes from `aggregate` after all files,
    /// rather than from each `process` call.
    fn is_aggregating(&self) -> bool;

    /// Consume one report's content. In simple mode the return value is the
    /// file's coverage ratio; in Sonar-aligned mode it is always 0.0 and
    /// the real result comes from `aggregate`.
    fn process(
        &mut self,
        query: &dyn XmlQuery,
        sink: &mut dyn Write,
        path: &str,
        content: &str,
    ) -> Result<f64>;

    /// Compute the cross-file ratio from accumulated state. A pure read:
    /// callable any number of times, never mutates. Meaningless (0.0) for
    /// non-aggregating strategies.
    fn aggregate(&self, sink: &mut dyn Write) -> f64 {
        let _ = sink;
        0.0
    }
}

/// Independent per-file ratio for one requested counter kind.
pub struct SimpleRatio {
    selector: Option<String>,
    resolved: Option<CounterKind>,
}

impl SimpleRatio {
    pub fn new(selector: Option<&str>) -> Self {
        Self {
            selector: selector.map(str::to_string),
            resolved: None,
        }
    }

    /// Resolve the requested selector on first use; the resolution then
    /// sticks for the remainder of the run.
    fn kind(&mut self) -> CounterKind {
        *self
            .resolved
            .get_or_insert_with(|| CounterKind::resolve(self.selector.as_deref()))
    }
}

impl RatioStrategy for SimpleRatio {
    fn is_aggregating(&self) -> bool {
        false
    }

    fn process(
        &mut self,
        query: &dyn XmlQuery,
        _sink: &mut dyn Write,
        path: &str,
        content: &str,
    ) -> Result<f64> {
        let kind = self.kind();
        let pair = extract::required(query, path, content, kind)?;
        Ok(pair.ratio())
    }
}

/// Cross-file accumulation using the Sonar branch+line formula.
#[derive(Default)]
pub struct SonarAligned {
    state: AccumulatorState,
}

impl SonarAligned {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AccumulatorState {
        &self.state
    }
}

impl RatioStrategy for SonarAligned {
    fn is_aggregating(&self) -> bool {
        true
    }

    fn process(
        &mut self,
        query: &dyn XmlQuery,
        sink: &mut dyn Write,
        path: &str,
        content: &str,
    ) -> Result<f64> {
        log_line(sink, &format!("{} Reading from file {}", LOG_PREFIX, path));

        let lines = extract::optional(query, content, CounterKind::Line);
        let branches = extract::optional(query, content, CounterKind::Branch);
        self.state.add(lines, branches);

        // The per-file return value carries no information in this mode;
        // callers get the real ratio from `aggregate`.
        Ok(0.0)
    }

    fn aggregate(&self, sink: &mut dyn Write) -> f64 {
        let coverage = self.state.coverage();
        log_line(
            sink,
            &format!("{} Sonar-aligned coverage is {}", LOG_PREFIX, coverage),
        );
        coverage
    }
}

/// Write one diagnostic line and flush it. The sink is observational only,
/// so write failures are swallowed.
fn log_line(sink: &mut dyn Write, message: &str) {
    let _ = writeln!(sink, "{}", message);
    let _ = sink.flush();
}

/// Orchestrates reading and aggregating report files for one run. All
/// collaborators are injected; the aggregator owns no global state.
pub struct Aggregator {
    reader: Box<dyn ReportReader>,
    query: Box<dyn XmlQuery>,
    sink: Box<dyn Write>,
    strategy: Box<dyn RatioStrategy>,
}

impl Aggregator {
    /// `counter_selector` is validated lazily, on the first `process_one`
    /// call. `sonar_aligned` selects the accumulating strategy; the
    /// selector is ignored in that mode (line and branch counters are
    /// always read).
    pub fn new(
        reader: Box<dyn ReportReader>,
        query: Box<dyn XmlQuery>,
        sink: Box<dyn Write>,
        counter_selector: Option<&str>,
        sonar_aligned: bool,
    ) -> Self {
        let strategy: Box<dyn RatioStrategy> = if sonar_aligned {
            Box::new(SonarAligned::new())
        } else {
            Box::new(SimpleRatio::new(counter_selector))
        };
        Self {
            reader,
            query,
            sink,
            strategy,
        }
    }

    /// Whether callers should collect the result from `aggregate` after all
    /// files instead of from each `process_one` return value.
    pub fn is_aggregating(&self) -> bool {
        self.strategy.is_aggregating()
    }

    /// Read and process one report file.
    pub fn process_one(&mut self, path: &Path) -> Result<f64> {
        let content = self.reader.read(path)?;
        let path_str = path.display().to_string();
        self.strategy
            .process(self.query.as_ref(), self.sink.as_mut(), &path_str, &content)
    }

    /// Final cross-file ratio (Sonar-aligned mode). Reads the accumulator
    /// without mutating it.
    pub fn aggregate(&mut self) -> f64 {
        self.strategy.aggregate(self.sink.as_mut())
    }
}
