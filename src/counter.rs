//! Counter kinds recorded by JaCoCo reports and the missed/covered pairs
//! extracted for them.

/// The category of code element a report counter measures.
///
/// Matches the `type` attribute of a JaCoCo `<counter>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    Instruction,
    Complexity,
    Method,
    Class,
    Line,
    Branch,
}

/// Counter kinds a caller may request for the simple per-file ratio.
/// `Branch` is deliberately absent: branch data only participates in the
/// Sonar-aligned formula, never as a standalone selector.
const SELECTABLE: [CounterKind; 5] = [
    CounterKind::Instruction,
    CounterKind::Complexity,
    CounterKind::Method,
    CounterKind::Class,
    CounterKind::Line,
];

impl CounterKind {
    /// The uppercase `type` attribute value as it appears in report XML.
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterKind::Instruction => "INSTRUCTION",
            CounterKind::Complexity => "COMPLEXITY",
            CounterKind::Method => "METHOD",
            CounterKind::Class => "CLASS",
            CounterKind::Line => "LINE",
            CounterKind::Branch => "BRANCH",
        }
    }

    /// Resolve a requested counter selector, falling back to the default
    /// (`Instruction`) when the selector is absent or not one of the
    /// selectable kinds. Case-insensitive.
    pub fn resolve(selector: Option<&str>) -> CounterKind {
        selector
            .and_then(|s| {
                SELECTABLE
                    .iter()
                    .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
                    .copied()
            })
            .unwrap_or(CounterKind::Instruction)
    }
}

impl std::str::FromStr for CounterKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "instruction" => Ok(CounterKind::Instruction),
            "complexity" => Ok(CounterKind::Complexity),
            "method" => Ok(CounterKind::Method),
            "class" => Ok(CounterKind::Class),
            "line" => Ok(CounterKind::Line),
            "branch" => Ok(CounterKind::Branch),
            _ => Err(format!(
                "Unknown counter kind: '{}'. Supported: instruction, complexity, method, class, line, branch",
                s
            )),
        }
    }
}

impl std::fmt::Display for CounterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Missed/covered values extracted from one report for one counter kind.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CounterPair {
    pub missed: f64,
    pub covered: f64,
}

impl CounterPair {
    pub fn new(missed: f64, covered: f64) -> Self {
        Self { missed, covered }
    }

    /// `covered / (missed + covered)`, or 0.0 when the denominator is zero.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        let total = self.missed + self.covered;
        if total == 0.0 {
            0.0
        } else {
            self.covered / total
        }
    }
}
