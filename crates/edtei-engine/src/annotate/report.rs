use std::fmt;

use crate::content::SpliceError;
use crate::directives::{DirectiveKind, MalformedDirective};
use crate::parsing::LineId;

/// Why a directive was not applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("malformed directive: {0}")]
    Malformed(#[from] MalformedDirective),
    #[error("anchor '{0}' not found")]
    AnchorNotFound(String),
    #[error("line {0} does not exist")]
    UnknownLine(LineId),
    #[error(transparent)]
    Splice(#[from] SpliceError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDirective {
    pub kind: DirectiveKind,
    /// Absent when the row's line number could not be read.
    pub line: Option<LineId>,
    /// 1-based row of the directive list.
    pub source_row: usize,
    pub raw: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at row {}", self.kind, self.source_row)?;
        if let Some(line) = self.line {
            write!(f, " ({line})")?;
        }
        write!(f, ": {}: {}", self.reason, self.raw)
    }
}

/// Counts for one directive list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    pub kind: DirectiveKind,
    pub applied: usize,
    pub skipped: usize,
}

impl fmt::Display for PassSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}s: {} applied, {} skipped",
            self.kind, self.applied, self.skipped
        )
    }
}

/// Outcome of every annotation pass of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub passes: Vec<PassSummary>,
    /// Every skipped directive, in the order it was met.
    pub skipped: Vec<SkippedDirective>,
}

impl Report {
    pub fn applied(&self) -> usize {
        self.passes.iter().map(|p| p.applied).sum()
    }

    pub fn has_skips(&self) -> bool {
        !self.skipped.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pass in &self.passes {
            writeln!(f, "{pass}")?;
        }
        for skip in &self.skipped {
            writeln!(f, "  skipped {skip}")?;
        }
        Ok(())
    }
}
