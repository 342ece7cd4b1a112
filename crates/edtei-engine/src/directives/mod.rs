//! # Directives
//!
//! Editorial directives read from directive lists: explanatory notes,
//! rejected readings and variant readings. Parsing is independent of where
//! the result ends up; the annotator decides that.
//!
//! ## Modules
//!
//! - **`list`**: `DirectiveList` reads `<line-number> <text>` rows
//! - **`grammar`**: the shared `(<anchor>) <payload>` form
//! - **`note`**, **`rejected`**, **`variant`**: payload grammars per kind
//! - **`cursor`**: byte cursor used by the variant grammar

pub mod cursor;
pub mod grammar;
pub mod list;
pub mod note;
pub mod rejected;
pub mod variant;

use std::fmt;

use serde::Serialize;

use crate::parsing::LineId;

pub use list::{DirectiveList, DirectiveRow, UnreadableRow};

/// Witness recorded for a reading that names none.
pub const UNKNOWN_WITNESS: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DirectiveKind {
    Note,
    Rejected,
    Variant,
}

impl DirectiveKind {
    /// Whether rows sharing a line number are joined before parsing.
    pub fn merges_rows(self) -> bool {
        matches!(self, DirectiveKind::Variant)
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DirectiveKind::Note => "note",
            DirectiveKind::Rejected => "rejected reading",
            DirectiveKind::Variant => "variant reading",
        })
    }
}

/// An editor's correction: the accepted form already in the transcription
/// and the rejected form the source actually has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectionPair {
    pub accepted: String,
    pub rejected: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reading {
    /// Empty for an omission.
    pub text: String,
    pub witnesses: Vec<String>,
}

/// Every reading recorded against one lemma of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingSet {
    pub lemma: String,
    pub readings: Vec<Reading>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Payload {
    Note(String),
    Correction(CorrectionPair),
    Readings(ReadingSet),
}

/// One parsed directive, ready to be located and spliced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub target: LineId,
    /// Text searched for in the target line.
    pub anchor: String,
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedDirective {
    #[error("expected '(<anchor>) <text>', found '{0}'")]
    MissingAnchor(String),
    #[error("empty anchor in '{0}'")]
    EmptyAnchor(String),
    #[error("nothing follows the anchor in '{0}'")]
    MissingPayload(String),
    #[error("unterminated witness list in '{0}'")]
    UnterminatedWitnesses(String),
    #[error("lemma '{0}' has no readings")]
    NoReadings(String),
    #[error("expected '<line-number> <text>', found '{0}'")]
    UnreadableRow(String),
}
