//! # Structural Parsing
//!
//! Turns a plain-text transcription into a [`Document`] of blocks, lines and
//! page/folio breaks.
//!
//! ## Parsing Phases
//!
//! 1. **Row Classification** (`classify`): each row is classified into a
//!    `RowClass` holding its page breaks and what follows them (a line, a
//!    blank or nothing)
//!
//! 2. **Document Construction** (`builder`): a `DocumentBuilder` keeps the
//!    line, block and page-line counters and opens and closes blocks
//!
//! ## Modules
//!
//! - **`types`**: `Document`, `Block`, `Line`, `LineId`, `Milestone`
//! - **`kinds`**: row syntax with owned delimiters (PageMarker, FolioMarker, LegacyLineNumber)
//! - **`classify`**: `RowClassifier` produces a `RowClass` per row
//! - **`builder`**: `DocumentBuilder` state machine
//! - **`numeral`**: arabic and Roman block numerals
//! - **`options`**: `ParseOptions` and `TextMode`
//!
//! ## Key Invariants
//!
//! - Line ids are `L1..Ln` with no gaps
//! - Only a blank row closes a block; page and folio rows never do
//! - With `reset_counts_on_page_break`, a page break restarts block and page-line counts

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod numeral;
pub mod options;
pub mod types;

pub use builder::DocumentBuilder;
pub use classify::{RowBody, RowClass, RowClassifier};
pub use numeral::{NumeralStyle, to_roman};
pub use options::{ParseOptions, TextMode};
pub use types::{
    Block, BlockItem, BlockKind, BodyItem, Document, Line, LineId, Milestone, MilestoneKind,
};

/// Parses transcription rows into a document.
pub fn parse_document<I, S>(rows: I, options: &ParseOptions) -> Document
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let classifier = RowClassifier;
    let mut builder = DocumentBuilder::new(options.clone());

    for row in rows {
        let rc = classifier.classify(row.as_ref());
        builder.push(rc);
    }

    let doc = builder.finish();
    log::debug!(
        "parsed {} lines into {} blocks",
        doc.lines().len(),
        doc.blocks().count()
    );
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_ids_have_no_gaps() {
        let rows = ["<p1>", "1 a", "", "[f.3]", "2 b", "<p2> c"];
        let doc = parse_document(rows, &ParseOptions::verse());
        let ids: Vec<_> = doc.lines().iter().map(|l| l.id.to_string()).collect();
        assert_eq!(ids, vec!["L1", "L2", "L3", "L4"]);
        assert_eq!(doc.blocks().count(), 2);
    }

    #[test]
    fn empty_input() {
        let doc = parse_document(Vec::<String>::new(), &ParseOptions::default());
        assert!(doc.body.is_empty());
        assert!(doc.lines().is_empty());
    }
}
