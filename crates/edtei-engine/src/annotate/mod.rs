//! # Annotation
//!
//! Applies directive lists to a parsed [`Document`]. Each directive is parsed,
//! its anchor located in the target line's base text, and the line's content
//! replaced by a spliced copy. Failures are recorded in a [`Report`] and never
//! stop a pass.
//!
//! ## Modules
//!
//! - **`locator`**: `locate()` and the per-line `LineCursors`
//! - **`report`**: `Report`, `SkippedDirective`, `SkipReason`

pub mod locator;
pub mod report;

use log::{debug, info, warn};

use crate::content::{Insertion, Span, elements, splice_one};
use crate::directives::{
    Directive, DirectiveKind, DirectiveList, MalformedDirective, Payload, note, rejected, variant,
};
use crate::parsing::{Document, LineId};

pub use locator::{LineCursors, locate};
pub use report::{PassSummary, Report, SkipReason, SkippedDirective};

/// Responsibility pointer used when none is configured.
pub const DEFAULT_RESP: &str = "#EDT";

/// Annotation state for one run: the note counter and the report.
#[derive(Debug)]
pub struct Annotator {
    resp: String,
    notes_applied: u32,
    report: Report,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(DEFAULT_RESP)
    }
}

impl Annotator {
    pub fn new(resp: impl Into<String>) -> Self {
        Self {
            resp: resp.into(),
            notes_applied: 0,
            report: Report::default(),
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn into_report(self) -> Report {
        self.report
    }

    /// Applies one directive list, whatever its kind.
    pub fn apply(&mut self, doc: &mut Document, list: &DirectiveList) {
        let mut pass = PassSummary {
            kind: list.kind,
            applied: 0,
            skipped: 0,
        };

        for row in &list.unreadable {
            self.skip(
                &mut pass,
                SkippedDirective {
                    kind: list.kind,
                    line: None,
                    source_row: row.source_row,
                    raw: row.text.clone(),
                    reason: MalformedDirective::UnreadableRow(row.text.clone()).into(),
                },
            );
        }

        let mut cursors = LineCursors::default();
        for row in &list.rows {
            let target = LineId(row.line_number);
            let parsed = match list.kind {
                DirectiveKind::Note => vec![note::parse(target, &row.text)],
                DirectiveKind::Rejected => rejected::parse(target, &row.text),
                DirectiveKind::Variant => by_first_occurrence(doc, variant::parse(target, &row.text)),
            };

            for result in parsed {
                let outcome = result
                    .map_err(SkipReason::from)
                    .and_then(|d| self.apply_one(doc, &mut cursors, &d).map(|span| (d, span)));
                match outcome {
                    Ok((d, span)) => {
                        pass.applied += 1;
                        debug!(
                            "applied {} on {} at {}..{}: '{}'",
                            list.kind, d.target, span.start, span.end, d.anchor
                        );
                    }
                    Err(reason) => self.skip(
                        &mut pass,
                        SkippedDirective {
                            kind: list.kind,
                            line: Some(target),
                            source_row: row.source_row,
                            raw: row.text.clone(),
                            reason,
                        },
                    ),
                }
            }
        }

        info!("{pass}");
        self.report.passes.push(pass);
    }

    pub fn apply_notes(&mut self, doc: &mut Document, list: &DirectiveList) {
        debug_assert_eq!(list.kind, DirectiveKind::Note);
        self.apply(doc, list);
    }

    pub fn apply_rejected(&mut self, doc: &mut Document, list: &DirectiveList) {
        debug_assert_eq!(list.kind, DirectiveKind::Rejected);
        self.apply(doc, list);
    }

    pub fn apply_variants(&mut self, doc: &mut Document, list: &DirectiveList) {
        debug_assert_eq!(list.kind, DirectiveKind::Variant);
        self.apply(doc, list);
    }

    fn apply_one(
        &mut self,
        doc: &mut Document,
        cursors: &mut LineCursors,
        d: &Directive,
    ) -> Result<Span, SkipReason> {
        let line = doc.line(d.target).ok_or(SkipReason::UnknownLine(d.target))?;
        let text = line.content.base_text();
        let span = locate(&text, &d.anchor, cursors.position(d.target))
            .ok_or_else(|| SkipReason::AnchorNotFound(d.anchor.clone()))?;

        let insertion = match &d.payload {
            Payload::Note(body) => Insertion::at(
                span.end,
                elements::note(self.notes_applied + 1, &self.resp, body),
            ),
            Payload::Correction(pair) => Insertion::wrap(span, elements::choice(pair, &self.resp)),
            Payload::Readings(set) => Insertion::wrap(span, elements::app(set)),
        };
        let content = splice_one(&line.content, insertion)?;

        doc.replace_content(d.target, content);
        if matches!(d.payload, Payload::Note(_)) {
            self.notes_applied += 1;
        }
        cursors.advance(d.target, span.end);
        Ok(span)
    }

    fn skip(&mut self, pass: &mut PassSummary, skipped: SkippedDirective) {
        warn!("skipped {skipped}");
        pass.skipped += 1;
        self.report.skipped.push(skipped);
    }
}

/// Orders a line's variant lemmas by first occurrence in its base text.
///
/// Malformed groups and lemmas absent from the line come first so they are
/// reported before anything is applied.
fn by_first_occurrence(
    doc: &Document,
    parsed: Vec<Result<Directive, MalformedDirective>>,
) -> Vec<Result<Directive, MalformedDirective>> {
    let Some(target) = parsed.iter().find_map(|r| r.as_ref().ok().map(|d| d.target)) else {
        return parsed;
    };
    let Some(text) = doc.line(target).map(|l| l.content.base_text()) else {
        return parsed;
    };

    let mut keyed: Vec<_> = parsed
        .into_iter()
        .map(|r| {
            let key = r
                .as_ref()
                .ok()
                .and_then(|d| locate(&text, &d.anchor, 0))
                .map(|s| s.start);
            (key, r)
        })
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, r)| r).collect()
}
