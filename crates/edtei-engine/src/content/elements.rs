//! TEI elements inserted into line content.

use super::{Element, TextFlow};
use crate::directives::{CorrectionPair, ReadingSet};

pub const NOTE: &str = "note";
pub const CHOICE: &str = "choice";
pub const SIC: &str = "sic";
pub const CORR: &str = "corr";
pub const APP: &str = "app";
pub const LEM: &str = "lem";
pub const RDG: &str = "rdg";
pub const PB: &str = "pb";

/// Edition value of an inline folio break.
pub const FOLIO_EDITION: &str = "folio";

/// `<note resp=".." n="..">body</note>`, placed after its anchor.
pub fn note(n: u32, resp: &str, body: &str) -> Element {
    Element::new(NOTE, TextFlow::Apparatus)
        .with_attr("resp", resp)
        .with_attr("n", n.to_string())
        .with_text(body)
}

/// `<choice><sic>rejected</sic><corr resp="..">accepted</corr></choice>`.
pub fn choice(pair: &CorrectionPair, resp: &str) -> Element {
    Element::new(CHOICE, TextFlow::Base)
        .with_child(Element::new(SIC, TextFlow::Apparatus).with_text(&pair.rejected))
        .with_child(
            Element::new(CORR, TextFlow::Base)
                .with_attr("resp", resp)
                .with_text(&pair.accepted),
        )
}

/// `<app type="variant"><lem>..</lem><rdg wit="#A #B">..</rdg>..</app>`.
///
/// An omission becomes an empty `rdg`.
pub fn app(set: &ReadingSet) -> Element {
    let mut app = Element::new(APP, TextFlow::Base)
        .with_attr("type", "variant")
        .with_child(Element::new(LEM, TextFlow::Base).with_text(&set.lemma));
    for reading in &set.readings {
        app = app.with_child(
            Element::new(RDG, TextFlow::Apparatus)
                .with_attr("wit", witness_refs(&reading.witnesses))
                .with_text(&reading.text),
        );
    }
    app
}

/// `<pb ed="folio" n=".."/>` inside a line.
pub fn folio_break(label: &str) -> Element {
    Element::new(PB, TextFlow::Apparatus)
        .with_attr("ed", FOLIO_EDITION)
        .with_attr("n", label)
}

fn witness_refs(witnesses: &[String]) -> String {
    witnesses
        .iter()
        .map(|w| format!("#{w}"))
        .collect::<Vec<_>>()
        .join(" ")
}
