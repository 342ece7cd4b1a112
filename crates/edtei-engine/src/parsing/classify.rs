use crate::content::{ContentNode, ContentTree, elements};

use super::kinds::{FolioMarker, LegacyLineNumber, PageMarker};

/// What a row contributes after its page markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowBody {
    /// Nothing: a page-marker row with no trailing text.
    Nothing,
    /// A blank row. Closes the open block.
    Blank,
    Line {
        /// Folio breaks written before the line (the 2nd and later markers).
        hoisted_folios: Vec<String>,
        /// Line text, carrying the first folio marker inline. A row holding
        /// only folio markers still yields a line containing just that break.
        content: ContentTree,
    },
}

/// Classification of a single row containing only local facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowClass {
    /// Page-break labels in the order they appear on the row.
    pub page_breaks: Vec<String>,
    pub body: RowBody,
}

/// Classifies transcription rows for the structural parser.
pub struct RowClassifier;

impl RowClassifier {
    /// Classifies one row into a [`RowClass`].
    ///
    /// A leading legacy line number is stripped from the row and again from
    /// the text trailing each page marker.
    pub fn classify(&self, row: &str) -> RowClass {
        let mut page_breaks = Vec::new();
        let mut text = row.trim();

        loop {
            text = LegacyLineNumber::strip(text);
            match PageMarker::split(text) {
                Some((label, trailing)) => {
                    page_breaks.push(label.to_string());
                    text = trailing;
                }
                None => break,
            }
        }

        let body = if text.is_empty() {
            if page_breaks.is_empty() {
                RowBody::Blank
            } else {
                RowBody::Nothing
            }
        } else {
            Self::line_body(text)
        };

        RowClass { page_breaks, body }
    }

    fn line_body(text: &str) -> RowBody {
        let hits = FolioMarker::find_all(text);
        if hits.is_empty() {
            return RowBody::Line {
                hoisted_folios: Vec::new(),
                content: ContentTree::from_text(text),
            };
        }

        let mut nodes = Vec::with_capacity(hits.len() + 2);
        let mut hoisted = Vec::new();
        let mut pos = 0;

        for (i, hit) in hits.iter().enumerate() {
            let before = &text[pos..hit.range.start];
            nodes.push(ContentNode::Text(before.to_string()));
            pos = hit.range.end;

            if i == 0 {
                nodes.push(elements::folio_break(&hit.label).into());
            } else {
                hoisted.push(hit.label.clone());
                // Swallow the whitespace after a removed marker.
                if before.ends_with(char::is_whitespace) || before.is_empty() {
                    let rest = &text[pos..];
                    pos += rest.len() - rest.trim_start().len();
                }
            }
        }
        nodes.push(ContentNode::Text(text[pos..].to_string()));

        RowBody::Line {
            hoisted_folios: hoisted,
            content: ContentTree::new(nodes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classify(row: &str) -> RowClass {
        RowClassifier.classify(row)
    }

    fn plain_line(text: &str) -> RowBody {
        RowBody::Line {
            hoisted_folios: vec![],
            content: ContentTree::from_text(text),
        }
    }

    #[test]
    fn blank_rows() {
        assert_eq!(classify("").body, RowBody::Blank);
        assert_eq!(classify("   \t").body, RowBody::Blank);
        assert_eq!(classify("17").body, RowBody::Blank);
    }

    #[test]
    fn legacy_number_stripped() {
        let c = classify("1 The cat sat");
        assert!(c.page_breaks.is_empty());
        assert_eq!(c.body, plain_line("The cat sat"));
    }

    #[test]
    fn page_marker_alone_adds_nothing() {
        let c = classify("<p12>");
        assert_eq!(c.page_breaks, vec!["12".to_string()]);
        assert_eq!(c.body, RowBody::Nothing);
    }

    #[test]
    fn page_marker_trailing_text_is_reprocessed() {
        let c = classify("3 <p5> 4 <p6> Whan that");
        assert_eq!(c.page_breaks, vec!["5".to_string(), "6".to_string()]);
        assert_eq!(c.body, plain_line("Whan that"));
    }

    #[test]
    fn first_folio_inline_later_ones_hoisted() {
        let c = classify("a [f.1] b [f.2] c [f.3]");
        let RowBody::Line {
            hoisted_folios,
            content,
        } = c.body
        else {
            panic!("expected a line");
        };
        assert_eq!(hoisted_folios, vec!["2".to_string(), "3".to_string()]);
        assert_eq!(
            content.nodes(),
            &[
                ContentNode::Text("a ".into()),
                elements::folio_break("1").into(),
                ContentNode::Text(" b c ".into()),
            ]
        );
        assert_eq!(content.base_text(), "a  b c ");
    }

    #[test]
    fn folio_only_row_is_a_line() {
        assert_eq!(
            classify("[f.12] [f.12v]").body,
            RowBody::Line {
                hoisted_folios: vec!["12v".into()],
                content: ContentTree::new(vec![
                    elements::folio_break("12").into(),
                    ContentNode::Text(" ".into()),
                ]),
            }
        );
    }

    #[test]
    fn page_then_folio_only() {
        let c = classify("<p4> [f.9]");
        assert_eq!(c.page_breaks, vec!["4".to_string()]);
        assert_eq!(
            c.body,
            RowBody::Line {
                hoisted_folios: vec![],
                content: ContentTree::new(vec![elements::folio_break("9").into()]),
            }
        );
        assert!(matches!(&c.body, RowBody::Line { content, .. } if content.base_text().is_empty()));
    }
}
