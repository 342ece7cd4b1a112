use super::{ContentNode, ContentTree, Element, Span};

/// One piece of markup to splice into a line.
///
/// `span` is measured in base-text bytes. A ranged span is replaced by
/// `nodes`; a zero-width span inserts `nodes` at that point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub span: Span,
    pub nodes: Vec<ContentNode>,
}

impl Insertion {
    /// Replaces the text under `span` with `element`.
    pub fn wrap(span: Span, element: Element) -> Self {
        Self {
            span,
            nodes: vec![ContentNode::Element(element)],
        }
    }

    /// Inserts `element` at `at` without consuming text.
    pub fn at(at: usize, element: Element) -> Self {
        Self {
            span: Span::point(at),
            nodes: vec![ContentNode::Element(element)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpliceError {
    #[error("span {}..{} lies outside the line text (length {})", .span.start, .span.end, .len)]
    OutOfBounds { span: Span, len: usize },
    #[error("span {}..{} does not fall on a character boundary", .span.start, .span.end)]
    NotCharBoundary { span: Span },
    #[error("span {}..{} overlaps an earlier annotation at {}..{}", .span.start, .span.end, .other.start, .other.end)]
    Overlap { span: Span, other: Span },
    #[error("span {}..{} crosses existing markup", .span.start, .span.end)]
    CrossesMarkup { span: Span },
}

/// Result of splicing a batch of insertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    pub content: ContentTree,
    /// Insertions that were skipped, by their index in the input batch.
    pub rejected: Vec<(usize, SpliceError)>,
}

/// A top-level node together with its base-text position.
struct Slot<'a> {
    node: &'a ContentNode,
    offset: usize,
    len: usize,
}

fn layout(content: &ContentTree) -> (Vec<Slot<'_>>, usize) {
    let mut offset = 0;
    let slots = content
        .nodes()
        .iter()
        .map(|node| {
            let len = node.base_len();
            let slot = Slot { node, offset, len };
            offset += len;
            slot
        })
        .collect();
    (slots, offset)
}

/// Checks that an insertion fits the existing content.
fn check_fit(slots: &[Slot<'_>], total: usize, span: Span) -> Result<(), SpliceError> {
    if span.start > span.end || span.end > total {
        return Err(SpliceError::OutOfBounds { span, len: total });
    }

    if span.is_empty() {
        let p = span.start;
        for slot in slots {
            if slot.offset < p && p < slot.offset + slot.len {
                return match slot.node {
                    ContentNode::Text(t) if t.is_char_boundary(p - slot.offset) => Ok(()),
                    ContentNode::Text(_) => Err(SpliceError::NotCharBoundary { span }),
                    ContentNode::Element(_) => Err(SpliceError::CrossesMarkup { span }),
                };
            }
        }
        return Ok(());
    }

    let host = slots.iter().find(|s| {
        matches!(s.node, ContentNode::Text(_)) && s.offset <= span.start && span.end <= s.offset + s.len
    });
    match host {
        Some(Slot {
            node: ContentNode::Text(t),
            offset,
            ..
        }) => {
            if t.is_char_boundary(span.start - offset) && t.is_char_boundary(span.end - offset) {
                Ok(())
            } else {
                Err(SpliceError::NotCharBoundary { span })
            }
        }
        _ => Err(SpliceError::CrossesMarkup { span }),
    }
}

/// Rebuilds `content` with every insertion that fits.
///
/// Insertions are validated in the order given; an insertion overlapping an
/// earlier accepted one, or crossing existing markup, is rejected. Accepted
/// insertions are applied left to right; a zero-width insertion sharing its
/// position with a ranged one goes first, and zero-width insertions at the
/// same point keep their input order after any zero-width markup already
/// there.
pub fn splice(content: &ContentTree, insertions: Vec<Insertion>) -> Spliced {
    let (slots, total) = layout(content);

    let mut accepted: Vec<(usize, Insertion)> = Vec::new();
    let mut rejected = Vec::new();
    for (idx, ins) in insertions.into_iter().enumerate() {
        let verdict = check_fit(&slots, total, ins.span).and_then(|()| {
            match accepted.iter().find(|(_, a)| a.span.overlaps(ins.span)) {
                Some((_, a)) => Err(SpliceError::Overlap {
                    span: ins.span,
                    other: a.span,
                }),
                None => Ok(()),
            }
        });
        match verdict {
            Ok(()) => accepted.push((idx, ins)),
            Err(e) => rejected.push((idx, e)),
        }
    }

    accepted.sort_by_key(|(idx, ins)| (ins.span.start, !ins.span.is_empty(), *idx));
    let mut pending = accepted.into_iter().map(|(_, ins)| ins).peekable();

    let mut out = ContentTree::default();
    for slot in &slots {
        match slot.node {
            ContentNode::Text(text) => {
                let end = slot.offset + slot.len;
                let mut pos = 0;
                while let Some(ins) = pending.next_if(|i| i.span.start < end) {
                    let local = ins.span.start - slot.offset;
                    out.push(ContentNode::Text(text[pos..local].to_string()));
                    for node in ins.nodes {
                        out.push(node);
                    }
                    pos = ins.span.end - slot.offset;
                }
                out.push(ContentNode::Text(text[pos..].to_string()));
            }
            ContentNode::Element(_) => {
                if slot.len > 0 {
                    while let Some(ins) = pending.next_if(|i| i.span.start <= slot.offset) {
                        for node in ins.nodes {
                            out.push(node);
                        }
                    }
                }
                out.push(slot.node.clone());
            }
        }
    }
    for ins in pending {
        for node in ins.nodes {
            out.push(node);
        }
    }

    Spliced {
        content: out,
        rejected,
    }
}

/// Splices a single insertion, failing instead of skipping.
pub fn splice_one(content: &ContentTree, insertion: Insertion) -> Result<ContentTree, SpliceError> {
    let mut spliced = splice(content, vec![insertion]);
    match spliced.rejected.pop() {
        Some((_, err)) => Err(err),
        None => Ok(spliced.content),
    }
}
