use std::collections::HashMap;

use crate::content::Span;
use crate::parsing::LineId;

/// First occurrence of `anchor` in `text` at or after byte offset `from`.
pub fn locate(text: &str, anchor: &str, from: usize) -> Option<Span> {
    if anchor.is_empty() {
        return None;
    }
    let start = from + text.get(from..)?.find(anchor)?;
    Some(Span::new(start, start + anchor.len()))
}

/// Per-line search positions for one annotation pass.
///
/// Every line starts at 0; a position only moves forward.
#[derive(Debug, Default)]
pub struct LineCursors {
    positions: HashMap<LineId, usize>,
}

impl LineCursors {
    pub fn position(&self, line: LineId) -> usize {
        self.positions.get(&line).copied().unwrap_or(0)
    }

    pub fn advance(&mut self, line: LineId, to: usize) {
        let pos = self.positions.entry(line).or_insert(0);
        *pos = (*pos).max(to);
    }
}
