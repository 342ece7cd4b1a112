use serde::Serialize;

/// A byte range `[start, end)` into a line's base text.
///
/// Spans are always measured against the flattened base text of the line's
/// current content, never against the serialized markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-width span marking an insertion point.
    pub fn point(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True when the two spans share at least one interior position.
    ///
    /// A zero-width span overlaps a ranged span only when it sits strictly
    /// inside it; touching endpoints never overlap.
    #[must_use]
    pub fn overlaps(self, other: Span) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => false,
            (true, false) => other.start < self.start && self.start < other.end,
            (false, true) => self.start < other.start && other.start < self.end,
            (false, false) => self.start < other.end && other.start < self.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_and_empty() {
        assert_eq!(Span::new(2, 5).len(), 3);
        assert!(Span::point(4).is_empty());
        assert!(Span::new(5, 2).is_empty());
    }

    #[test]
    fn ranged_overlap() {
        assert!(Span::new(0, 4).overlaps(Span::new(3, 6)));
        assert!(!Span::new(0, 3).overlaps(Span::new(3, 6)));
    }

    #[test]
    fn point_overlap_only_inside() {
        let r = Span::new(2, 6);
        assert!(Span::point(4).overlaps(r));
        assert!(r.overlaps(Span::point(4)));
        assert!(!Span::point(2).overlaps(r));
        assert!(!Span::point(6).overlaps(r));
        assert!(!Span::point(3).overlaps(Span::point(3)));
    }
}
