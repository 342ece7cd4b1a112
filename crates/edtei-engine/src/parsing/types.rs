use std::fmt;

use serde::Serialize;

use crate::content::ContentTree;

/// Stable identifier of a line: `L<n>`, `n` counting every line of the
/// document from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LineId(pub u32);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// The kind of a block, fixed by the run's text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockKind {
    Stanza,
    Paragraph,
}

/// Which physical boundary a break marker records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MilestoneKind {
    /// A page of the base edition.
    Page,
    /// A manuscript folio.
    Folio,
}

/// A page or folio break, independent of block and line structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub kind: MilestoneKind,
    pub label: String,
}

impl Milestone {
    pub fn page(label: impl Into<String>) -> Self {
        Self {
            kind: MilestoneKind::Page,
            label: label.into(),
        }
    }

    pub fn folio(label: impl Into<String>) -> Self {
        Self {
            kind: MilestoneKind::Folio,
            label: label.into(),
        }
    }
}

/// A line of verse or prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub id: LineId,
    /// Displayed line number; only set on every Nth line of a page.
    pub page_relative_index: Option<u32>,
    pub content: ContentTree,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockItem {
    Line(LineId),
    Milestone(Milestone),
}

/// A stanza or paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub ordinal: u32,
    /// The ordinal in the configured numeral style.
    pub numeral: String,
    /// Whether the numeral is shown on the block.
    pub numbered: bool,
    pub items: Vec<BlockItem>,
}

impl Block {
    pub fn line_ids(&self) -> impl Iterator<Item = LineId> + '_ {
        self.items.iter().filter_map(|item| match item {
            BlockItem::Line(id) => Some(*id),
            BlockItem::Milestone(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BodyItem {
    Block(Block),
    /// A break that occurred while no block was open.
    Milestone(Milestone),
}

/// A parsed transcription.
///
/// Structure is fixed once built; annotation only replaces line content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub body: Vec<BodyItem>,
    lines: Vec<Line>,
}

impl Document {
    pub(crate) fn new(body: Vec<BodyItem>, lines: Vec<Line>) -> Self {
        Self { body, lines }
    }

    /// All lines in document order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        let idx = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.lines.get(idx).filter(|l| l.id == id)
    }

    pub(crate) fn line_mut(&mut self, id: LineId) -> Option<&mut Line> {
        let idx = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.lines.get_mut(idx).filter(|l| l.id == id)
    }

    /// Replaces a line's content; returns false for an unknown line.
    pub fn replace_content(&mut self, id: LineId, content: ContentTree) -> bool {
        match self.line_mut(id) {
            Some(line) => {
                line.content = content;
                true
            }
            None => false,
        }
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.body.iter().filter_map(|item| match item {
            BodyItem::Block(b) => Some(b),
            BodyItem::Milestone(_) => None,
        })
    }
}
