use crate::content::ContentTree;

use super::{
    classify::{RowBody, RowClass},
    options::{ParseOptions, TextMode},
    types::{Block, BlockItem, BlockKind, BodyItem, Document, Line, LineId, Milestone},
};

/// Counters carried across rows.
#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    lines: u32,
    stanzas: u32,
    paragraphs: u32,
    page_lines: u32,
}

/// State machine turning classified rows into a [`Document`].
pub struct DocumentBuilder {
    options: ParseOptions,
    counters: Counters,
    open: Option<Block>,
    body: Vec<BodyItem>,
    lines: Vec<Line>,
}

impl DocumentBuilder {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            counters: Counters::default(),
            open: None,
            body: vec![],
            lines: vec![],
        }
    }

    pub fn push(&mut self, row: RowClass) {
        for label in row.page_breaks {
            self.page_break(label);
        }

        match row.body {
            RowBody::Nothing => {}
            RowBody::Blank => self.close_block(),
            RowBody::Line {
                hoisted_folios,
                content,
            } => {
                for label in hoisted_folios {
                    self.milestone(Milestone::folio(label));
                }
                self.push_line(content);
            }
        }
    }

    pub fn finish(mut self) -> Document {
        // EOF flush
        self.close_block();
        Document::new(self.body, self.lines)
    }

    fn page_break(&mut self, label: String) {
        self.milestone(Milestone::page(label));
        if self.options.reset_counts_on_page_break {
            self.counters.stanzas = 0;
            self.counters.paragraphs = 0;
            self.counters.page_lines = 0;
        }
    }

    /// Breaks go inside the open block, or between blocks when none is open.
    fn milestone(&mut self, m: Milestone) {
        match self.open.as_mut() {
            Some(block) => block.items.push(BlockItem::Milestone(m)),
            None => self.body.push(BodyItem::Milestone(m)),
        }
    }

    fn open_block(&mut self) -> &mut Block {
        let options = &self.options;
        let counters = &mut self.counters;
        self.open.get_or_insert_with(|| {
            let (kind, ordinal) = match options.mode {
                TextMode::Verse => {
                    counters.stanzas += 1;
                    (BlockKind::Stanza, counters.stanzas)
                }
                TextMode::Prose => {
                    counters.paragraphs += 1;
                    (BlockKind::Paragraph, counters.paragraphs)
                }
            };
            Block {
                kind,
                ordinal,
                numeral: options.numeral_style.format(ordinal),
                numbered: options.number_blocks,
                items: vec![],
            }
        })
    }

    fn push_line(&mut self, content: ContentTree) {
        self.counters.lines += 1;
        self.counters.page_lines += 1;

        let id = LineId(self.counters.lines);
        let every = self.options.number_lines_every;
        let page_line = self.counters.page_lines;
        let page_relative_index = (every > 0 && page_line % every == 0).then_some(page_line);

        self.open_block().items.push(BlockItem::Line(id));
        self.lines.push(Line {
            id,
            page_relative_index,
            content,
        });
    }

    fn close_block(&mut self) {
        if let Some(block) = self.open.take() {
            self.body.push(BodyItem::Block(block));
        }
    }
}
