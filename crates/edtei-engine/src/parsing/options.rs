use serde::{Deserialize, Serialize};

use super::numeral::NumeralStyle;

/// Whether the work is set as verse (stanzas) or prose (paragraphs).
///
/// Fixed for a whole run; a document is never mixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    Verse,
    #[default]
    Prose,
}

/// The structural parser's configuration surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub mode: TextMode,
    /// Render the stanza/paragraph ordinal on each block.
    pub number_blocks: bool,
    pub numeral_style: NumeralStyle,
    /// Show a line number on every Nth line of a page. Zero disables numbering.
    pub number_lines_every: u32,
    /// Restart block and page-line counters at each page break.
    pub reset_counts_on_page_break: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: TextMode::Prose,
            number_blocks: false,
            numeral_style: NumeralStyle::Arabic,
            number_lines_every: 4,
            reset_counts_on_page_break: false,
        }
    }
}

impl ParseOptions {
    pub fn verse() -> Self {
        Self {
            mode: TextMode::Verse,
            ..Self::default()
        }
    }

    pub fn prose() -> Self {
        Self::default()
    }
}
