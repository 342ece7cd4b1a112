use std::sync::OnceLock;

use regex::Regex;

use super::DirectiveKind;

/// One `<line-number> <text>` row of a directive list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveRow {
    /// Number of the target line (`L<n>`).
    pub line_number: u32,
    pub text: String,
    /// 1-based physical row in the list the text came from (the first row
    /// when several were joined).
    pub source_row: usize,
}

/// A non-blank row that does not start with a line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableRow {
    pub source_row: usize,
    pub text: String,
}

/// The rows of one directive list, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveList {
    pub kind: DirectiveKind,
    pub rows: Vec<DirectiveRow>,
    pub unreadable: Vec<UnreadableRow>,
}

fn row_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)\s+(.*)$").expect("Invalid directive row regex"))
}

impl DirectiveList {
    /// Reads a directive list.
    ///
    /// Notes and rejected readings keep one directive per row. Variant rows
    /// sharing a line number are joined with a space, in order of the line
    /// number's first appearance.
    pub fn parse(kind: DirectiveKind, input: &str) -> Self {
        let mut rows: Vec<DirectiveRow> = Vec::new();
        let mut unreadable = Vec::new();

        for (idx, raw) in input.lines().enumerate() {
            let source_row = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }

            let parsed = row_pattern()
                .captures(trimmed)
                .and_then(|caps| Some((caps[1].parse::<u32>().ok()?, caps[2].to_string())));
            let Some((line_number, text)) = parsed else {
                unreadable.push(UnreadableRow {
                    source_row,
                    text: trimmed.to_string(),
                });
                continue;
            };

            if kind.merges_rows()
                && let Some(existing) = rows.iter_mut().find(|r| r.line_number == line_number)
            {
                existing.text.push(' ');
                existing.text.push_str(&text);
                continue;
            }

            rows.push(DirectiveRow {
                line_number,
                text,
                source_row,
            });
        }

        Self {
            kind,
            rows,
            unreadable,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.unreadable.is_empty()
    }
}
