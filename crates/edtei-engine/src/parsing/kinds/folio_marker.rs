use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// A folio marker found in a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolioHit {
    /// Byte range of the whole marker, brackets included.
    pub range: Range<usize>,
    /// Folio number with optional side letter, e.g. `12b`.
    pub label: String,
}

/// Manuscript folio marker: `[f.<digits><optional letter>]`, anywhere in a row.
pub struct FolioMarker;

impl FolioMarker {
    pub const OPEN: &'static str = "[f.";

    fn pattern() -> &'static Regex {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        PATTERN.get_or_init(|| {
            Regex::new(r"\[f\.\s*(\d+[a-zA-Z]?)\]").expect("Invalid folio marker regex")
        })
    }

    /// Every folio marker in `text`, left to right.
    pub fn find_all(text: &str) -> Vec<FolioHit> {
        if !text.contains(Self::OPEN) {
            return Vec::new();
        }
        Self::pattern()
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(FolioHit {
                    range: whole.range(),
                    label: caps[1].to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_markers_with_side_letters() {
        let hits = FolioMarker::find_all("a [f.12] b [f. 12v] c");
        assert_eq!(
            hits,
            vec![
                FolioHit {
                    range: 2..8,
                    label: "12".into()
                },
                FolioHit {
                    range: 11..19,
                    label: "12v".into()
                },
            ]
        );
    }

    #[test]
    fn ignores_malformed_markers() {
        assert!(FolioMarker::find_all("[f.] [f.ab] [f.12bc]").is_empty());
        assert!(FolioMarker::find_all("plain text").is_empty());
    }
}
