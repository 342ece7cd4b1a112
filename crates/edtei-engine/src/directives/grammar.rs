use std::sync::OnceLock;

use regex::Regex;

use super::MalformedDirective;

/// Delimiters of the shared `(<anchor>) <payload>` form.
pub struct AnchorGroup;

impl AnchorGroup {
    pub const OPEN: u8 = b'(';
    pub const CLOSE: u8 = b')';

    fn pattern() -> &'static Regex {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        PATTERN.get_or_init(|| Regex::new(r"^\(([^)]+)\)\s*(.+)$").expect("Invalid anchor regex"))
    }

    /// Splits `raw` into a trimmed anchor and a trimmed payload.
    pub fn split(raw: &str) -> Result<(String, String), MalformedDirective> {
        let trimmed = raw.trim();
        let Some(caps) = Self::pattern().captures(trimmed) else {
            return Err(Self::diagnose(trimmed));
        };

        let anchor = caps[1].trim();
        let payload = caps[2].trim();
        if anchor.is_empty() {
            return Err(MalformedDirective::EmptyAnchor(trimmed.to_string()));
        }
        Ok((anchor.to_string(), payload.to_string()))
    }

    fn diagnose(trimmed: &str) -> MalformedDirective {
        let bytes = trimmed.as_bytes();
        match (bytes.first(), trimmed.find(Self::CLOSE as char)) {
            (Some(&Self::OPEN), Some(1)) => MalformedDirective::EmptyAnchor(trimmed.to_string()),
            (Some(&Self::OPEN), Some(_)) => MalformedDirective::MissingPayload(trimmed.to_string()),
            _ => MalformedDirective::MissingAnchor(trimmed.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn splits_anchor_and_payload() {
        assert_eq!(
            AnchorGroup::split("(cat) feline"),
            Ok(("cat".to_string(), "feline".to_string()))
        );
    }

    #[test]
    fn trims_both_parts() {
        assert_eq!(
            AnchorGroup::split("  ( the cat )   a small feline  "),
            Ok(("the cat".to_string(), "a small feline".to_string()))
        );
    }

    #[test]
    fn payload_may_follow_without_space() {
        assert_eq!(
            AnchorGroup::split("(cat)feline"),
            Ok(("cat".to_string(), "feline".to_string()))
        );
    }

    #[rstest]
    #[case("no parens here", MalformedDirective::MissingAnchor("no parens here".into()))]
    #[case("(cat)", MalformedDirective::MissingPayload("(cat)".into()))]
    #[case("(cat)   ", MalformedDirective::MissingPayload("(cat)".into()))]
    #[case("() body", MalformedDirective::EmptyAnchor("() body".into()))]
    #[case("(   ) body", MalformedDirective::EmptyAnchor("(   ) body".into()))]
    #[case("(unclosed body", MalformedDirective::MissingAnchor("(unclosed body".into()))]
    fn malformed(#[case] raw: &str, #[case] expected: MalformedDirective) {
        assert_eq!(AnchorGroup::split(raw), Err(expected));
    }
}
