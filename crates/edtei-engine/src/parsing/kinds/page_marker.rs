/// Page marker of the base edition: `<p<label>>` at the start of a row.
pub struct PageMarker;

impl PageMarker {
    pub const OPEN: &'static str = "<p";
    pub const CLOSE: char = '>';

    /// Splits a row starting with a page marker into `(label, trailing text)`,
    /// both trimmed.
    ///
    /// A marker with no closing `>` takes the rest of the row as its label.
    pub fn split(row: &str) -> Option<(&str, &str)> {
        let rest = row.strip_prefix(Self::OPEN)?;
        Some(match rest.split_once(Self::CLOSE) {
            Some((label, trailing)) => (label.trim(), trailing.trim()),
            None => (rest.trim(), ""),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_alone() {
        assert_eq!(PageMarker::split("<p12>"), Some(("12", "")));
    }

    #[test]
    fn marker_with_trailing_text() {
        assert_eq!(
            PageMarker::split("<p 7 > Whan that Aprille"),
            Some(("7", "Whan that Aprille"))
        );
    }

    #[test]
    fn unclosed_marker_takes_rest_as_label() {
        assert_eq!(PageMarker::split("<p12 and more"), Some(("12 and more", "")));
    }

    #[test]
    fn not_a_marker() {
        assert_eq!(PageMarker::split("The <p3> is inline"), None);
    }
}
