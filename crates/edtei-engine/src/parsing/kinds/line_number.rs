/// A leading all-digit token carried over from a numbered source text.
pub struct LegacyLineNumber;

impl LegacyLineNumber {
    /// Strips one leading all-digit token and the whitespace after it.
    ///
    /// Tokens that merely start with a digit (`12b`, `3rd`) are kept.
    pub fn strip(text: &str) -> &str {
        let digits = text.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return text;
        }
        let rest = &text[digits..];
        match rest.chars().next() {
            None => rest,
            Some(c) if c.is_whitespace() => rest.trim_start(),
            Some(_) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1 The cat sat", "The cat sat")]
    #[case("120\tWhan that", "Whan that")]
    #[case("42", "")]
    #[case("12b recto", "12b recto")]
    #[case("3rd line", "3rd line")]
    #[case("The cat", "The cat")]
    #[case("1 2 buckle", "2 buckle")]
    fn strips_one_numeric_token(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(LegacyLineNumber::strip(input), expected);
    }
}
