use serde::{Deserialize, Serialize};

/// How stanza and paragraph ordinals are displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumeralStyle {
    #[default]
    Arabic,
    Roman,
}

impl NumeralStyle {
    /// Formats a block counter in this style.
    pub fn format(self, n: u32) -> String {
        match self {
            NumeralStyle::Arabic => n.to_string(),
            NumeralStyle::Roman => to_roman(n),
        }
    }
}

const ROMAN_TABLE: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Greedy subtractive Roman numeral. Zero yields an empty string.
pub fn to_roman(mut n: u32) -> String {
    let mut out = String::new();
    for (value, glyphs) in ROMAN_TABLE {
        while n >= value {
            out.push_str(glyphs);
            n -= value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, "I")]
    #[case(4, "IV")]
    #[case(9, "IX")]
    #[case(14, "XIV")]
    #[case(40, "XL")]
    #[case(90, "XC")]
    #[case(400, "CD")]
    #[case(1994, "MCMXCIV")]
    #[case(3999, "MMMCMXCIX")]
    fn roman_numerals(#[case] n: u32, #[case] expected: &str) {
        assert_eq!(NumeralStyle::Roman.format(n), expected);
    }

    #[rstest]
    #[case(1)]
    #[case(4)]
    #[case(1994)]
    fn arabic_is_identity(#[case] n: u32) {
        assert_eq!(NumeralStyle::Arabic.format(n), n.to_string());
    }

    #[test]
    fn zero_has_no_roman_form() {
        assert_eq!(to_roman(0), "");
    }
}
