use crate::parsing::LineId;

use super::{Directive, MalformedDirective, Payload, grammar::AnchorGroup};

/// Parses `(<location>) <note body>`.
///
/// The body is kept verbatim (apart from surrounding whitespace); the note is
/// placed right after the located text.
pub fn parse(target: LineId, raw: &str) -> Result<Directive, MalformedDirective> {
    let (anchor, body) = AnchorGroup::split(raw)?;
    Ok(Directive {
        target,
        anchor,
        payload: Payload::Note(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_note() {
        let d = parse(LineId(1), "(cat) feline").unwrap();
        assert_eq!(d.target, LineId(1));
        assert_eq!(d.anchor, "cat");
        assert_eq!(d.payload, Payload::Note("feline".into()));
    }

    #[test]
    fn body_keeps_inner_punctuation() {
        let d = parse(LineId(3), "(sat) i.e. (in the Latin) sedit; cf. l. 4").unwrap();
        assert_eq!(
            d.payload,
            Payload::Note("i.e. (in the Latin) sedit; cf. l. 4".into())
        );
    }

    #[test]
    fn missing_parens_is_malformed() {
        assert!(matches!(
            parse(LineId(1), "no parens here"),
            Err(MalformedDirective::MissingAnchor(_))
        ));
    }
}
