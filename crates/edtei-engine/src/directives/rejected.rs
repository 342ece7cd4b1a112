use crate::parsing::LineId;

use super::{CorrectionPair, Directive, MalformedDirective, Payload, grammar::AnchorGroup};

/// Separator between corrections recorded for the same line.
pub const GROUP_SEPARATOR: char = ';';

/// Parses `(<accepted>) <rejected>[; (<accepted>) <rejected> ...]`.
///
/// Each group becomes its own directive, in left-to-right order. The anchor
/// is the accepted form, which is what the transcription already reads.
/// A malformed group does not affect its neighbours.
pub fn parse(target: LineId, raw: &str) -> Vec<Result<Directive, MalformedDirective>> {
    raw.split(GROUP_SEPARATOR)
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(|group| {
            let (accepted, rejected) = AnchorGroup::split(group)?;
            Ok(Directive {
                target,
                anchor: accepted.clone(),
                payload: Payload::Correction(CorrectionPair { accepted, rejected }),
            })
        })
        .collect()
}
