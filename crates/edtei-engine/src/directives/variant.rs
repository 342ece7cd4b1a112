use crate::parsing::LineId;

use super::{
    Directive, MalformedDirective, Payload, Reading, ReadingSet, UNKNOWN_WITNESS,
    cursor::Cursor, grammar::AnchorGroup,
};

/// Delimiters of a bracketed witness list: `[A, B]`.
pub struct WitnessList;

impl WitnessList {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const SEPARATOR: char = ',';

    /// Splits a witness list body into sigla, dropping blanks, duplicates and
    /// any leading `#`.
    pub fn split(body: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for siglum in body.split(Self::SEPARATOR) {
            let siglum = siglum.trim().trim_start_matches('#');
            if !siglum.is_empty() && !out.iter().any(|s| s == siglum) {
                out.push(siglum.to_string());
            }
        }
        out
    }
}

/// Parses `(<lemma>) <reading> [<wit>, ...] <reading> [<wit>] ... (<lemma>) ...`.
///
/// Groups naming the same lemma accumulate into one [`ReadingSet`]; the
/// result holds one directive per distinct lemma, in order of first mention,
/// with malformed groups reported in place. A reading without a witness list
/// is attested by [`UNKNOWN_WITNESS`]; a witness list with no reading text
/// records an omission.
pub fn parse(target: LineId, raw: &str) -> Vec<Result<Directive, MalformedDirective>> {
    let trimmed = raw.trim();
    let mut sets: Vec<ReadingSet> = Vec::new();
    let mut order: Vec<Result<usize, MalformedDirective>> = Vec::new();
    let mut cur = Cursor::new(trimmed);

    loop {
        cur.skip_whitespace();
        if cur.eof() {
            break;
        }
        match parse_group(&mut cur) {
            Ok((lemma, readings)) => match sets.iter().position(|s| s.lemma == lemma) {
                Some(i) => sets[i].readings.extend(readings),
                None => {
                    sets.push(ReadingSet { lemma, readings });
                    order.push(Ok(sets.len() - 1));
                }
            },
            Err(e) => order.push(Err(e)),
        }
    }

    if order.is_empty() {
        return vec![Err(MalformedDirective::MissingAnchor(trimmed.to_string()))];
    }

    order
        .into_iter()
        .map(|entry| {
            entry.map(|i| Directive {
                target,
                anchor: sets[i].lemma.clone(),
                payload: Payload::Readings(sets[i].clone()),
            })
        })
        .collect()
}

fn parse_group(cur: &mut Cursor<'_>) -> Result<(String, Vec<Reading>), MalformedDirective> {
    let start = cur.i;
    if cur.peek() != Some(AnchorGroup::OPEN) {
        let junk = cur.take_until(&[AnchorGroup::OPEN]);
        return Err(MalformedDirective::MissingAnchor(junk.trim().to_string()));
    }
    cur.bump();

    let lemma = cur.take_until(&[AnchorGroup::CLOSE]).trim();
    if cur.bump() != Some(AnchorGroup::CLOSE) {
        return Err(MalformedDirective::MissingAnchor(
            cur.s[start..].trim().to_string(),
        ));
    }
    if lemma.is_empty() {
        cur.take_until(&[AnchorGroup::OPEN]);
        return Err(MalformedDirective::EmptyAnchor(
            cur.s[start..cur.i].trim().to_string(),
        ));
    }

    let mut readings = Vec::new();
    loop {
        cur.skip_whitespace();
        match cur.peek() {
            None | Some(AnchorGroup::OPEN) => break,
            _ => {}
        }

        let text = cur
            .take_until(&[WitnessList::OPEN, AnchorGroup::OPEN])
            .trim();
        let witnesses = if cur.peek() == Some(WitnessList::OPEN) {
            let list_start = cur.i;
            cur.bump();
            let body = cur.take_until(&[WitnessList::CLOSE]);
            if cur.bump() != Some(WitnessList::CLOSE) {
                return Err(MalformedDirective::UnterminatedWitnesses(
                    cur.s[list_start..].to_string(),
                ));
            }
            WitnessList::split(body)
        } else {
            Vec::new()
        };

        if text.is_empty() && witnesses.is_empty() {
            continue;
        }
        readings.push(Reading {
            text: text.to_string(),
            witnesses: if witnesses.is_empty() {
                vec![UNKNOWN_WITNESS.to_string()]
            } else {
                witnesses
            },
        });
    }

    if readings.is_empty() {
        return Err(MalformedDirective::NoReadings(lemma.to_string()));
    }
    Ok((lemma.to_string(), readings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reading(text: &str, witnesses: &[&str]) -> Reading {
        Reading {
            text: text.into(),
            witnesses: witnesses.iter().map(|w| w.to_string()).collect(),
        }
    }

    fn sets(out: Vec<Result<Directive, MalformedDirective>>) -> Vec<ReadingSet> {
        out.into_iter()
            .map(|d| match d.unwrap().payload {
                Payload::Readings(set) => set,
                other => panic!("expected readings, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn single_reading_with_witnesses() {
        let out = sets(parse(LineId(4), "(cat) catte [A, B]"));
        assert_eq!(
            out,
            vec![ReadingSet {
                lemma: "cat".into(),
                readings: vec![reading("catte", &["A", "B"])],
            }]
        );
    }

    #[test]
    fn several_readings_for_one_lemma() {
        let out = sets(parse(LineId(4), "(cat) catte [A] kat [C,D]"));
        assert_eq!(
            out[0].readings,
            vec![reading("catte", &["A"]), reading("kat", &["C", "D"])]
        );
    }

    #[test]
    fn reading_without_witness_is_unknown() {
        let out = sets(parse(LineId(4), "(cat) catte"));
        assert_eq!(out[0].readings, vec![reading("catte", &[UNKNOWN_WITNESS])]);
    }

    #[test]
    fn witness_list_alone_is_an_omission() {
        let out = sets(parse(LineId(4), "(cat) [B]"));
        assert_eq!(out[0].readings, vec![reading("", &["B"])]);
    }

    #[test]
    fn repeated_lemma_accumulates() {
        let out = sets(parse(LineId(4), "(cat) catte [A] (sat) sate [B] (cat) kat [C]"));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].lemma, "cat");
        assert_eq!(
            out[0].readings,
            vec![reading("catte", &["A"]), reading("kat", &["C"])]
        );
        assert_eq!(out[1].lemma, "sat");
    }

    #[test]
    fn witnesses_are_deduplicated_and_unhashed() {
        assert_eq!(WitnessList::split(" #A, B ,, A "), vec!["A", "B"]);
    }

    #[test]
    fn unterminated_witness_list() {
        let out = parse(LineId(4), "(cat) catte [A, B");
        assert_eq!(
            out,
            vec![Err(MalformedDirective::UnterminatedWitnesses("[A, B".into()))]
        );
    }

    #[test]
    fn lemma_without_readings() {
        let out = parse(LineId(4), "(cat) (sat) sate");
        assert_eq!(out[0], Err(MalformedDirective::NoReadings("cat".into())));
        assert!(out[1].is_ok());
    }

    #[test]
    fn leading_junk_is_reported_and_skipped() {
        let out = parse(LineId(4), "junk (cat) catte");
        assert_eq!(out[0], Err(MalformedDirective::MissingAnchor("junk".into())));
        assert_eq!(out[1].as_ref().unwrap().anchor, "cat");
    }

    #[test]
    fn no_parens_at_all() {
        let out = parse(LineId(4), "no parens here");
        assert_eq!(
            out,
            vec![Err(MalformedDirective::MissingAnchor("no parens here".into()))]
        );
    }
}
