//! GFF3 line and attribute parser.

use crate::error::Error;
use crate::feature::{Feature, FeatureKind};
use crate::interval::Interval;
use crate::strand::Strand;

/// Result of parsing a single GFF3 line.
pub enum ParsedLine {
    Record(Box<Feature>),
    Discarded,
    Comment,
    EndOfSection,
}

/// Parse a single GFF3 line into a feature record.
pub fn parse_line(line: &str) -> Result<ParsedLine, Error> {
    // Comments and directives
    if line.starts_with('#') {
        if line == "###" {
            return Ok(ParsedLine::EndOfSection);
        }
        return Ok(ParsedLine::Comment);
    }

    let line = line.trim();
    if line.is_empty() {
        return Ok(ParsedLine::Comment);
    }

    // Split into 9 tab columns
    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() != 9 {
        return Err(Error::Parse(format!(
            "GFF3 line has {} columns, expected 9",
            columns.len()
        )));
    }

    // Column 3: feature kind (strict, unknown type is an error)
    let kind = match FeatureKind::classify_term(columns[2])? {
        Some(kind) => kind,
        None => return Ok(ParsedLine::Discarded),
    };

    // Columns 4 & 5: start and end, 1-based inclusive
    let start: u64 = columns[3]
        .parse()
        .map_err(|e| Error::Parse(format!("invalid start '{}': {e}", columns[3])))?;
    let end: u64 = columns[4]
        .parse()
        .map_err(|e| Error::Parse(format!("invalid end '{}': {e}", columns[4])))?;
    if start == 0 || end < start {
        return Err(Error::Parse(format!(
            "invalid coordinates {start}..{end}: expected 1-based start <= end"
        )));
    }

    // Column 7: strand
    let strand = Strand::from_gff3(columns[6]);

    // Column 8: phase
    let phase = parse_phase(columns[7], kind)?;

    // Column 9: attributes
    let (id, parent_id) = parse_attributes(columns[8])?;

    // Gene and transcript records must carry their own ID; leaf records may
    // reuse or omit IDs, so synthesize one from the parent link.
    let id = match id {
        Some(id) => id,
        None => match (&parent_id, kind) {
            (Some(parent), FeatureKind::Exon | FeatureKind::Cds) => {
                format!("{parent}:{kind}:{start}")
            }
            _ => {
                return Err(Error::Parse(format!(
                    "GFF3 {kind} record missing required ID attribute: {line}"
                )));
            }
        },
    };

    Ok(ParsedLine::Record(Box::new(Feature {
        seq_name: columns[0].to_string(),
        kind,
        interval: Interval::new(start, end),
        strand,
        phase,
        id,
        parent_id,
    })))
}

/// Parse GFF3 column 8. Phase is kept only for CDS records.
fn parse_phase(raw: &str, kind: FeatureKind) -> Result<Option<u8>, Error> {
    if raw == "." || kind != FeatureKind::Cds {
        return Ok(None);
    }
    match raw {
        "0" => Ok(Some(0)),
        "1" => Ok(Some(1)),
        "2" => Ok(Some(2)),
        _ => Err(Error::Parse(format!("invalid phase '{raw}': expected 0, 1, 2, or '.'"))),
    }
}

/// Parse GFF3 column 9 attributes, extracting ID and Parent.
///
/// All other keys are ignored. A multi-valued Parent is rejected: a feature
/// belongs to exactly one parent in this model.
fn parse_attributes(attrs_str: &str) -> Result<(Option<String>, Option<String>), Error> {
    let mut id = None;
    let mut parent_id = None;

    for pair in attrs_str.split(';') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }

        let eq_pos = pair
            .find('=')
            .ok_or_else(|| Error::Parse(format!("attribute missing '=': '{pair}'")))?;
        let key = &pair[..eq_pos];
        let value = &pair[eq_pos + 1..];

        match key {
            "ID" => id = Some(value.to_string()),
            "Parent" => {
                if value.contains(',') {
                    return Err(Error::Parse(format!(
                        "multi-valued Parent attribute is not supported: '{value}'"
                    )));
                }
                parent_id = Some(value.to_string());
            }
            _ => {} // everything else is another collaborator's concern
        }
    }

    Ok((id, parent_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_gene_line() {
        let line = "NC_000001.11\tBestRefSeq\tgene\t11874\t14409\t.\t+\t.\tID=gene-DDX11L1;Dbxref=GeneID:100287102;gene=DDX11L1";
        let result = parse_line(line).unwrap();
        match result {
            ParsedLine::Record(r) => {
                assert_eq!(r.seq_name, "NC_000001.11");
                assert_eq!(r.kind, FeatureKind::Gene);
                assert_eq!(r.start(), 11874);
                assert_eq!(r.end(), 14409);
                assert_eq!(r.strand, Strand::Forward);
                assert_eq!(r.phase, None);
                assert_eq!(r.id, "gene-DDX11L1");
                assert_eq!(r.parent_id, None);
            }
            _ => panic!("expected Record"),
        }
    }

    #[test]
    fn parse_cds_line_keeps_phase() {
        let line = "chr1\t.\tCDS\t11\t20\t.\t+\t0\tID=cds-1;Parent=rna-1";
        match parse_line(line).unwrap() {
            ParsedLine::Record(r) => {
                assert_eq!(r.kind, FeatureKind::Cds);
                assert_eq!(r.phase, Some(0));
                assert_eq!(r.parent_id.as_deref(), Some("rna-1"));
            }
            _ => panic!("expected Record"),
        }
    }

    #[test]
    fn phase_dropped_for_non_cds() {
        let line = "chr1\t.\texon\t11\t20\t.\t+\t2\tID=exon-1;Parent=rna-1";
        match parse_line(line).unwrap() {
            ParsedLine::Record(r) => assert_eq!(r.phase, None),
            _ => panic!("expected Record"),
        }
    }

    #[test]
    fn parse_comment_and_section_break() {
        assert!(matches!(parse_line("# comment").unwrap(), ParsedLine::Comment));
        assert!(matches!(parse_line("").unwrap(), ParsedLine::Comment));
        assert!(matches!(parse_line("###").unwrap(), ParsedLine::EndOfSection));
    }

    #[test]
    fn ignorable_type_discarded() {
        let line = "chr1\t.\tbiological_region\t100\t200\t.\t+\t.\tID=id-BR1";
        assert!(matches!(parse_line(line).unwrap(), ParsedLine::Discarded));
    }

    #[test]
    fn unknown_type_errors() {
        let line = "chr1\t.\tunknown_type\t100\t200\t.\t+\t.\tID=id-X";
        assert!(parse_line(line).is_err());
    }

    #[test]
    fn reversed_coordinates_error() {
        let line = "chr1\t.\tgene\t200\t100\t.\t+\t.\tID=gene-X";
        assert!(parse_line(line).is_err());
    }

    #[test]
    fn missing_coordinate_errors() {
        let line = "chr1\t.\tgene\t\t200\t.\t+\t.\tID=gene-X";
        assert!(parse_line(line).is_err());
    }

    #[test]
    fn invalid_phase_errors() {
        let line = "chr1\t.\tCDS\t11\t20\t.\t+\t7\tID=cds-1;Parent=rna-1";
        assert!(parse_line(line).is_err());
    }

    #[test]
    fn leaf_without_id_synthesizes_one() {
        let line = "chr1\t.\tCDS\t11\t20\t.\t+\t0\tParent=rna-1";
        match parse_line(line).unwrap() {
            ParsedLine::Record(r) => assert_eq!(r.id, "rna-1:CDS:11"),
            _ => panic!("expected Record"),
        }
    }

    #[test]
    fn gene_without_id_errors() {
        let line = "chr1\t.\tgene\t100\t200\t.\t+\t.\tgene=X";
        assert!(parse_line(line).is_err());
    }

    #[test]
    fn multi_parent_errors() {
        let line = "chr1\t.\texon\t11\t20\t.\t+\t.\tID=exon-1;Parent=rna-1,rna-2";
        assert!(parse_line(line).is_err());
    }
}
