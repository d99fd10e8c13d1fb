//! GFF3 decoding: converts tab-delimited annotation lines into feature records.
//!
//! This is the external-collaborator surface of the engine; the core only
//! ever sees already-parsed [`Feature`] records.

pub mod parser;

use std::io::{BufRead, BufReader, Read};

use flate2::read::GzDecoder;

use crate::error::Error;
use crate::feature::Feature;

use parser::ParsedLine;

/// Parse a gzip-compressed GFF3 stream into a flat feature batch.
pub fn parse_gff3_gz<R: Read>(reader: R) -> Result<Vec<Feature>, Error> {
    let decoder = GzDecoder::new(reader);
    let buf_reader = BufReader::new(decoder);
    parse_gff3(buf_reader)
}

/// Parse GFF3 from a buffered reader into a flat feature batch.
///
/// Decoding errors are batch-fatal; data-quality issues are not detected
/// here but during reconciliation.
pub fn parse_gff3<R: BufRead>(reader: R) -> Result<Vec<Feature>, Error> {
    let mut features = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line_num = line_num + 1;
        let line = line?;
        match parser::parse_line(&line)
            .map_err(|e| Error::Parse(format!("{e} (line {line_num}: {line})")))?
        {
            ParsedLine::Record(feature) => features.push(*feature),
            ParsedLine::Discarded | ParsedLine::Comment => continue,
            ParsedLine::EndOfSection => break,
        }
    }

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::feature::FeatureKind;

    #[test]
    fn parse_worked_example() {
        let gff3 = "\
##gff-version 3
NC_000001.11\tBestRefSeq\tgene\t11874\t14409\t.\t+\t.\tID=gene-DDX11L1;gene=DDX11L1
NC_000001.11\tBestRefSeq\tmRNA\t11874\t14409\t.\t+\t.\tID=rna-NR_046018.2;Parent=gene-DDX11L1
NC_000001.11\tBestRefSeq\texon\t11874\t12227\t.\t+\t.\tID=exon-NR_046018.2-1;Parent=rna-NR_046018.2
NC_000001.11\tBestRefSeq\texon\t12613\t12721\t.\t+\t.\tID=exon-NR_046018.2-2;Parent=rna-NR_046018.2
###";

        let reader = Cursor::new(gff3.as_bytes());
        let features = parse_gff3(BufReader::new(reader)).unwrap();

        assert_eq!(features.len(), 4);
        assert_eq!(features[0].kind, FeatureKind::Gene);
        assert_eq!(features[0].start(), 11874);
        assert_eq!(features[1].kind, FeatureKind::Transcript);
        assert_eq!(features[1].parent_id.as_deref(), Some("gene-DDX11L1"));
        assert_eq!(features[2].kind, FeatureKind::Exon);
        assert_eq!(features[3].start(), 12613);
    }

    #[test]
    fn section_break_ends_batch() {
        let gff3 = "\
chr1\t.\tgene\t100\t200\t.\t+\t.\tID=gene-A
###
chr1\t.\tgene\t300\t400\t.\t+\t.\tID=gene-B";
        let features = parse_gff3(BufReader::new(Cursor::new(gff3.as_bytes()))).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].id, "gene-A");
    }

    #[test]
    fn decoding_error_reports_line_number() {
        let gff3 = "chr1\t.\tgene\tnot_a_number\t200\t.\t+\t.\tID=gene-A";
        let err = parse_gff3(BufReader::new(Cursor::new(gff3.as_bytes()))).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
