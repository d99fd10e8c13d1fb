//! Typed, immutable feature records parsed from annotation input.

use std::fmt;

use crate::error::Error;
use crate::interval::Interval;
use crate::strand::Strand;

/// The four feature kinds the engine models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Gene,
    Transcript,
    Exon,
    Cds,
}

/// Gene-level terms from GFF3 column 3.
const GENE_TERMS: &[&str] = &["gene", "coding_gene", "non_coding_gene", "pseudogene", "operon"];

/// Transcript-level terms from GFF3 column 3.
const TRANSCRIPT_TERMS: &[&str] = &[
    "mRNA",
    "tRNA",
    "rRNA",
    "miRNA",
    "snoRNA",
    "snRNA",
    "SRP_RNA",
    "lnc_RNA",
    "pre_miRNA",
    "RNase_MRP_RNA",
    "transcript",
    "primary_transcript",
    "pseudogenic_transcript",
];

/// Terms that are recognized but carry nothing the engine models.
const IGNORED_TERMS: &[&str] = &[
    "region",
    "biological_region",
    "chromosome",
    "supercontig",
    "scaffold",
    "match",
    "cDNA_match",
    "ncRNA_gene",
    "ncRNA",
    "scRNA",
    "unconfirmed_transcript",
    "C_gene_segment",
    "V_gene_segment",
    "D_gene_segment",
    "J_gene_segment",
    "vaultRNA_primary_transcript",
    "five_prime_UTR",
    "three_prime_UTR",
    "five_prime_utr",
    "three_prime_utr",
    "start_codon",
    "stop_codon",
    "intron",
    "transcription_start_site",
    "transcription_end_site",
    "tss",
    "tts",
];

impl FeatureKind {
    /// Classify a GFF3 type term.
    ///
    /// `Ok(Some(kind))` for modeled kinds, `Ok(None)` for recognized but
    /// ignorable terms, and a parse error for anything unknown.
    pub fn classify_term(term: &str) -> Result<Option<FeatureKind>, Error> {
        if term == "CDS" {
            return Ok(Some(FeatureKind::Cds));
        }
        if term == "exon" {
            return Ok(Some(FeatureKind::Exon));
        }
        if GENE_TERMS.contains(&term) {
            return Ok(Some(FeatureKind::Gene));
        }
        if TRANSCRIPT_TERMS.contains(&term) {
            return Ok(Some(FeatureKind::Transcript));
        }
        if IGNORED_TERMS.contains(&term) {
            return Ok(None);
        }
        Err(Error::Parse(format!("unrecognized feature type: '{term}'")))
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeatureKind::Gene => "gene",
            FeatureKind::Transcript => "transcript",
            FeatureKind::Exon => "exon",
            FeatureKind::Cds => "CDS",
        };
        write!(f, "{s}")
    }
}

/// One parsed annotation record.
///
/// Features are parsed once and never mutated afterwards; the hierarchy and
/// reconciliation passes only read them.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub seq_name: String,
    pub kind: FeatureKind,
    pub interval: Interval,
    pub strand: Strand,
    /// Bases of the preceding codon consumed before this feature's first
    /// base. Only meaningful for CDS records.
    pub phase: Option<u8>,
    pub id: String,
    pub parent_id: Option<String>,
}

impl Feature {
    #[must_use]
    pub fn start(&self) -> u64 {
        self.interval.start
    }

    #[must_use]
    pub fn end(&self) -> u64 {
        self.interval.end
    }

    /// Number of bases covered, inclusive of both ends.
    #[must_use]
    pub fn span(&self) -> u64 {
        self.interval.len()
    }
}
