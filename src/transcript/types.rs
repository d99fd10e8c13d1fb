//! Transcript and gene model types.

use crate::feature::Feature;
use crate::interval::Interval;
use crate::strand::Strand;

/// A derived intron: the gap between two consecutive exons.
///
/// Never present in the input; always computed from exon positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intron {
    pub interval: Interval,
}

impl Intron {
    #[must_use]
    pub fn length(&self) -> u64 {
        self.interval.len()
    }
}

/// Which end of the coding sequence a UTR flanks, in biological orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtrSide {
    FivePrime,
    ThreePrime,
}

/// A derived untranslated region: exonic coverage outside the CDS span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utr {
    pub side: UtrSide,
    pub interval: Interval,
}

/// One reconstructed transcript with its derived regions.
///
/// `exons` and `cds` are sorted ascending by start coordinate regardless of
/// strand; `strand` determines the biological 5'→3' direction used for phase
/// and UTR reasoning. A transcript with an empty `cds` list is non-coding
/// and valid by construction.
#[derive(Debug, Clone)]
pub struct TranscriptModel {
    pub feature: Feature,
    pub exons: Vec<Feature>,
    pub cds: Vec<Feature>,
    pub introns: Vec<Intron>,
    pub utrs: Vec<Utr>,
}

impl TranscriptModel {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.feature.id
    }

    #[must_use]
    pub fn strand(&self) -> Strand {
        self.feature.strand
    }

    #[must_use]
    pub fn is_coding(&self) -> bool {
        !self.cds.is_empty()
    }
}

/// One gene with its transcripts in declaration order.
///
/// A gene may legitimately own zero transcripts.
#[derive(Debug, Clone)]
pub struct GeneModel {
    pub feature: Feature,
    pub transcripts: Vec<TranscriptModel>,
}

impl GeneModel {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.feature.id
    }
}
