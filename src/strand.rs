//! Strand orientation for genomic features.

use std::fmt;

/// Strand orientation of a genomic feature.
///
/// Exon and CDS lists are always kept in ascending genomic order; the strand
/// decides which end of that order is the biological 5' end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Parse from GFF3 column 7. "-" is reverse; everything else is forward.
    #[must_use]
    pub fn from_gff3(s: &str) -> Self {
        if s == "-" {
            Self::Reverse
        } else {
            Self::Forward
        }
    }

    #[must_use]
    pub fn is_reverse(self) -> bool {
        self == Self::Reverse
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}
