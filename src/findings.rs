//! Validation findings: the closed anomaly taxonomy and its classification.
//!
//! A finding records that something about an entity looks wrong without
//! touching the entity itself. The model is always retained in full
//! alongside its findings.

use std::fmt;

use crate::feature::FeatureKind;

/// Broad grouping of a finding, one per taxonomy branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Structural,
    Containment,
    StartCodon,
    Phase,
    Overlap,
    IntronAnomaly,
    MissingUtr,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Structural => "structural",
            Category::Containment => "containment",
            Category::StartCodon => "start-codon",
            Category::Phase => "phase",
            Category::Overlap => "overlap",
            Category::IntronAnomaly => "intron-anomaly",
            Category::MissingUtr => "missing-utr",
        };
        write!(f, "{s}")
    }
}

/// How bad a finding is.
///
/// `Fatal` findings exclude the affected subtree from the model; everything
/// else leaves the model intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        };
        write!(f, "{s}")
    }
}

/// Every anomaly the engine can detect, one variant per taxonomy entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FindingKind {
    /// A feature whose declared parent identifier is absent from the batch.
    OrphanFeature { parent_id: String },
    /// A feature recorded on the opposite strand from its transcript.
    MismatchedStrand { kind: FeatureKind, feature_id: String },
    /// A CDS interval not enclosed by any exon coverage of its transcript.
    CdsOutsideExon { cds_id: String },
    /// The biological 5'-most CDS does not begin at phase 0.
    MissingStartCodon { phase: u8 },
    /// A CDS phase inconsistent with the frame carried over from the
    /// preceding coding interval.
    PhaseDiscontinuity { expected: u8, found: u8 },
    /// The final CDS phase inconsistent with ending on a complete codon
    /// boundary relative to the total coding length.
    TrailingPhaseMismatch { expected: u8, found: u8 },
    /// Two same-kind intervals in one transcript share coverage.
    OverlappingFeatures {
        kind: FeatureKind,
        first: String,
        second: String,
    },
    /// Two exons directly adjacent with no gap between them.
    ZeroLengthIntron { junction: u64 },
    /// An intron shorter than the configured biological minimum.
    ShortIntron { length: u64, minimum: u64 },
    /// A coding transcript with no exonic coverage upstream of its CDS.
    MissingFivePrimeUtr,
    /// A coding transcript with no exonic coverage downstream of its CDS.
    MissingThreePrimeUtr,
}

impl FindingKind {
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            FindingKind::OrphanFeature { .. } | FindingKind::MismatchedStrand { .. } => {
                Category::Structural
            }
            FindingKind::CdsOutsideExon { .. } => Category::Containment,
            FindingKind::MissingStartCodon { .. } => Category::StartCodon,
            FindingKind::PhaseDiscontinuity { .. } | FindingKind::TrailingPhaseMismatch { .. } => {
                Category::Phase
            }
            FindingKind::OverlappingFeatures { .. } => Category::Overlap,
            FindingKind::ZeroLengthIntron { .. } | FindingKind::ShortIntron { .. } => {
                Category::IntronAnomaly
            }
            FindingKind::MissingFivePrimeUtr | FindingKind::MissingThreePrimeUtr => {
                Category::MissingUtr
            }
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            FindingKind::OrphanFeature { .. } => Severity::Fatal,
            FindingKind::MismatchedStrand { .. }
            | FindingKind::CdsOutsideExon { .. }
            | FindingKind::MissingStartCodon { .. }
            | FindingKind::PhaseDiscontinuity { .. }
            | FindingKind::TrailingPhaseMismatch { .. }
            | FindingKind::OverlappingFeatures { .. } => Severity::Error,
            FindingKind::ZeroLengthIntron { .. }
            | FindingKind::ShortIntron { .. }
            | FindingKind::MissingFivePrimeUtr
            | FindingKind::MissingThreePrimeUtr => Severity::Warning,
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingKind::OrphanFeature { parent_id } => {
                write!(f, "declared parent '{parent_id}' not found in batch")
            }
            FindingKind::MismatchedStrand { kind, feature_id } => {
                write!(f, "{kind} '{feature_id}' is on the opposite strand from its transcript")
            }
            FindingKind::CdsOutsideExon { cds_id } => {
                write!(f, "CDS '{cds_id}' is not contained within any exon")
            }
            FindingKind::MissingStartCodon { phase } => {
                write!(f, "first CDS declares phase {phase}, expected 0 at a start codon")
            }
            FindingKind::PhaseDiscontinuity { expected, found } => {
                write!(f, "declared phase {found} breaks frame continuity, expected {expected}")
            }
            FindingKind::TrailingPhaseMismatch { expected, found } => {
                write!(
                    f,
                    "final CDS phase {found} inconsistent with total coding length, expected {expected}"
                )
            }
            FindingKind::OverlappingFeatures { kind, first, second } => {
                write!(f, "{kind} '{first}' overlaps {kind} '{second}'")
            }
            FindingKind::ZeroLengthIntron { junction } => {
                write!(f, "zero-length intron: exons are adjacent at position {junction}")
            }
            FindingKind::ShortIntron { length, minimum } => {
                write!(f, "intron of length {length} is below the minimum of {minimum}")
            }
            FindingKind::MissingFivePrimeUtr => {
                write!(f, "coding region reaches the 5' end of the transcript, no 5' UTR")
            }
            FindingKind::MissingThreePrimeUtr => {
                write!(f, "coding region reaches the 3' end of the transcript, no 3' UTR")
            }
        }
    }
}

/// One detected anomaly, attached to the entity that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFinding {
    /// Identifier of the owning entity (transcript or feature).
    pub owner_id: String,
    pub kind: FindingKind,
}

impl ValidationFinding {
    #[must_use]
    pub fn new<T: Into<String>>(owner_id: T, kind: FindingKind) -> Self {
        ValidationFinding {
            owner_id: owner_id.into(),
            kind,
        }
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}/{}] {}: {}",
            self.category(),
            self.severity(),
            self.owner_id,
            self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_variants_share_a_category() {
        let a = FindingKind::PhaseDiscontinuity { expected: 1, found: 2 };
        let b = FindingKind::TrailingPhaseMismatch { expected: 1, found: 2 };
        assert_eq!(a.category(), Category::Phase);
        assert_eq!(b.category(), Category::Phase);
    }

    #[test]
    fn intron_anomalies_are_warnings() {
        assert_eq!(
            FindingKind::ZeroLengthIntron { junction: 21 }.severity(),
            Severity::Warning
        );
        assert_eq!(
            FindingKind::ShortIntron { length: 5, minimum: 20 }.severity(),
            Severity::Warning
        );
    }

    #[test]
    fn orphan_is_fatal_structural() {
        let kind = FindingKind::OrphanFeature {
            parent_id: "rna-MISSING".to_string(),
        };
        assert_eq!(kind.category(), Category::Structural);
        assert_eq!(kind.severity(), Severity::Fatal);
    }

    #[test]
    fn missing_utr_sides_are_warnings() {
        assert_eq!(FindingKind::MissingFivePrimeUtr.category(), Category::MissingUtr);
        assert_eq!(FindingKind::MissingFivePrimeUtr.severity(), Severity::Warning);
        assert_eq!(FindingKind::MissingThreePrimeUtr.severity(), Severity::Warning);
    }

    #[test]
    fn mismatched_strand_is_a_structural_error() {
        let kind = FindingKind::MismatchedStrand {
            kind: FeatureKind::Exon,
            feature_id: "exon-2".to_string(),
        };
        assert_eq!(kind.category(), Category::Structural);
        assert_eq!(kind.severity(), Severity::Error);
        assert!(kind.to_string().contains("opposite strand"));
    }

    #[test]
    fn display_names_both_overlapping_features() {
        let finding = ValidationFinding::new(
            "rna-1",
            FindingKind::OverlappingFeatures {
                kind: FeatureKind::Exon,
                first: "exon-1".to_string(),
                second: "exon-2".to_string(),
            },
        );
        let msg = finding.to_string();
        assert!(msg.contains("exon-1"));
        assert!(msg.contains("exon-2"));
        assert!(msg.contains("overlap"));
    }
}
