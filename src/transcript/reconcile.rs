//! Transcript reconciliation: intron derivation, UTR inference, and the
//! coding-consistency checks.
//!
//! Every check runs independently and accumulates findings; no check
//! short-circuits another, and nothing here ever discards or mutates the
//! underlying features.

use crate::config::ValidationConfig;
use crate::feature::{Feature, FeatureKind};
use crate::findings::{FindingKind, ValidationFinding};
use crate::hierarchy::TranscriptRecord;
use crate::interval::{Interval, biological_indices};
use crate::strand::Strand;
use crate::transcript::types::{Intron, TranscriptModel, Utr, UtrSide};

/// Reconcile one transcript: derive introns and UTRs, run all checks.
///
/// Depends only on the transcript's own exon/CDS set, so transcripts can be
/// reconciled concurrently with no shared state.
pub fn reconcile_transcript(
    record: TranscriptRecord,
    config: &ValidationConfig,
) -> (TranscriptModel, Vec<ValidationFinding>) {
    let TranscriptRecord {
        transcript,
        exons,
        cds,
    } = record;
    let tx_id = transcript.id.clone();
    let strand = transcript.strand;
    let mut findings = Vec::new();

    let introns = derive_introns(&exons, &tx_id, config, &mut findings);

    check_strands(&exons, &cds, strand, &tx_id, &mut findings);
    check_overlaps(&exons, FeatureKind::Exon, &tx_id, &mut findings);
    check_overlaps(&cds, FeatureKind::Cds, &tx_id, &mut findings);

    // Coding-specific checks; a transcript without CDS records is
    // non-coding and valid by default.
    let mut utrs = Vec::new();
    if !cds.is_empty() {
        check_containment(&exons, &cds, &tx_id, &mut findings);
        check_phases(&cds, strand, &mut findings);
        utrs = infer_utrs(&exons, &cds, strand);
        check_utr_presence(&utrs, &tx_id, &mut findings);
    }

    let model = TranscriptModel {
        feature: transcript,
        exons,
        cds,
        introns,
        utrs,
    };
    (model, findings)
}

/// Derive introns from the gaps between consecutive exons.
///
/// A gap of exactly zero is a degenerate intron: flagged, not modeled, and
/// the two exons count as contiguous for coverage math. A positive gap below
/// the configured minimum is flagged as suspicious but still modeled.
fn derive_introns(
    exons: &[Feature],
    tx_id: &str,
    config: &ValidationConfig,
    findings: &mut Vec<ValidationFinding>,
) -> Vec<Intron> {
    let mut introns = Vec::new();

    for window in exons.windows(2) {
        let prev = &window[0];
        let next = &window[1];
        let gap = prev.interval.gap_to(&next.interval);

        if gap == 0 {
            findings.push(ValidationFinding::new(
                tx_id,
                FindingKind::ZeroLengthIntron {
                    junction: next.start(),
                },
            ));
            continue;
        }
        if gap < 0 {
            // Shared coverage; the overlap check owns this case.
            continue;
        }

        let intron = Intron {
            interval: Interval::new(prev.end() + 1, next.start() - 1),
        };
        if intron.length() < config.min_intron_length {
            findings.push(ValidationFinding::new(
                tx_id,
                FindingKind::ShortIntron {
                    length: intron.length(),
                    minimum: config.min_intron_length,
                },
            ));
        }
        introns.push(intron);
    }

    introns
}

/// Every child must sit on the transcript's own strand. A mismatched child
/// stays in the model; the finding records the disagreement.
fn check_strands(
    exons: &[Feature],
    cds: &[Feature],
    strand: Strand,
    tx_id: &str,
    findings: &mut Vec<ValidationFinding>,
) {
    for child in exons.iter().chain(cds) {
        if child.strand != strand {
            findings.push(ValidationFinding::new(
                tx_id,
                FindingKind::MismatchedStrand {
                    kind: child.kind,
                    feature_id: child.id.clone(),
                },
            ));
        }
    }
}

/// Flag every pair of same-kind intervals that share coverage.
fn check_overlaps(
    features: &[Feature],
    kind: FeatureKind,
    tx_id: &str,
    findings: &mut Vec<ValidationFinding>,
) {
    for i in 0..features.len() {
        for j in (i + 1)..features.len() {
            if features[i].interval.overlaps(&features[j].interval) {
                findings.push(ValidationFinding::new(
                    tx_id,
                    FindingKind::OverlappingFeatures {
                        kind,
                        first: features[i].id.clone(),
                        second: features[j].id.clone(),
                    },
                ));
            }
        }
    }
}

/// Merge ascending exon intervals into contiguous coverage blocks.
///
/// Adjacent (zero-gap) and overlapping exons collapse into one block so a
/// CDS spanning a degenerate junction still counts as covered.
fn merged_coverage(exons: &[Feature]) -> Vec<Interval> {
    let mut coverage: Vec<Interval> = Vec::new();
    for exon in exons {
        match coverage.last_mut() {
            Some(last) if last.gap_to(&exon.interval) <= 0 => {
                last.end = last.end.max(exon.end());
            }
            _ => coverage.push(exon.interval),
        }
    }
    coverage
}

/// Every CDS interval must lie within one contiguous block of exon coverage.
fn check_containment(
    exons: &[Feature],
    cds: &[Feature],
    tx_id: &str,
    findings: &mut Vec<ValidationFinding>,
) {
    let coverage = merged_coverage(exons);
    for c in cds {
        if !coverage.iter().any(|block| block.contains(&c.interval)) {
            findings.push(ValidationFinding::new(
                tx_id,
                FindingKind::CdsOutsideExon { cds_id: c.id.clone() },
            ));
        }
    }
}

/// Start-codon, phase-continuity, and trailing-phase checks.
///
/// The expected frame is carried along the walk and never resynchronized to
/// a declared value, so one wrong phase annotation produces exactly one
/// finding. The recurrence `expected' = (expected + len) mod 3` is pinned
/// against known-good annotation corpora.
fn check_phases(
    cds: &[Feature],
    strand: Strand,
    findings: &mut Vec<ValidationFinding>,
) {
    let order: Vec<usize> = biological_indices(cds.len(), strand).collect();

    // The biological 5'-most CDS must begin a codon.
    let first = &cds[order[0]];
    let declared_first = first.phase.unwrap_or(0);
    if declared_first != 0 {
        findings.push(ValidationFinding::new(
            first.id.clone(),
            FindingKind::MissingStartCodon {
                phase: declared_first,
            },
        ));
    }

    let mut expected: u64 = 0;
    for k in 1..order.len() {
        expected = (expected + cds[order[k - 1]].span()) % 3;
        let current = &cds[order[k]];
        let declared = u64::from(current.phase.unwrap_or(0));
        if declared != expected {
            let expected = expected as u8;
            let found = declared as u8;
            let kind = if k == order.len() - 1 {
                FindingKind::TrailingPhaseMismatch { expected, found }
            } else {
                FindingKind::PhaseDiscontinuity { expected, found }
            };
            findings.push(ValidationFinding::new(current.id.clone(), kind));
        }
    }
}

/// Infer 5'/3' UTRs: exonic coverage outside the CDS span, direction-adjusted
/// by strand. UTRs are never explicit input.
fn infer_utrs(
    exons: &[Feature],
    cds: &[Feature],
    strand: Strand,
) -> Vec<Utr> {
    let span_start = cds.iter().map(|c| c.start()).min().unwrap_or(0);
    let span_end = cds.iter().map(|c| c.end()).max().unwrap_or(0);

    let (left_side, right_side) = if strand.is_reverse() {
        (UtrSide::ThreePrime, UtrSide::FivePrime)
    } else {
        (UtrSide::FivePrime, UtrSide::ThreePrime)
    };

    let mut utrs = Vec::new();
    for exon in exons {
        if exon.start() < span_start {
            utrs.push(Utr {
                side: left_side,
                interval: Interval::new(exon.start(), exon.end().min(span_start - 1)),
            });
        }
        if exon.end() > span_end {
            utrs.push(Utr {
                side: right_side,
                interval: Interval::new(exon.start().max(span_end + 1), exon.end()),
            });
        }
    }
    utrs
}

/// A coding transcript is expected to carry exonic coverage on both sides of
/// its CDS; a missing side means the coding region runs to the transcript
/// boundary.
fn check_utr_presence(utrs: &[Utr], tx_id: &str, findings: &mut Vec<ValidationFinding>) {
    if !utrs.iter().any(|u| u.side == UtrSide::FivePrime) {
        findings.push(ValidationFinding::new(tx_id, FindingKind::MissingFivePrimeUtr));
    }
    if !utrs.iter().any(|u| u.side == UtrSide::ThreePrime) {
        findings.push(ValidationFinding::new(tx_id, FindingKind::MissingThreePrimeUtr));
    }
}
