//! Parent-child hierarchy builder.
//!
//! Groups a flat, arbitrarily ordered feature batch into gene → transcript →
//! {exon, CDS} records using Parent links. Children may appear before their
//! parents; linking happens in a second pass once every identifier is known.

use std::collections::{HashMap, HashSet};

use crate::error::Error;
use crate::feature::{Feature, FeatureKind};
use crate::findings::{FindingKind, ValidationFinding};

/// A transcript with its child exon and CDS records, sorted ascending by
/// start coordinate regardless of strand.
#[derive(Debug)]
pub struct TranscriptRecord {
    pub transcript: Feature,
    pub exons: Vec<Feature>,
    pub cds: Vec<Feature>,
}

/// A gene with its child transcripts in declaration order.
#[derive(Debug)]
pub struct GeneRecord {
    pub gene: Feature,
    pub transcripts: Vec<TranscriptRecord>,
}

/// Result of hierarchy assembly: the gene forest plus structural findings.
///
/// An orphaned feature (declared parent absent from the batch) is excluded
/// from the forest together with its subtree and surfaced as a fatal
/// structural finding; unrelated genes are unaffected.
#[derive(Debug)]
pub struct HierarchyResult {
    pub genes: Vec<GeneRecord>,
    pub findings: Vec<ValidationFinding>,
}

/// Builds a gene-transcript-exon hierarchy from flat feature records.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    features: Vec<Feature>,
    seen_ids: HashSet<String>,
}

impl HierarchyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature record to the batch.
    ///
    /// Gene and transcript identifiers must be unique within a batch; leaf
    /// records may reuse identifiers (GFF3 spreads one CDS over several
    /// lines sharing an ID).
    pub fn add(&mut self, feature: Feature) -> Result<(), Error> {
        if matches!(feature.kind, FeatureKind::Gene | FeatureKind::Transcript)
            && !self.seen_ids.insert(feature.id.clone())
        {
            return Err(Error::Validation(format!(
                "duplicate {} ID: '{}'",
                feature.kind, feature.id
            )));
        }
        self.features.push(feature);
        Ok(())
    }

    /// Consume the builder and link every feature to its parent.
    pub fn build(self) -> HierarchyResult {
        let mut genes: Vec<GeneRecord> = Vec::new();
        let mut gene_index: HashMap<String, usize> = HashMap::new();
        let mut findings: Vec<ValidationFinding> = Vec::new();

        let mut transcripts: Vec<Feature> = Vec::new();
        let mut children: Vec<Feature> = Vec::new();

        // First pass: register genes, defer everything else.
        for feature in self.features {
            match feature.kind {
                FeatureKind::Gene => {
                    gene_index.insert(feature.id.clone(), genes.len());
                    genes.push(GeneRecord {
                        gene: feature,
                        transcripts: Vec::new(),
                    });
                }
                FeatureKind::Transcript => transcripts.push(feature),
                FeatureKind::Exon | FeatureKind::Cds => children.push(feature),
            }
        }

        // Second pass: attach transcripts to their genes. Transcripts whose
        // gene is absent are dropped with a structural finding; their ids go
        // to a side set so the subtree is excluded without further noise.
        let mut tx_index: HashMap<String, (usize, usize)> = HashMap::new();
        let mut dropped_transcripts: HashSet<String> = HashSet::new();

        for transcript in transcripts {
            let parent = transcript.parent_id.clone();
            match parent.as_deref().and_then(|p| gene_index.get(p)) {
                Some(&gene_idx) => {
                    let slot = genes[gene_idx].transcripts.len();
                    tx_index.insert(transcript.id.clone(), (gene_idx, slot));
                    genes[gene_idx].transcripts.push(TranscriptRecord {
                        transcript,
                        exons: Vec::new(),
                        cds: Vec::new(),
                    });
                }
                None => {
                    dropped_transcripts.insert(transcript.id.clone());
                    findings.push(ValidationFinding::new(
                        transcript.id,
                        FindingKind::OrphanFeature {
                            parent_id: parent.unwrap_or_else(|| "(none)".to_string()),
                        },
                    ));
                }
            }
        }

        // Third pass: attach exons and CDS records to their transcripts.
        for child in children {
            let parent = child.parent_id.clone();
            match parent.as_deref().and_then(|p| tx_index.get(p)) {
                Some(&(gene_idx, tx_idx)) => {
                    let record = &mut genes[gene_idx].transcripts[tx_idx];
                    match child.kind {
                        FeatureKind::Exon => record.exons.push(child),
                        FeatureKind::Cds => record.cds.push(child),
                        _ => unreachable!("only leaf kinds are deferred"),
                    }
                }
                None => {
                    // Children of an already-orphaned transcript fall with
                    // their subtree; anything else is its own orphan.
                    if !parent
                        .as_deref()
                        .is_some_and(|p| dropped_transcripts.contains(p))
                    {
                        findings.push(ValidationFinding::new(
                            child.id,
                            FindingKind::OrphanFeature {
                                parent_id: parent.unwrap_or_else(|| "(none)".to_string()),
                            },
                        ));
                    }
                }
            }
        }

        // Exon and CDS lists are kept ascending by start coordinate.
        for gene in &mut genes {
            for record in &mut gene.transcripts {
                record.exons.sort_by_key(|e| e.start());
                record.cds.sort_by_key(|c| c.start());
            }
        }

        HierarchyResult { genes, findings }
    }
}

/// Build a hierarchy from a complete feature batch.
pub fn build_hierarchy<I>(features: I) -> Result<HierarchyResult, Error>
where
    I: IntoIterator<Item = Feature>,
{
    let mut builder = HierarchyBuilder::new();
    for feature in features {
        builder.add(feature)?;
    }
    Ok(builder.build())
}
