//! Batch validation: hierarchy assembly plus parallel per-transcript
//! reconciliation.

use rayon::prelude::*;

use crate::config::ValidationConfig;
use crate::error::Error;
use crate::feature::Feature;
use crate::findings::ValidationFinding;
use crate::hierarchy::{GeneRecord, build_hierarchy};
use crate::transcript::reconcile::reconcile_transcript;
use crate::transcript::types::GeneModel;

/// Outcome of validating one feature batch: the reconstructed gene models
/// and every finding, structural and per-transcript, in deterministic order.
#[derive(Debug)]
pub struct BatchResult {
    pub genes: Vec<GeneModel>,
    pub findings: Vec<ValidationFinding>,
}

impl BatchResult {
    #[must_use]
    pub fn transcript_count(&self) -> usize {
        self.genes.iter().map(|g| g.transcripts.len()).sum()
    }

    #[must_use]
    pub fn worst_severity(&self) -> Option<crate::findings::Severity> {
        self.findings.iter().map(ValidationFinding::severity).max()
    }
}

/// Validate a complete feature batch.
///
/// Transcripts are reconciled in parallel; each depends only on its own
/// exon/CDS set. Findings are merged in hierarchy order (structural first,
/// then gene by gene, transcript by transcript), so output is identical
/// across runs and thread counts.
pub fn validate_batch<I>(features: I, config: &ValidationConfig) -> Result<BatchResult, Error>
where
    I: IntoIterator<Item = Feature>,
{
    let hierarchy = build_hierarchy(features)?;
    let mut findings = hierarchy.findings;

    let reconciled: Vec<(GeneModel, Vec<ValidationFinding>)> = hierarchy
        .genes
        .into_par_iter()
        .map(|record| reconcile_gene(record, config))
        .collect();

    let mut genes = Vec::with_capacity(reconciled.len());
    for (gene, gene_findings) in reconciled {
        findings.extend(gene_findings);
        genes.push(gene);
    }

    Ok(BatchResult { genes, findings })
}

fn reconcile_gene(record: GeneRecord, config: &ValidationConfig) -> (GeneModel, Vec<ValidationFinding>) {
    let mut findings = Vec::new();
    let transcripts = record
        .transcripts
        .into_iter()
        .map(|tx| {
            let (model, tx_findings) = reconcile_transcript(tx, config);
            findings.extend(tx_findings);
            model
        })
        .collect();

    (
        GeneModel {
            feature: record.gene,
            transcripts,
        },
        findings,
    )
}
