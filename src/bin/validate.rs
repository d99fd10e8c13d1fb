use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use verax::aggregate;
use verax::cli;
use verax::config::ValidationConfig;
use verax::findings::Severity;
use verax::gff3;

#[derive(Parser)]
#[command(name = "validate", about = "Reconstruct and validate gene models from a GFF3 file")]
struct Cli {
    /// Path to the GFF3 annotation file (plain or gzip)
    gff3: PathBuf,

    /// Path to a JSON configuration file with validation thresholds
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print every finding instead of per-category counts only
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();

    cli::banner("Annotation Validator");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let config = match &cli_args.config {
        Some(path) => ValidationConfig::from_file(path)?,
        None => ValidationConfig::default(),
    };

    cli::kv("Input", &cli_args.gff3.display().to_string());
    cli::kv("Min intron length", &config.min_intron_length.to_string());

    eprintln!();

    // ── Parsing ──────────────────────────────────────────
    cli::section("Parsing");

    let file = File::open(&cli_args.gff3)
        .with_context(|| format!("failed to open GFF3: {}", cli_args.gff3.display()))?;
    let is_gzip = cli_args
        .gff3
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
    let features = if is_gzip {
        gff3::parse_gff3_gz(file)?
    } else {
        gff3::parse_gff3(BufReader::new(file))?
    };

    cli::kv("Features", &features.len().to_string());

    eprintln!();

    // ── Validation ───────────────────────────────────────
    cli::section("Validation");

    let result = aggregate::validate_batch(features, &config)?;

    let num_coding: usize = result
        .genes
        .iter()
        .flat_map(|g| &g.transcripts)
        .filter(|t| t.is_coding())
        .count();
    let num_introns: usize = result
        .genes
        .iter()
        .flat_map(|g| &g.transcripts)
        .map(|t| t.introns.len())
        .sum();

    cli::kv("Genes", &result.genes.len().to_string());
    cli::kv("Transcripts", &result.transcript_count().to_string());
    cli::kv("Coding", &num_coding.to_string());
    cli::kv("Introns derived", &num_introns.to_string());

    eprintln!();

    // ── Findings ─────────────────────────────────────────
    cli::section("Findings");

    if result.findings.is_empty() {
        cli::success("no findings; every gene model is consistent");
    } else {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for finding in &result.findings {
            *counts
                .entry(format!("{}/{}", finding.category(), finding.severity()))
                .or_default() += 1;
        }
        for (label, count) in &counts {
            cli::kv(label, &count.to_string());
        }
        if cli_args.verbose {
            eprintln!();
            for finding in &result.findings {
                cli::finding(finding);
            }
        }
        if result.worst_severity() == Some(Severity::Fatal) {
            eprintln!();
            eprintln!(
                "  {}",
                "orphaned subtrees were excluded from the reconstruction".red()
            );
        }
    }

    // ── Summary ──────────────────────────────────────────
    cli::print_summary(start);
    Ok(())
}
