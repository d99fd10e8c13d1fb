//! Verax: gene-annotation reconstruction and validation engine.

pub mod error;

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod feature;
pub mod findings;
pub mod gff3;
pub mod hierarchy;
pub mod interval;
pub mod perf;
pub mod strand;
pub mod transcript;
