//! Transcript model types and per-transcript reconciliation.

pub mod reconcile;
pub mod types;
