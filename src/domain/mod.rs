//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the MICP measurement record (`MicpRecord`) and its dataset stats
//! - cut-off detection outputs (`CutoffOutcome`, `CutoffHit`)
//! - derived per-record results (`WeightedRecord`)
//! - run configuration (`RunConfig`) and the summary-file schema

pub mod types;

pub use types::*;
