//! `micp-eptr` library crate.
//!
//! The binary (`eptr`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes
//! - modules are reusable (e.g., batch scripts over many samples)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod cutoff;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
