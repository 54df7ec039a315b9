//! Default completion of loaded documents.

pub mod service;

pub use service::{MergeReport, MergeService};
