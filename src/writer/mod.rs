//! Side artifacts produced next to a run.
pub mod tokens;
