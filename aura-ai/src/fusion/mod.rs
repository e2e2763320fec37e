// Fusion Module - model results to skin scores
//
// signal_policy holds the heuristic tables, signal_fuser applies them, and
// report_context renders the text block for the report generator.

pub mod report_context;
pub mod signal_fuser;
pub mod signal_policy;

pub use report_context::build_report_context;
pub use signal_fuser::{fuse_signals, fuse_signals_with_rng};
