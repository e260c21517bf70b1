//! Patient timeline — a patient's visits joined with diagnosis and
//! prescribed-medicine data, most recent visit first.
//!
//! The join fans out once per prescription; rows are collapsed back to
//! one `VisitSummary` per visit in Rust, with medicine names gathered
//! into a set so a medicine prescribed twice on one visit shows once.
//! Visits without a diagnosis or without prescriptions are kept.

mod aggregates;
mod fetch;
mod types;

pub use aggregates::*;
pub use types::*;

// ── Tests ──────────────────────────────────────────────────────────────────
