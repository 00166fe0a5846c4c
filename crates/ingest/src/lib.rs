//! Dataset ingest: fetching the unified ad dataset and normalizing its rows
//! into canonical records.

pub mod normalize;
pub mod source;

pub use normalize::{normalize, NormalizeOutcome};
pub use source::RecordSource;
