//! Data sources: where the raw (name, role) list comes from.

pub mod clean;
pub mod tsv;

pub use tsv::TsvSource;

use crate::record::Record;

/// Produces the raw record list. Implementations own any cleaning of stray
/// whitespace and control characters.
pub trait DataSource {
    fn fetch(&self) -> anyhow::Result<Vec<Record>>;
}
