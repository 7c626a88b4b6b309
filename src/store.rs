//! Indexed stores of alignment records.
//!
//! An [`AlignmentStore`] is an externally owned collection of alignment
//! records that can be queried by contig and interval once an index exists.
//! The contents of a store are never modified; building an index is the only
//! side effect a caller can trigger.

pub mod bam;
pub mod memory;

use std::io;

pub use bam::BamStore;
pub use memory::MemoryStore;

use crate::core::interval;
use crate::core::Interval;

/// An error related to an [`AlignmentStore`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// The index could not be built.
    IndexBuild(io::Error),

    /// The store was queried before an index was built.
    MissingIndex,

    /// The contig is not known to the store.
    UnknownContig(String),

    /// The interval could not be queried.
    InvalidInterval(interval::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::IndexBuild(err) => write!(f, "could not build index: {err}"),
            Error::MissingIndex => write!(f, "the store has not been indexed"),
            Error::UnknownContig(contig) => write!(f, "unknown contig: {contig}"),
            Error::InvalidInterval(err) => write!(f, "invalid interval: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The records returned by [`AlignmentStore::query()`].
pub type Query<'a, R> = Box<dyn Iterator<Item = Result<R>> + 'a>;

/// An indexed collection of alignment records.
pub trait AlignmentStore {
    /// The type of record returned from a query.
    type Record;

    /// Returns whether or not a query-capable index exists.
    fn has_index(&self) -> bool;

    /// Builds the index.
    ///
    /// This is a store-level side effect and fails if the underlying records
    /// cannot be indexed (e.g., they are not sorted by coordinate).
    fn build_index(&mut self) -> Result<()>;

    /// Queries the records overlapping the 0-based, half-open `interval`.
    fn query(&mut self, interval: &Interval) -> Result<Query<'_, Self::Record>>;
}
