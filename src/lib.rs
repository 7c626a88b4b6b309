//! `regioncount` is a crate for counting the sequencing reads that overlap a set
//! of genomic regions.
//!
//! The crate provides two main points of entry:
//!
//! - Parsing and validating region tables (BED-style files).
//! - Counting, for each region, the alignment records in an indexed alignment
//!   store that overlap it.
//!
//! ## Reading region tables
//!
//! The [`Reader`] facility reads region tables from any
//! [`BufRead`](std::io::BufRead), and [`Reader::from_path()`] opens one from
//! disk, decompressing it when the file name ends in `.bed.gz`. Iterating over
//! [`Reader::records()`] lazily yields validated
//! [`RegionRecord`](crate::record::RegionRecord)s.
//!
//! Region tables carry no declared schema. Instead, the first data line fixes
//! the number of columns, and every following line must match it. Leading
//! `#`, `browser`, and `track` lines are skipped, and a blank line ends the
//! data.
//!
//! ```
//! let data = b"track name=example\nchrM\t5000\t5500\tPos1\t0\t+\nchrM\t6000\t6500\tPos2\t0\t+\n";
//! let mut reader = regioncount::Reader::new(&data[..]);
//!
//! for result in reader.records() {
//!     let record = result?;
//!     println!("{}:{}-{}", record.chrom(), record.chrom_start(), record.chrom_end());
//! }
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Counting reads
//!
//! Alignment records live in an [`AlignmentStore`](store::AlignmentStore),
//! such as a [`BamStore`](store::BamStore) on disk or a
//! [`MemoryStore`](store::MemoryStore). A [`counter::Counter`] first makes
//! sure the store is indexed and then queries it once per region, in order.
//!
//! ```
//! use regioncount::core::Interval;
//! use regioncount::store::MemoryStore;
//!
//! let mut store = MemoryStore::default();
//! store.push(Interval::try_new("chrM", 5100, 5200)?, "read1");
//! store.push(Interval::try_new("chrM", 6100, 6200)?, "read2");
//! store.push(Interval::try_new("chrM", 6300, 6400)?, "read3");
//!
//! let data = b"chrM\t5000\t5500\tPos1\t0\t+\nchrM\t6000\t6500\tPos2\t0\t+\n";
//! let mut reader = regioncount::Reader::new(&data[..]);
//!
//! let mut counter = regioncount::counter::Counter::try_new(&mut store)?;
//! let counts = counter
//!     .count_all(reader.records())?
//!     .into_iter()
//!     .map(|counted| counted.read_count())
//!     .collect::<Vec<_>>();
//!
//! assert_eq!(counts, vec![1, 2]);
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

use std::path::Path;

pub mod core;
pub mod counter;
pub mod format;
pub mod reader;
pub mod record;
pub mod store;

pub use self::reader::Reader;

/// Counts the alignment records in `store` overlapping each region of the
/// region table at `path`.
///
/// The region table is opened and closed within this call. The store is
/// indexed first if it has no index. Either every region is counted or an
/// error is returned.
pub fn count_reads<P, S>(
    path: P,
    store: &mut S,
) -> Result<Vec<record::CountedRegion>, counter::Error>
where
    P: AsRef<Path>,
    S: store::AlignmentStore,
{
    let mut reader = Reader::from_path(path).map_err(counter::Error::Reader)?;
    let mut counter = counter::Counter::try_new(store)?;
    counter.count_all(reader.records())
}
