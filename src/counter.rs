//! Counting alignment records that overlap region records.
//!
//! A [`Counter`] can only be created once its [`AlignmentStore`] is indexed,
//! so every query is guaranteed to run after the index exists.

use tracing::debug;
use tracing::info;

use crate::core::Interval;
use crate::reader;
use crate::record::CountedRegion;
use crate::record::RegionRecord;
use crate::store;
use crate::store::AlignmentStore;

/// An error related to a [`Counter`].
#[derive(Debug)]
pub enum Error {
    /// The index of the alignment store could not be built.
    IndexBuild(store::Error),

    /// The alignment store could not be queried for a region.
    Query(String, store::Error),

    /// The regions could not be read.
    Reader(reader::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IndexBuild(err) => write!(f, "index build error: {err}"),
            Error::Query(region, err) => write!(f, "query error for region {region}: {err}"),
            Error::Reader(err) => write!(f, "reader error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Ensures that `store` has a query-capable index, building one if needed.
///
/// This is idempotent: a store that already has an index is left untouched.
pub fn ensure_indexed<S>(store: &mut S) -> Result<()>
where
    S: AlignmentStore,
{
    if store.has_index() {
        return Ok(());
    }

    info!("alignment store has no index, building one");
    store.build_index().map_err(Error::IndexBuild)
}

/// Describes a region record for error messages.
fn describe(record: &RegionRecord) -> String {
    let location = format!(
        "{}:{}-{}",
        record.chrom(),
        record.chrom_start(),
        record.chrom_end()
    );

    match record.name() {
        Some(name) => format!("{name} ({location})"),
        None => location,
    }
}

/// Counts the alignment records overlapping region records.
///
/// # Examples
///
/// ```
/// use regioncount::core::Interval;
/// use regioncount::counter::Counter;
/// use regioncount::store::MemoryStore;
///
/// let mut store = MemoryStore::default();
/// store.push(Interval::try_new("chrM", 4990, 5100)?, "read1");
/// store.push(Interval::try_new("chrM", 5400, 5600)?, "read2");
/// store.push(Interval::try_new("chrM", 5600, 5700)?, "read3");
///
/// let data = b"chrM\t5000\t5500\tPos1\t0\t+\n";
/// let mut reader = regioncount::Reader::new(&data[..]);
///
/// let mut counter = Counter::try_new(&mut store)?;
/// let counted = counter.count_all(reader.records())?;
///
/// assert_eq!(counted.len(), 1);
/// assert_eq!(counted[0].read_count(), 2);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Counter<'a, S>
where
    S: AlignmentStore,
{
    /// The indexed alignment store.
    store: &'a mut S,
}

impl<'a, S> Counter<'a, S>
where
    S: AlignmentStore,
{
    /// Attempts to create a new [`Counter`], indexing `store` first if it has no
    /// index.
    pub fn try_new(store: &'a mut S) -> Result<Self> {
        ensure_indexed(store)?;
        Ok(Self { store })
    }

    /// Counts the alignment records overlapping `record`.
    ///
    /// The store is queried with `[chromStart - 1, chromEnd - 1)` (see
    /// [`Interval::try_from_region()`]). Every record returned counts once;
    /// nothing is filtered or deduplicated.
    pub fn count(&mut self, record: RegionRecord) -> Result<CountedRegion> {
        let interval = Interval::try_from_region(&record)
            .map_err(|err| Error::Query(describe(&record), store::Error::InvalidInterval(err)))?;

        let read_count = self
            .store
            .query(&interval)
            .and_then(|mut records| records.try_fold(0u64, |n, result| result.map(|_| n + 1)))
            .map_err(|err| Error::Query(describe(&record), err))?;

        debug!(region = %describe(&record), %interval, read_count, "counted region");

        Ok(CountedRegion::new(record, read_count))
    }

    /// Counts every region record in `records`, in order.
    ///
    /// This is all-or-nothing: the first error from either the records or the
    /// alignment store is returned and no counts are.
    pub fn count_all<I>(&mut self, records: I) -> Result<Vec<CountedRegion>>
    where
        I: IntoIterator<Item = std::result::Result<RegionRecord, reader::Error>>,
    {
        records
            .into_iter()
            .map(|result| result.map_err(Error::Reader).and_then(|r| self.count(r)))
            .collect()
    }
}
