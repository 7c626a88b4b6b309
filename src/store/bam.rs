//! An alignment store backed by a coordinate-sorted BAM file.

use std::fs;
use std::fs::File;
use std::io;
use std::iter;
use std::path::Path;
use std::path::PathBuf;

use noodles::bam;
use noodles::bgzf;
use noodles::core::Position;
use noodles::core::Region;
use noodles::csi::binning_index::index::reference_sequence::bin::Chunk;
use noodles::csi::binning_index::Indexer;
use noodles::sam;
use noodles::sam::alignment::Record as _;
use noodles::sam::header::record::value::map::header::sort_order;
use noodles::sam::header::record::value::map::header::tag;
use tracing::debug;
use tracing::info;

use crate::core::Interval;
use crate::store::AlignmentStore;
use crate::store::Error;
use crate::store::Query;
use crate::store::Result;

/// The extension of a BAM index.
const BAI_EXTENSION: &str = "bai";

/// The extension of a coordinate-sorted index.
const CSI_EXTENSION: &str = "csi";

/// An opened, indexed BAM reader.
type IndexedReader = bam::io::IndexedReader<bgzf::Reader<File>>;

/// The reference sequence, start, end and mapped state of a record.
type AlignmentContext = (usize, Position, Position, bool);

/// An alignment store backed by a BAM file on disk.
///
/// An index is picked up from `<src>.bai`, `<src>.csi`, or a `.bai` file that
/// replaces the `.bam` extension. If none exists,
/// [`AlignmentStore::build_index()`] writes `<src>.bai`.
pub struct BamStore {
    /// The path to the BAM file.
    src: PathBuf,

    /// The indexed reader and the header, opened on the first query.
    inner: Option<(IndexedReader, sam::Header)>,
}

impl BamStore {
    /// Opens a BAM store.
    ///
    /// Nothing is read until the store is indexed or queried.
    pub fn open(src: impl Into<PathBuf>) -> Result<Self> {
        let src = src.into();

        if !src.is_file() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("alignment file not found: {}", src.display()),
            )));
        }

        Ok(Self { src, inner: None })
    }

    /// Gets the path to the BAM file.
    pub fn src(&self) -> &Path {
        &self.src
    }

    /// Gets the path of the index with the given extension appended.
    fn index_path(&self, extension: &str) -> PathBuf {
        let mut path = self.src.clone().into_os_string();
        path.push(".");
        path.push(extension);
        PathBuf::from(path)
    }

    /// Gets the path of an existing index, if any.
    fn find_index(&self) -> Option<PathBuf> {
        [
            self.index_path(BAI_EXTENSION),
            self.index_path(CSI_EXTENSION),
            self.src.with_extension(BAI_EXTENSION),
        ]
        .into_iter()
        .find(|path| path.is_file())
    }

    /// Opens the indexed reader and reads the header.
    fn open_indexed(&self) -> Result<(IndexedReader, sam::Header)> {
        let index_src = self.find_index().ok_or(Error::MissingIndex)?;

        debug!(
            src = %self.src.display(),
            index = %index_src.display(),
            "opening indexed alignment file"
        );

        let mut builder = bam::io::indexed_reader::Builder::default();

        // Only appended extensions are found by the builder itself.
        if index_src == self.src.with_extension(BAI_EXTENSION) {
            let index = bam::bai::read(&index_src).map_err(Error::Io)?;
            builder = builder.set_index(index);
        }

        let mut reader = builder.build_from_path(&self.src).map_err(Error::Io)?;
        let header = reader.read_header().map_err(Error::Io)?;

        Ok((reader, header))
    }

    /// Gets the indexed reader and the header, opening them if needed.
    fn indexed(&mut self) -> Result<(&mut IndexedReader, &sam::Header)> {
        let inner = match self.inner.take() {
            Some(inner) => inner,
            None => self.open_indexed()?,
        };

        let (reader, header) = self.inner.insert(inner);
        Ok((reader, header))
    }
}

impl std::fmt::Debug for BamStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BamStore")
            .field("src", &self.src)
            .field("opened", &self.inner.is_some())
            .finish()
    }
}

impl AlignmentStore for BamStore {
    type Record = bam::Record;

    fn has_index(&self) -> bool {
        self.find_index().is_some()
    }

    fn build_index(&mut self) -> Result<()> {
        let dst = self.index_path(BAI_EXTENSION);
        info!(src = %self.src.display(), dst = %dst.display(), "building alignment index");

        let index = index(&self.src).map_err(Error::IndexBuild)?;

        if let Err(err) = bam::bai::write(&dst, &index) {
            // Never leave a partial index behind.
            let _ = fs::remove_file(&dst);
            return Err(Error::IndexBuild(err));
        }

        self.inner = None;

        Ok(())
    }

    fn query(&mut self, interval: &Interval) -> Result<Query<'_, Self::Record>> {
        let (reader, header) = self.indexed()?;

        if !header
            .reference_sequences()
            .contains_key(interval.contig().as_bytes())
        {
            return Err(Error::UnknownContig(interval.contig().to_string()));
        }

        let Some(region) = to_region(interval) else {
            return Ok(Box::new(iter::empty()));
        };

        let records = reader.query(header, &region).map_err(Error::Io)?;

        Ok(Box::new(records.map(|result| result.map_err(Error::Io))))
    }
}

/// Returns whether or not the header declares a coordinate sort order.
fn is_coordinate_sorted(header: &sam::Header) -> bool {
    header
        .header()
        .and_then(|hd| hd.other_fields().get(&tag::SORT_ORDER))
        .map(|value| value == sort_order::COORDINATE)
        .unwrap_or_default()
}

/// Gets the alignment context of a record, if it is placed.
fn alignment_context(record: &bam::Record) -> io::Result<Option<AlignmentContext>> {
    let id = record.reference_sequence_id().transpose()?;
    let start = record.alignment_start().transpose()?;
    let end = record.alignment_end().transpose()?;

    Ok(match (id, start, end) {
        (Some(id), Some(start), Some(end)) => {
            Some((id, start, end, !record.flags().is_unmapped()))
        }
        _ => None,
    })
}

/// Builds a BAM index by reading every record of the BAM file at `src`.
fn index(src: &Path) -> io::Result<bam::bai::Index> {
    let mut reader = bam::io::reader::Builder::default().build_from_path(src)?;
    let header = reader.read_header()?;

    if !is_coordinate_sorted(&header) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "the alignment file is not coordinate-sorted (expected `SO:coordinate`)",
        ));
    }

    let mut indexer = Indexer::default();
    let mut record = bam::Record::default();
    let mut start = reader.get_ref().virtual_position();

    while reader.read_record(&mut record)? != 0 {
        let end = reader.get_ref().virtual_position();
        indexer.add_record(alignment_context(&record)?, Chunk::new(start, end))?;
        start = end;
    }

    Ok(indexer.build(header.reference_sequences().len()))
}

/// Converts a 0-based, half-open interval into a 1-based, closed region.
///
/// An empty interval covers no positions, so it has no region.
fn to_region(interval: &Interval) -> Option<Region> {
    if interval.is_empty() {
        return None;
    }

    let start = Position::new(interval.start() + 1)?;
    let end = Position::new(interval.end())?;

    Some(Region::new(interval.contig(), start..=end))
}

#[cfg(test)]
mod tests {
    use noodles::sam::alignment::io::Write as _;
    use noodles::sam::alignment::record::cigar::op::Kind;
    use noodles::sam::alignment::record::cigar::Op;
    use noodles::sam::alignment::record::Flags;
    use noodles::sam::alignment::RecordBuf;

    use super::*;
    use crate::counter;
    use crate::counter::Counter;

    /// Writes a BAM file with 50-base reads on chrM at the given 1-based
    /// starts.
    fn write_bam(
        src: &Path,
        sort_order: &str,
        starts: &[usize],
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let header: sam::Header =
            format!("@HD\tVN:1.6\tSO:{sort_order}\n@SQ\tSN:chrM\tLN:16569\n").parse()?;

        let mut writer = bam::io::Writer::new(File::create(src)?);
        writer.write_header(&header)?;

        for &start in starts {
            let record = RecordBuf::builder()
                .set_flags(Flags::empty())
                .set_reference_sequence_id(0)
                .set_alignment_start(Position::try_from(start)?)
                .set_cigar([Op::new(Kind::Match, 50)].into_iter().collect())
                .build();

            writer.write_alignment_record(&header, &record)?;
        }

        writer.try_finish()?;

        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = BamStore::open("does/not/exist.bam").unwrap_err();
        assert_eq!(
            err.to_string(),
            "i/o error: alignment file not found: does/not/exist.bam"
        );
    }

    #[test]
    fn test_index_detection() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("sample.bam");
        fs::write(&src, b"")?;

        let store = BamStore::open(&src)?;
        assert!(!store.has_index());

        fs::write(dir.path().join("sample.bam.csi"), b"")?;
        assert!(store.has_index());

        fs::remove_file(dir.path().join("sample.bam.csi"))?;
        assert!(!store.has_index());

        fs::write(dir.path().join("sample.bai"), b"")?;
        assert!(store.has_index());

        Ok(())
    }

    #[test]
    fn test_query_without_index() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("sample.bam");
        fs::write(&src, b"")?;

        let mut store = BamStore::open(&src)?;
        let interval = Interval::try_new("chrM", 0, 10)?;
        assert!(matches!(store.query(&interval), Err(Error::MissingIndex)));

        Ok(())
    }

    #[test]
    fn test_build_index_on_invalid_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("sample.bam");
        fs::write(&src, b"not a bam file")?;

        let mut store = BamStore::open(&src)?;
        assert!(matches!(store.build_index(), Err(Error::IndexBuild(_))));
        assert!(!store.has_index());

        Ok(())
    }

    #[test]
    fn test_counting_with_built_index() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("sample.bam");
        write_bam(&src, "coordinate", &[4950, 4951, 5200, 5499, 5500])?;

        let mut store = BamStore::open(&src)?;
        assert!(!store.has_index());

        let mut counter = Counter::try_new(&mut store)?;

        // Queried as [4999, 5499). The read at [4949, 4999) ends right before it.
        let counted = counter.count("chrM 5000 5500".parse()?)?;
        assert_eq!(counted.read_count(), 3);

        let counted = counter.count("chrM 5501 5600".parse()?)?;
        assert_eq!(counted.read_count(), 2);

        let counted = counter.count("chrM 5600 5600".parse()?)?;
        assert_eq!(counted.read_count(), 0);

        let err = counter.count("chr1 1 100".parse()?).unwrap_err();
        assert_eq!(
            err.to_string(),
            "query error for region chr1:1-100: unknown contig: chr1"
        );

        let bai = dir.path().join("sample.bam.bai");
        assert!(bai.is_file());

        let modified = fs::metadata(&bai)?.modified()?;
        counter::ensure_indexed(&mut store)?;
        assert_eq!(fs::metadata(&bai)?.modified()?, modified);

        Ok(())
    }

    #[test]
    fn test_index_with_replaced_extension() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("sample.bam");
        write_bam(&src, "coordinate", &[100, 200, 300])?;

        BamStore::open(&src)?.build_index()?;
        fs::rename(
            dir.path().join("sample.bam.bai"),
            dir.path().join("sample.bai"),
        )?;

        let mut store = BamStore::open(&src)?;
        assert!(store.has_index());

        let counted = Counter::try_new(&mut store)?.count("chrM 150 310".parse()?)?;
        assert_eq!(counted.read_count(), 2);
        assert!(!dir.path().join("sample.bam.bai").exists());

        Ok(())
    }

    #[test]
    fn test_unsorted_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let src = dir.path().join("sample.bam");
        write_bam(&src, "unsorted", &[300, 100])?;

        let mut store = BamStore::open(&src)?;
        let err = Counter::try_new(&mut store).unwrap_err();
        assert!(matches!(
            err,
            counter::Error::IndexBuild(Error::IndexBuild(_))
        ));
        assert!(!store.has_index());

        Ok(())
    }

    #[test]
    fn test_to_region() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let region = to_region(&Interval::try_new("chrM", 4999, 5499)?);
        assert_eq!(region.map(|r| r.to_string()).as_deref(), Some("chrM:5000-5499"));

        assert!(to_region(&Interval::try_new("chrM", 10, 10)?).is_none());

        Ok(())
    }
}
