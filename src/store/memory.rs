//! An in-memory alignment store.

use std::collections::HashMap;
use std::io;

use rust_lapper as lapper;

use crate::core::Contig;
use crate::core::Interval;
use crate::store::AlignmentStore;
use crate::store::Error;
use crate::store::Query;
use crate::store::Result;

/// The inner value of the lookup data structure.
type Iv = lapper::Interval<usize, String>;

/// An alignment store that keeps named alignment intervals in memory.
///
/// Like a coordinate-sorted alignment file, records must be pushed in
/// ascending order of their start position within each contig, or building the
/// index will fail.
///
/// # Examples
///
/// ```
/// use regioncount::core::Interval;
/// use regioncount::store::AlignmentStore;
/// use regioncount::store::MemoryStore;
///
/// let mut store = MemoryStore::default();
/// store.push(Interval::try_new("chrM", 10, 110)?, "read1");
/// store.push(Interval::try_new("chrM", 50, 150)?, "read2");
/// store.build_index()?;
///
/// let names = store
///     .query(&Interval::try_new("chrM", 120, 200)?)?
///     .collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(names, vec![String::from("read2")]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// The records for each contig in insertion order.
    records: HashMap<Contig, Vec<Iv>>,

    /// The lookup table for each contig, once built.
    index: Option<HashMap<Contig, lapper::Lapper<usize, String>>>,
}

impl MemoryStore {
    /// Registers a reference sequence that may have no records.
    pub fn add_reference_sequence(&mut self, name: impl Into<Contig>) {
        self.records.entry(name.into()).or_default();
        self.index = None;
    }

    /// Adds a named alignment record.
    ///
    /// Adding a record invalidates any existing index.
    pub fn push(&mut self, interval: Interval, name: impl Into<String>) {
        self.records
            .entry(interval.contig().to_string())
            .or_default()
            .push(lapper::Interval {
                start: interval.start(),
                stop: interval.end(),
                val: name.into(),
            });
        self.index = None;
    }
}

impl AlignmentStore for MemoryStore {
    type Record = String;

    fn has_index(&self) -> bool {
        self.index.is_some()
    }

    fn build_index(&mut self) -> Result<()> {
        let mut index = HashMap::with_capacity(self.records.len());

        for (contig, records) in &self.records {
            if !records.windows(2).all(|w| w[0].start <= w[1].start) {
                return Err(Error::IndexBuild(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("records on {contig} are not sorted by coordinate"),
                )));
            }

            index.insert(contig.clone(), lapper::Lapper::new(records.clone()));
        }

        self.index = Some(index);
        Ok(())
    }

    fn query(&mut self, interval: &Interval) -> Result<Query<'_, Self::Record>> {
        let index = self.index.as_ref().ok_or(Error::MissingIndex)?;

        let lapper = index
            .get(interval.contig())
            .ok_or_else(|| Error::UnknownContig(interval.contig().to_string()))?;

        if interval.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }

        Ok(Box::new(
            lapper
                .find(interval.start(), interval.end())
                .map(|iv| Ok(iv.val.clone())),
        ))
    }
}
