//! A region record paired with its read count.

use crate::record::RegionRecord;

/// A [`RegionRecord`] along with the number of alignment records overlapping
/// it.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CountedRegion {
    /// The region.
    #[cfg_attr(feature = "serde", serde(flatten))]
    region: RegionRecord,

    /// The number of overlapping alignment records.
    #[cfg_attr(feature = "serde", serde(rename = "readCount"))]
    read_count: u64,
}

impl CountedRegion {
    /// Creates a new [`CountedRegion`].
    ///
    /// # Examples
    ///
    /// ```
    /// use regioncount::record::CountedRegion;
    /// use regioncount::record::RegionRecord;
    ///
    /// let region = "chrM 5000 5500 Pos1 0 +".parse::<RegionRecord>()?;
    /// let counted = CountedRegion::new(region, 15);
    ///
    /// assert_eq!(counted.region().name(), Some("Pos1"));
    /// assert_eq!(counted.read_count(), 15);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(region: RegionRecord, read_count: u64) -> Self {
        Self { region, read_count }
    }

    /// Gets the region.
    pub fn region(&self) -> &RegionRecord {
        &self.region
    }

    /// Gets the number of overlapping alignment records.
    pub fn read_count(&self) -> u64 {
        self.read_count
    }

    /// Consumes self and returns the region and the read count.
    pub fn into_parts(self) -> (RegionRecord, u64) {
        (self.region, self.read_count)
    }
}
