//! A 0-based, half-open interval upon a single contig.
//!
//! This is the coordinate convention used when querying an
//! [alignment store](crate::store::AlignmentStore).
//!
//! ```text
//! ================ seq0 ===============
//!
//! | 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 |
//! -------------------------------------
//! |   |   | X | X | X | X | O |   |   |  <= seq0:2-6
//! ```
//!
//! The interval above (`seq0:2-6`) covers positions 2 up until (but not
//! including) 6.
//!
//! ## Translating region records
//!
//! Region records are translated into query intervals by subtracting one from
//! _both_ bounds (see [`Interval::try_from_region()`]). Existing region tables
//! depend on this translation, so it is kept exactly as is.

use crate::record::RegionRecord;

/// A contiguous molecule upon which an interval is located.
pub type Contig = String;

/// A 0-based position upon a contig.
pub type Position = usize;

/// An error related to an interval.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The start position is greater than the end position.
    StartGreaterThanEnd(Position, Position),
    /// A region record starts at position zero, which cannot be translated into
    /// a query interval.
    StartBeforeContig(Contig),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::StartGreaterThanEnd(start, end) => write!(
                f,
                "start position ({start}) cannot be greater than the end position ({end})"
            ),
            Error::StartBeforeContig(contig) => write!(
                f,
                "region starts before the beginning of contig {contig}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A 0-based, half-open interval consisting of a contig, a start position, and
/// an end position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Interval {
    /// The contig.
    contig: Contig,

    /// The start position (inclusive).
    start: Position,

    /// The end position (exclusive).
    end: Position,
}

impl Interval {
    /// Attempts to create a new [`Interval`].
    ///
    /// Zero-sized intervals are allowed; an interval with a start position
    /// greater than its end position is not.
    ///
    /// # Examples
    ///
    /// ```
    /// use regioncount::core::Interval;
    ///
    /// let interval = Interval::try_new("chrM", 4999, 5499)?;
    /// assert_eq!(interval.to_string(), "chrM:4999-5499");
    ///
    /// assert!(Interval::try_new("chrM", 10, 9).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        contig: impl Into<Contig>,
        start: Position,
        end: Position,
    ) -> Result<Self, Error> {
        if start > end {
            return Err(Error::StartGreaterThanEnd(start, end));
        }

        Ok(Self {
            contig: contig.into(),
            start,
            end,
        })
    }

    /// Attempts to translate a region record into a query interval.
    ///
    /// The resulting interval is `[chromStart - 1, chromEnd - 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use regioncount::core::Interval;
    /// use regioncount::record::RegionRecord;
    ///
    /// let record = "chrM\t5000\t5500".parse::<RegionRecord>()?;
    /// let interval = Interval::try_from_region(&record)?;
    ///
    /// assert_eq!(interval.contig(), "chrM");
    /// assert_eq!(interval.start(), 4999);
    /// assert_eq!(interval.end(), 5499);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_region(record: &RegionRecord) -> Result<Self, Error> {
        let (start, end) = (record.chrom_start(), record.chrom_end());

        if start > end {
            return Err(Error::StartGreaterThanEnd(start, end));
        }

        match start.checked_sub(1) {
            // `end >= start >= 1`, so `end - 1` cannot underflow.
            Some(start) => Self::try_new(record.chrom(), start, end - 1),
            None => Err(Error::StartBeforeContig(record.chrom().to_string())),
        }
    }

    /// Gets the contig of the interval.
    pub fn contig(&self) -> &str {
        &self.contig
    }

    /// Gets the start position of the interval.
    pub fn start(&self) -> Position {
        self.start
    }

    /// Gets the end position of the interval.
    pub fn end(&self) -> Position {
        self.end
    }

    /// Gets the number of positions covered by the interval.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns whether or not the interval covers zero positions.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.contig, self.start, self.end)
    }
}
