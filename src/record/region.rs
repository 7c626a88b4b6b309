//! A region record.

use std::num::ParseIntError;
use std::str::FromStr;

use crate::core::Position;
use crate::core::Strand;
use crate::record::column::Column;
use crate::record::column::MAX_COLUMNS;
use crate::record::column::NUM_REQUIRED_COLUMNS;

/// The delimiter used when displaying a region record.
pub const REGION_DELIMITER: char = '\t';

/// An error associated with parsing a region record.
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// A required column was not present.
    MissingColumn(Column),
    /// A column that must contain an integer did not.
    InvalidInteger(Column, ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingColumn(column) => write!(
                f,
                "missing required column `{}`: expected at least {} fields",
                column, NUM_REQUIRED_COLUMNS
            ),
            ParseError::InvalidInteger(column, err) => {
                write!(f, "invalid integer in column `{}`: {}", column, err)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A single entry within a region table.
///
/// Optional columns are populated positionally, so if a column is present,
/// every column before it is present as well.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RegionRecord {
    /// The number of populated columns.
    #[cfg_attr(feature = "serde", serde(skip))]
    num_columns: usize,

    /// The name of the reference sequence.
    chrom: String,
    /// The start position.
    chrom_start: Position,
    /// The end position.
    chrom_end: Position,

    /// The name of the region.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    name: Option<String>,
    /// The score of the region.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    score: Option<i64>,
    /// The strand of the region.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    strand: Option<Strand>,
    /// The raw `thickStart` value.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    thick_start: Option<String>,
    /// The raw `thickEnd` value.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    thick_end: Option<String>,
    /// The raw `itemRgb` value.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    item_rgb: Option<String>,
    /// The raw `blockCount` value.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    block_count: Option<String>,
    /// The raw `blockSizes` value.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    block_sizes: Option<String>,
    /// The raw `blockStarts` value.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    block_starts: Option<String>,
}

impl RegionRecord {
    /// Gets the number of populated columns.
    ///
    /// # Examples
    ///
    /// ```
    /// use regioncount::record::RegionRecord;
    ///
    /// let record = "chrM 5000 5500 Pos1 0 +".parse::<RegionRecord>()?;
    /// assert_eq!(record.num_columns(), 6);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Gets the populated columns in positional order.
    pub fn columns(&self) -> &'static [Column] {
        &Column::ALL[..self.num_columns]
    }

    /// Gets the name of the reference sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use regioncount::record::RegionRecord;
    ///
    /// let record = "chrM 5000 5500".parse::<RegionRecord>()?;
    /// assert_eq!(record.chrom(), "chrM");
    /// assert_eq!(record.chrom_start(), 5000);
    /// assert_eq!(record.chrom_end(), 5500);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    /// Gets the start position.
    pub fn chrom_start(&self) -> Position {
        self.chrom_start
    }

    /// Gets the end position.
    pub fn chrom_end(&self) -> Position {
        self.chrom_end
    }

    /// Gets the name of the region, if present.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Gets the score of the region, if present.
    pub fn score(&self) -> Option<i64> {
        self.score
    }

    /// Gets the strand of the region, if present.
    ///
    /// # Examples
    ///
    /// ```
    /// use regioncount::core::Strand;
    /// use regioncount::record::RegionRecord;
    ///
    /// let record = "chrM 5000 5500 Pos1 0 -".parse::<RegionRecord>()?;
    /// assert_eq!(record.strand(), Some(&Strand::Negative));
    ///
    /// let record = "chrM 5000 5500 Pos1 0".parse::<RegionRecord>()?;
    /// assert_eq!(record.strand(), None);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn strand(&self) -> Option<&Strand> {
        self.strand.as_ref()
    }

    /// Gets the raw `thickStart` value, if present.
    pub fn thick_start(&self) -> Option<&str> {
        self.thick_start.as_deref()
    }

    /// Gets the raw `thickEnd` value, if present.
    pub fn thick_end(&self) -> Option<&str> {
        self.thick_end.as_deref()
    }

    /// Gets the raw `itemRgb` value, if present.
    pub fn item_rgb(&self) -> Option<&str> {
        self.item_rgb.as_deref()
    }

    /// Gets the raw `blockCount` value, if present.
    pub fn block_count(&self) -> Option<&str> {
        self.block_count.as_deref()
    }

    /// Gets the raw `blockSizes` value, if present.
    pub fn block_sizes(&self) -> Option<&str> {
        self.block_sizes.as_deref()
    }

    /// Gets the raw `blockStarts` value, if present.
    pub fn block_starts(&self) -> Option<&str> {
        self.block_starts.as_deref()
    }
}

/// Parses a required position column.
fn parse_position(value: Option<&str>, column: Column) -> Result<Position, ParseError> {
    value
        .ok_or(ParseError::MissingColumn(column))?
        .parse()
        .map_err(|e| ParseError::InvalidInteger(column, e))
}

impl FromStr for RegionRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace().take(MAX_COLUMNS);

        let chrom = fields
            .next()
            .ok_or(ParseError::MissingColumn(Column::Chrom))?
            .to_string();
        let chrom_start = parse_position(fields.next(), Column::ChromStart)?;
        let chrom_end = parse_position(fields.next(), Column::ChromEnd)?;

        let name = fields.next().map(String::from);
        let score = fields
            .next()
            .map(|v| v.parse().map_err(|e| ParseError::InvalidInteger(Column::Score, e)))
            .transpose()?;
        let strand = fields.next().map(Strand::from);

        let mut raw = || fields.next().map(String::from);
        let thick_start = raw();
        let thick_end = raw();
        let item_rgb = raw();
        let block_count = raw();
        let block_sizes = raw();
        let block_starts = raw();

        let optional = [
            name.is_some(),
            score.is_some(),
            strand.is_some(),
            thick_start.is_some(),
            thick_end.is_some(),
            item_rgb.is_some(),
            block_count.is_some(),
            block_sizes.is_some(),
            block_starts.is_some(),
        ];

        Ok(RegionRecord {
            num_columns: NUM_REQUIRED_COLUMNS + optional.iter().filter(|v| **v).count(),
            chrom,
            chrom_start,
            chrom_end,
            name,
            score,
            strand,
            thick_start,
            thick_end,
            item_rgb,
            block_count,
            block_sizes,
            block_starts,
        })
    }
}

impl std::fmt::Display for RegionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = vec![
            self.chrom.clone(),
            self.chrom_start.to_string(),
            self.chrom_end.to_string(),
        ];

        parts.extend(self.name.clone());
        parts.extend(self.score.map(|v| v.to_string()));
        parts.extend(self.strand.as_ref().map(|v| v.to_string()));
        parts.extend(
            [
                &self.thick_start,
                &self.thick_end,
                &self.item_rgb,
                &self.block_count,
                &self.block_sizes,
                &self.block_starts,
            ]
            .into_iter()
            .flatten()
            .cloned(),
        );

        write!(f, "{}", parts.join(REGION_DELIMITER.to_string().as_str()))
    }
}
