//! The columns of a region table.

/// The number of required columns in a region record.
pub const NUM_REQUIRED_COLUMNS: usize = 3;

/// The maximum number of columns in a region record. Any fields past this
/// number are ignored.
pub const MAX_COLUMNS: usize = 12;

/// A column of a region table.
///
/// Columns are positional: the `n`th whitespace-delimited field of a line
/// always maps onto the `n`th entry of [`Column::ALL`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Column {
    /// The name of the reference sequence.
    Chrom,
    /// The 0-based, inclusive start position.
    ChromStart,
    /// The exclusive end position.
    ChromEnd,
    /// The name of the region.
    Name,
    /// The score of the region.
    Score,
    /// The strand of the region.
    Strand,
    /// The start of the thickly drawn part of the region.
    ThickStart,
    /// The end of the thickly drawn part of the region.
    ThickEnd,
    /// The display color of the region.
    ItemRgb,
    /// The number of blocks in the region.
    BlockCount,
    /// The comma-separated sizes of the blocks.
    BlockSizes,
    /// The comma-separated starts of the blocks.
    BlockStarts,
}

impl Column {
    /// Every column in positional order.
    pub const ALL: [Column; MAX_COLUMNS] = [
        Column::Chrom,
        Column::ChromStart,
        Column::ChromEnd,
        Column::Name,
        Column::Score,
        Column::Strand,
        Column::ThickStart,
        Column::ThickEnd,
        Column::ItemRgb,
        Column::BlockCount,
        Column::BlockSizes,
        Column::BlockStarts,
    ];

    /// Gets the name of the column as written in region table documentation.
    ///
    /// # Examples
    ///
    /// ```
    /// use regioncount::record::Column;
    ///
    /// assert_eq!(Column::ChromStart.name(), "chromStart");
    /// assert_eq!(Column::ALL[5].name(), "strand");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Column::Chrom => "chrom",
            Column::ChromStart => "chromStart",
            Column::ChromEnd => "chromEnd",
            Column::Name => "name",
            Column::Score => "score",
            Column::Strand => "strand",
            Column::ThickStart => "thickStart",
            Column::ThickEnd => "thickEnd",
            Column::ItemRgb => "itemRgb",
            Column::BlockCount => "blockCount",
            Column::BlockSizes => "blockSizes",
            Column::BlockStarts => "blockStarts",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
