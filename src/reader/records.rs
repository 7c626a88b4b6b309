//! An iterator over the [region records](crate::record::RegionRecord) of a
//! region table.

use std::io::BufRead;

use tracing::debug;

use crate::reader::Error;
use crate::record::RegionRecord;
use crate::Reader;

/// The prefixes of metadata lines that may precede the first data line.
pub const METADATA_PREFIXES: [&str; 3] = ["#", "browser", "track"];

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// The state of the iterator.
#[derive(Debug)]
enum State {
    /// No data line has been read yet, so metadata lines are still skipped.
    Preamble,

    /// The first data line has been read and fixed the number of fields.
    Body(usize),

    /// The end of the data was reached or an error occurred.
    Done,
}

/// A lazy iterator over the region records of a region table.
///
/// The first data line determines the number of fields that every following
/// line must have. Iteration ends at the first blank line, at the end of the
/// input, or after the first error.
#[derive(Debug)]
pub struct Records<'a, T>
where
    T: BufRead,
{
    /// The inner reader.
    reader: &'a mut Reader<T>,

    /// The state of the iterator.
    state: State,

    /// The line number.
    line_no: usize,

    /// The line buffer.
    buffer: String,
}

impl<'a, T> Records<'a, T>
where
    T: BufRead,
{
    /// Creates a new [`Records`].
    pub(crate) fn new(reader: &'a mut Reader<T>) -> Self {
        Self {
            reader,
            state: State::Preamble,
            line_no: 0usize,
            buffer: String::new(),
        }
    }

    /// Checks the line in the buffer against the number of fields established
    /// by the first data line and then parses it.
    ///
    /// Once the schema is fixed, a line with a different number of fields is
    /// a schema error even if it would also fail to parse.
    fn parse_buffer(&mut self) -> Result<RegionRecord> {
        let found = self.buffer.split_whitespace().count();

        if let State::Body(expected) = self.state {
            if expected != found {
                return Err(Error::Schema {
                    expected,
                    found,
                    line_no: self.line_no,
                    line: self.buffer.clone(),
                });
            }
        }

        let record = self
            .buffer
            .parse::<RegionRecord>()
            .map_err(|err| Error::Validation {
                err,
                line_no: self.line_no,
                line: self.buffer.clone(),
            })?;

        if let State::Preamble = self.state {
            debug!(
                line_no = self.line_no,
                fields = found,
                "first data line fixes the region table schema"
            );
            self.state = State::Body(found);
        }

        Ok(record)
    }
}

impl<T> Iterator for Records<'_, T>
where
    T: BufRead,
{
    type Item = Result<RegionRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let State::Done = self.state {
                return None;
            }

            match self.reader.read_line_raw(&mut self.buffer) {
                Ok(0) => {
                    self.state = State::Done;
                    return None;
                }
                Ok(_) => self.line_no += 1,
                Err(err) => {
                    self.state = State::Done;
                    return Some(Err(Error::Io(err)));
                }
            }

            if let State::Preamble = self.state {
                if is_metadata(&self.buffer) {
                    continue;
                }
            }

            if self.buffer.trim().is_empty() {
                self.state = State::Done;
                return None;
            }

            let result = self.parse_buffer();

            if result.is_err() {
                self.state = State::Done;
            }

            return Some(result);
        }
    }
}

impl<T> std::iter::FusedIterator for Records<'_, T> where T: BufRead {}

/// Returns whether or not a line is a metadata line.
fn is_metadata(line: &str) -> bool {
    METADATA_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Strand;

    /// Collects every item of the iterator, including errors.
    fn read_all(data: &[u8]) -> Vec<Result<RegionRecord>> {
        let mut reader = Reader::new(data);
        reader.records().collect()
    }

    #[test]
    fn test_valid_records() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"chrM\t5000\t5500\tPos1\t0\t+\nchrM\t6000\t6500\tPos2\t0\t+\n";
        let records = read_all(data)
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        assert_eq!(records.len(), 2);

        assert_eq!(records[0].chrom(), "chrM");
        assert_eq!(records[0].chrom_start(), 5000);
        assert_eq!(records[0].chrom_end(), 5500);
        assert_eq!(records[0].name(), Some("Pos1"));
        assert_eq!(records[0].score(), Some(0));
        assert_eq!(records[0].strand(), Some(&Strand::Positive));

        assert_eq!(records[1].chrom_start(), 6000);
        assert_eq!(records[1].chrom_end(), 6500);
        assert_eq!(records[1].name(), Some("Pos2"));

        Ok(())
    }

    #[test]
    fn test_metadata_lines_are_skipped() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"# a comment\nbrowser position chrM:1-100\ntrack name=\"regions\"\nchrM 1 2\n";
        let records = read_all(data)
            .into_iter()
            .collect::<Result<Vec<_>>>()?;
        assert_eq!(records.len(), 1);
        Ok(())
    }

    #[test]
    fn test_metadata_after_data_is_data() {
        let data = b"chrM 1 2\n# not skipped here\n";
        let mut results = read_all(data);

        assert_eq!(results.len(), 2);
        let err = results.pop().unwrap().unwrap_err();
        assert!(matches!(err, Error::Schema { line_no: 2, .. }));

        let data = b"chrM 1 2\n# not skip\n";
        let mut results = read_all(data);

        assert_eq!(results.len(), 2);
        let err = results.pop().unwrap().unwrap_err();
        assert!(matches!(err, Error::Validation { line_no: 2, .. }));
    }

    #[test]
    fn test_only_metadata() {
        let data = b"# a comment\ntrack name=empty\n";
        assert!(read_all(data).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(read_all(b"").is_empty());
    }

    #[test]
    fn test_blank_line_ends_data() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"chrM 1 2\n   \t \nchrM 3 4\nthis is not a region\n";
        let records = read_all(data)
            .into_iter()
            .collect::<Result<Vec<_>>>()?;
        assert_eq!(records.len(), 1);
        Ok(())
    }

    #[test]
    fn test_inconsistent_number_of_columns() {
        let data = b"chrM\t5000\t5500\tPos1\t0\t+\nchrM\t6000\t6500\tPos2\nchrM\t7000\t7500\tPos3\t0\t+\n";
        let mut results = read_all(data);

        // The schema error ends iteration.
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());

        let err = results.pop().unwrap().unwrap_err();
        assert_eq!(
            err.to_string(),
            "schema error: the number of columns is inconsistent at line 2: expected 6 \
             fields, found 4 fields\n\nline: chrM\t6000\t6500\tPos2"
        );
    }

    #[test]
    fn test_short_second_line_is_a_schema_error() {
        let data = b"chrM\t5000\t5500\tPos1\t0\t+\nchrM\t6000\n";
        let mut results = read_all(data);

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());

        let err = results.pop().unwrap().unwrap_err();
        assert_eq!(
            err.to_string(),
            "schema error: the number of columns is inconsistent at line 2: expected 6 \
             fields, found 2 fields\n\nline: chrM\t6000"
        );
    }

    #[test]
    fn test_noninteger_position() {
        let data = b"#header\nchrM\t5000\t5500\tPos1\t0\t+\nchrM\tsix\t6500\tPos2\t0\t+\nchrM\t1\t2\tPos3\t0\t+\n";
        let mut results = read_all(data);

        assert_eq!(results.len(), 2);

        let err = results.pop().unwrap().unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: invalid region record at line 3: invalid integer in column \
             `chromStart`: invalid digit found in string\n\nline: chrM\tsix\t6500\tPos2\t0\t+"
        );
    }

    #[test]
    fn test_noninteger_score_in_first_line() {
        let data = b"chrM 5000 5500 Pos1 zero +\n";
        let mut results = read_all(data);

        assert_eq!(results.len(), 1);
        let err = results.pop().unwrap().unwrap_err();
        assert!(matches!(err, Error::Validation { line_no: 1, .. }));
    }

    #[test]
    fn test_extra_columns_count_towards_schema() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let data = b"c 1 2 n 0 + 1 2 0 1 1, 0, x\nc 3 4 n 0 + 3 4 0 1 1, 0, y\n";
        let records = read_all(data)
            .into_iter()
            .collect::<Result<Vec<_>>>()?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].num_columns(), 12);

        let data = b"c 1 2 n 0 + 1 2 0 1 1, 0, x\nc 3 4 n 0 + 3 4 0 1 1, 0,\n";
        let results = read_all(data);
        assert!(matches!(
            results[1],
            Err(Error::Schema {
                expected: 13,
                found: 12,
                ..
            })
        ));

        Ok(())
    }

    #[test]
    fn test_abandoned_iteration() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"chrM 1 2\nchrM 3 4\n";
        let mut reader = Reader::new(&data[..]);

        let first = reader.records().next().transpose()?;
        assert_eq!(first.map(|r| r.chrom_start()), Some(1));

        // The reader is still usable once the iterator is dropped.
        let mut buffer = String::new();
        assert_eq!(reader.read_line_raw(&mut buffer)?, 9);
        assert_eq!(buffer, "chrM 3 4");

        Ok(())
    }
}
