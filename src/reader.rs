//! A region table reader.

pub mod records;

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::{self};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::format;
use crate::format::Format;
use crate::record::region;

pub use records::Records;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// The file name did not match a recognized region table format.
    Format(format::Error),

    /// An I/O error.
    Io(io::Error),

    /// A line could not be parsed into a valid region record.
    Validation {
        /// The parse error.
        err: region::ParseError,
        /// The 1-based line number.
        line_no: usize,
        /// The offending line.
        line: String,
    },

    /// A line had a different number of fields than the first data line.
    Schema {
        /// The number of fields in the first data line.
        expected: usize,
        /// The number of fields in the offending line.
        found: usize,
        /// The 1-based line number.
        line_no: usize,
        /// The offending line.
        line: String,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Format(err) => write!(f, "format error: {err}"),
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Validation { err, line_no, line } => write!(
                f,
                "validation error: invalid region record at line {line_no}: {err}\n\nline: {line}"
            ),
            Error::Schema {
                expected,
                found,
                line_no,
                line,
            } => write!(
                f,
                "schema error: the number of columns is inconsistent at line {line_no}: \
                 expected {expected} fields, found {found} fields\n\nline: {line}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A region table reader.
#[derive(Clone, Debug)]
pub struct Reader<T>(T)
where
    T: BufRead;

impl Reader<Box<dyn BufRead>> {
    /// Opens the region table at `path`.
    ///
    /// The format is chosen by file name before the file is opened: names
    /// ending in `.bed` are read as plain text, while names ending in `.bed.gz`
    /// are transparently decompressed. Any other name is rejected with an
    /// [`Error::Format`].
    ///
    /// The file is closed when the returned reader is dropped.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let format = Format::try_from_path(path).map_err(Error::Format)?;
        let file = File::open(path).map_err(Error::Io)?;

        let inner: Box<dyn BufRead> = match format {
            Format::Plain => Box::new(BufReader::new(file)),
            Format::Gzipped => Box::new(BufReader::new(MultiGzDecoder::new(file))),
        };

        Ok(Self::new(inner))
    }
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a region table reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chrM\t5000\t5500\tPos1\t0\t+\n";
    /// let reader = regioncount::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Gets a reference to the inner reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"chrM\t5000\t5500\tPos1\t0\t+\n";
    /// let cursor = io::Cursor::new(data);
    ///
    /// let reader = regioncount::Reader::new(cursor);
    /// assert_eq!(reader.inner().position(), 0);
    /// ```
    pub fn inner(&self) -> &T {
        &self.0
    }

    /// Gets a mutable reference to the inner reader.
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.0
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Reads a raw, textual line from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"track name=test\r\nchrM\t5000\t5500";
    /// let mut reader = regioncount::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 17);
    /// assert_eq!(buffer, "track name=test");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 14);
    /// assert_eq!(buffer, "chrM\t5000\t5500");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 0);
    ///
    /// # Ok::<(), io::Error>(())
    /// ```
    pub fn read_line_raw(&mut self, buffer: &mut String) -> io::Result<usize> {
        read_line(self.inner_mut(), buffer)
    }

    /// Returns a lazy iterator over the region records in the underlying
    /// reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"browser position chrM\n#chrom\tstart\tend\nchrM\t5000\t5500\nchrM\t6000\t6500\n";
    /// let mut reader = regioncount::Reader::new(&data[..]);
    ///
    /// let records = reader
    ///     .records()
    ///     .collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(records.len(), 2);
    /// assert_eq!(records[1].chrom_start(), 6000);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn records(&mut self) -> Records<'_, T> {
        Records::new(self)
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self(inner)
    }
}

/// Reads a line from a buffered reader, stripping the line ending.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_read_line() {
        let data = b"chrM 1 2\r\nchrM 3 4";
        let mut cursor = io::Cursor::new(data);

        let mut buffer = String::new();
        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "chrM 1 2");
        assert_eq!(len, 10);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "chrM 3 4");
        assert_eq!(len, 8);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(len, 0);
    }

    #[test]
    fn test_from_path_with_unrecognized_name() {
        // The file does not exist: the name is rejected before anything is opened.
        let err = Reader::from_path("does/not/exist.txt").err().unwrap();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_from_path_with_missing_file() {
        let err = Reader::from_path("does/not/exist.bed").err().unwrap();
        match err {
            Error::Io(err) => assert_eq!(err.kind(), io::ErrorKind::NotFound),
            err => panic!("unexpected error: {err}"),
        }
    }
}
