//! Detection of region table formats from file names.

use std::path::Path;
use std::path::PathBuf;

/// The file name suffix of a plain text region table.
pub const PLAIN_SUFFIX: &str = ".bed";

/// The file name suffix of a gzip-compressed region table.
pub const GZIPPED_SUFFIX: &str = ".bed.gz";

/// An error related to a [`Format`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The file name did not match any recognized format.
    Unrecognized(PathBuf),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Unrecognized(path) => write!(
                f,
                "the file {} is not a proper region file: expected a name ending in \
                 `{PLAIN_SUFFIX}` or `{GZIPPED_SUFFIX}`",
                path.display()
            ),
        }
    }
}

impl std::error::Error for Error {}

/// The on-disk format of a region table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    /// Plain text.
    Plain,
    /// Gzip-compressed text (including BGZF).
    Gzipped,
}

impl Format {
    /// Attempts to determine the format of a region table from its file name.
    ///
    /// Only the file name is inspected; the file itself is never touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use regioncount::format::Format;
    ///
    /// assert_eq!(Format::try_from_path("regions.bed")?, Format::Plain);
    /// assert_eq!(Format::try_from_path("regions.bed.gz")?, Format::Gzipped);
    /// assert!(Format::try_from_path("regions.bad.gz").is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::Unrecognized(path.to_path_buf()))?;

        if name.ends_with(PLAIN_SUFFIX) {
            Ok(Format::Plain)
        } else if name.ends_with(GZIPPED_SUFFIX) {
            Ok(Format::Gzipped)
        } else {
            Err(Error::Unrecognized(path.to_path_buf()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(Format::try_from_path("test_4.bed")?, Format::Plain);
        assert_eq!(Format::try_from_path("/data/a.b.bed")?, Format::Plain);
        Ok(())
    }

    #[test]
    fn test_gzipped() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(Format::try_from_path("test_4.bed.gz")?, Format::Gzipped);
        Ok(())
    }

    #[test]
    fn test_unrecognized() {
        let err = Format::try_from_path("test_data/test_3.bad.gz").unwrap_err();
        assert_eq!(
            err.to_string(),
            "the file test_data/test_3.bad.gz is not a proper region file: expected a \
             name ending in `.bed` or `.bed.gz`"
        );

        assert!(Format::try_from_path("regions.BED").is_err());
        assert!(Format::try_from_path("regions.bed.bgz").is_err());
        assert!(Format::try_from_path("/").is_err());
    }
}
