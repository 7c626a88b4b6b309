//! The strand column of a region record.

use std::convert::Infallible;
use std::str::FromStr;

/// The strand of a region record.
///
/// Region tables historically use `+`, `-`, and `.`; any other value is kept
/// verbatim rather than rejected, as the strand column is never validated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Strand {
    /// The positive strand (`+`).
    Positive,
    /// The negative strand (`-`).
    Negative,
    /// No strand information (`.`).
    Unknown,
    /// Any other value found in the strand column.
    Other(String),
}

impl From<&str> for Strand {
    fn from(value: &str) -> Self {
        match value {
            "+" => Self::Positive,
            "-" => Self::Negative,
            "." => Self::Unknown,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for Strand {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strand::Positive => write!(f, "+"),
            Strand::Negative => write!(f, "-"),
            Strand::Unknown => write!(f, "."),
            Strand::Other(value) => write!(f, "{value}"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Strand {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_strand_from_str() -> Result<(), Box<dyn std::error::Error>> {
        let strand: Strand = "+".parse()?;
        assert_eq!(strand, Strand::Positive);

        let strand: Strand = "-".parse()?;
        assert_eq!(strand, Strand::Negative);

        let strand: Strand = ".".parse()?;
        assert_eq!(strand, Strand::Unknown);

        let strand: Strand = "?".parse()?;
        assert_eq!(strand, Strand::Other(String::from("?")));

        Ok(())
    }

    #[test]
    fn test_strand_display() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(Strand::Positive.to_string(), "+");
        assert_eq!(Strand::Negative.to_string(), "-");
        assert_eq!(Strand::Unknown.to_string(), ".");
        assert_eq!(Strand::Other(String::from("*")).to_string(), "*");
        Ok(())
    }
}
