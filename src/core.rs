//! Core functionality used across the crate.

pub mod interval;
pub mod strand;

pub use interval::Contig;
pub use interval::Interval;
pub use interval::Position;
pub use strand::Strand;
