//! Region table records.

pub mod column;
pub mod counted;
pub mod region;

pub use column::Column;
pub use counted::CountedRegion;
pub use region::RegionRecord;
