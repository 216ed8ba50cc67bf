//! Record types for the Asset360 synthetic manufacturing dataset.
//!
//! Every table the generator produces is a flat list of one of these records. Column names
//! are fixed by the `serde` attributes, since the graph loader reads them verbatim.

pub mod asset;
pub mod catalog;
pub mod commercial;
pub mod config;
pub mod execution;
pub mod file_formats;
pub mod material;
pub mod topology;

/// Placeholder written where an asset has no catalogued unit procedure.
pub const NOT_APPLICABLE: &str = "NA";
/// Placeholder for a batch whose site has no manufacturing facility.
pub const UNKNOWN_FACILITY: &str = "Unknown_Facility";
/// Placeholder for a batch when no warehousing facility exists anywhere.
pub const UNKNOWN_WAREHOUSE: &str = "Unknown_Warehouse";
/// Placeholder for a facility whose site names an unlisted region.
pub const UNKNOWN_REGION_ID: &str = "Unknown_ID";
