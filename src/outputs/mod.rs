//! Output sinks for the collected outlet records.
//!
//! # Submodules
//!
//! - [`json`]: the structured store, every [`OutletRecord`](crate::models::OutletRecord) in full
//! - [`csv`]: the flattened 8-column table
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── allsides.json
//!
//! csv_output_dir/
//! └── allsides_bias.csv
//! ```
//!
//! Write failures are logged on the `main` channel and reported as `None`;
//! they never abort the run.

pub mod csv;
pub mod json;
