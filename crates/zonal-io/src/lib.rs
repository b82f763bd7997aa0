//! # zonal-io: extract files in, tables out
//!
//! Reads the raw CSV (or Parquet, with the `parquet` feature) extracts into
//! [`zonal_core::Table`] and writes results back. Banner lines, trailing
//! footnotes and spreadsheet index columns are handled by [`ExtractLayout`].

pub mod frame;
pub mod layout;
pub mod output;

pub use frame::{frame_to_table, read_frame, read_table, table_to_frame, write_frame, write_table};
pub use layout::ExtractLayout;
pub use output::{output_path, region_dir, write_role_splits};
