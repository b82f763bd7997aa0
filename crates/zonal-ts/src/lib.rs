//! # zonal-ts: wide-to-long reshaping of hourly extracts
//!
//! - [`reshape_wide_to_long`] turns one-column-per-hour tables (renewable
//!   capacity factors, any per-slot profile) into one row per entity and slot.
//! - [`synthesize_hour_axis`] handles day-grouped load curves, adding a gap-free
//!   global hour ordinal; [`entity_matrix`] pivots that back into one column
//!   per region.
//!
//! All functions are pure: they borrow the input table and return a new one.

pub mod hourly;
pub mod label;
pub mod reshape;

pub use hourly::{entity_matrix, synthesize_hour_axis, HourlyLayout};
pub use label::TimeLabelRule;
pub use reshape::{reshape_wide_to_long, ReshapeSpec, Reshaped, WideLayout};
