//! # zonal-core: shared model for zonal grid extracts
//!
//! Provides the in-memory table model, error type, diagnostics and region
//! matching used by the reshape engine (`zonal-ts`) and the network normalizer
//! (`zonal-net`).
//!
//! ## Data flow
//!
//! ```text
//! extract file ──zonal-io──▶ Table ──zonal-ts──▶ long time series Table
//!                              │
//!                              └──zonal-net──▶ symmetric edges ─▶ classified / partitioned edges
//! ```
//!
//! Everything here is a pure, single-pass transformation over fully
//! materialized tables. There is no shared mutable state: the region of
//! interest is passed to every call as a [`RegionMatcher`].
//!
//! ## Modules
//!
//! - [`table`] - `Table`, `Column`, `Cell`
//! - [`error`] - `ZonalError` / `ZonalResult`
//! - [`diagnostics`] - recovered data-quality gaps and warnings
//! - [`region`] - region-of-interest matching and row filtering
//! - [`units`] - `Megawatts`

pub mod diagnostics;
pub mod error;
pub mod region;
pub mod table;
pub mod units;

pub use diagnostics::{DiagnosticIssue, Diagnostics};
pub use error::{ZonalError, ZonalResult};
pub use region::{filter_by_region, RegionGroup, RegionMatcher, RegionPrefix};
pub use table::{Cell, Column, Table};
pub use units::Megawatts;
