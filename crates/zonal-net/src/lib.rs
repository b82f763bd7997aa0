//! # zonal-net: transmission network normalization
//!
//! Raw transfer-capability extracts list capacity per direction, measured from
//! each end and rarely in agreement. This crate turns them into:
//!
//! - cleaned directional records ([`normalize_records`]), with blank `From`
//!   cells forward-filled and unusable capacities dropped;
//! - one undirected edge per region pair ([`symmetrize`]), capacity averaged;
//! - edge classes against a region of interest ([`classify`]);
//! - directional role sets for that region ([`partition_by_role`]);
//! - a petgraph view for topology checks ([`CapacityGraph`]).

pub mod classify;
pub mod graph;
pub mod partition;
pub mod record;
pub mod symmetrize;

pub use classify::{classify, classify_edge, ClassifiedEdge, ClassifiedEdges, EdgeClass};
pub use graph::{CapacityGraph, GraphSummary};
pub use partition::{partition_by_role, RolePartition, ROLE_STEMS};
pub use record::{
    capacity_column_name, normalize_records, raw_records, records_table, restrict_to_regions,
    CapacityColumns, DirectionalRecord, Normalized, RawCapacityRecord,
};
pub use symmetrize::{symmetrize, symmetrize_records, EdgeList, UndirectedEdge};
