//! Split directional records by which side of the region boundary they feed.
//!
//! Unlike [`classify`](crate::classify::classify) this works on directional
//! records: an import into the region of interest and an export out of it
//! are modeled differently downstream (a generator feeding load versus a load
//! sinking power), so averaging the two would lose the distinction.

use serde::Serialize;
use tracing::debug;
use zonal_core::{RegionMatcher, Table};

use crate::record::{records_table, DirectionalRecord};

/// Output file stems of the three role sets, in [`RolePartition::roles`] order.
pub const ROLE_STEMS: [&str; 3] = ["lines", "generators_interface", "load_interface"];

/// The four disjoint role sets. Together they hold every input record once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RolePartition {
    /// Both endpoints inside
    pub lines: Vec<DirectionalRecord>,
    /// `From` outside, `To` inside: capacity flowing in
    pub generator_interface: Vec<DirectionalRecord>,
    /// `From` inside, `To` outside: capacity flowing out
    pub load_interface: Vec<DirectionalRecord>,
    /// Neither endpoint inside
    #[serde(skip)]
    pub outside: Vec<DirectionalRecord>,
}

impl RolePartition {
    /// Records across all four sets; always equals the input length.
    pub fn total(&self) -> usize {
        self.lines.len() + self.generator_interface.len() + self.load_interface.len() + self.outside.len()
    }

    /// The three role sets with their output file stems.
    pub fn roles(&self) -> [(&'static str, &[DirectionalRecord]); 3] {
        [
            (ROLE_STEMS[0], self.lines.as_slice()),
            (ROLE_STEMS[1], self.generator_interface.as_slice()),
            (ROLE_STEMS[2], self.load_interface.as_slice()),
        ]
    }

    pub fn role_tables(&self, capacity_column: &str) -> Vec<(&'static str, Table)> {
        self.roles()
            .into_iter()
            .map(|(name, records)| (name, records_table(records, capacity_column)))
            .collect()
    }
}

pub fn partition_by_role<M: RegionMatcher>(records: &[DirectionalRecord], matcher: &M) -> RolePartition {
    let mut partition = RolePartition::default();
    if matcher.is_unrestricted() {
        partition.lines = records.to_vec();
        return partition;
    }
    for record in records {
        let set = match (matcher.matches(&record.from), matcher.matches(&record.to)) {
            (true, true) => &mut partition.lines,
            (false, true) => &mut partition.generator_interface,
            (true, false) => &mut partition.load_interface,
            (false, false) => &mut partition.outside,
        };
        set.push(record.clone());
    }
    debug!(
        lines = partition.lines.len(),
        generator_interface = partition.generator_interface.len(),
        load_interface = partition.load_interface.len(),
        outside = partition.outside.len(),
        "partitioned capacity records by role"
    );
    partition
}
