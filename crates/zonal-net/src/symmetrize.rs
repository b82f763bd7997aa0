//! Merge directional capacity records into one undirected edge per region pair.
//!
//! The raw sheet measures most links from both ends, and the two directions
//! rarely agree. Each unordered pair gets the arithmetic mean of every
//! surviving record in either orientation.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;
use zonal_core::{Cell, Megawatts, Table};

use crate::record::{normalize_records, DirectionalRecord, RawCapacityRecord};

/// An unordered region pair with its resolved capacity.
///
/// Endpoints are stored canonically (`a <= b`), so the same pair always
/// compares equal regardless of the orientation it was read in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UndirectedEdge {
    pub a: String,
    pub b: String,
    pub capacity: Megawatts,
}

impl UndirectedEdge {
    pub fn new(x: impl Into<String>, y: impl Into<String>, capacity: Megawatts) -> Self {
        let (a, b) = canonical(x.into(), y.into());
        Self { a, b, capacity }
    }

    pub fn connects(&self, x: &str, y: &str) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    /// The endpoint opposite `region`, if `region` is on this edge.
    pub fn other(&self, region: &str) -> Option<&str> {
        if self.a == region {
            Some(self.b.as_str())
        } else if self.b == region {
            Some(self.a.as_str())
        } else {
            None
        }
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.a, self.b)
    }
}

fn canonical(x: String, y: String) -> (String, String) {
    if x <= y {
        (x, y)
    } else {
        (y, x)
    }
}

/// Deduplicated undirected edges, ordered by the first input position at
/// which each pair appears.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct EdgeList {
    edges: Vec<UndirectedEdge>,
}

impl EdgeList {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UndirectedEdge> {
        self.edges.iter()
    }

    pub fn edges(&self) -> &[UndirectedEdge] {
        &self.edges
    }

    /// Edge between `x` and `y` in either orientation.
    pub fn get(&self, x: &str, y: &str) -> Option<&UndirectedEdge> {
        self.edges.iter().find(|edge| edge.connects(x, y))
    }

    pub fn max_capacity(&self) -> Option<Megawatts> {
        self.edges.iter().map(|e| e.capacity).reduce(Megawatts::max)
    }

    /// Each edge as a single directional record `a -> b`, so the edge list
    /// can be fed back through [`symmetrize`].
    pub fn as_raw_records(&self) -> Vec<RawCapacityRecord> {
        self.edges
            .iter()
            .map(|e| RawCapacityRecord::new(e.a.as_str(), e.b.as_str(), e.capacity.value()))
            .collect()
    }

    /// `From, To, <capacity_column>` with canonical endpoint order.
    pub fn to_table(&self, capacity_column: &str) -> Table {
        Table::from_fixed_rows(
            ["From", "To", capacity_column],
            self.edges.iter().map(|e| {
                [
                    Cell::from(e.a.as_str()),
                    Cell::from(e.b.as_str()),
                    Cell::Float(e.capacity.value()),
                ]
            }),
        )
    }
}

impl<'a> IntoIterator for &'a EdgeList {
    type Item = &'a UndirectedEdge;
    type IntoIter = std::slice::Iter<'a, UndirectedEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

/// Normalize raw records (forward fill, coercion, exclusion) and merge them.
pub fn symmetrize(raw: &[RawCapacityRecord]) -> EdgeList {
    symmetrize_records(&normalize_records(raw).records)
}

/// Merge cleaned directional records into undirected edges.
///
/// Swapping `from`/`to` on any subset of `records` yields the identical
/// edge list: pair identity, first-appearance position and the summation
/// order of the mean are all independent of orientation.
pub fn symmetrize_records(records: &[DirectionalRecord]) -> EdgeList {
    let mut positions: HashMap<(String, String), usize> = HashMap::new();
    let mut pairs: Vec<((String, String), Vec<Megawatts>)> = Vec::new();

    for record in records {
        if !record.capacity.is_positive() {
            continue;
        }
        let key = canonical(record.from.clone(), record.to.clone());
        match positions.get(&key) {
            Some(&idx) => pairs[idx].1.push(record.capacity),
            None => {
                positions.insert(key.clone(), pairs.len());
                pairs.push((key, vec![record.capacity]));
            }
        }
    }

    let edges: Vec<UndirectedEdge> = pairs
        .into_iter()
        .filter_map(|((a, b), capacities)| {
            let capacity = Megawatts::mean(capacities)?;
            capacity
                .is_positive()
                .then_some(UndirectedEdge { a, b, capacity })
        })
        .collect();
    debug!(
        records = records.len(),
        edges = edges.len(),
        "symmetrized capacity records"
    );
    EdgeList { edges }
}
