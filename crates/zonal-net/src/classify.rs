//! Classify undirected edges against a region of interest.
//!
//! The class is derived at query time and never stored on the edge: the same
//! [`EdgeList`] can be classified against several regions side by side.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use zonal_core::{Cell, RegionMatcher, Table};

use crate::symmetrize::{EdgeList, UndirectedEdge};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeClass {
    /// Both endpoints inside the region of interest
    Internal,
    /// Exactly one endpoint inside
    Interface,
    /// Neither endpoint inside
    External,
}

impl EdgeClass {
    pub const ALL: [EdgeClass; 3] = [EdgeClass::Internal, EdgeClass::Interface, EdgeClass::External];

    pub fn as_str(self) -> &'static str {
        match self {
            EdgeClass::Internal => "internal",
            EdgeClass::Interface => "interface",
            EdgeClass::External => "external",
        }
    }
}

impl fmt::Display for EdgeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class of a single edge. An unrestricted matcher makes every edge internal.
pub fn classify_edge<M: RegionMatcher>(edge: &UndirectedEdge, matcher: &M) -> EdgeClass {
    if matcher.is_unrestricted() {
        return EdgeClass::Internal;
    }
    match (matcher.matches(&edge.a), matcher.matches(&edge.b)) {
        (true, true) => EdgeClass::Internal,
        (true, false) | (false, true) => EdgeClass::Interface,
        (false, false) => EdgeClass::External,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassifiedEdge<'a> {
    #[serde(flatten)]
    pub edge: &'a UndirectedEdge,
    #[serde(rename = "line_type")]
    pub class: EdgeClass,
}

/// Edges of one [`EdgeList`] tagged against one matcher, in edge-list order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClassifiedEdges<'a> {
    edges: Vec<ClassifiedEdge<'a>>,
}

pub fn classify<'a, M: RegionMatcher>(edges: &'a EdgeList, matcher: &M) -> ClassifiedEdges<'a> {
    ClassifiedEdges {
        edges: edges
            .iter()
            .map(|edge| ClassifiedEdge {
                edge,
                class: classify_edge(edge, matcher),
            })
            .collect(),
    }
}

impl<'a> ClassifiedEdges<'a> {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassifiedEdge<'a>> {
        self.edges.iter()
    }

    pub fn count(&self, class: EdgeClass) -> usize {
        self.edges.iter().filter(|e| e.class == class).count()
    }

    pub fn of_class(&self, class: EdgeClass) -> impl Iterator<Item = &'a UndirectedEdge> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.class == class)
            .map(|e| e.edge)
    }

    /// `From, To, <capacity_column>, line_type`
    pub fn to_table(&self, capacity_column: &str) -> Table {
        Table::from_fixed_rows(
            ["From", "To", capacity_column, "line_type"],
            self.edges.iter().map(|e| {
                [
                    Cell::from(e.edge.a.as_str()),
                    Cell::from(e.edge.b.as_str()),
                    Cell::Float(e.edge.capacity.value()),
                    Cell::from(e.class.as_str()),
                ]
            }),
        )
    }

    /// Regions on the far side of the interface edges, unique, in first-seen
    /// order. These are the neighbours the region of interest trades with.
    pub fn external_neighbors<M: RegionMatcher>(&self, matcher: &M) -> Vec<String> {
        let mut seen = HashSet::new();
        self.of_class(EdgeClass::Interface)
            .map(|edge| {
                if matcher.matches(&edge.a) {
                    edge.b.clone()
                } else {
                    edge.a.clone()
                }
            })
            .filter(|region| seen.insert(region.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawCapacityRecord;
    use crate::symmetrize::symmetrize;
    use zonal_core::{RegionGroup, RegionPrefix};

    fn scenario() -> EdgeList {
        symmetrize(&[
            RawCapacityRecord::new("A1", "B1", 100.0),
            RawCapacityRecord::new("B1", "A1", 120.0),
            RawCapacityRecord::new("A1", "C1", 50.0),
        ])
    }

    #[test]
    fn interface_edges_for_single_region() {
        let edges = scenario();
        let classified = classify(&edges, &RegionPrefix::new("A"));
        assert_eq!(classified.count(EdgeClass::Interface), 2);
        assert_eq!(classified.count(EdgeClass::Internal), 0);
        assert_eq!(
            classified.external_neighbors(&RegionPrefix::new("A")),
            vec!["B1", "C1"]
        );
    }

    #[test]
    fn internal_when_both_endpoints_match() {
        let edges = symmetrize(&[RawCapacityRecord::new("A1", "A2", 10.0)]);
        let classified = classify(&edges, &RegionPrefix::new("A"));
        assert_eq!(classified.iter().next().unwrap().class, EdgeClass::Internal);
    }

    #[test]
    fn external_when_neither_matches() {
        let edges = scenario();
        let classified = classify(&edges, &RegionPrefix::new("Z"));
        assert_eq!(classified.count(EdgeClass::External), 2);
    }

    #[test]
    fn unrestricted_prefix_is_all_internal() {
        let edges = scenario();
        let classified = classify(&edges, &RegionPrefix::new(""));
        assert_eq!(classified.count(EdgeClass::Internal), edges.len());
    }

    #[test]
    fn group_matcher() {
        let edges = scenario();
        let group = RegionGroup::new(["A1", "B1"]);
        let classified = classify(&edges, &group);
        let internal: Vec<String> = classified
            .of_class(EdgeClass::Internal)
            .map(UndirectedEdge::label)
            .collect();
        assert_eq!(internal, vec!["A1-B1"]);
        assert_eq!(classified.count(EdgeClass::Interface), 1);
    }

    #[test]
    fn table_and_json() {
        let edges = scenario();
        let classified = classify(&edges, &RegionPrefix::new("A"));
        let table = classified.to_table("MW");
        assert_eq!(table.column_names(), vec!["From", "To", "MW", "line_type"]);
        assert_eq!(table.cell(0, 3), Some(&Cell::from("interface")));

        let json = serde_json::to_value(&classified).unwrap();
        assert_eq!(json[0]["line_type"], "interface");
        assert_eq!(json[0]["capacity"], 110.0);
        assert_eq!(EdgeClass::External.to_string(), "external");
    }
}
