//! Undirected capacity graph over the symmetrized edge list.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use zonal_core::Megawatts;

use crate::symmetrize::EdgeList;

/// Regions as nodes, resolved transfer capability as edge weights.
#[derive(Debug, Clone, Default)]
pub struct CapacityGraph {
    graph: UnGraph<String, Megawatts>,
    index: HashMap<String, NodeIndex>,
}

/// Topology summary reported by the `edges` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub regions: usize,
    pub edges: usize,
    pub islands: usize,
    pub max_capacity: Option<Megawatts>,
    pub total_capacity: Megawatts,
}

impl CapacityGraph {
    pub fn from_edges(edges: &EdgeList) -> Self {
        let mut graph = CapacityGraph::default();
        for edge in edges {
            let a = graph.node(&edge.a);
            let b = graph.node(&edge.b);
            graph.graph.add_edge(a, b, edge.capacity);
        }
        graph
    }

    fn node(&mut self, region: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(region) {
            return idx;
        }
        let idx = self.graph.add_node(region.to_string());
        self.index.insert(region.to_string(), idx);
        idx
    }

    pub fn region_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, region: &str) -> bool {
        self.index.contains_key(region)
    }

    /// Directly connected regions, sorted. Empty for an unknown region.
    pub fn neighbors(&self, region: &str) -> Vec<&str> {
        let Some(&idx) = self.index.get(region) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = self
            .graph
            .neighbors(idx)
            .map(|n| self.graph[n].as_str())
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Sum of the capacities of every edge touching `region`.
    pub fn total_capacity(&self, region: &str) -> Megawatts {
        let Some(&idx) = self.index.get(region) else {
            return Megawatts(0.0);
        };
        self.graph.edges(idx).map(|e| *e.weight()).sum()
    }

    /// Connected components (breadth-first), each as a sorted region list.
    /// Islands are ordered by their first node in insertion order.
    pub fn islands(&self) -> Vec<Vec<String>> {
        let mut visited = HashSet::new();
        let mut islands = Vec::new();
        for start in self.graph.node_indices() {
            if visited.contains(&start) {
                continue;
            }
            let mut queue = VecDeque::from([start]);
            let mut members = Vec::new();
            while let Some(node) = queue.pop_front() {
                if !visited.insert(node) {
                    continue;
                }
                members.push(self.graph[node].clone());
                queue.extend(self.graph.neighbors(node).filter(|n| !visited.contains(n)));
            }
            members.sort();
            islands.push(members);
        }
        islands
    }

    pub fn summary(&self) -> GraphSummary {
        let weights: Vec<Megawatts> = self.graph.edge_weights().copied().collect();
        GraphSummary {
            regions: self.region_count(),
            edges: self.edge_count(),
            islands: connected_components(&self.graph),
            max_capacity: weights.iter().copied().reduce(Megawatts::max),
            total_capacity: weights.into_iter().sum(),
        }
    }

    /// Graphviz rendering with capacities as edge labels.
    pub fn to_dot(&self) -> String {
        let mut buffer = String::from("graph zonal_network {\n");
        for node in self.graph.node_indices() {
            let label = self.graph[node].replace('"', "\\\"");
            buffer.push_str(&format!("  n{} [label=\"{}\"];\n", node.index(), label));
        }
        for edge in self.graph.edge_references() {
            buffer.push_str(&format!(
                "  n{} -- n{} [label=\"{:.0}\"];\n",
                edge.source().index(),
                edge.target().index(),
                edge.weight().value()
            ));
        }
        buffer.push('}');
        buffer
    }
}
