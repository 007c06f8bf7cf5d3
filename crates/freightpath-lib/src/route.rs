use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};

/// Ordered sequence of node identifiers from a start node to a goal node,
/// both inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Route {
    nodes: Vec<NodeId>,
}

impl Route {
    /// Wrap a node sequence. Returns `None` for an empty sequence.
    pub fn new(nodes: Vec<NodeId>) -> Option<Self> {
        if nodes.is_empty() {
            None
        } else {
            Some(Self { nodes })
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn start(&self) -> &str {
        &self.nodes[0]
    }

    pub fn goal(&self) -> &str {
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Routes always hold at least one node.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// `true` when `self` equals `other` truncated to `self`'s length.
    pub fn is_prefix_of(&self, other: &Route) -> bool {
        other.nodes.starts_with(&self.nodes)
    }

    /// `true` when either route is a prefix of the other.
    pub fn prefix_compatible(&self, other: &Route) -> bool {
        self.is_prefix_of(other) || other.is_prefix_of(self)
    }

    /// Sum of edge weights along the route. Fails if two consecutive nodes are
    /// not directly connected.
    pub fn total_cost(&self, graph: &Graph) -> Result<u64> {
        self.nodes.windows(2).try_fold(0u64, |total, pair| {
            graph
                .distance(&pair[0], &pair[1])
                .map(|distance| total + distance)
                .ok_or_else(|| Error::DisjointRouteStep {
                    from: pair[0].clone(),
                    to: pair[1].clone(),
                })
        })
    }

    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.nodes.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(ids: &[&str]) -> Route {
        Route::new(ids.iter().map(|id| id.to_string()).collect()).unwrap()
    }

    #[test]
    fn empty_sequence_is_not_a_route() {
        assert!(Route::new(Vec::new()).is_none());
    }

    #[test]
    fn prefix_requires_exact_leading_segment() {
        let short = route(&["A", "B"]);
        let long = route(&["A", "B", "C"]);
        let fork = route(&["A", "B", "D"]);

        assert!(short.is_prefix_of(&long));
        assert!(!long.is_prefix_of(&short));
        assert!(short.prefix_compatible(&long));
        assert!(long.prefix_compatible(&short));
        assert!(!long.prefix_compatible(&fork));
        assert!(long.is_prefix_of(&long));
    }

    #[test]
    fn display_joins_with_arrows() {
        assert_eq!(route(&["A", "B", "C"]).to_string(), "A -> B -> C");
        assert_eq!(route(&["A"]).hop_count(), 0);
    }

    #[test]
    fn total_cost_sums_edges() {
        let mut builder = Graph::builder();
        builder.add_node("A", 0, 0).unwrap();
        builder.add_node("B", 1, 0).unwrap();
        builder.add_node("C", 2, 0).unwrap();
        builder.add_edge("A", "B", 2).unwrap();
        builder.add_edge("B", "C", 5).unwrap();
        let graph = builder.build();

        assert_eq!(route(&["A", "B", "C"]).total_cost(&graph).unwrap(), 7);
        assert_eq!(route(&["C"]).total_cost(&graph).unwrap(), 0);
        assert!(matches!(
            route(&["A", "C"]).total_cost(&graph),
            Err(Error::DisjointRouteStep { .. })
        ));
    }
}
