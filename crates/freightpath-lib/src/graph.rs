use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Node identifier as supplied by the input files.
pub type NodeId = String;

/// Maximum number of "did you mean" suggestions attached to unknown node errors.
const MAX_SUGGESTIONS: usize = 3;

/// Minimum Jaro-Winkler similarity for a node id to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Integer grid coordinate of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A named location in the delivery network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
}

/// Directed half of an undirected connection, stored in the adjacency of its
/// source node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: usize,
    pub distance: u64,
}

#[derive(Debug, Default)]
struct GraphData {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

/// Immutable weighted, undirected graph used by the search and consolidation
/// passes.
///
/// Node order is the order nodes were added to the [`GraphBuilder`]; the first
/// node is the depot and the root of the connectivity walk. Cloning is cheap
/// and clones share storage.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    data: Arc<GraphData>,
}

impl Graph {
    /// Start building a new graph.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn node_count(&self) -> usize {
        self.data.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.data.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.data.nodes.is_empty()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.data.nodes
    }

    /// The first node added to the graph.
    pub fn first_node(&self) -> Option<&Node> {
        self.data.nodes.first()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.data.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|index| &self.data.nodes[index])
    }

    /// Identifiers of the nodes directly connected to `id`, in edge insertion
    /// order. Unknown identifiers yield an empty list.
    pub fn neighbours(&self, id: &str) -> Vec<&str> {
        self.index_of(id)
            .map(|index| {
                self.data.adjacency[index]
                    .iter()
                    .map(|edge| self.data.nodes[edge.target].id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Weight of the edge between `a` and `b`. Symmetric: `distance(a, b)`
    /// equals `distance(b, a)`.
    pub fn distance(&self, a: &str, b: &str) -> Option<u64> {
        let from = self.index_of(a)?;
        let to = self.index_of(b)?;
        self.data.adjacency[from]
            .iter()
            .find(|edge| edge.target == to)
            .map(|edge| edge.distance)
    }

    /// Euclidean distance between the coordinates of two nodes.
    pub fn heuristic(&self, a: &str, b: &str) -> Option<f64> {
        let from = self.node(a)?;
        let to = self.node(b)?;
        Some(from.position.distance_to(&to.position))
    }

    /// Resolve an identifier to its internal index, or fail with suggestions.
    pub(crate) fn resolve(&self, id: &str) -> Result<usize> {
        self.index_of(id).ok_or_else(|| Error::UnknownNode {
            id: id.to_string(),
            suggestions: self.suggestions(id),
        })
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.data.index.get(id).copied()
    }

    pub(crate) fn node_at(&self, index: usize) -> &Node {
        &self.data.nodes[index]
    }

    pub(crate) fn edges_at(&self, index: usize) -> &[Edge] {
        &self.data.adjacency[index]
    }

    fn suggestions(&self, id: &str) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .data
            .nodes
            .iter()
            .map(|node| (strsim::jaro_winkler(id, &node.id), node.id.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

/// Incremental constructor for [`Graph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    data: GraphData,
}

impl GraphBuilder {
    /// Add a node. Identifiers must be unique.
    pub fn add_node(&mut self, id: impl Into<NodeId>, x: i64, y: i64) -> Result<&mut Self> {
        let id = id.into();
        if self.data.index.contains_key(&id) {
            return Err(Error::DuplicateNode { id });
        }
        let index = self.data.nodes.len();
        self.data.index.insert(id.clone(), index);
        self.data.nodes.push(Node {
            id,
            position: Position::new(x, y),
        });
        self.data.adjacency.push(Vec::new());
        Ok(self)
    }

    /// Add an undirected edge. Both endpoints must already exist.
    pub fn add_edge(&mut self, a: &str, b: &str, distance: u64) -> Result<&mut Self> {
        let from = self.lookup(a)?;
        let to = self.lookup(b)?;
        if from == to {
            return Err(Error::SelfLoop {
                node: a.to_string(),
            });
        }
        if self.data.adjacency[from].iter().any(|edge| edge.target == to) {
            return Err(Error::DuplicateEdge {
                a: a.to_string(),
                b: b.to_string(),
            });
        }

        self.data.adjacency[from].push(Edge {
            target: to,
            distance,
        });
        self.data.adjacency[to].push(Edge {
            target: from,
            distance,
        });
        self.data.edge_count += 1;
        Ok(self)
    }

    pub fn build(self) -> Graph {
        debug!(
            nodes = self.data.nodes.len(),
            edges = self.data.edge_count,
            "built graph"
        );
        Graph {
            data: Arc::new(self.data),
        }
    }

    fn lookup(&self, id: &str) -> Result<usize> {
        self.data
            .index
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownNode {
                id: id.to_string(),
                suggestions: Vec::new(),
            })
    }
}
