//! Connectivity gate run once before any route search.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Count the distinct nodes reachable from the node at `root` by following
/// adjacency edges breadth-first.
fn reachable_from(graph: &Graph, root: usize) -> usize {
    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();
    let mut count = 0;

    visited[root] = true;
    queue.push_back(root);

    while let Some(current) = queue.pop_front() {
        count += 1;
        for edge in graph.edges_at(current) {
            if !visited[edge.target] {
                visited[edge.target] = true;
                queue.push_back(edge.target);
            }
        }
    }

    count
}

/// Number of nodes reachable from the first node in the graph. An empty graph
/// reaches nothing.
pub fn reachable_count(graph: &Graph) -> usize {
    if graph.is_empty() {
        return 0;
    }
    reachable_from(graph, 0)
}

/// Verify that every node is reachable from the first node.
///
/// Fails with [`Error::DisconnectedGraph`] otherwise. An empty graph is
/// trivially connected.
pub fn ensure_connected(graph: &Graph) -> Result<()> {
    let total = graph.node_count();
    let visited = reachable_count(graph);

    if visited < total {
        warn!(visited, total, "graph is not connected");
        return Err(Error::DisconnectedGraph { visited, total });
    }

    debug!(nodes = total, "graph is connected");
    Ok(())
}
