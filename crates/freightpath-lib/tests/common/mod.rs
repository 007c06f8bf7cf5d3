#![allow(dead_code)]

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::path::PathBuf;

use freightpath_lib::{Graph, Manifest, Package};

/// Directory holding the checked-in sample network.
pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/network")
}

/// Build a graph from node and edge tables.
pub fn graph_from(nodes: &[(&str, i64, i64)], edges: &[(&str, &str, u64)]) -> Graph {
    let mut builder = Graph::builder();
    for &(id, x, y) in nodes {
        builder.add_node(id, x, y).expect("unique node");
    }
    for &(a, b, distance) in edges {
        builder.add_edge(a, b, distance).expect("valid edge");
    }
    builder.build()
}

/// Four nodes on a cross: A(0,0) B(1,0) C(2,0) D(1,1) with unit edges
/// A-B, B-C and B-D.
pub fn cross_graph() -> Graph {
    graph_from(
        &[("A", 0, 0), ("B", 1, 0), ("C", 2, 0), ("D", 1, 1)],
        &[("A", "B", 1), ("B", "C", 1), ("B", "D", 1)],
    )
}

pub fn manifest(capacity: u64, types: &[(&str, u64)], packages: &[(&str, &str, &str)]) -> Manifest {
    let mut manifest = Manifest::new(capacity);
    for &(package_type, weight) in types {
        manifest.add_package_type(package_type, weight);
    }
    for &(id, package_type, goal) in packages {
        manifest
            .add_package(Package::new(id, package_type, goal))
            .expect("unique package");
    }
    manifest
}

/// Reference shortest-path cost computed with a textbook Dijkstra.
pub fn dijkstra_cost(graph: &Graph, start: &str, goal: &str) -> Option<u64> {
    let mut best: HashMap<String, u64> = HashMap::new();
    let mut queue = BinaryHeap::new();
    best.insert(start.to_string(), 0);
    queue.push(Reverse((0u64, start.to_string())));

    while let Some(Reverse((cost, node))) = queue.pop() {
        if node == goal {
            return Some(cost);
        }
        if best.get(&node).is_some_and(|known| *known < cost) {
            continue;
        }
        for next in graph.neighbours(&node) {
            let distance = graph.distance(&node, next).expect("edge weight");
            let candidate = cost + distance;
            if best.get(next).map_or(true, |known| candidate < *known) {
                best.insert(next.to_string(), candidate);
                queue.push(Reverse((candidate, next.to_string())));
            }
        }
    }

    None
}
