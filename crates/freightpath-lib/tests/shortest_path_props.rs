mod common;

use std::collections::HashSet;

use proptest::prelude::*;

use freightpath_lib::{ensure_connected, Graph, RouteSearcher, SearchMode, SearchOptions};

use common::dijkstra_cost;

#[derive(Debug, Clone)]
struct Network {
    coords: Vec<(i64, i64)>,
    /// (a, b, extra weight above the straight-line distance). Coordinates are
    /// drawn from a small grid so nodes often coincide, and zero slack between
    /// coinciding nodes yields zero-weight edges and cycles.
    edges: Vec<(usize, usize, u64)>,
}

fn network_strategy() -> impl Strategy<Value = Network> {
    (2usize..8)
        .prop_flat_map(|n| {
            (
                prop::collection::vec((0i64..3, 0i64..3), n),
                prop::collection::vec((any::<prop::sample::Index>(), 0u64..4), n - 1),
                prop::collection::vec((0usize..n, 0usize..n, 0u64..4), 0..n * 2),
            )
        })
        .prop_map(|(coords, tree, extra)| {
            let mut seen = HashSet::new();
            let mut edges = Vec::new();
            // Spanning tree: node i links to some earlier node.
            for (offset, (parent, slack)) in tree.into_iter().enumerate() {
                let child = offset + 1;
                let parent = parent.index(child);
                seen.insert((parent.min(child), parent.max(child)));
                edges.push((parent, child, slack));
            }
            for (a, b, slack) in extra {
                if a != b && seen.insert((a.min(b), a.max(b))) {
                    edges.push((a, b, slack));
                }
            }
            Network { coords, edges }
        })
}

fn build(network: &Network) -> Graph {
    let mut builder = Graph::builder();
    for (i, &(x, y)) in network.coords.iter().enumerate() {
        builder.add_node(format!("N{i}"), x, y).unwrap();
    }
    for &(a, b, slack) in &network.edges {
        let (ax, ay) = network.coords[a];
        let (bx, by) = network.coords[b];
        let straight = (((ax - bx).pow(2) + (ay - by).pow(2)) as f64).sqrt().ceil() as u64;
        builder
            .add_edge(&format!("N{a}"), &format!("N{b}"), straight + slack)
            .unwrap();
    }
    builder.build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn search_cost_matches_dijkstra(network in network_strategy()) {
        let graph = build(&network);
        prop_assert!(ensure_connected(&graph).is_ok());

        for mode in [SearchMode::Exhaustive, SearchMode::Deduplicated] {
            let searcher = RouteSearcher::with_options(
                &graph,
                SearchOptions { mode, max_expansions: None },
            );
            for start in graph.nodes() {
                for goal in graph.nodes() {
                    let outcome = searcher.search(&start.id, &goal.id).unwrap();
                    prop_assert_eq!(Some(outcome.cost), dijkstra_cost(&graph, &start.id, &goal.id));
                    prop_assert_eq!(outcome.route.start(), start.id.as_str());
                    prop_assert_eq!(outcome.route.goal(), goal.id.as_str());
                    prop_assert_eq!(outcome.route.total_cost(&graph).unwrap(), outcome.cost);
                }
            }
        }
    }
}
