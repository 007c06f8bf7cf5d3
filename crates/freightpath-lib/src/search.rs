//! Heuristic best-first route search.
//!
//! The searcher seeds its frontier with the neighbours of the start node and
//! repeatedly pops the state with the smallest `cost + straight-line distance
//! to goal`. Every pop is appended to a traversal log; when the goal is popped
//! the route is rebuilt by walking that log backwards from the goal entry.
//!
//! Two modes are available:
//! - [`SearchMode::Exhaustive`] keeps no closed set, so a node may be expanded
//!   once per distinct parent chain that reaches it. A state is never pushed
//!   for a node already on its own chain, so every chain is a simple path and
//!   the search terminates even across zero-weight cycles.
//! - [`SearchMode::Deduplicated`] expands each node at most once.
//!
//! Both return a least-cost route whenever edge weights are never shorter
//! than the straight-line distance between their endpoints. That property of
//! the input is assumed and not checked here.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, Position};
use crate::route::Route;

/// Frontier handling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// No closed set; nodes may be expanded repeatedly.
    #[default]
    Exhaustive,
    /// Skip states whose node has already been expanded.
    Deduplicated,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchMode::Exhaustive => "exhaustive",
            SearchMode::Deduplicated => "deduplicated",
        };
        f.write_str(value)
    }
}

/// Options controlling a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub mode: SearchMode,
    /// Abort with [`Error::SearchLimitExceeded`] after this many expansions.
    pub max_expansions: Option<usize>,
}

impl SearchOptions {
    pub fn deduplicated() -> Self {
        Self {
            mode: SearchMode::Deduplicated,
            ..Self::default()
        }
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// States popped from the frontier and logged.
    pub expansions: usize,
    /// States pushed onto the frontier.
    pub pushes: usize,
}

/// Route together with its cost and search statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub route: Route,
    pub cost: u64,
    pub stats: SearchStats,
}

/// Best-first searcher over a borrowed [`Graph`].
#[derive(Debug, Clone, Copy)]
pub struct RouteSearcher<'a> {
    graph: &'a Graph,
    options: SearchOptions,
}

impl<'a> RouteSearcher<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self::with_options(graph, SearchOptions::default())
    }

    pub fn with_options(graph: &'a Graph, options: SearchOptions) -> Self {
        Self { graph, options }
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Find a route from `start` to `goal`.
    pub fn find_route(&self, start: &str, goal: &str) -> Result<Route> {
        self.search(start, goal).map(|outcome| outcome.route)
    }

    /// Find a route from `start` to `goal`, also reporting its cost and the
    /// work performed.
    pub fn search(&self, start: &str, goal: &str) -> Result<SearchOutcome> {
        let graph = self.graph;
        let start_index = graph.resolve(start)?;
        let goal_index = graph.resolve(goal)?;

        if start_index == goal_index {
            return Ok(SearchOutcome {
                route: single_node_route(start),
                cost: 0,
                stats: SearchStats::default(),
            });
        }

        let goal_position = graph.node_at(goal_index).position;
        let dedup = self.options.mode == SearchMode::Deduplicated;
        let mut closed = vec![false; if dedup { graph.node_count() } else { 0 }];
        if dedup {
            closed[start_index] = true;
        }

        let mut log: Vec<Visit> = Vec::new();
        let mut frontier = BinaryHeap::new();
        let mut stats = SearchStats::default();

        for edge in graph.edges_at(start_index) {
            frontier.push(self.state(edge.target, edge.distance, start_index, None, &goal_position));
            stats.pushes += 1;
        }

        while let Some(state) = frontier.pop() {
            if dedup {
                if closed[state.node] {
                    continue;
                }
                closed[state.node] = true;
            }

            if let Some(limit) = self.options.max_expansions {
                if log.len() >= limit {
                    debug!(start, goal, limit, "search expansion limit reached");
                    return Err(Error::SearchLimitExceeded {
                        start: start.to_string(),
                        goal: goal.to_string(),
                        limit,
                    });
                }
            }

            let visit = log.len();
            log.push(Visit {
                parent: state.parent,
                node: state.node,
                parent_visit: state.parent_visit,
            });
            stats.expansions += 1;

            if state.node == goal_index {
                let route = self.reconstruct(&log, visit);
                debug!(
                    start,
                    goal,
                    cost = state.cost,
                    hops = route.hop_count(),
                    expansions = stats.expansions,
                    pushes = stats.pushes,
                    mode = %self.options.mode,
                    "route found"
                );
                return Ok(SearchOutcome {
                    route,
                    cost: state.cost,
                    stats,
                });
            }

            let on_chain = if dedup {
                Vec::new()
            } else {
                chain_nodes(&log, visit)
            };
            for edge in graph.edges_at(state.node) {
                if edge.target == state.parent {
                    continue;
                }
                let revisit = if dedup {
                    closed[edge.target]
                } else {
                    on_chain.contains(&edge.target)
                };
                if revisit {
                    continue;
                }
                frontier.push(self.state(
                    edge.target,
                    state.cost.saturating_add(edge.distance),
                    state.node,
                    Some(visit),
                    &goal_position,
                ));
                stats.pushes += 1;
            }
        }

        debug!(start, goal, expansions = stats.expansions, "frontier exhausted");
        Err(Error::RouteNotFound {
            start: start.to_string(),
            goal: goal.to_string(),
        })
    }

    fn state(
        &self,
        node: usize,
        cost: u64,
        parent: usize,
        parent_visit: Option<usize>,
        goal: &Position,
    ) -> FrontierState<'a> {
        let heuristic = self.graph.node_at(node).position.distance_to(goal);
        FrontierState {
            estimate: FloatOrd(cost as f64 + heuristic),
            cost,
            node,
            id: self.graph.node_at(node).id.as_str(),
            parent,
            parent_id: self.graph.node_at(parent).id.as_str(),
            parent_visit,
        }
    }

    fn reconstruct(&self, log: &[Visit], goal_visit: usize) -> Route {
        let nodes = chain_nodes(log, goal_visit)
            .into_iter()
            .rev()
            .map(|index| self.graph.node_at(index).id.clone())
            .collect();
        Route::new(nodes).unwrap_or_else(|| unreachable!("reconstructed route has a goal node"))
    }
}

/// Find a route with default options.
pub fn find_route(graph: &Graph, start: &str, goal: &str) -> Result<Route> {
    RouteSearcher::new(graph).find_route(start, goal)
}

/// Walk the traversal log backwards from `visit`. Each entry points at the
/// earlier entry that expanded its parent; entries seeded from the start node
/// point nowhere. Returns node indices from `visit`'s node back to the start.
fn chain_nodes(log: &[Visit], visit: usize) -> Vec<usize> {
    let mut nodes = vec![log[visit].node];
    let mut cursor = Some(visit);
    while let Some(index) = cursor {
        nodes.push(log[index].parent);
        cursor = log[index].parent_visit;
    }
    nodes
}

fn single_node_route(id: &str) -> Route {
    Route::new(vec![id.to_string()]).unwrap_or_else(|| unreachable!("one node is never empty"))
}

/// One traversal log entry: `node` was popped having been reached from
/// `parent`, whose own expansion is `parent_visit` in the same log.
#[derive(Debug, Clone, Copy)]
struct Visit {
    parent: usize,
    node: usize,
    parent_visit: Option<usize>,
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Copy, Debug)]
struct FrontierState<'a> {
    estimate: FloatOrd,
    cost: u64,
    node: usize,
    id: &'a str,
    parent: usize,
    parent_id: &'a str,
    parent_visit: Option<usize>,
}

impl PartialEq for FrontierState<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierState<'_> {}

impl Ord for FrontierState<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest estimate first; ties fall
        // through to cost, node id, parent id, then log position.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.cost.cmp(&self.cost))
            .then_with(|| other.id.cmp(self.id))
            .then_with(|| other.parent_id.cmp(self.parent_id))
            .then_with(|| other.parent_visit.cmp(&self.parent_visit))
    }
}

impl PartialOrd for FrontierState<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
