use std::fmt::Write;

use serde::Serialize;

use crate::consolidate::Consolidation;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId, Position};
use crate::route::Route;
use crate::search::{SearchMode, SearchOutcome, SearchStats};

/// Presentation style for turning a summary into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    PlainText,
    Markdown,
}

/// Step taken along a route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub node: NodeId,
    pub position: Position,
    /// Weight of the edge used to arrive at this node; absent for the start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_distance: Option<u64>,
}

/// Structured representation of a single route query.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub mode: SearchMode,
    pub start: NodeId,
    pub goal: NodeId,
    pub hops: usize,
    pub cost: u64,
    pub stats: SearchStats,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Build a summary from a search outcome, resolving coordinates and leg
    /// distances against `graph`.
    pub fn from_outcome(graph: &Graph, mode: SearchMode, outcome: &SearchOutcome) -> Result<Self> {
        Ok(Self {
            mode,
            start: outcome.route.start().to_string(),
            goal: outcome.route.goal().to_string(),
            hops: outcome.route.hop_count(),
            cost: outcome.cost,
            stats: outcome.stats,
            steps: route_steps(graph, &outcome.route)?,
        })
    }

    pub fn render(&self, mode: RenderMode) -> String {
        let mut buffer = String::new();
        match mode {
            RenderMode::PlainText => {
                let _ = writeln!(
                    buffer,
                    "Route: {} -> {} ({} hops, cost {}, {} search)",
                    self.start, self.goal, self.hops, self.cost, self.mode
                );
                for step in &self.steps {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} ({}, {}){}",
                        step.index,
                        step.node,
                        step.position.x,
                        step.position.y,
                        step.leg_distance
                            .map(|distance| format!(" +{distance}"))
                            .unwrap_or_default()
                    );
                }
            }
            RenderMode::Markdown => {
                let _ = writeln!(
                    buffer,
                    "**Route** _{} → {}_ ({} hops, cost `{}`)",
                    self.start, self.goal, self.hops, self.cost
                );
                for step in &self.steps {
                    let _ = writeln!(buffer, "* {:>2}. **{}**", step.index, step.node);
                }
            }
        }
        buffer
    }
}

/// One load group with its route cost resolved.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroupSummary {
    pub id: usize,
    pub packages: Vec<String>,
    pub weight: u64,
    pub utilization: f64,
    pub hops: usize,
    pub route_cost: u64,
    pub route: Route,
}

/// Structured representation of a consolidation pass.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConsolidationSummary {
    pub depot: NodeId,
    pub capacity: u64,
    pub package_count: usize,
    pub group_count: usize,
    pub groups: Vec<GroupSummary>,
}

impl ConsolidationSummary {
    pub fn from_consolidation(graph: &Graph, consolidation: &Consolidation) -> Result<Self> {
        let groups = consolidation
            .groups
            .iter()
            .map(|group| {
                Ok(GroupSummary {
                    id: group.id,
                    packages: group.packages.clone(),
                    weight: group.weight,
                    utilization: utilization(group.weight, consolidation.capacity),
                    hops: group.route.hop_count(),
                    route_cost: group.route.total_cost(graph)?,
                    route: group.route.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            depot: consolidation.depot.clone(),
            capacity: consolidation.capacity,
            package_count: consolidation.package_count(),
            group_count: groups.len(),
            groups,
        })
    }

    pub fn render(&self, mode: RenderMode) -> String {
        let mut buffer = String::new();
        match mode {
            RenderMode::PlainText => {
                let _ = writeln!(
                    buffer,
                    "Loads from {}: {} packages in {} loads (capacity {})",
                    self.depot, self.package_count, self.group_count, self.capacity
                );
                for group in &self.groups {
                    let _ = writeln!(
                        buffer,
                        "Load {}: [{}] weight {}/{} ({:.0}%)",
                        group.id,
                        group.packages.join(", "),
                        group.weight,
                        self.capacity,
                        group.utilization * 100.0
                    );
                    let _ = writeln!(
                        buffer,
                        "  {} (cost {}, {} hops)",
                        group.route, group.route_cost, group.hops
                    );
                }
            }
            RenderMode::Markdown => {
                let _ = writeln!(
                    buffer,
                    "**Loads** from _{}_ ({} packages, {} loads)",
                    self.depot, self.package_count, self.group_count
                );
                for group in &self.groups {
                    let _ = writeln!(
                        buffer,
                        "* **{}**: `{}` via {}",
                        group.id,
                        group.packages.join(", "),
                        group.route
                    );
                }
            }
        }
        buffer
    }
}

fn route_steps(graph: &Graph, route: &Route) -> Result<Vec<RouteStep>> {
    let mut steps = Vec::with_capacity(route.len());
    let mut previous: Option<&str> = None;
    for (index, id) in route.nodes().iter().enumerate() {
        let node_index = graph.resolve(id)?;
        let leg_distance = match previous {
            Some(prev) => Some(graph.distance(prev, id).ok_or_else(|| {
                Error::DisjointRouteStep {
                    from: prev.to_string(),
                    to: id.clone(),
                }
            })?),
            None => None,
        };
        steps.push(RouteStep {
            index,
            node: id.clone(),
            position: graph.node_at(node_index).position,
            leg_distance,
        });
        previous = Some(id);
    }
    Ok(steps)
}

fn utilization(weight: u64, capacity: u64) -> f64 {
    if capacity == 0 {
        0.0
    } else {
        weight as f64 / capacity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consolidate::LoadGroup;
    use crate::search::RouteSearcher;

    fn line_graph() -> Graph {
        let mut builder = Graph::builder();
        builder.add_node("A", 0, 0).unwrap();
        builder.add_node("B", 1, 0).unwrap();
        builder.add_node("C", 2, 0).unwrap();
        builder.add_edge("A", "B", 2).unwrap();
        builder.add_edge("B", "C", 3).unwrap();
        builder.build()
    }

    #[test]
    fn route_summary_lists_leg_distances() {
        let graph = line_graph();
        let outcome = RouteSearcher::new(&graph).search("A", "C").unwrap();
        let summary = RouteSummary::from_outcome(&graph, SearchMode::Exhaustive, &outcome).unwrap();

        assert_eq!(summary.cost, 5);
        assert_eq!(summary.hops, 2);
        let legs: Vec<_> = summary.steps.iter().map(|s| s.leg_distance).collect();
        assert_eq!(legs, vec![None, Some(2), Some(3)]);

        let text = summary.render(RenderMode::PlainText);
        assert!(text.starts_with("Route: A -> C (2 hops, cost 5, exhaustive search)"));
        assert!(text.contains("  2: C (2, 0) +3"));
    }

    #[test]
    fn consolidation_summary_reports_costs_and_utilization() {
        let graph = line_graph();
        let consolidation = Consolidation {
            depot: "A".to_string(),
            capacity: 40,
            groups: vec![LoadGroup {
                id: 0,
                packages: vec!["P1".to_string(), "P2".to_string()],
                weight: 10,
                route: Route::new(vec!["A".into(), "B".into(), "C".into()]).unwrap(),
            }],
        };

        let summary = ConsolidationSummary::from_consolidation(&graph, &consolidation).unwrap();
        assert_eq!(summary.package_count, 2);
        assert_eq!(summary.groups[0].route_cost, 5);
        assert!((summary.groups[0].utilization - 0.25).abs() < f64::EPSILON);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["groups"][0]["route"], serde_json::json!(["A", "B", "C"]));

        let text = summary.render(RenderMode::PlainText);
        assert!(text.contains("Load 0: [P1, P2] weight 10/40 (25%)"));
        assert!(text.contains("A -> B -> C (cost 5, 2 hops)"));
    }
}
