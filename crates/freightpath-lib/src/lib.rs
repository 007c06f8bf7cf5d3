//! freightpath library entry points.
//!
//! This crate loads a delivery network and package manifest, verifies the
//! network is connected, finds least-cost routes with a heuristic best-first
//! search, and greedily consolidates per-package routes into truck loads.
//! Higher-level consumers (the CLI) should only depend on the items exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod connectivity;
pub mod consolidate;
pub mod error;
pub mod graph;
pub mod input;
pub mod output;
pub mod route;
pub mod search;

pub use connectivity::{ensure_connected, reachable_count};
pub use consolidate::{
    merge_routes, plan_deliveries, Consolidation, ConsolidationOptions, Consolidator, LoadGroup,
    Manifest, Package, PackageRoute,
};
pub use error::{Error, Result};
pub use graph::{Graph, GraphBuilder, Node, NodeId, Position};
pub use input::{load_input, read_graph, read_manifest, DeliveryInput, InputPaths};
pub use output::{ConsolidationSummary, GroupSummary, RenderMode, RouteStep, RouteSummary};
pub use route::Route;
pub use search::{
    find_route, RouteSearcher, SearchMode, SearchOptions, SearchOutcome, SearchStats,
};
