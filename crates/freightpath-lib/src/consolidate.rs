//! Greedy consolidation of per-package routes into truck loads.
//!
//! Every package is routed from the depot (the first node of the graph) to
//! its destination. The routes are then folded, in manifest order, into a
//! growing list of [`LoadGroup`]s: a package joins the first group whose
//! shared route is a prefix of its own route (or the other way round) and
//! which still has room for its weight. Otherwise it opens a new group.
//!
//! The fold never revisits earlier decisions, so a different package order
//! can produce a different grouping.

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::connectivity::ensure_connected;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::route::Route;
use crate::search::{RouteSearcher, SearchOptions};

/// A package waiting to be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub id: String,
    pub package_type: String,
    pub destination: NodeId,
}

impl Package {
    pub fn new(
        id: impl Into<String>,
        package_type: impl Into<String>,
        destination: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            package_type: package_type.into(),
            destination: destination.into(),
        }
    }
}

/// Truck capacity, package type weights and the ordered package list for one
/// run.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    truck_capacity: u64,
    package_types: HashMap<String, u64>,
    packages: Vec<Package>,
}

impl Manifest {
    pub fn new(truck_capacity: u64) -> Self {
        Self {
            truck_capacity,
            package_types: HashMap::new(),
            packages: Vec::new(),
        }
    }

    pub fn truck_capacity(&self) -> u64 {
        self.truck_capacity
    }

    /// Register a package type. A later registration of the same type
    /// replaces the earlier weight.
    pub fn add_package_type(&mut self, package_type: impl Into<String>, weight: u64) -> &mut Self {
        self.package_types.insert(package_type.into(), weight);
        self
    }

    /// Append a package. Package identifiers must be unique.
    pub fn add_package(&mut self, package: Package) -> Result<&mut Self> {
        if self.packages.iter().any(|existing| existing.id == package.id) {
            return Err(Error::DuplicatePackage { id: package.id });
        }
        self.packages.push(package);
        Ok(self)
    }

    /// Packages in insertion order.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn package_type_count(&self) -> usize {
        self.package_types.len()
    }

    /// Unit weight of a package, looked up through its type.
    pub fn weight_of(&self, package: &Package) -> Result<u64> {
        self.package_types
            .get(&package.package_type)
            .copied()
            .ok_or_else(|| Error::UnknownPackageType {
                package: package.id.clone(),
                package_type: package.package_type.clone(),
            })
    }
}

/// Route computed for a single package from the depot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRoute {
    pub package: String,
    pub weight: u64,
    pub route: Route,
}

/// Packages sharing one truck and one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadGroup {
    pub id: usize,
    pub packages: Vec<String>,
    pub weight: u64,
    pub route: Route,
}

impl LoadGroup {
    fn open(id: usize, planned: PackageRoute) -> Self {
        Self {
            id,
            packages: vec![planned.package],
            weight: planned.weight,
            route: planned.route,
        }
    }

    /// Whether `planned` may join this group under `capacity`.
    pub fn accepts(&self, planned: &PackageRoute, capacity: u64) -> bool {
        self.route.prefix_compatible(&planned.route)
            && self
                .weight
                .checked_add(planned.weight)
                .is_some_and(|total| total <= capacity)
    }

    fn absorb(&mut self, planned: PackageRoute) {
        self.packages.push(planned.package);
        self.weight += planned.weight;
        if planned.route.len() > self.route.len() {
            self.route = planned.route;
        }
    }
}

/// Result of a consolidation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Consolidation {
    pub depot: NodeId,
    pub capacity: u64,
    pub groups: Vec<LoadGroup>,
}

impl Consolidation {
    /// Group id mapped to its package ids and shared route.
    pub fn to_map(&self) -> BTreeMap<usize, (Vec<String>, Route)> {
        self.groups
            .iter()
            .map(|group| (group.id, (group.packages.clone(), group.route.clone())))
            .collect()
    }

    pub fn package_count(&self) -> usize {
        self.groups.iter().map(|group| group.packages.len()).sum()
    }
}

/// Options for a consolidation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsolidationOptions {
    pub search: SearchOptions,
    /// Compute package routes on the rayon thread pool. The merge itself is
    /// always sequential and in manifest order.
    pub parallel: bool,
}

/// Routes packages from the depot and merges the routes into load groups.
#[derive(Debug, Clone, Copy)]
pub struct Consolidator<'a> {
    graph: &'a Graph,
    options: ConsolidationOptions,
}

impl<'a> Consolidator<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self::with_options(graph, ConsolidationOptions::default())
    }

    pub fn with_options(graph: &'a Graph, options: ConsolidationOptions) -> Self {
        Self { graph, options }
    }

    /// The depot every route starts from.
    pub fn depot(&self) -> Result<&'a str> {
        self.graph
            .first_node()
            .map(|node| node.id.as_str())
            .ok_or(Error::EmptyGraph)
    }

    /// Compute one route per package, in manifest order.
    pub fn plan_routes(&self, manifest: &Manifest) -> Result<Vec<PackageRoute>> {
        let depot = self.depot()?;
        let searcher = RouteSearcher::with_options(self.graph, self.options.search);
        let capacity = manifest.truck_capacity();

        let plan = |package: &Package| -> Result<PackageRoute> {
            let weight = manifest.weight_of(package)?;
            if weight > capacity {
                return Err(Error::PackageExceedsCapacity {
                    package: package.id.clone(),
                    weight,
                    capacity,
                });
            }
            let route = searcher.find_route(depot, &package.destination)?;
            Ok(PackageRoute {
                package: package.id.clone(),
                weight,
                route,
            })
        };

        if self.options.parallel {
            manifest.packages().par_iter().map(plan).collect()
        } else {
            manifest.packages().iter().map(plan).collect()
        }
    }

    /// Route every package and merge the routes into load groups.
    pub fn consolidate(&self, manifest: &Manifest) -> Result<Consolidation> {
        let depot = self.depot()?;
        let routes = self.plan_routes(manifest)?;
        let groups = merge_routes(manifest.truck_capacity(), routes);

        info!(
            depot,
            packages = manifest.packages().len(),
            groups = groups.len(),
            "consolidated deliveries"
        );

        Ok(Consolidation {
            depot: depot.to_string(),
            capacity: manifest.truck_capacity(),
            groups,
        })
    }
}

/// Fold package routes, in order, into load groups. The first existing group
/// that accepts a route wins; otherwise the route opens a new group.
pub fn merge_routes(capacity: u64, routes: Vec<PackageRoute>) -> Vec<LoadGroup> {
    routes.into_iter().fold(Vec::new(), |mut groups, planned| {
        match groups
            .iter_mut()
            .find(|group: &&mut LoadGroup| group.accepts(&planned, capacity))
        {
            Some(group) => {
                debug!(
                    package = %planned.package,
                    group = group.id,
                    weight = group.weight + planned.weight,
                    "merged package into load group"
                );
                group.absorb(planned);
            }
            None => {
                let id = groups.len();
                debug!(package = %planned.package, group = id, "opened load group");
                groups.push(LoadGroup::open(id, planned));
            }
        }
        groups
    })
}

/// Run the connectivity gate once, then consolidate every package.
pub fn plan_deliveries(
    graph: &Graph,
    manifest: &Manifest,
    options: &ConsolidationOptions,
) -> Result<Consolidation> {
    ensure_connected(graph)?;
    Consolidator::with_options(graph, *options).consolidate(manifest)
}
