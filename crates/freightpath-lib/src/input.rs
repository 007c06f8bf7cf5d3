//! CSV input loading.
//!
//! Five headered CSV files describe a run: nodes, connections, truck
//! capacity, package types and packages. Each row is decoded positionally
//! into a named row struct and validated before it reaches the graph or the
//! manifest. Every problem is reported as [`Error::MalformedInput`] naming the
//! source and its 1-based line.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::consolidate::{Manifest, Package};
use crate::error::{Error, Result};
use crate::graph::Graph;

pub const NODES_FILE: &str = "nodes.csv";
pub const CONNECTIONS_FILE: &str = "connections.csv";
pub const TRUCK_FILE: &str = "truck.csv";
pub const PACKAGE_TYPES_FILE: &str = "package_types.csv";
pub const PACKAGES_FILE: &str = "packages.csv";

#[derive(Debug, Deserialize)]
struct NodeRow {
    node: String,
    x: i64,
    y: i64,
}

#[derive(Debug, Deserialize)]
struct ConnectionRow {
    node_a: String,
    node_b: String,
    available: u8,
    distance: u64,
}

#[derive(Debug, Deserialize)]
struct TruckRow {
    max_units: u64,
}

#[derive(Debug, Deserialize)]
struct PackageTypeRow {
    package_type: String,
    weight: u64,
}

#[derive(Debug, Deserialize)]
struct PackageRow {
    package_id: String,
    package_type: String,
    goal: String,
}

/// Locations of the five input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub nodes: PathBuf,
    pub connections: PathBuf,
    pub truck: PathBuf,
    pub package_types: PathBuf,
    pub packages: PathBuf,
}

impl InputPaths {
    /// Canonical file names inside `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            nodes: dir.join(NODES_FILE),
            connections: dir.join(CONNECTIONS_FILE),
            truck: dir.join(TRUCK_FILE),
            package_types: dir.join(PACKAGE_TYPES_FILE),
            packages: dir.join(PACKAGES_FILE),
        }
    }
}

/// Fully materialized input for one run.
#[derive(Debug, Clone)]
pub struct DeliveryInput {
    pub graph: Graph,
    pub manifest: Manifest,
}

/// Load and validate every input file.
pub fn load_input(paths: &InputPaths) -> Result<DeliveryInput> {
    let graph = build_graph(
        open(&paths.nodes)?,
        &paths.nodes.display().to_string(),
        open(&paths.connections)?,
        &paths.connections.display().to_string(),
    )?;
    let manifest = build_manifest(
        &graph,
        ManifestSource {
            reader: open(&paths.truck)?,
            name: &paths.truck.display().to_string(),
        },
        ManifestSource {
            reader: open(&paths.package_types)?,
            name: &paths.package_types.display().to_string(),
        },
        ManifestSource {
            reader: open(&paths.packages)?,
            name: &paths.packages.display().to_string(),
        },
    )?;

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        packages = manifest.packages().len(),
        capacity = manifest.truck_capacity(),
        "loaded delivery input"
    );

    Ok(DeliveryInput { graph, manifest })
}

/// Build a graph from node and connection CSV readers.
pub fn read_graph<N: Read, C: Read>(nodes: N, connections: C) -> Result<Graph> {
    build_graph(nodes, NODES_FILE, connections, CONNECTIONS_FILE)
}

/// Build a manifest from truck, package type and package CSV readers,
/// checking package destinations against `graph`.
pub fn read_manifest<T: Read, P: Read, K: Read>(
    graph: &Graph,
    truck: T,
    package_types: P,
    packages: K,
) -> Result<Manifest> {
    build_manifest(
        graph,
        ManifestSource {
            reader: truck,
            name: TRUCK_FILE,
        },
        ManifestSource {
            reader: package_types,
            name: PACKAGE_TYPES_FILE,
        },
        ManifestSource {
            reader: packages,
            name: PACKAGES_FILE,
        },
    )
}

struct ManifestSource<'n, R> {
    reader: R,
    name: &'n str,
}

fn open(path: &Path) -> Result<File> {
    debug!(path = %path.display(), "opening input file");
    Ok(File::open(path)?)
}

fn build_graph<N: Read, C: Read>(
    nodes: N,
    nodes_name: &str,
    connections: C,
    connections_name: &str,
) -> Result<Graph> {
    let mut builder = Graph::builder();

    for (line, row) in read_rows::<_, NodeRow>(nodes, nodes_name)? {
        builder
            .add_node(row.node, row.x, row.y)
            .map_err(|err| malformed(nodes_name, line, err))?;
    }

    for (line, row) in read_rows::<_, ConnectionRow>(connections, connections_name)? {
        if row.available == 0 {
            continue;
        }
        builder
            .add_edge(&row.node_a, &row.node_b, row.distance)
            .map_err(|err| malformed(connections_name, line, err))?;
    }

    Ok(builder.build())
}

fn build_manifest<T: Read, P: Read, K: Read>(
    graph: &Graph,
    truck: ManifestSource<'_, T>,
    package_types: ManifestSource<'_, P>,
    packages: ManifestSource<'_, K>,
) -> Result<Manifest> {
    let capacity = read_rows::<_, TruckRow>(truck.reader, truck.name)?
        .into_iter()
        .last()
        .map(|(_, row)| row.max_units)
        .ok_or_else(|| malformed(truck.name, 1, "no truck capacity row"))?;
    let mut manifest = Manifest::new(capacity);

    let mut seen_types = HashSet::new();
    for (line, row) in read_rows::<_, PackageTypeRow>(package_types.reader, package_types.name)? {
        if !seen_types.insert(row.package_type.clone()) {
            return Err(malformed(
                package_types.name,
                line,
                format!("duplicate package type {}", row.package_type),
            ));
        }
        manifest.add_package_type(row.package_type, row.weight);
    }

    for (line, row) in read_rows::<_, PackageRow>(packages.reader, packages.name)? {
        if !seen_types.contains(&row.package_type) {
            return Err(malformed(
                packages.name,
                line,
                format!("unknown package type {}", row.package_type),
            ));
        }
        if !graph.contains(&row.goal) {
            return Err(malformed(
                packages.name,
                line,
                format!("unknown destination node {}", row.goal),
            ));
        }
        manifest
            .add_package(Package::new(row.package_id, row.package_type, row.goal))
            .map_err(|err| malformed(packages.name, line, err))?;
    }

    Ok(manifest)
}

/// Decode every data row, pairing it with its 1-based line number.
fn read_rows<R: Read, T: DeserializeOwned>(reader: R, source: &str) -> Result<Vec<(u64, T)>> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .has_headers(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    loop {
        match csv_reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                let line = err.position().map(|pos| pos.line()).unwrap_or(0);
                return Err(malformed(source, line, err));
            }
        }
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        let row = record
            .deserialize::<T>(None)
            .map_err(|err| malformed(source, line, err))?;
        rows.push((line, row));
    }

    debug!(source, rows = rows.len(), "read input rows");
    Ok(rows)
}

fn malformed(source: &str, line: u64, message: impl ToString) -> Error {
    Error::MalformedInput {
        source_name: source.to_string(),
        line,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODES: &str = "Node,X,Y\nA,0,0\nB,1,0\nC,2,0\n";
    const CONNECTIONS: &str = "A,B,Available,Distance\nA,B,1,1\nB,C,1,1\nA,C,0,5\n";

    #[test]
    fn unavailable_connections_are_skipped() {
        let graph = read_graph(NODES.as_bytes(), CONNECTIONS.as_bytes()).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.distance("A", "C"), None);
        assert_eq!(graph.distance("C", "B"), Some(1));
    }

    #[test]
    fn fields_are_trimmed() {
        let nodes = "node, x, y\n A , 0 , 0 \n B , 3 , 4 \n";
        let connections = "a,b,avail,dist\n A , B , 1 , 5 \n";
        let graph = read_graph(nodes.as_bytes(), connections.as_bytes()).unwrap();
        assert_eq!(graph.distance("A", "B"), Some(5));
    }

    #[test]
    fn bad_coordinate_reports_line() {
        let nodes = "node,x,y\nA,0,0\nB,one,0\n";
        match read_graph(nodes.as_bytes(), "a,b,c,d\n".as_bytes()) {
            Err(Error::MalformedInput {
                source_name, line, ..
            }) => {
                assert_eq!(source_name, NODES_FILE);
                assert_eq!(line, 3);
            }
            other => panic!("expected malformed input, got {other:?}"),
        }
    }

    #[test]
    fn negative_distance_is_malformed() {
        let connections = "a,b,avail,dist\nA,B,1,-4\n";
        assert!(matches!(
            read_graph(NODES.as_bytes(), connections.as_bytes()),
            Err(Error::MalformedInput { line: 2, .. })
        ));
    }

    #[test]
    fn edge_to_unknown_node_is_malformed() {
        let connections = "a,b,avail,dist\nA,Q,1,4\n";
        assert!(matches!(
            read_graph(NODES.as_bytes(), connections.as_bytes()),
            Err(Error::MalformedInput { .. })
        ));
    }

    #[test]
    fn manifest_uses_last_truck_row() {
        let graph = read_graph(NODES.as_bytes(), CONNECTIONS.as_bytes()).unwrap();
        let manifest = read_manifest(
            &graph,
            "max\n50\n100\n".as_bytes(),
            "type,weight\nS,1\nM,2\n".as_bytes(),
            "id,type,goal\nP1,S,C\nP2,M,B\n".as_bytes(),
        )
        .unwrap();

        assert_eq!(manifest.truck_capacity(), 100);
        assert_eq!(manifest.package_type_count(), 2);
        let ids: Vec<_> = manifest.packages().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2"]);
    }

    #[test]
    fn missing_truck_row_is_malformed() {
        let graph = read_graph(NODES.as_bytes(), CONNECTIONS.as_bytes()).unwrap();
        let result = read_manifest(
            &graph,
            "max\n".as_bytes(),
            "type,weight\n".as_bytes(),
            "id,type,goal\n".as_bytes(),
        );
        assert!(matches!(result, Err(Error::MalformedInput { .. })));
    }

    #[test]
    fn unknown_destination_is_malformed() {
        let graph = read_graph(NODES.as_bytes(), CONNECTIONS.as_bytes()).unwrap();
        let result = read_manifest(
            &graph,
            "max\n10\n".as_bytes(),
            "type,weight\nS,1\n".as_bytes(),
            "id,type,goal\nP1,S,Z\n".as_bytes(),
        );
        match result {
            Err(Error::MalformedInput { line, message, .. }) => {
                assert_eq!(line, 2);
                assert!(message.contains("Z"));
            }
            other => panic!("expected malformed input, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_package_type_is_malformed() {
        let graph = read_graph(NODES.as_bytes(), CONNECTIONS.as_bytes()).unwrap();
        let result = read_manifest(
            &graph,
            "max\n10\n".as_bytes(),
            "type,weight\nS,1\nS,2\n".as_bytes(),
            "id,type,goal\n".as_bytes(),
        );
        assert!(matches!(result, Err(Error::MalformedInput { line: 3, .. })));
    }
}
