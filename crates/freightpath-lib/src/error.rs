use thiserror::Error;

/// Convenient result alias for the freightpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a breadth-first walk from the first node does not reach
    /// every node in the graph.
    #[error("graph is not connected: reached {visited} of {total} nodes")]
    DisconnectedGraph { visited: usize, total: usize },

    /// Raised when the search frontier empties before the goal is popped.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a node identifier is not present in the graph.
    #[error("unknown node: {id}{}", format_suggestions(.suggestions))]
    UnknownNode {
        id: String,
        suggestions: Vec<String>,
    },

    /// Raised when the graph has no nodes and therefore no depot.
    #[error("graph contains no nodes")]
    EmptyGraph,

    /// Raised when an edge connects a node to itself.
    #[error("edge {node} -> {node} is a self-loop")]
    SelfLoop { node: String },

    /// Raised when the same node identifier is added twice.
    #[error("duplicate node: {id}")]
    DuplicateNode { id: String },

    /// Raised when a second edge joins an already connected pair.
    #[error("duplicate edge between {a} and {b}")]
    DuplicateEdge { a: String, b: String },

    /// Raised when a package references a type missing from the type table.
    #[error("package {package} references unknown package type {package_type}")]
    UnknownPackageType {
        package: String,
        package_type: String,
    },

    /// Raised when the same package identifier appears twice in a manifest.
    #[error("duplicate package: {id}")]
    DuplicatePackage { id: String },

    /// Raised when a single package is heavier than a truck can carry.
    #[error("package {package} weighs {weight} units, exceeding truck capacity {capacity}")]
    PackageExceedsCapacity {
        package: String,
        weight: u64,
        capacity: u64,
    },

    /// Raised when a search runs past its configured expansion budget.
    #[error("search from {start} to {goal} exceeded {limit} expansions")]
    SearchLimitExceeded {
        start: String,
        goal: String,
        limit: usize,
    },

    /// Raised when a route steps between two nodes without a connecting edge.
    #[error("route steps from {from} to {to} without a connecting edge")]
    DisjointRouteStep { from: String, to: String },

    /// Raised by the input loader for unparseable or inconsistent rows.
    #[error("malformed input in {source_name} at line {line}: {message}")]
    MalformedInput {
        source_name: String,
        line: u64,
        message: String,
    },

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_node_without_suggestions() {
        let error = Error::UnknownNode {
            id: "Z".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(error.to_string(), "unknown node: Z");
    }

    #[test]
    fn unknown_node_with_single_suggestion() {
        let error = Error::UnknownNode {
            id: "Depo".to_string(),
            suggestions: vec!["Depot".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "unknown node: Depo. Did you mean 'Depot'?"
        );
    }

    #[test]
    fn unknown_node_with_multiple_suggestions() {
        let error = Error::UnknownNode {
            id: "N1".to_string(),
            suggestions: vec!["N10".to_string(), "N11".to_string()],
        };
        assert!(error
            .to_string()
            .ends_with("Did you mean one of: 'N10', 'N11'?"));
    }
}
